use std::fmt::Write;

use crate::catalog::constants::UNAVAILABLE;
use crate::catalog::ModifierOp;
use crate::fit::AppliedBoost;
use crate::sim::{AmmoRow, MobilityBreakdown, PropulsionSpeeds, SpeedSource};

/// Presentation style for breakdown tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderMode {
    #[default]
    PlainText,
    Markdown,
}

/// `"1234.5 m/s"`, or the unavailable marker.
pub fn format_speed(value: Option<f64>) -> String {
    match value {
        Some(speed) => format!("{speed:.1} m/s"),
        None => UNAVAILABLE.to_string(),
    }
}

/// Meters rendered as `"24.0 km"`, or the unavailable marker.
pub fn format_range(value: Option<f64>) -> String {
    match value {
        Some(meters) => format!("{:.1} km", meters / 1000.0),
        None => UNAVAILABLE.to_string(),
    }
}

fn source_note(source: SpeedSource) -> &'static str {
    match source {
        SpeedSource::Fitted => "fitted",
        SpeedSource::Inserted => "from cargo",
        SpeedSource::Replaced => "from cargo, replacing fitted",
        SpeedSource::NoCandidate => "none available",
        SpeedSource::NoSlot => "no slot",
        SpeedSource::Rejected => "cannot be fitted",
    }
}

fn propulsion_name(row: &PropulsionSpeeds, class: &str) -> String {
    match &row.module {
        Some(name) => format!("{class}: {name}"),
        None => class.to_string(),
    }
}

/// Render ammunition rows as a table.
pub fn render_ammo(rows: &[AmmoRow], mode: RenderMode) -> String {
    let mut buffer = String::new();
    if rows.is_empty() {
        let _ = writeln!(buffer, "No usable ammunition in cargo.");
        return buffer;
    }

    match mode {
        RenderMode::PlainText => {
            let _ = writeln!(
                buffer,
                "{:<28} {:<22} {:>16} {:>16} {:>10} {:>10}",
                "Ammo", "Damage", "Optimal", "Falloff", "Alpha", "DPS"
            );
            for row in rows {
                let _ = writeln!(
                    buffer,
                    "{:<28} {:<22} {:>16} {:>16} {:>10.1} {:>10.1}",
                    row.name,
                    row.damage_type,
                    row.optimal.to_string(),
                    row.falloff.to_string(),
                    row.alpha,
                    row.dps
                );
            }
        }
        RenderMode::Markdown => {
            let _ = writeln!(buffer, "| Ammo | Damage | Optimal | Falloff | Alpha | DPS |");
            let _ = writeln!(buffer, "|---|---|---:|---:|---:|---:|");
            for row in rows {
                let _ = writeln!(
                    buffer,
                    "| **{}** | {} | {} | {} | {:.1} | {:.1} |",
                    row.name, row.damage_type, row.optimal, row.falloff, row.alpha, row.dps
                );
            }
        }
    }
    buffer
}

/// Render a mobility breakdown.
pub fn render_mobility(breakdown: &MobilityBreakdown, mode: RenderMode) -> String {
    let with_prop = breakdown
        .fitted_prop_label
        .clone()
        .unwrap_or_else(|| "With propulsion".to_string());
    let speed_rows = [
        (
            "Without propulsion".to_string(),
            breakdown.speed_no_prop_no_boost,
            breakdown.speed_no_prop_with_boost,
            None,
        ),
        (
            with_prop,
            breakdown.speed_with_prop_no_boost,
            breakdown.speed_with_prop_with_boost,
            None,
        ),
        (
            propulsion_name(&breakdown.afterburner, "Afterburner"),
            breakdown.afterburner.no_boost,
            breakdown.afterburner.with_boost,
            Some(breakdown.afterburner.source),
        ),
        (
            propulsion_name(&breakdown.microwarpdrive, "Microwarpdrive"),
            breakdown.microwarpdrive.no_boost,
            breakdown.microwarpdrive.with_boost,
            Some(breakdown.microwarpdrive.source),
        ),
    ];

    let mut buffer = String::new();
    match mode {
        RenderMode::PlainText => {
            let _ = writeln!(buffer, "{:<44} {:>14} {:>14}", "Speed", "No boost", "With boost");
            for (label, no_boost, with_boost, source) in &speed_rows {
                let _ = write!(
                    buffer,
                    "{:<44} {:>14} {:>14}",
                    label,
                    format_speed(*no_boost),
                    format_speed(*with_boost)
                );
                match source {
                    Some(source) => {
                        let _ = writeln!(buffer, "  ({})", source_note(*source));
                    }
                    None => {
                        let _ = writeln!(buffer);
                    }
                }
            }
            let _ = writeln!(
                buffer,
                "{:<44} {:>14} {:>14}",
                "Lock range",
                format_range(breakdown.lock_range_no_boost),
                format_range(breakdown.lock_range_with_boost)
            );
            if !breakdown.cargo_propulsion.is_empty() {
                let _ = writeln!(buffer);
                let _ = writeln!(buffer, "Carried propulsion:");
                for item in &breakdown.cargo_propulsion {
                    let _ = writeln!(buffer, "  {} ({})", item.name, item.kind);
                }
            }
        }
        RenderMode::Markdown => {
            let _ = writeln!(buffer, "| | No boost | With boost |");
            let _ = writeln!(buffer, "|---|---:|---:|");
            for (label, no_boost, with_boost, source) in &speed_rows {
                let note = source
                    .map(|s| format!(" _({})_", source_note(s)))
                    .unwrap_or_default();
                let _ = writeln!(
                    buffer,
                    "| **{label}**{note} | {} | {} |",
                    format_speed(*no_boost),
                    format_speed(*with_boost)
                );
            }
            let _ = writeln!(
                buffer,
                "| **Lock range** | {} | {} |",
                format_range(breakdown.lock_range_no_boost),
                format_range(breakdown.lock_range_with_boost)
            );
            for item in &breakdown.cargo_propulsion {
                let _ = writeln!(buffer, "* {} (`{}`)", item.name, item.kind);
            }
        }
    }
    buffer
}

/// Render the boost bonuses applied during the last recompute.
pub fn render_boosts(boosts: &[AppliedBoost]) -> String {
    let mut buffer = String::new();
    if boosts.is_empty() {
        let _ = writeln!(buffer, "No boosts applied.");
        return buffer;
    }
    for boost in boosts {
        let change = match boost.op {
            ModifierOp::Add => format!("{:+}", boost.value),
            ModifierOp::PostPercent => format!("{:+}%", boost.value),
            ModifierOp::PostMultiply => format!("x{}", boost.value),
        };
        let _ = writeln!(
            buffer,
            "{} ({}): {} {}",
            boost.source_name, boost.source, boost.attribute, change
        );
    }
    buffer
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fit::LoadoutId;
    use crate::sim::RangeEnvelope;

    #[test]
    fn unavailable_is_not_zero() {
        assert_eq!(format_speed(None), "—");
        assert_eq!(format_speed(Some(0.0)), "0.0 m/s");
        assert_eq!(format_range(Some(24_000.0)), "24.0 km");
    }

    #[test]
    fn ammo_table_lists_each_row() {
        let rows = vec![AmmoRow {
            name: "EMP S".to_string(),
            damage_type: "EM / Kinetic".to_string(),
            optimal: RangeEnvelope::Single(1200.0),
            falloff: RangeEnvelope::Unavailable,
            alpha: 60.0,
            dps: 24.5,
        }];
        let text = render_ammo(&rows, RenderMode::PlainText);
        assert!(text.contains("EMP S"));
        assert!(text.contains("1.2 km"));
        assert!(text.contains("24.5"));

        let markdown = render_ammo(&rows, RenderMode::Markdown);
        assert!(markdown.contains("| **EMP S** | EM / Kinetic | 1.2 km | — | 60.0 | 24.5 |"));
    }

    #[test]
    fn mobility_marks_missing_rows() {
        let text = render_mobility(&MobilityBreakdown::default(), RenderMode::PlainText);
        assert!(text.contains("Without propulsion"));
        assert!(text.contains("(none available)"));
        assert!(!text.contains("Carried propulsion"));
    }

    #[test]
    fn boosts_show_source_and_change() {
        let boosts = vec![AppliedBoost {
            source: LoadoutId(2),
            source_name: "Command".to_string(),
            attribute: "maxTargetRange".to_string(),
            op: ModifierOp::PostPercent,
            value: 10.0,
        }];
        assert_eq!(
            render_boosts(&boosts),
            "Command (#2): maxTargetRange +10%\n"
        );
    }
}
