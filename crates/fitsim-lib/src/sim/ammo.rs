//! Per-charge combat aggregation.
//!
//! For every carried charge some weapon can use, all weapons accepting it are
//! loaded with it at once and their output is summed into a single [`AmmoRow`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Serialize, Serializer};
use tracing::debug;

use crate::catalog::constants::{ATTR_FALLOFF, ATTR_MAX_RANGE, UNAVAILABLE};
use crate::catalog::ItemId;
use crate::fit::Loadout;
use crate::graph::{AttributeGraph, DamageTypes, Entity};

use super::transient::ChargeSwap;
use super::Simulator;

/// The spread of a range attribute across several modules, in meters.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RangeEnvelope {
    /// No module defines the attribute.
    #[default]
    Unavailable,
    Single(f64),
    Span { min: f64, max: f64 },
}

impl RangeEnvelope {
    pub fn from_values(values: impl IntoIterator<Item = f64>) -> Self {
        values
            .into_iter()
            .fold(RangeEnvelope::Unavailable, |envelope, value| match envelope {
                RangeEnvelope::Unavailable => RangeEnvelope::Single(value),
                RangeEnvelope::Single(current) if current == value => envelope,
                RangeEnvelope::Single(current) => RangeEnvelope::Span {
                    min: current.min(value),
                    max: current.max(value),
                },
                RangeEnvelope::Span { min, max } => RangeEnvelope::Span {
                    min: min.min(value),
                    max: max.max(value),
                },
            })
    }

    pub fn is_available(&self) -> bool {
        !matches!(self, RangeEnvelope::Unavailable)
    }
}

impl fmt::Display for RangeEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RangeEnvelope::Unavailable => f.write_str(UNAVAILABLE),
            RangeEnvelope::Single(value) => write!(f, "{:.1} km", value / 1000.0),
            RangeEnvelope::Span { min, max } => {
                write!(f, "{:.1} – {:.1} km", min / 1000.0, max / 1000.0)
            }
        }
    }
}

impl Serialize for RangeEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Combined output of every weapon able to fire one charge.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AmmoRow {
    pub name: String,
    pub damage_type: String,
    pub optimal: RangeEnvelope,
    pub falloff: RangeEnvelope,
    /// Total volley damage of all accepting weapons.
    pub alpha: f64,
    /// Total damage per second of all accepting weapons.
    pub dps: f64,
}

impl<G: AttributeGraph + ?Sized> Simulator<'_, G> {
    /// One row per usable carried charge, sorted by name.
    ///
    /// The loadout's charges are restored and its attributes recomputed before
    /// returning. No loadout yields no rows.
    pub fn ammo_breakdown(&self, loadout: Option<&mut Loadout>) -> Vec<AmmoRow> {
        let Some(loadout) = loadout else {
            return Vec::new();
        };
        let before = loadout.state();
        let rows = self.collect_ammo_rows(loadout);
        self.graph.recompute(loadout);
        assert_eq!(
            loadout.state(),
            before,
            "ammo breakdown did not restore loadout {}",
            loadout.id()
        );
        rows
    }

    fn collect_ammo_rows(&self, loadout: &mut Loadout) -> Vec<AmmoRow> {
        let usable = self.usable_cargo(Some(&*loadout));
        if usable.is_empty() {
            return Vec::new();
        }

        let mut weapons: BTreeMap<ItemId, Vec<usize>> = BTreeMap::new();
        for slot in 0..loadout.modules().len() {
            if !self.graph.can_deal_damage(loadout, slot) {
                continue;
            }
            match self.graph.valid_charges(loadout, slot) {
                Ok(valid) => {
                    for charge in valid.intersection(&usable) {
                        weapons.entry(*charge).or_default().push(slot);
                    }
                }
                Err(err) => debug!(slot, error = %err, "weapon has no charge list"),
            }
        }

        let mut rows: Vec<AmmoRow> = weapons
            .into_iter()
            .filter_map(|(charge, slots)| self.ammo_row(loadout, charge, &slots))
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        rows
    }

    fn ammo_row(
        &self,
        loadout: &mut Loadout,
        charge: ItemId,
        slots: &[usize],
    ) -> Option<AmmoRow> {
        let mut swap = match ChargeSwap::apply(loadout, slots, Some(charge)) {
            Ok(swap) => swap,
            Err(err) => {
                debug!(%charge, error = %err, "could not load charge");
                return None;
            }
        };
        self.graph.recompute(&mut swap);

        let mut volley = DamageTypes::default();
        let mut dps = DamageTypes::default();
        let mut optimals = Vec::new();
        let mut falloffs = Vec::new();
        for &slot in slots {
            match self.graph.damage(&swap, slot) {
                Ok(damage) => {
                    volley += damage.volley;
                    dps += damage.dps;
                }
                Err(err) => debug!(slot, error = %err, "no damage reading"),
            }
            optimals.extend(self.module_value(&swap, slot, ATTR_MAX_RANGE));
            falloffs.extend(self.module_value(&swap, slot, ATTR_FALLOFF));
        }

        Some(AmmoRow {
            name: self.catalog.name_of(charge),
            damage_type: volley.label(),
            optimal: RangeEnvelope::from_values(optimals),
            falloff: RangeEnvelope::from_values(falloffs),
            alpha: volley.total(),
            dps: dps.total(),
        })
    }

    fn module_value(&self, loadout: &Loadout, slot: usize, key: &str) -> Option<f64> {
        self.graph
            .read_attribute(loadout, Entity::Module(slot), key, &[])
            .unwrap_or_else(|err| {
                debug!(slot, key, error = %err, "attribute read failed");
                None
            })
    }
}
