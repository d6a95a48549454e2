//! Boosts command handler: bonuses applied to a loadout by its linked boosters.

use std::path::Path;

use anyhow::Result;

use fitsim_lib::{render_boosts, AttributeGraph, Catalog, ModifierGraph};

use fitsim_cli::output::{print_json, OutputFormat};
use fitsim_cli::terminal::ColorPalette;

use super::LoadedFit;

pub fn handle_boosts(
    catalog: &Catalog,
    loadout_path: &Path,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<()> {
    let mut fit = LoadedFit::from_path(catalog, loadout_path)?;
    let graph = ModifierGraph::new(catalog);

    let loadout = fit.loadout_mut()?;
    graph.recompute(loadout);
    let applied = loadout
        .derived()
        .map(|derived| derived.applied_boosts.clone())
        .unwrap_or_default();

    if format == OutputFormat::Json {
        return print_json(&applied);
    }

    println!("{}", palette.heading(&format!("{} - boosts", loadout.name())));
    print!("{}", render_boosts(&applied));
    Ok(())
}
