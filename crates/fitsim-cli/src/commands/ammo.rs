//! Ammo command handler: per-charge damage and range for a loadout.

use std::path::Path;

use anyhow::Result;

use fitsim_lib::{render_ammo, Catalog, ModifierGraph, Simulator};

use fitsim_cli::output::{print_json, OutputFormat};
use fitsim_cli::terminal::ColorPalette;

use super::LoadedFit;

pub fn handle_ammo(
    catalog: &Catalog,
    loadout_path: &Path,
    format: OutputFormat,
    palette: ColorPalette,
) -> Result<()> {
    let mut fit = LoadedFit::from_path(catalog, loadout_path)?;
    let graph = ModifierGraph::new(catalog);
    let simulator = Simulator::new(catalog, &graph);

    let loadout = fit.loadout_mut()?;
    let rows = simulator.ammo_breakdown(Some(&mut *loadout));

    match format.render_mode() {
        None => print_json(&rows),
        Some(mode) => {
            println!("{}", palette.heading(&format!("{} - ammunition", loadout.name())));
            print!("{}", render_ammo(&rows, mode));
            Ok(())
        }
    }
}
