// Handlers for each CLI subcommand. main.rs parses arguments and dispatches here.

pub mod ammo;
pub mod boosts;
pub mod items;
pub mod speed;

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use fitsim_lib::{Catalog, Hangar, Loadout, LoadoutId, LoadoutSpec};

/// A loadout file built into its own hangar, with boosters linked.
pub struct LoadedFit {
    hangar: Hangar,
    target: LoadoutId,
}

impl LoadedFit {
    pub fn from_path(catalog: &Catalog, path: &Path) -> Result<Self> {
        let spec = LoadoutSpec::from_path(path)
            .with_context(|| format!("failed to read loadout from {}", path.display()))?;
        let (hangar, target) = spec
            .into_hangar(catalog)
            .with_context(|| format!("failed to build loadout from {}", path.display()))?;
        debug!(path = %path.display(), loadout = %target, "loadout built");
        Ok(Self { hangar, target })
    }

    pub fn loadout_mut(&mut self) -> Result<&mut Loadout> {
        let target = self.target;
        self.hangar
            .get_mut(target)
            .ok_or_else(|| anyhow::anyhow!("loadout {target} missing from hangar"))
    }
}
