//! Boost links between loadouts.

use serde::Serialize;

use crate::catalog::{BoostBonus, Catalog, ModifierOp};

use super::loadout::{Loadout, LoadoutId};
use super::module::ModuleState;

/// "Loadout `source` boosts me": attached to the boosted (target) loadout.
#[derive(Debug, Clone, PartialEq)]
pub struct BoostLink {
    pub source: LoadoutId,
    pub source_name: String,
    pub active: bool,
    pub bonuses: Vec<BoostBonus>,
}

impl BoostLink {
    /// Capture the bonuses `source` currently projects.
    ///
    /// Every online command module of the source contributes its declared
    /// bonuses, in rack order.
    pub fn from_source(source: &Loadout, catalog: &Catalog) -> Self {
        let bonuses = source
            .modules()
            .iter()
            .filter(|module| module.state() >= ModuleState::Online)
            .filter_map(|module| catalog.get(module.item()))
            .flat_map(|item| item.boosts.iter().cloned())
            .collect();

        Self {
            source: source.id(),
            source_name: source.name().to_string(),
            active: true,
            bonuses,
        }
    }
}

/// A bonus that was applied during the last recompute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppliedBoost {
    pub source: LoadoutId,
    pub source_name: String,
    pub attribute: String,
    pub op: ModifierOp,
    pub value: f64,
}
