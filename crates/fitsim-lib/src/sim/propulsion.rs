//! Propulsion module classification.

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;

use crate::catalog::constants::{SKILL_AFTERBURNER, SKILL_HIGH_SPEED_MANEUVERING};
use crate::catalog::{Catalog, Item};
use crate::fit::Loadout;

/// Kind of propulsion module, decided by its skill prerequisites.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PropulsionKind {
    Afterburner,
    Microwarpdrive,
    /// A propulsion module requiring neither skill.
    Propulsion,
}

impl PropulsionKind {
    pub fn classify(item: &Item) -> Self {
        if item.requires_skill(SKILL_AFTERBURNER) {
            PropulsionKind::Afterburner
        } else if item.requires_skill(SKILL_HIGH_SPEED_MANEUVERING) {
            PropulsionKind::Microwarpdrive
        } else {
            PropulsionKind::Propulsion
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PropulsionKind::Afterburner => "Afterburner",
            PropulsionKind::Microwarpdrive => "Microwarpdrive",
            PropulsionKind::Propulsion => "Propulsion",
        }
    }
}

impl fmt::Display for PropulsionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// `"1MN Afterburner II (Afterburner)"`.
pub fn propulsion_label(item: &Item) -> String {
    format!("{} ({})", item.name, PropulsionKind::classify(item))
}

/// Rack indices of fitted propulsion modules.
pub fn fitted_propulsion(catalog: &Catalog, loadout: &Loadout) -> Vec<usize> {
    loadout
        .modules()
        .iter()
        .enumerate()
        .filter(|(_, module)| catalog.get(module.item()).is_some_and(Item::is_propulsion))
        .map(|(index, _)| index)
        .collect()
}

/// Distinct propulsion items in the cargo hold, in cargo order.
pub fn carried_propulsion<'c>(catalog: &'c Catalog, loadout: &Loadout) -> Vec<&'c Item> {
    let mut seen = HashSet::new();
    loadout
        .cargo()
        .iter()
        .filter_map(|entry| catalog.get(entry.item))
        .filter(|item| item.is_propulsion())
        .filter(|item| seen.insert(item.id))
        .collect()
}
