//! Which carried charges the fitted modules could load.

use std::collections::BTreeSet;

use tracing::debug;

use crate::catalog::{Catalog, ItemId};
use crate::fit::Loadout;
use crate::graph::AttributeGraph;

/// Charges in the cargo hold accepted by at least one fitted module.
///
/// A module that cannot answer the charge query is skipped.
pub fn resolve_usable_cargo<G: AttributeGraph + ?Sized>(
    catalog: &Catalog,
    graph: &G,
    loadout: Option<&Loadout>,
) -> BTreeSet<ItemId> {
    let Some(loadout) = loadout else {
        return BTreeSet::new();
    };

    let carried: BTreeSet<ItemId> = loadout
        .cargo()
        .iter()
        .filter(|entry| catalog.get(entry.item).is_some_and(|item| item.is_charge()))
        .map(|entry| entry.item)
        .collect();
    if carried.is_empty() {
        return carried;
    }

    let mut usable = BTreeSet::new();
    for slot in 0..loadout.modules().len() {
        match graph.valid_charges(loadout, slot) {
            Ok(valid) => usable.extend(valid.intersection(&carried).copied()),
            Err(err) => debug!(slot, error = %err, "skipping module in charge query"),
        }
    }
    usable
}
