//! Derived-stat simulation engine.
//!
//! - [`boosts`] - Forcing boost links on or off with restorable snapshots
//! - [`transient`] - Scoped charge swaps and module insert/replace guards
//! - [`usable`] - Carried charges that fitted modules can load
//! - [`propulsion`] - Propulsion module classification
//! - [`ammo`] - Per-charge combat aggregation
//! - [`mobility`] - Speed and lock range under what-if conditions
//!
//! Every engine entry point leaves the loadout structurally identical to how it
//! found it, with a freshly recomputed attribute cache.

use std::collections::BTreeSet;

use crate::catalog::{Catalog, ItemId};
use crate::fit::Loadout;
use crate::graph::AttributeGraph;

pub mod ammo;
pub mod boosts;
pub mod mobility;
pub mod propulsion;
pub mod transient;
pub mod usable;

pub use ammo::{AmmoRow, RangeEnvelope};
pub use boosts::{BoostOverride, BoostSnapshot};
pub use mobility::{CargoPropulsion, MobilityBreakdown, PropulsionSpeeds, SpeedSource};
pub use propulsion::PropulsionKind;
pub use transient::{ChargeSwap, TransientModule};
pub use usable::resolve_usable_cargo;

/// Runs what-if simulations against an attribute graph.
pub struct Simulator<'a, G: AttributeGraph + ?Sized> {
    catalog: &'a Catalog,
    graph: &'a G,
}

impl<G: AttributeGraph + ?Sized> Clone for Simulator<'_, G> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<G: AttributeGraph + ?Sized> Copy for Simulator<'_, G> {}

impl<'a, G: AttributeGraph + ?Sized> Simulator<'a, G> {
    pub fn new(catalog: &'a Catalog, graph: &'a G) -> Self {
        Self { catalog, graph }
    }

    pub fn usable_cargo(&self, loadout: Option<&Loadout>) -> BTreeSet<ItemId> {
        resolve_usable_cargo(self.catalog, self.graph, loadout)
    }
}
