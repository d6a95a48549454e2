//! Fitsim library entry points.
//!
//! This crate loads an item catalog, builds loadouts against it, and runs
//! what-if simulations (ammunition and mobility breakdowns) on top of an
//! attribute graph. Higher-level consumers (the CLI, benchmarks) should only
//! depend on the items exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod catalog;
pub mod error;
pub mod fit;
pub mod graph;
pub mod output;
pub mod sim;

pub use catalog::{Catalog, Item, ItemCategory, ItemId};
pub use error::{Error, Result};
pub use fit::{
    Hangar, Hull, Loadout, LoadoutId, LoadoutSpec, Module, ModuleState, SlotKind, DEFAULT_VAULT,
};
pub use graph::{
    AttributeGraph, DamageStats, DamageTypes, DerivedAttributes, Entity, ModifierGraph,
};
pub use output::{
    format_range, format_speed, render_ammo, render_boosts, render_mobility, RenderMode,
};
pub use sim::{
    resolve_usable_cargo, AmmoRow, BoostOverride, BoostSnapshot, ChargeSwap, MobilityBreakdown,
    PropulsionKind, RangeEnvelope, Simulator, SpeedSource, TransientModule,
};
