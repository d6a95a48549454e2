//! Loadout data model.
//!
//! - [`module`] - Modules, slot categories, and module states
//! - [`loadout`] - The loadout aggregate, hulls, and cargo
//! - [`boost`] - Boost links between loadouts
//! - [`hangar`] - In-memory loadout storage grouped into vaults
//! - [`description`] - Name-based loadout descriptions loaded from JSON

pub mod boost;
pub mod description;
pub mod hangar;
pub mod loadout;
pub mod module;

pub use boost::{AppliedBoost, BoostLink};
pub use description::{CargoSpec, LoadoutSpec, ModuleSpec, BOOSTER_VAULT};
pub use hangar::{Hangar, DEFAULT_VAULT};
pub use loadout::{CargoEntry, Hull, Loadout, LoadoutId, LoadoutState, SlotLayout};
pub use module::{Module, ModuleState, SlotKind};
