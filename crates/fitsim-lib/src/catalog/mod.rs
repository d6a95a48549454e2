//! Static item data and catalog management.
//!
//! - [`item`] - Item definitions, modifiers, and boost bonuses
//! - [`loader`] - JSON catalog loading and name lookup
//! - [`constants`] - Attribute, group, and skill names
//!
//! # Example
//!
//! ```no_run
//! use fitsim_lib::catalog::Catalog;
//!
//! let catalog = Catalog::from_path(std::path::Path::new("catalog.json")).unwrap();
//! let rifter = catalog.by_name("Rifter").unwrap();
//! println!("{} has {} attributes", rifter.name, rifter.attributes.len());
//! ```

pub mod constants;
pub mod item;
pub mod loader;

pub use item::{
    BoostBonus, Item, ItemCategory, ItemId, Modifier, ModifierOp, ModifierTarget,
};
pub use loader::Catalog;
