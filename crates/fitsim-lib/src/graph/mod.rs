//! Attribute graph facade.
//!
//! The simulation engine never computes attributes itself. It mutates a loadout,
//! asks an [`AttributeGraph`] to recompute, and reads values back. Any modifier
//! engine that honours the recompute-then-read contract can be plugged in;
//! [`ModifierGraph`] is the reference implementation backed by a [`Catalog`].
//!
//! [`Catalog`]: crate::catalog::Catalog

use std::collections::{BTreeMap, BTreeSet};
use std::ops::{Add, AddAssign};

use serde::Serialize;

use crate::catalog::constants::UNAVAILABLE;
use crate::catalog::ItemId;
use crate::error::Result;
use crate::fit::{AppliedBoost, Loadout, Module};

pub mod modifier;

pub use modifier::ModifierGraph;

/// The object an attribute is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    /// The loadout's hull.
    Ship,
    /// The module at a rack index.
    Module(usize),
}

/// Contract between the simulation engine and a modifier-resolution engine.
///
/// Reads are only valid after [`AttributeGraph::recompute`] has run since the
/// last mutation of the loadout; implementations report a stale read as
/// [`Error::StaleAttributes`](crate::Error::StaleAttributes).
pub trait AttributeGraph {
    /// Rebuild every derived attribute of the loadout, including module validity.
    fn recompute(&self, loadout: &mut Loadout);

    /// Read a derived attribute. Modules whose rack index is in `exclude` are
    /// ignored as modifier sources for this read only.
    ///
    /// `Ok(None)` means the entity does not define the attribute.
    fn read_attribute(
        &self,
        loadout: &Loadout,
        entity: Entity,
        key: &str,
        exclude: &[usize],
    ) -> Result<Option<f64>>;

    /// Charges the module at `slot` is mechanically able to load.
    ///
    /// Fails for modules that do not use charges.
    fn valid_charges(&self, loadout: &Loadout, slot: usize) -> Result<BTreeSet<ItemId>>;

    fn can_deal_damage(&self, loadout: &Loadout, slot: usize) -> bool;

    /// Volley and sustained damage of the module at `slot`.
    fn damage(&self, loadout: &Loadout, slot: usize) -> Result<DamageStats>;

    /// Build a module from `item`, rejecting items the loadout can never fit.
    fn build_module(&self, loadout: &Loadout, item: ItemId) -> Result<Module>;

    /// Display name of `item` for error messages.
    fn item_name(&self, item: ItemId) -> String {
        format!("#{item}")
    }
}

/// Damage split by type.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DamageTypes {
    pub em: f64,
    pub thermal: f64,
    pub kinetic: f64,
    pub explosive: f64,
}

impl DamageTypes {
    pub fn total(&self) -> f64 {
        self.em + self.thermal + self.kinetic + self.explosive
    }

    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            em: self.em * factor,
            thermal: self.thermal * factor,
            kinetic: self.kinetic * factor,
            explosive: self.explosive * factor,
        }
    }

    /// Names of the damage types present, e.g. `"EM / Kinetic"`.
    pub fn label(&self) -> String {
        let parts: Vec<&str> = [
            (self.em, "EM"),
            (self.thermal, "Thermal"),
            (self.kinetic, "Kinetic"),
            (self.explosive, "Explosive"),
        ]
        .into_iter()
        .filter(|(value, _)| *value > 0.0)
        .map(|(_, name)| name)
        .collect();

        if parts.is_empty() {
            UNAVAILABLE.to_string()
        } else {
            parts.join(" / ")
        }
    }
}

impl Add for DamageTypes {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            em: self.em + rhs.em,
            thermal: self.thermal + rhs.thermal,
            kinetic: self.kinetic + rhs.kinetic,
            explosive: self.explosive + rhs.explosive,
        }
    }
}

impl AddAssign for DamageTypes {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct DamageStats {
    pub volley: DamageTypes,
    pub dps: DamageTypes,
}

/// Derived attributes of one fitted module.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ModuleAttributes {
    pub attributes: BTreeMap<String, f64>,
    pub damage: DamageStats,
    pub valid: bool,
}

/// Everything a recompute produces for a loadout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DerivedAttributes {
    pub ship: BTreeMap<String, f64>,
    pub modules: Vec<ModuleAttributes>,
    pub applied_boosts: Vec<AppliedBoost>,
}

impl DerivedAttributes {
    pub fn ship_attribute(&self, key: &str) -> Option<f64> {
        self.ship.get(key).copied()
    }

    pub fn module_attribute(&self, slot: usize, key: &str) -> Option<f64> {
        self.modules
            .get(slot)
            .and_then(|m| m.attributes.get(key).copied())
    }
}
