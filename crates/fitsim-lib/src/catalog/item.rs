//! Static item definitions.
//!
//! Items are immutable game data: hulls, modules, charges, and anything else that
//! can sit in a cargo hold. Everything a loadout references points back into the
//! catalog by [`ItemId`].

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::fit::{ModuleState, SlotKind};

use super::constants::GROUP_PROPULSION;

/// Numeric type identifier of a catalog item.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub u32);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemCategory {
    Ship,
    Module,
    Charge,
    Commodity,
}

impl ItemCategory {
    pub fn label(self) -> &'static str {
        match self {
            ItemCategory::Ship => "ship",
            ItemCategory::Module => "module",
            ItemCategory::Charge => "charge",
            ItemCategory::Commodity => "commodity",
        }
    }
}

/// How a modifier combines with the attribute it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierOp {
    /// Added to the base value before any multiplier.
    Add,
    /// Multiplies by `1 + value / 100`.
    PostPercent,
    /// Multiplies by `value`.
    PostMultiply,
}

/// What a modifier applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ModifierTarget {
    /// The hull the source is fitted to.
    #[default]
    Ship,
    /// The module a charge is loaded into.
    Carrier,
}

/// A single attribute modification declared by an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    #[serde(default)]
    pub target: ModifierTarget,
    pub attribute: String,
    pub op: ModifierOp,
    pub value: f64,
    /// Lowest module state at which the modifier applies.
    #[serde(default)]
    pub min_state: ModuleState,
}

/// Bonus a command module projects onto the loadouts it boosts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoostBonus {
    pub attribute: String,
    pub op: ModifierOp,
    pub value: f64,
}

/// Static definition of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub category: ItemCategory,
    #[serde(default)]
    pub group: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotKind>,
    #[serde(default)]
    pub attributes: BTreeMap<String, f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_skills: Vec<String>,
    /// Charge groups a module can load. Empty for modules that take no charges.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub charge_groups: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub boosts: Vec<BoostBonus>,
}

impl Item {
    /// Base (unmodified) value of an attribute.
    pub fn attribute(&self, key: &str) -> Option<f64> {
        self.attributes.get(key).copied()
    }

    pub fn is_charge(&self) -> bool {
        self.category == ItemCategory::Charge
    }

    pub fn is_module(&self) -> bool {
        self.category == ItemCategory::Module
    }

    pub fn is_propulsion(&self) -> bool {
        self.is_module() && self.group == GROUP_PROPULSION
    }

    pub fn requires_skill(&self, skill: &str) -> bool {
        self.required_skills.iter().any(|s| s == skill)
    }

    /// Validate item data for correctness.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::CatalogValidation {
                message: format!("item {} has an empty name", self.id),
            });
        }

        if self.is_module() && self.slot.is_none() {
            return Err(Error::CatalogValidation {
                message: format!("module '{}' does not declare a slot", self.name),
            });
        }

        for (key, value) in &self.attributes {
            if !value.is_finite() {
                return Err(Error::CatalogValidation {
                    message: format!("attribute {key} of '{}' must be finite", self.name),
                });
            }
        }

        let values = self
            .modifiers
            .iter()
            .map(|m| m.value)
            .chain(self.boosts.iter().map(|b| b.value));
        for value in values {
            if !value.is_finite() {
                return Err(Error::CatalogValidation {
                    message: format!("modifier values of '{}' must be finite", self.name),
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_with_defaults() {
        let json = r#"{"id": 10, "name": "Cargo Crate", "category": "commodity"}"#;
        let item: Item = serde_json::from_str(json).expect("item parses");
        assert_eq!(item.id, ItemId(10));
        assert!(item.attributes.is_empty());
        assert!(item.slot.is_none());
        assert!(!item.is_charge());
        item.validate().expect("commodity needs no slot");
    }

    #[test]
    fn module_without_slot_is_rejected() {
        let json = r#"{"id": 11, "name": "Floating Gun", "category": "module"}"#;
        let item: Item = serde_json::from_str(json).expect("item parses");
        let err = item.validate().expect_err("slot is required");
        assert!(err.to_string().contains("does not declare a slot"));
    }

    #[test]
    fn modifier_state_defaults_to_online() {
        let json = r#"{"attribute": "maxVelocity", "op": "post_percent", "value": 10}"#;
        let modifier: Modifier = serde_json::from_str(json).expect("modifier parses");
        assert_eq!(modifier.min_state, ModuleState::Online);
        assert_eq!(modifier.target, ModifierTarget::Ship);
    }
}
