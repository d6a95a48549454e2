//! Fitted modules and the slot categories they occupy.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::{Item, ItemId};
use crate::error::{Error, Result};

/// Slot category a module occupies. Ordering matches rack order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKind {
    High,
    Mid,
    Low,
}

impl SlotKind {
    pub fn label(self) -> &'static str {
        match self {
            SlotKind::High => "high",
            SlotKind::Mid => "mid",
            SlotKind::Low => "low",
        }
    }
}

impl fmt::Display for SlotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Operating state of a module. Modifiers declare the lowest state they need.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ModuleState {
    Offline,
    #[default]
    Online,
    Active,
}

/// A module occupying one slot of a loadout.
#[derive(Debug, Clone, PartialEq)]
pub struct Module {
    item: ItemId,
    slot: SlotKind,
    charge: Option<ItemId>,
    state: ModuleState,
    invalid: bool,
}

impl Module {
    /// Build an active module from a catalog item.
    pub fn new(item: &Item) -> Result<Self> {
        if !item.is_module() {
            return Err(Error::IncompatibleItem {
                name: item.name.clone(),
                reason: format!("{} items do not occupy slots", item.category.label()),
            });
        }
        let slot = item.slot.ok_or_else(|| Error::IncompatibleItem {
            name: item.name.clone(),
            reason: "no slot category declared".to_string(),
        })?;

        Ok(Self {
            item: item.id,
            slot,
            charge: None,
            state: ModuleState::Active,
            invalid: false,
        })
    }

    pub fn with_state(mut self, state: ModuleState) -> Self {
        self.state = state;
        self
    }

    pub fn with_charge(mut self, charge: Option<ItemId>) -> Self {
        self.charge = charge;
        self
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn slot(&self) -> SlotKind {
        self.slot
    }

    pub fn charge(&self) -> Option<ItemId> {
        self.charge
    }

    pub fn state(&self) -> ModuleState {
        self.state
    }

    /// Validity flag written by the last recompute.
    pub fn is_invalid(&self) -> bool {
        self.invalid
    }

    pub(crate) fn set_charge(&mut self, charge: Option<ItemId>) -> Option<ItemId> {
        std::mem::replace(&mut self.charge, charge)
    }

    pub(crate) fn set_state(&mut self, state: ModuleState) {
        self.state = state;
    }

    pub(crate) fn set_invalid(&mut self, invalid: bool) {
        self.invalid = invalid;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemCategory;
    use std::collections::BTreeMap;

    fn item(category: ItemCategory, slot: Option<SlotKind>) -> Item {
        Item {
            id: ItemId(7),
            name: "Test Item".to_string(),
            category,
            group: String::new(),
            slot,
            attributes: BTreeMap::new(),
            required_skills: Vec::new(),
            charge_groups: Vec::new(),
            modifiers: Vec::new(),
            boosts: Vec::new(),
        }
    }

    #[test]
    fn modules_start_active_and_empty() {
        let module = Module::new(&item(ItemCategory::Module, Some(SlotKind::Mid)))
            .expect("module builds");
        assert_eq!(module.slot(), SlotKind::Mid);
        assert_eq!(module.state(), ModuleState::Active);
        assert!(module.charge().is_none());
        assert!(!module.is_invalid());
    }

    #[test]
    fn charges_cannot_become_modules() {
        let err = Module::new(&item(ItemCategory::Charge, None)).expect_err("not a module");
        assert!(matches!(err, Error::IncompatibleItem { .. }));
    }

    #[test]
    fn states_are_ordered() {
        assert!(ModuleState::Offline < ModuleState::Online);
        assert!(ModuleState::Online < ModuleState::Active);
    }
}
