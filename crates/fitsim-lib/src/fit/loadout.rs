//! The mutable loadout aggregate.
//!
//! A [`Loadout`] owns its module rack, cargo hold, and boost links, plus the
//! derived attributes produced by the last recompute. Every mutation drops the
//! derived attributes so nothing stale can be read back.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::catalog::constants::{ATTR_HIGH_SLOTS, ATTR_LOW_SLOTS, ATTR_MID_SLOTS};
use crate::catalog::{Item, ItemCategory, ItemId};
use crate::error::{Error, Result};
use crate::graph::DerivedAttributes;

use super::boost::BoostLink;
use super::module::{Module, ModuleState, SlotKind};

/// Stable identity of a loadout.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct LoadoutId(pub u32);

impl fmt::Display for LoadoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Number of slots per category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SlotLayout {
    pub high: usize,
    pub mid: usize,
    pub low: usize,
}

impl SlotLayout {
    pub fn count(&self, kind: SlotKind) -> usize {
        match kind {
            SlotKind::High => self.high,
            SlotKind::Mid => self.mid,
            SlotKind::Low => self.low,
        }
    }
}

/// The ship a loadout is built on.
#[derive(Debug, Clone, PartialEq)]
pub struct Hull {
    item: ItemId,
    name: String,
    slots: SlotLayout,
}

impl Hull {
    pub fn from_item(item: &Item) -> Result<Self> {
        if item.category != ItemCategory::Ship {
            return Err(Error::LoadoutValidation {
                message: format!("'{}' is not a ship", item.name),
            });
        }

        let count = |key: &str| item.attribute(key).map(|v| v.max(0.0) as usize).unwrap_or(0);
        Ok(Self {
            item: item.id,
            name: item.name.clone(),
            slots: SlotLayout {
                high: count(ATTR_HIGH_SLOTS),
                mid: count(ATTR_MID_SLOTS),
                low: count(ATTR_LOW_SLOTS),
            },
        })
    }

    pub fn item(&self) -> ItemId {
        self.item
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn slots(&self) -> SlotLayout {
        self.slots
    }
}

/// Items carried in the cargo hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CargoEntry {
    pub item: ItemId,
    pub quantity: u32,
}

/// Structural fingerprint of a loadout used to verify restores.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadoutState {
    pub modules: Vec<(ItemId, Option<ItemId>, ModuleState)>,
    pub boost_links: Vec<(LoadoutId, bool)>,
}

/// A hull with its fitted modules, cargo, and incoming boost links.
#[derive(Debug, Clone)]
pub struct Loadout {
    id: LoadoutId,
    name: String,
    hull: Option<Hull>,
    modules: Vec<Module>,
    cargo: Vec<CargoEntry>,
    boost_links: Vec<BoostLink>,
    derived: Option<DerivedAttributes>,
}

impl Loadout {
    pub fn new(id: LoadoutId, name: impl Into<String>, hull: Option<Hull>) -> Self {
        Self {
            id,
            name: name.into(),
            hull,
            modules: Vec::new(),
            cargo: Vec::new(),
            boost_links: Vec::new(),
            derived: None,
        }
    }

    pub fn id(&self) -> LoadoutId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn hull(&self) -> Option<&Hull> {
        self.hull.as_ref()
    }

    pub fn modules(&self) -> &[Module] {
        &self.modules
    }

    pub fn module(&self, index: usize) -> Option<&Module> {
        self.modules.get(index)
    }

    pub fn cargo(&self) -> &[CargoEntry] {
        &self.cargo
    }

    pub fn boost_links(&self) -> &[BoostLink] {
        &self.boost_links
    }

    pub fn used_slots(&self, kind: SlotKind) -> usize {
        self.modules.iter().filter(|m| m.slot() == kind).count()
    }

    /// Free slots of a category. A loadout without a hull has none.
    pub fn free_slots(&self, kind: SlotKind) -> usize {
        self.hull
            .as_ref()
            .map(|hull| hull.slots().count(kind).saturating_sub(self.used_slots(kind)))
            .unwrap_or(0)
    }

    /// Fit a module into the first free slot of its category and return its index.
    pub fn fit_module(&mut self, module: Module) -> Result<usize> {
        let kind = module.slot();
        if self.free_slots(kind) == 0 {
            return Err(Error::NoFreeSlot { slot: kind });
        }

        let index = self
            .modules
            .iter()
            .rposition(|m| m.slot() <= kind)
            .map(|i| i + 1)
            .unwrap_or(0);
        self.modules.insert(index, module);
        self.invalidate();
        Ok(index)
    }

    /// Remove the module at `index` and compact the rack.
    pub fn remove_module(&mut self, index: usize) -> Result<Module> {
        if index >= self.modules.len() {
            return Err(Error::SlotEmpty { index });
        }
        let module = self.modules.remove(index);
        self.normalize();
        self.invalidate();
        Ok(module)
    }

    /// Put `module` at `index`, returning the module it displaced.
    pub fn replace_module(&mut self, index: usize, module: Module) -> Result<Module> {
        let current = self
            .modules
            .get_mut(index)
            .ok_or(Error::SlotEmpty { index })?;
        if current.slot() != module.slot() {
            return Err(Error::LoadoutValidation {
                message: format!(
                    "cannot put a {} slot module into {} slot index {index}",
                    module.slot(),
                    current.slot()
                ),
            });
        }
        let previous = std::mem::replace(current, module);
        self.invalidate();
        Ok(previous)
    }

    /// Load `charge` into the module at `index`, returning the previous charge.
    pub fn set_charge(&mut self, index: usize, charge: Option<ItemId>) -> Result<Option<ItemId>> {
        let module = self
            .modules
            .get_mut(index)
            .ok_or(Error::SlotEmpty { index })?;
        let previous = module.set_charge(charge);
        self.invalidate();
        Ok(previous)
    }

    pub fn set_module_state(&mut self, index: usize, state: ModuleState) -> Result<()> {
        let module = self
            .modules
            .get_mut(index)
            .ok_or(Error::SlotEmpty { index })?;
        module.set_state(state);
        self.invalidate();
        Ok(())
    }

    /// Add items to the cargo hold, merging stacks of the same item.
    pub fn add_cargo(&mut self, item: ItemId, quantity: u32) {
        match self.cargo.iter_mut().find(|entry| entry.item == item) {
            Some(entry) => entry.quantity = entry.quantity.saturating_add(quantity),
            None => self.cargo.push(CargoEntry { item, quantity }),
        }
    }

    /// Attach a boost link. A link from the same source replaces the old one.
    pub fn add_boost_link(&mut self, link: BoostLink) {
        match self
            .boost_links
            .iter_mut()
            .find(|existing| existing.source == link.source)
        {
            Some(existing) => *existing = link,
            None => self.boost_links.push(link),
        }
        self.invalidate();
    }

    pub fn remove_boost_link(&mut self, source: LoadoutId) -> Option<BoostLink> {
        let index = self.boost_links.iter().position(|l| l.source == source)?;
        self.invalidate();
        Some(self.boost_links.remove(index))
    }

    /// Set the `active` flag of the link from `source`, returning the old value.
    pub fn set_boost_active(&mut self, source: LoadoutId, active: bool) -> Option<bool> {
        let link = self.boost_links.iter_mut().find(|l| l.source == source)?;
        let previous = std::mem::replace(&mut link.active, active);
        self.invalidate();
        Some(previous)
    }

    /// Keep the rack ordered high, mid, low; relative order within a category is stable.
    pub fn normalize(&mut self) {
        self.modules.sort_by_key(|m| m.slot());
    }

    /// Attributes from the last recompute, if still current.
    pub fn derived(&self) -> Option<&DerivedAttributes> {
        self.derived.as_ref()
    }

    pub fn invalidate(&mut self) {
        self.derived = None;
    }

    pub fn state(&self) -> LoadoutState {
        LoadoutState {
            modules: self
                .modules
                .iter()
                .map(|m| (m.item(), m.charge(), m.state()))
                .collect(),
            boost_links: self
                .boost_links
                .iter()
                .map(|l| (l.source, l.active))
                .collect(),
        }
    }

    pub(crate) fn modules_mut(&mut self) -> &mut [Module] {
        &mut self.modules
    }

    pub(crate) fn set_derived(&mut self, derived: DerivedAttributes) {
        self.derived = Some(derived);
    }

    /// Put a previously displaced module back without any validation.
    pub(crate) fn restore_module(&mut self, index: usize, module: Module) {
        if let Some(slot) = self.modules.get_mut(index) {
            *slot = module;
        }
        self.invalidate();
    }
}
