//! Common test utilities and fixture helpers.
//!
//! Integration tests load the JSON catalog and loadout descriptions under
//! `docs/fixtures`, and a few inject failures through [`FaultyGraph`].

use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::PathBuf;

use fitsim_lib::{
    AttributeGraph, Catalog, DamageStats, Entity, Error, Hangar, ItemId, Loadout, LoadoutId,
    LoadoutSpec, ModifierGraph, Module, Result,
};

/// Path to fixtures directory used by tests (catalog, loadouts).
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

pub fn load_catalog() -> Catalog {
    Catalog::from_path(&fixtures_dir().join("catalog.json")).expect("fixture catalog loads")
}

#[allow(dead_code)]
pub fn loadout_spec(name: &str) -> LoadoutSpec {
    let path = fixtures_dir().join("loadouts").join(name);
    LoadoutSpec::from_path(&path).expect("fixture loadout parses")
}

/// Build a fixture loadout (and its boosters) into a hangar.
#[allow(dead_code)]
pub fn fixture_hangar(catalog: &Catalog, name: &str) -> (Hangar, LoadoutId) {
    loadout_spec(name)
        .into_hangar(catalog)
        .expect("fixture loadout builds")
}

/// Take the described loadout out of its hangar, boost links included.
#[allow(dead_code)]
pub fn fixture_loadout(catalog: &Catalog, name: &str) -> Loadout {
    let (hangar, id) = fixture_hangar(catalog, name);
    hangar.get(id).cloned().expect("target loadout stored")
}

#[allow(dead_code)]
pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

/// Attribute graph that fails on demand.
#[allow(dead_code)]
pub struct FaultyGraph<'c> {
    inner: ModifierGraph<'c>,
    reject_modules: bool,
    panic_on_recompute: Option<usize>,
    recomputes: Cell<usize>,
}

#[allow(dead_code)]
impl<'c> FaultyGraph<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self {
            inner: ModifierGraph::new(catalog),
            reject_modules: false,
            panic_on_recompute: None,
            recomputes: Cell::new(0),
        }
    }

    /// Reject every module built for simulation.
    pub fn rejecting_modules(mut self) -> Self {
        self.reject_modules = true;
        self
    }

    /// Panic on the `n`th recompute (1-based).
    pub fn panicking_on_recompute(mut self, n: usize) -> Self {
        self.panic_on_recompute = Some(n);
        self
    }

    pub fn recomputes(&self) -> usize {
        self.recomputes.get()
    }
}

impl AttributeGraph for FaultyGraph<'_> {
    fn recompute(&self, loadout: &mut Loadout) {
        let count = self.recomputes.get() + 1;
        self.recomputes.set(count);
        if self.panic_on_recompute == Some(count) {
            panic!("injected failure on recompute {count}");
        }
        self.inner.recompute(loadout);
    }

    fn read_attribute(
        &self,
        loadout: &Loadout,
        entity: Entity,
        key: &str,
        exclude: &[usize],
    ) -> Result<Option<f64>> {
        self.inner.read_attribute(loadout, entity, key, exclude)
    }

    fn valid_charges(&self, loadout: &Loadout, slot: usize) -> Result<BTreeSet<ItemId>> {
        self.inner.valid_charges(loadout, slot)
    }

    fn can_deal_damage(&self, loadout: &Loadout, slot: usize) -> bool {
        self.inner.can_deal_damage(loadout, slot)
    }

    fn damage(&self, loadout: &Loadout, slot: usize) -> Result<DamageStats> {
        self.inner.damage(loadout, slot)
    }

    fn build_module(&self, loadout: &Loadout, item: ItemId) -> Result<Module> {
        if self.reject_modules {
            return Err(Error::IncompatibleItem {
                name: self.item_name(item),
                reason: "rejected by test graph".to_string(),
            });
        }
        self.inner.build_module(loadout, item)
    }

    fn item_name(&self, item: ItemId) -> String {
        self.inner.item_name(item)
    }
}
