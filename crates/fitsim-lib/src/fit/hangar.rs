//! In-memory loadout storage grouped into vaults.
//!
//! Vaults only organise loadouts for display. Boost links are keyed by loadout id
//! and never consult vault membership.

use std::collections::BTreeMap;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::{Error, Result};

use super::boost::BoostLink;
use super::loadout::{Loadout, LoadoutId};

/// Name of the vault every hangar starts with.
pub const DEFAULT_VAULT: &str = "Default";

#[derive(Debug)]
pub struct Hangar {
    loadouts: BTreeMap<LoadoutId, Loadout>,
    vaults: Vec<String>,
    membership: BTreeMap<LoadoutId, String>,
    next_id: u32,
}

impl Default for Hangar {
    fn default() -> Self {
        Self::new()
    }
}

impl Hangar {
    pub fn new() -> Self {
        Self {
            loadouts: BTreeMap::new(),
            vaults: vec![DEFAULT_VAULT.to_string()],
            membership: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Reserve a fresh loadout id.
    pub fn allocate_id(&mut self) -> LoadoutId {
        let id = LoadoutId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Vault names in display order.
    pub fn vaults(&self) -> &[String] {
        &self.vaults
    }

    /// Create a vault. Creating an existing vault is a no-op.
    pub fn create_vault(&mut self, name: &str) {
        if !self.vaults.iter().any(|v| v == name) {
            self.vaults.push(name.to_string());
        }
    }

    /// Delete a vault, moving its loadouts into the first remaining vault.
    ///
    /// The last vault cannot be deleted.
    pub fn delete_vault(&mut self, name: &str) -> Result<()> {
        let index = self.vault_index(name)?;
        if self.vaults.len() <= 1 {
            return Err(Error::LoadoutValidation {
                message: "cannot delete the last vault".to_string(),
            });
        }
        self.vaults.remove(index);
        let fallback = self.vaults[0].clone();
        for vault in self.membership.values_mut() {
            if vault == name {
                *vault = fallback.clone();
            }
        }
        Ok(())
    }

    /// Store a loadout in a vault. The loadout keeps its own id.
    pub fn insert(&mut self, loadout: Loadout, vault: &str) -> Result<LoadoutId> {
        self.vault_index(vault)?;
        let id = loadout.id();
        self.next_id = self.next_id.max(id.0 + 1);
        self.membership.insert(id, vault.to_string());
        self.loadouts.insert(id, loadout);
        Ok(id)
    }

    pub fn move_to_vault(&mut self, id: LoadoutId, vault: &str) -> Result<()> {
        self.vault_index(vault)?;
        let current = self
            .membership
            .get_mut(&id)
            .ok_or(Error::UnknownLoadout { id })?;
        *current = vault.to_string();
        Ok(())
    }

    pub fn vault_of(&self, id: LoadoutId) -> Option<&str> {
        self.membership.get(&id).map(String::as_str)
    }

    /// Loadout ids stored in a vault.
    pub fn loadouts_in(&self, vault: &str) -> Vec<LoadoutId> {
        self.membership
            .iter()
            .filter(|(_, v)| v.as_str() == vault)
            .map(|(id, _)| *id)
            .collect()
    }

    pub fn get(&self, id: LoadoutId) -> Option<&Loadout> {
        self.loadouts.get(&id)
    }

    pub fn get_mut(&mut self, id: LoadoutId) -> Option<&mut Loadout> {
        self.loadouts.get_mut(&id)
    }

    /// Make `source` boost `target`, capturing the source's current bonuses.
    pub fn link_booster(
        &mut self,
        target: LoadoutId,
        source: LoadoutId,
        catalog: &Catalog,
    ) -> Result<()> {
        let link = {
            let booster = self
                .loadouts
                .get(&source)
                .ok_or(Error::UnknownLoadout { id: source })?;
            BoostLink::from_source(booster, catalog)
        };
        let loadout = self
            .loadouts
            .get_mut(&target)
            .ok_or(Error::UnknownLoadout { id: target })?;

        debug!(
            %target,
            %source,
            bonuses = link.bonuses.len(),
            "linking booster"
        );
        loadout.add_boost_link(link);
        Ok(())
    }

    pub fn unlink_booster(&mut self, target: LoadoutId, source: LoadoutId) -> Result<bool> {
        let loadout = self
            .loadouts
            .get_mut(&target)
            .ok_or(Error::UnknownLoadout { id: target })?;
        Ok(loadout.remove_boost_link(source).is_some())
    }

    fn vault_index(&self, name: &str) -> Result<usize> {
        self.vaults
            .iter()
            .position(|v| v == name)
            .ok_or_else(|| Error::UnknownVault {
                name: name.to_string(),
            })
    }
}
