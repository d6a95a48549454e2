//! Serializable loadout descriptions.
//!
//! A [`LoadoutSpec`] names items instead of referencing ids, so it can be written
//! by hand. Building it resolves every name against a [`Catalog`].

use std::fs;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::error::{Error, Result};

use super::hangar::{Hangar, DEFAULT_VAULT};
use super::loadout::{Hull, Loadout, LoadoutId};
use super::module::{Module, ModuleState};

/// Vault that booster loadouts from a description are stored in.
pub const BOOSTER_VAULT: &str = "Boosters";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleSpec {
    pub item: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub charge: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<ModuleState>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CargoSpec {
    pub item: String,
    pub quantity: u32,
}

/// Hand-writable description of a loadout and the loadouts boosting it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadoutSpec {
    pub name: String,
    #[serde(default)]
    pub hull: Option<String>,
    #[serde(default)]
    pub modules: Vec<ModuleSpec>,
    #[serde(default)]
    pub cargo: Vec<CargoSpec>,
    #[serde(default)]
    pub boosters: Vec<LoadoutSpec>,
}

impl LoadoutSpec {
    pub fn from_path(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|source| Error::ReadFile {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Build this loadout (without its boosters).
    pub fn build(&self, catalog: &Catalog, id: LoadoutId) -> Result<Loadout> {
        let hull = match &self.hull {
            Some(name) => Some(Hull::from_item(catalog.by_name(name)?)?),
            None => None,
        };
        let mut loadout = Loadout::new(id, self.name.clone(), hull);

        for spec in &self.modules {
            let item = catalog.by_name(&spec.item)?;
            let charge = match &spec.charge {
                Some(name) => {
                    let charge = catalog.by_name(name)?;
                    if !charge.is_charge() {
                        return Err(Error::LoadoutValidation {
                            message: format!("'{}' is not a charge", charge.name),
                        });
                    }
                    Some(charge.id)
                }
                None => None,
            };
            let module = Module::new(item)?
                .with_charge(charge)
                .with_state(spec.state.unwrap_or(ModuleState::Active));
            loadout
                .fit_module(module)
                .map_err(|err| Error::LoadoutValidation {
                    message: format!("cannot fit '{}' to '{}': {err}", item.name, self.name),
                })?;
        }

        for spec in &self.cargo {
            let item = catalog.by_name(&spec.item)?;
            loadout.add_cargo(item.id, spec.quantity);
        }

        Ok(loadout)
    }

    /// Build this loadout and its boosters into a hangar, linking each booster.
    ///
    /// Returns the hangar and the id of the described (boosted) loadout.
    pub fn into_hangar(&self, catalog: &Catalog) -> Result<(Hangar, LoadoutId)> {
        let mut hangar = Hangar::new();
        let target = hangar.allocate_id();
        hangar.insert(self.build(catalog, target)?, DEFAULT_VAULT)?;

        if !self.boosters.is_empty() {
            hangar.create_vault(BOOSTER_VAULT);
        }
        for booster in &self.boosters {
            let id = hangar.allocate_id();
            hangar.insert(booster.build(catalog, id)?, BOOSTER_VAULT)?;
            hangar.link_booster(target, id, catalog)?;
        }

        Ok((hangar, target))
    }
}
