//! Reference attribute graph.
//!
//! Attributes start from catalog values and are modified by:
//!
//! - fitted, valid modules whose state reaches each modifier's `min_state`
//!   (targeting the hull),
//! - loaded charges (targeting the module carrying them),
//! - active boost links (targeting the hull).
//!
//! Additions are applied first, then multipliers in source order. There are no
//! stacking penalties.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::catalog::constants::{
    ATTR_CHARGE_SIZE, ATTR_DAMAGE_MULTIPLIER, ATTR_EM_DAMAGE, ATTR_EXPLOSIVE_DAMAGE,
    ATTR_KINETIC_DAMAGE, ATTR_MAX_GROUP_FITTED, ATTR_RATE_OF_FIRE, ATTR_THERMAL_DAMAGE,
};
use crate::catalog::{Catalog, Item, ItemId, ModifierOp, ModifierTarget};
use crate::error::{Error, Result};
use crate::fit::{AppliedBoost, Loadout, Module, ModuleState};

use super::{
    AttributeGraph, DamageStats, DamageTypes, DerivedAttributes, Entity, ModuleAttributes,
};

/// One pending change to an attribute.
struct Change<'a> {
    attribute: &'a str,
    op: ModifierOp,
    value: f64,
}

/// Attribute graph computed directly from catalog data.
#[derive(Debug, Clone, Copy)]
pub struct ModifierGraph<'c> {
    catalog: &'c Catalog,
}

impl<'c> ModifierGraph<'c> {
    pub fn new(catalog: &'c Catalog) -> Self {
        Self { catalog }
    }

    /// Compute derived attributes without touching the loadout.
    fn evaluate(&self, loadout: &Loadout, exclude: &[usize]) -> DerivedAttributes {
        let validity = self.module_validity(loadout);

        let mut derived = DerivedAttributes {
            modules: loadout
                .modules()
                .iter()
                .zip(&validity)
                .map(|(module, valid)| self.module_attributes(module, *valid))
                .collect(),
            ..DerivedAttributes::default()
        };

        let Some(hull) = loadout.hull().and_then(|h| self.catalog.get(h.item())) else {
            return derived;
        };

        let mut changes = Vec::new();
        for (index, module) in loadout.modules().iter().enumerate() {
            if !validity[index] || exclude.contains(&index) {
                continue;
            }
            let Some(item) = self.catalog.get(module.item()) else {
                continue;
            };
            changes.extend(
                item.modifiers
                    .iter()
                    .filter(|m| m.target == ModifierTarget::Ship && module.state() >= m.min_state)
                    .map(|m| Change {
                        attribute: &m.attribute,
                        op: m.op,
                        value: m.value,
                    }),
            );
        }

        for link in loadout.boost_links().iter().filter(|l| l.active) {
            for bonus in &link.bonuses {
                changes.push(Change {
                    attribute: &bonus.attribute,
                    op: bonus.op,
                    value: bonus.value,
                });
                derived.applied_boosts.push(AppliedBoost {
                    source: link.source,
                    source_name: link.source_name.clone(),
                    attribute: bonus.attribute.clone(),
                    op: bonus.op,
                    value: bonus.value,
                });
            }
        }

        derived.ship = apply_changes(&hull.attributes, &changes);
        derived
    }

    /// Validity of each fitted module, in rack order.
    fn module_validity(&self, loadout: &Loadout) -> Vec<bool> {
        let mut per_slot: HashMap<_, usize> = HashMap::new();
        let mut per_group: HashMap<&str, usize> = HashMap::new();

        loadout
            .modules()
            .iter()
            .map(|module| {
                let Some(item) = self.catalog.get(module.item()) else {
                    return false;
                };

                let used = per_slot.entry(module.slot()).or_default();
                *used += 1;
                let capacity = loadout
                    .hull()
                    .map(|h| h.slots().count(module.slot()))
                    .unwrap_or(0);
                if *used > capacity {
                    return false;
                }

                let fitted = per_group.entry(item.group.as_str()).or_default();
                *fitted += 1;
                if let Some(limit) = item.attribute(ATTR_MAX_GROUP_FITTED) {
                    if *fitted as f64 > limit {
                        return false;
                    }
                }

                match module.charge() {
                    Some(charge) => self
                        .charges_for(item)
                        .is_some_and(|charges| charges.contains(&charge)),
                    None => true,
                }
            })
            .collect()
    }

    fn module_attributes(&self, module: &Module, valid: bool) -> ModuleAttributes {
        let Some(item) = self.catalog.get(module.item()) else {
            return ModuleAttributes::default();
        };

        let charge = module
            .charge()
            .filter(|_| valid)
            .and_then(|id| self.catalog.get(id));
        let changes: Vec<Change<'_>> = charge
            .map(|charge| {
                charge
                    .modifiers
                    .iter()
                    .filter(|m| m.target == ModifierTarget::Carrier)
                    .map(|m| Change {
                        attribute: &m.attribute,
                        op: m.op,
                        value: m.value,
                    })
                    .collect()
            })
            .unwrap_or_default();
        let attributes = apply_changes(&item.attributes, &changes);

        let damage = if valid && module.state() >= ModuleState::Online {
            damage_of(&attributes, charge.unwrap_or(item))
        } else {
            DamageStats::default()
        };

        ModuleAttributes {
            attributes,
            damage,
            valid,
        }
    }

    /// Charges a module item can load, or `None` if it takes no charges.
    fn charges_for(&self, item: &Item) -> Option<BTreeSet<ItemId>> {
        if item.charge_groups.is_empty() {
            return None;
        }
        let size = item.attribute(ATTR_CHARGE_SIZE);
        Some(
            self.catalog
                .charges_in_groups(&item.charge_groups)
                .filter(|charge| size.is_none() || charge.attribute(ATTR_CHARGE_SIZE) == size)
                .map(|charge| charge.id)
                .collect(),
        )
    }

    fn module_item<'l>(
        &self,
        loadout: &'l Loadout,
        slot: usize,
    ) -> Result<(&'l Module, &'c Item)> {
        let module = loadout
            .module(slot)
            .ok_or(Error::SlotEmpty { index: slot })?;
        let item = self.catalog.item(module.item())?;
        Ok((module, item))
    }

    fn current<'l>(&self, loadout: &'l Loadout) -> Result<&'l DerivedAttributes> {
        loadout
            .derived()
            .ok_or(Error::StaleAttributes { id: loadout.id() })
    }
}

impl AttributeGraph for ModifierGraph<'_> {
    fn recompute(&self, loadout: &mut Loadout) {
        let derived = self.evaluate(loadout, &[]);
        for (module, attributes) in loadout.modules_mut().iter_mut().zip(&derived.modules) {
            module.set_invalid(!attributes.valid);
        }
        loadout.set_derived(derived);
    }

    fn read_attribute(
        &self,
        loadout: &Loadout,
        entity: Entity,
        key: &str,
        exclude: &[usize],
    ) -> Result<Option<f64>> {
        let current = self.current(loadout)?;
        let excluded;
        let derived = if exclude.is_empty() {
            current
        } else {
            excluded = self.evaluate(loadout, exclude);
            &excluded
        };

        match entity {
            Entity::Ship => Ok(derived.ship_attribute(key)),
            Entity::Module(slot) => {
                if slot >= derived.modules.len() {
                    return Err(Error::SlotEmpty { index: slot });
                }
                Ok(derived.module_attribute(slot, key))
            }
        }
    }

    fn valid_charges(&self, loadout: &Loadout, slot: usize) -> Result<BTreeSet<ItemId>> {
        let (_, item) = self.module_item(loadout, slot)?;
        self.charges_for(item).ok_or_else(|| Error::NoChargeCapacity {
            name: item.name.clone(),
        })
    }

    fn can_deal_damage(&self, loadout: &Loadout, slot: usize) -> bool {
        let Ok((module, item)) = self.module_item(loadout, slot) else {
            return false;
        };
        let fires = item
            .attribute(ATTR_RATE_OF_FIRE)
            .is_some_and(|rof| rof > 0.0);
        let has_damage = !item.charge_groups.is_empty() || intrinsic_damage(item).total() > 0.0;
        fires && has_damage && module.state() >= ModuleState::Online
    }

    fn damage(&self, loadout: &Loadout, slot: usize) -> Result<DamageStats> {
        self.current(loadout)?
            .modules
            .get(slot)
            .map(|m| m.damage)
            .ok_or(Error::SlotEmpty { index: slot })
    }

    fn build_module(&self, loadout: &Loadout, item: ItemId) -> Result<Module> {
        let item = self.catalog.item(item)?;
        let module = Module::new(item)?;
        let hull = loadout.hull().ok_or_else(|| Error::IncompatibleItem {
            name: item.name.clone(),
            reason: "loadout has no hull".to_string(),
        })?;
        if hull.slots().count(module.slot()) == 0 {
            return Err(Error::IncompatibleItem {
                name: item.name.clone(),
                reason: format!("{} has no {} slots", hull.name(), module.slot()),
            });
        }
        Ok(module)
    }

    fn item_name(&self, item: ItemId) -> String {
        self.catalog.name_of(item)
    }
}

fn apply_changes(base: &BTreeMap<String, f64>, changes: &[Change<'_>]) -> BTreeMap<String, f64> {
    let mut values = base.clone();

    for change in changes.iter().filter(|c| c.op == ModifierOp::Add) {
        *values.entry(change.attribute.to_string()).or_insert(0.0) += change.value;
    }
    for change in changes.iter().filter(|c| c.op != ModifierOp::Add) {
        if let Some(value) = values.get_mut(change.attribute) {
            *value *= match change.op {
                ModifierOp::PostPercent => 1.0 + change.value / 100.0,
                ModifierOp::PostMultiply => change.value,
                ModifierOp::Add => 1.0,
            };
        }
    }

    values
}

fn intrinsic_damage(item: &Item) -> DamageTypes {
    DamageTypes {
        em: item.attribute(ATTR_EM_DAMAGE).unwrap_or(0.0),
        thermal: item.attribute(ATTR_THERMAL_DAMAGE).unwrap_or(0.0),
        kinetic: item.attribute(ATTR_KINETIC_DAMAGE).unwrap_or(0.0),
        explosive: item.attribute(ATTR_EXPLOSIVE_DAMAGE).unwrap_or(0.0),
    }
}

/// Damage of a weapon with derived `attributes` firing `source` (its charge, or itself).
fn damage_of(attributes: &BTreeMap<String, f64>, source: &Item) -> DamageStats {
    let Some(rate_of_fire) = attributes
        .get(ATTR_RATE_OF_FIRE)
        .copied()
        .filter(|rof| *rof > 0.0)
    else {
        return DamageStats::default();
    };
    let multiplier = attributes
        .get(ATTR_DAMAGE_MULTIPLIER)
        .copied()
        .unwrap_or(1.0);

    let volley = intrinsic_damage(source).scaled(multiplier);
    DamageStats {
        volley,
        dps: volley.scaled(1000.0 / rate_of_fire),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base(values: &[(&str, f64)]) -> BTreeMap<String, f64> {
        values.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn additions_apply_before_multipliers() {
        let changes = [
            Change {
                attribute: "maxVelocity",
                op: ModifierOp::PostPercent,
                value: 100.0,
            },
            Change {
                attribute: "maxVelocity",
                op: ModifierOp::Add,
                value: 50.0,
            },
        ];
        let values = apply_changes(&base(&[("maxVelocity", 100.0)]), &changes);
        assert_eq!(values["maxVelocity"], 300.0);
    }

    #[test]
    fn multipliers_skip_missing_attributes() {
        let changes = [Change {
            attribute: "maxRange",
            op: ModifierOp::PostMultiply,
            value: 2.0,
        }];
        let values = apply_changes(&base(&[]), &changes);
        assert!(!values.contains_key("maxRange"));
    }

    #[test]
    fn charge_damage_scales_with_multiplier_and_rate() {
        let attributes = base(&[("rateOfFire", 2000.0), ("damageMultiplier", 2.0)]);
        let mut charge = serde_json::from_str::<Item>(
            r#"{"id": 1, "name": "Test Round", "category": "charge"}"#,
        )
        .expect("charge parses");
        charge.attributes = base(&[("kineticDamage", 5.0)]);

        let damage = damage_of(&attributes, &charge);
        assert_eq!(damage.volley.kinetic, 10.0);
        assert_eq!(damage.dps.kinetic, 5.0);
    }
}
