//! Speed and lock range under what-if conditions.
//!
//! The fitted loadout is measured twice, once with every boost link forced on
//! and once with every link forced off. Speeds without propulsion are read with
//! the fitted propulsion modules excluded as modifier sources, so nothing is
//! unfitted to get them.
//!
//! Afterburner and microwarpdrive rows that the fitted propulsion module does
//! not cover are filled by temporarily fitting the first matching propulsion
//! item found in the cargo hold.

use serde::Serialize;
use tracing::{debug, warn};

use crate::catalog::constants::{ATTR_MAX_TARGET_RANGE, ATTR_MAX_VELOCITY, ATTR_SPEED_LIMIT};
use crate::catalog::Item;
use crate::error::{Error, Result};
use crate::fit::Loadout;
use crate::graph::{AttributeGraph, Entity};

use super::boosts::BoostOverride;
use super::propulsion::{carried_propulsion, fitted_propulsion, propulsion_label, PropulsionKind};
use super::transient::TransientModule;
use super::Simulator;

/// Where the speeds of a per-class row came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpeedSource {
    /// The fitted propulsion module is of this class.
    Fitted,
    /// A carried module was fitted into a free slot.
    Inserted,
    /// A carried module temporarily replaced the fitted propulsion module.
    Replaced,
    /// Nothing of this class is fitted or carried.
    #[default]
    NoCandidate,
    /// A candidate is carried but there is no free slot and nothing to replace.
    NoSlot,
    /// The candidate could not be fitted or was invalid once fitted.
    Rejected,
}

/// Speeds with a propulsion module of one class active.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct PropulsionSpeeds {
    /// Name of the module the speeds were measured with.
    pub module: Option<String>,
    pub no_boost: Option<f64>,
    pub with_boost: Option<f64>,
    pub source: SpeedSource,
}

impl PropulsionSpeeds {
    fn unmeasured(module: Option<&Item>, source: SpeedSource) -> Self {
        Self {
            module: module.map(|item| item.name.clone()),
            source,
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CargoPropulsion {
    pub name: String,
    pub kind: PropulsionKind,
}

/// Mobility readings of a loadout. `None` means the value is unavailable.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct MobilityBreakdown {
    pub speed_no_prop_no_boost: Option<f64>,
    pub speed_no_prop_with_boost: Option<f64>,
    pub speed_with_prop_no_boost: Option<f64>,
    pub speed_with_prop_with_boost: Option<f64>,
    pub lock_range_no_boost: Option<f64>,
    pub lock_range_with_boost: Option<f64>,
    /// `"Name (Class)"` of the first fitted propulsion module.
    pub fitted_prop_label: Option<String>,
    pub afterburner: PropulsionSpeeds,
    pub microwarpdrive: PropulsionSpeeds,
    pub cargo_propulsion: Vec<CargoPropulsion>,
}

/// Readings taken in one boost state.
#[derive(Debug, Clone, Copy, Default)]
struct Readings {
    speed: Option<f64>,
    speed_no_prop: Option<f64>,
    lock_range: Option<f64>,
}

/// How a carried propulsion item gets onto the rack.
#[derive(Debug, Clone, Copy)]
enum Placement {
    Insert,
    Replace(usize),
}

impl<G: AttributeGraph + ?Sized> Simulator<'_, G> {
    /// Measure speed and lock range with and without propulsion and boosts.
    ///
    /// The loadout is restored and recomputed before returning. Failures while
    /// simulating carried modules only leave their row unavailable, and no
    /// loadout at all yields an all-unavailable breakdown.
    pub fn mobility(&self, loadout: Option<&mut Loadout>) -> MobilityBreakdown {
        let Some(loadout) = loadout else {
            return MobilityBreakdown::default();
        };
        let before = loadout.state();
        let breakdown = self.measure_mobility(loadout);
        self.graph.recompute(loadout);
        assert_eq!(
            loadout.state(),
            before,
            "mobility simulation did not restore loadout {}",
            loadout.id()
        );
        breakdown
    }

    fn measure_mobility(&self, loadout: &mut Loadout) -> MobilityBreakdown {
        let props = fitted_propulsion(self.catalog, loadout);
        let first_prop = props
            .first()
            .and_then(|&index| loadout.module(index))
            .and_then(|module| self.catalog.get(module.item()));

        let (boosted, unboosted) = {
            let mut links = BoostOverride::new(loadout, true);
            debug!(links = links.snapshot().len(), "boost links forced on");
            self.graph.recompute(&mut links);
            let boosted = self.readings(&links, &props);

            links.set_all(false);
            self.graph.recompute(&mut links);
            let unboosted = self.readings(&links, &props);
            (boosted, unboosted)
        };
        self.graph.recompute(loadout);

        let mut breakdown = MobilityBreakdown {
            speed_no_prop_no_boost: unboosted.speed_no_prop,
            speed_no_prop_with_boost: boosted.speed_no_prop,
            speed_with_prop_no_boost: unboosted.speed,
            speed_with_prop_with_boost: boosted.speed,
            lock_range_no_boost: unboosted.lock_range,
            lock_range_with_boost: boosted.lock_range,
            fitted_prop_label: first_prop.map(propulsion_label),
            ..MobilityBreakdown::default()
        };

        let fitted_kind = first_prop.map(PropulsionKind::classify);
        let carried = carried_propulsion(self.catalog, loadout);
        for kind in [PropulsionKind::Afterburner, PropulsionKind::Microwarpdrive] {
            let row = if fitted_kind == Some(kind) {
                PropulsionSpeeds {
                    module: first_prop.map(|item| item.name.clone()),
                    no_boost: unboosted.speed,
                    with_boost: boosted.speed,
                    source: SpeedSource::Fitted,
                }
            } else {
                let candidate = carried
                    .iter()
                    .copied()
                    .find(|item| PropulsionKind::classify(item) == kind);
                self.carried_speeds(loadout, candidate, props.first().copied())
            };
            match kind {
                PropulsionKind::Afterburner => breakdown.afterburner = row,
                _ => breakdown.microwarpdrive = row,
            }
        }

        breakdown.cargo_propulsion = carried
            .into_iter()
            .map(|item| CargoPropulsion {
                name: item.name.clone(),
                kind: PropulsionKind::classify(item),
            })
            .collect();
        breakdown
    }

    fn carried_speeds(
        &self,
        loadout: &mut Loadout,
        candidate: Option<&Item>,
        replaceable: Option<usize>,
    ) -> PropulsionSpeeds {
        let Some(item) = candidate else {
            return PropulsionSpeeds::default();
        };

        // Insert first; a rejected insert (e.g. maxGroupFitted) falls back to
        // replacing the fitted propulsion module.
        let has_free_slot = item.slot.is_some_and(|slot| loadout.free_slots(slot) > 0);
        let mut placements = Vec::with_capacity(2);
        if has_free_slot {
            placements.push(Placement::Insert);
        }
        if let Some(index) = replaceable {
            placements.push(Placement::Replace(index));
        }
        if placements.is_empty() {
            debug!(item = %item.name, "no slot to simulate carried propulsion");
            return PropulsionSpeeds::unmeasured(Some(item), SpeedSource::NoSlot);
        }

        for placement in placements {
            let result = self.simulate_carried(loadout, item, placement);
            self.graph.recompute(loadout);

            match result {
                Ok((no_boost, with_boost)) => {
                    return PropulsionSpeeds {
                        module: Some(item.name.clone()),
                        no_boost,
                        with_boost,
                        source: match placement {
                            Placement::Insert => SpeedSource::Inserted,
                            Placement::Replace(_) => SpeedSource::Replaced,
                        },
                    }
                }
                Err(err) => {
                    debug!(item = %item.name, ?placement, error = %err, "placement rejected");
                }
            }
        }

        warn!(item = %item.name, "carried propulsion rejected");
        PropulsionSpeeds::unmeasured(Some(item), SpeedSource::Rejected)
    }

    /// Fit `item`, then read speed with boosts forced on and off.
    fn simulate_carried(
        &self,
        loadout: &mut Loadout,
        item: &Item,
        placement: Placement,
    ) -> Result<(Option<f64>, Option<f64>)> {
        let mut transient = match placement {
            Placement::Insert => TransientModule::insert(loadout, self.graph, item.id)?,
            Placement::Replace(index) => {
                TransientModule::replace(loadout, self.graph, index, item.id)?
            }
        };
        let index = transient.index();

        let mut links = BoostOverride::new(&mut transient, true);
        self.graph.recompute(&mut links);
        if links.module(index).map_or(true, |m| m.is_invalid()) {
            return Err(Error::IncompatibleItem {
                name: item.name.clone(),
                reason: "module is invalid once fitted".to_string(),
            });
        }
        let with_boost = self.effective_speed(&links, &[]);

        links.set_all(false);
        self.graph.recompute(&mut links);
        let no_boost = self.effective_speed(&links, &[]);

        Ok((no_boost, with_boost))
    }

    fn readings(&self, loadout: &Loadout, props: &[usize]) -> Readings {
        let speed = self.effective_speed(loadout, &[]);
        Readings {
            speed,
            speed_no_prop: if props.is_empty() {
                speed
            } else {
                self.effective_speed(loadout, props)
            },
            lock_range: self.ship_value(loadout, ATTR_MAX_TARGET_RANGE, &[]),
        }
    }

    /// Resolved `maxVelocity`, capped by the hull's `speedLimit` when it has one.
    fn effective_speed(&self, loadout: &Loadout, exclude: &[usize]) -> Option<f64> {
        let velocity = self.ship_value(loadout, ATTR_MAX_VELOCITY, exclude)?;
        match self.ship_value(loadout, ATTR_SPEED_LIMIT, &[]) {
            Some(limit) if limit > 0.0 && velocity > limit => Some(limit),
            _ => Some(velocity),
        }
    }

    fn ship_value(&self, loadout: &Loadout, key: &str, exclude: &[usize]) -> Option<f64> {
        self.graph
            .read_attribute(loadout, Entity::Ship, key, exclude)
            .unwrap_or_else(|err| {
                debug!(key, error = %err, "ship attribute unavailable");
                None
            })
    }
}
