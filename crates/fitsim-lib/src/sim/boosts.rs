//! Forcing every boost link of a loadout on or off.

use std::ops::{Deref, DerefMut};

use crate::fit::{Loadout, LoadoutId};

/// The `active` flag of every boost link, in link order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BoostSnapshot {
    links: Vec<(LoadoutId, bool)>,
}

impl BoostSnapshot {
    /// Record every link's current state, then set all of them to `active`.
    ///
    /// Does not recompute.
    pub fn capture_and_set(loadout: &mut Loadout, active: bool) -> Self {
        let links: Vec<(LoadoutId, bool)> = loadout
            .boost_links()
            .iter()
            .map(|link| (link.source, link.active))
            .collect();
        for (source, _) in &links {
            loadout.set_boost_active(*source, active);
        }
        Self { links }
    }

    /// Put every recorded link back to its recorded state. Safe to call twice.
    pub fn restore(&self, loadout: &mut Loadout) {
        for (source, active) in &self.links {
            loadout.set_boost_active(*source, *active);
        }
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

/// Scoped boost override. Link states are restored when the guard drops.
#[derive(Debug)]
pub struct BoostOverride<'a> {
    loadout: &'a mut Loadout,
    snapshot: BoostSnapshot,
}

impl<'a> BoostOverride<'a> {
    pub fn new(loadout: &'a mut Loadout, active: bool) -> Self {
        let snapshot = BoostSnapshot::capture_and_set(loadout, active);
        Self { loadout, snapshot }
    }

    /// Force every captured link to `active` while the guard is held.
    pub fn set_all(&mut self, active: bool) {
        for (source, _) in &self.snapshot.links {
            self.loadout.set_boost_active(*source, active);
        }
    }

    pub fn snapshot(&self) -> &BoostSnapshot {
        &self.snapshot
    }
}

impl Deref for BoostOverride<'_> {
    type Target = Loadout;

    fn deref(&self) -> &Loadout {
        &*self.loadout
    }
}

impl DerefMut for BoostOverride<'_> {
    fn deref_mut(&mut self) -> &mut Loadout {
        &mut *self.loadout
    }
}

impl Drop for BoostOverride<'_> {
    fn drop(&mut self) {
        self.snapshot.restore(self.loadout);
    }
}
