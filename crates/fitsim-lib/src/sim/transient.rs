//! Reversible, scoped loadout mutations.
//!
//! Each guard mutably borrows the loadout, exposes it through `Deref`, and undoes
//! its change when dropped. Guards nest by borrowing through the guard beneath
//! them, so they always drop in reverse order of creation, including while a
//! panic unwinds.
//!
//! None of the guards recompute. Callers recompute after applying and once more
//! after the last guard has dropped.

use std::ops::{Deref, DerefMut};

use tracing::warn;

use crate::catalog::ItemId;
use crate::error::{Error, Result};
use crate::fit::{Loadout, Module};
use crate::graph::AttributeGraph;

/// Temporarily loads one charge into several modules.
#[derive(Debug)]
pub struct ChargeSwap<'a> {
    loadout: &'a mut Loadout,
    previous: Vec<(usize, Option<ItemId>)>,
}

impl<'a> ChargeSwap<'a> {
    /// Load `charge` into the modules at `slots`.
    ///
    /// Every slot is checked before anything changes, so a failure leaves the
    /// loadout untouched.
    pub fn apply(
        loadout: &'a mut Loadout,
        slots: &[usize],
        charge: Option<ItemId>,
    ) -> Result<Self> {
        if let Some(&index) = slots.iter().find(|&&i| loadout.module(i).is_none()) {
            return Err(Error::SlotEmpty { index });
        }

        let mut previous = Vec::with_capacity(slots.len());
        for &index in slots {
            previous.push((index, loadout.set_charge(index, charge)?));
        }
        Ok(Self { loadout, previous })
    }
}

impl Deref for ChargeSwap<'_> {
    type Target = Loadout;

    fn deref(&self) -> &Loadout {
        &*self.loadout
    }
}

impl DerefMut for ChargeSwap<'_> {
    fn deref_mut(&mut self) -> &mut Loadout {
        &mut *self.loadout
    }
}

impl Drop for ChargeSwap<'_> {
    fn drop(&mut self) {
        for (index, charge) in self.previous.drain(..).rev() {
            if let Err(err) = self.loadout.set_charge(index, charge) {
                warn!(index, error = %err, "could not restore charge");
            }
        }
    }
}

enum Undo {
    Remove,
    Restore(Module),
}

/// A module temporarily inserted into, or swapped into, a loadout.
///
/// The guard remembers the rack index it touched. Charges, states and boost
/// links may be changed through it, but the rack itself must not be
/// restructured (`fit_module`, `remove_module`, `replace_module`) while it is
/// held: if the transient module is no longer at its index on drop, the guard
/// leaves the rack alone and logs a warning instead of undoing the wrong slot.
pub struct TransientModule<'a> {
    loadout: &'a mut Loadout,
    index: usize,
    item: ItemId,
    undo: Option<Undo>,
}

impl<'a> TransientModule<'a> {
    /// Fit `item` into a free slot of its category.
    ///
    /// Validity against the rest of the loadout is only known after the caller
    /// recomputes.
    pub fn insert<G: AttributeGraph + ?Sized>(
        loadout: &'a mut Loadout,
        graph: &G,
        item: ItemId,
    ) -> Result<Self> {
        let module = graph.build_module(loadout, item)?;
        let index = loadout.fit_module(module)?;
        Ok(Self {
            loadout,
            index,
            item,
            undo: Some(Undo::Remove),
        })
    }

    /// Put `item` into the occupied slot at `slot`, keeping the original aside.
    pub fn replace<G: AttributeGraph + ?Sized>(
        loadout: &'a mut Loadout,
        graph: &G,
        slot: usize,
        item: ItemId,
    ) -> Result<Self> {
        if loadout.module(slot).is_none() {
            return Err(Error::SlotEmpty { index: slot });
        }
        let module = graph.build_module(loadout, item)?;
        let original = loadout
            .replace_module(slot, module)
            .map_err(|err| match err {
                Error::LoadoutValidation { message } => Error::IncompatibleItem {
                    name: graph.item_name(item),
                    reason: message,
                },
                other => other,
            })?;
        Ok(Self {
            loadout,
            index: slot,
            item,
            undo: Some(Undo::Restore(original)),
        })
    }

    /// Rack index of the transient module.
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn module(&self) -> Option<&Module> {
        self.loadout.module(self.index)
    }
}

impl Deref for TransientModule<'_> {
    type Target = Loadout;

    fn deref(&self) -> &Loadout {
        &*self.loadout
    }
}

impl DerefMut for TransientModule<'_> {
    fn deref_mut(&mut self) -> &mut Loadout {
        &mut *self.loadout
    }
}

impl Drop for TransientModule<'_> {
    fn drop(&mut self) {
        let current = self.loadout.module(self.index).map(Module::item);
        if current != Some(self.item) {
            warn!(
                index = self.index,
                item = %self.item,
                "transient module moved; rack was restructured while the guard was held"
            );
            return;
        }
        match self.undo.take() {
            Some(Undo::Remove) => {
                if let Err(err) = self.loadout.remove_module(self.index) {
                    warn!(index = self.index, error = %err, "could not remove transient module");
                }
            }
            Some(Undo::Restore(original)) => self.loadout.restore_module(self.index, original),
            None => {}
        }
    }
}
