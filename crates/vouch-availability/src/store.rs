//! In-memory slot store.
//!
//! Owns the base-slot list that form submissions edit. Occurrences are never
//! stored; every query re-expands the current slots and filters the result,
//! so the view is always consistent with the latest edits.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use tracing::debug;

use vouch_core::types::ExpansionPolicy;

use crate::expand::expand_at;
use crate::model::{AvailabilitySlot, Occurrence, SlotId};
use crate::window::{VisibleWindow, filter_occurrences};

/// Base slots keyed by id.
///
/// Slots are validated before they get here (at construction or at the wire
/// boundary); the store itself only holds and queries them.
#[derive(Debug, Default)]
pub struct SlotStore {
    slots: BTreeMap<SlotId, AvailabilitySlot>,
}

impl SlotStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: BTreeMap::new(),
        }
    }

    /// ## Summary
    /// Inserts a slot, replacing any existing slot with the same id.
    ///
    /// Returns the replaced slot, if any.
    pub fn upsert(&mut self, slot: AvailabilitySlot) -> Option<AvailabilitySlot> {
        let replaced = self.slots.insert(slot.id.clone(), slot);
        if let Some(previous) = &replaced {
            debug!(slot = %previous.id, "replaced existing slot");
        }
        replaced
    }

    /// Removes a slot by id, returning it if present.
    pub fn remove(&mut self, id: &SlotId) -> Option<AvailabilitySlot> {
        let removed = self.slots.remove(id);
        if removed.is_some() {
            debug!(slot = %id, "removed slot");
        }
        removed
    }

    /// Looks up a slot by id.
    #[must_use]
    pub fn get(&self, id: &SlotId) -> Option<&AvailabilitySlot> {
        self.slots.get(id)
    }

    /// Number of base slots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store holds no slots.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Iterates the base slots in id order.
    pub fn iter(&self) -> impl Iterator<Item = &AvailabilitySlot> {
        self.slots.values()
    }

    /// ## Summary
    /// Replaces the whole slot list, the wholesale update the editing UI
    /// performs on save.
    pub fn replace_all(&mut self, slots: impl IntoIterator<Item = AvailabilitySlot>) {
        self.slots = slots
            .into_iter()
            .map(|slot| (slot.id.clone(), slot))
            .collect();
        debug!(count = self.slots.len(), "replaced slot list");
    }

    /// ## Summary
    /// Expands every slot and keeps the occurrences visible in the window,
    /// sorted by start instant (ties broken by occurrence id) for a
    /// deterministic render order.
    ///
    /// Expansion is capped per slot by `policy`; the store adds no cap of
    /// its own.
    #[must_use]
    pub fn visible_occurrences(
        &self,
        window: &VisibleWindow,
        policy: ExpansionPolicy,
        now: DateTime<Utc>,
    ) -> Vec<Occurrence> {
        let expanded: Vec<Occurrence> = self
            .slots
            .values()
            .flat_map(|slot| expand_at(slot, policy, now))
            .collect();

        let mut visible = filter_occurrences(&expanded, window);
        visible.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));
        debug!(
            total = expanded.len(),
            visible = visible.len(),
            "computed visible occurrences"
        );
        visible
    }
}

impl<'a> IntoIterator for &'a SlotStore {
    type Item = &'a AvailabilitySlot;
    type IntoIter = std::collections::btree_map::Values<'a, SlotId, AvailabilitySlot>;

    fn into_iter(self) -> Self::IntoIter {
        self.slots.values()
    }
}
