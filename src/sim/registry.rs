//! Touch registry
//!
//! Keeps the authoritative set of active contacts. Every platform callback
//! reports the full list of touches; the registry filters out chrome
//! touches, diffs the result against its previous snapshot and replaces
//! the snapshot wholesale.

use std::time::Duration;

use tracing::trace;

use super::contact::{Contact, ContactId, ContactSet, RawTouch};
use super::geometry::{ChromeBounds, Viewport, is_interactive};

/// Outcome of reconciling one raw touch report
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryUpdate {
    /// The registry contents after this report
    pub current: ContactSet,
    /// Contacts whose ids were not present before, in report order
    pub added: Vec<Contact>,
    /// Ids that were present before and are gone now
    pub removed: Vec<ContactId>,
}

impl RegistryUpdate {
    /// Returns true if the report changed membership
    pub fn changed_membership(&self) -> bool {
        !self.added.is_empty() || !self.removed.is_empty()
    }
}

/// Live contact registry for one chooser screen
#[derive(Debug, Clone)]
pub struct TouchRegistry {
    contacts: ContactSet,
    viewport: Viewport,
    chrome: ChromeBounds,
}

impl TouchRegistry {
    pub fn new(viewport: Viewport, chrome: ChromeBounds) -> Self {
        Self {
            contacts: ContactSet::new(),
            viewport,
            chrome,
        }
    }

    /// Updates the screen size used for chrome classification
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.viewport = viewport;
    }

    pub fn set_chrome(&mut self, chrome: ChromeBounds) {
        self.chrome = chrome;
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn chrome(&self) -> &ChromeBounds {
        &self.chrome
    }

    /// Reconciles the registry with a full raw touch report
    ///
    /// Continuing contacts keep their arrival time and position in the
    /// order; their position is taken from the report. New contacts are
    /// stamped with `now` and appended in report order.
    pub fn update(&mut self, raw: &[RawTouch], now: Duration) -> RegistryUpdate {
        let mut reported = ContactSet::new();
        for touch in raw {
            if is_interactive(touch.position(), self.viewport, &self.chrome) {
                trace!(id = touch.id, x = touch.x, y = touch.y, "Touch on chrome ignored");
                continue;
            }

            let id = ContactId(touch.id);
            let arrival_time = self
                .contacts
                .get(id)
                .map_or(now, |previous| previous.arrival_time);

            if !reported.insert(Contact {
                id,
                position: touch.position(),
                arrival_time,
            }) {
                trace!(%id, "Duplicate touch id in report ignored");
            }
        }

        let removed: Vec<ContactId> = self
            .contacts
            .ids()
            .filter(|id| !reported.contains(*id))
            .collect();

        // Continuing contacts first, in their previous order
        let mut next: ContactSet = self
            .contacts
            .ids()
            .filter_map(|id| reported.get(id).copied())
            .collect();

        let mut added = Vec::new();
        for contact in reported.iter() {
            if next.insert(*contact) {
                added.push(*contact);
            }
        }

        self.contacts = next;

        RegistryUpdate {
            current: self.contacts.clone(),
            added,
            removed,
        }
    }

    /// Drops every contact without producing a diff
    pub fn clear(&mut self) {
        self.contacts = ContactSet::new();
    }

    pub fn contacts(&self) -> &ContactSet {
        &self.contacts
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }
}
