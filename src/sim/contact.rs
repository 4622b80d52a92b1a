//! Touch contacts and the ordered contact set

use std::fmt;
use std::time::Duration;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Platform-assigned touch identifier
///
/// Unique among active touches and stable for the life of one finger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContactId(pub u64);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One touch as reported by the platform in a touch callback
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawTouch {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl RawTouch {
    pub fn new(id: u64, x: f32, y: f32) -> Self {
        Self { id, x, y }
    }

    pub fn position(&self) -> [f32; 2] {
        [self.x, self.y]
    }
}

/// An active touch on the play surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    pub id: ContactId,
    /// Screen position in logical pixels
    pub position: [f32; 2],
    /// Session clock value when this id was first observed
    pub arrival_time: Duration,
}

/// All active contacts, in arrival order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactSet {
    contacts: IndexMap<ContactId, Contact>,
}

impl ContactSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a contact, keeping the first entry if the id is already present
    ///
    /// Returns false when the id was a duplicate.
    pub fn insert(&mut self, contact: Contact) -> bool {
        if self.contacts.contains_key(&contact.id) {
            return false;
        }
        self.contacts.insert(contact.id, contact);
        true
    }

    pub fn get(&self, id: ContactId) -> Option<&Contact> {
        self.contacts.get(&id)
    }

    pub fn contains(&self, id: ContactId) -> bool {
        self.contacts.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Contact> {
        self.contacts.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = ContactId> + '_ {
        self.contacts.keys().copied()
    }

    /// Contacts as an owned vector, in arrival order
    pub fn to_vec(&self) -> Vec<Contact> {
        self.contacts.values().copied().collect()
    }
}

impl FromIterator<Contact> for ContactSet {
    fn from_iter<I: IntoIterator<Item = Contact>>(iter: I) -> Self {
        let mut set = ContactSet::new();
        for contact in iter {
            set.insert(contact);
        }
        set
    }
}
