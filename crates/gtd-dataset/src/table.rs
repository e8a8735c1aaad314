//! The prepared, read-only event table.

use gtd_domain::EventRecord;

/// Prepared events in file order. Built once and never modified.
#[derive(Debug, Clone, Default)]
pub struct EventTable {
    events: Vec<EventRecord>,
}

impl EventTable {
    #[must_use]
    pub const fn new(events: Vec<EventRecord>) -> Self {
        Self { events }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, EventRecord> {
        self.events.iter()
    }

    #[must_use]
    pub fn as_slice(&self) -> &[EventRecord] {
        &self.events
    }

    /// First `n` events in file order.
    #[must_use]
    pub fn head(&self, n: usize) -> &[EventRecord] {
        &self.events[..n.min(self.events.len())]
    }
}

impl<'a> IntoIterator for &'a EventTable {
    type Item = &'a EventRecord;
    type IntoIter = std::slice::Iter<'a, EventRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.events.iter()
    }
}
