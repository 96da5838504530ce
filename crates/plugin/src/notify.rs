//! In-memory record of notifications raised during a batch.

/// A notification the uploader asked the host to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub id: u64,
    pub title: String,
    pub body: String,
}

/// Notification queue with monotonic ID assignment.
///
/// Hosts without a notification UI keep one of these so they can summarize
/// failures once the batch is done.
#[derive(Debug, Clone, Default)]
pub struct NotificationQueue {
    entries: Vec<Notification>,
    next_id: u64,
}

impl NotificationQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a notification and returns its ID.
    pub fn push(&mut self, title: impl Into<String>, body: impl Into<String>) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(Notification {
            id,
            title: title.into(),
            body: body.into(),
        });
        id
    }

    pub fn get(&self, id: u64) -> Option<&Notification> {
        self.entries.iter().find(|n| n.id == id)
    }

    /// Remove a notification by ID. Returns `true` if it was present.
    pub fn remove(&mut self, id: u64) -> bool {
        let len_before = self.entries.len();
        self.entries.retain(|n| n.id != id);
        self.entries.len() != len_before
    }

    /// Oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.entries.iter()
    }

    /// Removes and returns every queued notification. IDs keep counting up.
    pub fn drain(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.entries)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
