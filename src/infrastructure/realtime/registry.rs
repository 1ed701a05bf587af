use std::rc::Rc;

use crate::domain::models::{RealtimeEvent, RealtimeEventKind};

pub type Handler = Rc<dyn Fn(&RealtimeEvent)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Entry {
    id: SubscriptionId,
    kind: RealtimeEventKind,
    handler: Handler,
}

/// Handlers per event name, in subscription order
#[derive(Default)]
pub struct SubscriberRegistry {
    next_id: u64,
    entries: Vec<Entry>,
}

impl SubscriberRegistry {
    pub fn subscribe(&mut self, kind: RealtimeEventKind, handler: Handler) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.entries.push(Entry { id, kind, handler });
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|entry| entry.id != id);
        self.entries.len() != before
    }

    /// Snapshot, so handlers can (un)subscribe while being called
    pub fn handlers_for(&self, kind: RealtimeEventKind) -> Vec<Handler> {
        self.entries
            .iter()
            .filter(|entry| entry.kind == kind)
            .map(|entry| entry.handler.clone())
            .collect()
    }

    pub fn count(&self, kind: RealtimeEventKind) -> usize {
        self.entries.iter().filter(|entry| entry.kind == kind).count()
    }
}
