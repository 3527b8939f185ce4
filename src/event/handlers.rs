use std::sync::Arc;

use parking_lot::Mutex;

use crate::event::{EventHandler, SessionEvent};

/// Keeps a copy of every event it receives.
///
/// Clones share the same log, so one clone can be subscribed while another
/// is inspected.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Arc<Mutex<Vec<SessionEvent>>>,
}

impl EventRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> Vec<SessionEvent> {
        self.events.lock().clone()
    }

    /// Returns and forgets everything recorded so far
    pub fn drain(&self) -> Vec<SessionEvent> {
        std::mem::take(&mut *self.events.lock())
    }

    pub fn count(&self, name: &str) -> usize {
        self.events.lock().iter().filter(|e| e.name() == name).count()
    }

    pub fn last(&self) -> Option<SessionEvent> {
        self.events.lock().last().cloned()
    }
}

impl EventHandler for EventRecorder {
    fn handle_event(&mut self, event: &SessionEvent) {
        self.events.lock().push(event.clone());
    }
}
