use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use crate::event::{EventHandler, SessionEvent};

/// A simple event bus for broadcasting session events to registered handlers
pub struct EventBus {
    handlers: RefCell<Vec<Box<dyn EventHandler>>>,
    /// Events emitted by a handler while another event is being dispatched
    queued: RefCell<VecDeque<SessionEvent>>,
    dispatching: Cell<bool>,
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &format!("<{} handlers>", self.handlers.borrow().len()))
            .field("dispatching", &self.dispatching.get())
            .finish()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl EventBus {
    /// Creates a new event bus
    pub fn new() -> Self {
        Self {
            handlers: RefCell::new(Vec::new()),
            queued: RefCell::new(VecDeque::new()),
            dispatching: Cell::new(false),
        }
    }

    /// Subscribe a handler to receive events.
    ///
    /// A handler subscribed from inside another handler starts receiving
    /// with the next event.
    pub fn subscribe(&self, handler: Box<dyn EventHandler>) {
        self.handlers.borrow_mut().push(handler);
    }

    /// Emit an event to all registered handlers, in subscription order.
    ///
    /// An event emitted from inside a handler is queued and delivered once
    /// the current event has reached every handler.
    pub fn emit(&self, event: SessionEvent) {
        if self.dispatching.get() {
            self.queued.borrow_mut().push_back(event);
            return;
        }

        self.dispatching.set(true);
        let mut next = Some(event);
        while let Some(event) = next {
            // handlers are taken out so they may call back into the bus
            let mut active = std::mem::take(&mut *self.handlers.borrow_mut());
            for handler in &mut active {
                handler.handle_event(&event);
            }
            let mut handlers = self.handlers.borrow_mut();
            let subscribed_meanwhile = std::mem::replace(&mut *handlers, active);
            handlers.extend(subscribed_meanwhile);
            drop(handlers);

            next = self.queued.borrow_mut().pop_front();
        }
        self.dispatching.set(false);
    }
}
