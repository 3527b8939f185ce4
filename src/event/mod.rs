mod bus;
mod events;
mod handlers;

pub use bus::EventBus;
pub use events::*;
pub use handlers::EventRecorder;

/// Receives every notification emitted by a draw session
pub trait EventHandler: Send {
    fn handle_event(&mut self, event: &SessionEvent);
}

impl<F> EventHandler for F
where
    F: FnMut(&SessionEvent) + Send,
{
    fn handle_event(&mut self, event: &SessionEvent) {
        self(event)
    }
}
