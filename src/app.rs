use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;

use crate::config::DrawConfig;
use crate::display::DisplayState;
use crate::panels::{controls_panel, reveal_panel};
use crate::random::StdRandom;
use crate::session::SessionController;
use crate::time::SystemClock;

/// egui front end of a draw session. Holds no draw logic of its own: it
/// forwards button presses to the session and renders the notifications it
/// receives back.
pub struct RandomizerApp {
    session: SessionController,
    display: Arc<Mutex<DisplayState>>,
    count_input: u32,
}

impl RandomizerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: DrawConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());
        Self::with_session(SessionController::new(
            config,
            Box::new(SystemClock::new()),
            Box::new(StdRandom::from_entropy()),
        ))
    }

    /// Wraps an existing session and subscribes the display to it
    pub fn with_session(session: SessionController) -> Self {
        let display = Arc::new(Mutex::new(DisplayState::default()));
        let sink = Arc::clone(&display);
        session.subscribe(Box::new(move |event: &crate::event::SessionEvent| {
            sink.lock().apply(event);
        }));
        let count_input = session.config().min_participants;

        Self {
            session,
            display,
            count_input,
        }
    }

    pub fn session(&self) -> &SessionController {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut SessionController {
        &mut self.session
    }

    /// Copy of the display state for this frame.
    ///
    /// The lock must not be held while calling into the session, which
    /// notifies the display synchronously.
    pub fn display_snapshot(&self) -> DisplayState {
        self.display.lock().clone()
    }

    pub fn count_input_mut(&mut self) -> &mut u32 {
        &mut self.count_input
    }

    pub fn count_input(&self) -> u32 {
        self.count_input
    }

    /// Full reset on an empty pool, append otherwise
    pub fn submit_count(&mut self) {
        let count = self.count_input;
        let result = if self.session.has_participants() {
            self.session.add_more(count).map(|_| ())
        } else {
            self.session.add_participants(count)
        };
        if result.is_ok() {
            self.count_input = self.session.config().min_participants;
        }
    }
}

impl eframe::App for RandomizerApp {
    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.session.poll();

        controls_panel(self, ctx);
        reveal_panel(self, ctx);

        if let Some(deadline) = self.session.next_deadline() {
            let wait = deadline.saturating_sub(self.session.now_ms());
            ctx.request_repaint_after(Duration::from_millis(wait));
        }
    }
}
