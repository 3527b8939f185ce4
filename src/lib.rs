#![warn(clippy::all, rust_2018_idioms)]

pub mod animation;
pub mod app;
pub mod config;
pub mod display;
pub mod error;
pub mod event;
pub mod panels;
pub mod participant;
pub mod pool;
pub mod random;
pub mod selector;
pub mod session;
pub mod time;
pub mod undo;

pub use animation::{AnimationController, AnimationState, PreviewFrame, TickOutcome};
pub use app::RandomizerApp;
pub use config::DrawConfig;
pub use display::DisplayState;
pub use error::{ConfigError, DrawError, DrawResult, ErrorKind};
pub use event::{EventBus, EventHandler, EventRecorder, SessionEvent, StatusLevel};
pub use participant::{Participant, ParticipantId};
pub use pool::Pool;
pub use random::{RandomSource, SequenceRandom, StdRandom};
pub use selector::Selector;
pub use session::{SessionController, SessionState};
pub use time::{Clock, ManualClock, Millis, SystemClock, TimerHandle};
pub use undo::{Snapshot, UndoStack};
