use serde::{Deserialize, Serialize};

use crate::error::ErrorKind;
use crate::participant::Participant;

/// Severity of a status line update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StatusLevel {
    Success,
    Warning,
    Error,
}

/// Notifications pushed by the session to renderers and other observers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    /// The pool was mutated
    ParticipantsChanged {
        all: Vec<Participant>,
        remaining: Vec<Participant>,
        history: Vec<Participant>,
    },
    /// A reveal was armed
    DrawStarted { total_ticks: u32 },
    /// A cosmetic preview frame; carries no selection weight
    PreviewTick { name: String },
    /// Transient visual cue, cleared by `EmphasisCleared`
    EmphasisPulse,
    EmphasisCleared,
    /// The committed draw of a completed reveal
    WinnerRevealed { participant: Participant },
    /// The winner highlight has expired
    WinnerHighlightCleared,
    /// A running reveal stopped without committing
    DrawCancelled,
    /// The "current participant" display changed; `None` means no selection yet
    CurrentChanged { current: Option<Participant> },
    /// Human readable outcome of a successful operation
    Status { level: StatusLevel, message: String },
    /// An operation was rejected and nothing was changed
    OperationFailed { kind: ErrorKind, message: String },
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ParticipantsChanged { .. } => "participants_changed",
            Self::DrawStarted { .. } => "draw_started",
            Self::PreviewTick { .. } => "preview_tick",
            Self::EmphasisPulse => "emphasis_pulse",
            Self::EmphasisCleared => "emphasis_cleared",
            Self::WinnerRevealed { .. } => "winner_revealed",
            Self::WinnerHighlightCleared => "winner_highlight_cleared",
            Self::DrawCancelled => "draw_cancelled",
            Self::CurrentChanged { .. } => "current_changed",
            Self::Status { .. } => "status",
            Self::OperationFailed { .. } => "operation_failed",
        }
    }
}
