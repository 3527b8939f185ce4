use crate::event::{SessionEvent, StatusLevel};
use crate::participant::Participant;

/// What a renderer needs to draw, folded from session notifications
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DisplayState {
    pub total: usize,
    pub remaining: usize,
    /// Drawn participants, most recent last
    pub history: Vec<Participant>,
    /// Name in the big reveal slot. `None` renders as the "?" placeholder.
    pub shown_name: Option<String>,
    pub drawing: bool,
    pub emphasized: bool,
    pub highlighting_winner: bool,
    pub status: Option<(StatusLevel, String)>,
}

impl DisplayState {
    pub const PLACEHOLDER: &'static str = "?";

    pub fn apply(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::ParticipantsChanged {
                all,
                remaining,
                history,
            } => {
                self.total = all.len();
                self.remaining = remaining.len();
                self.history = history.clone();
            }
            SessionEvent::DrawStarted { .. } => {
                self.drawing = true;
                self.highlighting_winner = false;
            }
            SessionEvent::PreviewTick { name } => {
                self.shown_name = Some(name.clone());
            }
            SessionEvent::EmphasisPulse => self.emphasized = true,
            SessionEvent::EmphasisCleared => self.emphasized = false,
            SessionEvent::WinnerRevealed { participant } => {
                self.drawing = false;
                self.highlighting_winner = true;
                self.shown_name = Some(participant.name().to_owned());
            }
            SessionEvent::WinnerHighlightCleared => self.highlighting_winner = false,
            SessionEvent::DrawCancelled => {
                self.drawing = false;
                self.emphasized = false;
            }
            SessionEvent::CurrentChanged { current } => {
                self.shown_name = current.as_ref().map(|p| p.name().to_owned());
                if current.is_none() {
                    self.highlighting_winner = false;
                }
            }
            SessionEvent::Status { level, message } => {
                self.status = Some((*level, message.clone()));
            }
            SessionEvent::OperationFailed { message, .. } => {
                self.status = Some((StatusLevel::Error, message.clone()));
            }
        }
    }

    pub fn shown_name_or_placeholder(&self) -> &str {
        self.shown_name.as_deref().unwrap_or(Self::PLACEHOLDER)
    }
}
