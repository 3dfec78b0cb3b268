use serde::Serialize;

use super::phase::AnimationPhase;
use crate::model::TOTAL_NUMBERS;
use crate::theme::Theme;

/// Read-only view of the orchestrator published to the front-end.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Drawn balls, oldest first.
    pub history: Vec<u8>,
    /// Always the last history entry.
    pub current_ball: Option<u8>,
    pub phase: AnimationPhase,
    pub announcement: Option<String>,
    pub theme: Theme,
    /// Display-only shuffle value while a draw is in flight.
    pub candidate: Option<u8>,
    /// Celebration trigger count.
    pub celebration: u64,
}

impl Snapshot {
    pub fn drawn(&self) -> usize {
        self.history.len()
    }

    pub fn can_draw(&self) -> bool {
        self.phase.is_quiescent() && self.history.len() < TOTAL_NUMBERS as usize
    }

    pub fn can_undo(&self) -> bool {
        self.phase.is_quiescent() && !self.history.is_empty()
    }
}
