use serde::{Deserialize, Serialize};

/// Draw animation state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnimationPhase {
    /// No ball drawn and no draw in flight.
    #[default]
    Idle,
    /// Draw in flight; history is not updated yet.
    Shuffling,
    /// Last draw finished; accepts the next draw like Idle.
    Revealed,
}

impl AnimationPhase {
    /// Whether a new draw may start.
    pub fn is_quiescent(self) -> bool {
        !matches!(self, Self::Shuffling)
    }
}
