//! Draw state machine and the pieces it publishes.

mod celebration;
mod orchestrator;
mod phase;
mod snapshot;
pub mod timer;

pub use celebration::CelebrationTrigger;
pub use orchestrator::{DrawOrchestrator, announcement_text};
pub use phase::AnimationPhase;
pub use snapshot::Snapshot;
pub use timer::{DrawTimer, DrawTimers, TIMER_OFF, TimerFired};
