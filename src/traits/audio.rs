use anyhow::Result;

use crate::theme::{Theme, TickCue};

/// Effect sink for the draw animation.
///
/// Every call is fire-and-forget from the orchestrator's point of view:
/// an `Err` is logged at the call site and never rolls back game state.
/// Implementations: KiraCueDriver (playback feature), SilentCueDriver,
/// MockCueDriver (testing).
pub trait CueDriver {
    /// Play one pulse of the repeating shuffle cue.
    fn play_tick(&mut self, cue: TickCue) -> Result<()>;

    /// Play the one-shot reveal cue.
    fn play_reveal(&mut self) -> Result<()>;

    /// Speak a line of text, interrupting any utterance in progress.
    fn speak(&mut self, text: &str) -> Result<()>;

    /// Stop any utterance in progress.
    fn cancel_speech(&mut self) -> Result<()>;

    /// Start the ambient soundscape for `theme`. No-op if already running.
    fn start_ambient(&mut self, theme: Theme) -> Result<()>;

    /// Stop the ambient soundscape. No-op if not running.
    fn stop_ambient(&mut self) -> Result<()>;
}

impl<T: CueDriver + ?Sized> CueDriver for Box<T> {
    fn play_tick(&mut self, cue: TickCue) -> Result<()> {
        (**self).play_tick(cue)
    }

    fn play_reveal(&mut self) -> Result<()> {
        (**self).play_reveal()
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        (**self).speak(text)
    }

    fn cancel_speech(&mut self) -> Result<()> {
        (**self).cancel_speech()
    }

    fn start_ambient(&mut self, theme: Theme) -> Result<()> {
        (**self).start_ambient(theme)
    }

    fn stop_ambient(&mut self) -> Result<()> {
        (**self).stop_ambient()
    }
}
