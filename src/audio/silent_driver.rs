use anyhow::Result;
use tracing::trace;

use crate::theme::{Theme, TickCue};
use crate::traits::audio::CueDriver;

use super::speech::Speaker;

/// Driver without an audio device. Tones and ambience are dropped; speech
/// still goes through the synthesizer.
pub struct SilentCueDriver {
    speaker: Speaker,
}

impl SilentCueDriver {
    pub fn with_speaker(speaker: Speaker) -> Self {
        Self { speaker }
    }
}

impl CueDriver for SilentCueDriver {
    fn play_tick(&mut self, cue: TickCue) -> Result<()> {
        trace!(?cue, "tick");
        Ok(())
    }

    fn play_reveal(&mut self) -> Result<()> {
        trace!("reveal");
        Ok(())
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.speaker.speak(text)
    }

    fn cancel_speech(&mut self) -> Result<()> {
        self.speaker.cancel();
        Ok(())
    }

    fn start_ambient(&mut self, theme: Theme) -> Result<()> {
        trace!(%theme, "ambience (silent)");
        Ok(())
    }

    fn stop_ambient(&mut self) -> Result<()> {
        Ok(())
    }
}
