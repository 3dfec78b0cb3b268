//! Audio subsystem.
//!
//! This module provides:
//! - [`synth`]: procedural cue palette (tick, jingle, pop, ambient loop)
//! - [`pcm_to_wav_bytes`]: in-memory WAV encoding with hound
//! - [`Speaker`]: exclusive, cancelable speech through a synthesizer process
//! - [`KiraCueDriver`]: device playback with kira (`playback` feature)
//! - [`SilentCueDriver`]: speech-only driver when no audio device is used
//! - [`MockCueDriver`]: recording driver for tests

#[cfg(feature = "playback")]
mod kira_driver;
mod mock_driver;
mod silent_driver;
mod speech;
pub mod synth;
mod wav;

#[cfg(feature = "playback")]
pub use kira_driver::KiraCueDriver;
pub use mock_driver::{CueEvent, MockCueDriver};
pub use silent_driver::SilentCueDriver;
pub use speech::Speaker;
pub use synth::{Cue, Pcm};
pub use wav::pcm_to_wav_bytes;

use crate::config::AppConfig;
use crate::traits::audio::CueDriver;

/// Opens the session's cue driver.
///
/// The driver always carries a speaker, whatever the current toggles say:
/// muting is a matter of settings, so sound and voice can be switched back
/// on mid-session. Without a usable audio device, tones are dropped.
pub fn open_driver(config: &AppConfig) -> Box<dyn CueDriver> {
    let speaker = Speaker::new(config.speech.clone());

    #[cfg(feature = "playback")]
    {
        match KiraCueDriver::new(&config.audio, speaker) {
            Ok(driver) => Box::new(driver),
            Err(e) => {
                tracing::warn!("Audio unavailable, continuing without sound: {e:#}");
                Box::new(SilentCueDriver::with_speaker(Speaker::new(
                    config.speech.clone(),
                )))
            }
        }
    }
    #[cfg(not(feature = "playback"))]
    {
        Box::new(SilentCueDriver::with_speaker(speaker))
    }
}
