//! Kira-based cue driver for real-time playback.
//!
//! Renders the cue palette once at startup, wraps each cue as in-memory
//! WAV and hands it to kira as StaticSoundData.

use std::collections::HashMap;
use std::io::Cursor;

use anyhow::{Result, anyhow};
use kira::sound::static_sound::{StaticSoundData, StaticSoundHandle};
use kira::{AudioManager, AudioManagerSettings, Decibels, DefaultBackend, Tween};
use tracing::{debug, info};

use crate::config::AudioConfig;
use crate::theme::{Theme, TickCue};
use crate::traits::audio::CueDriver;

use super::speech::Speaker;
use super::synth::Cue;
use super::wav::pcm_to_wav_bytes;

/// Convert a linear gain (0.0 - 1.0) to kira decibels.
fn to_decibels(gain: f64) -> Decibels {
    if gain <= 0.001 {
        Decibels::SILENCE
    } else {
        Decibels(20.0 * gain.log10() as f32)
    }
}

pub struct KiraCueDriver {
    manager: AudioManager,
    cues: HashMap<Cue, StaticSoundData>,
    /// Running soundscape, if any.
    ambient: Option<StaticSoundHandle>,
    master_volume: f64,
    ambient_volume: f64,
    speaker: Speaker,
}

impl KiraCueDriver {
    pub fn new(audio: &AudioConfig, speaker: Speaker) -> Result<Self> {
        let manager = AudioManager::<DefaultBackend>::new(AudioManagerSettings::default())
            .map_err(|e| anyhow!("Failed to create audio manager: {e}"))?;

        let mut cues = HashMap::new();
        for cue in Cue::ALL {
            let wav_bytes = pcm_to_wav_bytes(&cue.render())?;
            let data = StaticSoundData::from_cursor(Cursor::new(wav_bytes))
                .map_err(|e| anyhow!("Failed to load {} cue: {e}", cue.name()))?;
            cues.insert(cue, data);
        }
        info!(cues = cues.len(), "KiraCueDriver: synthesized cues");

        Ok(Self {
            manager,
            cues,
            ambient: None,
            master_volume: audio.master_volume,
            ambient_volume: audio.ambient_volume,
            speaker,
        })
    }

    fn cue_data(&self, cue: Cue) -> Result<StaticSoundData> {
        self.cues
            .get(&cue)
            .cloned()
            .ok_or_else(|| anyhow!("Cue not loaded: {}", cue.name()))
    }

    fn play_once(&mut self, cue: Cue) -> Result<()> {
        let data = self.cue_data(cue)?.volume(to_decibels(self.master_volume));
        self.manager
            .play(data)
            .map_err(|e| anyhow!("Failed to play {} cue: {e}", cue.name()))?;
        Ok(())
    }
}

impl CueDriver for KiraCueDriver {
    fn play_tick(&mut self, cue: TickCue) -> Result<()> {
        self.play_once(Cue::Tick(cue))
    }

    fn play_reveal(&mut self) -> Result<()> {
        self.play_once(Cue::Reveal)
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.speaker.speak(text)
    }

    fn cancel_speech(&mut self) -> Result<()> {
        self.speaker.cancel();
        Ok(())
    }

    fn start_ambient(&mut self, theme: Theme) -> Result<()> {
        if self.ambient.is_some() {
            return Ok(());
        }
        let data = self
            .cue_data(Cue::Ambient)?
            .loop_region(..)
            .volume(to_decibels(self.master_volume * self.ambient_volume));
        let handle = self
            .manager
            .play(data)
            .map_err(|e| anyhow!("Failed to start ambience: {e}"))?;
        debug!(%theme, "Ambience started");
        self.ambient = Some(handle);
        Ok(())
    }

    fn stop_ambient(&mut self) -> Result<()> {
        if let Some(mut handle) = self.ambient.take() {
            handle.stop(Tween::default());
            debug!("Ambience stopped");
        }
        Ok(())
    }
}

impl Drop for KiraCueDriver {
    fn drop(&mut self) {
        if let Some(mut handle) = self.ambient.take() {
            handle.stop(Tween::default());
        }
    }
}
