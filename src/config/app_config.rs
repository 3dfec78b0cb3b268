use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::audio_config::{AudioConfig, SpeechConfig};
use crate::theme::Theme;
use crate::util::file::write_atomic;

const CONFIG_FILE: &str = "config.json";
const STATE_FILE: &str = "state.json";

/// Timing of one draw, in milliseconds from the moment `draw()` is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DrawTiming {
    /// Period of the repeating tick cue.
    pub tick_interval_ms: u32,
    /// Period of the shuffle candidate cycling.
    pub candidate_interval_ms: u32,
    /// When the celebration trigger fires.
    pub celebration_offset_ms: u32,
    /// When the ball is revealed and the draw ends.
    pub reveal_offset_ms: u32,
}

impl Default for DrawTiming {
    fn default() -> Self {
        Self {
            tick_interval_ms: 120,
            candidate_interval_ms: 50,
            celebration_offset_ms: 1500,
            reveal_offset_ms: 2500,
        }
    }
}

impl DrawTiming {
    /// The celebration effect needs to finish before the reveal, so its
    /// offset must come strictly earlier.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.tick_interval_ms > 0, "tick_interval_ms must be positive");
        ensure!(
            self.candidate_interval_ms > 0,
            "candidate_interval_ms must be positive"
        );
        ensure!(
            self.celebration_offset_ms < self.reveal_offset_ms,
            "celebration_offset_ms ({}) must be before reveal_offset_ms ({})",
            self.celebration_offset_ms,
            self.reveal_offset_ms
        );
        Ok(())
    }
}

/// Runtime toggles that shape what a reveal announces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerSettings {
    pub show_phrases: bool,
    pub sound_enabled: bool,
    pub voice_enabled: bool,
}

impl Default for CallerSettings {
    fn default() -> Self {
        Self {
            show_phrases: true,
            sound_enabled: true,
            voice_enabled: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub show_phrases: bool,
    pub sound_enabled: bool,
    pub voice_enabled: bool,
    pub theme: Theme,
    pub timing: DrawTiming,
    pub audio: AudioConfig,
    pub speech: SpeechConfig,
    /// Overrides where the game state is persisted.
    pub state_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        let settings = CallerSettings::default();
        Self {
            show_phrases: settings.show_phrases,
            sound_enabled: settings.sound_enabled,
            voice_enabled: settings.voice_enabled,
            theme: Theme::Default,
            timing: DrawTiming::default(),
            audio: AudioConfig::default(),
            speech: SpeechConfig::default(),
            state_file: None,
        }
    }
}

impl AppConfig {
    /// Loads config from a specified path.
    /// Returns default config if file doesn't exist.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config: Self = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        config.timing.validate()?;
        Ok(config)
    }

    /// Loads config for a session start. An unreadable, malformed or
    /// invalid file is reported and replaced by defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(config) => {
                info!(path = %path.display(), "Config loaded");
                config
            }
            Err(e) => {
                warn!("Using default config: {e:#}");
                Self::default()
            }
        }
    }

    /// Saves config to a specified path, replacing the old file in one step.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        write_atomic(path.as_ref(), content.as_bytes())
    }

    pub fn settings(&self) -> CallerSettings {
        CallerSettings {
            show_phrases: self.show_phrases,
            sound_enabled: self.sound_enabled,
            voice_enabled: self.voice_enabled,
        }
    }

    pub fn apply_settings(&mut self, settings: CallerSettings) {
        self.show_phrases = settings.show_phrases;
        self.sound_enabled = settings.sound_enabled;
        self.voice_enabled = settings.voice_enabled;
    }

    /// Default config file location.
    pub fn default_path() -> PathBuf {
        match project_dirs() {
            Some(dirs) => dirs.config_dir().join(CONFIG_FILE),
            None => PathBuf::from(".bingo-caller-config.json"),
        }
    }

    /// Where the game state is persisted.
    pub fn state_path(&self) -> PathBuf {
        if let Some(path) = &self.state_file {
            return path.clone();
        }
        match project_dirs() {
            Some(dirs) => dirs.data_dir().join(STATE_FILE),
            None => PathBuf::from(".bingo-caller-state.json"),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("nl", "bingo-caller", "bingo-caller")
}
