use serde::{Deserialize, Serialize};

/// Audio output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioConfig {
    /// Master volume (0.0 - 1.0).
    pub master_volume: f64,
    /// Soundscape volume multiplier (0.0 - 1.0).
    pub ambient_volume: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            ambient_volume: 0.3,
        }
    }
}

/// Speech synthesizer configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// espeak-compatible program to run.
    pub program: String,
    /// Voice/language passed with `-v`.
    pub voice: String,
    /// Speaking rate relative to the synthesizer default.
    pub rate: f32,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            program: "espeak-ng".to_string(),
            voice: "nl".to_string(),
            rate: 0.85,
        }
    }
}
