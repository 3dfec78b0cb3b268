mod app_config;
mod audio_config;

pub use app_config::{AppConfig, CallerSettings, DrawTiming};
pub use audio_config::{AudioConfig, SpeechConfig};
