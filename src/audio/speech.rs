//! Spoken announcements through an external speech synthesizer.
//!
//! Only one utterance is ever audible: starting a new one kills the
//! process speaking the previous one.

use std::process::{Child, Command, Stdio};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::config::SpeechConfig;

/// Default words per minute of espeak-compatible synthesizers.
const BASE_WORDS_PER_MINUTE: f32 = 175.0;

pub struct Speaker {
    config: SpeechConfig,
    current: Option<Child>,
}

impl Speaker {
    pub fn new(config: SpeechConfig) -> Self {
        Self {
            config,
            current: None,
        }
    }

    /// Arguments passed to the synthesizer for `text`.
    pub fn command_args(&self, text: &str) -> Vec<String> {
        let wpm = (BASE_WORDS_PER_MINUTE * self.config.rate).round().max(80.0) as u32;
        vec![
            "-v".to_string(),
            self.config.voice.clone(),
            "-s".to_string(),
            wpm.to_string(),
            text.to_string(),
        ]
    }

    /// Speak `text`, interrupting the previous utterance.
    pub fn speak(&mut self, text: &str) -> Result<()> {
        self.cancel();
        let child = Command::new(&self.config.program)
            .args(self.command_args(text))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .with_context(|| format!("Failed to start speech program {}", self.config.program))?;
        debug!(pid = child.id(), text, "Speaking");
        self.current = Some(child);
        Ok(())
    }

    /// Stop the current utterance, if any.
    pub fn cancel(&mut self) {
        if let Some(mut child) = self.current.take() {
            if let Ok(None) = child.try_wait() {
                if let Err(e) = child.kill() {
                    warn!("Failed to stop speech: {e}");
                }
            }
            // Reap so no zombie is left behind.
            let _ = child.wait();
        }
    }

    pub fn is_speaking(&mut self) -> bool {
        match self.current.as_mut() {
            Some(child) => matches!(child.try_wait(), Ok(None)),
            None => false,
        }
    }
}

impl Drop for Speaker {
    fn drop(&mut self) {
        self.cancel();
    }
}
