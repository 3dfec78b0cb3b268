use anyhow::{Result, bail};

use crate::theme::{Theme, TickCue};
use crate::traits::audio::CueDriver;

/// Call recorded by [`MockCueDriver`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CueEvent {
    Tick(TickCue),
    Reveal,
    Speak(String),
    CancelSpeech,
    StartAmbient(Theme),
    StopAmbient,
}

/// Recording driver for deterministic tests.
///
/// With `fail` set, every call is still recorded but returns an error.
#[derive(Debug, Default)]
pub struct MockCueDriver {
    pub events: Vec<CueEvent>,
    pub fail: bool,
    ambient: Option<Theme>,
    ambient_starts: usize,
}

impl MockCueDriver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn ticks(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CueEvent::Tick(_)))
            .count()
    }

    pub fn reveals(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, CueEvent::Reveal))
            .count()
    }

    pub fn spoken(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                CueEvent::Speak(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn ambient(&self) -> Option<Theme> {
        self.ambient
    }

    /// Number of times the soundscape actually started.
    pub fn ambient_starts(&self) -> usize {
        self.ambient_starts
    }

    fn record(&mut self, event: CueEvent) -> Result<()> {
        self.events.push(event);
        if self.fail {
            bail!("mock audio failure");
        }
        Ok(())
    }
}

impl CueDriver for MockCueDriver {
    fn play_tick(&mut self, cue: TickCue) -> Result<()> {
        self.record(CueEvent::Tick(cue))
    }

    fn play_reveal(&mut self) -> Result<()> {
        self.record(CueEvent::Reveal)
    }

    fn speak(&mut self, text: &str) -> Result<()> {
        self.record(CueEvent::Speak(text.to_string()))
    }

    fn cancel_speech(&mut self) -> Result<()> {
        self.record(CueEvent::CancelSpeech)
    }

    fn start_ambient(&mut self, theme: Theme) -> Result<()> {
        self.record(CueEvent::StartAmbient(theme))?;
        if self.ambient.is_none() {
            self.ambient = Some(theme);
            self.ambient_starts += 1;
        }
        Ok(())
    }

    fn stop_ambient(&mut self) -> Result<()> {
        self.record(CueEvent::StopAmbient)?;
        self.ambient = None;
        Ok(())
    }
}
