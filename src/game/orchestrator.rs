use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, trace, warn};

use super::celebration::CelebrationTrigger;
use super::phase::AnimationPhase;
use super::snapshot::Snapshot;
use super::timer::{DrawTimer, DrawTimers, TimerFired};
use crate::commentary::phrase_or_fallback;
use crate::config::{AppConfig, CallerSettings, DrawTiming};
use crate::model::{Band, DrawHistory, call_label, select_next, shuffle_candidate};
use crate::theme::Theme;
use crate::traits::audio::CueDriver;

/// Log and drop a driver error. Effects never roll back game state.
macro_rules! fire_and_forget {
    ($call:expr, $what:literal) => {
        if let Err(e) = $call {
            warn!("{} failed: {e:#}", $what);
        }
    };
}

/// Owns the draw state machine and everything it publishes.
///
/// The orchestrator is advanced by [`update`](Self::update) with the
/// current time from the session clock; commands take effect at the time
/// of the last update. Every draw runs under a fresh epoch, and a fired
/// timer whose epoch is no longer current is ignored.
pub struct DrawOrchestrator<D: CueDriver, R: Rng = StdRng> {
    driver: D,
    rng: R,
    timing: DrawTiming,
    settings: CallerSettings,
    theme: Theme,
    history: DrawHistory,
    phase: AnimationPhase,
    announcement: Option<String>,
    /// Display-only value cycled while shuffling. Never enters history.
    candidate: Option<u8>,
    celebration: CelebrationTrigger,
    timers: DrawTimers,
    epoch: u64,
    now_us: i64,
    /// Bumped whenever the published snapshot changes.
    revision: u64,
    ambient_running: bool,
    shut_down: bool,
}

impl<D: CueDriver> DrawOrchestrator<D, StdRng> {
    pub fn new(driver: D, config: &AppConfig) -> Self {
        Self::with_rng(driver, StdRng::from_entropy(), config)
    }
}

impl<D: CueDriver, R: Rng> DrawOrchestrator<D, R> {
    pub fn with_rng(driver: D, rng: R, config: &AppConfig) -> Self {
        let mut orchestrator = Self {
            driver,
            rng,
            timing: config.timing,
            settings: config.settings(),
            theme: config.theme,
            history: DrawHistory::new(),
            phase: AnimationPhase::Idle,
            announcement: None,
            candidate: None,
            celebration: CelebrationTrigger::new(),
            timers: DrawTimers::new(),
            epoch: 0,
            now_us: 0,
            revision: 0,
            ambient_running: false,
            shut_down: false,
        };
        orchestrator.sync_ambient();
        orchestrator
    }

    /// Replaces the session's history with restored state.
    /// Ignored while a draw is in flight.
    pub fn restore(&mut self, history: DrawHistory) {
        if !self.phase.is_quiescent() {
            warn!("Restore ignored: draw in flight");
            return;
        }
        self.history = history;
        self.phase = if self.history.is_empty() {
            AnimationPhase::Idle
        } else {
            AnimationPhase::Revealed
        };
        self.refresh_announcement();
        info!(drawn = self.history.len(), "Session restored");
        self.touch();
    }

    /// Advances the clock and runs every timer that came due.
    pub fn update(&mut self, now_us: i64) {
        self.now_us = self.now_us.max(now_us);
        while let Some(fired) = self.timers.next_due(self.now_us) {
            self.on_timer(fired);
        }
    }

    /// Starts a draw. No-op while shuffling or once every ball is out.
    pub fn draw(&mut self) {
        if self.shut_down {
            return;
        }
        if !self.phase.is_quiescent() {
            debug!("Draw ignored: already shuffling");
            return;
        }
        if self.history.is_exhausted() {
            debug!("Draw ignored: all balls drawn");
            return;
        }

        self.epoch += 1;
        self.phase = AnimationPhase::Shuffling;
        self.announcement = None;
        self.candidate = Some(shuffle_candidate(&mut self.rng));
        self.timers.start(self.epoch, self.now_us, &self.timing);
        debug!(epoch = self.epoch, "Shuffling");
        self.touch();
    }

    /// Takes back the last ball. No-op while shuffling or with no balls.
    pub fn undo(&mut self) {
        if !self.phase.is_quiescent() {
            debug!("Undo ignored: draw in flight");
            return;
        }
        let Some(removed) = self.history.pop() else {
            return;
        };
        if self.history.is_empty() {
            self.phase = AnimationPhase::Idle;
        }
        self.refresh_announcement();
        info!(removed, current = ?self.history.last(), "Undid last ball");
        self.touch();
    }

    /// Starts a new game from any state, abandoning a draw in flight.
    /// Confirmation is up to the caller.
    pub fn reset(&mut self) {
        if self.phase == AnimationPhase::Idle && self.history.is_empty() {
            return;
        }
        self.cancel_draw();
        self.history.clear();
        self.phase = AnimationPhase::Idle;
        self.announcement = None;
        fire_and_forget!(self.driver.cancel_speech(), "Cancel speech");
        info!("New game");
        self.touch();
    }

    /// Stops timers, speech and ambience. Later commands are ignored.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.cancel_draw();
        if self.phase == AnimationPhase::Shuffling {
            self.phase = if self.history.is_empty() {
                AnimationPhase::Idle
            } else {
                AnimationPhase::Revealed
            };
        }
        fire_and_forget!(self.driver.cancel_speech(), "Cancel speech");
        fire_and_forget!(self.driver.stop_ambient(), "Stop ambience");
        self.ambient_running = false;
        self.shut_down = true;
        self.touch();
    }

    pub fn set_theme(&mut self, theme: Theme) {
        if theme == self.theme {
            return;
        }
        self.theme = theme;
        info!(%theme, "Theme changed");
        self.sync_ambient();
        self.touch();
    }

    pub fn toggle_theme(&mut self) {
        self.set_theme(self.theme.toggled());
    }

    pub fn set_show_phrases(&mut self, show: bool) {
        self.settings.show_phrases = show;
        if self.phase.is_quiescent() {
            self.refresh_announcement();
        }
        self.touch();
    }

    pub fn set_sound_enabled(&mut self, enabled: bool) {
        self.settings.sound_enabled = enabled;
        self.sync_ambient();
        self.touch();
    }

    pub fn set_voice_enabled(&mut self, enabled: bool) {
        self.settings.voice_enabled = enabled;
        if !enabled {
            fire_and_forget!(self.driver.cancel_speech(), "Cancel speech");
        }
        self.touch();
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            history: self.history.as_slice().to_vec(),
            current_ball: self.current_ball(),
            phase: self.phase,
            announcement: self.announcement.clone(),
            theme: self.theme,
            candidate: self.candidate,
            celebration: self.celebration.count(),
        }
    }

    pub fn history(&self) -> &DrawHistory {
        &self.history
    }

    pub fn current_ball(&self) -> Option<u8> {
        self.history.last()
    }

    pub fn phase(&self) -> AnimationPhase {
        self.phase
    }

    pub fn announcement(&self) -> Option<&str> {
        self.announcement.as_deref()
    }

    pub fn candidate(&self) -> Option<u8> {
        self.candidate
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn settings(&self) -> CallerSettings {
        self.settings
    }

    pub fn celebration_count(&self) -> u64 {
        self.celebration.count()
    }

    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    /// Number of timers still armed for the draw in flight.
    pub fn pending_timers(&self) -> usize {
        self.timers.armed_count()
    }

    /// Whether the repeating shuffle cue is still scheduled.
    pub fn is_ticking(&self) -> bool {
        self.timers.is_armed(DrawTimer::Tick)
    }

    pub fn driver(&self) -> &D {
        &self.driver
    }

    pub fn driver_mut(&mut self) -> &mut D {
        &mut self.driver
    }

    fn on_timer(&mut self, fired: TimerFired) {
        if fired.epoch != self.epoch || self.phase != AnimationPhase::Shuffling {
            debug!(
                timer = ?fired.timer,
                epoch = fired.epoch,
                current = self.epoch,
                "Dropping stale timer"
            );
            return;
        }

        match fired.timer {
            DrawTimer::Tick => {
                if self.settings.sound_enabled {
                    fire_and_forget!(self.driver.play_tick(self.theme.tick_cue()), "Tick cue");
                }
            }
            DrawTimer::Candidate => {
                let candidate = shuffle_candidate(&mut self.rng);
                trace!(candidate, "Shuffle");
                self.candidate = Some(candidate);
                self.touch();
            }
            DrawTimer::Celebration => {
                let count = self.celebration.fire();
                debug!(count, "Celebration launched");
                self.touch();
            }
            DrawTimer::Reveal => self.reveal(),
        }
    }

    fn reveal(&mut self) {
        self.timers.cancel_all();
        self.candidate = None;

        let Some(number) = select_next(&self.history, &mut self.rng) else {
            warn!("Reveal with no balls left");
            self.phase = if self.history.is_empty() {
                AnimationPhase::Idle
            } else {
                AnimationPhase::Revealed
            };
            self.touch();
            return;
        };
        self.history.push(number);
        self.phase = AnimationPhase::Revealed;

        let phrase = phrase_or_fallback(number);
        self.announcement = self.settings.show_phrases.then(|| phrase.clone());

        if self.settings.sound_enabled {
            fire_and_forget!(self.driver.play_reveal(), "Reveal cue");
        }
        if self.settings.voice_enabled {
            let text = announcement_text(number, self.settings.show_phrases.then_some(&*phrase));
            fire_and_forget!(self.driver.speak(&text), "Speech");
        }

        info!(
            number,
            band = ?Band::of(number),
            drawn = self.history.len(),
            "Ball revealed"
        );
        self.touch();
    }

    /// Invalidates the draw in flight and disarms all of its timers.
    fn cancel_draw(&mut self) {
        if self.timers.armed_count() > 0 {
            debug!(epoch = self.epoch, "Cancelling draw timers");
        }
        self.epoch += 1;
        self.timers.cancel_all();
        self.candidate = None;
    }

    fn refresh_announcement(&mut self) {
        self.announcement = match self.history.last() {
            Some(n) if self.settings.show_phrases => Some(phrase_or_fallback(n)),
            _ => None,
        };
    }

    fn sync_ambient(&mut self) {
        let wanted = self.theme.is_seasonal() && self.settings.sound_enabled && !self.shut_down;
        if wanted {
            if !self.ambient_running {
                match self.driver.start_ambient(self.theme) {
                    Ok(()) => self.ambient_running = true,
                    Err(e) => warn!("Start ambience failed: {e:#}"),
                }
            }
        } else {
            fire_and_forget!(self.driver.stop_ambient(), "Stop ambience");
            self.ambient_running = false;
        }
    }

    fn touch(&mut self) {
        self.revision += 1;
    }
}

impl<D: CueDriver, R: Rng> Drop for DrawOrchestrator<D, R> {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Spoken form of a call: "B 7. Zeven dagen in de week" or just "B 7".
pub fn announcement_text(number: u8, phrase: Option<&str>) -> String {
    let label = call_label(number);
    match phrase {
        Some(phrase) => format!("{label}. {phrase}"),
        None => label,
    }
}
