// Per-draw timer set.
//
// Timer values are absolute microsecond deadlines on the orchestrator's
// clock. Each armed slot remembers the draw epoch it was armed under so
// the owner can drop anything that outlived its draw.

use crate::config::DrawTiming;

/// Sentinel deadline for a disarmed slot.
pub const TIMER_OFF: i64 = i64::MIN;

/// Timers belonging to one draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrawTimer {
    /// Repeating shuffle cue.
    Tick,
    /// Repeating display-candidate refresh.
    Candidate,
    /// One-shot celebration trigger.
    Celebration,
    /// One-shot terminal reveal.
    Reveal,
}

impl DrawTimer {
    pub const ALL: [DrawTimer; TIMER_COUNT] = [
        DrawTimer::Tick,
        DrawTimer::Candidate,
        DrawTimer::Celebration,
        DrawTimer::Reveal,
    ];

    fn slot(self) -> usize {
        self as usize
    }
}

const TIMER_COUNT: usize = 4;

#[derive(Debug, Clone, Copy)]
struct Slot {
    due_us: i64,
    /// Re-arm period for repeating timers.
    period_us: Option<i64>,
    epoch: u64,
}

impl Slot {
    const OFF: Slot = Slot {
        due_us: TIMER_OFF,
        period_us: None,
        epoch: 0,
    };

    fn is_on(&self) -> bool {
        self.due_us != TIMER_OFF
    }
}

/// A timer that came due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub timer: DrawTimer,
    pub epoch: u64,
    /// Deadline the timer was scheduled for.
    pub due_us: i64,
}

/// Deadlines for the timers of the draw in flight.
///
/// Everything is armed together by [`DrawTimers::start`] and can be
/// disarmed together by [`DrawTimers::cancel_all`].
#[derive(Debug, Clone)]
pub struct DrawTimers {
    slots: [Slot; TIMER_COUNT],
}

impl DrawTimers {
    pub fn new() -> Self {
        Self {
            slots: [Slot::OFF; TIMER_COUNT],
        }
    }

    /// Arms every timer of a draw starting at `now_us`.
    pub fn start(&mut self, epoch: u64, now_us: i64, timing: &DrawTiming) {
        let ms = |v: u32| v as i64 * 1000;
        let tick = ms(timing.tick_interval_ms);
        let candidate = ms(timing.candidate_interval_ms);
        self.arm(DrawTimer::Tick, epoch, now_us + tick, Some(tick));
        self.arm(DrawTimer::Candidate, epoch, now_us + candidate, Some(candidate));
        self.arm(
            DrawTimer::Celebration,
            epoch,
            now_us + ms(timing.celebration_offset_ms),
            None,
        );
        self.arm(
            DrawTimer::Reveal,
            epoch,
            now_us + ms(timing.reveal_offset_ms),
            None,
        );
    }

    /// Arms a single timer. A non-positive period is treated as one-shot.
    pub fn arm(&mut self, timer: DrawTimer, epoch: u64, due_us: i64, period_us: Option<i64>) {
        self.slots[timer.slot()] = Slot {
            due_us,
            period_us: period_us.filter(|&p| p > 0),
            epoch,
        };
    }

    pub fn cancel_all(&mut self) {
        self.slots = [Slot::OFF; TIMER_COUNT];
    }

    pub fn is_armed(&self, timer: DrawTimer) -> bool {
        self.slots[timer.slot()].is_on()
    }

    pub fn armed_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_on()).count()
    }

    /// Deadline of an armed timer.
    pub fn due_us(&self, timer: DrawTimer) -> Option<i64> {
        let slot = &self.slots[timer.slot()];
        slot.is_on().then_some(slot.due_us)
    }

    /// Takes the earliest timer due at or before `now_us`.
    ///
    /// Ties resolve in [`DrawTimer`] declaration order. A repeating timer is
    /// re-armed on its next period boundary after `now_us`; periods missed
    /// by a late poll are coalesced into this one firing.
    pub fn next_due(&mut self, now_us: i64) -> Option<TimerFired> {
        let index = (0..TIMER_COUNT)
            .filter(|&i| self.slots[i].is_on() && self.slots[i].due_us <= now_us)
            .min_by_key(|&i| self.slots[i].due_us)?;

        let slot = self.slots[index];
        let fired = TimerFired {
            timer: DrawTimer::ALL[index],
            epoch: slot.epoch,
            due_us: slot.due_us,
        };

        match slot.period_us {
            Some(period) => {
                let missed = (now_us - slot.due_us) / period;
                self.slots[index].due_us = slot.due_us + (missed + 1) * period;
            }
            None => self.slots[index] = Slot::OFF,
        }

        Some(fired)
    }
}

impl Default for DrawTimers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(timers: &mut DrawTimers, now_us: i64) -> Vec<DrawTimer> {
        std::iter::from_fn(|| timers.next_due(now_us))
            .map(|f| f.timer)
            .collect()
    }

    #[test]
    fn new_timers_are_off() {
        let timers = DrawTimers::new();
        assert_eq!(timers.armed_count(), 0);
        for timer in DrawTimer::ALL {
            assert!(!timers.is_armed(timer));
        }
    }

    #[test]
    fn start_arms_everything() {
        let mut timers = DrawTimers::new();
        timers.start(1, 10_000, &DrawTiming::default());
        assert_eq!(timers.armed_count(), 4);
        assert_eq!(timers.due_us(DrawTimer::Tick), Some(130_000));
        assert_eq!(timers.due_us(DrawTimer::Candidate), Some(60_000));
        assert_eq!(timers.due_us(DrawTimer::Celebration), Some(1_510_000));
        assert_eq!(timers.due_us(DrawTimer::Reveal), Some(2_510_000));
    }

    #[test]
    fn nothing_due_before_deadline() {
        let mut timers = DrawTimers::new();
        timers.start(1, 0, &DrawTiming::default());
        assert_eq!(timers.next_due(49_999), None);
    }

    #[test]
    fn fires_in_deadline_order() {
        let mut timers = DrawTimers::new();
        timers.start(1, 0, &DrawTiming::default());
        assert_eq!(drain(&mut timers, 50_000), vec![DrawTimer::Candidate]);
        assert_eq!(drain(&mut timers, 100_000), vec![DrawTimer::Candidate]);
        assert_eq!(drain(&mut timers, 150_000), vec![DrawTimer::Tick, DrawTimer::Candidate]);
    }

    #[test]
    fn one_shots_disarm_after_firing() {
        let mut timers = DrawTimers::new();
        timers.start(1, 0, &DrawTiming::default());
        let fired = drain(&mut timers, 1_500_000);
        assert!(fired.contains(&DrawTimer::Celebration));
        assert!(!timers.is_armed(DrawTimer::Celebration));
        assert!(timers.is_armed(DrawTimer::Tick));
        assert!(timers.is_armed(DrawTimer::Reveal));
    }

    #[test]
    fn late_poll_coalesces_repeats() {
        let mut timers = DrawTimers::new();
        timers.arm(DrawTimer::Tick, 3, 120_000, Some(120_000));
        let fired = timers.next_due(500_000).unwrap();
        assert_eq!(fired.timer, DrawTimer::Tick);
        assert_eq!(fired.epoch, 3);
        assert_eq!(fired.due_us, 120_000);
        assert_eq!(timers.due_us(DrawTimer::Tick), Some(600_000));
        assert_eq!(timers.next_due(500_000), None);
    }

    #[test]
    fn ties_resolve_in_declaration_order() {
        let mut timers = DrawTimers::new();
        timers.arm(DrawTimer::Reveal, 1, 100, None);
        timers.arm(DrawTimer::Tick, 1, 100, None);
        assert_eq!(drain(&mut timers, 100), vec![DrawTimer::Tick, DrawTimer::Reveal]);
    }

    #[test]
    fn cancel_all_disarms() {
        let mut timers = DrawTimers::new();
        timers.start(1, 0, &DrawTiming::default());
        timers.cancel_all();
        assert_eq!(timers.armed_count(), 0);
        assert_eq!(timers.next_due(10_000_000), None);
    }

    #[test]
    fn zero_period_is_one_shot() {
        let mut timers = DrawTimers::new();
        timers.arm(DrawTimer::Tick, 1, 10, Some(0));
        assert!(timers.next_due(10).is_some());
        assert!(!timers.is_armed(DrawTimer::Tick));
    }
}
