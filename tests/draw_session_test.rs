use bingo_caller::audio::{CueEvent, MockCueDriver};
use bingo_caller::config::AppConfig;
use bingo_caller::game::{AnimationPhase, DrawOrchestrator};
use bingo_caller::model::{DrawHistory, TOTAL_NUMBERS};
use bingo_caller::theme::Theme;
use bingo_caller::traits::time::{ManualClock, TimeSource};
use rand::SeedableRng;
use rand::rngs::StdRng;

type TestOrchestrator = DrawOrchestrator<MockCueDriver>;

fn session(seed: u64) -> (TestOrchestrator, ManualClock) {
    let orchestrator =
        DrawOrchestrator::with_rng(MockCueDriver::new(), StdRng::seed_from_u64(seed), &AppConfig::default());
    (orchestrator, ManualClock::new())
}

/// Advances the clock in 16 ms frames, the way the front-end polls.
fn run_frames(o: &mut TestOrchestrator, clock: &ManualClock, duration_ms: i64) {
    let end = clock.now_us() + duration_ms * 1000;
    while clock.now_us() < end {
        clock.advance_us(16_000.min(end - clock.now_us()));
        o.update(clock.now_us());
    }
}

#[test]
fn test_draw_after_restored_ball() {
    let (mut o, clock) = session(3);
    o.restore(DrawHistory::from_numbers(vec![14]).unwrap());
    assert_eq!(o.announcement(), Some("Johan Cruijff"));

    o.draw();
    run_frames(&mut o, &clock, 2500);

    let snap = o.snapshot();
    assert_eq!(snap.history.len(), 2);
    assert_eq!(snap.history[0], 14);
    assert_ne!(snap.history[1], 14);
    assert_eq!(snap.current_ball, Some(snap.history[1]));
    assert_eq!(snap.phase, AnimationPhase::Revealed);
    assert_eq!(snap.celebration, 1);
    assert_eq!(o.driver().reveals(), 1);

    let ticks = o.driver().ticks();
    run_frames(&mut o, &clock, 1000);
    assert_eq!(o.driver().ticks(), ticks, "ticks must stop at reveal");
}

#[test]
fn test_undo_restores_previous_ball() {
    let (mut o, _clock) = session(4);
    o.restore(DrawHistory::from_numbers(vec![5, 12, 40]).unwrap());
    o.undo();
    assert_eq!(o.history().as_slice(), &[5, 12]);
    assert_eq!(o.current_ball(), Some(12));
    assert_eq!(o.announcement(), Some("Een dozijn"));
}

#[test]
fn test_undo_is_inverse_of_draw() {
    let (mut o, clock) = session(5);
    o.restore(DrawHistory::from_numbers(vec![22, 33]).unwrap());
    let before = o.snapshot();

    o.draw();
    run_frames(&mut o, &clock, 2600);
    o.undo();

    let after = o.snapshot();
    assert_eq!(after.history, before.history);
    assert_eq!(after.current_ball, before.current_ball);
    assert_eq!(after.announcement, before.announcement);
}

#[test]
fn test_reset_during_shuffle_never_reveals() {
    let (mut o, clock) = session(6);
    o.restore(DrawHistory::from_numbers(vec![1, 2, 3]).unwrap());
    o.draw();
    run_frames(&mut o, &clock, 1200);
    o.reset();
    run_frames(&mut o, &clock, 3000);

    let snap = o.snapshot();
    assert!(snap.history.is_empty());
    assert_eq!(snap.current_ball, None);
    assert_eq!(snap.announcement, None);
    assert_eq!(snap.candidate, None);
    assert_eq!(snap.phase, AnimationPhase::Idle);
    assert_eq!(o.pending_timers(), 0);
    assert_eq!(o.driver().reveals(), 0);
    assert!(o.driver().events.contains(&CueEvent::CancelSpeech));
}

#[test]
fn test_full_game_exhausts_pool() {
    let (mut o, clock) = session(7);
    for _ in 0..TOTAL_NUMBERS {
        o.draw();
        run_frames(&mut o, &clock, 2500);
    }
    let mut drawn = o.history().as_slice().to_vec();
    assert_eq!(drawn.len(), TOTAL_NUMBERS as usize);
    drawn.sort_unstable();
    assert_eq!(drawn, (1..=TOTAL_NUMBERS).collect::<Vec<_>>());

    let revision = o.revision();
    o.draw();
    assert_eq!(o.phase(), AnimationPhase::Revealed);
    assert_eq!(o.revision(), revision);
    assert_eq!(o.pending_timers(), 0);
}

#[test]
fn test_late_poll_still_reveals_once() {
    let (mut o, clock) = session(8);
    o.draw();
    // One stalled frame well past the reveal.
    clock.advance_ms(4000);
    o.update(clock.now_us());
    assert_eq!(o.history().len(), 1);
    assert_eq!(o.celebration_count(), 1);
    assert_eq!(o.driver().reveals(), 1);
    assert!(o.driver().ticks() <= 1);
}

#[test]
fn test_audio_failures_do_not_block_draws() {
    let mut o = DrawOrchestrator::with_rng(
        MockCueDriver::failing(),
        StdRng::seed_from_u64(9),
        &AppConfig {
            theme: Theme::Christmas,
            ..AppConfig::default()
        },
    );
    let clock = ManualClock::new();
    for _ in 0..3 {
        o.draw();
        run_frames(&mut o, &clock, 2500);
    }
    assert_eq!(o.history().len(), 3);
    assert_eq!(o.driver().spoken().len(), 3);
}

#[test]
fn test_theme_change_stops_soundscape() {
    let (mut o, _clock) = session(10);
    o.toggle_theme();
    assert_eq!(o.theme(), Theme::Christmas);
    assert_eq!(o.driver().ambient(), Some(Theme::Christmas));
    o.toggle_theme();
    assert_eq!(o.driver().ambient(), None);
}
