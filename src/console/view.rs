use std::fmt::Write as _;

use crate::config::CallerSettings;
use crate::game::{AnimationPhase, Snapshot};
use crate::model::{Band, TOTAL_NUMBERS, call_label};
use crate::theme::Theme;

const UNDRAWN: &str = " .";

/// Five rows, one per band, with drawn balls filled in.
pub fn render_board(snapshot: &Snapshot) -> String {
    let mut out = String::new();
    for band in Band::ALL {
        out.push(band.letter());
        out.push_str(" |");
        for n in band.numbers() {
            if snapshot.history.contains(&n) {
                let _ = write!(out, " {n:>2}");
            } else {
                let _ = write!(out, " {UNDRAWN}");
            }
        }
        out.push('\n');
    }
    out
}

/// One line for the ball on display, e.g. "B 14  Johan Cruijff  (3 / 75)".
pub fn render_reveal(snapshot: &Snapshot) -> Option<String> {
    let ball = snapshot.current_ball?;
    let mut line = call_label(ball);
    if let Some(phrase) = &snapshot.announcement {
        let _ = write!(line, "  {phrase}");
    }
    let _ = write!(line, "  ({} / {TOTAL_NUMBERS})", snapshot.drawn());
    Some(line)
}

/// In-place shuffle line while a draw is in flight.
pub fn render_shuffle(snapshot: &Snapshot) -> Option<String> {
    if snapshot.phase != AnimationPhase::Shuffling {
        return None;
    }
    let candidate = snapshot.candidate?;
    Some(format!("\r  >> {candidate:>2} <<   "))
}

/// A burst of stars in the theme's palette using 24-bit ANSI color.
pub fn render_celebration(theme: Theme) -> String {
    let mut out = String::from("  ");
    for (i, color) in theme.celebration_palette().iter().cycle().take(12).enumerate() {
        let glyph = if i % 2 == 0 { '*' } else { '+' };
        let _ = write!(out, "\x1b[38;2;{};{};{}m{glyph}\x1b[0m", color.0, color.1, color.2);
    }
    out
}

/// Header with theme and toggle state.
pub fn render_status(snapshot: &Snapshot, settings: CallerSettings) -> String {
    let flag = |on: bool| if on { "aan" } else { "uit" };
    let last: Vec<String> = snapshot
        .history
        .iter()
        .rev()
        .skip(1)
        .take(5)
        .map(|n| n.to_string())
        .collect();
    let mut out = format!(
        "== {} ==  zinnen: {}  geluid: {}  stem: {}",
        snapshot.theme.title(),
        flag(settings.show_phrases),
        flag(settings.sound_enabled),
        flag(settings.voice_enabled),
    );
    if !last.is_empty() {
        let _ = write!(out, "\n   vorige: {}", last.join(", "));
    }
    out
}
