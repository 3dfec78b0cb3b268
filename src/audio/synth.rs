//! Procedural cue synthesis.
//!
//! Every cue is rendered to mono f32 PCM so it can be handed to any
//! playback backend without shipping sample files.

use std::f32::consts::TAU;

use crate::theme::TickCue;

/// Sample rate for synthesized cues.
pub const CUE_SAMPLE_RATE: u32 = 44_100;

/// PCM audio data with interleaved f32 samples.
#[derive(Debug, Clone)]
pub struct Pcm {
    /// Interleaved sample data in range [-1.0, 1.0].
    pub samples: Vec<f32>,
    /// Number of channels (1 = mono, 2 = stereo).
    pub channels: u16,
    /// Sample rate in Hz.
    pub sample_rate: u32,
}

impl Pcm {
    pub fn new(samples: Vec<f32>, channels: u16, sample_rate: u32) -> Self {
        Self {
            samples,
            channels,
            sample_rate,
        }
    }

    /// Returns true if the PCM data is valid (non-empty samples, valid params).
    pub fn validate(&self) -> bool {
        !self.samples.is_empty() && self.channels > 0 && self.sample_rate > 0
    }

    /// Returns the duration in microseconds.
    pub fn duration_us(&self) -> i64 {
        if self.channels == 0 || self.sample_rate == 0 {
            return 0;
        }
        let num_frames = self.samples.len() as i64 / self.channels as i64;
        num_frames * 1_000_000 / self.sample_rate as i64
    }

    pub fn peak(&self) -> f32 {
        self.samples.iter().fold(0.0f32, |acc, s| acc.max(s.abs()))
    }
}

/// Named cue in the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    Tick(TickCue),
    Reveal,
    Ambient,
}

impl Cue {
    pub const ALL: [Cue; 4] = [
        Cue::Tick(TickCue::Woodblock),
        Cue::Tick(TickCue::Jingle),
        Cue::Reveal,
        Cue::Ambient,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Cue::Tick(TickCue::Woodblock) => "tick",
            Cue::Tick(TickCue::Jingle) => "jingle",
            Cue::Reveal => "pop",
            Cue::Ambient => "ambient",
        }
    }

    pub fn render(self) -> Pcm {
        match self {
            Cue::Tick(TickCue::Woodblock) => woodblock(),
            Cue::Tick(TickCue::Jingle) => jingle(),
            Cue::Reveal => pop(),
            Cue::Ambient => ambient_loop(),
        }
    }
}

fn frames_for(seconds: f32) -> usize {
    (seconds * CUE_SAMPLE_RATE as f32).round() as usize
}

/// Exponential ramp from `from` to `to` at position `t` in [0, 1].
fn exp_ramp(from: f32, to: f32, t: f32) -> f32 {
    from * (to / from).powf(t.clamp(0.0, 1.0))
}

fn triangle(phase: f32) -> f32 {
    let p = phase.fract();
    if p < 0.5 { 4.0 * p - 1.0 } else { 3.0 - 4.0 * p }
}

/// Woodblock click: triangle wave sweeping 800 Hz down to 100 Hz in 50 ms.
pub fn woodblock() -> Pcm {
    let len = 0.05;
    let n = frames_for(len);
    let dt = 1.0 / CUE_SAMPLE_RATE as f32;
    let mut phase = 0.0f32;
    let samples = (0..n)
        .map(|i| {
            let t = i as f32 / n as f32;
            let freq = exp_ramp(800.0, 100.0, t);
            let gain = exp_ramp(0.1, 0.001, t);
            phase += freq * dt;
            triangle(phase) * gain
        })
        .collect();
    Pcm::new(samples, 1, CUE_SAMPLE_RATE)
}

/// Sleigh-bell shimmer: inharmonic partials with a fast decay.
pub fn jingle() -> Pcm {
    const PARTIALS: [(f32, f32); 4] = [(2093.0, 1.0), (2637.0, 0.7), (3520.0, 0.5), (5274.0, 0.3)];
    let len = 0.12;
    let n = frames_for(len);
    let samples = (0..n)
        .map(|i| {
            let secs = i as f32 / CUE_SAMPLE_RATE as f32;
            let gain = exp_ramp(0.06, 0.0005, i as f32 / n as f32);
            let sum: f32 = PARTIALS
                .iter()
                .map(|&(freq, amp)| (TAU * freq * secs).sin() * amp)
                .sum();
            sum / 2.5 * gain
        })
        .collect();
    Pcm::new(samples, 1, CUE_SAMPLE_RATE)
}

/// Reveal "pop": sine gliding 400 to 600 Hz over 100 ms, ringing out for 500 ms.
pub fn pop() -> Pcm {
    let len = 0.5;
    let glide = 0.1;
    let n = frames_for(len);
    let dt = 1.0 / CUE_SAMPLE_RATE as f32;
    let mut phase = 0.0f32;
    let samples = (0..n)
        .map(|i| {
            let secs = i as f32 * dt;
            let freq = 400.0 + 200.0 * (secs / glide).min(1.0);
            let gain = exp_ramp(0.1, 0.001, secs / len);
            phase += freq * dt;
            (TAU * phase).sin() * gain
        })
        .collect();
    Pcm::new(samples, 1, CUE_SAMPLE_RATE)
}

/// Two-second drone that loops seamlessly: every component completes a
/// whole number of cycles within the buffer.
pub fn ambient_loop() -> Pcm {
    let len = 2.0;
    let n = frames_for(len);
    let samples = (0..n)
        .map(|i| {
            let secs = i as f32 / CUE_SAMPLE_RATE as f32;
            let tremolo = 0.75 + 0.25 * (TAU * 0.5 * secs).sin();
            let drone = (TAU * 110.0 * secs).sin() + 0.6 * (TAU * 165.0 * secs).sin();
            drone / 1.6 * 0.04 * tremolo
        })
        .collect();
    Pcm::new(samples, 1, CUE_SAMPLE_RATE)
}
