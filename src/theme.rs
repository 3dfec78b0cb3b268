//! Visual/audio theme selection.
//!
//! The theme only picks cue families and colors. Draw mechanics and
//! timing are identical for every theme.

use serde::{Deserialize, Serialize};

/// Session theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Default,
    Christmas,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Self::Default => Self::Christmas,
            Self::Christmas => Self::Default,
        }
    }

    pub fn is_seasonal(self) -> bool {
        matches!(self, Self::Christmas)
    }

    /// Repeating cue played while shuffling.
    pub fn tick_cue(self) -> TickCue {
        match self {
            Self::Default => TickCue::Woodblock,
            Self::Christmas => TickCue::Jingle,
        }
    }

    /// Colors handed to the celebration effect.
    pub fn celebration_palette(self) -> &'static [Rgb] {
        match self {
            Self::Default => &DEFAULT_PALETTE,
            Self::Christmas => &CHRISTMAS_PALETTE,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Default => "Bingo Master",
            Self::Christmas => "Kerst Bingo",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Default => f.write_str("default"),
            Self::Christmas => f.write_str("christmas"),
        }
    }
}

impl std::str::FromStr for Theme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "default" => Ok(Self::Default),
            "christmas" | "kerst" => Ok(Self::Christmas),
            other => anyhow::bail!("Unknown theme: {other}"),
        }
    }
}

/// Tick cue family for the shuffle phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickCue {
    /// Short woodblock click.
    Woodblock,
    /// Sleigh-bell jingle.
    Jingle,
}

/// 8-bit sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

// Blue, purple, pink, yellow
const DEFAULT_PALETTE: [Rgb; 6] = [
    Rgb(0x3b, 0x82, 0xf6),
    Rgb(0xa8, 0x55, 0xf7),
    Rgb(0xec, 0x48, 0x99),
    Rgb(0xfa, 0xcc, 0x15),
    Rgb(0x60, 0xa5, 0xfa),
    Rgb(0xc0, 0x84, 0xfc),
];

// Red, green, gold, white
const CHRISTMAS_PALETTE: [Rgb; 6] = [
    Rgb(0xef, 0x44, 0x44),
    Rgb(0x22, 0xc5, 0x5e),
    Rgb(0xea, 0xb3, 0x08),
    Rgb(0xff, 0xff, 0xff),
    Rgb(0xf8, 0x71, 0x71),
    Rgb(0x4a, 0xde, 0x80),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_round_trips() {
        assert_eq!(Theme::Default.toggled(), Theme::Christmas);
        assert_eq!(Theme::Default.toggled().toggled(), Theme::Default);
    }

    #[test]
    fn cue_family_follows_theme() {
        assert_eq!(Theme::Default.tick_cue(), TickCue::Woodblock);
        assert_eq!(Theme::Christmas.tick_cue(), TickCue::Jingle);
    }

    #[test]
    fn palettes_are_disjoint() {
        let default = Theme::Default.celebration_palette();
        let xmas = Theme::Christmas.celebration_palette();
        assert!(default.iter().all(|c| !xmas.contains(c)));
        assert_eq!(xmas[3].to_hex(), "#ffffff");
    }

    #[test]
    fn serde_uses_lowercase_names() {
        assert_eq!(serde_json::to_string(&Theme::Christmas).unwrap(), "\"christmas\"");
        let theme: Theme = serde_json::from_str("\"default\"").unwrap();
        assert_eq!(theme, Theme::Default);
    }

    #[test]
    fn parse_accepts_dutch_alias() {
        assert_eq!("Kerst".parse::<Theme>().unwrap(), Theme::Christmas);
        assert!("summer".parse::<Theme>().is_err());
    }
}
