use std::fmt;
use std::ops::RangeInclusive;

/// Highest ball number. Balls run 1..=TOTAL_NUMBERS.
pub const TOTAL_NUMBERS: u8 = 75;

/// Width of each band (column).
pub const BAND_WIDTH: u8 = TOTAL_NUMBERS / 5;

/// Column letter of a ball.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Band {
    B,
    I,
    N,
    G,
    O,
}

impl Band {
    pub const ALL: [Band; 5] = [Band::B, Band::I, Band::N, Band::G, Band::O];

    /// Band for a ball number. Returns None outside 1..=TOTAL_NUMBERS.
    pub fn of(number: u8) -> Option<Self> {
        if !is_valid(number) {
            return None;
        }
        Some(Self::ALL[((number - 1) / BAND_WIDTH) as usize])
    }

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn letter(self) -> char {
        match self {
            Self::B => 'B',
            Self::I => 'I',
            Self::N => 'N',
            Self::G => 'G',
            Self::O => 'O',
        }
    }

    /// Numbers belonging to this band.
    pub fn numbers(self) -> RangeInclusive<u8> {
        let start = self.index() as u8 * BAND_WIDTH + 1;
        start..=start + BAND_WIDTH - 1
    }
}

impl fmt::Display for Band {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

pub fn is_valid(number: u8) -> bool {
    (1..=TOTAL_NUMBERS).contains(&number)
}

/// "B 7", "O 75", used for display and speech.
pub fn call_label(number: u8) -> String {
    match Band::of(number) {
        Some(band) => format!("{band} {number}"),
        None => number.to_string(),
    }
}
