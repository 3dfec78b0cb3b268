//! Printable bingo cards.

use std::fmt::{self, Write as _};
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use rand::seq::SliceRandom;

use crate::model::Band;

pub const CARDS_PER_SHEET: usize = 4;
/// Default export filename.
pub const SHEET_FILE: &str = "bingo-kaarten.txt";

const CARD_SIZE: usize = 5;
const FREE_LABEL: &str = "VRIJ";
const CELL_WIDTH: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Number(u8),
    Free,
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Free => f.write_str(FREE_LABEL),
        }
    }
}

/// A 5x5 card. `columns[c][r]` is the cell in column `c` (B..O), row `r`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BingoCard {
    pub id: u16,
    pub columns: [[Cell; CARD_SIZE]; CARD_SIZE],
}

impl BingoCard {
    /// Each column takes distinct numbers from its own band. The centre
    /// of the N column is the free square.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut columns = [[Cell::Free; CARD_SIZE]; CARD_SIZE];
        for band in Band::ALL {
            let pool: Vec<u8> = band.numbers().collect();
            let wanted = if band == Band::N { CARD_SIZE - 1 } else { CARD_SIZE };
            let mut picked = pool.choose_multiple(rng, wanted).copied();

            for (row, cell) in columns[band.index()].iter_mut().enumerate() {
                if band == Band::N && row == CARD_SIZE / 2 {
                    continue;
                }
                if let Some(n) = picked.next() {
                    *cell = Cell::Number(n);
                }
            }
        }
        Self {
            id: rng.gen_range(0..10_000),
            columns,
        }
    }

    pub fn cell(&self, column: Band, row: usize) -> Cell {
        self.columns[column.index()][row]
    }

    pub fn numbers(&self) -> impl Iterator<Item = u8> + '_ {
        self.columns.iter().flatten().filter_map(|cell| match cell {
            Cell::Number(n) => Some(*n),
            Cell::Free => None,
        })
    }

    fn render_into(&self, out: &mut String) {
        let rule = format!("+{}+", "-".repeat(CELL_WIDTH * CARD_SIZE));
        let _ = writeln!(out, "Kaart #{:04}", self.id);
        let _ = writeln!(out, "{rule}");
        out.push('|');
        for band in Band::ALL {
            let _ = write!(out, "{:^CELL_WIDTH$}", band.letter());
        }
        out.push_str("|\n");
        let _ = writeln!(out, "{rule}");
        for row in 0..CARD_SIZE {
            out.push('|');
            for band in Band::ALL {
                let _ = write!(out, "{:^CELL_WIDTH$}", self.cell(band, row).to_string());
            }
            out.push_str("|\n");
        }
        let _ = writeln!(out, "{rule}");
    }
}

/// One printable page of cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardSheet {
    pub cards: Vec<BingoCard>,
}

impl CardSheet {
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            cards: (0..CARDS_PER_SHEET).map(|_| BingoCard::generate(rng)).collect(),
        }
    }

    /// Text layout, one card block after another.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        for (i, card) in self.cards.iter().enumerate() {
            if i > 0 {
                out.push('\n');
            }
            card.render_into(&mut out);
        }
        out
    }

    pub fn write_to<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.render_text())
            .with_context(|| format!("Failed to write cards: {}", path.display()))
    }
}
