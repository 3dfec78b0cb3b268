//! Ball numbers, bands, draw history and selection.

pub mod history;
pub mod number;
pub mod pool;

pub use history::DrawHistory;
pub use number::{BAND_WIDTH, Band, TOTAL_NUMBERS, call_label, is_valid};
pub use pool::{select_next, shuffle_candidate, undrawn};
