use anyhow::{Result, bail};

use super::number::{TOTAL_NUMBERS, is_valid};

/// Ordered record of drawn balls, oldest first.
///
/// Holds no duplicates and only numbers in 1..=TOTAL_NUMBERS, so its
/// length never exceeds TOTAL_NUMBERS.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DrawHistory {
    numbers: Vec<u8>,
}

impl DrawHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a history from restored numbers, rejecting anything that
    /// breaks the history invariants.
    pub fn from_numbers(numbers: Vec<u8>) -> Result<Self> {
        let mut history = Self::new();
        for n in numbers {
            if !is_valid(n) {
                bail!("Ball {n} is outside 1..={TOTAL_NUMBERS}");
            }
            if !history.push(n) {
                bail!("Ball {n} appears twice");
            }
        }
        Ok(history)
    }

    /// Appends a ball. Returns false (and leaves history untouched) for an
    /// out-of-range or already drawn number.
    pub fn push(&mut self, number: u8) -> bool {
        if !is_valid(number) || self.contains(number) {
            return false;
        }
        self.numbers.push(number);
        true
    }

    pub fn pop(&mut self) -> Option<u8> {
        self.numbers.pop()
    }

    pub fn clear(&mut self) {
        self.numbers.clear();
    }

    pub fn last(&self) -> Option<u8> {
        self.numbers.last().copied()
    }

    pub fn contains(&self, number: u8) -> bool {
        self.numbers.contains(&number)
    }

    pub fn len(&self) -> usize {
        self.numbers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.numbers.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.numbers.len() >= TOTAL_NUMBERS as usize
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.numbers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_rejects_duplicates_and_out_of_range() {
        let mut history = DrawHistory::new();
        assert!(history.push(14));
        assert!(!history.push(14));
        assert!(!history.push(0));
        assert!(!history.push(76));
        assert_eq!(history.as_slice(), &[14]);
    }

    #[test]
    fn last_tracks_push_and_pop() {
        let mut history = DrawHistory::new();
        assert_eq!(history.last(), None);
        history.push(5);
        history.push(12);
        assert_eq!(history.last(), Some(12));
        assert_eq!(history.pop(), Some(12));
        assert_eq!(history.last(), Some(5));
    }

    #[test]
    fn from_numbers_validates() {
        assert!(DrawHistory::from_numbers(vec![5, 12, 40]).is_ok());
        assert!(DrawHistory::from_numbers(vec![5, 5]).is_err());
        assert!(DrawHistory::from_numbers(vec![80]).is_err());
    }

    #[test]
    fn exhaustion() {
        let history = DrawHistory::from_numbers((1..=TOTAL_NUMBERS).collect()).unwrap();
        assert!(history.is_exhausted());
        assert_eq!(history.len(), TOTAL_NUMBERS as usize);
    }
}
