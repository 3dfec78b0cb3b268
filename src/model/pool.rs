use rand::Rng;
use rand::seq::SliceRandom;

use super::history::DrawHistory;
use super::number::TOTAL_NUMBERS;

/// Numbers not yet drawn, ascending.
pub fn undrawn(history: &DrawHistory) -> Vec<u8> {
    (1..=TOTAL_NUMBERS)
        .filter(|&n| !history.contains(n))
        .collect()
}

/// Picks the next ball uniformly among the undrawn numbers.
/// Returns None once every number has been drawn.
///
/// Derived from `history` alone; there is no separate pool to keep in sync
/// with undo or reset.
pub fn select_next<R: Rng + ?Sized>(history: &DrawHistory, rng: &mut R) -> Option<u8> {
    undrawn(history).choose(rng).copied()
}

/// Display-only shuffle value, uniform over the full range.
pub fn shuffle_candidate<R: Rng + ?Sized>(rng: &mut R) -> u8 {
    rng.gen_range(1..=TOTAL_NUMBERS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn undrawn_is_complement() {
        let history = DrawHistory::from_numbers(vec![1, 75, 30]).unwrap();
        let rest = undrawn(&history);
        assert_eq!(rest.len(), 72);
        assert!(!rest.contains(&1));
        assert!(!rest.contains(&30));
        assert!(!rest.contains(&75));
    }

    #[test]
    fn select_never_repeats() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut history = DrawHistory::new();
        while let Some(n) = select_next(&history, &mut rng) {
            assert!(history.push(n), "ball {n} was drawn twice");
        }
        assert!(history.is_exhausted());
        let mut sorted = history.as_slice().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, (1..=TOTAL_NUMBERS).collect::<Vec<_>>());
    }

    #[test]
    fn exhausted_history_yields_none() {
        let mut rng = StdRng::seed_from_u64(1);
        let history = DrawHistory::from_numbers((1..=TOTAL_NUMBERS).collect()).unwrap();
        assert_eq!(select_next(&history, &mut rng), None);
    }

    #[test]
    fn last_remaining_ball_is_forced() {
        let mut rng = StdRng::seed_from_u64(3);
        let history = DrawHistory::from_numbers((1..TOTAL_NUMBERS).collect()).unwrap();
        assert_eq!(select_next(&history, &mut rng), Some(TOTAL_NUMBERS));
    }

    #[test]
    fn selection_is_uniform() {
        let mut rng = StdRng::seed_from_u64(0xB1A6);
        let history = DrawHistory::from_numbers(vec![3, 14, 22, 38, 41, 50, 59, 63, 70, 72]).unwrap();
        let remaining = undrawn(&history);
        let per_bucket = 1000usize;
        let trials = remaining.len() * per_bucket;

        let mut counts = [0usize; TOTAL_NUMBERS as usize + 1];
        for _ in 0..trials {
            let n = select_next(&history, &mut rng).unwrap();
            counts[n as usize] += 1;
        }

        for &n in history.as_slice() {
            assert_eq!(counts[n as usize], 0, "drawn ball {n} was selected again");
        }

        let expected = per_bucket as f64;
        let chi_square: f64 = remaining
            .iter()
            .map(|&n| {
                let diff = counts[n as usize] as f64 - expected;
                diff * diff / expected
            })
            .sum();
        // 64 degrees of freedom; p = 0.001 critical value is ~104.
        assert!(chi_square < 110.0, "chi-square {chi_square} too large");
    }

    #[test]
    fn candidates_stay_in_range() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..1000 {
            let n = shuffle_candidate(&mut rng);
            assert!((1..=TOTAL_NUMBERS).contains(&n));
        }
    }
}
