//! Injectable randomness seam for phrase selection.
//!
//! Every random choice the generator makes goes through a `Picker` so tests
//! can substitute deterministic selection and assert exact output. The default
//! `RandomPicker` delegates to `thread_rng` — uniform, independent across
//! calls, no weighting.

use rand::seq::SliceRandom;
use rand::Rng;

/// Object-safe selection capability carried by the generator.
///
/// `pick_index` requires `len > 0`; callers go through [`pick`] which guards
/// against empty lists.
pub trait Picker: Send + Sync {
    /// Uniform-random index in `0..len`.
    fn pick_index(&self, len: usize) -> usize;

    /// Returns true with the given probability (0.0 ..= 1.0).
    fn chance(&self, probability: f64) -> bool;

    /// A shuffled permutation of `0..len`.
    fn shuffled(&self, len: usize) -> Vec<usize>;
}

/// Picks one element of a slice, or `None` if the slice is empty.
pub fn pick<'a, T>(picker: &dyn Picker, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        Some(&items[picker.pick_index(items.len())])
    }
}

/// Default picker backed by the process-wide thread-local RNG.
pub struct RandomPicker;

impl Picker for RandomPicker {
    fn pick_index(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn chance(&self, probability: f64) -> bool {
        rand::thread_rng().gen::<f64>() < probability
    }

    fn shuffled(&self, len: usize) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..len).collect();
        indices.shuffle(&mut rand::thread_rng());
        indices
    }
}

/// Deterministic picker for tests: always the first element, every coin flip
/// lands heads, shuffles are the identity permutation.
#[cfg(test)]
pub struct FirstPicker;

#[cfg(test)]
impl Picker for FirstPicker {
    fn pick_index(&self, _len: usize) -> usize {
        0
    }

    fn chance(&self, _probability: f64) -> bool {
        true
    }

    fn shuffled(&self, len: usize) -> Vec<usize> {
        (0..len).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pick_index_stays_in_bounds() {
        let picker = RandomPicker;
        for _ in 0..100 {
            assert!(picker.pick_index(7) < 7);
        }
    }

    #[test]
    fn test_chance_extremes() {
        let picker = RandomPicker;
        assert!(!picker.chance(0.0));
        assert!(picker.chance(1.0));
    }

    #[test]
    fn test_shuffled_is_a_permutation() {
        let picker = RandomPicker;
        let mut indices = picker.shuffled(10);
        indices.sort_unstable();
        assert_eq!(indices, (0..10).collect::<Vec<_>>());
    }

    #[test]
    fn test_pick_returns_none_for_empty_slice() {
        let picker = RandomPicker;
        let empty: &[&str] = &[];
        assert!(pick(&picker, empty).is_none());
    }

    #[test]
    fn test_first_picker_is_deterministic() {
        let picker = FirstPicker;
        assert_eq!(pick(&picker, &["a", "b", "c"]), Some(&"a"));
        assert!(picker.chance(0.0));
        assert_eq!(picker.shuffled(3), vec![0, 1, 2]);
    }
}
