//! Letter scrambling
//!
//! Fisher-Yates over the word's letters, reshuffled whole until the result
//! differs from the input.

use rand::Rng;

use crate::consts::MAX_SCRAMBLE_ATTEMPTS;

/// One uniform Fisher-Yates pass over the letters of `word`
pub fn shuffle_letters<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    let mut letters: Vec<char> = word.chars().collect();
    for i in (1..letters.len()).rev() {
        let j = rng.random_range(0..=i);
        letters.swap(i, j);
    }
    letters.into_iter().collect()
}

/// True if some permutation of `word` differs from it
pub fn can_scramble(word: &str) -> bool {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => chars.any(|c| c != first),
        None => false,
    }
}

/// Scramble `word` so the result is a permutation that differs from it.
///
/// Words with fewer than two distinct letters are returned unchanged.
pub fn scramble<R: Rng + ?Sized>(word: &str, rng: &mut R) -> String {
    if !can_scramble(word) {
        return word.to_string();
    }

    let mut scrambled = shuffle_letters(word, rng);
    let mut attempts = 1;
    while scrambled == word && attempts < MAX_SCRAMBLE_ATTEMPTS {
        scrambled = shuffle_letters(word, rng);
        attempts += 1;
    }
    if scrambled == word {
        log::warn!("Gave up scrambling {} after {} attempts", word, attempts);
    }
    scrambled
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn sorted(word: &str) -> Vec<char> {
        let mut letters: Vec<char> = word.chars().collect();
        letters.sort_unstable();
        letters
    }

    #[test]
    fn test_scramble_is_distinct_permutation() {
        let mut rng = Pcg32::seed_from_u64(7);
        for word in ["AB", "CAT", "BUTTERFLY", "ADVENTURE", "AAB"] {
            for _ in 0..50 {
                let scrambled = scramble(word, &mut rng);
                assert_ne!(scrambled, word);
                assert_eq!(sorted(&scrambled), sorted(word));
            }
        }
    }

    #[test]
    fn test_unscramblable_words_pass_through() {
        let mut rng = Pcg32::seed_from_u64(7);
        assert_eq!(scramble("", &mut rng), "");
        assert_eq!(scramble("A", &mut rng), "A");
        assert_eq!(scramble("AAAA", &mut rng), "AAAA");
    }

    #[test]
    fn test_shuffle_is_deterministic() {
        let mut rng1 = Pcg32::seed_from_u64(12345);
        let mut rng2 = Pcg32::seed_from_u64(12345);
        for _ in 0..10 {
            assert_eq!(
                shuffle_letters("RAINBOW", &mut rng1),
                shuffle_letters("RAINBOW", &mut rng2)
            );
        }
    }

    #[test]
    fn test_shuffle_reaches_every_permutation() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..600 {
            seen.insert(shuffle_letters("ABC", &mut rng));
        }
        assert_eq!(seen.len(), 6);
    }
}
