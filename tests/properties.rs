//! Property tests for scrambling, guess normalization and scoring

use proptest::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use word_scramble::sim::{GuessOutcome, Phase, RoundEngine, can_scramble, scramble};
use word_scramble::{Scoring, Settings, TimerMode, WordPool, normalize_guess};

fn sorted(word: &str) -> Vec<char> {
    let mut letters: Vec<char> = word.chars().collect();
    letters.sort_unstable();
    letters
}

proptest! {
    #[test]
    fn scramble_is_a_distinct_permutation(word in "[A-Z]{2,12}", seed in any::<u64>()) {
        prop_assume!(can_scramble(&word));
        let mut rng = Pcg32::seed_from_u64(seed);
        let scrambled = scramble(&word, &mut rng);
        prop_assert_ne!(&scrambled, &word);
        prop_assert_eq!(sorted(&scrambled), sorted(&word));
    }

    #[test]
    fn short_words_pass_through(word in "[A-Z]{0,1}", seed in any::<u64>()) {
        let mut rng = Pcg32::seed_from_u64(seed);
        prop_assert_eq!(scramble(&word, &mut rng), word);
    }

    #[test]
    fn normalization_ignores_case_and_padding(
        word in "[a-zA-Z]{1,10}",
        left in "[ \t\n]{0,3}",
        right in "[ \t\n]{0,3}",
    ) {
        let padded = format!("{}{}{}", left, word, right);
        prop_assert_eq!(normalize_guess(&padded), word.to_uppercase());
    }

    #[test]
    fn equivalent_guesses_score_identically(word in "[A-Z]{3,8}", seed in any::<u64>()) {
        prop_assume!(can_scramble(&word));
        let pool = WordPool::single(vec![word.clone()]).unwrap();

        let mut outcomes = Vec::new();
        for guess in [word.clone(), word.to_lowercase(), format!("  {} ", word)] {
            let mut engine = RoundEngine::new(pool.clone(), Settings::default(), seed);
            engine.start_game().unwrap();
            outcomes.push(engine.submit_guess(&guess));
        }
        let all_correct = outcomes
            .iter()
            .all(|o| *o == Ok(GuessOutcome::Correct { points: 1 }));
        prop_assert!(all_correct, "outcomes differ: {:?}", outcomes);
    }

    #[test]
    fn flat_score_counts_correct_answers(
        answers in 1u32..8,
        waits in proptest::collection::vec(0u64..25_000, 8),
    ) {
        let settings = Settings {
            timer_mode: TimerMode::Seconds(30),
            scoring: Scoring::Flat,
            ..Settings::default()
        };
        let mut engine = RoundEngine::with_builtin_words(settings, 7);
        engine.start_game().unwrap();

        for wait in waits.iter().take(answers as usize) {
            engine.update(*wait);
            let answer = engine.round().unwrap().target_word().to_string();
            prop_assert_eq!(
                engine.submit_guess(&answer),
                Ok(GuessOutcome::Correct { points: 1 })
            );
            engine.update(1500);
            prop_assert_eq!(engine.phase(), Phase::Active);
        }
        prop_assert_eq!(engine.score(), answers);
    }
}
