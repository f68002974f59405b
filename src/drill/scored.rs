use log::{debug, info};
use rand::Rng;

use super::{draw_word, WordDrill, WordView};
use crate::dataset::{Dataset, WordEntry};
use crate::error::EmptyDatasetError;
use crate::session::SessionState;

/// Flashcards with a score: every known word pays `10 + 2 * combo`,
/// an unknown word breaks the combo.
#[derive(Debug, Clone, Copy)]
pub struct ScoredDrill<'d> {
    drill: WordDrill<'d>,
}

impl<'d> ScoredDrill<'d> {
    pub fn new(words: &'d Dataset<WordEntry>) -> Self {
        Self {
            drill: WordDrill::new(words),
        }
    }

    pub fn start<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        self.drill.start(state, rng)
    }

    pub fn reveal<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        self.drill.reveal(state, rng)
    }

    /// Revealed -> Showing, crediting the word and extending the combo
    pub fn mark_known<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        if !self.ready_to_mark(state, "known") {
            return self.drill.start(state, rng);
        }
        let points = state.scoreboard.record_known();
        debug!(
            "known: +{points} (score {}, combo {})",
            state.scoreboard.score, state.scoreboard.combo
        );
        draw_word(self.drill.words(), state, rng)
    }

    /// Revealed -> Showing, breaking the combo
    pub fn mark_unknown<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        if !self.ready_to_mark(state, "unknown") {
            return self.drill.start(state, rng);
        }
        state.scoreboard.record_unknown();
        debug!("unknown: combo reset after {} attempts", state.scoreboard.attempts);
        draw_word(self.drill.words(), state, rng)
    }

    /// Clear all counters and start over with a fresh word, from any state
    pub fn reset_game<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        info!(
            "game reset at score {} after {} attempts",
            state.scoreboard.score, state.scoreboard.attempts
        );
        state.scoreboard.reset();
        draw_word(self.drill.words(), state, rng)
    }

    /// Marking is only valid once the answer is revealed
    fn ready_to_mark(&self, state: &SessionState, mark: &str) -> bool {
        match &state.word {
            Some(_) if state.revealed => true,
            Some(word) => {
                debug!("mark {mark} ignored: '{}' is not revealed yet", word.english);
                false
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::WordPhase;
    use crate::session::Scoreboard;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn words() -> Dataset<WordEntry> {
        Dataset::from_entries(
            vec![
                WordEntry::new("abate", "감소하다"),
                WordEntry::new("comply", "준수하다"),
                WordEntry::new("defer", "연기하다"),
            ],
            "scored",
        )
    }

    fn know(drill: &ScoredDrill<'_>, state: &mut SessionState, rng: &mut StdRng) -> WordView {
        drill.reveal(state, rng).unwrap();
        drill.mark_known(state, rng).unwrap()
    }

    fn miss(drill: &ScoredDrill<'_>, state: &mut SessionState, rng: &mut StdRng) -> WordView {
        drill.reveal(state, rng).unwrap();
        drill.mark_unknown(state, rng).unwrap()
    }

    #[test]
    fn consecutive_known_words_follow_the_combo_series() {
        let words = words();
        let drill = ScoredDrill::new(&words);
        let mut rng = StdRng::seed_from_u64(1);

        for n in 0..25u64 {
            let mut state = SessionState::new();
            drill.start(&mut state, &mut rng).unwrap();
            for _ in 0..n {
                know(&drill, &mut state, &mut rng);
            }
            let expected: u64 = (0..n).map(|i| 10 + 2 * i).sum();
            assert_eq!(state.scoreboard.score, expected, "after {n} known words");
            assert_eq!(state.scoreboard.combo, n);
            assert_eq!(state.scoreboard.attempts, n);
        }
    }

    #[test]
    fn unknown_resets_combo_from_any_value() {
        let words = words();
        let drill = ScoredDrill::new(&words);
        let mut rng = StdRng::seed_from_u64(2);

        for streak in [0, 1, 5, 12] {
            let mut state = SessionState::new();
            drill.start(&mut state, &mut rng).unwrap();
            for _ in 0..streak {
                know(&drill, &mut state, &mut rng);
            }
            let score_before = state.scoreboard.score;

            let view = miss(&drill, &mut state, &mut rng);
            assert_eq!(view.scoreboard.combo, 0);
            assert_eq!(state.scoreboard.score, score_before);
            assert_eq!(state.scoreboard.attempts, streak + 1);
            assert_eq!(view.phase, WordPhase::Showing);
        }
    }

    #[test]
    fn reward_restarts_at_base_after_a_miss() {
        let words = words();
        let drill = ScoredDrill::new(&words);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(3);

        drill.start(&mut state, &mut rng).unwrap();
        know(&drill, &mut state, &mut rng);
        know(&drill, &mut state, &mut rng);
        miss(&drill, &mut state, &mut rng);
        know(&drill, &mut state, &mut rng);

        assert_eq!(state.scoreboard.score, 10 + 12 + 10);
        assert_eq!(state.scoreboard.best_combo, 2);
        assert_eq!(state.scoreboard.known, 3);
    }

    #[test]
    fn marks_are_ignored_before_reveal() {
        let words = words();
        let drill = ScoredDrill::new(&words);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(4);

        drill.start(&mut state, &mut rng).unwrap();
        let snapshot = state.clone();

        drill.mark_known(&mut state, &mut rng).unwrap();
        drill.mark_unknown(&mut state, &mut rng).unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn reset_game_clears_counters_from_any_state() {
        let words = words();
        let drill = ScoredDrill::new(&words);
        let mut rng = StdRng::seed_from_u64(5);

        // never started
        let mut state = SessionState::new();
        let view = drill.reset_game(&mut state, &mut rng).unwrap();
        assert_eq!(view.scoreboard, Scoreboard::default());

        // mid game, answer revealed
        know(&drill, &mut state, &mut rng);
        know(&drill, &mut state, &mut rng);
        miss(&drill, &mut state, &mut rng);
        drill.reveal(&mut state, &mut rng).unwrap();

        let view = drill.reset_game(&mut state, &mut rng).unwrap();
        assert_eq!(state.scoreboard, Scoreboard::default());
        assert_eq!(view.phase, WordPhase::Showing);
        assert!(!state.revealed);
        assert!(words.entries().contains(state.word.as_ref().unwrap()));
    }

    #[test]
    fn reset_game_on_empty_dataset_still_clears() {
        let empty: Dataset<WordEntry> = Dataset::from_entries(vec![], "empty");
        let drill = ScoredDrill::new(&empty);
        let mut state = SessionState::new();
        state.scoreboard.score = 100;
        state.scoreboard.combo = 4;
        state.scoreboard.attempts = 9;
        let mut rng = StdRng::seed_from_u64(6);

        assert!(drill.reset_game(&mut state, &mut rng).is_err());
        assert_eq!(state.scoreboard, Scoreboard::default());
        assert_eq!(state.word, None);
    }
}
