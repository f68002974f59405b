use rand::seq::SliceRandom;
use rand::Rng;

use crate::dataset::{QuizEntry, WordEntry};

/// Outcome of the current versus question
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QuizResult {
    #[default]
    Pending,
    Correct,
    Wrong,
}

/// Counters for the scored drill. They saturate instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scoreboard {
    pub score: u64,
    pub combo: u64,
    pub best_combo: u64,
    pub known: u64,
    pub attempts: u64,
}

impl Scoreboard {
    pub const BASE_POINTS: u64 = 10;
    pub const COMBO_BONUS: u64 = 2;

    /// Points the next known word is worth at the current combo
    pub fn next_award(&self) -> u64 {
        Self::BASE_POINTS.saturating_add(Self::COMBO_BONUS.saturating_mul(self.combo))
    }

    /// Returns the points awarded
    pub fn record_known(&mut self) -> u64 {
        let points = self.next_award();
        self.score = self.score.saturating_add(points);
        self.combo = self.combo.saturating_add(1);
        self.best_combo = self.best_combo.max(self.combo);
        self.known = self.known.saturating_add(1);
        self.attempts = self.attempts.saturating_add(1);
        points
    }

    pub fn record_unknown(&mut self) {
        self.combo = 0;
        self.attempts = self.attempts.saturating_add(1);
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Share of attempts marked known, in percent
    pub fn accuracy(&self) -> Option<f64> {
        if self.attempts == 0 {
            None
        } else {
            Some(self.known as f64 / self.attempts as f64 * 100.0)
        }
    }
}

/// One drawn versus question with its two options in display order
#[derive(Debug, Clone, PartialEq)]
pub struct QuizRound {
    pub entry: QuizEntry,
    pub options: [String; 2],
    pub solved: bool,
    pub result: QuizResult,
}

impl QuizRound {
    /// Options are always exactly `{correct, wrong}`, order uniformly shuffled
    pub fn new<R: Rng + ?Sized>(entry: QuizEntry, rng: &mut R) -> Self {
        let mut options = [entry.correct.clone(), entry.wrong.clone()];
        options.shuffle(rng);
        Self {
            entry,
            options,
            solved: false,
            result: QuizResult::Pending,
        }
    }

    pub fn is_correct(&self, option: &str) -> bool {
        option == self.entry.correct
    }
}

/// Everything one interactive session remembers. Nothing here outlives the process.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SessionState {
    pub word: Option<WordEntry>,
    pub revealed: bool,
    pub scoreboard: Scoreboard,
    pub quiz: Option<QuizRound>,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }
}
