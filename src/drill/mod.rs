//! The three drill state machines.
//!
//! Each machine borrows its immutable dataset and mutates a caller-owned
//! [`SessionState`]. Every transition returns a fresh view of what the user
//! should see; transitions that are not valid in the current phase leave the
//! state untouched and return the current view.

pub mod scored;
pub mod versus;
pub mod word;

pub use scored::ScoredDrill;
pub use versus::VersusQuiz;
pub use word::WordDrill;

use log::debug;
use rand::Rng;

use crate::dataset::{Dataset, WordEntry};
use crate::error::EmptyDatasetError;
use crate::session::{QuizResult, QuizRound, Scoreboard, SessionState};

/// Discrete events the presentation layer sends to the core
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Next,
    Select(usize),
    MarkKnown,
    MarkUnknown,
    ResetGame,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordPhase {
    Showing,
    Revealed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizPhase {
    Posed,
    Solved,
}

/// What a flashcard screen may show. Answer fields are only filled once revealed.
#[derive(Debug, Clone, PartialEq)]
pub struct WordView {
    pub phase: WordPhase,
    pub english: String,
    pub korean: Option<String>,
    pub synonyms: Option<String>,
    pub example: Option<String>,
    pub scoreboard: Scoreboard,
}

impl WordView {
    pub fn new(word: &WordEntry, revealed: bool, scoreboard: Scoreboard) -> Self {
        let when_revealed = |field: &Option<String>| {
            if revealed {
                field.clone()
            } else {
                None
            }
        };

        Self {
            phase: if revealed {
                WordPhase::Revealed
            } else {
                WordPhase::Showing
            },
            english: word.english.clone(),
            korean: revealed.then(|| word.korean.clone()),
            synonyms: when_revealed(&word.synonyms),
            example: when_revealed(&word.example),
            scoreboard,
        }
    }

    /// `None` until a word has been drawn
    pub fn of(state: &SessionState) -> Option<Self> {
        state
            .word
            .as_ref()
            .map(|word| Self::new(word, state.revealed, state.scoreboard))
    }
}

/// What a versus screen may show. The answer and explanation only appear once solved.
#[derive(Debug, Clone, PartialEq)]
pub struct QuizView {
    pub phase: QuizPhase,
    pub question: String,
    pub options: [String; 2],
    pub result: QuizResult,
    pub correct: Option<String>,
    pub explanation: Option<String>,
}

impl QuizView {
    pub fn new(round: &QuizRound) -> Self {
        let solved = round.solved;
        Self {
            phase: if solved {
                QuizPhase::Solved
            } else {
                QuizPhase::Posed
            },
            question: round.entry.question.clone(),
            options: round.options.clone(),
            result: round.result,
            correct: solved.then(|| round.entry.correct.clone()),
            explanation: if solved {
                round.entry.explanation.clone()
            } else {
                None
            },
        }
    }

    /// `None` until a question has been drawn
    pub fn of(state: &SessionState) -> Option<Self> {
        state.quiz.as_ref().map(Self::new)
    }

    pub fn options_enabled(&self) -> bool {
        self.phase == QuizPhase::Posed
    }
}

/// Replace the current word with a fresh draw and hide its answer.
/// On an empty dataset the current word is cleared so nothing stale is shown.
fn draw_word<R: Rng + ?Sized>(
    words: &Dataset<WordEntry>,
    state: &mut SessionState,
    rng: &mut R,
) -> Result<WordView, EmptyDatasetError> {
    state.revealed = false;
    match words.draw(rng) {
        Ok(word) => {
            debug!("drew word '{}'", word.english);
            state.word = Some(word.clone());
            Ok(WordView::new(word, false, state.scoreboard))
        }
        Err(e) => {
            state.word = None;
            Err(e)
        }
    }
}
