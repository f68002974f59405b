use log::debug;
use rand::Rng;

use super::{draw_word, WordView};
use crate::dataset::{Dataset, WordEntry};
use crate::error::EmptyDatasetError;
use crate::session::SessionState;

/// Flashcard memorizer: show the english word, reveal the meaning, move on.
#[derive(Debug, Clone, Copy)]
pub struct WordDrill<'d> {
    words: &'d Dataset<WordEntry>,
}

impl<'d> WordDrill<'d> {
    pub fn new(words: &'d Dataset<WordEntry>) -> Self {
        Self { words }
    }

    /// Draw the session's first word. Once a word is current this only
    /// returns its view.
    pub fn start<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        match &state.word {
            Some(word) => Ok(WordView::new(word, state.revealed, state.scoreboard)),
            None => draw_word(self.words, state, rng),
        }
    }

    /// Showing -> Revealed
    pub fn reveal<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        let Some(word) = &state.word else {
            return self.start(state, rng);
        };
        if !state.revealed {
            debug!("reveal '{}'", word.english);
        }
        let view = WordView::new(word, true, state.scoreboard);
        state.revealed = true;
        Ok(view)
    }

    /// Revealed -> Showing with a fresh word; ignored while the answer is hidden
    pub fn next<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<WordView, EmptyDatasetError> {
        match &state.word {
            Some(word) if !state.revealed => {
                debug!("next ignored: '{}' is not revealed yet", word.english);
                Ok(WordView::new(word, false, state.scoreboard))
            }
            _ => draw_word(self.words, state, rng),
        }
    }

    pub(crate) fn words(&self) -> &'d Dataset<WordEntry> {
        self.words
    }
}
