use log::debug;
use rand::Rng;

use super::QuizView;
use crate::dataset::{Dataset, QuizEntry};
use crate::error::EmptyDatasetError;
use crate::session::{QuizResult, QuizRound, SessionState};

/// Two-choice quiz over easily confused words
#[derive(Debug, Clone, Copy)]
pub struct VersusQuiz<'d> {
    questions: &'d Dataset<QuizEntry>,
}

impl<'d> VersusQuiz<'d> {
    pub fn new(questions: &'d Dataset<QuizEntry>) -> Self {
        Self { questions }
    }

    /// Pose the session's first question; a no-op once one is current
    pub fn start<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<QuizView, EmptyDatasetError> {
        match &state.quiz {
            Some(round) => Ok(QuizView::new(round)),
            None => self.pose(state, rng),
        }
    }

    /// Answer with the option text. Posed -> Solved; ignored once solved or
    /// when the text is not one of the two options.
    pub fn select<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        option: &str,
        rng: &mut R,
    ) -> Result<QuizView, EmptyDatasetError> {
        let Some(round) = state.quiz.as_mut() else {
            return self.start(state, rng);
        };

        if round.solved {
            debug!("selection '{option}' ignored: question already solved");
        } else if !round.options.iter().any(|o| o == option) {
            debug!("selection '{option}' ignored: not an option");
        } else {
            round.result = if round.is_correct(option) {
                QuizResult::Correct
            } else {
                QuizResult::Wrong
            };
            round.solved = true;
            debug!(
                "'{}' answered with '{option}': {:?}",
                round.entry.question, round.result
            );
        }
        Ok(QuizView::new(round))
    }

    /// Answer with the option at display position `slot` (0 = left, 1 = right)
    pub fn select_slot<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        slot: usize,
        rng: &mut R,
    ) -> Result<QuizView, EmptyDatasetError> {
        let option = state
            .quiz
            .as_ref()
            .and_then(|round| round.options.get(slot))
            .cloned();

        match option {
            Some(option) => self.select(state, &option, rng),
            None => {
                debug!("selection of slot {slot} ignored");
                self.start(state, rng)
            }
        }
    }

    /// Solved -> Posed with a new question; ignored while unanswered
    pub fn next<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<QuizView, EmptyDatasetError> {
        match &state.quiz {
            Some(round) if !round.solved => {
                debug!("next ignored: question not answered yet");
                Ok(QuizView::new(round))
            }
            _ => self.pose(state, rng),
        }
    }

    fn pose<R: Rng + ?Sized>(
        &self,
        state: &mut SessionState,
        rng: &mut R,
    ) -> Result<QuizView, EmptyDatasetError> {
        match self.questions.draw(rng) {
            Ok(entry) => {
                let round = QuizRound::new(entry.clone(), rng);
                debug!("posed '{}' with {:?}", round.entry.question, round.options);
                let view = QuizView::new(&round);
                state.quiz = Some(round);
                Ok(view)
            }
            Err(e) => {
                state.quiz = None;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drill::QuizPhase;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn report_question() -> Dataset<QuizEntry> {
        Dataset::from_entries(
            vec![QuizEntry::new("The report is ___ accurate.", "highly", "high")
                .with_explanation("use adverb before adjective")],
            "report",
        )
    }

    fn several_questions() -> Dataset<QuizEntry> {
        Dataset::from_entries(
            vec![
                QuizEntry::new("The report is ___ accurate.", "highly", "high"),
                QuizEntry::new("The policy will ___ all staff.", "affect", "effect"),
                QuizEntry::new("The shipment arrived ___ than expected.", "later", "latter"),
            ],
            "several",
        )
    }

    #[test]
    fn wrong_answer_shows_explanation() {
        let questions = report_question();
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(1);

        let posed = quiz.start(&mut state, &mut rng).unwrap();
        assert_eq!(posed.phase, QuizPhase::Posed);
        assert!(posed.options_enabled());
        assert_eq!(posed.explanation, None);
        assert_eq!(posed.correct, None);

        let solved = quiz.select(&mut state, "high", &mut rng).unwrap();
        assert_eq!(solved.phase, QuizPhase::Solved);
        assert_eq!(solved.result, QuizResult::Wrong);
        assert_eq!(solved.correct.as_deref(), Some("highly"));
        assert_eq!(
            solved.explanation.as_deref(),
            Some("use adverb before adjective")
        );
        assert!(!solved.options_enabled());
    }

    #[test]
    fn correct_answer_is_recognised() {
        let questions = report_question();
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(1);

        quiz.start(&mut state, &mut rng).unwrap();
        let solved = quiz.select(&mut state, "highly", &mut rng).unwrap();
        assert_eq!(solved.result, QuizResult::Correct);
    }

    #[test]
    fn solved_is_terminal_until_next() {
        let questions = report_question();
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(8);

        quiz.start(&mut state, &mut rng).unwrap();
        quiz.select(&mut state, "high", &mut rng).unwrap();
        let snapshot = state.clone();

        let view = quiz.select(&mut state, "highly", &mut rng).unwrap();
        assert_eq!(view.result, QuizResult::Wrong);
        quiz.select_slot(&mut state, 0, &mut rng).unwrap();
        quiz.select_slot(&mut state, 1, &mut rng).unwrap();
        assert_eq!(state, snapshot);

        let view = quiz.next(&mut state, &mut rng).unwrap();
        assert_eq!(view.phase, QuizPhase::Posed);
        assert_eq!(view.result, QuizResult::Pending);
    }

    #[test]
    fn next_is_ignored_while_posed() {
        let questions = several_questions();
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(12);

        quiz.start(&mut state, &mut rng).unwrap();
        let snapshot = state.clone();
        quiz.next(&mut state, &mut rng).unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn unknown_option_and_slot_are_ignored() {
        let questions = several_questions();
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(12);

        quiz.start(&mut state, &mut rng).unwrap();
        let snapshot = state.clone();
        quiz.select(&mut state, "neither", &mut rng).unwrap();
        quiz.select_slot(&mut state, 2, &mut rng).unwrap();
        assert_eq!(state, snapshot);
    }

    #[test]
    fn slot_selects_the_displayed_option() {
        let questions = several_questions();
        let quiz = VersusQuiz::new(&questions);
        let mut rng = StdRng::seed_from_u64(21);

        for slot in [0, 1] {
            let mut state = SessionState::new();
            let posed = quiz.start(&mut state, &mut rng).unwrap();
            let chosen = posed.options[slot].clone();
            let round = state.quiz.clone().unwrap();

            let view = quiz.select_slot(&mut state, slot, &mut rng).unwrap();
            let expected = if chosen == round.entry.correct {
                QuizResult::Correct
            } else {
                QuizResult::Wrong
            };
            assert_eq!(view.result, expected);
        }
    }

    #[test]
    fn options_always_match_the_entry() {
        let questions = several_questions();
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(33);

        quiz.start(&mut state, &mut rng).unwrap();
        for _ in 0..100 {
            let round = state.quiz.as_ref().unwrap();
            assert!(questions.entries().contains(&round.entry));
            let mut options = round.options.clone();
            options.sort();
            let mut expected = [round.entry.correct.clone(), round.entry.wrong.clone()];
            expected.sort();
            assert_eq!(options, expected);

            quiz.select_slot(&mut state, 0, &mut rng).unwrap();
            quiz.next(&mut state, &mut rng).unwrap();
        }
    }

    #[test]
    fn empty_dataset_signals_error() {
        let questions: Dataset<QuizEntry> = Dataset::from_entries(vec![], "empty");
        let quiz = VersusQuiz::new(&questions);
        let mut state = SessionState::new();
        let mut rng = StdRng::seed_from_u64(0);

        let err = quiz.start(&mut state, &mut rng).unwrap_err();
        assert_eq!(err.kind, crate::error::DatasetKind::Quiz);
        assert!(quiz.select_slot(&mut state, 0, &mut rng).is_err());
        assert!(quiz.next(&mut state, &mut rng).is_err());
        assert_eq!(state.quiz, None);
    }
}
