use clap::ValueEnum;
use log::{info, warn};
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::celebration::Celebration;
use crate::config::Config;
use crate::dataset::{demo, load_dataset, Dataset, QuizEntry, WordEntry};
use crate::drill::{Action, QuizView, ScoredDrill, VersusQuiz, WordDrill, WordView};
use crate::error::{DataLoadError, EmptyDatasetError};
use crate::runtime::Input;
use crate::session::{QuizResult, SessionState};

/// The three drills, in menu order
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    ValueEnum,
    strum_macros::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    #[default]
    Words,
    Versus,
    Scored,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Words, Mode::Versus, Mode::Scored];

    pub fn title(&self) -> &'static str {
        match self {
            Mode::Words => "Word Drill",
            Mode::Versus => "Versus Quiz",
            Mode::Scored => "Scored Drill",
        }
    }

    pub fn index(&self) -> usize {
        Self::ALL.iter().position(|m| m == self).unwrap_or(0)
    }

    pub fn next(&self) -> Mode {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(&self) -> Mode {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Whether the event loop should keep running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Quit,
}

pub type Loaded<T> = Result<Dataset<T>, DataLoadError>;

/// What the current mode should render instead of its drill
#[derive(Debug, Clone, Copy)]
pub enum Blocker<'a> {
    Load(&'a DataLoadError),
    Empty(EmptyDatasetError),
}

pub struct App {
    pub mode: Mode,
    pub session: SessionState,
    pub words: Loaded<WordEntry>,
    pub quiz: Loaded<QuizEntry>,
    pub celebration: Celebration,
    /// Set when the last transition in the current mode could not draw an entry
    pub empty: Option<EmptyDatasetError>,
    pub screen_size: (u16, u16),
    rng: Box<dyn RngCore>,
}

impl std::fmt::Debug for App {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("App")
            .field("mode", &self.mode)
            .field("session", &self.session)
            .field("empty", &self.empty)
            .finish_non_exhaustive()
    }
}

impl App {
    pub fn new(words: Loaded<WordEntry>, quiz: Loaded<QuizEntry>, mode: Mode) -> Self {
        Self::with_rng(words, quiz, mode, Box::new(rand::thread_rng()))
    }

    /// Build with an explicit random source; the first drill of `mode` starts immediately
    pub fn with_rng(
        words: Loaded<WordEntry>,
        quiz: Loaded<QuizEntry>,
        mode: Mode,
        rng: Box<dyn RngCore>,
    ) -> Self {
        let mut app = Self {
            mode,
            session: SessionState::new(),
            words,
            quiz,
            celebration: Celebration::new(),
            empty: None,
            screen_size: (80, 24),
            rng,
        };
        app.enter(mode);
        app
    }

    /// Load both data files named in the config
    pub fn from_config(config: &Config) -> Self {
        info!(
            "loading words from {} and quiz from {}",
            config.words_path.display(),
            config.quiz_path.display()
        );
        Self::new(
            load_dataset(&config.words_path),
            load_dataset(&config.quiz_path),
            config.start_mode,
        )
    }

    /// Use the sample data bundled with the binary
    pub fn demo(mode: Mode) -> Self {
        info!("using bundled demo data");
        Self::new(demo::demo_words(), demo::demo_quiz(), mode)
    }

    /// Switch modes and make sure the new mode has something to show
    pub fn enter(&mut self, mode: Mode) {
        if mode != self.mode {
            info!("switching to {}", mode.title());
        }
        self.mode = mode;
        self.empty = None;
        self.celebration.stop();
        self.run(None);
    }

    pub fn dispatch(&mut self, action: Action) {
        self.run(Some(action));
    }

    /// Apply `action` to the current mode's machine, or just start it when `None`
    fn run(&mut self, action: Option<Action>) {
        let App {
            mode,
            session,
            words,
            quiz,
            celebration,
            screen_size,
            rng,
            ..
        } = self;
        let rng = rng.as_mut();

        let outcome = match mode {
            Mode::Words => {
                let Ok(words) = words else { return };
                let drill = WordDrill::new(words);
                match action {
                    None => drill.start(session, rng).map(drop),
                    Some(Action::Reveal) => drill.reveal(session, rng).map(drop),
                    Some(Action::Next) => drill.next(session, rng).map(drop),
                    Some(other) => {
                        ignored(*mode, other);
                        Ok(())
                    }
                }
            }
            Mode::Versus => {
                let Ok(quiz) = quiz else { return };
                let versus = VersusQuiz::new(quiz);
                match action {
                    None => versus.start(session, rng).map(drop),
                    Some(Action::Select(slot)) => {
                        let was_posed = session.quiz.as_ref().is_some_and(|r| !r.solved);
                        let view = versus.select_slot(session, slot, rng);
                        if let Ok(view) = &view {
                            if was_posed && view.result == QuizResult::Correct {
                                let (width, height) = *screen_size;
                                celebration.start(width, height, rng);
                            }
                        }
                        view.map(drop)
                    }
                    Some(Action::Next) => versus.next(session, rng).map(drop),
                    Some(other) => {
                        ignored(*mode, other);
                        Ok(())
                    }
                }
            }
            Mode::Scored => {
                let Ok(words) = words else { return };
                let drill = ScoredDrill::new(words);
                match action {
                    None => drill.start(session, rng).map(drop),
                    Some(Action::Reveal) => drill.reveal(session, rng).map(drop),
                    Some(Action::MarkKnown) => drill.mark_known(session, rng).map(drop),
                    Some(Action::MarkUnknown) => drill.mark_unknown(session, rng).map(drop),
                    Some(Action::ResetGame) => drill.reset_game(session, rng).map(drop),
                    Some(other) => {
                        ignored(*mode, other);
                        Ok(())
                    }
                }
            }
        };

        self.empty = outcome.err();
        if let Some(e) = &self.empty {
            warn!("{}: {e}", self.mode.title());
        }
    }

    /// What `input` means in the current mode and state
    pub fn action_for(&self, input: Input) -> Option<Action> {
        match (self.mode, input) {
            (Mode::Words, Input::Confirm) => Some(if self.session.revealed {
                Action::Next
            } else {
                Action::Reveal
            }),
            (Mode::Words, Input::Char('n') | Input::Right) => Some(Action::Next),

            (Mode::Versus, Input::Char('1') | Input::Left) => Some(Action::Select(0)),
            (Mode::Versus, Input::Char('2') | Input::Right) => Some(Action::Select(1)),
            (Mode::Versus, Input::Confirm | Input::Char('n')) => Some(Action::Next),

            (Mode::Scored, Input::Confirm) => Some(Action::Reveal),
            (Mode::Scored, Input::Char('k') | Input::Right) => Some(Action::MarkKnown),
            (Mode::Scored, Input::Char('u') | Input::Left) => Some(Action::MarkUnknown),
            (Mode::Scored, Input::Char('r')) => Some(Action::ResetGame),
            _ => None,
        }
    }

    pub fn on_input(&mut self, input: Input) -> Control {
        match input {
            Input::Quit => return Control::Quit,
            Input::NextMode => self.enter(self.mode.next()),
            Input::PrevMode => self.enter(self.mode.prev()),
            other => {
                if let Some(action) = self.action_for(other) {
                    self.dispatch(action);
                }
            }
        }
        Control::Continue
    }

    pub fn on_tick(&mut self) {
        self.celebration.update();
    }

    pub fn on_resize(&mut self, width: u16, height: u16) {
        self.screen_size = (width, height);
    }

    /// A load failure or an empty dataset blocks the current mode
    pub fn blocker(&self) -> Option<Blocker<'_>> {
        let loaded = match self.mode {
            Mode::Words | Mode::Scored => self.words.as_ref().err(),
            Mode::Versus => self.quiz.as_ref().err(),
        };
        loaded
            .map(Blocker::Load)
            .or(self.empty.map(Blocker::Empty))
    }

    pub fn word_view(&self) -> Option<WordView> {
        WordView::of(&self.session)
    }

    pub fn quiz_view(&self) -> Option<QuizView> {
        QuizView::of(&self.session)
    }
}

fn ignored(mode: Mode, action: Action) {
    log::debug!("{action:?} has no meaning in {}", mode.title());
}
