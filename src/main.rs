use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use log::{info, warn};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use toeic_master::{
    app::{App, Control, Mode},
    check::CheckReport,
    config::{ConfigStore, FileConfigStore, Overrides},
    dataset::{demo, load_dataset},
    logging,
    runtime::{DrillEvent, EventStream, TICK_RATE_MS},
};

/// vocabulary drilling tui: flashcards, a confusing-word versus quiz, and a scored combo drill
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Drill TOEIC vocabulary from your own spreadsheets or CSV/TSV files: reveal-style flashcards, a two-option quiz for easily confused words, and a scored drill that rewards streaks of known words."
)]
pub struct Cli {
    /// word list (.xlsx, .ods, .csv or .tsv): english, korean, optional synonyms and example columns
    #[clap(long, value_name = "FILE")]
    words: Option<PathBuf>,

    /// versus quiz list (.xlsx, .ods, .csv or .tsv): question, correct, wrong, explanation columns
    #[clap(long, value_name = "FILE")]
    quiz: Option<PathBuf>,

    /// drill to open first
    #[clap(short = 'm', long, value_enum)]
    mode: Option<Mode>,

    /// use the sample data bundled with the binary
    #[clap(long)]
    demo: bool,

    /// validate the data files, print a summary and exit
    #[clap(long)]
    check: bool,

    /// store --words, --quiz and --mode as the new defaults
    #[clap(long)]
    save: bool,

    /// include debug output in the log
    #[clap(short, long)]
    verbose: bool,

    /// write the log here instead of the state directory
    #[clap(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

impl Cli {
    fn overrides(&self) -> Overrides {
        Overrides {
            words_path: self.words.clone(),
            quiz_path: self.quiz.clone(),
            start_mode: self.mode,
        }
    }
}

fn main() -> Result<ExitCode, Box<dyn Error>> {
    let cli = Cli::parse();

    if let Some(path) = logging::init_file_logger(cli.log_file.as_deref(), cli.verbose) {
        info!("toeic-master {} logging to {}", env!("CARGO_PKG_VERSION"), path.display());
    }

    let store = FileConfigStore::new();
    let config = store.load().with_overrides(cli.overrides());
    if cli.save {
        store.save(&config)?;
        info!("saved defaults to {}", store.path().display());
    }

    if cli.check {
        let report = if cli.demo {
            CheckReport::new(demo::demo_words(), demo::demo_quiz())
        } else {
            CheckReport::new(
                load_dataset(&config.words_path),
                load_dataset(&config.quiz_path),
            )
        };
        println!("{}", report.render());
        if !report.is_ok() {
            warn!("data check failed");
            return Ok(ExitCode::FAILURE);
        }
        return Ok(ExitCode::SUCCESS);
    }

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let mut app = if cli.demo {
        App::demo(config.start_mode)
    } else {
        App::from_config(&config)
    };

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen,)?;
    terminal.show_cursor()?;

    result?;
    info!("bye");
    Ok(ExitCode::SUCCESS)
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let size = terminal.size()?;
    app.on_resize(size.width, size.height);

    let events = EventStream::terminal(Duration::from_millis(TICK_RATE_MS));
    terminal.draw(|f| ui(app, f))?;

    loop {
        match events.next() {
            DrillEvent::Tick => {
                // one more frame after the last tick clears the balloons
                if app.celebration.is_active {
                    app.on_tick();
                    terminal.draw(|f| ui(app, f))?;
                }
            }
            DrillEvent::Resize(width, height) => {
                app.on_resize(width, height);
                terminal.draw(|f| ui(app, f))?;
            }
            DrillEvent::Input(input) => {
                if app.on_input(input) == Control::Quit {
                    break;
                }
                terminal.draw(|f| ui(app, f))?;
            }
        }
    }

    Ok(())
}

fn ui(app: &App, f: &mut Frame) {
    f.render_widget(app, f.area());
}
