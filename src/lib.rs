// Library surface shared by the binary and the integration tests.
// The drill core (dataset, drill, session) never touches the terminal.
pub mod app;
pub mod app_dirs;
pub mod celebration;
pub mod check;
pub mod config;
pub mod dataset;
pub mod drill;
pub mod error;
pub mod logging;
pub mod runtime;
pub mod session;
pub mod ui;

pub use app::{App, Control, Mode};
