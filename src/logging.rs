use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use crate::app_dirs::AppDirs;

pub fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Send `log` output to a file; the terminal belongs to the UI.
/// Returns the log path when a logger was installed. Failing to open the
/// file leaves logging disabled.
pub fn init_file_logger(path: Option<&Path>, verbose: bool) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).or_else(AppDirs::log_path)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).ok()?;
        }
    }

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let log_file = File::create(&path).ok()?;
    WriteLogger::init(level_for(verbose), log_config, log_file).ok()?;
    Some(path)
}
