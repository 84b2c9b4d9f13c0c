use anyhow::{Context, Result};
use env_logger::{Builder, Target};
use log::info;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;

pub enum LogTarget {
    Stderr,
    /// Appends to a file; used while the TUI owns the terminal.
    File(PathBuf),
}

pub fn init_logging(filter: &str, target: LogTarget) -> Result<()> {
    let mut builder = Builder::new();
    builder.parse_filters(filter).format_timestamp_millis();

    let destination = match target {
        LogTarget::Stderr => {
            builder.target(Target::Stderr);
            "stderr".to_string()
        }
        LogTarget::File(path) => {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating log directory {}", parent.display()))?;
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(&path)
                .with_context(|| format!("opening log file {}", path.display()))?;
            builder.target(Target::Pipe(Box::new(file)));
            path.display().to_string()
        }
    };

    builder.try_init().context("installing logger")?;
    info!(
        "event=app_start status=ok version={} filter={filter} target={destination}",
        env!("CARGO_PKG_VERSION")
    );
    Ok(())
}
