mod cli;
mod clipboard;
mod logging;
mod tui;

use anyhow::Result;
use clap::Parser; // needed for Cli::parse()

use cli::commands::{open_store, resolve_data_dir, run_cli};
use cli::opts::{Cli, Command};
use clipboard::Osc52Clipboard;
use flipdeck_core::DeckManager;
use flipdeck_json::paths::LOG_FILE;
use logging::{init_logging, LogTarget};
use tui::app::TuiApp;

/// "1 card", "3 cards".
pub(crate) fn card_count(n: usize) -> String {
    if n == 1 {
        "1 card".to_string()
    } else {
        format!("{n} cards")
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();
    let cmd = args.cmd.clone().unwrap_or(Command::Tui);
    let data_dir = resolve_data_dir(&args);

    // The TUI owns the terminal, so its log lines go to a file.
    let target = match cmd {
        Command::Tui => LogTarget::File(data_dir.join(LOG_FILE)),
        _ => LogTarget::Stderr,
    };
    if let Err(err) = init_logging(&args.log_level, target) {
        eprintln!("warning: logging disabled: {err:#}");
    }

    let store = open_store(&args, &data_dir)?;
    match cmd {
        Command::Tui => {
            let deck = DeckManager::open(store)?;
            let mut app = TuiApp::new(deck, Box::new(Osc52Clipboard::stdout()));
            app.run()
        }
        other => run_cli(store, other),
    }
}
