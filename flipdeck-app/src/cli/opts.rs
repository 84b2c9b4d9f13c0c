use clap::{Args, Parser, Subcommand, ValueEnum};
use flipdeck_json::DEFAULT_MAX_BACKUPS;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, ValueEnum)]
pub enum StoreKind {
    Json,
    Memory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    Json,
    Csv,
}

impl Format {
    /// `.csv` files are CSV, anything else is treated as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("csv") => Format::Csv,
            _ => Format::Json,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(name = "flipdeck", version, about = "FlipDeck flashcards (TUI + CLI)")]
pub struct Cli {
    /// Storage backend
    #[arg(long, value_enum, default_value_t = StoreKind::Json)]
    pub store: StoreKind,

    /// Directory for the deck file, its backups and the TUI log (defaults to app data dir)
    #[arg(long, env = "FLIPDECK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// Timestamped backups to keep next to the deck file (0 disables)
    #[arg(long, default_value_t = DEFAULT_MAX_BACKUPS)]
    pub backups: usize,

    /// Log filter, e.g. `info` or `flipdeck_core=debug`
    #[arg(long, env = "FLIPDECK_LOG", default_value = "warn")]
    pub log_level: String,

    /// Defaults to `tui`
    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Launch the terminal study view
    Tui,
    /// Print the current card
    Show {
        #[arg(long)]
        back: bool,
    },
    /// Print every card, marking the current one
    List,
    /// Move to the next card and print it
    Next,
    /// Move to the previous card and print it
    Prev,
    /// Append a card to the deck
    Add(CardAdd),
    /// Delete the current card
    Rm,
    /// Shuffle the deck and return to the first card
    Shuffle,
    /// Replace the deck with the built-in default cards
    Reset {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Export the deck
    Export(ExportCmd),
    /// Replace the deck with cards from a file
    Import(ImportCmd),
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    #[arg(long)]
    pub front: String,
    #[arg(long)]
    pub back: String,
}

#[derive(Debug, Args, Clone)]
pub struct ExportCmd {
    #[arg(long, value_enum, default_value_t = Format::Json)]
    pub format: Format,
    /// Write to this file instead of stdout
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
pub struct ImportCmd {
    pub path: PathBuf,
    /// Defaults to the file extension
    #[arg(long, value_enum)]
    pub format: Option<Format>,
}
