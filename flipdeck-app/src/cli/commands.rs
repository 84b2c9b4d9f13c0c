use crate::card_count;
use crate::cli::csv_io::{read_csv, write_csv};
use crate::cli::opts::*;

use anyhow::{bail, Context, Result};
use flipdeck_core::{transfer, DeckManager, DeckState, KeyValueStore, MemoryStore, Outcome};
use flipdeck_json::paths::data_root;
use flipdeck_json::JsonFileStore;
use log::info;
use std::io::{stdin, stdout, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub fn resolve_data_dir(args: &Cli) -> PathBuf {
    args.data_dir.clone().unwrap_or_else(data_root)
}

pub fn open_store(args: &Cli, data_dir: &Path) -> Result<Arc<dyn KeyValueStore>> {
    match args.store {
        StoreKind::Json => {
            let s = JsonFileStore::open_in(data_dir, args.backups)
                .with_context(|| format!("opening deck store in {}", data_dir.display()))?;
            info!("event=store_select kind=json path={} backups={}", s.path().display(), args.backups);
            Ok(Arc::new(s))
        }
        StoreKind::Memory => {
            info!("event=store_select kind=memory");
            Ok(Arc::new(MemoryStore::new()))
        }
    }
}

pub fn run_cli(store: Arc<dyn KeyValueStore>, cmd: Command) -> Result<()> {
    let mut deck = DeckManager::open(store)?;
    match cmd {
        Command::Tui => bail!("the TUI is launched from main"),
        Command::Show { back } => {
            if back && !deck.state().flipped {
                deck.flip()?;
            }
            print_current(deck.state());
        }
        Command::List => {
            let state = deck.state();
            for (i, c) in state.cards.iter().enumerate() {
                let mark = if i == state.current { "*" } else { " " };
                println!("{mark}{}\t{}\t{}", i + 1, one_line(&c.front), one_line(&c.back));
            }
        }
        Command::Next => {
            deck.next()?;
            print_current(deck.state());
        }
        Command::Prev => {
            deck.previous()?;
            print_current(deck.state());
        }
        Command::Add(a) => {
            expect_applied(deck.add_card(&a.front, &a.back)?)?;
            println!("added ({})", card_count(deck.state().len()));
        }
        Command::Rm => {
            expect_applied(deck.delete_card()?)?;
            println!("deleted ({})", card_count(deck.state().len()));
        }
        Command::Shuffle => {
            deck.shuffle_cards()?;
            println!("shuffled {}", card_count(deck.state().len()));
        }
        Command::Reset { yes } => {
            let confirmed = yes
                || confirm("Replace the whole deck with the 3 default cards? This cannot be undone. [y/N] ")?;
            if !confirmed {
                println!("cancelled");
                return Ok(());
            }
            expect_applied(deck.reset_cards(true)?)?;
            println!("reset ({})", card_count(deck.state().len()));
        }
        Command::Export(e) => export_cmd(&mut deck, e)?,
        Command::Import(i) => import_cmd(&mut deck, i)?,
    }
    Ok(())
}

fn export_cmd(deck: &mut DeckManager, cmd: ExportCmd) -> Result<()> {
    let bytes = match cmd.format {
        Format::Json => {
            let mut text = deck.export_cards()?;
            text.push('\n');
            text.into_bytes()
        }
        Format::Csv => {
            let mut buf = Vec::new();
            write_csv(&deck.state().cards, &mut buf)?;
            buf
        }
    };
    match cmd.out {
        Some(path) => {
            std::fs::write(&path, bytes).with_context(|| format!("writing {}", path.display()))?;
            eprintln!("wrote {}", path.display());
        }
        None => {
            let mut out = stdout();
            out.write_all(&bytes)?;
            out.flush()?;
        }
    }
    Ok(())
}

fn import_cmd(deck: &mut DeckManager, cmd: ImportCmd) -> Result<()> {
    let raw = std::fs::read_to_string(&cmd.path)
        .with_context(|| format!("reading {}", cmd.path.display()))?;
    let format = cmd.format.unwrap_or_else(|| Format::from_path(&cmd.path));
    let count = match format {
        Format::Json => deck.import_cards(&raw)?,
        Format::Csv => {
            // Normalize to the JSON import contract so both formats share one path.
            let cards = read_csv(&raw)?;
            deck.import_cards(&transfer::export_json(&cards)?)?
        }
    };
    println!("imported {}", card_count(count));
    Ok(())
}

// ===== Helpers =====
fn expect_applied(outcome: Outcome) -> Result<()> {
    if let Outcome::Rejected(reason) = outcome {
        bail!("{}", reason.message());
    }
    Ok(())
}

fn print_current(state: &DeckState) {
    let side = if state.flipped { "back" } else { "front" };
    println!("[{}/{}] {side}", state.current + 1, state.len());
    println!("{}", state.visible_text());
}

fn one_line(s: &str) -> String {
    s.replace('\n', " / ")
}

fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt}");
    stdout().flush().ok();
    let mut s = String::new();
    stdin().read_line(&mut s)?;
    Ok(matches!(s.trim().to_lowercase().as_str(), "y" | "yes"))
}
