use crate::card_count;
use crate::clipboard::Clipboard;
use crate::tui::{
    form::CardForm,
    inputs::{map_event, Action, Screen},
    views,
};
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use flipdeck_core::{DeckError, DeckManager, Outcome};
use log::warn;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stdout, Stdout};
use std::sync::mpsc::{channel, Receiver};

pub enum Mode {
    Browse,
    AddCard(CardForm),
    Export { text: String, scroll: u16 },
    Import { path: String },
    ConfirmReset,
}

impl Mode {
    pub fn screen(&self) -> Screen {
        match self {
            Mode::Browse => Screen::Browse,
            Mode::AddCard(_) => Screen::AddCard,
            Mode::Export { .. } => Screen::Export,
            Mode::Import { .. } => Screen::Import,
            Mode::ConfirmReset => Screen::ConfirmReset,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Info(String),
    Error(String),
}

pub struct TuiApp {
    deck: DeckManager,
    changes: Receiver<Outcome>,
    clipboard: Box<dyn Clipboard>,
    mode: Mode,
    notice: Option<Notice>,
    quit: bool,
}

impl TuiApp {
    pub fn new(mut deck: DeckManager, clipboard: Box<dyn Clipboard>) -> Self {
        let (tx, changes) = channel();
        deck.subscribe(move |_, outcome| {
            let _ = tx.send(outcome.clone());
        });
        Self { deck, changes, clipboard, mode: Mode::Browse, notice: None, quit: false }
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn deck(&self) -> &DeckManager {
        &self.deck
    }

    pub fn run(&mut self) -> anyhow::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let res = self.mainloop(&mut terminal);

        disable_raw_mode().ok();
        let mut out: Stdout = std::io::stdout();
        execute!(out, LeaveAlternateScreen).ok();
        terminal.show_cursor().ok();

        res
    }

    fn mainloop(&mut self, terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> anyhow::Result<()> {
        let mut dirty = true;
        while !self.quit {
            if dirty {
                terminal.draw(|f| {
                    let area = f.size();
                    views::draw_ui(f, area, self.deck.state(), &self.mode, self.notice.as_ref())
                })?;
                dirty = false;
            }

            let ev = event::read()?;
            if let Event::Resize(..) = ev {
                dirty = true;
                continue;
            }
            let action = map_event(ev, self.mode.screen());
            if action == Action::None {
                continue;
            }
            let ui_changed = self.handle(action);
            // Deck changes arrive through the subscription; UI-only changes
            // (typing, scrolling, mode switches) are reported by `handle`.
            let deck_changed = self.drain_changes();
            dirty = ui_changed || deck_changed;
        }
        Ok(())
    }

    /// Applies one key action. Returns true when something outside the deck
    /// state (mode, draft text, notice) changed.
    pub fn handle(&mut self, action: Action) -> bool {
        let had_notice = self.notice.take().is_some();
        let mode = std::mem::replace(&mut self.mode, Mode::Browse);
        let (mode, changed) = match mode {
            Mode::Browse => self.handle_browse(action),
            Mode::AddCard(form) => self.handle_add(form, action),
            Mode::Export { text, scroll } => self.handle_export(text, scroll, action),
            Mode::Import { path } => self.handle_import(path, action),
            Mode::ConfirmReset => self.handle_confirm(action),
        };
        self.mode = mode;
        changed || had_notice || self.notice.is_some()
    }

    fn handle_browse(&mut self, action: Action) -> (Mode, bool) {
        match action {
            Action::Quit => {
                self.quit = true;
                (Mode::Browse, false)
            }
            Action::Prev => {
                let res = self.deck.previous();
                self.report(res);
                (Mode::Browse, false)
            }
            Action::Next => {
                let res = self.deck.next();
                self.report(res);
                (Mode::Browse, false)
            }
            Action::Flip => {
                let res = self.deck.flip();
                self.report(res);
                (Mode::Browse, false)
            }
            Action::Delete => {
                // Disabled while a single card remains.
                if self.deck.state().can_delete() {
                    let res = self.deck.delete_card();
                    self.report(res);
                }
                (Mode::Browse, false)
            }
            Action::Shuffle => {
                let res = self.deck.shuffle_cards();
                self.report(res);
                (Mode::Browse, false)
            }
            Action::OpenAdd => (Mode::AddCard(CardForm::default()), true),
            Action::OpenExport => match self.deck.export_cards() {
                Ok(text) => (Mode::Export { text, scroll: 0 }, true),
                Err(err) => {
                    self.fail(err);
                    (Mode::Browse, true)
                }
            },
            Action::OpenImport => (Mode::Import { path: String::new() }, true),
            Action::AskReset => (Mode::ConfirmReset, true),
            _ => (Mode::Browse, false),
        }
    }

    fn handle_add(&mut self, mut form: CardForm, action: Action) -> (Mode, bool) {
        match action {
            Action::Cancel => return (Mode::Browse, true),
            Action::Insert(c) => form.insert(c),
            Action::Newline => form.newline(),
            Action::Backspace => form.backspace(),
            Action::SwitchField => form.switch_field(),
            Action::Save => match self.deck.add_card(&form.front, &form.back) {
                Ok(Outcome::Rejected(reason)) => {
                    self.notice = Some(Notice::Error(reason.message().to_string()));
                }
                Ok(_) => return (Mode::Browse, true),
                Err(err) => {
                    self.fail(err);
                    return (Mode::Browse, true);
                }
            },
            _ => return (Mode::AddCard(form), false),
        }
        (Mode::AddCard(form), true)
    }

    fn handle_export(&mut self, text: String, scroll: u16, action: Action) -> (Mode, bool) {
        match action {
            Action::Cancel => (Mode::Browse, true),
            Action::Copy => {
                match self.clipboard.copy(&text) {
                    Ok(()) => self.notice = Some(Notice::Info("Copied to clipboard".into())),
                    Err(err) => self.fail(err),
                }
                (Mode::Export { text, scroll }, true)
            }
            Action::ScrollUp => (Mode::Export { text, scroll: scroll.saturating_sub(1) }, true),
            Action::ScrollDown => {
                let last = text.lines().count().saturating_sub(1);
                let max = u16::try_from(last).unwrap_or(u16::MAX);
                (Mode::Export { text, scroll: scroll.saturating_add(1).min(max) }, true)
            }
            _ => (Mode::Export { text, scroll }, false),
        }
    }

    fn handle_import(&mut self, mut path: String, action: Action) -> (Mode, bool) {
        match action {
            Action::Cancel => (Mode::Browse, true),
            Action::Insert(c) => {
                path.push(c);
                (Mode::Import { path }, true)
            }
            Action::Backspace => {
                path.pop();
                (Mode::Import { path }, true)
            }
            Action::Submit => {
                let target = path.trim();
                if target.is_empty() {
                    return (Mode::Import { path }, false);
                }
                match std::fs::read_to_string(target) {
                    Ok(raw) => {
                        if let Err(err) = self.deck.import_cards(&raw) {
                            self.fail(err);
                        }
                    }
                    Err(err) => {
                        warn!("event=import_read path={target} status=error error={err}");
                        self.notice = Some(Notice::Error(format!("Could not read {target}: {err}")));
                    }
                }
                (Mode::Browse, true)
            }
            _ => (Mode::Import { path }, false),
        }
    }

    fn handle_confirm(&mut self, action: Action) -> (Mode, bool) {
        match action {
            Action::Confirm => {
                let res = self.deck.reset_cards(true);
                self.report(res);
                (Mode::Browse, true)
            }
            Action::Cancel => (Mode::Browse, true),
            _ => (Mode::ConfirmReset, false),
        }
    }

    /// Turns queued deck notifications into a notice; true if any arrived.
    ///
    /// An error raised by the same keypress (a failed store write arrives
    /// after its change notification) stays on screen.
    pub fn drain_changes(&mut self) -> bool {
        let mut any = false;
        while let Ok(outcome) = self.changes.try_recv() {
            any = true;
            let len = self.deck.state().len();
            let msg = match outcome {
                Outcome::Added => Some(format!("Card added ({})", card_count(len))),
                Outcome::Deleted => Some(format!("Card deleted ({})", card_count(len))),
                Outcome::Shuffled => Some(format!("Shuffled {}", card_count(len))),
                Outcome::Reset => Some("Deck reset to the default cards".to_string()),
                Outcome::Imported { count } => Some(format!("Imported {}", card_count(count))),
                _ => None,
            };
            if matches!(self.notice, Some(Notice::Error(_))) {
                continue;
            }
            if let Some(msg) = msg {
                self.notice = Some(Notice::Info(msg));
            }
        }
        any
    }

    fn report(&mut self, res: Result<Outcome, DeckError>) {
        if let Err(err) = res {
            self.fail(err);
        }
    }

    fn fail(&mut self, err: DeckError) {
        let msg = match &err {
            DeckError::Parse(_) | DeckError::InvalidFormat | DeckError::NoValidCards => {
                format!("Import failed: {err}")
            }
            DeckError::Storage(_) => format!("Change not saved: {err}"),
            _ => err.to_string(),
        };
        self.notice = Some(Notice::Error(msg));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flipdeck_core::{default_cards, Card, KeyValueStore, MemoryStore};
    use std::cell::RefCell;
    use std::rc::Rc;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct FakeClipboard {
        copied: Rc<RefCell<Vec<String>>>,
        broken: bool,
    }

    impl Clipboard for FakeClipboard {
        fn copy(&mut self, text: &str) -> Result<(), DeckError> {
            if self.broken {
                return Err(DeckError::ClipboardUnavailable);
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    struct FullStore;

    impl KeyValueStore for FullStore {
        fn get(&self, _key: &str) -> Result<Option<String>, DeckError> {
            Ok(None)
        }
        fn set(&self, _key: &str, _value: &str) -> Result<(), DeckError> {
            Err(DeckError::Storage("quota"))
        }
    }

    fn app_with(clipboard: FakeClipboard) -> TuiApp {
        let store: Arc<dyn KeyValueStore> = Arc::new(MemoryStore::new());
        TuiApp::new(DeckManager::open(store).unwrap(), Box::new(clipboard))
    }

    fn press(app: &mut TuiApp, actions: &[Action]) {
        for a in actions {
            app.handle(*a);
            app.drain_changes();
        }
    }

    #[test]
    fn add_form_takes_space_as_text_and_saves() {
        let mut app = app_with(FakeClipboard::default());
        press(
            &mut app,
            &[
                Action::OpenAdd,
                Action::Insert('a'),
                Action::Insert(' '),
                Action::Insert('b'),
                Action::SwitchField,
                Action::Insert('c'),
                Action::Save,
            ],
        );
        let state = app.deck().state();
        assert!(matches!(app.mode(), Mode::Browse));
        assert_eq!(state.cards.last(), Some(&Card::new("a b", "c")));
        assert!(!state.flipped);
        assert_eq!(app.notice(), Some(&Notice::Info("Card added (4 cards)".into())));
    }

    #[test]
    fn saving_incomplete_card_keeps_form_open() {
        let mut app = app_with(FakeClipboard::default());
        press(&mut app, &[Action::OpenAdd, Action::Insert('a'), Action::Save]);
        assert!(matches!(app.mode(), Mode::AddCard(_)));
        assert_eq!(app.deck().state().len(), 3);
        assert!(matches!(app.notice(), Some(Notice::Error(_))));
    }

    #[test]
    fn export_copy_reports_clipboard_failure() {
        let clipboard = FakeClipboard { broken: true, ..Default::default() };
        let mut app = app_with(clipboard);
        press(&mut app, &[Action::OpenExport, Action::Copy]);
        assert!(matches!(app.mode(), Mode::Export { .. }));
        assert_eq!(
            app.notice(),
            Some(&Notice::Error(DeckError::ClipboardUnavailable.to_string()))
        );
    }

    #[test]
    fn export_copy_places_json_on_clipboard() {
        let clipboard = FakeClipboard::default();
        let copied = clipboard.copied.clone();
        let mut app = app_with(clipboard);
        press(&mut app, &[Action::OpenExport, Action::Copy, Action::Cancel]);
        let copied = copied.borrow();
        let cards: Vec<Card> = serde_json::from_str(&copied[0]).unwrap();
        assert_eq!(cards, default_cards());
        assert!(matches!(app.mode(), Mode::Browse));
    }

    #[test]
    fn reset_needs_confirmation() {
        let mut app = app_with(FakeClipboard::default());
        press(&mut app, &[Action::Delete, Action::AskReset, Action::Cancel]);
        assert_eq!(app.deck().state().len(), 2);
        press(&mut app, &[Action::AskReset, Action::Confirm]);
        assert_eq!(app.deck().state().cards, default_cards());
    }

    #[test]
    fn delete_is_disabled_on_last_card() {
        let mut app = app_with(FakeClipboard::default());
        press(&mut app, &[Action::Delete, Action::Delete, Action::Delete]);
        assert_eq!(app.deck().state().len(), 1);
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn import_from_file_replaces_deck() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, r#"[{"front":"x","back":"y"},{"front":""}]"#).unwrap();

        let mut app = app_with(FakeClipboard::default());
        press(&mut app, &[Action::OpenImport]);
        for c in path.to_string_lossy().chars() {
            app.handle(Action::Insert(c));
        }
        press(&mut app, &[Action::Submit]);
        assert_eq!(app.deck().state().cards, vec![Card::new("x", "y")]);
        assert_eq!(app.notice(), Some(&Notice::Info("Imported 1 card".into())));
    }

    #[test]
    fn bad_import_leaves_deck_alone() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.json");
        std::fs::write(&path, "not json").unwrap();

        let mut app = app_with(FakeClipboard::default());
        press(&mut app, &[Action::Next, Action::OpenImport]);
        for c in path.to_string_lossy().chars() {
            app.handle(Action::Insert(c));
        }
        press(&mut app, &[Action::Submit]);
        assert_eq!(app.deck().state().cards, default_cards());
        assert_eq!(app.deck().state().current, 1);
        assert!(matches!(app.notice(), Some(Notice::Error(m)) if m.starts_with("Import failed")));
    }

    #[test]
    fn failed_store_write_stays_visible() {
        let store: Arc<dyn KeyValueStore> = Arc::new(FullStore);
        let deck = DeckManager::open(store).unwrap();
        let mut app = TuiApp::new(deck, Box::new(FakeClipboard::default()));
        let not_saved = Notice::Error(format!("Change not saved: {}", DeckError::Storage("quota")));

        press(
            &mut app,
            &[Action::OpenAdd, Action::Insert('a'), Action::SwitchField, Action::Insert('b'), Action::Save],
        );
        assert_eq!(app.deck().state().len(), 4);
        assert_eq!(app.notice(), Some(&not_saved));

        press(&mut app, &[Action::Shuffle]);
        assert_eq!(app.notice(), Some(&not_saved));

        // The next successful-looking keypress starts from a clean line.
        press(&mut app, &[Action::Flip]);
        assert_eq!(app.notice(), None);
    }

    #[test]
    fn long_exports_scroll_without_wrapping() {
        let mut app = app_with(FakeClipboard::default());
        app.mode = Mode::Export { text: "x\n".repeat(70_000), scroll: u16::MAX - 1 };
        press(&mut app, &[Action::ScrollDown, Action::ScrollDown]);
        assert!(matches!(app.mode(), Mode::Export { scroll: u16::MAX, .. }));
    }
}
