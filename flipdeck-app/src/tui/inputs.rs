use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// Which key map applies; mirrors the variants of `app::Mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Browse,
    AddCard,
    Export,
    Import,
    ConfirmReset,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    Prev,
    Next,
    Flip,
    OpenAdd,
    Delete,
    Shuffle,
    OpenExport,
    OpenImport,
    AskReset,
    Confirm,
    Cancel,
    Copy,
    ScrollUp,
    ScrollDown,
    Insert(char),
    Newline,
    Backspace,
    SwitchField,
    Save,
    Submit,
    None,
}

pub fn map_event(ev: Event, screen: Screen) -> Action {
    let Event::Key(KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        ..
    }) = ev
    else {
        return Action::None;
    };

    match screen {
        Screen::Browse => match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Left => Action::Prev,
            KeyCode::Right => Action::Next,
            KeyCode::Char(' ') => Action::Flip,
            KeyCode::Char('a') => Action::OpenAdd,
            KeyCode::Char('d') => Action::Delete,
            KeyCode::Char('s') => Action::Shuffle,
            KeyCode::Char('e') => Action::OpenExport,
            KeyCode::Char('i') => Action::OpenImport,
            KeyCode::Char('r') => Action::AskReset,
            _ => Action::None,
        },
        // Every printable key is text here, Space included.
        Screen::AddCard => match (code, modifiers) {
            (KeyCode::Esc, _) => Action::Cancel,
            (KeyCode::Char('s'), KeyModifiers::CONTROL) => Action::Save,
            (KeyCode::Tab, _) | (KeyCode::BackTab, _) => Action::SwitchField,
            (KeyCode::Enter, _) => Action::Newline,
            (KeyCode::Backspace, _) => Action::Backspace,
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => Action::Insert(c),
            _ => Action::None,
        },
        Screen::Export => match code {
            KeyCode::Esc | KeyCode::Char('q') => Action::Cancel,
            KeyCode::Char('c') => Action::Copy,
            KeyCode::Up | KeyCode::Char('k') => Action::ScrollUp,
            KeyCode::Down | KeyCode::Char('j') => Action::ScrollDown,
            _ => Action::None,
        },
        Screen::Import => match (code, modifiers) {
            (KeyCode::Esc, _) => Action::Cancel,
            (KeyCode::Enter, _) => Action::Submit,
            (KeyCode::Backspace, _) => Action::Backspace,
            (KeyCode::Char(c), m) if !m.contains(KeyModifiers::CONTROL) => Action::Insert(c),
            _ => Action::None,
        },
        Screen::ConfirmReset => match code {
            KeyCode::Char('y') | KeyCode::Char('Y') => Action::Confirm,
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => Action::Cancel,
            _ => Action::None,
        },
    }
}
