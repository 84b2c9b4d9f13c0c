use base64::{engine::general_purpose::STANDARD, Engine as _};
use flipdeck_core::DeckError;
use log::{debug, warn};
use std::io::{stdout, IsTerminal, Stdout, Write};

pub trait Clipboard {
    fn copy(&mut self, text: &str) -> Result<(), DeckError>;
}

/// Copies through the terminal with an OSC 52 escape sequence, which works
/// over SSH and inside most modern terminal emulators.
pub struct Osc52Clipboard<W: Write> {
    out: W,
    is_terminal: bool,
}

impl Osc52Clipboard<Stdout> {
    pub fn stdout() -> Self {
        let out = stdout();
        let is_terminal = out.is_terminal();
        Self { out, is_terminal }
    }
}

impl<W: Write> Osc52Clipboard<W> {
    pub fn new(out: W, is_terminal: bool) -> Self {
        Self { out, is_terminal }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

pub fn osc52_sequence(text: &str) -> String {
    format!("\x1b]52;c;{}\x07", STANDARD.encode(text))
}

impl<W: Write> Clipboard for Osc52Clipboard<W> {
    fn copy(&mut self, text: &str) -> Result<(), DeckError> {
        if !self.is_terminal {
            debug!("event=clipboard_copy status=unavailable reason=not_a_terminal");
            return Err(DeckError::ClipboardUnavailable);
        }
        self.out
            .write_all(osc52_sequence(text).as_bytes())
            .and_then(|_| self.out.flush())
            .map_err(|err| {
                warn!("event=clipboard_copy status=error error={err}");
                DeckError::ClipboardUnavailable
            })?;
        debug!("event=clipboard_copy status=ok bytes={}", text.len());
        Ok(())
    }
}
