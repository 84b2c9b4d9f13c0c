use ratatui::style::Stylize;
use ratatui::style::{Color, Style};

pub fn title_style() -> Style { Style::default().fg(Color::Cyan).bold() }
pub fn hint_style() -> Style { Style::default().fg(Color::DarkGray) }
pub fn selected_style() -> Style { Style::default().fg(Color::Yellow).bold() }
pub fn footer_style() -> Style { Style::default().fg(Color::Gray) }
pub fn disabled_style() -> Style { Style::default().fg(Color::DarkGray).crossed_out() }
pub fn back_side_style() -> Style { Style::default().fg(Color::Green) }
pub fn info_style() -> Style { Style::default().bg(Color::Green).fg(Color::Black) }
pub fn error_style() -> Style { Style::default().bg(Color::Red).fg(Color::White) }
pub fn warning_style() -> Style { Style::default().fg(Color::Red).bold() }
