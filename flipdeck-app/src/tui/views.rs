use crate::tui::app::{Mode, Notice};
use crate::tui::form::{CardForm, Field};
use crate::tui::theme::*;
use flipdeck_core::DeckState;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

pub fn draw_ui(f: &mut Frame, area: Rect, state: &DeckState, mode: &Mode, notice: Option<&Notice>) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Min(3),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(area);

    draw_header(f, chunks[0], state);
    match mode {
        Mode::Browse | Mode::ConfirmReset => draw_card(f, chunks[1], state),
        Mode::AddCard(form) => draw_form(f, chunks[1], form),
        Mode::Export { text, scroll } => draw_export(f, chunks[1], text, *scroll),
        Mode::Import { path } => draw_import(f, chunks[1], path),
    }
    if let Mode::ConfirmReset = mode {
        draw_confirm(f, chunks[1]);
    }
    draw_notice(f, chunks[2], notice);
    draw_footer(f, chunks[3], state, mode);
}

fn draw_header(f: &mut Frame, area: Rect, state: &DeckState) {
    let side = if state.flipped { "BACK" } else { "FRONT" };
    let line = Line::from(vec![
        Span::raw("FlipDeck").style(title_style()),
        Span::raw(format!("  card {}/{}  ", state.current + 1, state.len())),
        Span::raw(side).style(selected_style()),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_card(f: &mut Frame, area: Rect, state: &DeckState) {
    let title = if state.flipped { "Back" } else { "Front" };
    let text = Paragraph::new(state.visible_text())
        .wrap(Wrap { trim: false })
        .block(Block::default().title(title).borders(Borders::ALL));
    let text = if state.flipped { text.style(back_side_style()) } else { text };
    f.render_widget(text, area);
}

fn draw_form(f: &mut Frame, area: Rect, form: &CardForm) {
    let halves = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    draw_field(f, halves[0], "Front", &form.front, form.focus == Field::Front);
    draw_field(f, halves[1], "Back", &form.back, form.focus == Field::Back);
}

fn draw_field(f: &mut Frame, area: Rect, label: &str, value: &str, focused: bool) {
    let mut block = Block::default().title(label).borders(Borders::ALL);
    let mut text = value.to_string();
    if focused {
        block = block.border_style(selected_style());
        text.push('█');
    }
    let p = Paragraph::new(text).wrap(Wrap { trim: false }).block(block);
    f.render_widget(p, area);
}

fn draw_export(f: &mut Frame, area: Rect, text: &str, scroll: u16) {
    let p = Paragraph::new(text)
        .scroll((scroll, 0))
        .block(Block::default().title("Export (JSON)").borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_import(f: &mut Frame, area: Rect, path: &str) {
    let lines = vec![
        Line::from(Span::raw("Path to a JSON file with [{\"front\": …, \"back\": …}]:").style(hint_style())),
        Line::from(""),
        Line::from(format!("{path}█")),
        Line::from(""),
        Line::from(Span::raw("Importing replaces the whole deck.").style(warning_style())),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Import").borders(Borders::ALL));
    f.render_widget(p, area);
}

fn draw_confirm(f: &mut Frame, area: Rect) {
    let popup = centered(area, 50, 5);
    let lines = vec![
        Line::from(Span::raw("Reset to the default cards?").style(warning_style())),
        Line::from("Every card in the deck will be lost."),
        Line::from(Span::raw("y confirm   n cancel").style(hint_style())),
    ];
    let p = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Reset").borders(Borders::ALL));
    f.render_widget(Clear, popup);
    f.render_widget(p, popup);
}

fn draw_notice(f: &mut Frame, area: Rect, notice: Option<&Notice>) {
    let Some(notice) = notice else { return };
    let (text, style) = match notice {
        Notice::Info(t) => (t, info_style()),
        Notice::Error(t) => (t, error_style()),
    };
    f.render_widget(Paragraph::new(format!(" {text} ")).style(style), area);
}

fn draw_footer(f: &mut Frame, area: Rect, state: &DeckState, mode: &Mode) {
    let spans = match mode {
        Mode::Browse => {
            let delete = if state.can_delete() {
                Span::raw(" d delete ")
            } else {
                Span::raw(" d delete ").style(disabled_style())
            };
            vec![
                Span::raw(" ←/→ move "),
                Span::raw(" space flip "),
                Span::raw(" a add "),
                delete,
                Span::raw(" s shuffle "),
                Span::raw(" e export "),
                Span::raw(" i import "),
                Span::raw(" r reset "),
                Span::raw(" q quit "),
            ]
        }
        Mode::AddCard(_) => vec![
            Span::raw(" Tab switch field "),
            Span::raw(" Enter newline "),
            Span::raw(" Ctrl+S save "),
            Span::raw(" Esc cancel "),
        ],
        Mode::Export { .. } => vec![
            Span::raw(" ↑/k ↓/j scroll "),
            Span::raw(" c copy "),
            Span::raw(" Esc close "),
        ],
        Mode::Import { .. } => vec![Span::raw(" Enter import "), Span::raw(" Esc cancel ")],
        Mode::ConfirmReset => vec![Span::raw(" y confirm "), Span::raw(" n cancel ")],
    };
    f.render_widget(Paragraph::new(Line::from(spans)).style(footer_style()), area);
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
