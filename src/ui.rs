pub mod board;
pub mod stats;

use itertools::Itertools;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};
use unicode_width::UnicodeWidthChar;

use crate::{
    app::{App, InputMode},
    roster::PlayerColor,
    util::format_clock,
};

const STATS_SIDE_BY_SIDE_MIN_WIDTH: u16 = 100;
const STATS_PANEL_WIDTH: u16 = 46;

impl From<PlayerColor> for Color {
    fn from(c: PlayerColor) -> Self {
        Color::Rgb(c.r, c.g, c.b)
    }
}

/// Cuts `s` down to at most `max_width` terminal columns.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut width = 0;
    s.chars()
        .take_while(|c| {
            width += c.width().unwrap_or(0);
            width <= max_width
        })
        .collect()
}

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let players = self.session.players().len() as u16;

        let outer = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4), // header
                Constraint::Min(0),    // board (+ stats when wide)
                Constraint::Length(1), // status / rename prompt
                Constraint::Length(1), // legend
            ])
            .split(area);

        render_header(self, outer[0], buf);

        if area.width >= STATS_SIDE_BY_SIDE_MIN_WIDTH {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Min(0), Constraint::Length(STATS_PANEL_WIDTH)])
                .split(outer[1]);
            board::render_board(self, body[0], buf);
            stats::render_stats(self, body[1], buf);
        } else {
            let body = Layout::default()
                .direction(Direction::Vertical)
                .constraints([Constraint::Min(0), Constraint::Length(players + 3)])
                .split(outer[1]);
            board::render_board(self, body[0], buf);
            stats::render_stats(self, body[1], buf);
        }

        render_status(self, outer[2], buf);
        render_legend(self, outer[3], buf);
    }
}

fn render_header(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let bold_style = Style::default().add_modifier(Modifier::BOLD);

    let (state_label, state_style) = if session.is_running() {
        ("▶ RUNNING", bold_style.fg(Color::Green))
    } else {
        ("❚❚ PAUSED", bold_style.fg(Color::Yellow))
    };

    let mut spans = vec![
        Span::styled(state_label, state_style),
        Span::raw("   "),
        Span::raw("Total Game Time: "),
        Span::styled(format_clock(session.total_secs()), bold_style),
        Span::raw("   "),
        Span::raw("Rotation: "),
        Span::styled(
            session.rotation_mode().to_string(),
            bold_style.fg(Color::Cyan),
        ),
    ];
    if let Some(started) = app.started_at {
        spans.push(Span::raw("   "));
        spans.push(Span::styled(
            format!("started {}", started.format("%H:%M")),
            Style::default().add_modifier(Modifier::DIM),
        ));
    }

    let header = Paragraph::new(vec![
        Line::from(Span::styled("Board Game Turn Timer", bold_style)),
        Line::from(spans),
    ])
    .block(Block::default().borders(Borders::BOTTOM))
    .alignment(Alignment::Center);

    header.render(area, buf);
}

fn render_status(app: &App, area: Rect, buf: &mut Buffer) {
    let line = match (&app.input_mode, &app.status) {
        (InputMode::Renaming { buffer, .. }, _) => Line::from(vec![
            Span::styled("Rename: ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("{buffer}_"),
                Style::default().add_modifier(Modifier::UNDERLINED),
            ),
            Span::styled(
                "   (enter) save (esc) cancel",
                Style::default().add_modifier(Modifier::ITALIC),
            ),
        ]),
        (InputMode::Normal, Some(msg)) => Line::from(Span::styled(
            msg.as_str(),
            Style::default().fg(Color::Yellow),
        )),
        (InputMode::Normal, None) => Line::default(),
    };
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .render(area, buf);
}

fn legend_hints(app: &App) -> Vec<String> {
    let session = &app.session;
    let mut hints = vec![if session.is_running() {
        "(space) pause".to_string()
    } else {
        "(space) start".to_string()
    }];
    if session.rotation_mode().is_manual() {
        hints.push(format!("(1-{}/enter) select", session.players().len()));
    } else {
        hints.push("(n)ext turn".to_string());
    }
    if session.can_add_player() {
        hints.push("(a)dd".to_string());
    }
    if session.can_remove_player() {
        hints.push("(d)rop".to_string());
    }
    hints.extend(
        ["(e)dit name", "(m)ode", "(r)eset", "(s)ave setup", "(q)uit"].map(String::from),
    );
    hints
}

fn render_legend(app: &App, area: Rect, buf: &mut Buffer) {
    let text = legend_hints(app).iter().join(" / ");
    Paragraph::new(Span::styled(
        text,
        Style::default().add_modifier(Modifier::ITALIC),
    ))
    .alignment(Alignment::Center)
    .render(area, buf);
}
