use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Cell, Row, Table, Widget},
};

use crate::{
    app::App,
    util::{format_clock, format_optional_clock},
};

/// Per-player totals: live time, completed turns and mean turn length.
pub fn render_stats(app: &App, area: Rect, buf: &mut Buffer) {
    let session = &app.session;

    let header = Row::new(vec![
        Cell::from(""),
        Cell::from("Player"),
        Cell::from("Time"),
        Cell::from("Turns"),
        Cell::from("Avg turn"),
    ])
    .style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = session
        .players()
        .iter()
        .enumerate()
        .map(|(index, player)| {
            let dot = Style::default().fg(Color::from(player.color));
            let row = Row::new(vec![
                Cell::from("●").style(dot),
                Cell::from(player.name.clone()),
                Cell::from(format_clock(session.live_secs(index))),
                Cell::from(player.turn_count().to_string()),
                Cell::from(format_optional_clock(player.average_turn_secs())),
            ]);
            if index == session.active_index() {
                row.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                row
            }
        })
        .collect();

    let table = Table::new(
        rows,
        &[
            Constraint::Length(2),
            Constraint::Min(10),
            Constraint::Length(8),
            Constraint::Length(6),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Player Stats "),
    );

    Widget::render(table, area, buf);
}
