use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Widget},
};

use crate::{app::App, layout::seat_rects, ui::truncate_to_width, util::format_clock};

pub const CARD_WIDTH: u16 = 18;
pub const CARD_HEIGHT: u16 = 5;

/// Draws the table: one card per seat arranged on a circle, with the
/// direction of play in the middle.
pub fn render_board(app: &App, area: Rect, buf: &mut Buffer) {
    let block = Block::default().borders(Borders::ALL).title(" Table ");
    let inner = block.inner(area);
    block.render(area, buf);

    if inner.width == 0 || inner.height == 0 {
        return;
    }

    if let Some(arrow) = app.session.rotation_mode().arrow() {
        let centre = Rect::new(inner.x, inner.y + inner.height / 2, inner.width, 1);
        Paragraph::new(Line::from(vec![
            Span::styled(
                arrow,
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(" (n)", Style::default().add_modifier(Modifier::DIM)),
        ]))
        .alignment(Alignment::Center)
        .render(centre, buf);
    }

    let rects = seat_rects(inner, app.session.players().len(), CARD_WIDTH, CARD_HEIGHT);
    for (index, rect) in rects.into_iter().enumerate() {
        render_card(app, index, rect, buf);
    }
}

fn render_card(app: &App, index: usize, area: Rect, buf: &mut Buffer) {
    let session = &app.session;
    let Some(player) = session.players().get(index) else {
        return;
    };
    let is_active = index == session.active_index();
    let is_focused = index == app.focus;
    let color: Color = player.color.into();

    let mut border_style = Style::default().fg(color);
    if is_active {
        border_style = border_style.add_modifier(Modifier::BOLD);
    }
    let title = match (is_active, is_focused) {
        (true, true) => format!(" ▶{} ◂ ", index + 1),
        (true, false) => format!(" ▶{} ", index + 1),
        (false, true) => format!(" {} ◂ ", index + 1),
        (false, false) => format!(" {} ", index + 1),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(if is_active {
            BorderType::Thick
        } else {
            BorderType::Rounded
        })
        .border_style(border_style)
        .title(title);

    let name_width = usize::from(CARD_WIDTH.saturating_sub(2));
    let mut name_style = Style::default().add_modifier(Modifier::BOLD);
    if is_active {
        name_style = name_style.fg(color);
    }

    let detail = if is_active {
        format!("turn {}", format_clock(session.current_turn_secs()))
    } else {
        match player.turn_count() {
            1 => "1 turn".to_string(),
            n => format!("{n} turns"),
        }
    };

    let clock = format!("⏱ {}", format_clock(session.live_secs(index)));
    let lines = vec![
        Line::from(Span::styled(
            truncate_to_width(&player.name, name_width),
            name_style,
        )),
        Line::from(Span::raw(clock)),
        Line::from(Span::styled(
            detail,
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    Clear.render(area, buf);
    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .render(area, buf);
}
