use std::f64::consts::PI;

use ratatui::layout::Rect;

/// Offset of a seat from the centre of the table. Seat 0 sits at the top and
/// the rest follow clockwise on screen (y grows downward).
pub fn seat_position(index: usize, total: usize, radius: f64) -> (f64, f64) {
    seat_position_elliptic(index, total, radius, radius)
}

pub fn seat_position_elliptic(index: usize, total: usize, rx: f64, ry: f64) -> (f64, f64) {
    if total == 0 {
        return (0.0, 0.0);
    }
    let step = 2.0 * PI / total as f64;
    let angle = index as f64 * step - PI / 2.0;
    (rx * angle.cos(), ry * angle.sin())
}

/// Places a `card_width` x `card_height` card for each seat around the
/// middle of `area`. Cards are clipped to `area` when the terminal is small.
pub fn seat_rects(area: Rect, total: usize, card_width: u16, card_height: u16) -> Vec<Rect> {
    let cx = f64::from(area.x) + f64::from(area.width) / 2.0;
    let cy = f64::from(area.y) + f64::from(area.height) / 2.0;
    let rx = (f64::from(area.width) - f64::from(card_width)).max(0.0) / 2.0;
    let ry = (f64::from(area.height) - f64::from(card_height)).max(0.0) / 2.0;

    (0..total)
        .map(|index| {
            let (dx, dy) = seat_position_elliptic(index, total, rx, ry);
            let left = (cx + dx - f64::from(card_width) / 2.0).round().max(0.0) as u16;
            let top = (cy + dy - f64::from(card_height) / 2.0).round().max(0.0) as u16;
            Rect::new(left, top, card_width, card_height).intersection(area)
        })
        .collect()
}
