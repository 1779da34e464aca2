/// Formats whole seconds as `MM:SS`. Minutes are not wrapped into hours.
pub fn format_clock(secs: u64) -> String {
    let minutes = secs / 60;
    let seconds = secs % 60;
    format!("{minutes:02}:{seconds:02}")
}

pub fn format_optional_clock(secs: Option<u64>) -> String {
    match secs {
        Some(s) => format_clock(s),
        None => "--:--".to_string(),
    }
}
