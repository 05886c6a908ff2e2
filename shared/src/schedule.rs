//! Day and time display helpers for opening hours

/// Weekday names indexed by `day_of_week` (0 = Sunday)
pub const DAY_NAMES: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

/// Display name for a weekday, `None` outside 0..=6.
pub fn day_name(day_of_week: u8) -> Option<&'static str> {
    DAY_NAMES.get(usize::from(day_of_week)).copied()
}

/// Trim a stored `HH:MM:SS` time to `HH:MM`.
///
/// Not a parser: anything is cut to its first five characters, and shorter
/// input comes back unchanged. Absent time renders as an empty string.
pub fn format_time(time: Option<&str>) -> String {
    match time {
        Some(t) => t.chars().take(5).collect(),
        None => String::new(),
    }
}
