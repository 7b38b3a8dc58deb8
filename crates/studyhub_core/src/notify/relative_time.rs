//! Human-readable relative time phrases.

pub(crate) fn pluralize(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("{count} {unit}")
    } else {
        format!("{count} {unit}s")
    }
}

/// Phrase for a reminder `minutes` away from now (negative = past).
pub(crate) fn describe_minutes(minutes: i64) -> String {
    if minutes == 0 {
        "now".to_string()
    } else if minutes < 0 {
        format!("{} ago", pluralize(-minutes, "minute"))
    } else if minutes < 60 {
        format!("in {}", pluralize(minutes, "minute"))
    } else {
        format!("in {}", pluralize(minutes / 60, "hour"))
    }
}

/// Phrase for a due date `days` ahead of today.
pub(crate) fn describe_days(days: i64) -> String {
    match days {
        0 => "today".to_string(),
        1 => "tomorrow".to_string(),
        n => format!("in {}", pluralize(n, "day")),
    }
}
