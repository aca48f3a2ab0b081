use chrono::{DateTime, Utc};

pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&chrono::Local)
        .format("%Y-%m-%d %H:%M")
        .to_string()
}

pub fn format_age(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(ts).num_seconds().max(0);

    match seconds {
        0..=59 => "just now".to_string(),
        60..=3599 => format!("{}m ago", seconds / 60),
        3600..=86_399 => format!("{}h ago", seconds / 3600),
        _ => format!("{}d ago", seconds / 86_400),
    }
}
