use chrono::{DateTime, Utc};

/// Format a weight measurement for the dashboard cards
pub fn format_weight(kg: Option<f64>) -> String {
    match kg {
        Some(kg) => format!("{:.1} kg", kg),
        None => "no data".to_string(),
    }
}

/// Format a height measurement for the dashboard cards
pub fn format_height(cm: Option<f64>) -> String {
    match cm {
        Some(cm) => format!("{:.1} cm", cm),
        None => "no data".to_string(),
    }
}

/// Format a timestamp as a short readable date
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.format("%b %d, %Y").to_string()
}
