use chrono::{DateTime, NaiveDateTime};

fn parse_local(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M"))
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(value).ok().map(|dt| dt.naive_local()))
}

/// "2024-02-20T10:30:00" -> "10:30"
pub fn format_time(value: &str) -> String {
    parse_local(value)
        .map(|dt| dt.format("%H:%M").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// "2024-02-20T10:30:00" -> "Feb 20"
pub fn format_date(value: &str) -> String {
    parse_local(value)
        .map(|dt| dt.format("%b %-d").to_string())
        .unwrap_or_else(|| value.to_string())
}

/// "USD", "450.75" -> "USD 450.75"
pub fn format_money(currency: &str, amount: &str) -> String {
    format!("{} {}", currency, amount)
}

/// Numeric amount with a fixed number of decimals; `None` for NaN or infinity.
/// Halves round away from zero.
pub fn format_amount(currency: &str, amount: f64, decimals: u32) -> Option<String> {
    if !amount.is_finite() {
        return None;
    }
    let scale = 10f64.powi(decimals as i32);
    let rounded = (amount * scale).round() / scale;
    Some(format!("{} {:.*}", currency, decimals as usize, rounded))
}
