use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static DURATION_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?").expect("duration pattern is valid"));

/// Hours and minutes of an ISO-8601 `PT#H#M` duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FlightDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl FlightDuration {
    pub fn total_minutes(&self) -> u64 {
        u64::from(self.hours) * 60 + u64::from(self.minutes)
    }
}

/// Parse a `PT[<h>H][<m>M]` token.
///
/// Returns `None` when the token does not start with `PT` or a number does
/// not fit. Missing parts count as zero and anything after the minutes part
/// (seconds, for instance) is ignored.
pub fn parse_duration(token: &str) -> Option<FlightDuration> {
    let caps = DURATION_TOKEN.captures(token)?;

    let part = |idx: usize| -> Option<u32> {
        match caps.get(idx) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };

    Some(FlightDuration {
        hours: part(1)?,
        minutes: part(2)?,
    })
}

/// "PT13H35M" -> "13h 35m". Tokens that do not parse are returned as-is.
pub fn format_duration(token: &str) -> String {
    let Some(caps) = DURATION_TOKEN.captures(token) else {
        return token.to_string();
    };

    let hours = caps.get(1).map(|h| format!("{}h", h.as_str())).unwrap_or_default();
    let minutes = caps.get(2).map(|m| format!(" {}m", m.as_str())).unwrap_or_default();

    format!("{}{}", hours, minutes).trim().to_string()
}
