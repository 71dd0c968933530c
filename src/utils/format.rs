use chrono::{NaiveTime, Timelike};

pub const MINUTES_PER_DAY: u32 = 24 * 60;

/// Parse the leading `HH:MM` of a provider time string.
/// Trailing text such as `"05:12 (EET)"` is ignored. Returns `None` when the
/// prefix is missing or out of range.
pub fn parse_clock(raw: &str) -> Option<NaiveTime> {
    let bytes = raw.as_bytes();
    if bytes.len() < 5 || bytes[2] != b':' {
        return None;
    }
    let digits = [bytes[0], bytes[1], bytes[3], bytes[4]];
    if !digits.iter().all(u8::is_ascii_digit) {
        return None;
    }
    let hour = u32::from(digits[0] - b'0') * 10 + u32::from(digits[1] - b'0');
    let minute = u32::from(digits[2] - b'0') * 10 + u32::from(digits[3] - b'0');
    NaiveTime::from_hms_opt(hour, minute, 0)
}

/// Minutes since midnight, in `[0, 1440)`.
pub fn minutes_of_day(t: NaiveTime) -> u32 {
    t.hour() * 60 + t.minute()
}

/// Convert a 24-hour provider time into `"h:mm AM/PM"`.
///
/// Anything without a valid leading `HH:MM` comes back unchanged, so one bad
/// value from the provider never fails a whole response.
pub fn format_12h(raw: &str) -> String {
    let Some(t) = parse_clock(raw) else {
        return raw.to_string();
    };
    let period = if t.hour() < 12 { "AM" } else { "PM" };
    let hour = match t.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02} {}", hour, t.minute(), period)
}

/// Format a duration in minutes to "Xh Ym" or "Ym"
pub fn format_duration_mins(mins: u32) -> String {
    if mins == 0 {
        return "now".to_string();
    }
    let hours = mins / 60;
    let minutes = mins % 60;
    if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else {
        format!("{}m", minutes)
    }
}

/// Format a NaiveTime to "HH:MM"
pub fn format_time(t: NaiveTime) -> String {
    t.format("%H:%M").to_string()
}
