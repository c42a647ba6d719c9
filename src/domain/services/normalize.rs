use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, TimeZone, Utc};
use chrono_tz::Tz;

use crate::error::AppError;

/// Durations the scheduling provider accepts for `lengthInMinutes`, ascending.
pub const ALLOWED_DURATIONS: [u32; 21] = [
    5, 10, 15, 20, 25, 30, 40, 45, 50, 60, 75, 80, 90, 120, 150, 180, 240, 300, 360, 420, 480,
];

/// Formats a US phone number as E.164. Anything that is not 10 digits, or 11 digits
/// starting with `1`, is dropped and the booking goes out without a phone.
pub fn format_phone_number(phone: Option<&str>) -> Option<String> {
    let digits: String = phone?.chars().filter(char::is_ascii_digit).collect();
    match digits.len() {
        10 => Some(format!("+1{}", digits)),
        11 if digits.starts_with('1') => Some(format!("+{}", digits)),
        _ => None,
    }
}

/// Closest allowed duration. Ties keep the lower value.
pub fn nearest_allowed_duration(requested: f64) -> u32 {
    let mut best = ALLOWED_DURATIONS[0];
    for candidate in ALLOWED_DURATIONS {
        if (f64::from(candidate) - requested).abs() < (f64::from(best) - requested).abs() {
            best = candidate;
        }
    }
    best
}

pub fn parse_local_date(date: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::Validation(format!("Invalid date format (YYYY-MM-DD): {}", date)))
}

fn parse_local_time(time: &str) -> Result<NaiveTime, AppError> {
    let time = time.trim();
    NaiveTime::parse_from_str(time, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M:%S"))
        .map_err(|_| AppError::Validation(format!("Invalid time format (HH:MM): {}", time)))
}

/// Interprets a calendar date and wall-clock time in the fleet timezone.
///
/// During the autumn DST overlap the earlier of the two instants is used; a time
/// inside the spring-forward gap does not exist and is rejected.
pub fn local_to_utc(date: &str, time: &str, tz: Tz) -> Result<DateTime<Utc>, AppError> {
    let naive = parse_local_date(date)?.and_time(parse_local_time(time)?);
    tz.from_local_datetime(&naive)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .ok_or_else(|| AppError::Validation("Invalid local time (skipped due to DST)".into()))
}

/// Canonical wire form of an instant: `2025-06-01T19:30:00Z`, fractional seconds only when non-zero.
pub fn to_utc_iso(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// US-dollar display amount, e.g. `$1,234.50`.
pub fn format_usd(amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let dollars = (cents / 100).to_string();
    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (i, ch) in dollars.chars().enumerate() {
        if i > 0 && (dollars.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!("{}${}.{:02}", sign, grouped, cents % 100)
}
