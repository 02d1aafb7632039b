//! Parsing of human-readable lifetimes such as `30d` or `12h`.

use chrono::Duration;

use crate::error::AppError;

/// Parses a lifetime string into a [`Duration`].
///
/// Accepts a positive integer followed by an optional unit: `s`, `m`, `h`,
/// `d` or `w`. A bare number is interpreted as seconds.
pub fn parse_lifetime(input: &str) -> Result<Duration, AppError> {
    let trimmed = input.trim();
    let split = trimmed
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(trimmed.len());
    let (digits, unit) = trimmed.split_at(split);

    let amount: i64 = digits
        .parse()
        .map_err(|_| AppError::configuration(format!("Invalid lifetime '{input}'")))?;
    if amount <= 0 {
        return Err(AppError::configuration(format!(
            "Lifetime must be positive, got '{input}'"
        )));
    }

    let duration = match unit.trim() {
        "" | "s" => Duration::try_seconds(amount),
        "m" => Duration::try_minutes(amount),
        "h" => Duration::try_hours(amount),
        "d" => Duration::try_days(amount),
        "w" => Duration::try_weeks(amount),
        other => {
            return Err(AppError::configuration(format!(
                "Unknown lifetime unit '{other}' in '{input}'"
            )));
        }
    };

    duration.ok_or_else(|| AppError::configuration(format!("Lifetime '{input}' is out of range")))
}
