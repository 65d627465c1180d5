//! Timestamp token parsing with a fixed fallback.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// chrono layouts for `day/month/year, hour:minute`, by year width.
const FOUR_DIGIT_YEAR_FORMAT: &str = "%d/%m/%Y, %H:%M";
const TWO_DIGIT_YEAR_FORMAT: &str = "%d/%m/%y, %H:%M";

/// The moment unparsable tokens resolve to: 1900-01-01 00:00 UTC.
pub fn sentinel_timestamp() -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(1900, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(DateTime::<Utc>::UNIX_EPOCH, |naive| naive.and_utc())
}

/// Returns `true` if `ts` is the parse-failure sentinel.
pub fn is_sentinel(ts: DateTime<Utc>) -> bool {
    ts == sentinel_timestamp()
}

fn year_width(token: &str) -> usize {
    token
        .split(',')
        .next()
        .and_then(|date| date.rsplit('/').next())
        .map_or(0, |year| year.trim().chars().count())
}

/// Parses a token in strict `D/M/Y, H:M` form.
///
/// Two-digit years are read as 20xx/19xx following chrono's `%y` rules;
/// anything else is read as a full year. Returns `None` for wrong field
/// counts, non-numeric fields, or out-of-range values.
pub fn try_parse_timestamp(token: &str) -> Option<DateTime<Utc>> {
    let format = if year_width(token) <= 2 {
        TWO_DIGIT_YEAR_FORMAT
    } else {
        FOUR_DIGIT_YEAR_FORMAT
    };

    NaiveDateTime::parse_from_str(token.trim(), format)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parses a timestamp token, falling back to [`sentinel_timestamp`].
///
/// A malformed token never aborts the transcript; it only loses its time.
///
/// # Example
///
/// ```rust
/// use chatturns::parsing::{parse_timestamp, sentinel_timestamp};
///
/// assert_eq!(parse_timestamp("99/99/9999, 99:99"), sentinel_timestamp());
/// assert_eq!(
///     parse_timestamp("15/01/2024, 10:30").to_rfc3339(),
///     "2024-01-15T10:30:00+00:00",
/// );
/// ```
pub fn parse_timestamp(token: &str) -> DateTime<Utc> {
    try_parse_timestamp(token).unwrap_or_else(|| {
        tracing::debug!(token, "unparsable timestamp, using sentinel");
        sentinel_timestamp()
    })
}
