//! Normalization of heterogeneous due dates into calendar dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use super::dates_model::{NormalizedDate, RawDate};
use crate::constants::{MS_PER_DAY, TWO_DIGIT_YEAR_BASE};

/// Date-only layouts tried after the `M/D/Y` rule, in order.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%m-%d-%Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
    "%d %B %Y",
];

/// Datetime layouts whose date part is kept.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Normalizes a raw due date.
///
/// Never fails: anything that cannot be read as a calendar date yields
/// [`NormalizedDate::Invalid`].
pub fn normalize_date(raw: &RawDate) -> NormalizedDate {
    match raw {
        RawDate::Date(date) => NormalizedDate::Valid(*date),
        RawDate::DateTime(dt) => NormalizedDate::Valid(dt.date()),
        RawDate::Epoch(ms) => DateTime::from_timestamp_millis(*ms)
            .map(|dt| dt.date_naive())
            .into(),
        RawDate::Text(text) => normalize_text(text),
    }
}

/// Normalizes a textual date.
///
/// Strings with exactly two `/` separators are read as `M/D/Y`; a year of
/// fewer than three digits is placed in the 2000s. Other strings go through
/// a list of common layouts.
pub fn normalize_text(text: &str) -> NormalizedDate {
    let text = text.trim();
    if text.is_empty() {
        return NormalizedDate::Invalid;
    }

    if text.matches('/').count() == 2 {
        if let Some(date) = parse_month_day_year(text) {
            return NormalizedDate::Valid(date);
        }
    }

    parse_generic(text).into()
}

/// Whole days from `from` to `to`, floored on a fixed 24h day.
///
/// Negative when `to` is earlier than `from`.
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    let millis = (to - from).num_milliseconds();
    millis.div_euclid(MS_PER_DAY)
}

fn parse_month_day_year(text: &str) -> Option<NaiveDate> {
    let mut parts = text.split('/');
    let (month, _) = leading_integer(parts.next()?)?;
    let (day, _) = leading_integer(parts.next()?)?;
    let (mut year, year_digits) = leading_integer(parts.next()?)?;

    if year_digits < 3 {
        year += i64::from(TWO_DIGIT_YEAR_BASE);
    }

    NaiveDate::from_ymd_opt(
        i32::try_from(year).ok()?,
        u32::try_from(month).ok()?,
        u32::try_from(day).ok()?,
    )
}

/// Reads the signed digit run at the start of `part`, ignoring whatever
/// follows it (`"2025 12:00:00 AM"` reads as 2025). Returns the value and
/// the number of digits.
fn leading_integer(part: &str) -> Option<(i64, usize)> {
    let part = part.trim_start();
    let (negative, rest) = match part.as_bytes().first() {
        Some(b'-') => (true, &part[1..]),
        Some(b'+') => (false, &part[1..]),
        _ => (false, part),
    };
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let value: i64 = rest[..digits].parse().ok()?;
    Some((if negative { -value } else { value }, digits))
}

fn parse_generic(text: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.date_naive());
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .map(|dt| dt.date())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_two_digit_year_lands_in_2000s() {
        assert_eq!(
            normalize_text("3/2/23"),
            NormalizedDate::Valid(ymd(2023, 3, 2))
        );
        assert_eq!(
            normalize_text("12/31/99"),
            NormalizedDate::Valid(ymd(2099, 12, 31))
        );
        assert_eq!(
            normalize_text("1/5/7"),
            NormalizedDate::Valid(ymd(2007, 1, 5))
        );
    }

    #[test]
    fn test_four_digit_year_is_kept() {
        assert_eq!(
            normalize_text("06/15/2025"),
            NormalizedDate::Valid(ymd(2025, 6, 15))
        );
        assert_eq!(
            normalize_text(" 6 / 15 / 2025 "),
            NormalizedDate::Valid(ymd(2025, 6, 15))
        );
    }

    #[test]
    fn test_trailing_time_after_year_is_ignored() {
        assert_eq!(
            normalize_text("6/30/2025 12:00:00 AM"),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
        assert_eq!(
            normalize_text("6/30/25 10:00"),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
        assert_eq!(
            normalize_text("06/01/2025T00:00"),
            NormalizedDate::Valid(ymd(2025, 6, 1))
        );
    }

    #[test]
    fn test_slashes_in_year_first_order_fall_back_to_generic() {
        assert_eq!(
            normalize_text("2025/06/30"),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
    }

    #[test]
    fn test_out_of_range_month_day_year_is_invalid() {
        assert_eq!(normalize_text("13/45/23"), NormalizedDate::Invalid);
        assert_eq!(normalize_text("2/30/24"), NormalizedDate::Invalid);
    }

    #[test]
    fn test_generic_layouts() {
        assert_eq!(
            normalize_text("2025-06-30"),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
        assert_eq!(
            normalize_text("2025-06-30T18:30:00Z"),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
        assert_eq!(
            normalize_text("2025-06-30 08:00:00"),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
        assert_eq!(
            normalize_text("Jun 5, 2025"),
            NormalizedDate::Valid(ymd(2025, 6, 5))
        );
        assert_eq!(
            normalize_text("5 June 2025"),
            NormalizedDate::Valid(ymd(2025, 6, 5))
        );
    }

    #[test]
    fn test_unparseable_and_empty_are_invalid() {
        for raw in ["", "   ", "not a date", "//", "a/b/c", "1/2", "1/2/3/4", "Total"] {
            assert_eq!(normalize_text(raw), NormalizedDate::Invalid, "{raw:?}");
        }
    }

    #[test]
    fn test_typed_variants_convert_directly() {
        assert_eq!(
            normalize_date(&RawDate::Date(ymd(2025, 1, 2))),
            NormalizedDate::Valid(ymd(2025, 1, 2))
        );
        let dt = ymd(2025, 1, 2).and_hms_opt(23, 59, 0).unwrap();
        assert_eq!(
            normalize_date(&RawDate::DateTime(dt)),
            NormalizedDate::Valid(ymd(2025, 1, 2))
        );
        // 2025-06-30T00:00:00Z
        assert_eq!(
            normalize_date(&RawDate::Epoch(1_751_241_600_000)),
            NormalizedDate::Valid(ymd(2025, 6, 30))
        );
        assert_eq!(normalize_date(&RawDate::Epoch(i64::MAX)), NormalizedDate::Invalid);
    }

    #[test]
    fn test_raw_date_deserializes_untagged() {
        let raw: RawDate = serde_json::from_str("\"2025-06-30\"").unwrap();
        assert_eq!(raw, RawDate::Date(ymd(2025, 6, 30)));
        let raw: RawDate = serde_json::from_str("\"3/2/23\"").unwrap();
        assert_eq!(raw, RawDate::Text("3/2/23".to_string()));
        let raw: RawDate = serde_json::from_str("1751241600000").unwrap();
        assert_eq!(raw, RawDate::Epoch(1_751_241_600_000));
    }

    #[test]
    fn test_as_text_normalizes_to_same_date() {
        for raw in [
            RawDate::Epoch(1_751_241_600_000),
            RawDate::Date(ymd(2025, 6, 30)),
            RawDate::DateTime(ymd(2025, 6, 30).and_hms_opt(12, 0, 0).unwrap()),
            RawDate::Text("6/30/25".to_string()),
        ] {
            assert_eq!(
                normalize_text(&raw.as_text()),
                NormalizedDate::Valid(ymd(2025, 6, 30)),
                "{raw:?}"
            );
        }
    }

    #[test]
    fn test_days_between() {
        assert_eq!(days_between(ymd(2025, 5, 15), ymd(2025, 6, 30)), 46);
        assert_eq!(days_between(ymd(2025, 6, 30), ymd(2025, 6, 30)), 0);
        assert_eq!(days_between(ymd(2025, 7, 10), ymd(2025, 6, 30)), -10);
    }
}
