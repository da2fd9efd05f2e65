//! Deadline text parsing.

use chrono::NaiveDate;

/// Parse a deadline in `dd/mm/yy` or `dd/mm/yyyy` form.
///
/// Exactly three slash-separated numeric components are required. Two-digit
/// years map to `2000 + yy` with no windowing, so `99` means 2099. The
/// components must form a real calendar date; overflow like `31/02/24` is
/// rejected rather than rolled over. Every malformed input yields `None`,
/// never an error.
pub fn parse_deadline(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().split('/');
    let day = parse_component(parts.next()?)?;
    let month = parse_component(parts.next()?)?;
    let mut year = i32::try_from(parse_component(parts.next()?)?).ok()?;
    if parts.next().is_some() {
        return None;
    }
    if year < 100 {
        year += 2000;
    }
    NaiveDate::from_ymd_opt(year, month, day)
}

fn parse_component(part: &str) -> Option<u32> {
    part.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn parses_short_and_long_years() {
        assert_eq!(parse_deadline("25/12/23"), Some(date(2023, 12, 25)));
        assert_eq!(parse_deadline("25/12/2023"), Some(date(2023, 12, 25)));
        assert_eq!(parse_deadline("1/1/1"), Some(date(2001, 1, 1)));
    }

    #[test]
    fn two_digit_years_are_not_windowed() {
        assert_eq!(parse_deadline("01/01/99"), Some(date(2099, 1, 1)));
    }

    #[test]
    fn rejects_calendar_overflow() {
        assert_eq!(parse_deadline("31/02/24"), None);
        assert_eq!(parse_deadline("31/04/24"), None);
        assert_eq!(parse_deadline("29/02/23"), None);
        assert_eq!(parse_deadline("29/02/24"), Some(date(2024, 2, 29)));
    }

    #[test]
    fn rejects_years_too_large_to_represent() {
        assert_eq!(parse_deadline("01/01/4294965296"), None);
        assert_eq!(parse_deadline("01/01/4294967295"), None);
        assert_eq!(parse_deadline("01/01/99999999999999"), None);
    }

    #[test]
    fn rejects_malformed_component_counts() {
        assert_eq!(parse_deadline(""), None);
        assert_eq!(parse_deadline("1-1-1"), None);
        assert_eq!(parse_deadline("25/12"), None);
        assert_eq!(parse_deadline("25/12/23/99"), None);
        assert_eq!(parse_deadline("soon"), None);
        assert_eq!(parse_deadline("aa/bb/cc"), None);
    }

    #[test]
    fn tolerates_surrounding_whitespace() {
        assert_eq!(parse_deadline(" 25/12/23 "), Some(date(2023, 12, 25)));
        assert_eq!(parse_deadline("25 / 12 / 23"), Some(date(2023, 12, 25)));
    }
}
