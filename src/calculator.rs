// Booking calculator: night count and price for a stay
//
// Two flavours are offered. The preview functions (`calculate_nights`, `estimate`) are
// lenient: absent dates yield zero nights and the absolute difference is used, so a live
// price preview never goes negative. `quote_stay` is what submissions go through and it
// rejects absent dates and empty or reversed ranges.

use crate::catalog::Room;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const MS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

pub const CHECK_IN_FIELD: &str = "check_in";
pub const CHECK_OUT_FIELD: &str = "check_out";

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    #[error("Missing date: {0}")]
    MissingDate(&'static str),

    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: &'static str, value: String },

    #[error("Check-out must be after check-in ({check_in} -> {check_out})")]
    InvalidRange { check_in: String, check_out: String },
}

impl CalculatorError {
    // Form field the error should be reported against
    pub fn field(&self) -> &'static str {
        match self {
            CalculatorError::MissingDate(field) => *field,
            CalculatorError::InvalidDate { field, .. } => *field,
            CalculatorError::InvalidRange { .. } => CHECK_OUT_FIELD,
        }
    }

    pub fn field_message(&self) -> String {
        match self {
            CalculatorError::MissingDate(field) if *field == CHECK_IN_FIELD => {
                "Check-in date is required".to_string()
            }
            CalculatorError::MissingDate(_) => "Check-out date is required".to_string(),
            CalculatorError::InvalidDate { .. } => "Please enter a valid date".to_string(),
            CalculatorError::InvalidRange { .. } => {
                "Check-out must be after check-in".to_string()
            }
        }
    }
}

// Preview figures shown while the form is being filled in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StayEstimate {
    pub nights: u32,
    pub total: u64,
}

// Validated figures for a submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StayQuote {
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub nights: u32,
    pub price_per_night: u32,
    pub total: u64,
}

// Accepts `YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]` and RFC 3339 timestamps.
// Plain dates are taken at midnight.
pub fn parse_stay_date(field: &'static str, value: &str) -> Result<NaiveDateTime, CalculatorError> {
    let value = value.trim();

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN));
    }
    if let Ok(timestamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(timestamp.naive_utc());
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(timestamp) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(timestamp);
        }
    }

    Err(CalculatorError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

// Ceiling of the absolute day difference
pub fn nights_between(start: NaiveDateTime, end: NaiveDateTime) -> u32 {
    let diff_ms = (end - start).num_milliseconds().unsigned_abs();
    let day = MS_PER_DAY as u64;
    let nights = diff_ms.div_ceil(day);
    u32::try_from(nights).unwrap_or(u32::MAX)
}

pub fn calculate_total(nights: u32, price_per_night: u32) -> u64 {
    u64::from(nights) * u64::from(price_per_night)
}

fn present(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

// Night count for the live preview; absent dates give 0
pub fn calculate_nights(
    check_in: Option<&str>,
    check_out: Option<&str>,
) -> Result<u32, CalculatorError> {
    match (present(check_in), present(check_out)) {
        (Some(check_in), Some(check_out)) => {
            let start = parse_stay_date(CHECK_IN_FIELD, check_in)?;
            let end = parse_stay_date(CHECK_OUT_FIELD, check_out)?;
            Ok(nights_between(start, end))
        }
        _ => Ok(0),
    }
}

// Preview total; without a selected room the total is 0
pub fn estimate(
    room: Option<&Room>,
    check_in: Option<&str>,
    check_out: Option<&str>,
) -> Result<StayEstimate, CalculatorError> {
    let nights = calculate_nights(check_in, check_out)?;
    let total = room.map_or(0, |room| calculate_total(nights, room.price));
    Ok(StayEstimate { nights, total })
}

pub fn quote_stay(room: &Room, check_in: &str, check_out: &str) -> Result<StayQuote, CalculatorError> {
    let check_in_raw = present(Some(check_in)).ok_or(CalculatorError::MissingDate(CHECK_IN_FIELD))?;
    let check_out_raw =
        present(Some(check_out)).ok_or(CalculatorError::MissingDate(CHECK_OUT_FIELD))?;

    let start = parse_stay_date(CHECK_IN_FIELD, check_in_raw)?;
    let end = parse_stay_date(CHECK_OUT_FIELD, check_out_raw)?;

    if end <= start {
        return Err(CalculatorError::InvalidRange {
            check_in: check_in_raw.to_string(),
            check_out: check_out_raw.to_string(),
        });
    }

    let nights = nights_between(start, end);
    let total = calculate_total(nights, room.price);
    debug!(
        "Quoted {} for {} night(s) in room {} ({} -> {})",
        total, nights, room.id, check_in_raw, check_out_raw
    );

    Ok(StayQuote {
        check_in: start.date(),
        check_out: end.date(),
        nights,
        price_per_night: room.price,
        total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::RoomCatalog;
    use test_case::test_case;

    #[test_case("2024-02-15", "2024-02-18", 3 ; "three nights")]
    #[test_case("2024-02-28", "2024-03-01", 2 ; "leap day")]
    #[test_case("2024-02-18", "2024-02-15", 3 ; "reversed uses absolute difference")]
    #[test_case("2024-02-15", "2024-02-15", 0 ; "same day")]
    #[test_case("2024-02-15T10:00", "2024-02-16T11:00", 2 ; "partial day rounds up")]
    #[test_case("2024-02-15T14:00:00Z", "2024-02-16T10:00:00Z", 1 ; "rfc3339 under a day")]
    fn test_calculate_nights(check_in: &str, check_out: &str, expected: u32) {
        assert_eq!(
            calculate_nights(Some(check_in), Some(check_out)).unwrap(),
            expected
        );
    }

    #[test_case(None, Some("2024-02-18") ; "no check in")]
    #[test_case(Some("2024-02-15"), None ; "no check out")]
    #[test_case(Some(""), Some("  ") ; "blank fields")]
    fn test_absent_dates_preview_as_zero(check_in: Option<&str>, check_out: Option<&str>) {
        let catalog = RoomCatalog::seeded();
        let estimate = estimate(catalog.find("1"), check_in, check_out).unwrap();
        assert_eq!(estimate, StayEstimate { nights: 0, total: 0 });
    }

    #[test]
    fn test_malformed_date_is_reported() {
        let err = calculate_nights(Some("15/02/2024"), Some("2024-02-18")).unwrap_err();
        assert_eq!(err.field(), CHECK_IN_FIELD);
        assert!(matches!(err, CalculatorError::InvalidDate { .. }));
    }

    #[test]
    fn test_estimate_without_room_is_zero() {
        let estimate = estimate(None, Some("2024-02-15"), Some("2024-02-18")).unwrap();
        assert_eq!(estimate.nights, 3);
        assert_eq!(estimate.total, 0);
    }

    #[test]
    fn test_deluxe_suite_quote_matches_seed_booking() {
        let catalog = RoomCatalog::seeded();
        let deluxe = catalog.get("1").unwrap();

        let quote = quote_stay(deluxe, "2024-02-15", "2024-02-18").unwrap();
        assert_eq!(quote.nights, 3);
        assert_eq!(quote.price_per_night, 299);
        assert_eq!(quote.total, 897);
        assert_eq!(quote.check_in, NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    }

    #[test]
    fn test_total_is_nights_times_price_for_every_room() {
        let catalog = RoomCatalog::seeded();
        let check_in = "2024-06-01";
        for room in catalog.rooms() {
            for offset in 1..=14u32 {
                let check_out = NaiveDate::from_ymd_opt(2024, 6, 1 + offset).unwrap();
                let quote = quote_stay(room, check_in, &check_out.to_string()).unwrap();
                assert_eq!(quote.nights, offset);
                assert_eq!(quote.total, u64::from(offset) * u64::from(room.price));
            }
        }
    }

    #[test_case("2024-02-18", "2024-02-15" ; "reversed")]
    #[test_case("2024-02-15", "2024-02-15" ; "zero nights")]
    fn test_quote_rejects_empty_or_reversed_range(check_in: &str, check_out: &str) {
        let catalog = RoomCatalog::seeded();
        let err = quote_stay(catalog.get("2").unwrap(), check_in, check_out).unwrap_err();
        assert!(matches!(err, CalculatorError::InvalidRange { .. }));
        assert_eq!(err.field(), CHECK_OUT_FIELD);
        assert_eq!(err.field_message(), "Check-out must be after check-in");
    }

    #[test]
    fn test_quote_requires_both_dates() {
        let catalog = RoomCatalog::seeded();
        let room = catalog.get("2").unwrap();

        assert_eq!(
            quote_stay(room, "", "2024-02-18"),
            Err(CalculatorError::MissingDate(CHECK_IN_FIELD))
        );
        assert_eq!(
            quote_stay(room, "2024-02-15", " "),
            Err(CalculatorError::MissingDate(CHECK_OUT_FIELD))
        );
    }
}
