//! Date handling in the railway's time zone.
//!
//! The upstream operates entirely in China Standard Time (UTC+8, no DST),
//! regardless of where this server runs. "Today" for query validation is
//! today in that zone.

use chrono::{FixedOffset, NaiveDate, Utc};

/// China Standard Time offset from UTC, in seconds.
const CST_OFFSET_SECS: i32 = 8 * 3600;

/// Date format accepted from clients and sent upstream.
const DATE_FORMAT: &str = "%Y-%m-%d";

fn cst() -> FixedOffset {
    // Statically valid offset.
    FixedOffset::east_opt(CST_OFFSET_SECS).unwrap()
}

/// Today's date in China Standard Time.
pub fn today_in_china() -> NaiveDate {
    Utc::now().with_timezone(&cst()).date_naive()
}

/// Today's date in China Standard Time, formatted as `YYYY-MM-DD`.
pub fn current_date_string() -> String {
    today_in_china().format(DATE_FORMAT).to_string()
}

/// Parse a strict `YYYY-MM-DD` date string.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT).ok()
}

/// Whether `date` is on or after `today`.
///
/// Pure so it can be tested without a clock; callers pass
/// [`today_in_china`].
pub fn is_on_or_after(date: NaiveDate, today: NaiveDate) -> bool {
    date >= today
}
