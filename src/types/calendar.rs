use chrono::{Datelike, NaiveDate};

/// Builds a calendar date from year/month/day columns, rejecting impossible dates.
pub fn calendar_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Saturday and Sunday, i.e. weekday index 5 or 6 counting Monday as 0.
pub fn is_weekend(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() >= 5
}
