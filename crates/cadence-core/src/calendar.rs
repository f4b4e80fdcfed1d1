//! Business-day arithmetic. A business day is Monday through Friday; there is
//! no holiday calendar.

use crate::error::{CadenceError, Result};
use chrono::{Datelike, Days, NaiveDate, Weekday};

pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 9999;

/// Reject dates whose business-day arithmetic could run off the end of the
/// representable range.
pub fn check_date(date: NaiveDate) -> Result<NaiveDate> {
    if (MIN_YEAR..=MAX_YEAR).contains(&date.year()) {
        Ok(date)
    } else {
        Err(CadenceError::DateOutOfRange(date))
    }
}

pub fn is_business_day(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// First business day strictly after `date`.
pub fn next_business_day(date: NaiveDate) -> NaiveDate {
    let mut d = date + Days::new(1);
    while !is_business_day(d) {
        d = d + Days::new(1);
    }
    d
}

/// First business day strictly before `date`.
pub fn previous_business_day(date: NaiveDate) -> NaiveDate {
    let mut d = date - Days::new(1);
    while !is_business_day(d) {
        d = d - Days::new(1);
    }
    d
}

/// Advance `date` by `n` business-day steps. `n == 0` returns `date` as-is,
/// even when it falls on a weekend.
pub fn add_business_days(date: NaiveDate, n: u32) -> NaiveDate {
    (0..n).fold(date, |d, _| next_business_day(d))
}

/// Number of business days in the half-open interval `(start, end]`.
pub fn count_business_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if end <= start {
        return 0;
    }
    let span = (end - start).num_days() as u64;
    let full_weeks = span / 7;
    let mut count = full_weeks * 5;
    let mut d = start + Days::new(full_weeks * 7);
    while d < end {
        d = d + Days::new(1);
        if is_business_day(d) {
            count += 1;
        }
    }
    count as u32
}

/// Business days of `(start, end]` in ascending order.
pub fn business_days_between(
    start: NaiveDate,
    end: NaiveDate,
) -> impl Iterator<Item = NaiveDate> {
    start
        .iter_days()
        .skip(1)
        .take_while(move |d| *d <= end)
        .filter(|d| is_business_day(*d))
}

/// Monday of the ISO week containing `date`.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.weekday().num_days_from_monday()))
}

/// `date` itself when it is a business day, otherwise the next one.
pub fn on_or_after(date: NaiveDate) -> NaiveDate {
    if is_business_day(date) {
        date
    } else {
        next_business_day(date)
    }
}

/// `date` itself when it is a business day, otherwise the previous one.
pub fn on_or_before(date: NaiveDate) -> NaiveDate {
    if is_business_day(date) {
        date
    } else {
        previous_business_day(date)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
