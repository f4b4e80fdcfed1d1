//! Outreach streaks, counted in business days.
//!
//! A streak is a run of consecutive business days that each have at least
//! one outreach event. Weekend activity is ignored and weekends never break
//! a run. Today only counts once something has been logged; until then the
//! current streak is measured up to the previous business day.

use crate::calendar::{is_business_day, previous_business_day};
use crate::contact::Contact;
use chrono::NaiveDate;
use std::collections::BTreeSet;

/// Distinct business days with at least one outreach event.
pub fn activity_days<'a>(contacts: impl IntoIterator<Item = &'a Contact>) -> BTreeSet<NaiveDate> {
    contacts
        .into_iter()
        .flat_map(|c| c.outreach.iter().map(|e| e.date))
        .filter(|d| is_business_day(*d))
        .collect()
}

pub fn current_streak(days: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut cursor = if is_business_day(today) && days.contains(&today) {
        today
    } else {
        previous_business_day(today)
    };

    let mut streak = 0;
    while days.contains(&cursor) {
        streak += 1;
        cursor = previous_business_day(cursor);
    }
    streak
}

pub fn longest_streak(days: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0;
    let mut run = 0;
    let mut last: Option<NaiveDate> = None;
    for &day in days {
        run = match last {
            Some(prev) if previous_business_day(day) == prev => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        last = Some(day);
    }
    longest
}
