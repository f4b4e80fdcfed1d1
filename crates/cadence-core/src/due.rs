//! Due-date engine: when is each contact next due, how far behind is it, and
//! which contacts make up today's to-do list.
//!
//! Every function takes `today` explicitly and never reads the clock.

use crate::calendar::{self, count_business_days, is_business_day, next_business_day};
use crate::contact::Contact;
use crate::snapshot::Snapshot;
use crate::types::OutreachMethod;
use chrono::NaiveDate;
use serde::Serialize;
use std::cmp::Ordering;

// ---------------------------------------------------------------------------
// DueStatus
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DueStatus {
    pub due_date: NaiveDate,
    pub days_overdue: u32,
    pub is_rollover: bool,
}

impl DueStatus {
    pub fn is_due(&self, today: NaiveDate) -> bool {
        self.due_date <= today
    }
}

/// Next due date for a contact. A contact that was never reached is due on
/// the first business day on or after `today`.
pub fn due_date(cadence_days: u32, last_outreach: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    match last_outreach {
        Some(last) => calendar::add_business_days(last, cadence_days),
        None => calendar::on_or_after(today),
    }
}

pub fn due_status(cadence_days: u32, last_outreach: Option<NaiveDate>, today: NaiveDate) -> DueStatus {
    let due_date = due_date(cadence_days, last_outreach, today);
    DueStatus {
        due_date,
        days_overdue: count_business_days(due_date, today),
        is_rollover: due_date < today && is_business_day(today),
    }
}

// ---------------------------------------------------------------------------
// DueItem
// ---------------------------------------------------------------------------

/// One row of the to-do list: a contact, where it belongs, and its status.
#[derive(Debug, Clone, Serialize)]
pub struct DueItem {
    pub contact: String,
    pub contact_name: String,
    pub role: String,
    pub account: String,
    pub account_name: String,
    pub opportunity: Option<String>,
    pub cadence_days: u32,
    pub last_outreach: Option<NaiveDate>,
    pub last_method: Option<OutreachMethod>,
    #[serde(flatten)]
    pub status: DueStatus,
}

impl DueItem {
    pub fn for_contact(contact: &Contact, account_name: &str, today: NaiveDate) -> Self {
        let last = contact.last_outreach();
        Self {
            contact: contact.slug.clone(),
            contact_name: contact.name.clone(),
            role: contact.role.clone(),
            account: contact.account.clone(),
            account_name: account_name.to_string(),
            opportunity: contact.opportunity.clone(),
            cadence_days: contact.cadence_days,
            last_outreach: last.map(|e| e.date),
            last_method: last.map(|e| e.method),
            status: due_status(contact.cadence_days, last.map(|e| e.date), today),
        }
    }
}

/// Evaluate every contact in the snapshot, in snapshot order.
pub fn evaluate(snapshot: &Snapshot, today: NaiveDate) -> Vec<DueItem> {
    snapshot
        .contacts
        .iter()
        .map(|c| DueItem::for_contact(c, snapshot.account_name(&c.account), today))
        .collect()
}

// ---------------------------------------------------------------------------
// Due sets and ordering
// ---------------------------------------------------------------------------

/// Rollovers first, then most overdue, then account name. Contact name and
/// slug settle whatever is left so the order is total.
pub fn compare_due(a: &DueItem, b: &DueItem) -> Ordering {
    b.status
        .is_rollover
        .cmp(&a.status.is_rollover)
        .then_with(|| b.status.days_overdue.cmp(&a.status.days_overdue))
        .then_with(|| a.account_name.cmp(&b.account_name))
        .then_with(|| a.contact_name.cmp(&b.contact_name))
        .then_with(|| a.contact.cmp(&b.contact))
}

pub fn sort_due(items: &mut [DueItem]) {
    items.sort_by(compare_due);
}

/// Contacts whose due date is on or before `today`, in to-do order.
pub fn due_today(items: &[DueItem], today: NaiveDate) -> Vec<DueItem> {
    let mut due: Vec<DueItem> = items
        .iter()
        .filter(|i| i.status.is_due(today))
        .cloned()
        .collect();
    sort_due(&mut due);
    due
}

/// Contacts due exactly on the business day after `today`.
pub fn due_next_business_day(items: &[DueItem], today: NaiveDate) -> Vec<DueItem> {
    let next = next_business_day(today);
    let mut upcoming: Vec<DueItem> = items
        .iter()
        .filter(|i| i.status.due_date == next)
        .cloned()
        .collect();
    sort_due(&mut upcoming);
    upcoming
}

// ---------------------------------------------------------------------------
// Agenda
// ---------------------------------------------------------------------------

/// The daily to-do list: what is due now and what comes up next.
#[derive(Debug, Clone, Serialize)]
pub struct Agenda {
    pub today: NaiveDate,
    pub is_business_day: bool,
    pub next_business_day: NaiveDate,
    pub due_today: Vec<DueItem>,
    pub due_next_business_day: Vec<DueItem>,
}

impl Agenda {
    pub fn build(snapshot: &Snapshot, today: NaiveDate) -> Self {
        let items = evaluate(snapshot, today);
        Self::from_items(&items, today)
    }

    pub fn from_items(items: &[DueItem], today: NaiveDate) -> Self {
        Self {
            today,
            is_business_day: is_business_day(today),
            next_business_day: next_business_day(today),
            due_today: due_today(items, today),
            due_next_business_day: due_next_business_day(items, today),
        }
    }

    pub fn rollover_count(&self) -> usize {
        self.due_today.iter().filter(|i| i.status.is_rollover).count()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
