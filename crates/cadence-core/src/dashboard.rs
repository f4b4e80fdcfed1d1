//! Dashboard metrics: small aggregations over a snapshot for a given day.

use crate::calendar::{on_or_before, previous_business_day, week_start};
use crate::contact::OutreachEvent;
use crate::due::{self, Agenda};
use crate::snapshot::Snapshot;
use crate::streak;
use crate::types::{OutreachMethod, Stage};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MethodCounts {
    pub email: usize,
    pub call: usize,
}

impl MethodCounts {
    pub fn add(&mut self, method: OutreachMethod) {
        match method {
            OutreachMethod::Email => self.email += 1,
            OutreachMethod::Call => self.call += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.email + self.call
    }
}

/// One business day of the activity chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    #[serde(flatten)]
    pub counts: MethodCounts,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageRow {
    pub stage: Stage,
    pub count: usize,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccountRow {
    pub account: String,
    pub name: String,
    pub contacts: usize,
    pub due_today: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub today: NaiveDate,
    pub due_today: usize,
    pub rollover: usize,
    pub due_next_business_day: usize,
    pub touched_today: usize,
    pub week_to_date: MethodCounts,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub activity: Vec<ActivityPoint>,
    pub pipeline: Vec<StageRow>,
    /// Summed amount of opportunities not yet closed.
    pub open_pipeline: u64,
    pub accounts: Vec<AccountRow>,
}

impl Dashboard {
    /// `window` is the number of business days in the activity series.
    pub fn build(snapshot: &Snapshot, today: NaiveDate, window: u32) -> Self {
        let items = due::evaluate(snapshot, today);
        let agenda = Agenda::from_items(&items, today);
        let events: Vec<&OutreachEvent> = snapshot
            .contacts
            .iter()
            .flat_map(|c| c.outreach.iter())
            .collect();

        let touched_today = snapshot
            .contacts
            .iter()
            .filter(|c| c.outreach.iter().any(|e| e.date == today))
            .count();

        let monday = week_start(today);
        let mut week_to_date = MethodCounts::default();
        for e in events.iter().filter(|e| e.date >= monday && e.date <= today) {
            week_to_date.add(e.method);
        }

        let active = streak::activity_days(&snapshot.contacts);

        let mut accounts: Vec<AccountRow> = snapshot
            .accounts
            .iter()
            .map(|a| AccountRow {
                account: a.slug.clone(),
                name: a.name.clone(),
                contacts: snapshot.contacts_for_account(&a.slug).count(),
                due_today: agenda.due_today.iter().filter(|i| i.account == a.slug).count(),
            })
            .collect();
        accounts.sort_by(|a, b| b.due_today.cmp(&a.due_today).then_with(|| a.name.cmp(&b.name)));

        let pipeline = pipeline(snapshot);
        let open_pipeline = pipeline
            .iter()
            .filter(|r| r.stage.is_open())
            .map(|r| r.amount)
            .sum();

        Self {
            today,
            due_today: agenda.due_today.len(),
            rollover: agenda.rollover_count(),
            due_next_business_day: agenda.due_next_business_day.len(),
            touched_today,
            week_to_date,
            current_streak: streak::current_streak(&active, today),
            longest_streak: streak::longest_streak(&active),
            activity: activity_series(&events, today, window),
            pipeline,
            open_pipeline,
            accounts,
        }
    }
}

/// Upper bound on the activity series: one year of business days.
pub const MAX_WINDOW_DAYS: u32 = 260;

/// Per-day counts for the last `window` business days ending today, or at
/// the previous business day on weekends. Oldest first. `window` is capped at
/// [`MAX_WINDOW_DAYS`].
pub fn activity_series(events: &[&OutreachEvent], today: NaiveDate, window: u32) -> Vec<ActivityPoint> {
    let window = window.min(MAX_WINDOW_DAYS);
    if window == 0 {
        return Vec::new();
    }
    let mut days = Vec::with_capacity(window as usize);
    let mut day = on_or_before(today);
    days.push(day);
    for _ in 1..window {
        day = previous_business_day(day);
        days.push(day);
    }
    days.reverse();

    let mut by_day: HashMap<NaiveDate, MethodCounts> = HashMap::new();
    for e in events {
        by_day.entry(e.date).or_default().add(e.method);
    }

    days.into_iter()
        .map(|date| ActivityPoint {
            date,
            counts: by_day.get(&date).copied().unwrap_or_default(),
        })
        .collect()
}

/// Count and summed amount per stage, every stage present, in stage order.
pub fn pipeline(snapshot: &Snapshot) -> Vec<StageRow> {
    Stage::all()
        .iter()
        .map(|&stage| {
            let opps = snapshot.opportunities.iter().filter(|o| o.stage == stage);
            StageRow {
                stage,
                count: opps.clone().count(),
                amount: opps.filter_map(|o| o.amount).sum(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::account::Account;
    use crate::contact::Contact;
    use crate::opportunity::Opportunity;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> Snapshot {
        let mut jane = Contact::new("jane", "Jane", "acme");
        jane.cadence_days = 2;
        jane.log_outreach(d("2024-01-08"), OutreachMethod::Email, None);
        jane.log_outreach(d("2024-01-09"), OutreachMethod::Call, None);

        let mut bob = Contact::new("bob", "Bob", "globex");
        bob.log_outreach(d("2024-01-10"), OutreachMethod::Email, None);
        bob.log_outreach(d("2024-01-05"), OutreachMethod::Email, None);

        let carl = Contact::new("carl", "Carl", "globex");

        let mut big = Opportunity::new("big", "acme", "Big");
        big.stage = Stage::Proposal;
        big.amount = Some(50_000);
        let mut small = Opportunity::new("small", "globex", "Small");
        small.stage = Stage::Proposal;
        small.amount = Some(5_000);
        let open = Opportunity::new("open", "globex", "Open");

        Snapshot {
            accounts: vec![Account::new("acme", "Acme"), Account::new("globex", "Globex")],
            opportunities: vec![big, small, open],
            contacts: vec![bob, carl, jane],
        }
    }

    #[test]
    fn counts_for_a_wednesday() {
        let dash = Dashboard::build(&fixture(), d("2024-01-10"), 5);
        // jane due 2024-01-11, bob due 2024-01-24, carl never contacted.
        assert_eq!(dash.due_today, 1);
        assert_eq!(dash.rollover, 0);
        assert_eq!(dash.due_next_business_day, 1);
        assert_eq!(dash.touched_today, 1);
        assert_eq!(dash.week_to_date, MethodCounts { email: 2, call: 1 });
        assert_eq!(dash.week_to_date.total(), 3);
        // Fri, Mon, Tue, Wed
        assert_eq!(dash.current_streak, 4);
        assert_eq!(dash.longest_streak, 4);
    }

    #[test]
    fn activity_series_covers_window() {
        let dash = Dashboard::build(&fixture(), d("2024-01-10"), 5);
        let dates: Vec<NaiveDate> = dash.activity.iter().map(|p| p.date).collect();
        assert_eq!(
            dates,
            vec![d("2024-01-04"), d("2024-01-05"), d("2024-01-08"), d("2024-01-09"), d("2024-01-10")]
        );
        assert_eq!(dash.activity[0].counts.total(), 0);
        assert_eq!(dash.activity[3].counts, MethodCounts { email: 0, call: 1 });
    }

    #[test]
    fn activity_series_on_weekend_ends_friday() {
        let series = activity_series(&[], d("2024-01-13"), 2);
        let dates: Vec<NaiveDate> = series.iter().map(|p| p.date).collect();
        assert_eq!(dates, vec![d("2024-01-11"), d("2024-01-12")]);
        assert!(activity_series(&[], d("2024-01-13"), 0).is_empty());
    }

    #[test]
    fn pipeline_includes_every_stage() {
        let rows = pipeline(&fixture());
        assert_eq!(rows.len(), Stage::all().len());
        let proposal = rows.iter().find(|r| r.stage == Stage::Proposal).unwrap();
        assert_eq!(proposal.count, 2);
        assert_eq!(proposal.amount, 55_000);
        let prospecting = rows.iter().find(|r| r.stage == Stage::Prospecting).unwrap();
        assert_eq!(prospecting.count, 1);
        assert_eq!(prospecting.amount, 0);
        assert_eq!(rows.iter().find(|r| r.stage == Stage::ClosedWon).unwrap().count, 0);
    }

    #[test]
    fn accounts_sorted_by_due_today() {
        let dash = Dashboard::build(&fixture(), d("2024-01-10"), 5);
        assert_eq!(dash.accounts[0].account, "globex");
        assert_eq!(dash.accounts[0].contacts, 2);
        assert_eq!(dash.accounts[0].due_today, 1);
        assert_eq!(dash.accounts[1].due_today, 0);
    }

    #[test]
    fn activity_series_window_is_capped() {
        let series = activity_series(&[], d("2024-01-10"), u32::MAX);
        assert_eq!(series.len(), MAX_WINDOW_DAYS as usize);
        assert_eq!(series.last().unwrap().date, d("2024-01-10"));
    }

    #[test]
    fn open_pipeline_excludes_closed_deals() {
        let mut snapshot = fixture();
        let mut won = Opportunity::new("won", "acme", "Won");
        won.stage = Stage::ClosedWon;
        won.amount = Some(20_000);
        let mut lost = Opportunity::new("lost", "acme", "Lost");
        lost.stage = Stage::ClosedLost;
        lost.amount = Some(7_000);
        snapshot.opportunities.extend([won, lost]);

        let dash = Dashboard::build(&snapshot, d("2024-01-10"), 5);
        assert_eq!(dash.open_pipeline, 55_000);
    }
}
