use crate::cmd::contact::describe;
use crate::output::{date_or_dash, print_json, print_table};
use anyhow::Context;
use cadence_core::{
    due::{Agenda, DueItem},
    snapshot::Snapshot,
};
use chrono::NaiveDate;
use std::path::Path;

pub fn run(root: &Path, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let agenda = Agenda::build(&snapshot, today);

    if json {
        return print_json(&agenda);
    }

    let weekday = today.format("%A");
    if agenda.is_business_day {
        println!("Due today ({weekday} {today}):");
    } else {
        println!("Due today ({weekday} {today}, not a business day):");
    }
    if agenda.due_today.is_empty() {
        println!("  Nothing due.");
    } else {
        print_items(&agenda.due_today, true);
    }

    println!("\nNext business day ({}):", agenda.next_business_day);
    if agenda.due_next_business_day.is_empty() {
        println!("  Nothing due.");
    } else {
        print_items(&agenda.due_next_business_day, false);
    }
    Ok(())
}

pub fn due(root: &Path, slug: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let contact = snapshot
        .contact(slug)
        .with_context(|| format!("contact '{slug}' not found"))?;
    let item = DueItem::for_contact(contact, snapshot.account_name(&contact.account), today);

    if json {
        return print_json(&item);
    }
    println!("{} ({}): {}", item.contact_name, item.account_name, describe(&item, today));
    Ok(())
}

fn print_items(items: &[DueItem], with_overdue: bool) {
    let rows = items
        .iter()
        .map(|i| {
            let mut row = vec![
                i.contact.clone(),
                i.contact_name.clone(),
                i.account_name.clone(),
                date_or_dash(i.last_outreach),
                i.last_method.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
            ];
            if with_overdue {
                row.push(i.status.days_overdue.to_string());
                row.push(if i.status.is_rollover { "yes" } else { "" }.to_string());
            }
            row
        })
        .collect();
    if with_overdue {
        print_table(
            &["SLUG", "NAME", "ACCOUNT", "LAST", "VIA", "OVERDUE", "ROLLOVER"],
            rows,
        );
    } else {
        print_table(&["SLUG", "NAME", "ACCOUNT", "LAST", "VIA"], rows);
    }
}
