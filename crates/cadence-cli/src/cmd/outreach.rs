use crate::cmd::require_init;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use cadence_core::{
    calendar,
    contact::Contact,
    due,
    types::OutreachMethod,
};
use chrono::NaiveDate;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum OutreachSubcommand {
    /// Record an outreach touch for a contact
    Log {
        contact: String,
        /// email | call
        #[arg(long, default_value = "email")]
        method: OutreachMethod,
        /// Date of the touch (default: today)
        #[arg(long, value_name = "DATE", value_parser = crate::cmd::parse_date)]
        date: Option<NaiveDate>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List a contact's outreach history, most recent first
    List { contact: String },
    /// Delete an outreach event
    Delete { contact: String, id: String },
}

pub fn run(
    root: &Path,
    subcmd: OutreachSubcommand,
    today: NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    require_init(root)?;
    match subcmd {
        OutreachSubcommand::Log {
            contact,
            method,
            date,
            notes,
        } => log(root, &contact, method, date.unwrap_or(today), notes, today, json),
        OutreachSubcommand::List { contact } => list(root, &contact, json),
        OutreachSubcommand::Delete { contact, id } => delete(root, &contact, &id, json),
    }
}

fn log(
    root: &Path,
    slug: &str,
    method: OutreachMethod,
    date: NaiveDate,
    notes: Option<String>,
    today: NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    let mut contact =
        Contact::load(root, slug).with_context(|| format!("contact '{slug}' not found"))?;
    if date > today {
        tracing::warn!(contact = slug, %date, %today, "logging outreach dated in the future");
    }
    if !calendar::is_business_day(date) {
        tracing::warn!(contact = slug, %date, "outreach on a weekend does not count toward streaks");
    }

    let id = contact.log_outreach(date, method, notes);
    contact.save(root).context("failed to save contact")?;
    let status = due::due_status(contact.cadence_days, contact.last_outreach_date(), today);

    if json {
        print_json(&serde_json::json!({
            "contact": slug,
            "id": id,
            "date": date,
            "method": method,
            "next_due": status.due_date,
        }))?;
    } else {
        println!("Logged {method} [{id}] for {slug} on {date}; next due {}", status.due_date);
    }
    Ok(())
}

fn list(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let contact =
        Contact::load(root, slug).with_context(|| format!("contact '{slug}' not found"))?;
    if json {
        return print_json(&contact.outreach);
    }
    if contact.outreach.is_empty() {
        println!("No outreach logged for {slug}.");
        return Ok(());
    }
    let rows = contact
        .outreach
        .iter()
        .map(|e| {
            vec![
                e.id.clone(),
                e.date.to_string(),
                e.method.to_string(),
                or_dash(e.notes.as_deref()),
            ]
        })
        .collect();
    print_table(&["ID", "DATE", "METHOD", "NOTES"], rows);
    Ok(())
}

fn delete(root: &Path, slug: &str, id: &str, json: bool) -> anyhow::Result<()> {
    let mut contact =
        Contact::load(root, slug).with_context(|| format!("contact '{slug}' not found"))?;
    let removed = contact
        .remove_outreach(id)
        .with_context(|| format!("outreach '{id}' not found for contact '{slug}'"))?;
    contact.save(root).context("failed to save contact")?;

    if json {
        print_json(&serde_json::json!({ "contact": slug, "deleted": removed }))?;
    } else {
        println!("Deleted outreach [{id}] ({} on {})", removed.method, removed.date);
    }
    Ok(())
}
