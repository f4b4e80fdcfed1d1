use crate::cmd::require_init;
use crate::output::{date_or_dash, or_dash, print_json, print_table};
use anyhow::Context;
use cadence_core::{
    contact::Contact,
    due::{self, DueItem},
    snapshot::Snapshot,
};
use chrono::NaiveDate;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ContactSubcommand {
    /// Create a contact under an account
    Create {
        slug: String,
        #[arg(long)]
        name: String,
        /// Owning account slug
        #[arg(long)]
        account: String,
        #[arg(long, default_value = "")]
        role: String,
        #[arg(long)]
        email: Option<String>,
        /// Business days between touches (default: config value)
        #[arg(long)]
        cadence: Option<u32>,
        /// Opportunity slug under the same account
        #[arg(long)]
        opportunity: Option<String>,
    },
    /// List contacts with their next due date
    List {
        /// Only show contacts of this account
        #[arg(long)]
        account: Option<String>,
    },
    /// Show one contact with its outreach history
    Show { slug: String },
    /// Update contact fields
    Update {
        slug: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        role: Option<String>,
        #[arg(long, conflicts_with = "clear_email")]
        email: Option<String>,
        /// Remove the email address
        #[arg(long)]
        clear_email: bool,
        #[arg(long)]
        cadence: Option<u32>,
        /// Link to an opportunity under the same account
        #[arg(long, conflicts_with = "clear_opportunity")]
        opportunity: Option<String>,
        /// Remove the opportunity link
        #[arg(long)]
        clear_opportunity: bool,
    },
    /// Delete a contact and its outreach history
    Delete { slug: String },
}

pub fn run(
    root: &Path,
    subcmd: ContactSubcommand,
    today: NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    let config = require_init(root)?;
    match subcmd {
        ContactSubcommand::Create {
            slug,
            name,
            account,
            role,
            email,
            cadence,
            opportunity,
        } => {
            let mut contact = Contact::new(&slug, name, account);
            contact.role = role;
            contact.email = email;
            contact.cadence_days = cadence.unwrap_or(config.default_cadence_days);
            contact.opportunity = opportunity;
            let contact = Contact::create(root, contact)
                .with_context(|| format!("failed to create contact '{slug}'"))?;
            if json {
                print_json(&contact)?;
            } else {
                println!(
                    "Created contact '{}' at {} (every {} business days)",
                    contact.slug, contact.account, contact.cadence_days
                );
            }
            Ok(())
        }
        ContactSubcommand::List { account } => list(root, account.as_deref(), today, json),
        ContactSubcommand::Show { slug } => show(root, &slug, today, json),
        ContactSubcommand::Update {
            slug,
            name,
            role,
            email,
            clear_email,
            cadence,
            opportunity,
            clear_opportunity,
        } => {
            let mut contact =
                Contact::load(root, &slug).with_context(|| format!("contact '{slug}' not found"))?;
            if let Some(n) = name {
                contact.update_name(n);
            }
            if let Some(r) = role {
                contact.set_role(r);
            }
            if email.is_some() || clear_email {
                contact.set_email(email);
            }
            if let Some(days) = cadence {
                contact.set_cadence(days)?;
            }
            if let Some(opp) = opportunity {
                contact.link_opportunity(root, &opp)?;
            } else if clear_opportunity {
                contact.set_opportunity(None);
            }
            contact.save(root).context("failed to save contact")?;
            if json {
                print_json(&contact)?;
            } else {
                println!("Updated contact '{slug}'");
            }
            Ok(())
        }
        ContactSubcommand::Delete { slug } => {
            let removed = Contact::delete(root, &slug)
                .with_context(|| format!("failed to delete contact '{slug}'"))?;
            if json {
                print_json(&serde_json::json!({
                    "slug": slug,
                    "deleted": true,
                    "outreach_events": removed,
                }))?;
            } else {
                println!("Deleted contact '{slug}' ({removed} outreach events)");
            }
            Ok(())
        }
    }
}

fn list(root: &Path, account: Option<&str>, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let items: Vec<DueItem> = due::evaluate(&snapshot, today)
        .into_iter()
        .filter(|i| account.map_or(true, |a| i.account == a))
        .collect();

    if json {
        return print_json(&items);
    }
    if items.is_empty() {
        println!("No contacts.");
        return Ok(());
    }
    let rows = items
        .iter()
        .map(|i| {
            vec![
                i.contact.clone(),
                i.contact_name.clone(),
                i.account_name.clone(),
                i.cadence_days.to_string(),
                date_or_dash(i.last_outreach),
                i.status.due_date.to_string(),
            ]
        })
        .collect();
    print_table(&["SLUG", "NAME", "ACCOUNT", "CADENCE", "LAST", "DUE"], rows);
    Ok(())
}

fn show(root: &Path, slug: &str, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let contact = snapshot
        .contact(slug)
        .with_context(|| format!("contact '{slug}' not found"))?;
    let item = DueItem::for_contact(contact, snapshot.account_name(&contact.account), today);

    if json {
        return print_json(&serde_json::json!({ "contact": contact, "due": item.status }));
    }

    println!("Contact:     {} ({})", contact.name, contact.slug);
    println!("Role:        {}", or_dash(Some(contact.role.as_str())));
    println!("Email:       {}", or_dash(contact.email.as_deref()));
    println!("Account:     {}", item.account_name);
    println!("Opportunity: {}", or_dash(contact.opportunity.as_deref()));
    println!("Cadence:     every {} business days", contact.cadence_days);
    println!("Due:         {}", describe(&item, today));
    println!("\nOutreach:");
    if contact.outreach.is_empty() {
        println!("  (none)");
    }
    for e in &contact.outreach {
        match &e.notes {
            Some(notes) => println!("  [{}] {} {} — {notes}", e.id, e.date, e.method),
            None => println!("  [{}] {} {}", e.id, e.date, e.method),
        }
    }
    Ok(())
}

/// One-line human summary of a due status.
pub(crate) fn describe(item: &DueItem, today: NaiveDate) -> String {
    let s = &item.status;
    if s.is_rollover {
        format!("{} (rollover, {} business days overdue)", s.due_date, s.days_overdue)
    } else if s.due_date == today {
        format!("{} (today)", s.due_date)
    } else if s.due_date < today {
        format!("{} ({} business days overdue)", s.due_date, s.days_overdue)
    } else {
        s.due_date.to_string()
    }
}
