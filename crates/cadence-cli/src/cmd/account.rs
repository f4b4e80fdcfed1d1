use crate::cmd::require_init;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use cadence_core::{account::Account, snapshot::Snapshot};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum AccountSubcommand {
    /// Create an account
    Create {
        slug: String,
        /// Display name
        #[arg(long)]
        name: String,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all accounts
    List,
    /// Show an account with its opportunities and contacts
    Show { slug: String },
    /// Update account fields
    Update {
        slug: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        industry: Option<String>,
        #[arg(long)]
        website: Option<String>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an account, its opportunities, and its contacts
    Delete { slug: String },
}

pub fn run(root: &Path, subcmd: AccountSubcommand, json: bool) -> anyhow::Result<()> {
    require_init(root)?;
    match subcmd {
        AccountSubcommand::Create {
            slug,
            name,
            industry,
            website,
            notes,
        } => {
            let mut account = Account::create(root, &slug, &name)
                .with_context(|| format!("failed to create account '{slug}'"))?;
            if industry.is_some() || website.is_some() || notes.is_some() {
                account.set_industry(industry);
                account.set_website(website);
                account.set_notes(notes);
                account.save(root).context("failed to save account")?;
            }
            if json {
                print_json(&account)?;
            } else {
                println!("Created account '{}': {}", account.slug, account.name);
            }
            Ok(())
        }
        AccountSubcommand::List => list(root, json),
        AccountSubcommand::Show { slug } => show(root, &slug, json),
        AccountSubcommand::Update {
            slug,
            name,
            industry,
            website,
            notes,
        } => {
            let mut account =
                Account::load(root, &slug).with_context(|| format!("account '{slug}' not found"))?;
            if let Some(n) = name {
                account.update_name(n);
            }
            if industry.is_some() {
                account.set_industry(industry);
            }
            if website.is_some() {
                account.set_website(website);
            }
            if notes.is_some() {
                account.set_notes(notes);
            }
            account.save(root).context("failed to save account")?;
            if json {
                print_json(&account)?;
            } else {
                println!("Updated account '{slug}'");
            }
            Ok(())
        }
        AccountSubcommand::Delete { slug } => {
            let report = Account::delete(root, &slug)
                .with_context(|| format!("failed to delete account '{slug}'"))?;
            if json {
                print_json(&serde_json::json!({ "slug": slug, "deleted": true, "cascade": report }))?;
            } else {
                println!(
                    "Deleted account '{slug}' ({} contacts, {} opportunities, {} outreach events)",
                    report.contacts.len(),
                    report.opportunities.len(),
                    report.outreach_events
                );
            }
            Ok(())
        }
    }
}

fn list(root: &Path, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    if json {
        return print_json(&snapshot.accounts);
    }
    if snapshot.accounts.is_empty() {
        println!("No accounts.");
        return Ok(());
    }
    let rows = snapshot
        .accounts
        .iter()
        .map(|a| {
            vec![
                a.slug.clone(),
                a.name.clone(),
                or_dash(a.industry.as_deref()),
                snapshot.contacts_for_account(&a.slug).count().to_string(),
            ]
        })
        .collect();
    print_table(&["SLUG", "NAME", "INDUSTRY", "CONTACTS"], rows);
    Ok(())
}

fn show(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let account = snapshot
        .account(slug)
        .with_context(|| format!("account '{slug}' not found"))?;
    let opportunities: Vec<_> = snapshot
        .opportunities
        .iter()
        .filter(|o| o.account == slug)
        .collect();
    let contacts: Vec<_> = snapshot.contacts_for_account(slug).collect();

    if json {
        return print_json(&serde_json::json!({
            "account": account,
            "opportunities": opportunities,
            "contacts": contacts,
        }));
    }

    println!("Account:  {} ({})", account.name, account.slug);
    println!("Industry: {}", or_dash(account.industry.as_deref()));
    println!("Website:  {}", or_dash(account.website.as_deref()));
    if let Some(notes) = &account.notes {
        println!("Notes:    {notes}");
    }
    println!("\nOpportunities:");
    if opportunities.is_empty() {
        println!("  (none)");
    }
    for o in &opportunities {
        println!("  {} — {} [{}]", o.slug, o.name, o.stage);
    }
    println!("\nContacts:");
    if contacts.is_empty() {
        println!("  (none)");
    }
    for c in &contacts {
        println!("  {} — {} ({})", c.slug, c.name, or_dash(Some(c.role.as_str())));
    }
    Ok(())
}
