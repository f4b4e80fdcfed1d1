use crate::cmd::require_init;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use cadence_core::{opportunity::Opportunity, snapshot::Snapshot, types::Stage};
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum OpportunitySubcommand {
    /// Create an opportunity under an account
    Create {
        slug: String,
        /// Owning account slug
        #[arg(long)]
        account: String,
        #[arg(long)]
        name: String,
        /// prospecting | discovery | proposal | negotiation | closed_won | closed_lost
        #[arg(long)]
        stage: Option<Stage>,
        /// Deal size in whole currency units
        #[arg(long)]
        amount: Option<u64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// List opportunities
    List {
        /// Only show opportunities of this account
        #[arg(long)]
        account: Option<String>,
    },
    /// Show one opportunity and its linked contacts
    Show { slug: String },
    /// Update opportunity fields
    Update {
        slug: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        stage: Option<Stage>,
        #[arg(long)]
        amount: Option<u64>,
        #[arg(long)]
        notes: Option<String>,
    },
    /// Delete an opportunity and unlink its contacts
    Delete { slug: String },
}

pub fn run(root: &Path, subcmd: OpportunitySubcommand, json: bool) -> anyhow::Result<()> {
    require_init(root)?;
    match subcmd {
        OpportunitySubcommand::Create {
            slug,
            account,
            name,
            stage,
            amount,
            notes,
        } => {
            let mut opp = Opportunity::create(root, &slug, &account, &name)
                .with_context(|| format!("failed to create opportunity '{slug}'"))?;
            if stage.is_some() || amount.is_some() || notes.is_some() {
                if let Some(s) = stage {
                    opp.set_stage(s);
                }
                opp.set_amount(amount);
                opp.set_notes(notes);
                opp.save(root).context("failed to save opportunity")?;
            }
            if json {
                print_json(&opp)?;
            } else {
                println!("Created opportunity '{}' [{}] for {}", opp.slug, opp.stage, opp.account);
            }
            Ok(())
        }
        OpportunitySubcommand::List { account } => list(root, account.as_deref(), json),
        OpportunitySubcommand::Show { slug } => show(root, &slug, json),
        OpportunitySubcommand::Update {
            slug,
            name,
            stage,
            amount,
            notes,
        } => {
            let mut opp = Opportunity::load(root, &slug)
                .with_context(|| format!("opportunity '{slug}' not found"))?;
            if let Some(n) = name {
                opp.update_name(n);
            }
            if let Some(s) = stage {
                opp.set_stage(s);
            }
            if amount.is_some() {
                opp.set_amount(amount);
            }
            if notes.is_some() {
                opp.set_notes(notes);
            }
            opp.save(root).context("failed to save opportunity")?;
            if json {
                print_json(&opp)?;
            } else {
                println!("Updated opportunity '{slug}' [{}]", opp.stage);
            }
            Ok(())
        }
        OpportunitySubcommand::Delete { slug } => {
            let unlinked = Opportunity::delete(root, &slug)
                .with_context(|| format!("failed to delete opportunity '{slug}'"))?;
            if json {
                print_json(&serde_json::json!({
                    "slug": slug,
                    "deleted": true,
                    "unlinked_contacts": unlinked,
                }))?;
            } else {
                println!("Deleted opportunity '{slug}' ({} contacts unlinked)", unlinked.len());
            }
            Ok(())
        }
    }
}

fn list(root: &Path, account: Option<&str>, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let opps: Vec<&Opportunity> = snapshot
        .opportunities
        .iter()
        .filter(|o| account.map_or(true, |a| o.account == a))
        .collect();

    if json {
        return print_json(&opps);
    }
    if opps.is_empty() {
        println!("No opportunities.");
        return Ok(());
    }
    let rows = opps
        .iter()
        .map(|o| {
            vec![
                o.slug.clone(),
                o.name.clone(),
                snapshot.account_name(&o.account).to_string(),
                o.stage.to_string(),
                o.amount.map(|a| a.to_string()).unwrap_or_else(|| "-".into()),
            ]
        })
        .collect();
    print_table(&["SLUG", "NAME", "ACCOUNT", "STAGE", "AMOUNT"], rows);
    Ok(())
}

fn show(root: &Path, slug: &str, json: bool) -> anyhow::Result<()> {
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let opp = snapshot
        .opportunity(slug)
        .with_context(|| format!("opportunity '{slug}' not found"))?;
    let contacts: Vec<_> = snapshot
        .contacts
        .iter()
        .filter(|c| c.opportunity.as_deref() == Some(slug))
        .collect();

    if json {
        return print_json(&serde_json::json!({ "opportunity": opp, "contacts": contacts }));
    }

    println!("Opportunity: {} ({})", opp.name, opp.slug);
    println!("Account:     {}", snapshot.account_name(&opp.account));
    println!("Stage:       {}", opp.stage);
    println!(
        "Amount:      {}",
        opp.amount.map(|a| a.to_string()).unwrap_or_else(|| "-".into())
    );
    println!("Notes:       {}", or_dash(opp.notes.as_deref()));
    println!("\nContacts:");
    if contacts.is_empty() {
        println!("  (none)");
    }
    for c in &contacts {
        println!("  {} — {}", c.slug, c.name);
    }
    Ok(())
}
