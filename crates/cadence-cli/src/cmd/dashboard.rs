use crate::cmd::require_init;
use crate::output::{print_json, print_table};
use anyhow::Context;
use cadence_core::{dashboard::Dashboard, snapshot::Snapshot};
use chrono::NaiveDate;
use std::path::Path;

pub fn run(root: &Path, window: Option<u32>, today: NaiveDate, json: bool) -> anyhow::Result<()> {
    let config = require_init(root)?;
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let window = window.unwrap_or(config.dashboard_window_days);
    let dash = Dashboard::build(&snapshot, today, window);

    if json {
        return print_json(&dash);
    }

    println!("Dashboard for {today}");
    println!("  Due today:          {} ({} rollover)", dash.due_today, dash.rollover);
    println!("  Next business day:  {}", dash.due_next_business_day);
    println!("  Touched today:      {}", dash.touched_today);
    println!(
        "  Week to date:       {} ({} email, {} call)",
        dash.week_to_date.total(),
        dash.week_to_date.email,
        dash.week_to_date.call
    );
    println!(
        "  Streak:             {} business days (longest {})",
        dash.current_streak, dash.longest_streak
    );

    if !dash.activity.is_empty() {
        println!("\nActivity:");
        let rows = dash
            .activity
            .iter()
            .map(|p| {
                vec![
                    p.date.to_string(),
                    p.counts.email.to_string(),
                    p.counts.call.to_string(),
                    "#".repeat(p.counts.total()),
                ]
            })
            .collect();
        print_table(&["DATE", "EMAIL", "CALL", ""], rows);
    }

    println!("\nPipeline:");
    let rows = dash
        .pipeline
        .iter()
        .map(|r| vec![r.stage.to_string(), r.count.to_string(), r.amount.to_string()])
        .collect();
    print_table(&["STAGE", "COUNT", "AMOUNT"], rows);
    println!("  Open pipeline:      {}", dash.open_pipeline);

    if !dash.accounts.is_empty() {
        println!("\nAccounts:");
        let rows = dash
            .accounts
            .iter()
            .map(|a| vec![a.name.clone(), a.contacts.to_string(), a.due_today.to_string()])
            .collect();
        print_table(&["ACCOUNT", "CONTACTS", "DUE"], rows);
    }
    Ok(())
}
