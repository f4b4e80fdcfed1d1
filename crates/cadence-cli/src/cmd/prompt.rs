use crate::cmd::require_init;
use crate::output::print_json;
use anyhow::Context;
use cadence_core::{
    prompt::{self, PromptRequest},
    snapshot::Snapshot,
};
use chrono::NaiveDate;
use std::path::Path;

pub fn run(
    root: &Path,
    slug: &str,
    tone: Option<&str>,
    goal: Option<&str>,
    today: NaiveDate,
    json: bool,
) -> anyhow::Result<()> {
    let config = require_init(root)?;
    let snapshot = Snapshot::load(root).context("failed to load store")?;
    let contact = snapshot
        .contact(slug)
        .with_context(|| format!("contact '{slug}' not found"))?;

    let template = config.prompt.template();
    let unknown = prompt::unknown_placeholders(template);
    if !unknown.is_empty() {
        tracing::warn!(?unknown, "prompt template has unknown placeholders");
    }

    let request = PromptRequest::from_snapshot(
        &snapshot,
        contact,
        tone.unwrap_or(config.prompt.tone.as_str()),
        goal.unwrap_or(config.prompt.goal.as_str()),
        config.owner.as_deref(),
        today,
    );
    let rendered = prompt::render(template, &request);

    if json {
        print_json(&serde_json::json!({ "contact": slug, "prompt": rendered }))?;
    } else {
        print!("{rendered}");
        if !rendered.ends_with('\n') {
            println!();
        }
    }
    Ok(())
}
