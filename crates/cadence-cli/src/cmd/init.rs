use anyhow::Context;
use cadence_core::{config::Config, io, paths};
use std::path::Path;

pub fn run(root: &Path, owner: Option<&str>) -> anyhow::Result<()> {
    println!("Initializing cadence in: {}", root.display());

    for dir in [
        paths::CADENCE_DIR,
        paths::ACCOUNTS_DIR,
        paths::OPPORTUNITIES_DIR,
        paths::CONTACTS_DIR,
    ] {
        let p = root.join(dir);
        io::ensure_dir(&p).with_context(|| format!("failed to create {}", p.display()))?;
    }

    let config_path = paths::config_path(root);
    if config_path.exists() {
        if let Some(owner) = owner {
            let mut cfg = Config::load(root).context("failed to load config.yaml")?;
            cfg.owner = Some(owner.to_string());
            cfg.save(root).context("failed to write config.yaml")?;
            println!("  updated: .cadence/config.yaml (owner)");
        } else {
            println!("  exists:  .cadence/config.yaml");
        }
    } else {
        let cfg = Config {
            owner: owner.map(str::to_string),
            ..Config::default()
        };
        cfg.save(root).context("failed to write config.yaml")?;
        println!("  created: .cadence/config.yaml");
    }

    tracing::info!(root = %root.display(), "store initialized");
    Ok(())
}
