use crate::cmd::require_init;
use crate::output::print_json;
use anyhow::Context;
use cadence_core::config::WarnLevel;
use cadence_core::contact::validate_cadence;
use clap::Subcommand;
use std::path::Path;

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Print the current configuration
    Show,

    /// Validate the config for common mistakes
    Validate,

    /// Set the cadence given to new contacts
    SetCadence {
        /// Business days between touches
        days: u32,
    },

    /// Set the sender name used in outreach prompts
    SetOwner { name: String },
}

pub fn run(root: &Path, subcmd: ConfigSubcommand, json: bool) -> anyhow::Result<()> {
    let mut config = require_init(root)?;
    match subcmd {
        ConfigSubcommand::Show => {
            if json {
                print_json(&config)?;
            } else {
                print!("{}", serde_yaml::to_string(&config)?);
            }
            Ok(())
        }
        ConfigSubcommand::Validate => {
            let warnings = config.validate();
            let errors = warnings
                .iter()
                .filter(|w| w.level == WarnLevel::Error)
                .count();
            if json {
                print_json(&serde_json::json!({ "ok": errors == 0, "warnings": warnings }))?;
            } else if warnings.is_empty() {
                println!("Config OK");
            } else {
                for w in &warnings {
                    let tag = match w.level {
                        WarnLevel::Warning => "warning",
                        WarnLevel::Error => "error",
                    };
                    println!("{tag}: {}", w.message);
                }
            }
            if errors > 0 {
                anyhow::bail!("config has {errors} error(s)");
            }
            Ok(())
        }
        ConfigSubcommand::SetCadence { days } => {
            validate_cadence(days)?;
            config.default_cadence_days = days;
            config.save(root).context("failed to write config.yaml")?;
            if json {
                print_json(&serde_json::json!({ "default_cadence_days": days }))?;
            } else {
                println!("Default cadence set to {days} business days");
            }
            Ok(())
        }
        ConfigSubcommand::SetOwner { name } => {
            config.owner = Some(name.clone());
            config.save(root).context("failed to write config.yaml")?;
            if json {
                print_json(&serde_json::json!({ "owner": name }))?;
            } else {
                println!("Owner set to {name}");
            }
            Ok(())
        }
    }
}
