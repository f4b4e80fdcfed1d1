use crate::contact::{DEFAULT_CADENCE_DAYS, MAX_CADENCE_DAYS};
use crate::dashboard::MAX_WINDOW_DAYS;
use crate::error::{CadenceError, Result};
use crate::paths;
use crate::prompt;
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// ConfigWarning / WarnLevel
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigWarning {
    pub level: WarnLevel,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarnLevel {
    Warning,
    Error,
}

// ---------------------------------------------------------------------------
// PromptConfig
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    /// Overrides the built-in outreach prompt template.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default = "default_tone")]
    pub tone: String,
    #[serde(default = "default_goal")]
    pub goal: String,
}

fn default_tone() -> String {
    "friendly and concise".to_string()
}

fn default_goal() -> String {
    "book a 20-minute call".to_string()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            template: None,
            tone: default_tone(),
            goal: default_goal(),
        }
    }
}

impl PromptConfig {
    pub fn template(&self) -> &str {
        self.template.as_deref().unwrap_or(prompt::DEFAULT_TEMPLATE)
    }
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_version")]
    pub version: u32,
    /// Sender name used when rendering outreach prompts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<String>,
    #[serde(default = "default_cadence_days")]
    pub default_cadence_days: u32,
    #[serde(default = "default_window")]
    pub dashboard_window_days: u32,
    #[serde(default)]
    pub prompt: PromptConfig,
}

fn default_version() -> u32 {
    1
}

fn default_cadence_days() -> u32 {
    DEFAULT_CADENCE_DAYS
}

fn default_window() -> u32 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_version(),
            owner: None,
            default_cadence_days: default_cadence_days(),
            dashboard_window_days: default_window(),
            prompt: PromptConfig::default(),
        }
    }
}

impl Config {
    pub fn load(root: &Path) -> Result<Self> {
        let path = paths::config_path(root);
        if !path.exists() {
            return Err(CadenceError::NotInitialized);
        }
        let data = std::fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&data)?;
        Ok(cfg)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let path = paths::config_path(root);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&path, data.as_bytes())
    }

    // -----------------------------------------------------------------------
    // Validation
    // -----------------------------------------------------------------------

    pub fn validate(&self) -> Vec<ConfigWarning> {
        let mut warnings = Vec::new();

        if self.default_cadence_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "default_cadence_days must be at least 1".to_string(),
            });
        } else if self.default_cadence_days > MAX_CADENCE_DAYS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: format!("default_cadence_days must be at most {MAX_CADENCE_DAYS}"),
            });
        } else if self.default_cadence_days > 60 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "default_cadence_days={} (more than 60 business days is unusual)",
                    self.default_cadence_days
                ),
            });
        }

        if self.dashboard_window_days == 0 {
            warnings.push(ConfigWarning {
                level: WarnLevel::Error,
                message: "dashboard_window_days must be at least 1".to_string(),
            });
        } else if self.dashboard_window_days > MAX_WINDOW_DAYS {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: format!(
                    "dashboard_window_days={} is capped at {MAX_WINDOW_DAYS}",
                    self.dashboard_window_days
                ),
            });
        }

        if let Some(template) = &self.prompt.template {
            if template.trim().is_empty() {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Error,
                    message: "prompt.template is empty".to_string(),
                });
            }
            for name in prompt::unknown_placeholders(template) {
                warnings.push(ConfigWarning {
                    level: WarnLevel::Warning,
                    message: format!("unknown placeholder '{{{{{name}}}}}' in prompt.template"),
                });
            }
        }

        if self.owner.is_none() {
            warnings.push(ConfigWarning {
                level: WarnLevel::Warning,
                message: "owner is not set; prompts will sign off as 'n/a'".to_string(),
            });
        }

        warnings
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_roundtrip() {
        let cfg = Config::default();
        let yaml = serde_yaml::to_string(&cfg).unwrap();
        let parsed: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed.version, 1);
        assert_eq!(parsed.default_cadence_days, 10);
        assert_eq!(parsed.dashboard_window_days, 10);
        assert!(parsed.prompt.template.is_none());
    }

    #[test]
    fn sparse_yaml_fills_defaults() {
        let parsed: Config = serde_yaml::from_str("owner: Sam\n").unwrap();
        assert_eq!(parsed.owner.as_deref(), Some("Sam"));
        assert_eq!(parsed.default_cadence_days, 10);
        assert_eq!(parsed.prompt.tone, "friendly and concise");
    }

    #[test]
    fn load_missing_is_not_initialized() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(CadenceError::NotInitialized)
        ));
    }

    #[test]
    fn save_then_load() {
        let dir = TempDir::new().unwrap();
        let cfg = Config {
            default_cadence_days: 7,
            ..Config::default()
        };
        cfg.save(dir.path()).unwrap();
        assert_eq!(Config::load(dir.path()).unwrap().default_cadence_days, 7);
    }

    #[test]
    fn validate_flags_zero_cadence_and_window() {
        let cfg = Config {
            owner: Some("Sam".into()),
            default_cadence_days: 0,
            dashboard_window_days: 0,
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.level == WarnLevel::Error)
                .count(),
            2
        );
    }

    #[test]
    fn validate_flags_unknown_placeholder() {
        let mut cfg = Config {
            owner: Some("Sam".into()),
            ..Config::default()
        };
        cfg.prompt.template = Some("Hi {{contact_name}}, re {{budget}}".into());
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].message.contains("{{budget}}"));
    }

    #[test]
    fn clean_config_has_no_warnings() {
        let cfg = Config {
            owner: Some("Sam".into()),
            ..Config::default()
        };
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn validate_flags_oversized_cadence_and_window() {
        let cfg = Config {
            owner: Some("Sam".into()),
            default_cadence_days: MAX_CADENCE_DAYS + 1,
            dashboard_window_days: MAX_WINDOW_DAYS + 1,
            ..Config::default()
        };
        let warnings = cfg.validate();
        assert_eq!(warnings.len(), 2);
        assert_eq!(warnings[0].level, WarnLevel::Error);
        assert_eq!(warnings[1].level, WarnLevel::Warning);
    }
}
