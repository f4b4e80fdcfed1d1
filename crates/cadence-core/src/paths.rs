use crate::error::{CadenceError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const CADENCE_DIR: &str = ".cadence";
pub const ACCOUNTS_DIR: &str = ".cadence/accounts";
pub const OPPORTUNITIES_DIR: &str = ".cadence/opportunities";
pub const CONTACTS_DIR: &str = ".cadence/contacts";

pub const CONFIG_FILE: &str = ".cadence/config.yaml";
pub const MANIFEST_FILE: &str = "manifest.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn cadence_dir(root: &Path) -> PathBuf {
    root.join(CADENCE_DIR)
}

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn account_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(ACCOUNTS_DIR).join(slug)
}

pub fn account_manifest(root: &Path, slug: &str) -> PathBuf {
    account_dir(root, slug).join(MANIFEST_FILE)
}

pub fn opportunity_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(OPPORTUNITIES_DIR).join(slug)
}

pub fn opportunity_manifest(root: &Path, slug: &str) -> PathBuf {
    opportunity_dir(root, slug).join(MANIFEST_FILE)
}

pub fn contact_dir(root: &Path, slug: &str) -> PathBuf {
    root.join(CONTACTS_DIR).join(slug)
}

pub fn contact_manifest(root: &Path, slug: &str) -> PathBuf {
    contact_dir(root, slug).join(MANIFEST_FILE)
}

// ---------------------------------------------------------------------------
// Slug validation
// ---------------------------------------------------------------------------

static SLUG_RE: OnceLock<Regex> = OnceLock::new();

fn slug_re() -> &'static Regex {
    SLUG_RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9\-]*[a-z0-9]$|^[a-z0-9]$").unwrap())
}

pub fn validate_slug(slug: &str) -> Result<()> {
    if slug.is_empty() || slug.len() > 64 || !slug_re().is_match(slug) {
        return Err(CadenceError::InvalidSlug(slug.to_string()));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_slugs() {
        for slug in ["acme", "a", "jane-doe", "globex-2024"] {
            validate_slug(slug).unwrap_or_else(|_| panic!("expected valid: {slug}"));
        }
    }

    #[test]
    fn invalid_slugs() {
        for slug in [
            "",
            "-leading",
            "trailing-",
            "has spaces",
            "Acme",
            "jane_doe",
        ] {
            assert!(validate_slug(slug).is_err(), "expected invalid: {slug}");
        }
    }

    #[test]
    fn slug_length_limit() {
        assert!(validate_slug(&"a".repeat(64)).is_ok());
        assert!(validate_slug(&"a".repeat(65)).is_err());
    }

    #[test]
    fn manifests_live_under_record_dirs() {
        let root = Path::new("/tmp/crm");
        assert_eq!(
            contact_manifest(root, "jane"),
            PathBuf::from("/tmp/crm/.cadence/contacts/jane/manifest.yaml")
        );
        assert_eq!(
            account_manifest(root, "acme"),
            PathBuf::from("/tmp/crm/.cadence/accounts/acme/manifest.yaml")
        );
    }
}
