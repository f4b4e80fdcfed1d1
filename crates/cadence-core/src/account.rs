use crate::contact::Contact;
use crate::error::{CadenceError, Result};
use crate::opportunity::Opportunity;
use crate::paths;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

// ---------------------------------------------------------------------------
// Account
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Account {
    pub slug: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What an account delete removed along with the account itself.
#[derive(Debug, Clone, Default, Serialize)]
pub struct CascadeReport {
    pub opportunities: Vec<String>,
    pub contacts: Vec<String>,
    pub outreach_events: usize,
}

impl Account {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            name: name.into(),
            industry: None,
            website: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    pub fn create(root: &Path, slug: impl Into<String>, name: impl Into<String>) -> Result<Self> {
        let slug = slug.into();
        paths::validate_slug(&slug)?;

        if Self::exists(root, &slug) {
            return Err(CadenceError::AccountExists(slug));
        }

        let account = Self::new(slug, name);
        account.save(root)?;
        tracing::debug!(slug = %account.slug, "account created");
        Ok(account)
    }

    pub fn exists(root: &Path, slug: &str) -> bool {
        paths::validate_slug(slug).is_ok() && paths::account_manifest(root, slug).exists()
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        paths::validate_slug(slug)?;
        let manifest = paths::account_manifest(root, slug);
        if !manifest.exists() {
            return Err(CadenceError::AccountNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let account: Account = serde_yaml::from_str(&data)?;
        Ok(account)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::account_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    /// All accounts, sorted by display name.
    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let mut accounts = Vec::new();
        for slug in crate::io::list_subdirs(&root.join(paths::ACCOUNTS_DIR))? {
            match Self::load(root, &slug) {
                Ok(a) => accounts.push(a),
                Err(CadenceError::AccountNotFound(_) | CadenceError::InvalidSlug(_)) => {}
                Err(e) => return Err(e),
            }
        }
        accounts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        Ok(accounts)
    }

    /// Delete an account together with its opportunities and contacts
    /// (and therefore their outreach history).
    pub fn delete(root: &Path, slug: &str) -> Result<CascadeReport> {
        paths::validate_slug(slug)?;
        if !Self::exists(root, slug) {
            return Err(CadenceError::AccountNotFound(slug.to_string()));
        }

        let mut report = CascadeReport::default();
        for contact in Contact::list(root)?.into_iter().filter(|c| c.account == slug) {
            report.outreach_events += Contact::delete(root, &contact.slug)?;
            report.contacts.push(contact.slug);
        }
        for opp in Opportunity::list(root)?.into_iter().filter(|o| o.account == slug) {
            Opportunity::delete(root, &opp.slug)?;
            report.opportunities.push(opp.slug);
        }
        crate::io::remove_dir(&paths::account_dir(root, slug))?;

        tracing::info!(
            slug,
            contacts = report.contacts.len(),
            opportunities = report.opportunities.len(),
            outreach_events = report.outreach_events,
            "account deleted"
        );
        Ok(report)
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_industry(&mut self, industry: Option<String>) {
        self.industry = industry;
        self.updated_at = Utc::now();
    }

    pub fn set_website(&mut self, website: Option<String>) {
        self.website = website;
        self.updated_at = Utc::now();
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
        self.updated_at = Utc::now();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OutreachMethod;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn account_create_load() {
        let dir = TempDir::new().unwrap();
        let a = Account::create(dir.path(), "acme", "Acme Corp").unwrap();
        assert_eq!(a.slug, "acme");

        let loaded = Account::load(dir.path(), "acme").unwrap();
        assert_eq!(loaded.name, "Acme Corp");
        assert!(loaded.industry.is_none());
    }

    #[test]
    fn account_duplicate_fails() {
        let dir = TempDir::new().unwrap();
        Account::create(dir.path(), "acme", "Acme").unwrap();
        assert!(matches!(
            Account::create(dir.path(), "acme", "Acme again"),
            Err(CadenceError::AccountExists(_))
        ));
    }

    #[test]
    fn account_invalid_slug_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Account::create(dir.path(), "Acme Corp", "Acme"),
            Err(CadenceError::InvalidSlug(_))
        ));
    }

    #[test]
    fn list_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        Account::create(dir.path(), "z-co", "Zeta").unwrap();
        Account::create(dir.path(), "a-co", "Omega").unwrap();
        Account::create(dir.path(), "m-co", "Alpha").unwrap();

        let names: Vec<String> = Account::list(dir.path())
            .unwrap()
            .into_iter()
            .map(|a| a.name)
            .collect();
        assert_eq!(names, vec!["Alpha", "Omega", "Zeta"]);
    }

    #[test]
    fn delete_cascades_to_contacts_and_opportunities() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        Account::create(root, "acme", "Acme").unwrap();
        Account::create(root, "globex", "Globex").unwrap();
        Opportunity::create(root, "acme-renewal", "acme", "Renewal").unwrap();

        let mut jane = Contact::new("jane", "Jane", "acme");
        jane.log_outreach(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            OutreachMethod::Email,
            None,
        );
        jane.log_outreach(
            NaiveDate::from_ymd_opt(2024, 1, 9).unwrap(),
            OutreachMethod::Call,
            None,
        );
        Contact::create(root, jane).unwrap();
        Contact::create(root, Contact::new("hank", "Hank", "globex")).unwrap();

        let report = Account::delete(root, "acme").unwrap();
        assert_eq!(report.contacts, vec!["jane"]);
        assert_eq!(report.opportunities, vec!["acme-renewal"]);
        assert_eq!(report.outreach_events, 2);

        assert!(!Account::exists(root, "acme"));
        assert!(matches!(
            Contact::load(root, "jane"),
            Err(CadenceError::ContactNotFound(_))
        ));
        assert!(Contact::load(root, "hank").is_ok());
        assert!(Opportunity::list(root).unwrap().is_empty());
    }

    #[test]
    fn delete_missing_account_fails() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Account::delete(dir.path(), "ghost"),
            Err(CadenceError::AccountNotFound(_))
        ));
    }

    #[test]
    fn delete_rejects_path_traversal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        Account::create(root, "acme", "Acme").unwrap();
        Contact::create(root, Contact::new("jane", "Jane", "acme")).unwrap();

        assert!(matches!(
            Account::delete(root, "../contacts/jane"),
            Err(CadenceError::InvalidSlug(_))
        ));
        assert!(matches!(
            Account::load(root, "../.."),
            Err(CadenceError::InvalidSlug(_))
        ));
        assert!(!Account::exists(root, "../contacts/jane"));
        assert!(Contact::load(root, "jane").is_ok());
    }

    #[test]
    fn list_skips_directories_with_invalid_names() {
        let dir = TempDir::new().unwrap();
        let root = dir.path();
        Account::create(root, "acme", "Acme").unwrap();
        std::fs::create_dir_all(root.join(paths::ACCOUNTS_DIR).join("Not A Slug")).unwrap();

        let accounts = Account::list(root).unwrap();
        assert_eq!(accounts.len(), 1);
    }
}
