use crate::account::Account;
use crate::contact::Contact;
use crate::error::{CadenceError, Result};
use crate::opportunity::Opportunity;
use crate::paths;
use serde::Serialize;
use std::path::Path;

/// Immutable copy of every record, taken once per command and handed to the
/// pure engine functions.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Snapshot {
    pub accounts: Vec<Account>,
    pub opportunities: Vec<Opportunity>,
    pub contacts: Vec<Contact>,
}

impl Snapshot {
    pub fn load(root: &Path) -> Result<Self> {
        if !paths::cadence_dir(root).is_dir() {
            return Err(CadenceError::NotInitialized);
        }
        Ok(Self {
            accounts: Account::list(root)?,
            opportunities: Opportunity::list(root)?,
            contacts: Contact::list(root)?,
        })
    }

    pub fn account(&self, slug: &str) -> Option<&Account> {
        self.accounts.iter().find(|a| a.slug == slug)
    }

    pub fn opportunity(&self, slug: &str) -> Option<&Opportunity> {
        self.opportunities.iter().find(|o| o.slug == slug)
    }

    pub fn contact(&self, slug: &str) -> Option<&Contact> {
        self.contacts.iter().find(|c| c.slug == slug)
    }

    /// Display name of an account, falling back to the slug for dangling
    /// references.
    pub fn account_name<'a>(&'a self, slug: &'a str) -> &'a str {
        self.account(slug).map(|a| a.name.as_str()).unwrap_or(slug)
    }

    pub fn contacts_for_account<'a>(&'a self, slug: &'a str) -> impl Iterator<Item = &'a Contact> {
        self.contacts.iter().filter(move |c| c.account == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn load_requires_init() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            Snapshot::load(dir.path()),
            Err(CadenceError::NotInitialized)
        ));
    }

    #[test]
    fn load_collects_records() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(paths::CADENCE_DIR)).unwrap();
        Account::create(dir.path(), "acme", "Acme Corp").unwrap();
        Contact::create(dir.path(), Contact::new("jane", "Jane", "acme")).unwrap();

        let snap = Snapshot::load(dir.path()).unwrap();
        assert_eq!(snap.accounts.len(), 1);
        assert_eq!(snap.account_name("acme"), "Acme Corp");
        assert_eq!(snap.account_name("ghost"), "ghost");
        assert_eq!(snap.contacts_for_account("acme").count(), 1);
        assert!(snap.contact("jane").is_some());
    }
}
