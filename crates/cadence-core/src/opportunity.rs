use crate::account::Account;
use crate::contact::Contact;
use crate::error::{CadenceError, Result};
use crate::paths;
use crate::types::Stage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Opportunity {
    pub slug: String,
    pub account: String,
    pub name: String,
    pub stage: Stage,
    /// Deal size in whole currency units.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Opportunity {
    pub fn new(
        slug: impl Into<String>,
        account: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            account: account.into(),
            name: name.into(),
            stage: Stage::Prospecting,
            amount: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn create(
        root: &Path,
        slug: impl Into<String>,
        account: impl Into<String>,
        name: impl Into<String>,
    ) -> Result<Self> {
        let slug = slug.into();
        let account = account.into();
        paths::validate_slug(&slug)?;

        if paths::opportunity_manifest(root, &slug).exists() {
            return Err(CadenceError::OpportunityExists(slug));
        }
        if !Account::exists(root, &account) {
            return Err(CadenceError::AccountNotFound(account));
        }

        let opp = Self::new(slug, account, name);
        opp.save(root)?;
        tracing::debug!(slug = %opp.slug, account = %opp.account, "opportunity created");
        Ok(opp)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        paths::validate_slug(slug)?;
        let manifest = paths::opportunity_manifest(root, slug);
        if !manifest.exists() {
            return Err(CadenceError::OpportunityNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        Ok(serde_yaml::from_str(&data)?)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::opportunity_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    /// All opportunities, oldest first.
    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let mut opps = Vec::new();
        for slug in crate::io::list_subdirs(&root.join(paths::OPPORTUNITIES_DIR))? {
            match Self::load(root, &slug) {
                Ok(o) => opps.push(o),
                Err(CadenceError::OpportunityNotFound(_) | CadenceError::InvalidSlug(_)) => {}
                Err(e) => return Err(e),
            }
        }
        opps.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(opps)
    }

    /// Delete an opportunity and clear the link on every contact that
    /// pointed at it. Returns the slugs of the unlinked contacts.
    pub fn delete(root: &Path, slug: &str) -> Result<Vec<String>> {
        paths::validate_slug(slug)?;
        let dir = paths::opportunity_dir(root, slug);
        if !paths::opportunity_manifest(root, slug).exists() {
            return Err(CadenceError::OpportunityNotFound(slug.to_string()));
        }

        let mut unlinked = Vec::new();
        for mut contact in Contact::list(root)? {
            if contact.opportunity.as_deref() == Some(slug) {
                contact.set_opportunity(None);
                contact.save(root)?;
                unlinked.push(contact.slug);
            }
        }
        crate::io::remove_dir(&dir)?;
        tracing::debug!(slug, unlinked = unlinked.len(), "opportunity deleted");
        Ok(unlinked)
    }

    pub fn set_stage(&mut self, stage: Stage) {
        self.stage = stage;
        self.updated_at = Utc::now();
    }

    pub fn set_amount(&mut self, amount: Option<u64>) {
        self.amount = amount;
        self.updated_at = Utc::now();
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
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
