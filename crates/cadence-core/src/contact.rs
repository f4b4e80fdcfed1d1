use crate::account::Account;
use crate::calendar;
use crate::error::{CadenceError, Result};
use crate::opportunity::Opportunity;
use crate::paths;
use crate::types::OutreachMethod;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_CADENCE_DAYS: u32 = 10;
/// Roughly ten years of business days.
pub const MAX_CADENCE_DAYS: u32 = 2600;

fn default_cadence_days() -> u32 {
    DEFAULT_CADENCE_DAYS
}

// ---------------------------------------------------------------------------
// OutreachEvent
// ---------------------------------------------------------------------------

/// A single touch. Never mutated after it is logged; only removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutreachEvent {
    pub id: String,
    pub date: NaiveDate,
    pub method: OutreachMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub logged_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Contact
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Contact {
    pub slug: String,
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default = "default_cadence_days")]
    pub cadence_days: u32,
    pub account: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opportunity: Option<String>,
    /// Most recent first.
    #[serde(default)]
    pub outreach: Vec<OutreachEvent>,
    /// Monotonic counter for outreach ids; ids are never reused after a delete.
    #[serde(default)]
    pub outreach_seq: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Contact {
    pub fn new(
        slug: impl Into<String>,
        name: impl Into<String>,
        account: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            slug: slug.into(),
            name: name.into(),
            role: String::new(),
            email: None,
            cadence_days: DEFAULT_CADENCE_DAYS,
            account: account.into(),
            opportunity: None,
            outreach: Vec::new(),
            outreach_seq: 0,
            created_at: now,
            updated_at: now,
        }
    }

    // ---------------------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------------------

    /// Persist a new contact after checking its slug, cadence and links.
    pub fn create(root: &Path, contact: Contact) -> Result<Self> {
        paths::validate_slug(&contact.slug)?;
        validate_cadence(contact.cadence_days)?;

        if paths::contact_manifest(root, &contact.slug).exists() {
            return Err(CadenceError::ContactExists(contact.slug));
        }
        if !Account::exists(root, &contact.account) {
            return Err(CadenceError::AccountNotFound(contact.account));
        }
        if let Some(opp) = &contact.opportunity {
            check_opportunity(root, opp, &contact.account)?;
        }

        contact.save(root)?;
        tracing::debug!(slug = %contact.slug, account = %contact.account, "contact created");
        Ok(contact)
    }

    pub fn load(root: &Path, slug: &str) -> Result<Self> {
        paths::validate_slug(slug)?;
        let manifest = paths::contact_manifest(root, slug);
        if !manifest.exists() {
            return Err(CadenceError::ContactNotFound(slug.to_string()));
        }
        let data = std::fs::read_to_string(&manifest)?;
        let mut contact: Contact = serde_yaml::from_str(&data)?;
        for event in &contact.outreach {
            calendar::check_date(event.date)?;
        }
        contact.sort_outreach();
        Ok(contact)
    }

    pub fn save(&self, root: &Path) -> Result<()> {
        let manifest = paths::contact_manifest(root, &self.slug);
        let data = serde_yaml::to_string(self)?;
        crate::io::atomic_write(&manifest, data.as_bytes())
    }

    /// All contacts, sorted by name.
    pub fn list(root: &Path) -> Result<Vec<Self>> {
        let mut contacts = Vec::new();
        for slug in crate::io::list_subdirs(&root.join(paths::CONTACTS_DIR))? {
            match Self::load(root, &slug) {
                Ok(c) => contacts.push(c),
                Err(CadenceError::ContactNotFound(_) | CadenceError::InvalidSlug(_)) => {}
                Err(e) => return Err(e),
            }
        }
        contacts.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.slug.cmp(&b.slug)));
        Ok(contacts)
    }

    /// Delete a contact and its outreach history. Returns the number of
    /// outreach events removed with it.
    pub fn delete(root: &Path, slug: &str) -> Result<usize> {
        let contact = Self::load(root, slug)?;
        crate::io::remove_dir(&paths::contact_dir(root, slug))?;
        tracing::debug!(slug, outreach_events = contact.outreach.len(), "contact deleted");
        Ok(contact.outreach.len())
    }

    // ---------------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------------

    pub fn set_cadence(&mut self, days: u32) -> Result<()> {
        validate_cadence(days)?;
        self.cadence_days = days;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn set_opportunity(&mut self, opportunity: Option<String>) {
        self.opportunity = opportunity;
        self.updated_at = Utc::now();
    }

    /// Link to an opportunity after checking it exists under the same account.
    pub fn link_opportunity(&mut self, root: &Path, opportunity: &str) -> Result<()> {
        check_opportunity(root, opportunity, &self.account)?;
        self.set_opportunity(Some(opportunity.to_string()));
        Ok(())
    }

    pub fn update_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.updated_at = Utc::now();
    }

    pub fn set_role(&mut self, role: impl Into<String>) {
        self.role = role.into();
        self.updated_at = Utc::now();
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email;
        self.updated_at = Utc::now();
    }

    // ---------------------------------------------------------------------------
    // Outreach
    // ---------------------------------------------------------------------------

    /// Record a touch and return its id.
    pub fn log_outreach(
        &mut self,
        date: NaiveDate,
        method: OutreachMethod,
        notes: Option<String>,
    ) -> String {
        self.outreach_seq += 1;
        let id = format!("O{}", self.outreach_seq);
        self.outreach.insert(
            0,
            OutreachEvent {
                id: id.clone(),
                date,
                method,
                notes,
                logged_at: Utc::now(),
            },
        );
        self.sort_outreach();
        self.updated_at = Utc::now();
        id
    }

    pub fn remove_outreach(&mut self, id: &str) -> Result<OutreachEvent> {
        let pos = self
            .outreach
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| CadenceError::OutreachNotFound(id.to_string()))?;
        self.updated_at = Utc::now();
        Ok(self.outreach.remove(pos))
    }

    pub fn last_outreach(&self) -> Option<&OutreachEvent> {
        self.outreach.first()
    }

    pub fn last_outreach_date(&self) -> Option<NaiveDate> {
        self.last_outreach().map(|e| e.date)
    }

    // Stable: same-date events keep newest-logged first.
    fn sort_outreach(&mut self) {
        self.outreach.sort_by(|a, b| b.date.cmp(&a.date));
    }
}

pub fn validate_cadence(days: u32) -> Result<()> {
    if days == 0 || days > MAX_CADENCE_DAYS {
        return Err(CadenceError::InvalidCadence(days));
    }
    Ok(())
}

fn check_opportunity(root: &Path, opportunity: &str, account: &str) -> Result<()> {
    let opp = Opportunity::load(root, opportunity)?;
    if opp.account != account {
        return Err(CadenceError::OpportunityMismatch {
            opportunity: opportunity.to_string(),
            account: account.to_string(),
        });
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
