use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CadenceError {
    #[error("not initialized: run 'cadence init'")]
    NotInitialized,

    #[error("account not found: {0}")]
    AccountNotFound(String),

    #[error("account already exists: {0}")]
    AccountExists(String),

    #[error("opportunity not found: {0}")]
    OpportunityNotFound(String),

    #[error("opportunity already exists: {0}")]
    OpportunityExists(String),

    #[error("opportunity '{opportunity}' does not belong to account '{account}'")]
    OpportunityMismatch {
        opportunity: String,
        account: String,
    },

    #[error("contact not found: {0}")]
    ContactNotFound(String),

    #[error("contact already exists: {0}")]
    ContactExists(String),

    #[error("outreach event not found: {0}")]
    OutreachNotFound(String),

    #[error("invalid slug '{0}': must be lowercase alphanumeric with hyphens")]
    InvalidSlug(String),

    #[error("invalid cadence {0}: must be between 1 and 2600 business days")]
    InvalidCadence(u32),

    #[error("date {0} is outside the supported range (years 1000 to 9999)")]
    DateOutOfRange(NaiveDate),

    #[error("invalid stage: {0}")]
    InvalidStage(String),

    #[error("invalid outreach method '{0}': expected email or call")]
    InvalidMethod(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),
}

pub type Result<T> = std::result::Result<T, CadenceError>;
