use crate::error::CadenceError;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// OutreachMethod
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutreachMethod {
    Email,
    Call,
}

impl OutreachMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            OutreachMethod::Email => "email",
            OutreachMethod::Call => "call",
        }
    }
}

impl fmt::Display for OutreachMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for OutreachMethod {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "email" => Ok(OutreachMethod::Email),
            "call" => Ok(OutreachMethod::Call),
            _ => Err(CadenceError::InvalidMethod(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Stage
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Prospecting,
    Discovery,
    Proposal,
    Negotiation,
    ClosedWon,
    ClosedLost,
}

impl Stage {
    pub fn all() -> &'static [Stage] {
        &[
            Stage::Prospecting,
            Stage::Discovery,
            Stage::Proposal,
            Stage::Negotiation,
            Stage::ClosedWon,
            Stage::ClosedLost,
        ]
    }

    pub fn is_open(self) -> bool {
        !matches!(self, Stage::ClosedWon | Stage::ClosedLost)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Prospecting => "prospecting",
            Stage::Discovery => "discovery",
            Stage::Proposal => "proposal",
            Stage::Negotiation => "negotiation",
            Stage::ClosedWon => "closed_won",
            Stage::ClosedLost => "closed_lost",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Stage {
    type Err = CadenceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Stage::all()
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| CadenceError::InvalidStage(s.to_string()))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_parse() {
        assert_eq!("email".parse::<OutreachMethod>().unwrap(), OutreachMethod::Email);
        assert_eq!("call".parse::<OutreachMethod>().unwrap(), OutreachMethod::Call);
        assert!("fax".parse::<OutreachMethod>().is_err());
    }

    #[test]
    fn stage_parse_covers_all() {
        for stage in Stage::all() {
            assert_eq!(stage.as_str().parse::<Stage>().unwrap(), *stage);
        }
        assert!("won".parse::<Stage>().is_err());
    }

    #[test]
    fn closed_stages_are_not_open() {
        assert!(Stage::Proposal.is_open());
        assert!(!Stage::ClosedWon.is_open());
        assert!(!Stage::ClosedLost.is_open());
    }
}
