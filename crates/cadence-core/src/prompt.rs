//! LLM prompt rendering for outreach emails.
//!
//! Templates use `{{name}}` markers. Unknown markers are left in place so a
//! typo shows up in the output instead of silently vanishing.

use crate::account::Account;
use crate::calendar::count_business_days;
use crate::contact::Contact;
use crate::opportunity::Opportunity;
use crate::snapshot::Snapshot;
use chrono::NaiveDate;
use regex::{Captures, Regex};
use std::sync::OnceLock;

pub const DEFAULT_TEMPLATE: &str = "\
You are helping {{sender_name}} write a short sales outreach email.

Recipient: {{contact_name}} ({{contact_role}}) at {{account_name}}.
Industry: {{industry}}
Opportunity: {{opportunity_name}} (stage: {{opportunity_stage}})
Last touch: {{last_outreach_method}} on {{last_outreach_date}}, {{days_since_last_outreach}} business days ago.
Notes from last touch: {{last_outreach_notes}}

Write the email in a {{tone}} tone. The goal is to {{goal}}.
Keep it under 150 words, include a subject line, and do not invent facts that are not listed above.
";

pub const PLACEHOLDERS: &[&str] = &[
    "contact_name",
    "contact_role",
    "account_name",
    "industry",
    "opportunity_name",
    "opportunity_stage",
    "last_outreach_date",
    "last_outreach_method",
    "last_outreach_notes",
    "days_since_last_outreach",
    "tone",
    "goal",
    "sender_name",
];

const MISSING: &str = "n/a";

static PLACEHOLDER_RE: OnceLock<Regex> = OnceLock::new();

fn placeholder_re() -> &'static Regex {
    PLACEHOLDER_RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_]+)\s*\}\}").unwrap())
}

/// Everything a template can refer to for one contact.
#[derive(Debug, Clone)]
pub struct PromptRequest<'a> {
    pub contact: &'a Contact,
    pub account: Option<&'a Account>,
    pub opportunity: Option<&'a Opportunity>,
    pub tone: &'a str,
    pub goal: &'a str,
    pub sender: Option<&'a str>,
    pub today: NaiveDate,
}

impl<'a> PromptRequest<'a> {
    /// Resolve the contact's account and opportunity from a snapshot.
    pub fn from_snapshot(
        snapshot: &'a Snapshot,
        contact: &'a Contact,
        tone: &'a str,
        goal: &'a str,
        sender: Option<&'a str>,
        today: NaiveDate,
    ) -> Self {
        Self {
            contact,
            account: snapshot.account(&contact.account),
            opportunity: contact
                .opportunity
                .as_deref()
                .and_then(|slug| snapshot.opportunity(slug)),
            tone,
            goal,
            sender,
            today,
        }
    }

    fn value(&self, name: &str) -> Option<String> {
        let last = self.contact.last_outreach();
        let value = match name {
            "contact_name" => Some(self.contact.name.clone()),
            "contact_role" => non_empty(&self.contact.role),
            "account_name" => Some(
                self.account
                    .map(|a| a.name.clone())
                    .unwrap_or_else(|| self.contact.account.clone()),
            ),
            "industry" => self.account.and_then(|a| a.industry.clone()),
            "opportunity_name" => self.opportunity.map(|o| o.name.clone()),
            "opportunity_stage" => self.opportunity.map(|o| o.stage.to_string()),
            "last_outreach_date" => last.map(|e| e.date.format("%Y-%m-%d").to_string()),
            "last_outreach_method" => last.map(|e| e.method.to_string()),
            // Notes render blank rather than "n/a" so the prompt reads naturally.
            "last_outreach_notes" => {
                return Some(last.and_then(|e| e.notes.clone()).unwrap_or_default())
            }
            "days_since_last_outreach" => {
                last.map(|e| count_business_days(e.date, self.today).to_string())
            }
            "tone" => non_empty(self.tone),
            "goal" => non_empty(self.goal),
            "sender_name" => self.sender.and_then(non_empty),
            _ => return None,
        };
        Some(value.unwrap_or_else(|| MISSING.to_string()))
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub fn render(template: &str, request: &PromptRequest<'_>) -> String {
    placeholder_re()
        .replace_all(template, |caps: &Captures<'_>| {
            request
                .value(&caps[1])
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Placeholder names in `template` that `render` does not know, in order of
/// first appearance.
pub fn unknown_placeholders(template: &str) -> Vec<String> {
    let mut unknown: Vec<String> = Vec::new();
    for caps in placeholder_re().captures_iter(template) {
        let name = &caps[1];
        if !PLACEHOLDERS.contains(&name) && !unknown.iter().any(|u| u == name) {
            unknown.push(name.to_string());
        }
    }
    unknown
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{OutreachMethod, Stage};

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn fixture() -> Snapshot {
        let mut acme = Account::new("acme", "Acme Corp");
        acme.industry = Some("Logistics".into());
        let mut opp = Opportunity::new("acme-fleet", "acme", "Fleet rollout");
        opp.stage = Stage::Proposal;

        let mut jane = Contact::new("jane", "Jane Doe", "acme");
        jane.role = "VP Operations".into();
        jane.opportunity = Some("acme-fleet".into());
        jane.log_outreach(d("2024-01-03"), OutreachMethod::Call, Some("asked for pricing".into()));

        Snapshot {
            accounts: vec![acme],
            opportunities: vec![opp],
            contacts: vec![jane],
        }
    }

    #[test]
    fn default_template_uses_every_placeholder() {
        assert!(unknown_placeholders(DEFAULT_TEMPLATE).is_empty());
        for name in PLACEHOLDERS {
            assert!(
                DEFAULT_TEMPLATE.contains(&format!("{{{{{name}}}}}")),
                "missing {name}"
            );
        }
    }

    #[test]
    fn renders_full_context() {
        let snap = fixture();
        let req = PromptRequest::from_snapshot(
            &snap,
            &snap.contacts[0],
            "warm",
            "confirm pricing",
            Some("Sam"),
            d("2024-01-10"),
        );
        let out = render(DEFAULT_TEMPLATE, &req);
        assert!(out.contains("helping Sam write"));
        assert!(out.contains("Jane Doe (VP Operations) at Acme Corp."));
        assert!(out.contains("Industry: Logistics"));
        assert!(out.contains("Fleet rollout (stage: proposal)"));
        assert!(out.contains("call on 2024-01-03, 5 business days ago"));
        assert!(out.contains("asked for pricing"));
        assert!(out.contains("a warm tone. The goal is to confirm pricing."));
        assert!(!out.contains("{{"));
    }

    #[test]
    fn missing_values_render_as_na() {
        let mut snap = fixture();
        snap.contacts[0] = Contact::new("bob", "Bob", "ghost");
        let req = PromptRequest::from_snapshot(
            &snap,
            &snap.contacts[0],
            "warm",
            "",
            None,
            d("2024-01-10"),
        );
        let out = render(
            "{{account_name}}|{{industry}}|{{last_outreach_date}}|{{last_outreach_notes}}|{{goal}}|{{sender_name}}",
            &req,
        );
        assert_eq!(out, "ghost|n/a|n/a||n/a|n/a");
    }

    #[test]
    fn whitespace_inside_braces_and_unknown_kept() {
        let snap = fixture();
        let req = PromptRequest::from_snapshot(
            &snap,
            &snap.contacts[0],
            "warm",
            "x",
            None,
            d("2024-01-10"),
        );
        assert_eq!(
            render("Hi {{ contact_name }} {{budget}}", &req),
            "Hi Jane Doe {{budget}}"
        );
    }

    #[test]
    fn unknown_placeholders_deduplicated() {
        assert_eq!(
            unknown_placeholders("{{a}} {{contact_name}} {{a}} {{ b }}"),
            vec!["a", "b"]
        );
    }
}
