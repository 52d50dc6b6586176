//! Roster, contact and match-result types.
//!
//! Everything here is a per-call snapshot: the engine borrows these values and
//! never edits them.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An entry in the internal club roster.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub mobile_number: Option<String>,
    /// External alias, often a vendor slug such as `hf-52-al-m`.
    #[serde(default)]
    pub contact_id: Option<String>,
}

impl Member {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    /// Sets first/last name and derives the display name from them.
    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.first_name = first.into();
        self.last_name = last.into();
        self.display_name = format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string();
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = display_name.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_mobile(mut self, mobile: impl Into<String>) -> Self {
        self.mobile_number = Some(mobile.into());
        self
    }

    pub fn with_contact_id(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }
}

/// The leader description captured from the external events system.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    #[serde(default)]
    pub contact_id: Option<String>,
    /// Already-known internal id. Authoritative when it resolves uniquely.
    #[serde(default)]
    pub member_id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl ContactDetails {
    pub fn with_contact_id(mut self, contact_id: impl Into<String>) -> Self {
        self.contact_id = Some(contact_id.into());
        self
    }

    pub fn with_member_id(mut self, member_id: impl Into<String>) -> Self {
        self.member_id = Some(member_id.into());
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.phone = Some(phone.into());
        self
    }
}

/// Aggregated historical observation of one contact-id/member-id pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorContactMemberMatch {
    pub contact_id: String,
    pub member_id: String,
    /// Number of walks previously resolved to this pairing.
    pub count: usize,
}

impl PriorContactMemberMatch {
    pub fn new(contact_id: impl Into<String>, member_id: impl Into<String>, count: usize) -> Self {
        Self {
            contact_id: contact_id.into(),
            member_id: member_id.into(),
            count,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchConfidence {
    High,
    Medium,
    Low,
}

impl MatchConfidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchConfidence::High => "HIGH",
            MatchConfidence::Medium => "MEDIUM",
            MatchConfidence::Low => "LOW",
        }
    }
}

impl fmt::Display for MatchConfidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which signal selected the member, or why none was selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchType {
    MemberId,
    ContactId,
    Email,
    PhoneAndName,
    PhoneOnly,
    NameOnly,
    NameInitialPattern,
    None,
    PriorStrong,
    PriorSingle,
    PriorConflict,
    PriorMissingMember,
    PriorCurrentConflict,
}

impl MatchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchType::MemberId => "MEMBER_ID",
            MatchType::ContactId => "CONTACT_ID",
            MatchType::Email => "EMAIL",
            MatchType::PhoneAndName => "PHONE_AND_NAME",
            MatchType::PhoneOnly => "PHONE_ONLY",
            MatchType::NameOnly => "NAME_ONLY",
            MatchType::NameInitialPattern => "NAME_INITIAL_PATTERN",
            MatchType::None => "NONE",
            MatchType::PriorStrong => "PRIOR_STRONG",
            MatchType::PriorSingle => "PRIOR_SINGLE",
            MatchType::PriorConflict => "PRIOR_CONFLICT",
            MatchType::PriorMissingMember => "PRIOR_MISSING_MEMBER",
            MatchType::PriorCurrentConflict => "PRIOR_CURRENT_CONFLICT",
        }
    }

    /// True for tags produced from historical evidence rather than current signals.
    pub fn is_prior(&self) -> bool {
        matches!(
            self,
            MatchType::PriorStrong
                | MatchType::PriorSingle
                | MatchType::PriorConflict
                | MatchType::PriorMissingMember
                | MatchType::PriorCurrentConflict
        )
    }
}

impl fmt::Display for MatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of resolving one contact against the roster.
///
/// `member` borrows from the roster slice passed in; the result never owns a member.
///
/// Fields are readable but outside this crate a result can only be built with
/// [`matched`](Self::matched) or [`unmatched`](Self::unmatched), so a result
/// without a member is always LOW.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
#[non_exhaustive]
pub struct LeaderMemberMatchResult<'a> {
    pub member: Option<&'a Member>,
    pub confidence: MatchConfidence,
    pub match_type: MatchType,
}

impl<'a> LeaderMemberMatchResult<'a> {
    pub fn matched(member: &'a Member, confidence: MatchConfidence, match_type: MatchType) -> Self {
        Self {
            member: Some(member),
            confidence,
            match_type,
        }
    }

    /// A result with no member. Always LOW.
    pub fn unmatched(match_type: MatchType) -> Self {
        Self {
            member: None,
            confidence: MatchConfidence::Low,
            match_type,
        }
    }

    pub fn member_id(&self) -> Option<&'a str> {
        self.member.map(|m| m.id.as_str())
    }
}
