//! Whether a match may be applied without a person confirming it.

use serde::{Deserialize, Serialize};

use crate::member::{LeaderMemberMatchResult, MatchConfidence};

/// True iff a member was found at HIGH or MEDIUM confidence.
pub fn should_auto_link_leader_match(result: &LeaderMemberMatchResult<'_>) -> bool {
    result.member.is_some()
        && matches!(result.confidence, MatchConfidence::High | MatchConfidence::Medium)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LinkDecision {
    AutoLink,
    Review,
}

impl LinkDecision {
    pub fn for_result(result: &LeaderMemberMatchResult<'_>) -> Self {
        if should_auto_link_leader_match(result) {
            LinkDecision::AutoLink
        } else {
            LinkDecision::Review
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LinkDecision::AutoLink => "auto-link",
            LinkDecision::Review => "review",
        }
    }
}
