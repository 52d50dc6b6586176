//! Combine current signals with prior evidence into one match result.
//!
//! Repeated history outranks a weak current-period guess. Contradictory
//! history, history pointing at a member no longer on the roster, and history
//! that disagrees with the current match all come back as LOW with no member
//! so a person can look at them.

use std::collections::BTreeSet;

use log::debug;

use crate::member::{
    ContactDetails, LeaderMemberMatchResult, MatchConfidence, MatchType, Member,
    PriorContactMemberMatch,
};
use crate::normalise::normalise_id;
use crate::prior::PriorEvidenceIndex;
use crate::signals::match_members;

/// A prior pairing seen at least this many times is treated as corroborated.
pub const PRIOR_STRONG_MIN_COUNT: usize = 2;

/// Resolve one contact. Builds a throwaway index over `prior`; batch callers
/// should build a [`PriorEvidenceIndex`] once and use [`resolve_with_index`].
pub fn leader_match_result<'a>(
    members: &'a [Member],
    contact: &ContactDetails,
    prior: &[PriorContactMemberMatch],
) -> LeaderMemberMatchResult<'a> {
    let index = PriorEvidenceIndex::new(prior);
    resolve_with_index(members, contact, &index)
}

pub fn resolve_with_index<'a>(
    members: &'a [Member],
    contact: &ContactDetails,
    index: &PriorEvidenceIndex<'_>,
) -> LeaderMemberMatchResult<'a> {
    let current = match_members(members, contact);

    // A uniquely matching member id is final.
    if current.match_type == MatchType::MemberId {
        return current;
    }

    let priors = index.matches_for_contact_id(contact.contact_id.as_deref());
    if priors.is_empty() {
        return current;
    }

    let mut prior_ids: BTreeSet<String> = priors
        .iter()
        .map(|p| normalise_id(p.member_id.as_str()))
        .collect();
    if prior_ids.len() > 1 {
        debug!(
            "contact {:?}: history names {} different members",
            contact.contact_id,
            prior_ids.len()
        );
        return LeaderMemberMatchResult::unmatched(MatchType::PriorConflict);
    }
    let Some(prior_id) = prior_ids.pop_first() else {
        return current;
    };
    let count: usize = priors.iter().map(|p| p.count).sum();

    let Some(prior_member) = members.iter().find(|m| normalise_id(m.id.as_str()) == prior_id) else {
        debug!(
            "contact {:?}: prior member {} is not on the roster",
            contact.contact_id, prior_id
        );
        return LeaderMemberMatchResult::unmatched(MatchType::PriorMissingMember);
    };

    if let Some(current_member) = current.member {
        if normalise_id(current_member.id.as_str()) != prior_id {
            debug!(
                "contact {:?}: history says {} but {} matched {}",
                contact.contact_id, prior_id, current.match_type, current_member.id
            );
            return LeaderMemberMatchResult::unmatched(MatchType::PriorCurrentConflict);
        }
    }

    if count >= PRIOR_STRONG_MIN_COUNT {
        LeaderMemberMatchResult::matched(
            prior_member,
            MatchConfidence::High,
            MatchType::PriorStrong,
        )
    } else {
        LeaderMemberMatchResult::matched(
            prior_member,
            MatchConfidence::Medium,
            MatchType::PriorSingle,
        )
    }
}
