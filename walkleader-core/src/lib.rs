//! walkleader-core: resolve walk-leader contact records to club roster members.
//!
//! Pure and synchronous. Nothing here does I/O or keeps state between calls.

pub mod member;
pub mod normalise;
pub mod signals;
pub mod prior;
pub mod resolver;
pub mod policy;

pub use member::{
    ContactDetails, LeaderMemberMatchResult, MatchConfidence, MatchType, Member,
    PriorContactMemberMatch,
};
pub use normalise::{
    normalise_id, normalise_name, normalise_phone, normalise_text, slug_for_lookup, valid_email,
};
pub use signals::{
    contact_id_alias_matches, initial_pattern_name_matches, match_members,
    matched_member_for_walk_leader, name_is_consistent, ContactProbe, Tier, TIERS,
};
pub use prior::{
    prior_matches_for_contact_id, prior_matches_from_walks, PriorEvidenceIndex, ResolvedWalk,
};
pub use resolver::{leader_match_result, resolve_with_index};
pub use policy::{should_auto_link_leader_match, LinkDecision};
