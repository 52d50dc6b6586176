//! Current-signal matching: resolve a contact against the roster using the
//! identifiers it carries right now, without any history.
//!
//! Tiers are tried strictly in [`TIERS`] order. A tier resolves only when
//! exactly one member satisfies it; zero or several candidates fall through to
//! the next tier rather than picking one.

use log::{debug, trace};

use crate::member::{ContactDetails, LeaderMemberMatchResult, MatchConfidence, MatchType, Member};
use crate::normalise::{
    email_local_tokens, name_tokens, normalise_id, normalise_name, normalise_phone,
    normalise_text, slug_for_lookup, valid_email,
};

/// Both sides of a first-name prefix comparison must be at least this long.
pub const MIN_PREFIX_TOKEN_LEN: usize = 2;

/// Initial-pattern fallback is MEDIUM when the contact's first token is at least
/// this long, LOW otherwise.
pub const INITIAL_PATTERN_MEDIUM_MIN_FIRST_LEN: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    MemberId,
    ContactId,
    Email,
    PhoneAndName,
    PhoneOnly,
    NameOnly,
    NameInitialPattern,
}

pub const TIERS: [Tier; 7] = [
    Tier::MemberId,
    Tier::ContactId,
    Tier::Email,
    Tier::PhoneAndName,
    Tier::PhoneOnly,
    Tier::NameOnly,
    Tier::NameInitialPattern,
];

/// A contact normalised once up front.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactProbe {
    pub member_id: String,
    pub contact_id: String,
    pub name: String,
    pub email: String,
    pub email_valid: bool,
    pub phone: String,
}

impl ContactProbe {
    pub fn from_contact(contact: &ContactDetails) -> Self {
        Self {
            member_id: normalise_id(contact.member_id.as_deref()),
            contact_id: normalise_text(contact.contact_id.as_deref()),
            name: normalise_name(contact.display_name.as_deref()),
            email: normalise_text(contact.email.as_deref()),
            email_valid: valid_email(contact.email.as_deref()),
            phone: normalise_phone(contact.phone.as_deref()),
        }
    }
}

impl Tier {
    /// Whether the contact carries the signal this tier needs.
    fn applies(&self, probe: &ContactProbe) -> bool {
        match self {
            Tier::MemberId => !probe.member_id.is_empty(),
            Tier::ContactId => !probe.contact_id.is_empty(),
            Tier::Email => probe.email_valid,
            Tier::PhoneAndName => !probe.phone.is_empty() && !probe.name.is_empty(),
            // A supplied name could contradict the phone hit; prefer no match.
            Tier::PhoneOnly => !probe.phone.is_empty() && probe.name.is_empty(),
            Tier::NameOnly => {
                !probe.name.is_empty() && probe.email.is_empty() && probe.phone.is_empty()
            }
            Tier::NameInitialPattern => !probe.name.is_empty(),
        }
    }

    fn is_candidate(&self, member: &Member, probe: &ContactProbe) -> bool {
        match self {
            Tier::MemberId => normalise_id(member.id.as_str()) == probe.member_id,
            Tier::ContactId => {
                contact_id_alias_matches(probe.contact_id.as_str(), member.contact_id.as_deref())
            }
            Tier::Email => {
                let email = normalise_text(member.email.as_deref());
                !email.is_empty() && email == probe.email
            }
            Tier::PhoneAndName => {
                member_phone_matches(member, &probe.phone)
                    && member_full_names(member).contains(&probe.name)
            }
            Tier::PhoneOnly => member_phone_matches(member, &probe.phone),
            Tier::NameOnly => member_full_names(member).contains(&probe.name),
            Tier::NameInitialPattern => initial_pattern_name_matches(probe.name.as_str(), member),
        }
    }

    fn grade(&self, member: &Member, probe: &ContactProbe) -> (MatchConfidence, MatchType) {
        match self {
            Tier::MemberId => (MatchConfidence::High, MatchType::MemberId),
            Tier::ContactId => (MatchConfidence::Medium, MatchType::ContactId),
            Tier::Email => {
                if name_is_consistent(probe.name.as_str(), member) {
                    (MatchConfidence::Medium, MatchType::Email)
                } else {
                    (MatchConfidence::Low, MatchType::Email)
                }
            }
            Tier::PhoneAndName => (MatchConfidence::Medium, MatchType::PhoneAndName),
            Tier::PhoneOnly => (MatchConfidence::Medium, MatchType::PhoneOnly),
            Tier::NameOnly => {
                if has_initial_surname_shape(&probe.name) {
                    (MatchConfidence::Medium, MatchType::NameInitialPattern)
                } else {
                    (MatchConfidence::Low, MatchType::NameOnly)
                }
            }
            Tier::NameInitialPattern => {
                let first_len = probe.name.split(' ').next().map_or(0, str::len);
                if first_len >= INITIAL_PATTERN_MEDIUM_MIN_FIRST_LEN {
                    (MatchConfidence::Medium, MatchType::NameInitialPattern)
                } else {
                    (MatchConfidence::Low, MatchType::NameInitialPattern)
                }
            }
        }
    }

    /// Every member satisfying this tier for `probe`, or none if the tier does not apply.
    pub fn candidates<'a>(&self, members: &'a [Member], probe: &ContactProbe) -> Vec<&'a Member> {
        if !self.applies(probe) {
            return Vec::new();
        }
        members
            .iter()
            .filter(|m| self.is_candidate(m, probe))
            .collect()
    }

    /// The tier's result when exactly one member qualifies.
    pub fn resolve<'a>(
        &self,
        members: &'a [Member],
        probe: &ContactProbe,
    ) -> Option<LeaderMemberMatchResult<'a>> {
        let candidates = self.candidates(members, probe);
        trace!("tier {:?}: {} candidate(s)", self, candidates.len());

        match candidates.as_slice() {
            &[member] => {
                let (confidence, match_type) = self.grade(member, probe);
                Some(LeaderMemberMatchResult::matched(member, confidence, match_type))
            }
            _ => None,
        }
    }
}

/// Run the tiers in order and return the first unique hit.
pub fn match_members<'a>(
    members: &'a [Member],
    contact: &ContactDetails,
) -> LeaderMemberMatchResult<'a> {
    let probe = ContactProbe::from_contact(contact);

    for tier in TIERS {
        if let Some(result) = tier.resolve(members, &probe) {
            debug!(
                "contact {:?} resolved by {:?} to member {:?} ({})",
                contact.contact_id,
                tier,
                result.member_id(),
                result.confidence
            );
            return result;
        }
    }

    debug!("contact {:?}: no tier resolved uniquely", contact.contact_id);
    LeaderMemberMatchResult::unmatched(MatchType::None)
}

/// The signal matcher's member only.
pub fn matched_member_for_walk_leader<'a>(
    members: &'a [Member],
    contact: &ContactDetails,
) -> Option<&'a Member> {
    match_members(members, contact).member
}

/// Text-equal, slug-equal, or the member slug ends with `-<contact slug>`
/// (vendor ids carrying a group prefix such as `hf-52-al-m` for `Al M`).
pub fn contact_id_alias_matches<'a, 'b>(
    contact_id: impl Into<Option<&'a str>>,
    member_contact_id: impl Into<Option<&'b str>>,
) -> bool {
    let contact_id = contact_id.into();
    let member_contact_id = member_contact_id.into();

    let contact_text = normalise_text(contact_id);
    let member_text = normalise_text(member_contact_id);
    if contact_text.is_empty() || member_text.is_empty() {
        return false;
    }
    if contact_text == member_text {
        return true;
    }

    let contact_slug = slug_for_lookup(contact_id);
    let member_slug = slug_for_lookup(member_contact_id);
    if contact_slug.is_empty() || member_slug.is_empty() {
        return false;
    }

    contact_slug == member_slug || member_slug.ends_with(&format!("-{}", contact_slug))
}

/// Loose "first name + surname initial" match, e.g. `Al M` or `Alexander M`
/// against a member named Alex Morgan or holding `alex.morgan@...`.
pub fn initial_pattern_name_matches<'a>(
    contact_name: impl Into<Option<&'a str>>,
    member: &Member,
) -> bool {
    let tokens = name_tokens(contact_name);
    if tokens.len() < 2 {
        return false;
    }
    let first = tokens[0].as_str();
    if first.len() < MIN_PREFIX_TOKEN_LEN {
        return false;
    }
    let Some(last_initial) = tokens[tokens.len() - 1].chars().next() else {
        return false;
    };

    let email_tokens = email_local_tokens(member.email.as_deref());

    let mut first_names: Vec<String> = Vec::new();
    first_names.extend(member_first_token(member));
    first_names.extend(email_tokens.first().cloned());

    let mut last_names: Vec<String> = Vec::new();
    last_names.extend(member_last_token(member));
    if email_tokens.len() >= 2 {
        last_names.extend(email_tokens.last().cloned());
    }

    let first_ok = first_names.iter().any(|candidate| {
        candidate.len() >= MIN_PREFIX_TOKEN_LEN
            && (candidate.starts_with(first) || first.starts_with(candidate.as_str()))
    });
    let last_ok = last_names
        .iter()
        .any(|candidate| candidate.chars().next() == Some(last_initial));

    first_ok && last_ok
}

/// Whether a contact's name corroborates `member`. An absent name contradicts nothing.
pub fn name_is_consistent<'a>(contact_name: impl Into<Option<&'a str>>, member: &Member) -> bool {
    let name = normalise_name(contact_name);
    if name.is_empty() {
        return true;
    }
    member_full_names(member).contains(&name) || initial_pattern_name_matches(name.as_str(), member)
}

/// Exactly two tokens: a first name of 3+ characters and a single-letter surname.
fn has_initial_surname_shape(name: &str) -> bool {
    let tokens: Vec<&str> = name.split(' ').filter(|t| !t.is_empty()).collect();
    match tokens.as_slice() {
        [first, last] => first.len() >= INITIAL_PATTERN_MEDIUM_MIN_FIRST_LEN && last.len() == 1,
        _ => false,
    }
}

fn member_phone_matches(member: &Member, phone: &str) -> bool {
    let member_phone = normalise_phone(member.mobile_number.as_deref());
    !member_phone.is_empty() && member_phone == phone
}

/// Normalised display name plus normalised "first last".
fn member_full_names(member: &Member) -> Vec<String> {
    let mut names = Vec::with_capacity(2);
    let display = normalise_name(member.display_name.as_str());
    if !display.is_empty() {
        names.push(display);
    }
    let full = normalise_name(format!("{} {}", member.first_name, member.last_name).as_str());
    if !full.is_empty() && !names.contains(&full) {
        names.push(full);
    }
    names
}

fn member_first_token(member: &Member) -> Option<String> {
    name_tokens(member.first_name.as_str())
        .into_iter()
        .next()
        .or_else(|| name_tokens(member.display_name.as_str()).into_iter().next())
}

fn member_last_token(member: &Member) -> Option<String> {
    if let Some(last) = name_tokens(member.last_name.as_str()).pop() {
        return Some(last);
    }
    let mut display = name_tokens(member.display_name.as_str());
    if display.len() >= 2 { display.pop() } else { None }
}
