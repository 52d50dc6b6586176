//! Historical evidence: which member each external contact id was resolved to
//! on previous walks, and how often.

use std::collections::HashMap;

use log::trace;

use crate::member::{ContactDetails, PriorContactMemberMatch};
use crate::normalise::{normalise_id, normalise_text, slug_for_lookup};

/// A previously resolved walk. Only the contact/member id pair is read.
pub trait ResolvedWalk {
    fn contact_id(&self) -> Option<&str>;
    fn member_id(&self) -> Option<&str>;
}

impl ResolvedWalk for ContactDetails {
    fn contact_id(&self) -> Option<&str> {
        self.contact_id.as_deref()
    }

    fn member_id(&self) -> Option<&str> {
        self.member_id.as_deref()
    }
}

impl<T: ResolvedWalk + ?Sized> ResolvedWalk for &T {
    fn contact_id(&self) -> Option<&str> {
        (**self).contact_id()
    }

    fn member_id(&self) -> Option<&str> {
        (**self).member_id()
    }
}

/// Count each distinct (contact id, member id) pairing across `walks`.
///
/// Pairs are compared case-insensitively; the first-seen spelling is kept.
/// Output is in first-seen order. Walks missing either id are skipped.
pub fn prior_matches_from_walks<W: ResolvedWalk>(walks: &[W]) -> Vec<PriorContactMemberMatch> {
    let mut out: Vec<PriorContactMemberMatch> = Vec::new();
    let mut positions: HashMap<(String, String), usize> = HashMap::new();

    for walk in walks {
        let contact_id = walk.contact_id().map(str::trim).unwrap_or_default();
        let member_id = walk.member_id().map(str::trim).unwrap_or_default();
        if contact_id.is_empty() || member_id.is_empty() {
            continue;
        }

        let key = (normalise_text(contact_id), normalise_id(member_id));
        match positions.get(&key) {
            Some(&i) => out[i].count += 1,
            None => {
                positions.insert(key, out.len());
                out.push(PriorContactMemberMatch::new(contact_id, member_id, 1));
            }
        }
    }

    out
}

/// Lookup structure over prior matches, built once per batch.
#[derive(Debug, Clone, Default)]
pub struct PriorEvidenceIndex<'p> {
    by_text: HashMap<String, Vec<&'p PriorContactMemberMatch>>,
    by_slug: HashMap<String, Vec<&'p PriorContactMemberMatch>>,
}

impl<'p> PriorEvidenceIndex<'p> {
    pub fn new(prior: &'p [PriorContactMemberMatch]) -> Self {
        let mut index = Self::default();
        for m in prior {
            let text = normalise_text(m.contact_id.as_str());
            if !text.is_empty() {
                index.by_text.entry(text).or_default().push(m);
            }
            let slug = slug_for_lookup(m.contact_id.as_str());
            if !slug.is_empty() {
                index.by_slug.entry(slug).or_default().push(m);
            }
        }
        index
    }

    pub fn is_empty(&self) -> bool {
        self.by_text.is_empty() && self.by_slug.is_empty()
    }

    /// Exact key, then slug key, then a suffix scan that must hit exactly one key.
    pub fn matches_for_contact_id<'a>(
        &self,
        contact_id: impl Into<Option<&'a str>>,
    ) -> Vec<&'p PriorContactMemberMatch> {
        let contact_id = contact_id.into();

        let text = normalise_text(contact_id);
        if text.is_empty() {
            return Vec::new();
        }
        if let Some(hits) = self.by_text.get(&text) {
            return hits.clone();
        }

        let slug = slug_for_lookup(contact_id);
        if slug.is_empty() {
            return Vec::new();
        }
        if let Some(hits) = self.by_slug.get(&slug) {
            return hits.clone();
        }

        let suffix = format!("-{}", slug);
        let keys: Vec<&String> = self
            .by_slug
            .keys()
            .filter(|k| **k == slug || k.ends_with(&suffix))
            .collect();

        match keys.as_slice() {
            [key] => self.by_slug.get(*key).cloned().unwrap_or_default(),
            _ => {
                trace!("prior lookup {:?}: {} suffix keys, ignoring", slug, keys.len());
                Vec::new()
            }
        }
    }
}

/// One-off lookup without keeping an index around.
pub fn prior_matches_for_contact_id<'p, 'a>(
    prior: &'p [PriorContactMemberMatch],
    contact_id: impl Into<Option<&'a str>>,
) -> Vec<&'p PriorContactMemberMatch> {
    PriorEvidenceIndex::new(prior).matches_for_contact_id(contact_id)
}
