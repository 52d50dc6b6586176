//! Turning match results into printable rows and batch summaries.

use serde::Serialize;
use std::collections::BTreeMap;
use walkleader_core::{
    resolve_with_index, LeaderMemberMatchResult, LinkDecision, MatchConfidence, MatchType, Member,
    PriorEvidenceIndex,
};
use walkleader_ingest::WalkRecord;

/// Owned, printable form of one match result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionRow {
    pub walk: Option<String>,
    pub member_id: Option<String>,
    pub member_name: Option<String>,
    pub confidence: MatchConfidence,
    pub match_type: MatchType,
    pub decision: LinkDecision,
}

impl ResolutionRow {
    pub fn from_result(walk: Option<&str>, result: &LeaderMemberMatchResult<'_>) -> Self {
        Self {
            walk: walk.map(str::to_string),
            member_id: result.member.map(|m| m.id.clone()),
            member_name: result.member.map(|m| m.display_name.clone()),
            confidence: result.confidence,
            match_type: result.match_type,
            decision: LinkDecision::for_result(result),
        }
    }

    pub fn to_line(&self) -> String {
        let member = match (&self.member_id, &self.member_name) {
            (Some(id), Some(name)) if !name.is_empty() => format!("{} ({})", id, name),
            (Some(id), _) => id.clone(),
            (None, _) => "-".to_string(),
        };
        let prefix = self
            .walk
            .as_deref()
            .map(|w| format!("{} | ", w))
            .unwrap_or_default();
        format!(
            "{}[{}] {} | {} | {}",
            prefix,
            self.decision.as_str(),
            member,
            self.confidence,
            self.match_type
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    pub resolved: usize,
    pub auto_link: usize,
    pub review: usize,
    pub already_attributed: usize,
    pub by_match_type: BTreeMap<MatchType, usize>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchReport {
    pub rows: Vec<ResolutionRow>,
    pub summary: BatchSummary,
}

/// Resolve every pending walk that does not already carry a member id.
pub fn resolve_pending(
    members: &[Member],
    pending: &[WalkRecord],
    index: &PriorEvidenceIndex<'_>,
) -> BatchReport {
    let mut rows = Vec::new();
    let mut summary = BatchSummary::default();

    for walk in pending {
        if walk.is_attributed() {
            summary.already_attributed += 1;
            continue;
        }

        let result = resolve_with_index(members, &walk.contact_details(), index);
        let row = ResolutionRow::from_result(Some(walk.label()), &result);

        summary.resolved += 1;
        match row.decision {
            LinkDecision::AutoLink => summary.auto_link += 1,
            LinkDecision::Review => summary.review += 1,
        }
        *summary.by_match_type.entry(row.match_type).or_default() += 1;

        rows.push(row);
    }

    BatchReport { rows, summary }
}

pub fn summary_lines(summary: &BatchSummary) -> Vec<String> {
    let mut out = vec![format!(
        "Resolved {} walk(s): {} auto-link, {} for review ({} already attributed)",
        summary.resolved, summary.auto_link, summary.review, summary.already_attributed
    )];
    for (match_type, n) in &summary.by_match_type {
        out.push(format!("  {:<24} {}", match_type.as_str(), n));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use walkleader_core::{prior_matches_from_walks, PriorContactMemberMatch};
    use walkleader_ingest::parse_walks_json_str;

    fn roster() -> Vec<Member> {
        vec![
            Member::new("m1").with_name("Alex", "Morgan").with_contact_id("hf-52-al-m"),
            Member::new("m2").with_name("Sam", "Jones"),
        ]
    }

    #[test]
    fn test_resolve_pending_counts_decisions() {
        let members = roster();
        let pending = parse_walks_json_str(
            r#"[
                {"id": "p1", "fields": {"contactDetails": {"contactId": "Al M"}}},
                {"id": "p2", "fields": {"contactDetails": {"contactId": "wm-2", "displayName": "Sam Jones"}}},
                {"id": "p3", "fields": {"contactDetails": {"contactId": "wm-3", "memberId": "m2"}}},
                {"id": "p4", "fields": {"contactDetails": {"contactId": "wm-4"}}}
            ]"#,
        )
        .unwrap();
        let history = parse_walks_json_str(
            r#"[
                {"fields": {"contactDetails": {"contactId": "wm-4", "memberId": "m1"}}},
                {"fields": {"contactDetails": {"contactId": "wm-4", "memberId": "m2"}}}
            ]"#,
        )
        .unwrap();
        let prior = prior_matches_from_walks(&history);
        let index = PriorEvidenceIndex::new(&prior);

        let report = resolve_pending(&members, &pending, &index);
        let s = &report.summary;
        assert_eq!(s.resolved, 3);
        assert_eq!(s.already_attributed, 1);
        assert_eq!(s.auto_link, 1);
        assert_eq!(s.review, 2);
        assert_eq!(s.by_match_type.get(&MatchType::ContactId), Some(&1));
        assert_eq!(s.by_match_type.get(&MatchType::NameOnly), Some(&1));
        assert_eq!(s.by_match_type.get(&MatchType::PriorConflict), Some(&1));

        let decisions: Vec<LinkDecision> = report.rows.iter().map(|r| r.decision).collect();
        assert_eq!(
            decisions,
            vec![LinkDecision::AutoLink, LinkDecision::Review, LinkDecision::Review]
        );
    }

    #[test]
    fn test_row_line_format() {
        let members = roster();
        let prior = vec![PriorContactMemberMatch::new("wm-1", "m2", 2)];
        let index = PriorEvidenceIndex::new(&prior);
        let pending = parse_walks_json_str(
            r#"[{"id": "p1", "fields": {"contactDetails": {"contactId": "wm-1"}}}]"#,
        )
        .unwrap();
        let report = resolve_pending(&members, &pending, &index);
        assert_eq!(
            report.rows[0].to_line(),
            "p1 | [auto-link] m2 (Sam Jones) | HIGH | PRIOR_STRONG"
        );
        assert_eq!(summary_lines(&report.summary).len(), 2);
    }

    #[test]
    fn test_row_serializes_tags() {
        let result = LeaderMemberMatchResult::unmatched(MatchType::PriorMissingMember);
        let row = ResolutionRow::from_result(None, &result);
        let v = serde_json::to_value(&row).unwrap();
        assert_eq!(v["matchType"], "PRIOR_MISSING_MEMBER");
        assert_eq!(v["decision"], "review");
        assert!(v["memberId"].is_null());
        assert_eq!(row.to_line(), "[review] - | LOW | PRIOR_MISSING_MEMBER");
    }
}
