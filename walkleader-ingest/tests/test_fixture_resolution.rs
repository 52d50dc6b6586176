use chrono::NaiveDate;
use std::path::PathBuf;
use walkleader_core::{
    leader_match_result, prior_matches_from_walks, should_auto_link_leader_match, MatchType,
    PriorContactMemberMatch,
};
use walkleader_ingest::{parse_roster_csv, parse_walks_json, walks_since};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
        .join(name)
}

#[test]
fn test_fixture_roster_parses() {
    let members = parse_roster_csv(fixture("roster.csv")).unwrap();
    assert_eq!(members.len(), 6);
    assert_eq!(members[0].id, "m1");
    assert_eq!(members[0].display_name, "Alex Morgan");
    assert_eq!(members[4].display_name, "Christine Taylor");
}

#[test]
fn test_fixture_history_aggregates() {
    let history = parse_walks_json(fixture("walk_history.json")).unwrap();
    assert_eq!(history.len(), 7);

    let prior = prior_matches_from_walks(&history);
    assert_eq!(
        prior,
        vec![
            PriorContactMemberMatch::new("wm-7", "m3", 2),
            PriorContactMemberMatch::new("wm-9", "m2", 1),
            PriorContactMemberMatch::new("wm-11", "m4", 1),
            PriorContactMemberMatch::new("wm-11", "m5", 1),
            PriorContactMemberMatch::new("wm-12", "m99", 1),
        ]
    );
}

#[test]
fn test_fixture_pending_walks_resolve() {
    let members = parse_roster_csv(fixture("roster.csv")).unwrap();
    let history = parse_walks_json(fixture("walk_history.json")).unwrap();
    let pending = parse_walks_json(fixture("pending_walks.json")).unwrap();
    let prior = prior_matches_from_walks(&history);

    let outcomes: Vec<(String, Option<String>, MatchType, bool)> = pending
        .iter()
        .filter(|w| !w.is_attributed())
        .map(|w| {
            let r = leader_match_result(&members, &w.contact_details(), &prior);
            (
                w.label().to_string(),
                r.member_id().map(str::to_string),
                r.match_type,
                should_auto_link_leader_match(&r),
            )
        })
        .collect();

    let expected = vec![
        ("p-1", Some("m1"), MatchType::ContactId, true),
        ("p-2", Some("m3"), MatchType::PriorStrong, true),
        ("p-3", None, MatchType::PriorConflict, false),
        ("p-4", None, MatchType::PriorMissingMember, false),
        ("p-5", None, MatchType::PriorCurrentConflict, false),
        ("p-7", Some("m6"), MatchType::PhoneOnly, true),
        ("p-8", None, MatchType::None, false),
    ];
    assert_eq!(outcomes.len(), expected.len());
    for (got, want) in outcomes.iter().zip(expected) {
        assert_eq!(got.0, want.0);
        assert_eq!(got.1.as_deref(), want.1, "{}", want.0);
        assert_eq!(got.2, want.2, "{}", want.0);
        assert_eq!(got.3, want.3, "{}", want.0);
    }
}

#[test]
fn test_history_window_drops_old_conflict() {
    let members = parse_roster_csv(fixture("roster.csv")).unwrap();
    let history = parse_walks_json(fixture("walk_history.json")).unwrap();
    let recent = walks_since(history, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let prior = prior_matches_from_walks(&recent);

    // The 2024 m4 walk falls outside the window, leaving a single m5 pairing
    // that settles an otherwise ambiguous name.
    let pending = parse_walks_json(fixture("pending_walks.json")).unwrap();
    let p3 = pending.iter().find(|w| w.label() == "p-3").unwrap();
    let r = leader_match_result(&members, &p3.contact_details(), &prior);
    assert_eq!(r.member_id(), Some("m5"));
    assert_eq!(r.match_type, MatchType::PriorSingle);
    assert!(should_auto_link_leader_match(&r));
}
