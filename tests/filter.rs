// tests/filter.rs

use proptest::prelude::*;

use fswatch::errors::FswatchError;
use fswatch::types::{Op, Trigger, event_list};
use fswatch::watch::OpFilter;

const KINDS: [Op; 5] = [Op::CREATE, Op::WRITE, Op::REMOVE, Op::RENAME, Op::CHMOD];

#[test]
fn unknown_event_name_is_rejected_with_first_offender() {
    let err = OpFilter::from_names(&["no", "such", "event"]).unwrap_err();

    assert!(matches!(&err, FswatchError::UnknownEventType(name) if name == "no"));
    assert_eq!(err.to_string(), r#"unknown event type "no""#);
}

#[test]
fn unknown_name_after_valid_ones_is_still_rejected() {
    let err = OpFilter::new(&["create", "Moved"]).unwrap_err();
    assert_eq!(err.to_string(), r#"unknown event type "Moved""#);
}

#[test]
fn allow_list_is_case_insensitive() {
    let filter = OpFilter::from_names(&["create", "CHMOD", "Write"]).unwrap();

    assert!(filter.pass(Op::CREATE));
    assert!(filter.pass(Op::CHMOD));
    assert!(filter.pass(Op::WRITE));
    assert!(!filter.pass(Op::RENAME));
    assert!(!filter.pass(Op::REMOVE));
}

#[test]
fn multi_kind_event_passes_if_any_kind_matches() {
    let filter = OpFilter::from_names(&["remove"]).unwrap();

    assert!(filter.pass(Op::REMOVE | Op::RENAME));
    assert!(!filter.pass(Op::CREATE | Op::WRITE));
    assert!(!filter.pass(Op::EMPTY));
}

#[test]
fn no_names_means_pass_all() {
    let none: [&str; 0] = [];
    let filter = OpFilter::new(&none).unwrap();

    assert_eq!(filter, OpFilter::PassAll);
    assert!(filter.pass(Op::EMPTY));
    for op in KINDS {
        assert!(filter.pass(op));
    }
    assert!(filter.pass(Op::from_bits(1 << 20)));
}

#[test]
fn event_list_is_sorted_and_ignores_unknown_bits() {
    assert_eq!(event_list(Op::CREATE | Op::RENAME), vec!["create", "rename"]);
    assert_eq!(event_list(Op::RENAME | Op::CREATE), vec!["create", "rename"]);
    assert_eq!(
        event_list(Op::WRITE | Op::CHMOD | Op::REMOVE | Op::from_bits(1 << 12)),
        vec!["chmod", "remove", "write"]
    );
    assert!(event_list(Op::EMPTY).is_empty());
}

#[test]
fn trigger_from_op_carries_sorted_names() {
    let trigger = Trigger::from_op("/tmp/a", Op::WRITE | Op::CREATE);
    assert_eq!(trigger.path, "/tmp/a");
    assert_eq!(trigger.events, vec!["create", "write"]);
}

#[test]
fn op_display_lists_kinds() {
    assert_eq!(Op::EMPTY.to_string(), "none");
    assert_eq!((Op::WRITE | Op::CREATE).to_string(), "CREATE|WRITE");
}

proptest! {
    #[test]
    fn allow_list_passes_iff_sets_intersect(allowed in 0u32..32, observed in 0u32..32) {
        let filter = OpFilter::AllowList(Op::from_bits(allowed));
        prop_assert_eq!(filter.pass(Op::from_bits(observed)), allowed & observed != 0);
    }

    #[test]
    fn names_build_the_union_of_kinds(picks in proptest::collection::vec(0usize..5, 1..8)) {
        let names: Vec<String> = picks
            .iter()
            .map(|&i| KINDS[i].names()[0].to_uppercase())
            .collect();
        let union = picks.iter().fold(Op::EMPTY, |acc, &i| acc | KINDS[i]);

        let filter = OpFilter::from_names(&names).unwrap();
        prop_assert_eq!(filter, OpFilter::AllowList(union));

        let list = event_list(union);
        let mut sorted = list.clone();
        sorted.sort();
        sorted.dedup();
        prop_assert_eq!(list, sorted);
    }
}
