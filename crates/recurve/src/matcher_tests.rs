use crate::Regex;

/// Spans must be ordered by start and non-overlapping; an empty span may
/// only touch its neighbors.
fn assert_ordered_non_overlapping(spans: &[(usize, usize)]) {
    for pair in spans.windows(2) {
        let (prev, next) = (pair[0], pair[1]);
        assert!(prev.0 <= next.0, "out of order: {prev:?} then {next:?}");
        assert!(prev.1 <= next.0, "overlap: {prev:?} then {next:?}");
    }
}

#[test]
fn enumeration_is_ordered_and_non_overlapping() {
    let re = Regex::new(r"\w+").unwrap();
    let spans = re.find_all_index(b"one two  three,four", -1).unwrap();
    assert_eq!(spans.len(), 4);
    assert_ordered_non_overlapping(&spans);
}

#[test]
fn adjacent_non_empty_matches_are_all_found() {
    let re = Regex::new("ab").unwrap();
    let spans = re.find_all_index(b"abab", -1).unwrap();
    assert_eq!(spans, vec![(0, 2), (2, 4)]);
}

// Pins the empty-match rule: an empty match glued to the end of the
// previous match is skipped, an empty match elsewhere is reported, and an
// empty match with no previously accepted match is never reported.
#[test]
fn empty_match_adjacency_rule() {
    let re = Regex::new("a*").unwrap();
    let spans = re.find_all_index(b"abaabaccadaaae", -1).unwrap();
    assert_eq!(
        spans,
        vec![(0, 1), (2, 4), (5, 6), (7, 7), (8, 9), (10, 13)]
    );
    assert_ordered_non_overlapping(&spans);
}

#[test]
fn leading_empty_matches_are_never_reported() {
    let re = Regex::new("x*").unwrap();
    assert_eq!(re.find_all_index(b"abc", -1).unwrap(), vec![]);
    assert!(!re.is_match(b"abc").unwrap());
}

#[test]
fn empty_subject_yields_no_matches() {
    let re = Regex::new(".*").unwrap();
    assert_eq!(re.find_all_index(b"", -1).unwrap(), vec![]);
    assert!(!re.is_match(b"").unwrap());
}

#[test]
fn first_match_scans_past_leading_empties() {
    // Single-match mode keeps scanning until a reportable match appears.
    let re = Regex::new("b*").unwrap();
    assert_eq!(re.find(b"aab").unwrap(), Some(&b"b"[..]));
    assert_eq!(re.find_index(b"aab").unwrap(), Some((2, 3)));
}

#[test]
fn cap_is_applied_after_enumeration() {
    let re = Regex::new("a*").unwrap();
    let all = re.find_all_index(b"abaabaccadaaae", -1).unwrap();
    for n in 0..all.len() {
        let capped = re.find_all_index(b"abaabaccadaaae", n as isize).unwrap();
        assert_eq!(capped, all[..n]);
    }
}
