use crate::Regex;

#[test]
fn template_numbered_group() {
    let re = Regex::new(r"(\d+)\.\d+").unwrap();
    let subject = b"123.54321 Test";

    assert_eq!(re.replace_all(subject, b"${1}.12345").unwrap(), b"123.12345 Test");
    assert_eq!(re.replace_all(subject, b"$1.12345").unwrap(), b"123.12345 Test");
}

#[test]
fn template_missing_group_expands_empty() {
    let re = Regex::new(r"(\d+)\.\d+").unwrap();
    let subject = b"123.54321 Test";

    assert_eq!(re.replace_all(subject, b"${9}.12345").unwrap(), b".12345 Test");
    assert_eq!(re.replace_all(subject, b"${hi}.12345").unwrap(), b".12345 Test");
}

#[test]
fn template_named_group() {
    let re = Regex::new(r"(?P<area>\d{3})-(?P<line>\d{4})").unwrap();
    let out = re.replace_all(b"call 555-0199 now", b"${line}/${area}").unwrap();
    assert_eq!(out, b"call 0199/555 now");
}

#[test]
fn template_group_zero_is_whole_match() {
    let re = Regex::new(r"\d+").unwrap();
    let out = re.replace_all(b"a 12 b 345", b"<${0}>").unwrap();
    assert_eq!(out, b"a <12> b <345>");
}

#[test]
fn template_literal_dollar() {
    let re = Regex::new(r"\d+").unwrap();
    assert_eq!(re.replace_all(b"pay 5", b"$-").unwrap(), b"pay $-");
    assert_eq!(re.replace_all(b"pay 5", b"price: $").unwrap(), b"pay price: $");
}

#[test]
fn literal_replacement_is_not_expanded() {
    let re = Regex::new(r"(\d+)\.\d+").unwrap();
    let out = re.replace_all_literal(b"123.54321 Test", b"${1}.12345").unwrap();
    assert_eq!(out, b"${1}.12345 Test");
}

#[test]
fn callback_replacement() {
    let re = Regex::new(r"(\d+)\.\d+").unwrap();
    let out = re
        .replace_all_with(b"123.54321 Test", |m| {
            m.iter()
                .map(|&b| if b == b'.' { b',' } else { b })
                .collect()
        })
        .unwrap();
    assert_eq!(out, b"123,54321 Test");
}

#[test]
fn zero_matches_returns_subject_unchanged() {
    let re = Regex::new("xyz").unwrap();
    assert_eq!(re.replace_all(b"abc", b"!").unwrap(), b"abc");
    assert_eq!(re.replace_all_literal(b"abc", b"!").unwrap(), b"abc");
    assert_eq!(re.replace_all(b"", b"!").unwrap(), b"");
}

#[test]
fn whole_subject_replacement_has_replacement_length() {
    let re = Regex::new("^.*$").unwrap();
    let out = re.replace_all_literal(b"anything at all", b"xyz").unwrap();
    assert_eq!(out, b"xyz");
}

#[test]
fn drift_survives_growing_and_shrinking_replacements() {
    let re = Regex::new(r"\d+").unwrap();

    // Shrinking: every number collapses to one byte.
    let out = re.replace_all_literal(b"1 22 333 4444", b"x").unwrap();
    assert_eq!(out, b"x x x x");

    // Growing: every match doubles.
    let out = re
        .replace_all_with(b"1 22 333", |m| {
            let mut doubled = m.to_vec();
            doubled.extend_from_slice(m);
            doubled
        })
        .unwrap();
    assert_eq!(out, b"11 2222 333333");

    // Equal length leaves the layout alone.
    let out = re.replace_all_literal(b"12 34", b"ab").unwrap();
    assert_eq!(out, b"ab ab");
}

#[test]
fn replacement_spans_use_original_offsets() {
    // Group text must come from the original subject even after earlier
    // replacements have shifted the output.
    let re = Regex::new(r"(\w)(\w)").unwrap();
    let out = re.replace_all(b"abcd", b"${2}${1}--").unwrap();
    assert_eq!(out, b"ba--dc--");
}
