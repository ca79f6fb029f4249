//! Custom assertions for testing
//!
//! Provides assertions on FASTA text and on canonical tree strings of the
//! form `((A, B), C)`.

use std::collections::BTreeSet;

/// Assert that a FASTA content is valid
pub fn assert_valid_fasta(content: &str) {
    let lines: Vec<&str> = content.lines().collect();
    assert!(!lines.is_empty(), "FASTA content is empty");

    let mut has_header = false;

    for line in lines {
        if let Some(header) = line.strip_prefix('>') {
            assert!(!header.trim().is_empty(), "Empty FASTA header found");
            has_header = true;
        } else if !line.trim().is_empty() {
            assert!(has_header, "Sequence data before first header: {}", line);
            assert!(
                line.chars().all(|c| c.is_ascii_alphabetic() || c == '-' || c == '*'),
                "Invalid sequence character found: {}",
                line
            );
        }
    }

    assert!(has_header, "No FASTA headers found");
}

/// Leaf identifiers of a canonical tree string, in left-to-right order.
///
/// Panics when the string is not a well-formed binary tree: every internal
/// node must be `(left, right)` with exactly two children.
pub fn canonical_leaves(canonical: &str) -> Vec<String> {
    let mut leaves = Vec::new();
    let rest = parse_node(canonical, &mut leaves);
    assert!(
        rest.is_empty(),
        "Trailing text {:?} after tree in {:?}",
        rest,
        canonical
    );
    leaves
}

fn parse_node<'a>(input: &'a str, leaves: &mut Vec<String>) -> &'a str {
    if let Some(inner) = input.strip_prefix('(') {
        let rest = parse_node(inner, leaves);
        let rest = rest
            .strip_prefix(", ")
            .unwrap_or_else(|| panic!("Expected \", \" before {:?}", rest));
        let rest = parse_node(rest, leaves);
        rest.strip_prefix(')')
            .unwrap_or_else(|| panic!("Expected \")\" before {:?}", rest))
    } else {
        let end = input.find(&[',', ')'][..]).unwrap_or(input.len());
        assert!(end > 0, "Empty leaf identifier before {:?}", input);
        leaves.push(input[..end].to_string());
        &input[end..]
    }
}

/// Assert that `canonical` is a well-formed tree containing each of
/// `expected_ids` exactly once and nothing else
pub fn assert_canonical_tree<S: AsRef<str>>(canonical: &str, expected_ids: &[S]) {
    let leaves = canonical_leaves(canonical);
    let unique: BTreeSet<&str> = leaves.iter().map(String::as_str).collect();
    assert_eq!(
        unique.len(),
        leaves.len(),
        "Leaf repeated in tree {:?}",
        canonical
    );

    let expected: BTreeSet<&str> = expected_ids.iter().map(|s| s.as_ref()).collect();
    assert_eq!(unique, expected, "Leaf set mismatch in tree {:?}", canonical);
}
