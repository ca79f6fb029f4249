//! Standard output utilities for consistent command formatting

use colored::*;
use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, Color as TableColor, ContentArrangement, Table};
use phylo_bio::clustering::{ClusterNode, MergeStep};
use std::collections::HashMap;
use std::fmt::Write;

/// Display a section header
pub fn section_header(title: &str) {
    println!("\n{}", title.bold().cyan());
}

/// Create a standard table with our preferred styling
pub fn create_standard_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Create a standard header cell
pub fn header_cell(text: &str) -> Cell {
    Cell::new(text)
        .add_attribute(Attribute::Bold)
        .fg(TableColor::Cyan)
}

pub fn format_score(score: f64) -> String {
    format!("{:.4}", score)
}

/// Merge score keyed by the canonical string of the node the merge created
pub fn merge_scores(merges: &[MergeStep]) -> HashMap<String, f64> {
    merges
        .iter()
        .map(|m| (format!("({}, {})", m.left, m.right), m.score))
        .collect()
}

/// One row per merge, in the order the merges happened
pub fn merge_table(merges: &[MergeStep]) -> Table {
    let mut table = create_standard_table();
    table.set_header(vec![
        header_cell("Step"),
        header_cell("Left"),
        header_cell("Right"),
        header_cell("Similarity"),
        header_cell("Via"),
    ]);

    for (i, step) in merges.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            step.left.clone(),
            step.right.clone(),
            format_score(step.score),
            format!("{} ~ {}", step.leaf_pair.0, step.leaf_pair.1),
        ]);
    }
    table
}

fn node_label(node: &ClusterNode, scores: Option<&HashMap<String, f64>>) -> String {
    if let Some(id) = node.leaf_id() {
        return id.to_string();
    }

    let mut label = format!("◆ {} leaves", node.leaf_count());
    if let Some(score) = scores.and_then(|s| s.get(node.canonical())) {
        let _ = write!(label, " (similarity {})", format_score(*score));
    }
    label
}

/// Render a cluster tree one node per line with box-drawing guides
///
/// ```text
/// ◆ 3 leaves
/// ├─ ◆ 2 leaves
/// │  ├─ A
/// │  └─ B
/// └─ C
/// ```
pub fn render_tree(root: &ClusterNode, scores: Option<&HashMap<String, f64>>) -> String {
    let mut out = node_label(root, scores);
    out.push('\n');
    render_children(root, "", scores, &mut out);
    out
}

fn render_children(
    node: &ClusterNode,
    prefix: &str,
    scores: Option<&HashMap<String, f64>>,
    out: &mut String,
) {
    let Some((left, right)) = node.children() else {
        return;
    };

    for (child, is_last) in [(left, false), (right, true)] {
        let connector = if is_last { "└─" } else { "├─" };
        let _ = writeln!(out, "{}{} {}", prefix, connector, node_label(child, scores));

        let child_prefix = if is_last {
            format!("{}   ", prefix)
        } else {
            format!("{}│  ", prefix)
        };
        render_children(child, &child_prefix, scores, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use phylo_bio::clustering::build_tree;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_tree() {
        let ab = ClusterNode::merge(ClusterNode::leaf("A"), ClusterNode::leaf("B"));
        let root = ClusterNode::merge(ab, ClusterNode::leaf("C"));

        let expected = "◆ 3 leaves\n\
                        ├─ ◆ 2 leaves\n\
                        │  ├─ A\n\
                        │  └─ B\n\
                        └─ C\n";
        assert_eq!(render_tree(&root, None), expected);
    }

    #[test]
    fn test_render_single_leaf() {
        assert_eq!(render_tree(&ClusterNode::leaf("Z"), None), "Z\n");
    }

    #[test]
    fn test_render_with_scores() {
        let root = build_tree(vec![("X", "AAAA"), ("Y", "AAAT")], 2).unwrap();
        let scores = HashMap::from([("(X, Y)".to_string(), 0.5)]);
        assert_eq!(
            render_tree(&root, Some(&scores)),
            "◆ 2 leaves (similarity 0.5000)\n├─ X\n└─ Y\n"
        );
    }

    #[test]
    fn test_merge_scores_keyed_by_node() {
        let steps = vec![MergeStep {
            left: "A".to_string(),
            right: "B".to_string(),
            score: 1.0,
            leaf_pair: ("A".to_string(), "B".to_string()),
        }];
        assert_eq!(merge_scores(&steps).get("(A, B)"), Some(&1.0));
    }
}
