//! Binary cluster tree
//!
//! Every node owns its children outright (`Box`), so a subtree has exactly
//! one parent and the structure can never become cyclic. Membership sets and
//! the canonical string are computed once at construction; nodes are never
//! mutated afterwards.

use std::collections::BTreeSet;
use std::fmt;

/// Shape of a node: a single record, or the merge of two clusters
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    Leaf(String),
    Internal {
        left: Box<ClusterNode>,
        right: Box<ClusterNode>,
    },
}

/// A node of the clustering tree
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClusterNode {
    kind: NodeKind,
    membership: BTreeSet<String>,
    canonical: String,
}

impl ClusterNode {
    /// Leaf for a single record identifier
    pub fn leaf(id: impl Into<String>) -> Self {
        let id = id.into();
        Self {
            membership: BTreeSet::from([id.clone()]),
            canonical: id.clone(),
            kind: NodeKind::Leaf(id),
        }
    }

    /// Join two clusters under a new internal node.
    ///
    /// The child whose canonical string sorts first becomes the left child,
    /// so the result does not depend on argument order.
    pub fn merge(a: ClusterNode, b: ClusterNode) -> Self {
        let (left, right) = if a.canonical <= b.canonical { (a, b) } else { (b, a) };

        let membership = left.membership.union(&right.membership).cloned().collect();
        let canonical = format!("({}, {})", left.canonical, right.canonical);

        Self {
            kind: NodeKind::Internal {
                left: Box::new(left),
                right: Box::new(right),
            },
            membership,
            canonical,
        }
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, NodeKind::Leaf(_))
    }

    /// Identifier of the record, for leaves only
    pub fn leaf_id(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Leaf(id) => Some(id.as_str()),
            NodeKind::Internal { .. } => None,
        }
    }

    /// Identifiers of all leaves beneath this node
    pub fn membership(&self) -> &BTreeSet<String> {
        &self.membership
    }

    pub fn left(&self) -> Option<&ClusterNode> {
        self.children().map(|(left, _)| left)
    }

    pub fn right(&self) -> Option<&ClusterNode> {
        self.children().map(|(_, right)| right)
    }

    pub fn children(&self) -> Option<(&ClusterNode, &ClusterNode)> {
        match &self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => Some((&**left, &**right)),
        }
    }

    /// Take ownership of both children, for internal nodes
    pub fn into_children(self) -> Option<(ClusterNode, ClusterNode)> {
        match self.kind {
            NodeKind::Leaf(_) => None,
            NodeKind::Internal { left, right } => Some((*left, *right)),
        }
    }

    /// `id` for a leaf, `(left, right)` for an internal node
    pub fn canonical(&self) -> &str {
        &self.canonical
    }

    pub fn leaf_count(&self) -> usize {
        self.membership.len()
    }

    pub fn internal_count(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal { left, right } => 1 + left.internal_count() + right.internal_count(),
        }
    }

    /// Edges on the longest path down to a leaf
    pub fn height(&self) -> usize {
        match &self.kind {
            NodeKind::Leaf(_) => 0,
            NodeKind::Internal { left, right } => 1 + left.height().max(right.height()),
        }
    }

    /// Leaf identifiers from left to right
    pub fn leaves(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.leaf_count());
        self.collect_leaves(&mut out);
        out
    }

    fn collect_leaves<'a>(&'a self, out: &mut Vec<&'a str>) {
        match &self.kind {
            NodeKind::Leaf(id) => out.push(id.as_str()),
            NodeKind::Internal { left, right } => {
                left.collect_leaves(out);
                right.collect_leaves(out);
            }
        }
    }
}

impl fmt::Display for ClusterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical)
    }
}
