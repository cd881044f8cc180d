//! Capability-based access to tree-shaped collections
//!
//! The resolver never assumes a concrete collection type. It queries the
//! optional capabilities below and treats an absent capability as a plain
//! branch condition, not an error to catch: a node that answers `None` to
//! every probe is a leaf.

use crate::path::Slice;

/// A node in a tree of nested collections.
///
/// Implementations expose up to three capabilities: lookup by field name,
/// lookup by position, and ordered enumeration of direct children. All
/// probes return `None` for "not present / not supported" rather than
/// failing, so the resolver's skip logic stays a plain branch.
pub trait Tree {
    /// Look up a direct child by field name. `None` when the name is absent
    /// or the node has no named fields.
    fn child_by_name(&self, name: &str) -> Option<&Self>;

    /// Look up a direct child by position. Negative positions count from the
    /// end. `None` when out of range or the node is not a sequence.
    fn child_by_index(&self, index: i64) -> Option<&Self>;

    /// The window of children a slice selects, in slice order. `None` when
    /// the node has no ranged lookup. Bounds that select nothing yield
    /// `Some` of an empty window, not `None`.
    fn children_in_range(&self, slice: &Slice) -> Option<Vec<&Self>>;

    /// All direct children in the node's own order: values for a map-like
    /// node, elements for a sequence-like node. `None` for leaves.
    fn children(&self) -> Option<Vec<&Self>>;

    /// Whether this node is an ordered sequence of characters rather than a
    /// container. Text-like nodes are never descended into by a deep
    /// wildcard, even when they can enumerate children.
    fn is_text(&self) -> bool {
        false
    }

    /// Short description of the node's shape, used in error messages.
    fn kind(&self) -> &'static str {
        "value"
    }
}

/// Resolve a possibly negative position against a sequence of `len`
/// elements. Helper for `Tree` implementations.
pub fn normalize_index(index: i64, len: usize) -> Option<usize> {
    let len = len as i64;
    let index = if index < 0 { index + len } else { index };
    if (0..len).contains(&index) {
        Some(index as usize)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_index() {
        assert_eq!(normalize_index(0, 3), Some(0));
        assert_eq!(normalize_index(2, 3), Some(2));
        assert_eq!(normalize_index(3, 3), None);
        assert_eq!(normalize_index(-1, 3), Some(2));
        assert_eq!(normalize_index(-3, 3), Some(0));
        assert_eq!(normalize_index(-4, 3), None);
        assert_eq!(normalize_index(0, 0), None);
    }
}
