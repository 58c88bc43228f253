//! Closure table over the activity hierarchy.
//!
//! The hierarchy is a rooted forest of categories. The closure table stores
//! one row per (ancestor, descendant) pair reachable through parent→child
//! edges, including a depth-0 self row per activity, so that "everything under
//! category X" is a single join instead of a recursive walk.

use std::collections::{BTreeMap, BTreeSet, HashMap, VecDeque};

use crate::error::{CoreError, Result};
use crate::ids::ActivityId;
use crate::model::ActivityClosure;

/// Maximum closure depth followed by nested-activity lookups.
///
/// Depth 2 covers three levels of nesting: the requested category, its
/// children and its grandchildren.
pub const NESTED_DEPTH: i32 = 2;

/// An in-memory closure table keyed by `(ancestor, descendant)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClosureTable {
    rows: BTreeMap<(ActivityId, ActivityId), i32>,
}

impl ClosureTable {
    /// Load a table from pre-computed rows.
    ///
    /// When a pair appears more than once the shortest depth is kept.
    #[must_use]
    pub fn from_rows(rows: impl IntoIterator<Item = ActivityClosure>) -> Self {
        let mut table = Self::default();
        for row in rows {
            table
                .rows
                .entry((row.ancestor_id, row.descendant_id))
                .and_modify(|depth| *depth = (*depth).min(row.depth))
                .or_insert(row.depth);
        }
        table
    }

    /// Derive the closure of a hierarchy from its parent→child edges.
    ///
    /// `activities` lists every node so that leaves without edges still get
    /// their self row. Depths are shortest edge counts (breadth-first).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::CyclicHierarchy` if any activity is its own
    /// proper descendant.
    pub fn from_edges(
        activities: impl IntoIterator<Item = ActivityId>,
        edges: &[(ActivityId, ActivityId)],
    ) -> Result<Self> {
        let mut children: HashMap<ActivityId, Vec<ActivityId>> = HashMap::new();
        let mut nodes: BTreeSet<ActivityId> = activities.into_iter().collect();
        for &(parent, child) in edges {
            children.entry(parent).or_default().push(child);
            nodes.insert(parent);
            nodes.insert(child);
        }

        let mut table = Self::default();
        for &root in &nodes {
            let mut seen = BTreeSet::from([root]);
            let mut queue = VecDeque::from([(root, 0)]);
            table.rows.insert((root, root), 0);

            while let Some((node, depth)) = queue.pop_front() {
                for &child in children.get(&node).map_or(&[][..], Vec::as_slice) {
                    if child == root {
                        return Err(CoreError::CyclicHierarchy(root));
                    }
                    if seen.insert(child) {
                        table.rows.insert((root, child), depth + 1);
                        queue.push_back((child, depth + 1));
                    }
                }
            }
        }

        Ok(table)
    }

    /// Depth between `ancestor` and `descendant`, if related.
    #[must_use]
    pub fn depth(&self, ancestor: ActivityId, descendant: ActivityId) -> Option<i32> {
        self.rows.get(&(ancestor, descendant)).copied()
    }

    /// Whether the pair is present.
    #[must_use]
    pub fn contains(&self, ancestor: ActivityId, descendant: ActivityId) -> bool {
        self.rows.contains_key(&(ancestor, descendant))
    }

    /// `ancestor` and every descendant at most `max_depth` edges below it.
    #[must_use]
    pub fn descendants_within(&self, ancestor: ActivityId, max_depth: i32) -> BTreeSet<ActivityId> {
        self.rows
            .range((ancestor, ActivityId::new(i64::MIN))..=(ancestor, ActivityId::new(i64::MAX)))
            .filter(|(_, &depth)| depth <= max_depth)
            .map(|(&(_, descendant), _)| descendant)
            .collect()
    }

    /// All rows, ordered by `(ancestor, descendant)`.
    #[must_use]
    pub fn rows(&self) -> Vec<ActivityClosure> {
        self.rows
            .iter()
            .map(|(&(ancestor_id, descendant_id), &depth)| ActivityClosure {
                ancestor_id,
                descendant_id,
                depth,
            })
            .collect()
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: i64) -> ActivityId {
        ActivityId::new(raw)
    }

    /// 1 → 2 → 3 → 4, plus 1 → 5.
    fn chain() -> ClosureTable {
        ClosureTable::from_edges(
            [id(1), id(2), id(3), id(4), id(5)],
            &[(id(1), id(2)), (id(2), id(3)), (id(3), id(4)), (id(1), id(5))],
        )
        .unwrap()
    }

    #[test]
    fn every_activity_has_a_self_row() {
        let table = chain();
        for raw in 1..=5 {
            assert_eq!(table.depth(id(raw), id(raw)), Some(0));
        }
    }

    #[test]
    fn depth_counts_edges() {
        let table = chain();
        assert_eq!(table.depth(id(1), id(2)), Some(1));
        assert_eq!(table.depth(id(1), id(3)), Some(2));
        assert_eq!(table.depth(id(1), id(4)), Some(3));
        assert_eq!(table.depth(id(2), id(4)), Some(2));
        assert_eq!(table.depth(id(4), id(1)), None);
        assert_eq!(table.len(), 5 + 4 + 2 + 1);
    }

    #[test]
    fn descendants_within_stops_at_depth() {
        let table = chain();
        let within = table.descendants_within(id(1), NESTED_DEPTH);
        assert_eq!(within, BTreeSet::from([id(1), id(2), id(3), id(5)]));
        assert!(!within.contains(&id(4)));
    }

    #[test]
    fn detects_cycles() {
        let result = ClosureTable::from_edges(
            [id(1), id(2)],
            &[(id(1), id(2)), (id(2), id(1))],
        );
        assert!(matches!(result, Err(CoreError::CyclicHierarchy(_))));
    }

    #[test]
    fn from_rows_keeps_shortest_depth() {
        let table = ClosureTable::from_rows([
            ActivityClosure::new(1, 3, 2),
            ActivityClosure::new(1, 3, 1),
        ]);
        assert_eq!(table.depth(id(1), id(3)), Some(1));
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn isolated_activity_gets_only_self_row() {
        let table = ClosureTable::from_edges([id(9)], &[]).unwrap();
        assert_eq!(table.rows(), vec![ActivityClosure::new(9, 9, 0)]);
    }
}
