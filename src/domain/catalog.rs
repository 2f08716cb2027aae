use generational_arena::{Arena, Index};
use tracing::{instrument, trace};

use crate::domain::entities::CourseEntry;

/// Binary search tree node stored in the catalog arena.
#[derive(Debug)]
struct CatalogNode {
    entry: CourseEntry,
    /// Subtree with identifiers strictly less than this one
    left: Option<Index>,
    /// Subtree with identifiers greater than or equal to this one
    right: Option<Index>,
}

#[derive(Debug, Clone, Copy)]
enum Side {
    Left,
    Right,
}

/// Ordered course catalog keyed by course identifier.
///
/// An unbalanced binary search tree whose nodes live in a generational arena.
/// Insert, lookup and traversal are all iterative, so sorted input (which
/// degenerates the tree into a list) cannot exhaust the call stack.
///
/// Equal identifiers are not rejected here: an equal key descends right, so
/// `find` returns the earliest inserted entry and `entries` yields equal keys
/// in insertion order.
#[derive(Debug)]
pub struct Catalog {
    arena: Arena<CatalogNode>,
    root: Option<Index>,
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl Catalog {
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
        }
    }

    #[instrument(level = "trace", skip(self, entry), fields(identifier = %entry.identifier))]
    pub fn insert(&mut self, entry: CourseEntry) {
        let mut parent: Option<(Index, Side)> = None;
        let mut current = self.root;

        while let Some((idx, node)) = current.and_then(|idx| self.arena.get(idx).map(|n| (idx, n))) {
            if entry.identifier < node.entry.identifier {
                parent = Some((idx, Side::Left));
                current = node.left;
            } else {
                parent = Some((idx, Side::Right));
                current = node.right;
            }
        }

        let node_idx = self.arena.insert(CatalogNode {
            entry,
            left: None,
            right: None,
        });

        match parent {
            None => self.root = Some(node_idx),
            Some((parent_idx, side)) => {
                if let Some(parent) = self.arena.get_mut(parent_idx) {
                    match side {
                        Side::Left => parent.left = Some(node_idx),
                        Side::Right => parent.right = Some(node_idx),
                    }
                }
            }
        }
    }

    /// Exact, case-sensitive lookup by identifier.
    ///
    /// `None` is the normal outcome for an unknown course, not an error.
    #[instrument(level = "trace", skip(self))]
    pub fn find(&self, identifier: &str) -> Option<&CourseEntry> {
        let mut current = self.root;
        while let Some(node) = current.and_then(|idx| self.arena.get(idx)) {
            if node.entry.identifier == identifier {
                return Some(&node.entry);
            }
            current = if identifier < node.entry.identifier.as_str() {
                node.left
            } else {
                node.right
            };
        }
        trace!("not found: {}", identifier);
        None
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.find(identifier).is_some()
    }

    /// All entries in ascending identifier order.
    ///
    /// Every call starts a fresh traversal.
    pub fn entries(&self) -> Entries<'_> {
        Entries::new(self)
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Height of the tree: 0 when empty, `len()` for fully sorted input.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack: Vec<(Index, usize)> = self.root.map(|r| (r, 1)).into_iter().collect();

        while let Some((idx, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            if let Some(node) = self.arena.get(idx) {
                for child in [node.left, node.right].into_iter().flatten() {
                    stack.push((child, depth + 1));
                }
            }
        }
        max_depth
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a CourseEntry;
    type IntoIter = Entries<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries()
    }
}

/// In-order iterator over catalog entries.
pub struct Entries<'a> {
    catalog: &'a Catalog,
    stack: Vec<Index>,
}

impl<'a> Entries<'a> {
    fn new(catalog: &'a Catalog) -> Self {
        let mut iter = Self {
            catalog,
            stack: Vec::new(),
        };
        iter.push_left_spine(catalog.root);
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Index>) {
        while let Some(idx) = current {
            self.stack.push(idx);
            current = self.catalog.arena.get(idx).and_then(|n| n.left);
        }
    }
}

impl<'a> Iterator for Entries<'a> {
    type Item = &'a CourseEntry;

    fn next(&mut self) -> Option<Self::Item> {
        let idx = self.stack.pop()?;
        let node = self.catalog.arena.get(idx)?;
        self.push_left_spine(node.right);
        Some(&node.entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.stack.len(), Some(self.catalog.len()))
    }
}
