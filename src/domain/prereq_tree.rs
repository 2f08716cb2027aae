use std::collections::HashSet;

use termtree::Tree;
use tracing::{debug, instrument};

use crate::domain::catalog::Catalog;
use crate::domain::error::{DomainError, DomainResult};

/// Marker appended to a course that already appears on its own ancestor path.
pub const CYCLE_MARKER: &str = "(cycle)";

/// Marker appended to a course whose prerequisites were already expanded
/// earlier in the same tree.
pub const SEEN_MARKER: &str = "(see above)";

/// Deepest prerequisite path rendered before giving up.
pub const MAX_TREE_DEPTH: usize = 256;

/// Renders the transitive prerequisites of a course as a tree.
///
/// Each course is expanded at most once, so the tree has at most one line per
/// prerequisite reference in the catalog.
pub trait PrerequisiteTree {
    /// `Ok(None)` if `identifier` is not in the catalog.
    fn prerequisite_tree(&self, identifier: &str) -> DomainResult<Option<Tree<String>>>;
}

impl PrerequisiteTree for Catalog {
    #[instrument(level = "debug", skip(self))]
    fn prerequisite_tree(&self, identifier: &str) -> DomainResult<Option<Tree<String>>> {
        let Some(root) = self.find(identifier) else {
            return Ok(None);
        };

        let mut walk = TreeWalk {
            catalog: self,
            root: &root.identifier,
            ancestors: HashSet::new(),
            expanded: HashSet::new(),
        };
        let tree = walk.build(&root.identifier, 1)?;
        debug!("expanded {} courses", walk.expanded.len());
        Ok(Some(tree))
    }
}

struct TreeWalk<'a> {
    catalog: &'a Catalog,
    root: &'a str,
    ancestors: HashSet<&'a str>,
    expanded: HashSet<&'a str>,
}

impl<'a> TreeWalk<'a> {
    fn build(&mut self, identifier: &str, depth: usize) -> DomainResult<Tree<String>> {
        let catalog = self.catalog;
        let Some(entry) = catalog.find(identifier) else {
            return Ok(Tree::new(identifier.to_string()));
        };
        let id = entry.identifier.as_str();
        if self.ancestors.contains(id) {
            return Ok(Tree::new(format!("{id} {CYCLE_MARKER}")));
        }
        if self.expanded.contains(id) {
            return Ok(Tree::new(format!("{id} {SEEN_MARKER}")));
        }
        if depth > MAX_TREE_DEPTH {
            return Err(DomainError::PrerequisiteTreeTooDeep {
                course: self.root.to_string(),
                limit: MAX_TREE_DEPTH,
            });
        }

        self.ancestors.insert(id);
        self.expanded.insert(id);
        let mut tree = Tree::new(entry.to_string());
        for prerequisite in &entry.prerequisites {
            tree.push(self.build(prerequisite, depth + 1)?);
        }
        self.ancestors.remove(id);
        Ok(tree)
    }
}
