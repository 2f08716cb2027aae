//! Domain layer: entities and business logic
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod catalog;
pub mod entities;
pub mod error;
pub mod loader;
pub mod prereq_tree;

pub use catalog::{Catalog, Entries};
pub use entities::{CourseEntry, RecordParseError};
pub use error::{DomainError, DomainResult};
pub use loader::{decode_lines, CatalogLoader, DEFAULT_DELIMITER};
pub use prereq_tree::{PrerequisiteTree, CYCLE_MARKER, MAX_TREE_DEPTH, SEEN_MARKER};

/// Expand environment variables and `~` in a path string.
///
/// Falls back to the input unchanged if expansion fails.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
