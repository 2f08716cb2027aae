//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::entities::RecordParseError;

/// Domain errors represent catalog data violations.
/// These are independent of where the records came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("line {line}: {source}")]
    MalformedRecord {
        line: usize,
        #[source]
        source: RecordParseError,
    },

    #[error("prerequisite {prerequisite} for course {course} does not exist")]
    DanglingPrerequisite { prerequisite: String, course: String },

    #[error("line {line}: course {identifier} already defined on line {first_line}")]
    DuplicateIdentifier {
        identifier: String,
        line: usize,
        first_line: usize,
    },

    #[error("prerequisites of {course} nest deeper than {limit} levels")]
    PrerequisiteTreeTooDeep { course: String, limit: usize },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
