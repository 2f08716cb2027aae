//! CLI-level errors (wraps infrastructure errors)

use thiserror::Error;

use crate::application::ApplicationError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("{0}")]
    Usage(String),

    #[error("course {0} not found")]
    CourseNotFound(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) | CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::CourseNotFound(_) => crate::exitcode::DATAERR,
            CliError::Infra(e) => match e {
                InfraError::WorkingDirectory(_) | InfraError::Terminal { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::SourceUnavailable { .. } => crate::exitcode::NOINPUT,
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::OperationFailed { .. } => crate::exitcode::SOFTWARE,
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{DomainError, RecordParseError};

    #[test]
    fn given_unreadable_source_when_mapping_exit_code_then_noinput() {
        let err: CliError = ApplicationError::SourceUnavailable {
            path: "missing.csv".into(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        }
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_invalid_data_when_mapping_exit_code_then_dataerr() {
        let err: CliError = ApplicationError::from(DomainError::MalformedRecord {
            line: 2,
            source: RecordParseError::EmptyTitle,
        })
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(CliError::CourseNotFound("X".into()).exit_code(), crate::exitcode::DATAERR);
    }

    #[test]
    fn given_terminal_failure_when_mapping_exit_code_then_ioerr() {
        let err: CliError = InfraError::terminal(
            "output",
            std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"),
        )
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::IOERR);
        assert_eq!(err.to_string(), "terminal output failed: closed");
    }

    #[test]
    fn given_too_deep_tree_when_mapping_exit_code_then_dataerr() {
        let err: CliError = ApplicationError::from(DomainError::PrerequisiteTreeTooDeep {
            course: "C0".into(),
            limit: 256,
        })
        .into();
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
    }
}
