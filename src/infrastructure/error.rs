//! Errors from the host environment around a catalog run

use std::io;

use thiserror::Error;

use crate::application::ApplicationError;

#[derive(Error, Debug)]
pub enum InfraError {
    #[error(transparent)]
    Application(#[from] ApplicationError),

    /// The working directory (local config lookup) is unavailable.
    #[error("cannot determine working directory: {0}")]
    WorkingDirectory(#[source] io::Error),

    /// Reading the menu input or writing course output failed.
    #[error("terminal {context} failed: {source}")]
    Terminal {
        context: &'static str,
        #[source]
        source: io::Error,
    },
}

impl InfraError {
    pub fn terminal(context: &'static str, source: io::Error) -> Self {
        Self::Terminal { context, source }
    }
}
