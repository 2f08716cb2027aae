//! coursemap: load a delimited course catalog, list it in order and look up
//! courses with their prerequisites.
//!
//! Layers, innermost first:
//! - [`domain`]: course entries, the ordered catalog and the two-pass loader
//! - [`application`]: services and the catalog session over I/O boundaries
//! - [`infrastructure`]: filesystem implementation and service wiring
//! - [`cli`]: argument parsing, command dispatch and the interactive shell

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
