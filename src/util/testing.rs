//! Test support: one-time tracing setup and course fixture paths

use std::path::PathBuf;
use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Directory holding the course files used by the test suite.
const FIXTURE_DIR: &str = "tests/resources/courses";

/// Install the test subscriber once per process.
///
/// Honors `RUST_LOG`; otherwise logs this crate at `trace` and everything
/// else at `warn`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        setup_test_logging();
        debug!("test logging ready");
    });
}

/// Absolute path of a course fixture file, e.g. `fixture("catalog.csv")`.
pub fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join(FIXTURE_DIR)
        .join(name)
}

fn setup_test_logging() {
    let noisy_modules = ["config"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn,coursemap=trace"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Another harness may already own the global dispatcher
    if let Err(e) = subscriber.try_init() {
        eprintln!("test logging not installed: {e}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_setup_when_initialized_then_idempotent() {
        init_test_setup();
        init_test_setup();
    }

    #[test]
    fn given_fixture_name_when_resolved_then_file_exists() {
        assert!(fixture("catalog.csv").is_file());
    }
}
