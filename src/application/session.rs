//! Catalog session: the single loaded catalog owned by one interactive run.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::application::services::CatalogService;
use crate::application::ApplicationResult;
use crate::domain::{Catalog, CourseEntry};

/// Holds the currently loaded catalog, if any.
///
/// A load builds a new catalog and replaces the current one only on success,
/// so a failed load keeps whatever was loaded before.
pub struct CatalogSession {
    service: CatalogService,
    catalog: Option<Catalog>,
    source: Option<PathBuf>,
}

impl CatalogSession {
    pub fn new(service: CatalogService) -> Self {
        Self {
            service,
            catalog: None,
            source: None,
        }
    }

    /// Load `path`, replacing the current catalog on success.
    pub fn load(&mut self, path: &Path) -> ApplicationResult<usize> {
        match self.service.load(path) {
            Ok(catalog) => {
                let count = catalog.len();
                debug!("session: replacing catalog with {} courses", count);
                self.catalog = Some(catalog);
                self.source = Some(path.to_path_buf());
                Ok(count)
            }
            Err(e) => {
                warn!("session: load of {} failed: {}", path.display(), e);
                Err(e)
            }
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    /// Path of the file backing the current catalog.
    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// Exact lookup; `None` when nothing is loaded or the course is unknown.
    pub fn find(&self, identifier: &str) -> Option<&CourseEntry> {
        self.catalog.as_ref().and_then(|c| c.find(identifier))
    }
}
