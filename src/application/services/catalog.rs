//! Course catalog service
//!
//! Reads course files through the filesystem boundary and runs the two-pass
//! loader over their lines.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::{decode_lines, Catalog, CatalogLoader, CourseEntry};
use crate::infrastructure::traits::FileSystem;

/// Service for loading course files into catalogs.
pub struct CatalogService {
    fs: Arc<dyn FileSystem>,
    loader: CatalogLoader,
}

impl CatalogService {
    /// Create a new catalog service splitting records on `delimiter`.
    pub fn new(fs: Arc<dyn FileSystem>, delimiter: char) -> Self {
        Self {
            fs,
            loader: CatalogLoader::new(delimiter),
        }
    }

    /// Read `path` and load its records into `target`.
    ///
    /// The whole file is read before validation starts; an unreadable file
    /// is reported as `SourceUnavailable`, a line that is not UTF-8 as a
    /// malformed record. On any failure `target` is left untouched.
    #[instrument(level = "debug", skip(self, target))]
    pub fn load_into(&self, path: &Path, target: &mut Catalog) -> ApplicationResult<usize> {
        let content = self.read_source(path)?;
        let count = self.loader.load(decode_lines(&content)?, target)?;
        info!("loaded {} courses from {}", count, path.display());
        Ok(count)
    }

    /// Load `path` into a fresh catalog.
    pub fn load(&self, path: &Path) -> ApplicationResult<Catalog> {
        let mut catalog = Catalog::new();
        self.load_into(path, &mut catalog)?;
        Ok(catalog)
    }

    /// Validate `path` without building a catalog.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&self, path: &Path) -> ApplicationResult<Vec<CourseEntry>> {
        let content = self.read_source(path)?;
        Ok(self.loader.validate(decode_lines(&content)?)?)
    }

    fn read_source(&self, path: &Path) -> ApplicationResult<Vec<u8>> {
        debug!("read_source: path={}", path.display());
        self.fs.read(path).or_source_unavailable(path)
    }
}
