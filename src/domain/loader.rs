//! Two-pass loader that validates a batch of course records before committing it.

use std::collections::{HashMap, HashSet};

use tracing::{debug, instrument};

use crate::domain::catalog::Catalog;
use crate::domain::entities::{CourseEntry, RecordParseError};
use crate::domain::error::{DomainError, DomainResult};

/// Default field delimiter for course records.
pub const DEFAULT_DELIMITER: char = ',';

/// Parses, validates and commits course records into a [`Catalog`].
///
/// Loading is all-or-nothing: the target catalog is only touched after every
/// line parsed and every prerequisite resolved to a course in the same batch.
/// Prerequisites may refer to courses defined further down the source.
#[derive(Debug, Clone)]
pub struct CatalogLoader {
    delimiter: char,
}

impl Default for CatalogLoader {
    fn default() -> Self {
        Self::new(DEFAULT_DELIMITER)
    }
}

impl CatalogLoader {
    pub fn new(delimiter: char) -> Self {
        Self { delimiter }
    }

    /// Validate `lines` and insert the batch into `target` in source order.
    ///
    /// Returns the number of committed entries.
    #[instrument(level = "debug", skip_all)]
    pub fn load<I, S>(&self, lines: I, target: &mut Catalog) -> DomainResult<usize>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = self.validate(lines)?;
        let count = batch.len();
        for entry in batch {
            target.insert(entry);
        }
        debug!("committed {} courses", count);
        Ok(count)
    }

    /// Run both validation passes without committing anything.
    pub fn validate<I, S>(&self, lines: I) -> DomainResult<Vec<CourseEntry>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let batch = self.parse_batch(lines)?;
        check_references(&batch)?;
        Ok(batch)
    }

    /// Pass 1: structural validation.
    ///
    /// Line numbers are 1-based and count skipped blank lines.
    fn parse_batch<I, S>(&self, lines: I) -> DomainResult<Vec<CourseEntry>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut batch = Vec::new();
        let mut first_seen: HashMap<String, usize> = HashMap::new();

        for (i, line) in lines.into_iter().enumerate() {
            let line_number = i + 1;
            let parsed = CourseEntry::parse_record(line.as_ref(), self.delimiter)
                .map_err(|source| DomainError::MalformedRecord {
                    line: line_number,
                    source,
                })?;
            let Some(entry) = parsed else {
                continue;
            };

            if let Some(&first_line) = first_seen.get(&entry.identifier) {
                return Err(DomainError::DuplicateIdentifier {
                    identifier: entry.identifier,
                    line: line_number,
                    first_line,
                });
            }
            first_seen.insert(entry.identifier.clone(), line_number);
            batch.push(entry);
        }

        debug!("pass 1: parsed {} courses", batch.len());
        Ok(batch)
    }
}

/// Split raw file content into record lines, decoding each as UTF-8.
///
/// Line numbering matches [`CatalogLoader::load`]. A line that is not valid
/// UTF-8 is a `MalformedRecord` at that line.
pub fn decode_lines(content: &[u8]) -> DomainResult<Vec<&str>> {
    let mut lines: Vec<&[u8]> = content.split(|b| *b == b'\n').collect();
    if lines.last().is_some_and(|last| last.is_empty()) {
        lines.pop();
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(i, raw)| {
            std::str::from_utf8(raw).map_err(|e| DomainError::MalformedRecord {
                line: i + 1,
                source: RecordParseError::InvalidUtf8 {
                    valid_up_to: e.valid_up_to(),
                },
            })
        })
        .collect()
}

/// Pass 2: every prerequisite must name a course in the batch.
fn check_references(batch: &[CourseEntry]) -> DomainResult<()> {
    let known: HashSet<&str> = batch.iter().map(|e| e.identifier.as_str()).collect();

    for entry in batch {
        if let Some(missing) = entry
            .prerequisites
            .iter()
            .find(|p| !known.contains(p.as_str()))
        {
            return Err(DomainError::DanglingPrerequisite {
                prerequisite: missing.clone(),
                course: entry.identifier.clone(),
            });
        }
    }
    debug!("pass 2: all prerequisites resolved");
    Ok(())
}
