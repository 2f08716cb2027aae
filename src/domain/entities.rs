//! Domain entities: core data structures

use std::fmt;

use thiserror::Error;

/// One course record from the catalog source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseEntry {
    /// Unique, case-sensitive ordering and lookup key (e.g. `CSCI200`)
    pub identifier: String,
    /// Human readable course title
    pub title: String,
    /// Identifiers of prerequisite courses, in source order (soft references)
    pub prerequisites: Vec<String>,
}

impl CourseEntry {
    pub fn new(identifier: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            title: title.into(),
            prerequisites: Vec::new(),
        }
    }

    pub fn with_prerequisites<I, S>(mut self, prerequisites: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prerequisites = prerequisites.into_iter().map(Into::into).collect();
        self
    }

    pub fn has_prerequisites(&self) -> bool {
        !self.prerequisites.is_empty()
    }

    /// Parse a single delimited record line.
    ///
    /// Fields are split on `delimiter` and trimmed. Field 0 is the identifier,
    /// field 1 the title, remaining non-empty fields are prerequisites.
    ///
    /// Returns `Ok(None)` for lines that are empty after trimming.
    pub fn parse_record(line: &str, delimiter: char) -> Result<Option<Self>, RecordParseError> {
        if line.trim().is_empty() {
            return Ok(None);
        }

        let fields: Vec<&str> = line.split(delimiter).map(str::trim).collect();
        if fields.len() < 2 {
            return Err(RecordParseError::MissingFields {
                found: fields.len(),
            });
        }

        let (identifier, title) = (fields[0], fields[1]);
        if identifier.is_empty() {
            return Err(RecordParseError::EmptyIdentifier);
        }
        if title.is_empty() {
            return Err(RecordParseError::EmptyTitle);
        }

        let prerequisites = fields[2..]
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| p.to_string())
            .collect();

        Ok(Some(Self {
            identifier: identifier.to_string(),
            title: title.to_string(),
            prerequisites,
        }))
    }
}

impl fmt::Display for CourseEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {}", self.identifier, self.title)
    }
}

/// Structural problem with a single record line.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RecordParseError {
    #[error("insufficient data ({found} field(s)); each line must have at least a course number and title")]
    MissingFields { found: usize },

    #[error("empty course number")]
    EmptyIdentifier,

    #[error("empty course title")]
    EmptyTitle,

    #[error("invalid UTF-8 after byte {valid_up_to}")]
    InvalidUtf8 { valid_up_to: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_full_record_when_parsing_then_fields_are_trimmed() {
        let entry = CourseEntry::parse_record("  CSCI300 , Intro to Algorithms ,CSCI200 , MATH201 ", ',')
            .unwrap()
            .unwrap();
        assert_eq!(entry.identifier, "CSCI300");
        assert_eq!(entry.title, "Intro to Algorithms");
        assert_eq!(entry.prerequisites, vec!["CSCI200", "MATH201"]);
    }

    #[test]
    fn given_blank_line_when_parsing_then_skipped() {
        assert_eq!(CourseEntry::parse_record(" \t\r", ','), Ok(None));
    }

    #[test]
    fn given_empty_trailing_fields_when_parsing_then_ignored() {
        let entry = CourseEntry::parse_record("CSCI100,Intro CS,,", ',')
            .unwrap()
            .unwrap();
        assert!(entry.prerequisites.is_empty());
    }

    #[test]
    fn given_single_field_when_parsing_then_missing_fields() {
        assert_eq!(
            CourseEntry::parse_record("CSCI999", ','),
            Err(RecordParseError::MissingFields { found: 1 })
        );
    }

    #[test]
    fn given_trailing_delimiter_only_when_parsing_then_empty_title() {
        assert_eq!(
            CourseEntry::parse_record("CSCI999,", ','),
            Err(RecordParseError::EmptyTitle)
        );
    }

    #[test]
    fn given_custom_delimiter_when_parsing_then_splits_on_it() {
        let entry = CourseEntry::parse_record("MATH201;Discrete Math;MATH101", ';')
            .unwrap()
            .unwrap();
        assert_eq!(entry.title, "Discrete Math");
        assert_eq!(entry.prerequisites, vec!["MATH101"]);
    }

    #[test]
    fn given_duplicate_prerequisites_when_parsing_then_kept_in_order() {
        let entry = CourseEntry::parse_record("A,Alpha,B,C,B", ',').unwrap().unwrap();
        assert_eq!(entry.prerequisites, vec!["B", "C", "B"]);
    }

    #[test]
    fn given_parse_error_when_displayed_then_explains_record_shape() {
        let err = RecordParseError::MissingFields { found: 1 };
        assert_eq!(
            err.to_string(),
            "insufficient data (1 field(s)); each line must have at least a course number and title"
        );
        let as_error: &dyn std::error::Error = &err;
        assert!(as_error.source().is_none());
    }
}
