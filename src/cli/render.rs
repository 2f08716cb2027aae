//! Text rendering of catalog entries and normalization of typed course numbers.

use crate::domain::CourseEntry;

/// One line of the course listing: `identifier, title`.
pub fn listing_line(entry: &CourseEntry) -> String {
    entry.to_string()
}

/// Course detail: `identifier,title` followed by a prerequisites line.
pub fn course_detail(entry: &CourseEntry) -> String {
    let prerequisites = if entry.has_prerequisites() {
        entry.prerequisites.join(", ")
    } else {
        "None".to_string()
    };
    format!(
        "{},{}\nPrerequisites: {}",
        entry.identifier, entry.title, prerequisites
    )
}

/// Reduce raw user input to a course number.
///
/// Keeps the first token before any comma or whitespace, so `csci200, data`
/// and `csci200 please` both become `CSCI200` (upper-cased when `uppercase`).
/// Returns `None` if nothing is left.
pub fn normalize_query(raw: &str, uppercase: bool) -> Option<String> {
    let token = raw
        .trim()
        .split(|c: char| c == ',' || c.is_whitespace())
        .next()
        .unwrap_or_default();
    if token.is_empty() {
        return None;
    }
    Some(if uppercase {
        token.to_uppercase()
    } else {
        token.to_string()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn given_entry_without_prerequisites_when_rendering_detail_then_none() {
        let entry = CourseEntry::new("CSCI100", "Introduction to Computer Science");
        assert_eq!(
            course_detail(&entry),
            "CSCI100,Introduction to Computer Science\nPrerequisites: None"
        );
    }

    #[test]
    fn given_entry_with_prerequisites_when_rendering_detail_then_comma_separated() {
        let entry =
            CourseEntry::new("CSCI300", "Introduction to Algorithms").with_prerequisites(["CSCI200", "MATH201"]);
        assert_eq!(
            course_detail(&entry),
            "CSCI300,Introduction to Algorithms\nPrerequisites: CSCI200, MATH201"
        );
    }

    #[test]
    fn given_entry_when_rendering_listing_then_comma_space() {
        let entry = CourseEntry::new("MATH201", "Discrete Mathematics");
        assert_eq!(listing_line(&entry), "MATH201, Discrete Mathematics");
    }

    #[rstest]
    #[case("csci200", true, Some("CSCI200"))]
    #[case("  csci200  ", true, Some("CSCI200"))]
    #[case("csci200, Data Structures", true, Some("CSCI200"))]
    #[case("csci200 please", true, Some("CSCI200"))]
    #[case("csci200", false, Some("csci200"))]
    #[case("   ", true, None)]
    #[case(",CSCI200", true, None)]
    fn given_raw_input_when_normalizing_then_first_token(
        #[case] raw: &str,
        #[case] uppercase: bool,
        #[case] expected: Option<&str>,
    ) {
        assert_eq!(normalize_query(raw, uppercase).as_deref(), expected);
    }
}
