//! Tests for the two-pass CatalogLoader

use rstest::rstest;

use coursemap::domain::{Catalog, CatalogLoader, DomainError};
use coursemap::util::testing::fixture;

#[test]
fn given_valid_chain_when_loading_then_ordered_and_findable() {
    // Arrange
    let lines = [
        "CSCI100,Intro CS",
        "CSCI101,Intro Programming,CSCI100",
        "CSCI200,Data Structures,CSCI101",
    ];
    let mut catalog = Catalog::new();

    // Act
    let count = CatalogLoader::default().load(lines, &mut catalog).unwrap();

    // Assert
    assert_eq!(count, 3);
    let ids: Vec<_> = catalog.entries().map(|e| e.identifier.as_str()).collect();
    assert_eq!(ids, vec!["CSCI100", "CSCI101", "CSCI200"]);
    let found = catalog.find("CSCI200").unwrap();
    assert_eq!(found.title, "Data Structures");
    assert_eq!(found.prerequisites, vec!["CSCI101"]);
}

#[test]
fn given_single_field_line_when_loading_then_malformed_and_nothing_committed() {
    let mut catalog = Catalog::new();

    let err = CatalogLoader::default()
        .load(["CSCI100,Intro CS", "CSCI999"], &mut catalog)
        .unwrap_err();

    assert!(
        matches!(err, DomainError::MalformedRecord { line: 2, .. }),
        "unexpected error: {err:?}"
    );
    assert!(catalog.is_empty());
    assert_eq!(catalog.entries().count(), 0);
}

#[test]
fn given_forward_reference_when_loading_then_succeeds() {
    let mut catalog = Catalog::new();

    let count = CatalogLoader::default()
        .load(["CSCI200,Data Structures,CSCI100", "CSCI100,Intro CS"], &mut catalog)
        .unwrap();

    assert_eq!(count, 2);
    assert!(catalog.contains("CSCI100"));
}

#[test]
fn given_dangling_prerequisite_when_loading_then_rejected_and_nothing_committed() {
    let mut catalog = Catalog::new();

    let err = CatalogLoader::default()
        .load(["CSCI100,Intro CS", "CSCI200,Data Structures,CSCI150"], &mut catalog)
        .unwrap_err();

    assert_eq!(
        err,
        DomainError::DanglingPrerequisite {
            prerequisite: "CSCI150".into(),
            course: "CSCI200".into(),
        }
    );
    assert!(catalog.is_empty());
}

#[test]
fn given_dangling_prerequisite_when_displayed_then_names_both_courses() {
    let err = DomainError::DanglingPrerequisite {
        prerequisite: "CSCI150".into(),
        course: "CSCI200".into(),
    };
    assert_eq!(err.to_string(), "prerequisite CSCI150 for course CSCI200 does not exist");
}

#[rstest]
#[case(&["A,Alpha", "", "B,Beta"], 2)]
#[case(&["", "   ", "\t"], 0)]
#[case(&["A,Alpha,,", "B,Beta, A ,"], 2)]
#[case(&[], 0)]
fn given_blank_lines_when_loading_then_only_records_counted(#[case] lines: &[&str], #[case] expected: usize) {
    let mut catalog = Catalog::new();

    let count = CatalogLoader::default().load(lines, &mut catalog).unwrap();

    assert_eq!(count, expected);
    assert_eq!(catalog.len(), expected);
}

#[rstest]
#[case(&[",Missing number"], 1)]
#[case(&["A,Alpha", "B,"], 2)]
#[case(&["A,Alpha", "", "B"], 3)]
fn given_structural_problem_when_loading_then_reports_raw_line(#[case] lines: &[&str], #[case] line: usize) {
    let mut catalog = Catalog::new();

    let err = CatalogLoader::default().load(lines, &mut catalog).unwrap_err();

    match err {
        DomainError::MalformedRecord { line: reported, .. } => assert_eq!(reported, line),
        other => panic!("expected MalformedRecord, got {other:?}"),
    }
    assert!(catalog.is_empty());
}

#[test]
fn given_failed_load_when_target_already_populated_then_left_untouched() {
    let loader = CatalogLoader::default();
    let mut catalog = Catalog::new();
    loader.load(["A,Alpha"], &mut catalog).unwrap();

    let result = loader.load(["B,Beta,Z"], &mut catalog);

    assert!(result.is_err());
    assert_eq!(catalog.len(), 1);
    assert!(catalog.find("B").is_none());
}

#[test]
fn given_fixture_catalog_when_loading_then_all_courses_committed() {
    let content = std::fs::read_to_string(fixture("catalog.csv")).unwrap();
    let mut catalog = Catalog::new();

    let count = CatalogLoader::default().load(content.lines(), &mut catalog).unwrap();

    assert_eq!(count, 8);
    let first = catalog.entries().next().unwrap();
    assert_eq!(first.identifier, "CSCI100");
    let last = catalog.entries().last().unwrap();
    assert_eq!(last.identifier, "MATH201");
    assert_eq!(
        catalog.find("CSCI400").unwrap().prerequisites,
        vec!["CSCI301", "CSCI350"]
    );
}

#[test]
fn given_semicolon_delimiter_when_loading_then_commas_stay_in_title() {
    let mut catalog = Catalog::new();

    CatalogLoader::new(';')
        .load(["ENGL100;Reading, Writing and Rhetoric"], &mut catalog)
        .unwrap();

    assert_eq!(catalog.find("ENGL100").unwrap().title, "Reading, Writing and Rhetoric");
}
