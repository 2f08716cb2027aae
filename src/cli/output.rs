//! Colored terminal output for catalog commands
//!
//! `colored` honors NO_COLOR and CLICOLOR_FORCE.

use std::fmt::Display;

use colored::Colorize;

use crate::domain::CourseEntry;

/// Red bold `error:` line on stderr.
pub fn error(msg: &(impl Display + ?Sized)) {
    eprintln!("{}: {}", "error".red().bold(), msg);
}

pub fn success(msg: &(impl Display + ?Sized)) {
    println!("{} {}", "✓".green(), msg);
}

/// A requested course that is not in the catalog.
pub fn missing_course(identifier: &str) {
    println!("  {} Course {} not found.", "✗".red(), identifier.bold());
}

/// Config location or value, label in green.
pub fn setting(label: &str, value: &(impl Display + ?Sized)) {
    println!("{}: {}", label.green(), value);
}

pub fn schedule_header() {
    println!("{}", "Here is a sample schedule:".cyan().bold());
}

/// One catalog listing line, identifier highlighted.
pub fn course_line(entry: &CourseEntry) {
    println!("{}, {}", entry.identifier.bold(), entry.title);
}

/// Uncolored block of course data.
pub fn plain(msg: &(impl Display + ?Sized)) {
    println!("{msg}");
}
