//! Interactive menu over a catalog session
//!
//! Generic over input and output so it can run on stdin/stdout or be driven
//! from tests.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, instrument};

use crate::application::CatalogSession;
use crate::cli::render::{course_detail, listing_line, normalize_query};
use crate::domain::expand_env_vars;

const RULE: &str = "========================================";
const NOT_LOADED: &str = "Error: No data loaded. Please load data first (Option 1).";

/// A menu entry picked by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Load,
    List,
    Show,
    Exit,
}

/// Input that does not select a menu entry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuSelectionError {
    #[error("Invalid input. Please enter a number.")]
    NotANumber,

    #[error("{0} is not a valid option.")]
    Unknown(i64),
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self, MenuSelectionError> {
        let number: i64 = input
            .trim()
            .parse()
            .map_err(|_| MenuSelectionError::NotANumber)?;
        match number {
            1 => Ok(MenuChoice::Load),
            2 => Ok(MenuChoice::List),
            3 => Ok(MenuChoice::Show),
            9 => Ok(MenuChoice::Exit),
            other => Err(MenuSelectionError::Unknown(other)),
        }
    }
}

enum Flow {
    Continue,
    Exit,
}

/// Menu-driven shell: load, list, show, exit.
pub struct Shell<R, W> {
    session: CatalogSession,
    input: R,
    output: W,
    normalize_case: bool,
    default_file: Option<PathBuf>,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(session: CatalogSession, input: R, output: W) -> Self {
        Self {
            session,
            input,
            output,
            normalize_case: true,
            default_file: None,
        }
    }

    /// Upper-case typed course numbers before lookup.
    pub fn normalize_case(mut self, normalize: bool) -> Self {
        self.normalize_case = normalize;
        self
    }

    /// File loaded when the user answers the file prompt with an empty line.
    pub fn default_file(mut self, file: Option<PathBuf>) -> Self {
        self.default_file = file;
        self
    }

    pub fn session(&self) -> &CatalogSession {
        &self.session
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Run the menu loop until the user exits or input ends.
    #[instrument(level = "debug", skip(self))]
    pub fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nCourse Planner")?;

        loop {
            self.display_menu()?;
            let Some(line) = self.read_line()? else {
                debug!("shell: end of input");
                self.farewell()?;
                return Ok(());
            };

            let choice = match MenuChoice::parse(&line) {
                Ok(choice) => choice,
                Err(e) => {
                    writeln!(self.output, "\n{e}")?;
                    continue;
                }
            };
            debug!("shell: choice {:?}", choice);

            let flow = match choice {
                MenuChoice::Load => self.load_data()?,
                MenuChoice::List => self.print_course_list()?,
                MenuChoice::Show => self.print_course()?,
                MenuChoice::Exit => Flow::Exit,
            };
            if let Flow::Exit = flow {
                self.farewell()?;
                return Ok(());
            }
        }
    }

    /// Load `path` into the session and report the outcome.
    ///
    /// Returns whether the load succeeded.
    pub fn load_file(&mut self, path: &Path) -> io::Result<bool> {
        writeln!(self.output, "Loading course data from {}...", path.display())?;
        match self.session.load(path) {
            Ok(count) => {
                writeln!(self.output, "Successfully loaded {count} courses.")?;
                Ok(true)
            }
            Err(e) => {
                writeln!(self.output, "Error: {e}")?;
                Ok(false)
            }
        }
    }

    fn display_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{RULE}")?;
        writeln!(self.output, "Welcome to the course planner.")?;
        writeln!(self.output, "{RULE}")?;
        writeln!(self.output, "  1. Load Data Structure")?;
        writeln!(self.output, "  2. Print Course List")?;
        writeln!(self.output, "  3. Print Course")?;
        writeln!(self.output, "\n  9. Exit")?;
        writeln!(self.output, "{RULE}")?;
        write!(self.output, "What would you like to do? ")?;
        self.output.flush()
    }

    fn farewell(&mut self) -> io::Result<()> {
        writeln!(self.output, "\nThank you for using the course planner!")
    }

    fn load_data(&mut self) -> io::Result<Flow> {
        write!(self.output, "Enter the file name: ")?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Exit);
        };

        let path = match (line.trim(), &self.default_file) {
            ("", Some(default)) => default.clone(),
            ("", None) => {
                writeln!(self.output, "Error: no file name given.")?;
                return Ok(Flow::Continue);
            }
            (name, _) => PathBuf::from(expand_env_vars(name)),
        };
        self.load_file(&path)?;
        Ok(Flow::Continue)
    }

    fn print_course_list(&mut self) -> io::Result<Flow> {
        let Some(catalog) = self.session.catalog() else {
            writeln!(self.output, "\n{NOT_LOADED}")?;
            return Ok(Flow::Continue);
        };

        writeln!(self.output, "\nHere is a sample schedule:\n")?;
        for entry in catalog.entries() {
            writeln!(self.output, "{}", listing_line(entry))?;
        }
        Ok(Flow::Continue)
    }

    fn print_course(&mut self) -> io::Result<Flow> {
        if !self.session.is_loaded() {
            writeln!(self.output, "\n{NOT_LOADED}")?;
            return Ok(Flow::Continue);
        }

        write!(
            self.output,
            "What course do you want to know about? (Enter course number): "
        )?;
        self.output.flush()?;
        let Some(line) = self.read_line()? else {
            return Ok(Flow::Exit);
        };
        writeln!(self.output)?;

        let Some(query) = normalize_query(&line, self.normalize_case) else {
            writeln!(self.output, "Please enter a course number.")?;
            return Ok(Flow::Continue);
        };
        match self.session.find(&query) {
            Some(entry) => writeln!(self.output, "{}", course_detail(entry))?,
            None => writeln!(self.output, "Course {query} not found.")?,
        }
        Ok(Flow::Continue)
    }

    /// Next input line without its line terminator; `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        let trimmed_len = buf.trim_end_matches(['\n', '\r']).len();
        buf.truncate(trimmed_len);
        Ok(Some(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("1", Ok(MenuChoice::Load))]
    #[case(" 2 ", Ok(MenuChoice::List))]
    #[case("3", Ok(MenuChoice::Show))]
    #[case("9", Ok(MenuChoice::Exit))]
    #[case("4", Err(MenuSelectionError::Unknown(4)))]
    #[case("-1", Err(MenuSelectionError::Unknown(-1)))]
    #[case("abc", Err(MenuSelectionError::NotANumber))]
    #[case("", Err(MenuSelectionError::NotANumber))]
    fn given_input_when_parsing_menu_choice_then_expected(
        #[case] input: &str,
        #[case] expected: Result<MenuChoice, MenuSelectionError>,
    ) {
        assert_eq!(MenuChoice::parse(input), expected);
    }

    #[test]
    fn given_unknown_option_when_displayed_then_names_number() {
        assert_eq!(
            MenuSelectionError::Unknown(7).to_string(),
            "7 is not a valid option."
        );
    }

    #[test]
    fn given_selection_error_when_boxed_then_usable_as_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(MenuSelectionError::NotANumber);
        assert_eq!(err.to_string(), "Invalid input. Please enter a number.");
    }
}
