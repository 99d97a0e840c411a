// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::{
    common::{ProjectIdentifier, StudentIdentifier},
    problem::{builder::ProblemBuilder, err::ProblemLoaderError, prob::Problem, student::Student},
};
use std::{
    fs::File,
    io::{BufRead, BufReader, Read},
    path::Path,
};

/// Reads a roster with one student per line:
///
/// ```text
/// 'Ada Lovelace' 2 1 3
/// 'Alan Turing' 1 3 2
/// ```
///
/// The name is the text between the first two single quotes, followed by a
/// permutation of the project identifiers. Blank lines are ignored. Project
/// order is taken from the first student's list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProblemLoader;

impl ProblemLoader {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn from_bufread<R: BufRead>(&self, br: R) -> Result<Problem, ProblemLoaderError> {
        let mut builder = ProblemBuilder::new();
        for (i, line) in br.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            builder.add_student(parse_line(&line, i + 1)?);
        }

        if builder.student_count() == 0 {
            return Err(ProblemLoaderError::EmptyRoster);
        }
        Ok(builder.build()?)
    }

    #[inline]
    pub fn from_path(&self, path: impl AsRef<Path>) -> Result<Problem, ProblemLoaderError> {
        let file = File::open(path).map_err(ProblemLoaderError::Io)?;
        self.from_bufread(BufReader::new(file))
    }

    #[inline]
    pub fn from_reader<R: Read>(&self, r: R) -> Result<Problem, ProblemLoaderError> {
        self.from_bufread(BufReader::new(r))
    }

    #[inline]
    pub fn from_str(&self, s: &str) -> Result<Problem, ProblemLoaderError> {
        self.from_reader(s.as_bytes())
    }
}

fn parse_line(line: &str, line_no: usize) -> Result<Student, ProblemLoaderError> {
    let missing = || ProblemLoaderError::MissingQuote { line: line_no };

    let open = line.find('\'').ok_or_else(missing)?;
    let rest = &line[open + 1..];
    let close = rest.find('\'').ok_or_else(missing)?;
    let name = &rest[..close];

    let preferences = rest[close + 1..]
        .split_whitespace()
        .map(|tok| {
            tok.parse::<usize>()
                .map(ProjectIdentifier::new)
                .map_err(|source| ProblemLoaderError::ParseInt {
                    line: line_no,
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Student::new(StudentIdentifier::from(name), preferences))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::err::ProblemError;

    const SMALL_OK: &str = "'Ada Lovelace' 2 1\n\
                            'Alan Turing' 1 2\n\
                            \n\
                            'Grace Hopper' 2 1";

    #[test]
    fn test_loads_names_with_spaces_and_preferences() {
        let p = ProblemLoader::new().from_str(SMALL_OK).unwrap();
        assert_eq!(p.student_count(), 3);
        assert_eq!(p.project_count(), 2);

        let grace = p.student(&"Grace Hopper".into()).unwrap();
        assert_eq!(grace.first_choice(), Some(ProjectIdentifier::new(2)));

        // Project order follows the first student's list.
        assert_eq!(
            p.projects(),
            &[ProjectIdentifier::new(2), ProjectIdentifier::new(1)]
        );
    }

    #[test]
    fn test_preserves_roster_order() {
        let p = ProblemLoader::default().from_str(SMALL_OK).unwrap();
        let names: Vec<&str> = p.iter_students().map(|s| s.name()).collect();
        assert_eq!(names, ["Ada Lovelace", "Alan Turing", "Grace Hopper"]);
    }

    #[test]
    fn test_missing_quote_reports_line() {
        let err = ProblemLoader::new()
            .from_str("'a' 1 2\nb 1 2")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::MissingQuote { line: 2 }));

        let err = ProblemLoader::new().from_str("'unterminated 1 2").unwrap_err();
        assert!(matches!(err, ProblemLoaderError::MissingQuote { line: 1 }));
    }

    #[test]
    fn test_bad_project_token_reports_line() {
        let err = ProblemLoader::new()
            .from_str("'a' 1 2\n'b' 1 x")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::ParseInt { line: 2, .. }));
    }

    #[test]
    fn test_empty_roster_is_rejected() {
        let err = ProblemLoader::new().from_str("\n  \n").unwrap_err();
        assert!(matches!(err, ProblemLoaderError::EmptyRoster));
    }

    #[test]
    fn test_malformed_preferences_surface_as_problem_error() {
        let err = ProblemLoader::new()
            .from_str("'a' 1 2 3\n'b' 1 1 2")
            .unwrap_err();
        assert!(matches!(
            err,
            ProblemLoaderError::Problem(ProblemError::DuplicatePreference(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = ProblemLoader::new()
            .from_path("this/roster/does/not/exist.txt")
            .unwrap_err();
        assert!(matches!(err, ProblemLoaderError::Io(_)));
    }
}
