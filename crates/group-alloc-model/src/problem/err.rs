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

use crate::common::{ProjectIdentifier, StudentIdentifier};
use std::num::ParseIntError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyPopulationError;

impl std::fmt::Display for EmptyPopulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The problem contains no students.")
    }
}

impl std::error::Error for EmptyPopulationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EmptyProjectListError;

impl std::fmt::Display for EmptyProjectListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "The problem contains no projects.")
    }
}

impl std::error::Error for EmptyProjectListError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicateStudentError {
    student: StudentIdentifier,
}

impl DuplicateStudentError {
    #[inline]
    pub fn new(student: StudentIdentifier) -> Self {
        Self { student }
    }

    #[inline]
    pub fn student(&self) -> &StudentIdentifier {
        &self.student
    }
}

impl std::fmt::Display for DuplicateStudentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Student {} appears more than once", self.student)
    }
}

impl std::error::Error for DuplicateStudentError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DuplicateProjectError {
    project: ProjectIdentifier,
}

impl DuplicateProjectError {
    #[inline]
    pub fn new(project: ProjectIdentifier) -> Self {
        Self { project }
    }

    #[inline]
    pub fn project(&self) -> ProjectIdentifier {
        self.project
    }
}

impl std::fmt::Display for DuplicateProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Project {} is declared more than once", self.project)
    }
}

impl std::error::Error for DuplicateProjectError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PreferenceLengthError {
    student: StudentIdentifier,
    expected: usize,
    actual: usize,
}

impl PreferenceLengthError {
    #[inline]
    pub fn new(student: StudentIdentifier, expected: usize, actual: usize) -> Self {
        Self {
            student,
            expected,
            actual,
        }
    }

    #[inline]
    pub fn student(&self) -> &StudentIdentifier {
        &self.student
    }

    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    #[inline]
    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl std::fmt::Display for PreferenceLengthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Student {} ranks {} projects but {} are available",
            self.student, self.actual, self.expected
        )
    }
}

impl std::error::Error for PreferenceLengthError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DuplicatePreferenceError {
    student: StudentIdentifier,
    project: ProjectIdentifier,
}

impl DuplicatePreferenceError {
    #[inline]
    pub fn new(student: StudentIdentifier, project: ProjectIdentifier) -> Self {
        Self { student, project }
    }

    #[inline]
    pub fn student(&self) -> &StudentIdentifier {
        &self.student
    }

    #[inline]
    pub fn project(&self) -> ProjectIdentifier {
        self.project
    }
}

impl std::fmt::Display for DuplicatePreferenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Student {} ranks project {} more than once",
            self.student, self.project
        )
    }
}

impl std::error::Error for DuplicatePreferenceError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnknownProjectError {
    student: StudentIdentifier,
    project: ProjectIdentifier,
}

impl UnknownProjectError {
    #[inline]
    pub fn new(student: StudentIdentifier, project: ProjectIdentifier) -> Self {
        Self { student, project }
    }

    #[inline]
    pub fn student(&self) -> &StudentIdentifier {
        &self.student
    }

    #[inline]
    pub fn project(&self) -> ProjectIdentifier {
        self.project
    }
}

impl std::fmt::Display for UnknownProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Student {} ranks unknown project {}",
            self.student, self.project
        )
    }
}

impl std::error::Error for UnknownProjectError {}

/// Integrity violations of the preference store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ProblemError {
    EmptyPopulation(EmptyPopulationError),
    EmptyProjectList(EmptyProjectListError),
    DuplicateStudent(DuplicateStudentError),
    DuplicateProject(DuplicateProjectError),
    PreferenceLength(PreferenceLengthError),
    DuplicatePreference(DuplicatePreferenceError),
    UnknownProject(UnknownProjectError),
}

impl std::fmt::Display for ProblemError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProblemError::EmptyPopulation(e) => write!(f, "{}", e),
            ProblemError::EmptyProjectList(e) => write!(f, "{}", e),
            ProblemError::DuplicateStudent(e) => write!(f, "{}", e),
            ProblemError::DuplicateProject(e) => write!(f, "{}", e),
            ProblemError::PreferenceLength(e) => write!(f, "{}", e),
            ProblemError::DuplicatePreference(e) => write!(f, "{}", e),
            ProblemError::UnknownProject(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ProblemError {}

impl From<EmptyPopulationError> for ProblemError {
    fn from(err: EmptyPopulationError) -> Self {
        ProblemError::EmptyPopulation(err)
    }
}

impl From<EmptyProjectListError> for ProblemError {
    fn from(err: EmptyProjectListError) -> Self {
        ProblemError::EmptyProjectList(err)
    }
}

impl From<DuplicateStudentError> for ProblemError {
    fn from(err: DuplicateStudentError) -> Self {
        ProblemError::DuplicateStudent(err)
    }
}

impl From<DuplicateProjectError> for ProblemError {
    fn from(err: DuplicateProjectError) -> Self {
        ProblemError::DuplicateProject(err)
    }
}

impl From<PreferenceLengthError> for ProblemError {
    fn from(err: PreferenceLengthError) -> Self {
        ProblemError::PreferenceLength(err)
    }
}

impl From<DuplicatePreferenceError> for ProblemError {
    fn from(err: DuplicatePreferenceError) -> Self {
        ProblemError::DuplicatePreference(err)
    }
}

impl From<UnknownProjectError> for ProblemError {
    fn from(err: UnknownProjectError) -> Self {
        ProblemError::UnknownProject(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BelowMinimumPopulationError {
    students: usize,
    minimum: usize,
}

impl BelowMinimumPopulationError {
    #[inline]
    pub fn new(students: usize, minimum: usize) -> Self {
        Self { students, minimum }
    }

    #[inline]
    pub fn students(&self) -> usize {
        self.students
    }

    #[inline]
    pub fn minimum(&self) -> usize {
        self.minimum
    }
}

impl std::fmt::Display for BelowMinimumPopulationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} students cannot be grouped; at least {} are required",
            self.students, self.minimum
        )
    }
}

impl std::error::Error for BelowMinimumPopulationError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProjectCountMismatchError {
    students: usize,
    expected: usize,
    actual: usize,
}

impl ProjectCountMismatchError {
    #[inline]
    pub fn new(students: usize, expected: usize, actual: usize) -> Self {
        Self {
            students,
            expected,
            actual,
        }
    }

    #[inline]
    pub fn students(&self) -> usize {
        self.students
    }

    #[inline]
    pub fn expected(&self) -> usize {
        self.expected
    }

    #[inline]
    pub fn actual(&self) -> usize {
        self.actual
    }
}

impl std::fmt::Display for ProjectCountMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} students need exactly {} projects, but {} were given",
            self.students, self.expected, self.actual
        )
    }
}

impl std::error::Error for ProjectCountMismatchError {}

/// The population and project count cannot be split into groups of 3 and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InvalidConfigurationError {
    BelowMinimumPopulation(BelowMinimumPopulationError),
    ProjectCountMismatch(ProjectCountMismatchError),
}

impl std::fmt::Display for InvalidConfigurationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InvalidConfigurationError::BelowMinimumPopulation(e) => e.fmt(f),
            InvalidConfigurationError::ProjectCountMismatch(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for InvalidConfigurationError {}

impl From<BelowMinimumPopulationError> for InvalidConfigurationError {
    fn from(e: BelowMinimumPopulationError) -> Self {
        InvalidConfigurationError::BelowMinimumPopulation(e)
    }
}

impl From<ProjectCountMismatchError> for InvalidConfigurationError {
    fn from(e: ProjectCountMismatchError) -> Self {
        InvalidConfigurationError::ProjectCountMismatch(e)
    }
}

#[derive(Debug)]
pub enum ProblemLoaderError {
    Io(std::io::Error),
    ParseInt { line: usize, source: ParseIntError },
    MissingQuote { line: usize },
    EmptyRoster,
    Problem(ProblemError),
}

impl From<std::io::Error> for ProblemLoaderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<ProblemError> for ProblemLoaderError {
    fn from(e: ProblemError) -> Self {
        Self::Problem(e)
    }
}

impl std::fmt::Display for ProblemLoaderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use ProblemLoaderError::*;
        match self {
            Io(e) => write!(f, "I/O error: {e}"),
            ParseInt { line, source } => write!(f, "line {line}: parse-int error: {source}"),
            MissingQuote { line } => write!(f, "line {line}: student name must be quoted"),
            EmptyRoster => write!(f, "roster contains no students"),
            Problem(e) => write!(f, "problem error: {e}"),
        }
    }
}

impl std::error::Error for ProblemLoaderError {}
