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
use crate::problem::err::InvalidConfigurationError;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllocationValidationError {
    InvalidConfiguration(InvalidConfigurationError),
    UnknownProject(ProjectIdentifier),
    MissingProject(ProjectIdentifier),
    UnknownStudent(StudentIdentifier),
    DuplicateStudent(StudentIdentifier),
    MissingStudent(StudentIdentifier),
    GroupSize {
        project: ProjectIdentifier,
        size: usize,
    },
    GroupsOfThree {
        expected: usize,
        actual: usize,
    },
}

impl std::fmt::Display for AllocationValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationValidationError::InvalidConfiguration(e) => write!(f, "{}", e),
            AllocationValidationError::UnknownProject(p) => {
                write!(f, "Allocation refers to unknown project {}", p)
            }
            AllocationValidationError::MissingProject(p) => {
                write!(f, "Project {} is missing from the allocation", p)
            }
            AllocationValidationError::UnknownStudent(s) => {
                write!(f, "Allocation refers to unknown student {}", s)
            }
            AllocationValidationError::DuplicateStudent(s) => {
                write!(f, "Student {} is assigned more than once", s)
            }
            AllocationValidationError::MissingStudent(s) => {
                write!(f, "Student {} is not assigned to any project", s)
            }
            AllocationValidationError::GroupSize { project, size } => {
                write!(f, "Project {} has {} members", project, size)
            }
            AllocationValidationError::GroupsOfThree { expected, actual } => write!(
                f,
                "Expected {} groups of three but found {}",
                expected, actual
            ),
        }
    }
}

impl std::error::Error for AllocationValidationError {}

impl From<InvalidConfigurationError> for AllocationValidationError {
    fn from(e: InvalidConfigurationError) -> Self {
        AllocationValidationError::InvalidConfiguration(e)
    }
}
