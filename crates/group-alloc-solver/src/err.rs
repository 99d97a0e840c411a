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

use group_alloc_model::prelude::{InvalidConfigurationError, ProblemError, ProjectIdentifier};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ExhaustedPreferencesError {
    project: ProjectIdentifier,
    load: usize,
    capacity: usize,
    rounds: usize,
}

impl ExhaustedPreferencesError {
    #[inline]
    pub fn new(project: ProjectIdentifier, load: usize, capacity: usize, rounds: usize) -> Self {
        Self {
            project,
            load,
            capacity,
            rounds,
        }
    }

    #[inline]
    pub fn project(&self) -> ProjectIdentifier {
        self.project
    }

    #[inline]
    pub fn load(&self) -> usize {
        self.load
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn rounds(&self) -> usize {
        self.rounds
    }
}

impl std::fmt::Display for ExhaustedPreferencesError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Project {} still holds {} students (capacity {}) after {} repair rounds",
            self.project, self.load, self.capacity, self.rounds
        )
    }
}

impl std::error::Error for ExhaustedPreferencesError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnbalancedGroupError {
    project: ProjectIdentifier,
    load: usize,
}

impl UnbalancedGroupError {
    #[inline]
    pub fn new(project: ProjectIdentifier, load: usize) -> Self {
        Self { project, load }
    }

    #[inline]
    pub fn project(&self) -> ProjectIdentifier {
        self.project
    }

    #[inline]
    pub fn load(&self) -> usize {
        self.load
    }
}

impl std::fmt::Display for UnbalancedGroupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Project {} ended rebalancing with {} students, expected 3 or 4",
            self.project, self.load
        )
    }
}

impl std::error::Error for UnbalancedGroupError {}

/// Rebalancing could not reach a grouping with every group of size 3 or 4.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum UnsatisfiableError {
    ExhaustedPreferences(ExhaustedPreferencesError),
    UnbalancedGroup(UnbalancedGroupError),
}

impl std::fmt::Display for UnsatisfiableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UnsatisfiableError::ExhaustedPreferences(e) => e.fmt(f),
            UnsatisfiableError::UnbalancedGroup(e) => e.fmt(f),
        }
    }
}

impl std::error::Error for UnsatisfiableError {}

impl From<ExhaustedPreferencesError> for UnsatisfiableError {
    fn from(e: ExhaustedPreferencesError) -> Self {
        UnsatisfiableError::ExhaustedPreferences(e)
    }
}

impl From<UnbalancedGroupError> for UnsatisfiableError {
    fn from(e: UnbalancedGroupError) -> Self {
        UnsatisfiableError::UnbalancedGroup(e)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AllocationError {
    InvalidConfiguration(InvalidConfigurationError),
    MalformedInput(ProblemError),
    Unsatisfiable(UnsatisfiableError),
}

impl std::fmt::Display for AllocationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AllocationError::InvalidConfiguration(e) => write!(f, "Invalid configuration: {}", e),
            AllocationError::MalformedInput(e) => write!(f, "Malformed input: {}", e),
            AllocationError::Unsatisfiable(e) => write!(f, "Unsatisfiable: {}", e),
        }
    }
}

impl std::error::Error for AllocationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AllocationError::InvalidConfiguration(e) => Some(e),
            AllocationError::MalformedInput(e) => Some(e),
            AllocationError::Unsatisfiable(e) => Some(e),
        }
    }
}

impl From<InvalidConfigurationError> for AllocationError {
    fn from(e: InvalidConfigurationError) -> Self {
        AllocationError::InvalidConfiguration(e)
    }
}

impl From<ProblemError> for AllocationError {
    fn from(e: ProblemError) -> Self {
        AllocationError::MalformedInput(e)
    }
}

impl From<UnsatisfiableError> for AllocationError {
    fn from(e: UnsatisfiableError) -> Self {
        AllocationError::Unsatisfiable(e)
    }
}

impl From<ExhaustedPreferencesError> for AllocationError {
    fn from(e: ExhaustedPreferencesError) -> Self {
        AllocationError::Unsatisfiable(e.into())
    }
}

impl From<UnbalancedGroupError> for AllocationError {
    fn from(e: UnbalancedGroupError) -> Self {
        AllocationError::Unsatisfiable(e.into())
    }
}
