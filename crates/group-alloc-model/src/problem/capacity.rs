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

use crate::problem::err::{
    BelowMinimumPopulationError, InvalidConfigurationError, ProjectCountMismatchError,
};

/// Smallest population that can be split into groups of three and four.
pub const MIN_STUDENTS: usize = 6;
pub const MIN_GROUP_SIZE: usize = 3;
pub const MAX_GROUP_SIZE: usize = 4;

/// How many projects end up with three members and how many with four.
///
/// The split is closed-form: `groups_of_three = (4 - N mod 4) mod 4`, and
/// `4 * groups_of_four + 3 * groups_of_three == N` whenever the plan exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityPlan {
    students: usize,
    projects: usize,
    groups_of_three: usize,
}

impl CapacityPlan {
    pub fn new(students: usize, projects: usize) -> Result<Self, InvalidConfigurationError> {
        if students < MIN_STUDENTS {
            return Err(BelowMinimumPopulationError::new(students, MIN_STUDENTS).into());
        }
        let expected = students.div_ceil(MAX_GROUP_SIZE);
        if projects != expected {
            return Err(ProjectCountMismatchError::new(students, expected, projects).into());
        }

        Ok(Self {
            students,
            projects,
            groups_of_three: (MAX_GROUP_SIZE - students % MAX_GROUP_SIZE) % MAX_GROUP_SIZE,
        })
    }

    #[inline]
    pub fn students(&self) -> usize {
        self.students
    }

    #[inline]
    pub fn projects(&self) -> usize {
        self.projects
    }

    #[inline]
    pub fn groups_of_three(&self) -> usize {
        self.groups_of_three
    }

    #[inline]
    pub fn groups_of_four(&self) -> usize {
        self.projects - self.groups_of_three
    }

    #[inline]
    pub fn is_valid_group_size(size: usize) -> bool {
        (MIN_GROUP_SIZE..=MAX_GROUP_SIZE).contains(&size)
    }
}
