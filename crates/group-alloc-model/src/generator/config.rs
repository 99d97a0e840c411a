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

use crate::problem::capacity::MAX_GROUP_SIZE;

/// Dataset sizes used for the standard comparison runs.
pub const DEFAULT_DATASET_SIZES: [usize; 6] = [31, 62, 125, 250, 500, 1000];

/// Configuration for synthetic roster generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceGenConfig {
    students: usize,
    seed: u64,
}

impl Default for InstanceGenConfig {
    fn default() -> Self {
        Self {
            students: DEFAULT_DATASET_SIZES[0],
            seed: 42,
        }
    }
}

impl InstanceGenConfig {
    #[inline]
    pub fn new(students: usize) -> Self {
        Self {
            students,
            ..Self::default()
        }
    }

    #[inline]
    pub fn with_students(mut self, students: usize) -> Self {
        self.students = students;
        self
    }

    #[inline]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[inline]
    pub fn students(&self) -> usize {
        self.students
    }

    /// One project per four students, rounded up.
    #[inline]
    pub fn projects(&self) -> usize {
        self.students.div_ceil(MAX_GROUP_SIZE)
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_count_rounds_up() {
        assert_eq!(InstanceGenConfig::new(31).projects(), 8);
        assert_eq!(InstanceGenConfig::new(32).projects(), 8);
        assert_eq!(InstanceGenConfig::new(33).projects(), 9);
        assert_eq!(InstanceGenConfig::default().with_students(6).projects(), 2);
    }
}
