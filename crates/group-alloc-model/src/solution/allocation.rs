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

use crate::common::{Cost, ProjectIdentifier, StudentIdentifier};

/// Final project groups produced by an allocator, together with the cost
/// that allocator accumulated while producing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    groups: Vec<(ProjectIdentifier, Vec<StudentIdentifier>)>,
    cost: Cost,
}

impl Allocation {
    #[inline]
    pub fn new(groups: Vec<(ProjectIdentifier, Vec<StudentIdentifier>)>, cost: Cost) -> Self {
        Self { groups, cost }
    }

    #[inline]
    pub fn groups(&self) -> &[(ProjectIdentifier, Vec<StudentIdentifier>)] {
        &self.groups
    }

    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (ProjectIdentifier, &[StudentIdentifier])> {
        self.groups.iter().map(|(p, m)| (*p, m.as_slice()))
    }

    #[inline]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    #[inline]
    pub fn members(&self, project: ProjectIdentifier) -> Option<&[StudentIdentifier]> {
        self.groups
            .iter()
            .find(|(p, _)| *p == project)
            .map(|(_, m)| m.as_slice())
    }

    pub fn project_of(&self, student: &StudentIdentifier) -> Option<ProjectIdentifier> {
        self.groups
            .iter()
            .find(|(_, m)| m.contains(student))
            .map(|(p, _)| *p)
    }

    #[inline]
    pub fn group_sizes(&self) -> impl Iterator<Item = usize> + '_ {
        self.groups.iter().map(|(_, m)| m.len())
    }

    #[inline]
    pub fn count_groups_of(&self, size: usize) -> usize {
        self.group_sizes().filter(|&n| n == size).count()
    }

    #[inline]
    pub fn student_count(&self) -> usize {
        self.group_sizes().sum()
    }

    #[inline]
    pub fn project_count(&self) -> usize {
        self.groups.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Allocation {
        Allocation::new(
            vec![
                (
                    ProjectIdentifier::new(1),
                    vec!["a".into(), "b".into(), "c".into()],
                ),
                (
                    ProjectIdentifier::new(2),
                    vec!["d".into(), "e".into(), "f".into(), "g".into()],
                ),
            ],
            9,
        )
    }

    #[test]
    fn test_lookup_by_project_and_student() {
        let a = sample();
        assert_eq!(a.members(ProjectIdentifier::new(1)).map(|m| m.len()), Some(3));
        assert_eq!(a.members(ProjectIdentifier::new(3)), None);
        assert_eq!(a.project_of(&"g".into()), Some(ProjectIdentifier::new(2)));
        assert_eq!(a.project_of(&"z".into()), None);
    }

    #[test]
    fn test_size_statistics() {
        let a = sample();
        assert_eq!(a.cost(), 9);
        assert_eq!(a.student_count(), 7);
        assert_eq!(a.project_count(), 2);
        assert_eq!(a.count_groups_of(3), 1);
        assert_eq!(a.count_groups_of(4), 1);
        assert_eq!(a.group_sizes().collect::<Vec<_>>(), [3, 4]);
    }
}
