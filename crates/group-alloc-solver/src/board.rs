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
    index::{ProjectIndex, StudentIndex},
    model::AllocationModel,
};
use group_alloc_model::prelude::{Allocation, Cost};

/// Mutable project → members table the allocators rebalance.
///
/// Members keep their insertion order; a relocated student is appended
/// to the end of its new group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectBoard {
    members: Vec<Vec<StudentIndex>>,
}

impl ProjectBoard {
    #[inline]
    pub fn new(projects_len: usize) -> Self {
        Self {
            members: vec![Vec::new(); projects_len],
        }
    }

    #[inline]
    pub fn projects_len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn load(&self, project: ProjectIndex) -> usize {
        self.members[project.get()].len()
    }

    #[inline]
    pub fn members(&self, project: ProjectIndex) -> &[StudentIndex] {
        &self.members[project.get()]
    }

    #[inline]
    pub fn loads(&self) -> impl Iterator<Item = (ProjectIndex, usize)> + '_ {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| (ProjectIndex::new(i), m.len()))
    }

    #[inline]
    pub fn place(&mut self, student: StudentIndex, project: ProjectIndex) {
        self.members[project.get()].push(student);
    }

    /// Moves `student` from `from` to the end of `to`.
    /// Returns `false` and leaves the board untouched if `student` is not in `from`.
    pub fn relocate(&mut self, student: StudentIndex, from: ProjectIndex, to: ProjectIndex) -> bool {
        let source = &mut self.members[from.get()];
        let Some(pos) = source.iter().position(|&s| s == student) else {
            return false;
        };
        source.remove(pos);
        self.members[to.get()].push(student);
        true
    }

    /// Projects ordered by descending load; equal loads keep index order.
    pub fn order_by_load(&self) -> Vec<ProjectIndex> {
        let mut order: Vec<ProjectIndex> = (0..self.members.len()).map(ProjectIndex::new).collect();
        order.sort_by(|a, b| self.load(*b).cmp(&self.load(*a)));
        order
    }

    #[inline]
    pub fn count_with_load(&self, load: usize) -> usize {
        self.members.iter().filter(|m| m.len() == load).count()
    }

    pub fn into_allocation(self, model: &AllocationModel<'_>, cost: Cost) -> Allocation {
        let mappings = model.mappings();
        let groups = self
            .members
            .into_iter()
            .enumerate()
            .filter_map(|(i, members)| {
                let project = mappings.project_id(ProjectIndex::new(i))?;
                let students = members
                    .into_iter()
                    .filter_map(|s| mappings.student_id(s).cloned())
                    .collect();
                Some((project, students))
            })
            .collect();
        Allocation::new(groups, cost)
    }
}
