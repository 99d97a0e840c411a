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
    err::AllocationError,
    index::{ProjectIndex, StudentIndex},
};
use group_alloc_model::{
    prelude::{CapacityPlan, Problem, ProblemError, ProjectIdentifier, StudentIdentifier},
    problem::err::UnknownProjectError,
};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub struct IdMapper<'p> {
    project_to_index: HashMap<ProjectIdentifier, ProjectIndex>,
    index_to_project: Vec<ProjectIdentifier>,
    index_to_student: Vec<&'p StudentIdentifier>,
}

impl<'p> IdMapper<'p> {
    #[inline]
    fn new(
        project_to_index: HashMap<ProjectIdentifier, ProjectIndex>,
        index_to_project: Vec<ProjectIdentifier>,
        index_to_student: Vec<&'p StudentIdentifier>,
    ) -> Self {
        Self {
            project_to_index,
            index_to_project,
            index_to_student,
        }
    }

    #[inline]
    pub fn project_index(&self, id: ProjectIdentifier) -> Option<ProjectIndex> {
        self.project_to_index.get(&id).copied()
    }

    #[inline]
    pub fn project_id(&self, i: ProjectIndex) -> Option<ProjectIdentifier> {
        self.index_to_project.get(i.get()).copied()
    }

    #[inline]
    pub fn student_id(&self, i: StudentIndex) -> Option<&'p StudentIdentifier> {
        self.index_to_student.get(i.get()).copied()
    }

    #[inline]
    pub fn projects_len(&self) -> usize {
        self.index_to_project.len()
    }

    #[inline]
    pub fn students_len(&self) -> usize {
        self.index_to_student.len()
    }
}

/// Dense, index-addressed view of a [`Problem`] used by the allocators.
///
/// Preferences and ranks are stored row-major with one row per student,
/// so `preference(s, r)` and `rank_of(s, p)` are plain slice lookups.
#[derive(Debug, Clone)]
pub struct AllocationModel<'p> {
    problem: &'p Problem,
    plan: CapacityPlan,
    preferences: Vec<ProjectIndex>, // len = S * P, [s][rank] -> project
    ranks: Vec<usize>,              // len = S * P, [s][project] -> rank
    mappings: IdMapper<'p>,
    students_len: usize,
    projects_len: usize,
}

impl<'p> AllocationModel<'p> {
    #[inline]
    pub fn problem(&self) -> &'p Problem {
        self.problem
    }

    #[inline]
    pub fn plan(&self) -> &CapacityPlan {
        &self.plan
    }

    #[inline]
    pub fn mappings(&self) -> &IdMapper<'p> {
        &self.mappings
    }

    #[inline]
    pub fn students_len(&self) -> usize {
        self.students_len
    }

    #[inline]
    pub fn projects_len(&self) -> usize {
        self.projects_len
    }

    #[inline]
    pub fn student_indices(&self) -> impl Iterator<Item = StudentIndex> + use<> {
        (0..self.students_len).map(StudentIndex::new)
    }

    #[inline]
    pub fn project_indices(&self) -> impl Iterator<Item = ProjectIndex> + use<> {
        (0..self.projects_len).map(ProjectIndex::new)
    }

    #[inline(always)]
    fn flat_index(&self, student: StudentIndex, column: usize) -> usize {
        debug_assert!(student.get() < self.students_len);
        debug_assert!(column < self.projects_len);

        student.get() * self.projects_len + column
    }

    /// The project `student` ranks at position `rank` (0 = first choice).
    #[inline]
    pub fn preference(&self, student: StudentIndex, rank: usize) -> Option<ProjectIndex> {
        if rank >= self.projects_len {
            return None;
        }
        self.preferences
            .get(self.flat_index(student, rank))
            .copied()
    }

    #[inline]
    pub fn first_choice(&self, student: StudentIndex) -> ProjectIndex {
        self.preferences[self.flat_index(student, 0)]
    }

    #[inline]
    pub fn rank_of(&self, student: StudentIndex, project: ProjectIndex) -> usize {
        self.ranks[self.flat_index(student, project.get())]
    }

    #[inline]
    pub fn preferences_of(&self, student: StudentIndex) -> &[ProjectIndex] {
        let start = self.flat_index(student, 0);
        &self.preferences[start..start + self.projects_len]
    }
}

impl<'p> TryFrom<&'p Problem> for AllocationModel<'p> {
    type Error = AllocationError;

    fn try_from(p: &'p Problem) -> Result<Self, Self::Error> {
        let plan = p.capacity_plan()?;
        let projects_len = p.project_count();
        let students_len = p.student_count();

        let index_to_project = p.projects().to_vec();
        let project_to_index: HashMap<_, _> = index_to_project
            .iter()
            .enumerate()
            .map(|(i, &id)| (id, ProjectIndex::new(i)))
            .collect();
        let index_to_student: Vec<&StudentIdentifier> =
            p.iter_students().map(|s| s.id()).collect();

        let mut preferences = Vec::with_capacity(students_len * projects_len);
        let mut ranks = vec![0usize; students_len * projects_len];
        for (si, student) in p.iter_students().enumerate() {
            for (rank, project) in student.iter_preferences().enumerate() {
                let pi = project_to_index.get(&project).copied().ok_or_else(|| {
                    ProblemError::from(UnknownProjectError::new(student.id().clone(), project))
                })?;
                preferences.push(pi);
                ranks[si * projects_len + pi.get()] = rank;
            }
        }

        Ok(Self {
            problem: p,
            plan,
            preferences,
            ranks,
            mappings: IdMapper::new(project_to_index, index_to_project, index_to_student),
            students_len,
            projects_len,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use group_alloc_model::prelude::{InvalidConfigurationError, ProblemLoader};

    fn load(s: &str) -> Problem {
        ProblemLoader::new().from_str(s).expect("roster parses")
    }

    #[test]
    fn test_model_indexes_follow_problem_order() {
        let problem = load("'a' 2 1\n'b' 1 2\n'c' 1 2\n'd' 2 1\n'e' 2 1\n'f' 1 2");
        let m = AllocationModel::try_from(&problem).expect("model builds");

        assert_eq!(m.students_len(), 6);
        assert_eq!(m.projects_len(), 2);
        // project order comes from the first student's list
        assert_eq!(
            m.mappings().project_id(ProjectIndex::new(0)),
            Some(ProjectIdentifier::new(2))
        );
        assert_eq!(
            m.mappings().project_index(ProjectIdentifier::new(1)),
            Some(ProjectIndex::new(1))
        );
        assert_eq!(
            m.mappings().student_id(StudentIndex::new(1)).map(|s| s.value().as_str()),
            Some("b")
        );
        assert_eq!(m.mappings().student_id(StudentIndex::new(6)), None);
    }

    #[test]
    fn test_preference_and_rank_are_inverse() {
        let problem = load("'a' 1 2 3\n'b' 3 1 2\n'c' 2 3 1\n'd' 1 3 2\n'e' 2 1 3\n'f' 3 2 1\n'g' 1 2 3\n'h' 1 2 3\n'i' 1 2 3");
        let m = AllocationModel::try_from(&problem).expect("model builds");

        for s in m.student_indices() {
            for rank in 0..m.projects_len() {
                let p = m.preference(s, rank).expect("rank in range");
                assert_eq!(m.rank_of(s, p), rank);
            }
            assert_eq!(m.preference(s, m.projects_len()), None);
            assert_eq!(m.preferences_of(s)[0], m.first_choice(s));
        }

        let b = StudentIndex::new(1);
        assert_eq!(m.first_choice(b), ProjectIndex::new(2));
        assert_eq!(m.rank_of(b, ProjectIndex::new(1)), 2);
    }

    #[test]
    fn test_model_rejects_invalid_configuration() {
        let problem = load("'a' 1 2\n'b' 1 2\n'c' 2 1\n'd' 2 1\n'e' 1 2");
        let err = AllocationModel::try_from(&problem).unwrap_err();
        assert!(matches!(
            err,
            AllocationError::InvalidConfiguration(InvalidConfigurationError::BelowMinimumPopulation(_))
        ));
    }
}
