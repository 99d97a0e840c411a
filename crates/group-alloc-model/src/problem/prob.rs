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
use crate::problem::{
    capacity::CapacityPlan,
    err::{
        DuplicatePreferenceError, DuplicateProjectError, DuplicateStudentError,
        EmptyPopulationError, EmptyProjectListError, InvalidConfigurationError,
        PreferenceLengthError, ProblemError, UnknownProjectError,
    },
    student::Student,
};
use std::collections::{HashMap, HashSet};

/// The validated preference store: every student ranks every project
/// exactly once. Read-only after construction.
#[derive(Debug, Clone)]
pub struct Problem {
    projects: Vec<ProjectIdentifier>,
    students: Vec<Student>,
    student_index: HashMap<StudentIdentifier, usize>,
}

impl Problem {
    /// `projects` fixes the natural project order used to break load ties.
    pub fn new(
        projects: Vec<ProjectIdentifier>,
        students: Vec<Student>,
    ) -> Result<Self, ProblemError> {
        if students.is_empty() {
            return Err(EmptyPopulationError.into());
        }
        if projects.is_empty() {
            return Err(EmptyProjectListError.into());
        }

        let mut known = HashSet::with_capacity(projects.len());
        for &p in &projects {
            if !known.insert(p) {
                return Err(DuplicateProjectError::new(p).into());
            }
        }

        let mut student_index = HashMap::with_capacity(students.len());
        for (i, s) in students.iter().enumerate() {
            if student_index.insert(s.id().clone(), i).is_some() {
                return Err(DuplicateStudentError::new(s.id().clone()).into());
            }
            validate_preferences(s, &known)?;
        }

        Ok(Self {
            projects,
            students,
            student_index,
        })
    }

    #[inline]
    pub fn projects(&self) -> &[ProjectIdentifier] {
        &self.projects
    }

    #[inline]
    pub fn students(&self) -> &[Student] {
        &self.students
    }

    #[inline]
    pub fn iter_students(&self) -> impl Iterator<Item = &Student> {
        self.students.iter()
    }

    #[inline]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    #[inline]
    pub fn project_count(&self) -> usize {
        self.projects.len()
    }

    #[inline]
    pub fn student(&self, id: &StudentIdentifier) -> Option<&Student> {
        self.student_index.get(id).map(|&i| &self.students[i])
    }

    #[inline]
    pub fn contains_student(&self, id: &StudentIdentifier) -> bool {
        self.student_index.contains_key(id)
    }

    #[inline]
    pub fn contains_project(&self, id: ProjectIdentifier) -> bool {
        self.projects.contains(&id)
    }

    /// Group split for this population, or why none exists.
    #[inline]
    pub fn capacity_plan(&self) -> Result<CapacityPlan, InvalidConfigurationError> {
        CapacityPlan::new(self.student_count(), self.project_count())
    }
}

fn validate_preferences(
    student: &Student,
    known: &HashSet<ProjectIdentifier>,
) -> Result<(), ProblemError> {
    let prefs = student.preferences();
    if prefs.len() != known.len() {
        return Err(
            PreferenceLengthError::new(student.id().clone(), known.len(), prefs.len()).into(),
        );
    }

    let mut seen = HashSet::with_capacity(prefs.len());
    for &p in prefs {
        if !known.contains(&p) {
            return Err(UnknownProjectError::new(student.id().clone(), p).into());
        }
        if !seen.insert(p) {
            return Err(DuplicatePreferenceError::new(student.id().clone(), p).into());
        }
    }
    Ok(())
}
