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
    common::ProjectIdentifier,
    problem::{err::ProblemError, prob::Problem, student::Student},
};

/// Collects projects and students before validating them into a [`Problem`].
///
/// When no project is declared explicitly, the project order is taken from
/// the first student's preference list.
#[derive(Debug, Clone, Default)]
pub struct ProblemBuilder {
    projects: Vec<ProjectIdentifier>,
    students: Vec<Student>,
}

impl ProblemBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn with_capacities(projects: usize, students: usize) -> Self {
        Self {
            projects: Vec::with_capacity(projects),
            students: Vec::with_capacity(students),
        }
    }

    #[inline]
    pub fn with_projects<I>(mut self, projects: I) -> Self
    where
        I: IntoIterator<Item = ProjectIdentifier>,
    {
        self.projects.clear();
        self.projects.extend(projects);
        self
    }

    #[inline]
    pub fn with_students<I>(mut self, students: I) -> Self
    where
        I: IntoIterator<Item = Student>,
    {
        self.students.clear();
        self.students.extend(students);
        self
    }

    #[inline]
    pub fn add_project(&mut self, project: ProjectIdentifier) -> &mut Self {
        self.projects.push(project);
        self
    }

    #[inline]
    pub fn extend_projects<I>(&mut self, projects: I) -> &mut Self
    where
        I: IntoIterator<Item = ProjectIdentifier>,
    {
        self.projects.extend(projects);
        self
    }

    #[inline]
    pub fn add_student(&mut self, student: Student) -> &mut Self {
        self.students.push(student);
        self
    }

    #[inline]
    pub fn extend_students<I>(&mut self, students: I) -> &mut Self
    where
        I: IntoIterator<Item = Student>,
    {
        self.students.extend(students);
        self
    }

    #[inline]
    pub fn student_count(&self) -> usize {
        self.students.len()
    }

    pub fn build(self) -> Result<Problem, ProblemError> {
        let projects = if self.projects.is_empty() {
            self.students
                .first()
                .map(|s| s.preferences().to_vec())
                .unwrap_or_default()
        } else {
            self.projects
        };
        Problem::new(projects, self.students)
    }
}
