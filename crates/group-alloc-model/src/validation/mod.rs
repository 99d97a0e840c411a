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

pub mod err;

use crate::{
    problem::{capacity::CapacityPlan, prob::Problem},
    solution::allocation::Allocation,
    validation::err::AllocationValidationError,
};
use std::collections::HashSet;

/// Checks that an [`Allocation`] is a valid grouping of a [`Problem`]:
/// a partition of all students over all projects with every group of
/// size 3 or 4 and the planned number of groups of three.
#[derive(Debug, Clone)]
pub struct AllocationValidator;

impl AllocationValidator {
    pub fn validate_partition(
        problem: &Problem,
        allocation: &Allocation,
    ) -> Result<(), AllocationValidationError> {
        let mut projects = HashSet::with_capacity(problem.project_count());
        let mut seen = HashSet::with_capacity(problem.student_count());

        for (project, members) in allocation.iter() {
            if !problem.contains_project(project) || !projects.insert(project) {
                return Err(AllocationValidationError::UnknownProject(project));
            }
            for m in members {
                if !problem.contains_student(m) {
                    return Err(AllocationValidationError::UnknownStudent(m.clone()));
                }
                if !seen.insert(m) {
                    return Err(AllocationValidationError::DuplicateStudent(m.clone()));
                }
            }
        }

        if let Some(&p) = problem.projects().iter().find(|p| !projects.contains(*p)) {
            return Err(AllocationValidationError::MissingProject(p));
        }
        if let Some(s) = problem.iter_students().find(|s| !seen.contains(s.id())) {
            return Err(AllocationValidationError::MissingStudent(s.id().clone()));
        }
        Ok(())
    }

    pub fn validate_group_sizes(
        problem: &Problem,
        allocation: &Allocation,
    ) -> Result<(), AllocationValidationError> {
        let plan = problem.capacity_plan()?;
        for (project, members) in allocation.iter() {
            if !CapacityPlan::is_valid_group_size(members.len()) {
                return Err(AllocationValidationError::GroupSize {
                    project,
                    size: members.len(),
                });
            }
        }

        let actual = allocation.count_groups_of(3);
        if actual != plan.groups_of_three() {
            return Err(AllocationValidationError::GroupsOfThree {
                expected: plan.groups_of_three(),
                actual,
            });
        }
        Ok(())
    }

    #[inline]
    pub fn validate(
        problem: &Problem,
        allocation: &Allocation,
    ) -> Result<(), AllocationValidationError> {
        Self::validate_partition(problem, allocation)?;
        Self::validate_group_sizes(problem, allocation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ProjectIdentifier, StudentIdentifier};
    use crate::problem::loader::ProblemLoader;

    const SIX: &str = "'a' 1 2\n'b' 1 2\n'c' 1 2\n'd' 2 1\n'e' 2 1\n'f' 2 1";

    #[inline]
    fn pid(n: usize) -> ProjectIdentifier {
        ProjectIdentifier::new(n)
    }

    fn names(v: &[&str]) -> Vec<StudentIdentifier> {
        v.iter().map(|&s| s.into()).collect()
    }

    #[test]
    fn test_accepts_valid_grouping() {
        let p = ProblemLoader::new().from_str(SIX).unwrap();
        let a = Allocation::new(
            vec![
                (pid(1), names(&["a", "b", "c"])),
                (pid(2), names(&["d", "e", "f"])),
            ],
            6,
        );
        assert_eq!(AllocationValidator::validate(&p, &a), Ok(()));
    }

    #[test]
    fn test_detects_missing_and_duplicate_students() {
        let p = ProblemLoader::new().from_str(SIX).unwrap();
        let missing = Allocation::new(
            vec![(pid(1), names(&["a", "b", "c"])), (pid(2), names(&["d", "e"]))],
            0,
        );
        assert_eq!(
            AllocationValidator::validate(&p, &missing),
            Err(AllocationValidationError::MissingStudent("f".into()))
        );

        let dup = Allocation::new(
            vec![
                (pid(1), names(&["a", "b", "c", "a"])),
                (pid(2), names(&["d", "e", "f"])),
            ],
            0,
        );
        assert_eq!(
            AllocationValidator::validate(&p, &dup),
            Err(AllocationValidationError::DuplicateStudent("a".into()))
        );
    }

    #[test]
    fn test_detects_unknown_entries() {
        let p = ProblemLoader::new().from_str(SIX).unwrap();
        let unknown = Allocation::new(
            vec![
                (pid(1), names(&["a", "b", "c"])),
                (pid(2), names(&["d", "e", "zed"])),
            ],
            0,
        );
        assert_eq!(
            AllocationValidator::validate(&p, &unknown),
            Err(AllocationValidationError::UnknownStudent("zed".into()))
        );

        let bad_project = Allocation::new(vec![(pid(9), names(&["a"]))], 0);
        assert_eq!(
            AllocationValidator::validate(&p, &bad_project),
            Err(AllocationValidationError::UnknownProject(pid(9)))
        );
    }

    #[test]
    fn test_detects_bad_group_sizes() {
        let p = ProblemLoader::new().from_str(SIX).unwrap();
        let a = Allocation::new(
            vec![
                (pid(1), names(&["a", "b", "c", "d"])),
                (pid(2), names(&["e", "f"])),
            ],
            0,
        );
        assert_eq!(AllocationValidator::validate_partition(&p, &a), Ok(()));
        assert_eq!(
            AllocationValidator::validate(&p, &a),
            Err(AllocationValidationError::GroupSize {
                project: pid(2),
                size: 2
            })
        );
    }
}
