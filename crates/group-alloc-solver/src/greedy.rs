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
    allocator::Allocator,
    board::ProjectBoard,
    err::AllocationError,
    index::{ProjectIndex, StudentIndex},
    model::AllocationModel,
    rebalance::{Candidate, Rebalancer, TargetSelector},
};
use group_alloc_model::prelude::{Allocation, Cost, Problem};

/// Moves a displaced student to the project at position `round` of its
/// preference list, charging `round` per move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NextPreference;

impl TargetSelector for NextPreference {
    #[inline]
    fn name(&self) -> &str {
        "NextPreference"
    }

    #[inline]
    fn candidate(
        &mut self,
        model: &AllocationModel<'_>,
        student: StudentIndex,
        round: usize,
    ) -> Option<Candidate> {
        model
            .preference(student, round)
            .map(|project| Candidate::new(project, round))
    }

    #[inline]
    fn cost_delta(
        &self,
        _model: &AllocationModel<'_>,
        _student: StudentIndex,
        _from: ProjectIndex,
        to: Candidate,
    ) -> Cost {
        to.rank() as Cost
    }

    #[inline]
    fn exhausted(&self, model: &AllocationModel<'_>, round: usize) -> bool {
        round >= model.projects_len()
    }
}

/// Everyone starts in their first choice; overfull groups are drained
/// into the next choice of their members, round by round.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GreedyAllocator;

impl GreedyAllocator {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl Allocator for GreedyAllocator {
    #[inline]
    fn name(&self) -> &str {
        "GreedyAllocator"
    }

    #[tracing::instrument(
        level = "debug",
        name = "Greedy Allocation",
        skip_all,
        fields(students = problem.student_count(), projects = problem.project_count())
    )]
    fn allocate(&mut self, problem: &Problem) -> Result<Allocation, AllocationError> {
        let model = AllocationModel::try_from(problem)?;
        let mut board = ProjectBoard::new(model.projects_len());
        for s in model.student_indices() {
            board.place(s, model.first_choice(s));
        }

        let mut cost = model.students_len() as Cost;
        Rebalancer::new(&model).run(&mut board, &mut NextPreference, &mut cost)?;

        tracing::debug!(cost, "Greedy allocation complete");
        Ok(board.into_allocation(&model, cost))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::err::UnsatisfiableError;
    use group_alloc_model::{
        generator::{InstanceGenerator, config::InstanceGenConfig},
        prelude::{AllocationValidator, ProblemLoader, ProjectIdentifier, StudentIdentifier},
    };

    fn load(s: &str) -> Problem {
        ProblemLoader::new().from_str(s).expect("roster parses")
    }

    fn roster(lines: &[(&str, &str)]) -> Problem {
        let text = lines
            .iter()
            .map(|(name, prefs)| format!("'{name}' {prefs}"))
            .collect::<Vec<_>>()
            .join("\n");
        load(&text)
    }

    fn names(allocation: &Allocation, project: usize) -> Vec<&str> {
        allocation
            .members(ProjectIdentifier::new(project))
            .expect("project present")
            .iter()
            .map(|s: &StudentIdentifier| s.value().as_str())
            .collect()
    }

    #[test]
    fn test_all_first_choice_same_project_six_students() {
        let problem = roster(&[
            ("s1", "1 2"),
            ("s2", "1 2"),
            ("s3", "1 2"),
            ("s4", "1 2"),
            ("s5", "1 2"),
            ("s6", "1 2"),
        ]);
        let allocation = GreedyAllocator::new().allocate(&problem).expect("allocates");

        assert_eq!(allocation.cost(), 9);
        assert_eq!(names(&allocation, 1), vec!["s4", "s5", "s6"]);
        assert_eq!(names(&allocation, 2), vec!["s1", "s2", "s3"]);
        AllocationValidator::validate(&problem, &allocation).expect("valid allocation");
    }

    #[test]
    fn test_balanced_first_choices_cost_is_population() {
        let problem = roster(&[
            ("a", "1 2"),
            ("b", "1 2"),
            ("c", "1 2"),
            ("d", "1 2"),
            ("e", "2 1"),
            ("f", "2 1"),
            ("g", "2 1"),
            ("h", "2 1"),
        ]);
        let allocation = GreedyAllocator::new().allocate(&problem).expect("allocates");

        assert_eq!(allocation.cost(), 8);
        assert_eq!(names(&allocation, 1), vec!["a", "b", "c", "d"]);
        assert_eq!(names(&allocation, 2), vec!["e", "f", "g", "h"]);
    }

    #[test]
    fn test_second_choices_split_across_projects() {
        let mut lines = Vec::new();
        let names_1: Vec<String> = (1..=6).map(|i| format!("s{i}")).collect();
        let names_2: Vec<String> = (7..=12).map(|i| format!("s{i}")).collect();
        for n in &names_1 {
            lines.push((n.as_str(), "1 2 3"));
        }
        for n in &names_2 {
            lines.push((n.as_str(), "1 3 2"));
        }
        let problem = roster(&lines);
        let allocation = GreedyAllocator::new().allocate(&problem).expect("allocates");

        assert_eq!(allocation.cost(), 20);
        assert_eq!(names(&allocation, 1), vec!["s5", "s6", "s11", "s12"]);
        assert_eq!(names(&allocation, 2), vec!["s1", "s2", "s3", "s4"]);
        assert_eq!(names(&allocation, 3), vec!["s7", "s8", "s9", "s10"]);
    }

    #[test]
    fn test_round_counter_is_shared_within_a_project() {
        let mut lines = Vec::new();
        let owned: Vec<String> = (1..=12).map(|i| format!("s{i}")).collect();
        for (i, n) in owned.iter().enumerate() {
            lines.push((n.as_str(), if i < 9 { "1 2 3" } else { "2 1 3" }));
        }
        let problem = roster(&lines);
        let allocation = GreedyAllocator::new().allocate(&problem).expect("allocates");

        // s1 moves in round 1 (+1), s2..s5 in round 2 (+2 each).
        assert_eq!(allocation.cost(), 12 + 1 + 4 * 2);
        assert_eq!(names(&allocation, 1), vec!["s6", "s7", "s8", "s9"]);
        assert_eq!(names(&allocation, 2), vec!["s10", "s11", "s12", "s1"]);
        assert_eq!(names(&allocation, 3), vec!["s2", "s3", "s4", "s5"]);
    }

    #[test]
    fn test_cap_three_pass_moves_into_small_group() {
        let problem = roster(&[
            ("s1", "1 2 3"),
            ("s2", "1 2 3"),
            ("s3", "1 2 3"),
            ("s4", "1 2 3"),
            ("s5", "2 3 1"),
            ("s6", "2 3 1"),
            ("s7", "2 3 1"),
            ("s8", "2 3 1"),
            ("s9", "3 1 2"),
            ("s10", "3 1 2"),
        ]);
        let allocation = GreedyAllocator::new().allocate(&problem).expect("allocates");

        assert_eq!(allocation.cost(), 11);
        assert_eq!(names(&allocation, 1), vec!["s1", "s2", "s3", "s4"]);
        assert_eq!(names(&allocation, 2), vec!["s6", "s7", "s8"]);
        assert_eq!(names(&allocation, 3), vec!["s9", "s10", "s5"]);
        AllocationValidator::validate(&problem, &allocation).expect("valid allocation");
    }

    #[test]
    fn test_nine_students_same_order() {
        let owned: Vec<String> = (1..=9).map(|i| format!("s{i}")).collect();
        let lines: Vec<(&str, &str)> = owned.iter().map(|n| (n.as_str(), "1 2 3")).collect();
        let problem = roster(&lines);
        let allocation = GreedyAllocator::new().allocate(&problem).expect("allocates");

        // three at rank 1, three at rank 2, three at rank 3
        assert_eq!(allocation.cost(), 18);
        assert_eq!(allocation.count_groups_of(3), 3);
        AllocationValidator::validate(&problem, &allocation).expect("valid allocation");
    }

    #[test]
    fn test_unbalanced_result_is_reported() {
        let problem = roster(&[
            ("s1", "1 2 3"),
            ("s2", "1 2 3"),
            ("s3", "1 2 3"),
            ("s4", "1 2 3"),
            ("s5", "1 2 3"),
            ("s6", "2 1 3"),
            ("s7", "2 1 3"),
            ("s8", "2 1 3"),
            ("s9", "2 1 3"),
            ("s10", "2 1 3"),
            ("s11", "3 1 2"),
        ]);
        let err = GreedyAllocator::new().allocate(&problem).unwrap_err();

        match err {
            AllocationError::Unsatisfiable(UnsatisfiableError::UnbalancedGroup(e)) => {
                assert_eq!(e.project(), ProjectIdentifier::new(2));
                assert_eq!(e.load(), 5);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_rejects_too_few_students() {
        let problem = roster(&[
            ("a", "1 2"),
            ("b", "1 2"),
            ("c", "2 1"),
            ("d", "2 1"),
            ("e", "2 1"),
        ]);
        let err = GreedyAllocator::new().allocate(&problem).unwrap_err();
        assert!(matches!(err, AllocationError::InvalidConfiguration(_)));
    }

    #[test]
    fn test_generated_rosters_without_groups_of_three_always_allocate() {
        for students in [8, 12, 16, 20, 40, 100] {
            for seed in 0..10 {
                let config = InstanceGenConfig::new(students).with_seed(seed);
                let problem = InstanceGenerator::new(config).generate().expect("generates");

                let allocation = GreedyAllocator::new()
                    .allocate(&problem)
                    .unwrap_or_else(|e| panic!("n={students} seed={seed}: {e}"));
                AllocationValidator::validate(&problem, &allocation).expect("valid allocation");
                assert!(allocation.cost() >= students as Cost);
                assert!(allocation.cost() <= (students * problem.project_count()) as Cost);
            }
        }
    }

    #[test]
    fn test_generated_rosters_never_yield_invalid_allocations() {
        for students in [6, 7, 9, 10, 11, 31, 62, 125] {
            for seed in 0..10 {
                let config = InstanceGenConfig::new(students).with_seed(seed);
                let problem = InstanceGenerator::new(config).generate().expect("generates");

                match GreedyAllocator::new().allocate(&problem) {
                    Ok(a) => AllocationValidator::validate(&problem, &a).expect("valid allocation"),
                    Err(AllocationError::Unsatisfiable(_)) => {}
                    Err(e) => panic!("n={students} seed={seed}: {e}"),
                }
            }
        }
    }

    #[test]
    fn test_greedy_is_deterministic() {
        let problem = InstanceGenerator::new(InstanceGenConfig::new(40).with_seed(7))
            .generate()
            .expect("generates");
        let a = GreedyAllocator::new().allocate(&problem).expect("allocates");
        let b = GreedyAllocator::new().allocate(&problem).expect("allocates");
        assert_eq!(a, b);
    }
}
