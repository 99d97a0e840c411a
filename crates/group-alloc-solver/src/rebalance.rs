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

//! The shared repair engine used by every allocator.
//!
//! Rebalancing runs in two passes over the projects ordered by descending
//! load. Pass A caps the leading projects at four members, pass B caps the
//! trailing projects at three. Which project a displaced student moves to,
//! and what that costs, is decided by a [`TargetSelector`].

use crate::{
    err::{ExhaustedPreferencesError, UnbalancedGroupError, UnsatisfiableError},
    index::{ProjectIndex, StudentIndex},
    model::AllocationModel,
    board::ProjectBoard,
};
use group_alloc_model::{
    prelude::{CapacityPlan, Cost, ProjectIdentifier},
    problem::capacity::{MAX_GROUP_SIZE, MIN_GROUP_SIZE},
};

/// A slice `[start, end)` of the load-ordered project list and the
/// capacity enforced on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RepairPass {
    start: usize,
    end: usize,
    capacity: usize,
}

impl RepairPass {
    #[inline]
    pub fn new(start: usize, end: usize, capacity: usize) -> Self {
        debug_assert!(start <= end);
        Self {
            start,
            end,
            capacity,
        }
    }

    /// Pass A: every position before the last `groups_of_three + 1`, capped at four.
    #[inline]
    pub fn cap_four(plan: &CapacityPlan) -> Self {
        let end = (plan.projects() - plan.groups_of_three()).saturating_sub(1);
        Self::new(0, end, MAX_GROUP_SIZE)
    }

    /// Pass B: the last `groups_of_three` positions, capped at three.
    #[inline]
    pub fn cap_three(plan: &CapacityPlan) -> Self {
        Self::new(
            plan.projects() - plan.groups_of_three(),
            plan.projects(),
            MIN_GROUP_SIZE,
        )
    }

    #[inline]
    pub fn start(&self) -> usize {
        self.start
    }

    #[inline]
    pub fn end(&self) -> usize {
        self.end
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }
}

/// A proposed destination for a displaced student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Candidate {
    project: ProjectIndex,
    rank: usize,
}

impl Candidate {
    #[inline]
    pub fn new(project: ProjectIndex, rank: usize) -> Self {
        Self { project, rank }
    }

    #[inline]
    pub fn project(&self) -> ProjectIndex {
        self.project
    }

    /// 0-based position of `project` in the student's preference list.
    #[inline]
    pub fn rank(&self) -> usize {
        self.rank
    }
}

/// Decides where a displaced student should go and how the objective changes.
pub trait TargetSelector {
    #[inline]
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Destination proposed for `student` during `round` (1-based, per project).
    fn candidate(
        &mut self,
        model: &AllocationModel<'_>,
        student: StudentIndex,
        round: usize,
    ) -> Option<Candidate>;

    /// Objective change of moving `student` from `from` to `to`.
    fn cost_delta(
        &self,
        model: &AllocationModel<'_>,
        student: StudentIndex,
        from: ProjectIndex,
        to: Candidate,
    ) -> Cost;

    /// No further rounds may be started once this holds.
    fn exhausted(&self, model: &AllocationModel<'_>, round: usize) -> bool;
}

#[derive(Debug, Clone, Copy)]
pub struct Rebalancer<'m, 'p> {
    model: &'m AllocationModel<'p>,
}

impl<'m, 'p> Rebalancer<'m, 'p> {
    #[inline]
    pub fn new(model: &'m AllocationModel<'p>) -> Self {
        Self { model }
    }

    #[inline]
    pub fn model(&self) -> &'m AllocationModel<'p> {
        self.model
    }

    /// Runs pass A, then pass B if the number of three-member groups is
    /// still off plan, then checks that every group has three or four members.
    #[tracing::instrument(level = "debug", name = "Rebalance", skip_all, fields(selector = selector.name()))]
    pub fn run<S: TargetSelector + ?Sized>(
        &self,
        board: &mut ProjectBoard,
        selector: &mut S,
        cost: &mut Cost,
    ) -> Result<(), UnsatisfiableError> {
        let plan = self.model.plan();

        let order = board.order_by_load();
        self.repair(RepairPass::cap_four(plan), &order, board, selector, cost)?;

        let order = board.order_by_load();
        let threes = board.count_with_load(MIN_GROUP_SIZE);
        if threes != plan.groups_of_three() {
            self.repair(RepairPass::cap_three(plan), &order, board, selector, cost)?;
        } else {
            tracing::debug!(threes, "Groups of three already on plan, skipping pass B");
        }

        self.check_balanced(board)
    }

    /// Drains every project in `order[pass.start..pass.end]` down to
    /// `pass.capacity`.
    ///
    /// Each round scans a snapshot of the project's members and moves a
    /// student when its candidate has room; the scan stops as soon as the
    /// project is within capacity. The round counter is shared by all
    /// students of one project and restarts at 1 for the next project.
    pub fn repair<S: TargetSelector + ?Sized>(
        &self,
        pass: RepairPass,
        order: &[ProjectIndex],
        board: &mut ProjectBoard,
        selector: &mut S,
        cost: &mut Cost,
    ) -> Result<(), UnsatisfiableError> {
        if pass.is_empty() {
            return Ok(());
        }

        for &project in &order[pass.start..pass.end.min(order.len())] {
            let mut round = 1;
            while board.load(project) > pass.capacity {
                if selector.exhausted(self.model, round) {
                    return Err(ExhaustedPreferencesError::new(
                        self.project_id(project),
                        board.load(project),
                        pass.capacity,
                        round - 1,
                    )
                    .into());
                }

                let snapshot = board.members(project).to_vec();
                for student in snapshot {
                    if board.load(project) <= pass.capacity {
                        break;
                    }
                    let Some(target) = selector.candidate(self.model, student, round) else {
                        continue;
                    };
                    if target.project == project || board.load(target.project) >= pass.capacity {
                        continue;
                    }

                    *cost += selector.cost_delta(self.model, student, project, target);
                    board.relocate(student, project, target.project);
                    tracing::trace!(
                        %student,
                        from = %project,
                        to = %target.project,
                        round,
                        "Relocated student"
                    );
                }
                round += 1;
            }
            tracing::debug!(%project, rounds = round - 1, capacity = pass.capacity, "Project within capacity");
        }

        Ok(())
    }

    pub fn check_balanced(&self, board: &ProjectBoard) -> Result<(), UnsatisfiableError> {
        match board
            .loads()
            .find(|&(_, load)| !CapacityPlan::is_valid_group_size(load))
        {
            Some((project, load)) => {
                Err(UnbalancedGroupError::new(self.project_id(project), load).into())
            }
            None => Ok(()),
        }
    }

    #[inline]
    fn project_id(&self, project: ProjectIndex) -> ProjectIdentifier {
        self.model
            .mappings()
            .project_id(project)
            .unwrap_or_else(|| ProjectIdentifier::new(project.get()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::greedy::NextPreference;
    use group_alloc_model::prelude::{Problem, ProblemLoader};

    fn load(s: &str) -> Problem {
        ProblemLoader::new().from_str(s).expect("roster parses")
    }

    fn eight_students() -> Problem {
        load("'a' 1 2\n'b' 1 2\n'c' 1 2\n'd' 1 2\n'e' 2 1\n'f' 2 1\n'g' 2 1\n'h' 2 1")
    }

    #[test]
    fn test_passes_follow_capacity_plan() {
        // 10 students, 3 projects: two groups of three.
        let plan = CapacityPlan::new(10, 3).expect("valid plan");
        assert_eq!(RepairPass::cap_four(&plan), RepairPass::new(0, 0, 4));
        assert_eq!(RepairPass::cap_three(&plan), RepairPass::new(1, 3, 3));

        // 12 students, 3 projects: no groups of three.
        let plan = CapacityPlan::new(12, 3).expect("valid plan");
        assert_eq!(RepairPass::cap_four(&plan), RepairPass::new(0, 2, 4));
        assert!(RepairPass::cap_three(&plan).is_empty());

        // 6 students, 2 projects: pass A is empty, pass B covers everything.
        let plan = CapacityPlan::new(6, 2).expect("valid plan");
        assert!(RepairPass::cap_four(&plan).is_empty());
        assert_eq!(RepairPass::cap_three(&plan), RepairPass::new(0, 2, 3));
    }

    #[test]
    fn test_repair_reports_exhaustion_when_no_target_has_room() {
        let problem = eight_students();
        let model = AllocationModel::try_from(&problem).expect("model builds");
        let mut board = ProjectBoard::new(2);
        for s in model.student_indices() {
            board.place(s, model.first_choice(s));
        }
        let order = board.order_by_load();

        let mut cost = 8;
        let err = Rebalancer::new(&model)
            .repair(
                RepairPass::new(0, 1, 3),
                &order,
                &mut board,
                &mut NextPreference,
                &mut cost,
            )
            .unwrap_err();

        match err {
            UnsatisfiableError::ExhaustedPreferences(e) => {
                assert_eq!(e.project(), ProjectIdentifier::new(1));
                assert_eq!(e.load(), 4);
                assert_eq!(e.capacity(), 3);
                assert_eq!(e.rounds(), 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(cost, 8);
    }

    #[test]
    fn test_check_balanced_flags_first_bad_group() {
        let problem = eight_students();
        let model = AllocationModel::try_from(&problem).expect("model builds");
        let mut board = ProjectBoard::new(2);
        for s in model.student_indices() {
            board.place(s, ProjectIndex::new(1));
        }

        let err = Rebalancer::new(&model).check_balanced(&board).unwrap_err();
        assert_eq!(
            err,
            UnbalancedGroupError::new(ProjectIdentifier::new(1), 0).into()
        );
    }

    #[test]
    fn test_run_leaves_balanced_board_untouched() {
        let problem = eight_students();
        let model = AllocationModel::try_from(&problem).expect("model builds");
        let mut board = ProjectBoard::new(2);
        for s in model.student_indices() {
            board.place(s, model.first_choice(s));
        }
        let before = board.clone();

        let mut cost = 8;
        Rebalancer::new(&model)
            .run(&mut board, &mut NextPreference, &mut cost)
            .expect("already balanced");
        assert_eq!(board, before);
        assert_eq!(cost, 8);
    }
}
