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
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_MAX_ROUNDS: usize = 10_000;

/// Source of preference ranks for the random allocator.
pub trait RankSampler {
    /// Returns a rank in `0..len`.
    fn sample_rank(&mut self, len: usize) -> usize;
}

impl<S: RankSampler + ?Sized> RankSampler for &mut S {
    #[inline]
    fn sample_rank(&mut self, len: usize) -> usize {
        (**self).sample_rank(len)
    }
}

#[derive(Debug, Clone)]
pub struct UniformRankSampler<R: Rng> {
    rng: R,
}

impl<R: Rng> UniformRankSampler<R> {
    #[inline]
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    #[inline]
    pub fn into_inner(self) -> R {
        self.rng
    }
}

impl UniformRankSampler<ChaCha8Rng> {
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> RankSampler for UniformRankSampler<R> {
    #[inline]
    fn sample_rank(&mut self, len: usize) -> usize {
        self.rng.random_range(0..len)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RandomAllocatorConfig {
    max_rounds: usize,
}

impl Default for RandomAllocatorConfig {
    fn default() -> Self {
        Self {
            max_rounds: DEFAULT_MAX_ROUNDS,
        }
    }
}

impl RandomAllocatorConfig {
    #[inline]
    pub fn new(max_rounds: usize) -> Self {
        Self { max_rounds }
    }

    #[inline]
    pub fn with_max_rounds(mut self, max_rounds: usize) -> Self {
        self.max_rounds = max_rounds;
        self
    }

    /// Upper bound on repair rounds spent on a single project.
    #[inline]
    pub fn max_rounds(&self) -> usize {
        self.max_rounds
    }
}

/// Proposes a freshly drawn preference rank for every displaced student.
#[derive(Debug)]
struct RandomDraw<'s, S: RankSampler> {
    sampler: &'s mut S,
    max_rounds: usize,
}

impl<S: RankSampler> TargetSelector for RandomDraw<'_, S> {
    #[inline]
    fn name(&self) -> &str {
        "RandomDraw"
    }

    #[inline]
    fn candidate(
        &mut self,
        model: &AllocationModel<'_>,
        student: StudentIndex,
        _round: usize,
    ) -> Option<Candidate> {
        let rank = self.sampler.sample_rank(model.projects_len());
        model
            .preference(student, rank)
            .map(|project| Candidate::new(project, rank))
    }

    #[inline]
    fn cost_delta(
        &self,
        model: &AllocationModel<'_>,
        student: StudentIndex,
        from: ProjectIndex,
        to: Candidate,
    ) -> Cost {
        (to.rank() + 1) as Cost - (model.rank_of(student, from) + 1) as Cost
    }

    #[inline]
    fn exhausted(&self, _model: &AllocationModel<'_>, round: usize) -> bool {
        round > self.max_rounds
    }
}

/// Baseline allocator: every student starts in a uniformly drawn
/// preference and displaced students are moved to freshly drawn ones.
#[derive(Debug, Clone)]
pub struct RandomAllocator<S: RankSampler = UniformRankSampler<ChaCha8Rng>> {
    sampler: S,
    config: RandomAllocatorConfig,
}

impl RandomAllocator {
    #[inline]
    pub fn with_seed(seed: u64) -> Self {
        Self::new(UniformRankSampler::with_seed(seed))
    }
}

impl<S: RankSampler> RandomAllocator<S> {
    #[inline]
    pub fn new(sampler: S) -> Self {
        Self {
            sampler,
            config: RandomAllocatorConfig::default(),
        }
    }

    #[inline]
    pub fn with_config(mut self, config: RandomAllocatorConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &RandomAllocatorConfig {
        &self.config
    }

    #[inline]
    pub fn sampler(&self) -> &S {
        &self.sampler
    }

    #[inline]
    pub fn into_sampler(self) -> S {
        self.sampler
    }
}

impl<S: RankSampler> Allocator for RandomAllocator<S> {
    #[inline]
    fn name(&self) -> &str {
        "RandomAllocator"
    }

    #[tracing::instrument(
        level = "debug",
        name = "Random Allocation",
        skip_all,
        fields(students = problem.student_count(), projects = problem.project_count())
    )]
    fn allocate(&mut self, problem: &Problem) -> Result<Allocation, AllocationError> {
        let model = AllocationModel::try_from(problem)?;
        let mut board = ProjectBoard::new(model.projects_len());
        let mut cost: Cost = 0;
        for s in model.student_indices() {
            let rank = self.sampler.sample_rank(model.projects_len());
            let project = model
                .preference(s, rank)
                .unwrap_or_else(|| model.first_choice(s));
            board.place(s, project);
            cost += (model.rank_of(s, project) + 1) as Cost;
        }

        let mut selector = RandomDraw {
            sampler: &mut self.sampler,
            max_rounds: self.config.max_rounds(),
        };
        Rebalancer::new(&model).run(&mut board, &mut selector, &mut cost)?;

        tracing::debug!(cost, "Random allocation complete");
        Ok(board.into_allocation(&model, cost))
    }
}
