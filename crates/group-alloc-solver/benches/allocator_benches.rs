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

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use group_alloc_model::{
    generator::{InstanceGenConfig, InstanceGenerator},
    prelude::Problem,
};
use group_alloc_solver::prelude::{Allocator, GreedyAllocator, RandomAllocator};
use std::hint::black_box;

/// Sizes without groups of three, so both allocators always succeed.
const SIZES: [usize; 4] = [32, 128, 512, 1024];

fn build_problem(students: usize) -> Problem {
    InstanceGenerator::new(InstanceGenConfig::new(students).with_seed(42))
        .generate()
        .expect("problem ok")
}

fn bench_greedy_allocator(c: &mut Criterion) {
    let mut group = c.benchmark_group("GreedyAllocator");
    for students in SIZES {
        let problem = build_problem(students);
        group.bench_with_input(BenchmarkId::from_parameter(students), &problem, |b, p| {
            b.iter(|| {
                let allocation = GreedyAllocator::new()
                    .allocate(black_box(p))
                    .expect("greedy allocation should succeed");
                black_box(allocation.cost())
            });
        });
    }
    group.finish();
}

fn bench_random_allocator(c: &mut Criterion) {
    let mut group = c.benchmark_group("RandomAllocator");
    for students in SIZES {
        let problem = build_problem(students);
        group.bench_with_input(BenchmarkId::from_parameter(students), &problem, |b, p| {
            let mut allocator = RandomAllocator::with_seed(7);
            b.iter(|| black_box(allocator.allocate(black_box(p)).map(|a| a.cost())));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_greedy_allocator, bench_random_allocator);
criterion_main!(benches);
