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

pub mod config;

pub use config::InstanceGenConfig;

use crate::{
    common::{ProjectIdentifier, StudentIdentifier},
    problem::{builder::ProblemBuilder, err::ProblemError, prob::Problem, student::Student},
};
use rand::{
    SeedableRng,
    seq::{IndexedRandom, SliceRandom},
};
use rand_chacha::ChaCha8Rng;
use std::collections::HashSet;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Alan", "Barbara", "Claude", "Donald", "Edsger", "Frances", "Grace", "Hedy", "Ivan",
    "John", "Katherine", "Leslie", "Margaret", "Niklaus", "Ole", "Peter", "Radia", "Shafi",
    "Tim", "Ursula", "Vint", "Whitfield", "Yukihiro",
];

const LAST_NAMES: &[&str] = &[
    "Allen", "Backus", "Cerf", "Dijkstra", "Engelbart", "Floyd", "Goldwasser", "Hamilton",
    "Hopper", "Johnson", "Kay", "Knuth", "Lamport", "Liskov", "McCarthy", "Naur", "Perlman",
    "Ritchie", "Shannon", "Sutherland", "Thompson", "Turing", "Wirth", "Zuse",
];

/// Draw attempts before a numeric suffix is used to keep a name unique.
const NAME_ATTEMPTS: usize = 16;

/// Produces synthetic rosters: unique student names and uniformly random
/// preference permutations over `ceil(students / 4)` projects.
#[derive(Debug, Clone)]
pub struct InstanceGenerator {
    config: InstanceGenConfig,
    rng: ChaCha8Rng,
}

impl From<InstanceGenConfig> for InstanceGenerator {
    fn from(config: InstanceGenConfig) -> Self {
        Self::new(config)
    }
}

impl InstanceGenerator {
    #[inline]
    pub fn new(config: InstanceGenConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed());
        Self { config, rng }
    }

    #[inline]
    pub fn config(&self) -> &InstanceGenConfig {
        &self.config
    }

    pub fn generate(&mut self) -> Result<Problem, ProblemError> {
        let students = self.config.students();
        let projects = self.config.projects();

        let mut builder = ProblemBuilder::with_capacities(projects, students);
        builder.extend_projects((1..=projects).map(ProjectIdentifier::new));

        let mut taken = HashSet::with_capacity(students);
        for _ in 0..students {
            let name = self.fresh_name(&taken);
            taken.insert(name.clone());

            let mut prefs: Vec<ProjectIdentifier> =
                (1..=projects).map(ProjectIdentifier::new).collect();
            prefs.shuffle(&mut self.rng);
            builder.add_student(Student::new(StudentIdentifier::new(name), prefs));
        }

        builder.build()
    }

    fn draw_name(&mut self) -> String {
        let first = FIRST_NAMES.choose(&mut self.rng).copied().unwrap_or("Student");
        let last = LAST_NAMES.choose(&mut self.rng).copied().unwrap_or("Anonymous");
        format!("{first} {last}")
    }

    fn fresh_name(&mut self, taken: &HashSet<String>) -> String {
        for _ in 0..NAME_ATTEMPTS {
            let name = self.draw_name();
            if !taken.contains(&name) {
                return name;
            }
        }

        let base = self.draw_name();
        let mut suffix = 2;
        loop {
            let name = format!("{base} {suffix}");
            if !taken.contains(&name) {
                return name;
            }
            suffix += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::problem::{loader::ProblemLoader, writer::ProblemWriter};

    #[test]
    fn test_generates_requested_shape() {
        let p = InstanceGenerator::new(InstanceGenConfig::new(31).with_seed(7))
            .generate()
            .unwrap();
        assert_eq!(p.student_count(), 31);
        assert_eq!(p.project_count(), 8);
        assert!(p.capacity_plan().is_ok());
    }

    #[test]
    fn test_names_stay_unique_beyond_pool_size() {
        let n = FIRST_NAMES.len() * LAST_NAMES.len() + 50;
        let p = InstanceGenerator::new(InstanceGenConfig::new(n))
            .generate()
            .unwrap();
        // Problem construction rejects duplicate students, so success implies uniqueness.
        assert_eq!(p.student_count(), n);
    }

    #[test]
    fn test_same_seed_same_roster() {
        let cfg = InstanceGenConfig::new(40).with_seed(99);
        let a = InstanceGenerator::new(cfg).generate().unwrap();
        let b = InstanceGenerator::new(cfg).generate().unwrap();
        let w = ProblemWriter::new();
        assert_eq!(w.to_string(&a), w.to_string(&b));
    }

    #[test]
    fn test_generated_roster_reloads() {
        let p = InstanceGenerator::new(InstanceGenConfig::new(12).with_seed(3))
            .generate()
            .unwrap();
        let text = ProblemWriter::new().to_string(&p);
        let reloaded = ProblemLoader::new().from_str(&text).unwrap();
        assert_eq!(reloaded.student_count(), 12);
        assert_eq!(reloaded.project_count(), 3);
    }
}
