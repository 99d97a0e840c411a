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

/// A student together with their ranked project list. Index 0 is the
/// most preferred project.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Student {
    id: StudentIdentifier,
    preferences: Vec<ProjectIdentifier>,
}

impl Student {
    #[inline]
    pub fn new<I>(id: StudentIdentifier, preferences: I) -> Self
    where
        I: IntoIterator<Item = ProjectIdentifier>,
    {
        Self {
            id,
            preferences: preferences.into_iter().collect(),
        }
    }

    #[inline]
    pub fn id(&self) -> &StudentIdentifier {
        &self.id
    }

    #[inline]
    pub fn name(&self) -> &str {
        self.id.value()
    }

    #[inline]
    pub fn preferences(&self) -> &[ProjectIdentifier] {
        &self.preferences
    }

    #[inline]
    pub fn first_choice(&self) -> Option<ProjectIdentifier> {
        self.preferences.first().copied()
    }

    #[inline]
    pub fn preference_at(&self, rank: usize) -> Option<ProjectIdentifier> {
        self.preferences.get(rank).copied()
    }

    /// 0-based position of `project` in this student's list.
    #[inline]
    pub fn rank_of(&self, project: ProjectIdentifier) -> Option<usize> {
        self.preferences.iter().position(|&p| p == project)
    }

    #[inline]
    pub fn iter_preferences(&self) -> impl Iterator<Item = ProjectIdentifier> + '_ {
        self.preferences.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[inline]
    fn pid(n: usize) -> ProjectIdentifier {
        ProjectIdentifier::new(n)
    }

    #[test]
    fn test_rank_lookup_is_zero_based() {
        let s = Student::new("Ada".into(), [pid(3), pid(1), pid(2)]);
        assert_eq!(s.first_choice(), Some(pid(3)));
        assert_eq!(s.preference_at(1), Some(pid(1)));
        assert_eq!(s.preference_at(3), None);
        assert_eq!(s.rank_of(pid(2)), Some(2));
        assert_eq!(s.rank_of(pid(9)), None);
        assert_eq!(s.name(), "Ada");
    }
}
