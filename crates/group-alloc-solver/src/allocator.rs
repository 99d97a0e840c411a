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

use crate::err::AllocationError;
use group_alloc_model::prelude::{Allocation, Problem};

/// Produces a grouping of every student of a [`Problem`] into groups of
/// three or four, one group per project.
pub trait Allocator {
    #[inline]
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// Either returns a complete valid allocation or an error; a partial
    /// allocation is never returned.
    fn allocate(&mut self, problem: &Problem) -> Result<Allocation, AllocationError>;
}

impl<A: Allocator + ?Sized> Allocator for Box<A> {
    #[inline]
    fn name(&self) -> &str {
        (**self).name()
    }

    #[inline]
    fn allocate(&mut self, problem: &Problem) -> Result<Allocation, AllocationError> {
        (**self).allocate(problem)
    }
}
