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

use crate::problem::prob::Problem;
use std::{
    fs::File,
    io::{self, BufWriter, Write},
    path::Path,
};

/// Writes a [`Problem`] in the roster format read by
/// [`ProblemLoader`](crate::problem::loader::ProblemLoader). There is no
/// newline after the last record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProblemWriter;

impl ProblemWriter {
    #[inline]
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, problem: &Problem, mut w: W) -> io::Result<()> {
        for (i, s) in problem.iter_students().enumerate() {
            if i > 0 {
                writeln!(w)?;
            }
            write!(w, "'{}'", s.name())?;
            for p in s.iter_preferences() {
                write!(w, " {}", p.value())?;
            }
        }
        w.flush()
    }

    pub fn to_path(&self, problem: &Problem, path: impl AsRef<Path>) -> io::Result<()> {
        let file = File::create(path)?;
        self.write(problem, BufWriter::new(file))
    }

    pub fn to_string(&self, problem: &Problem) -> String {
        let mut buf = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.write(problem, &mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}
