//! Chunk container: instruction stream, line table and constant pool.

use core::ops::Range;

use crate::{CoreError, CoreResult, DynArray, Value};

/// Compiled unit storage.
///
/// `code` and `lines` always have the same length: every appended byte
/// records exactly one source line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Chunk {
    code: DynArray<u8>,
    lines: DynArray<u32>,
    constants: DynArray<Value>,
}

impl Chunk {
    /// Create an empty chunk (no storage allocated yet).
    #[must_use]
    pub const fn new() -> Self {
        Self { code: DynArray::new(), lines: DynArray::new(), constants: DynArray::new() }
    }

    /// Append an instruction byte together with the line that produced it.
    pub fn append(&mut self, byte: u8, line: u32) {
        self.code.append(byte);
        self.lines.append(line);
    }

    /// Register a constant and return its index in the pool.
    ///
    /// No deduplication: equal values get distinct slots.
    pub fn add_constant(&mut self, value: impl Into<Value>) -> usize {
        self.constants.append(value.into());
        self.constants.len() - 1
    }

    /// Release the three underlying arrays; the chunk is empty afterwards.
    pub fn release(&mut self) {
        self.code.release();
        self.lines.release();
        self.constants.release();
    }

    /// Instruction bytes.
    #[must_use]
    pub fn code(&self) -> &[u8] { self.code.as_slice() }

    /// Source line of every instruction byte (index-aligned with `code`).
    #[must_use]
    pub fn lines(&self) -> &[u32] { self.lines.as_slice() }

    /// Constant pool.
    #[must_use]
    pub fn constants(&self) -> &[Value] { self.constants.as_slice() }

    /// Number of instruction bytes.
    #[must_use]
    pub fn len(&self) -> usize { self.code.len() }

    /// Whether no instruction has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool { self.code.is_empty() }

    /// Source line for the byte at `offset`.
    #[must_use]
    pub fn line_at(&self, offset: usize) -> Option<u32> { self.lines.get(offset).copied() }

    /// Constant stored at `index`.
    #[must_use]
    pub fn constant(&self, index: usize) -> Option<Value> { self.constants.get(index).copied() }

    /// Iterate over contiguous ranges of bytes emitted for the same line.
    #[must_use]
    pub fn line_runs(&self) -> LineRuns<'_> { LineRuns { lines: self.lines.as_slice(), index: 0 } }

    /// Structural check used by tooling before reading a chunk.
    ///
    /// # Errors
    /// `CoreError::LineTableMismatch` when code and line table diverge.
    pub fn validate(&self) -> CoreResult<()> {
        if self.code.len() != self.lines.len() {
            return Err(CoreError::LineTableMismatch { code: self.code.len(), lines: self.lines.len() });
        }
        Ok(())
    }
}

/// Iterator yielding contiguous line ranges `(start..end, line)`.
#[derive(Debug, Clone)]
pub struct LineRuns<'a> {
    lines: &'a [u32],
    index: usize,
}

impl Iterator for LineRuns<'_> {
    type Item = (Range<usize>, u32);

    fn next(&mut self) -> Option<Self::Item> {
        let start = self.index;
        let line = *self.lines.get(start)?;
        self.index += 1;
        while self.lines.get(self.index) == Some(&line) {
            self.index += 1;
        }
        Some((start..self.index, line))
    }
}
