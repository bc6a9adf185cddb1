//! Output buffer that doubles as the LZ77 history.
//!
//! None of the supported formats bound their window, so instead of a ring
//! buffer the whole output is kept and back-references index into it
//! directly. Distance 1 is the most recently written byte.

use crate::error::{Result, XpressError};

/// A growable output buffer used as the back-reference dictionary.
#[derive(Debug, Clone, Default)]
pub struct OutputWindow {
    /// Accumulated output.
    output: Vec<u8>,
    /// Optional ceiling on `output.len()`.
    limit: Option<usize>,
}

impl OutputWindow {
    /// Create an empty window with no output ceiling.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty window with a capacity hint and an optional ceiling.
    pub fn with_capacity(capacity: usize, limit: Option<usize>) -> Self {
        Self {
            output: Vec::with_capacity(capacity),
            limit,
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.output.len()
    }

    /// Check if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.output.is_empty()
    }

    fn reserve(&mut self, count: usize) -> Result<()> {
        if let Some(limit) = self.limit {
            if self.output.len().saturating_add(count) > limit {
                return Err(XpressError::output_limit(limit));
            }
        }
        self.output.reserve(count);
        Ok(())
    }

    /// Write a literal byte.
    #[inline]
    pub fn write_literal(&mut self, byte: u8) -> Result<()> {
        self.reserve(1)?;
        self.output.push(byte);
        Ok(())
    }

    /// Write a run of literal bytes.
    pub fn write_literals(&mut self, bytes: &[u8]) -> Result<()> {
        self.reserve(bytes.len())?;
        self.output.extend_from_slice(bytes);
        Ok(())
    }

    /// Check whether a back-reference of `distance` is satisfiable.
    pub fn can_reach(&self, distance: usize) -> bool {
        distance != 0 && distance <= self.output.len()
    }

    /// Read the byte `distance` positions behind the write position.
    pub fn read_at_distance(&self, distance: usize) -> Result<u8> {
        if !self.can_reach(distance) {
            return Err(XpressError::invalid_distance(distance, self.output.len()));
        }
        Ok(self.output[self.output.len() - distance])
    }

    /// Copy `length` bytes from `distance` behind the write position.
    ///
    /// Bytes are copied one at a time so a copy may read bytes it has just
    /// written; `distance < length` produces a repeating pattern.
    pub fn copy_match(&mut self, distance: usize, length: usize) -> Result<()> {
        if !self.can_reach(distance) {
            return Err(XpressError::invalid_distance(distance, self.output.len()));
        }
        self.reserve(length)?;

        let start = self.output.len() - distance;
        if distance >= length {
            self.output.extend_from_within(start..start + length);
        } else {
            for i in 0..length {
                let byte = self.output[start + i];
                self.output.push(byte);
            }
        }
        Ok(())
    }

    /// Get the output data.
    pub fn output(&self) -> &[u8] {
        &self.output
    }

    /// Consume and return the output data.
    pub fn into_output(self) -> Vec<u8> {
        self.output
    }
}
