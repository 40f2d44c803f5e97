//! Token stream produced by tokenization.
//!
//! A decoration marks "category C begins at offset O"; the span it styles
//! runs until the next decoration's offset, or the end of the buffer for the
//! last one. Offsets within a returned stream are local to the view that was
//! tokenized; every merge step re-bases nested results, so the stream a
//! caller receives from a top-level invocation is absolute in the original
//! buffer.

use std::ops::Range;

use regex::Captures;

use crate::category::Category;

/// One (offset, category) pair in a token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoration {
    pub pos: usize,
    pub category: Category,
}

impl Decoration {
    pub fn new(pos: usize, category: Category) -> Self {
        Self { pos, category }
    }
}

/// Expands a decoration stream over a buffer of `len` bytes into concrete
/// `(range, category)` spans. Zero-length entries are dropped.
pub fn spans(decorations: &[Decoration], len: usize) -> Vec<(Range<usize>, Category)> {
    let mut out = Vec::with_capacity(decorations.len());
    for (i, decoration) in decorations.iter().enumerate() {
        let end = decorations.get(i + 1).map_or(len, |next| next.pos);
        if end > decoration.pos {
            out.push((decoration.pos..end, decoration.category));
        }
    }
    out
}

/// Builds a decoration stream while tracking the cursor through the buffer.
///
/// Every emitted span starts at the current cursor and advances it by the
/// span's byte length, so the stream stays contiguous by construction.
/// Empty spans are skipped without emitting anything.
#[derive(Debug, Default)]
pub(crate) struct Emitter {
    cursor: usize,
    decorations: Vec<Decoration>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn emit(&mut self, len: usize, category: Category) {
        if len > 0 {
            self.decorations.push(Decoration::new(self.cursor, category));
            self.cursor += len;
        }
    }

    /// Emits the capture group's text at the cursor. Groups that did not
    /// participate in the match, or matched the empty string, emit nothing.
    pub fn emit_capture(&mut self, caps: &Captures<'_>, group: usize, category: Category) {
        if let Some(m) = caps.get(group) {
            self.emit(m.as_str().len(), category);
        }
    }

    /// Appends an already re-based delegate stream and advances the cursor
    /// over the `len` bytes the delegate covered.
    pub fn splice(&mut self, rebased: Vec<Decoration>, len: usize) {
        self.decorations.extend(rebased);
        self.cursor += len;
    }

    /// Emits one decoration at the cursor covering everything through `end`.
    pub fn mark_remainder(&mut self, category: Category, end: usize) {
        self.decorations.push(Decoration::new(self.cursor, category));
        self.cursor = end;
    }

    pub fn into_decorations(self) -> Vec<Decoration> {
        self.decorations
    }
}
