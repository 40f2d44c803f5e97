//! Delegation of sub-ranges to named tokenizers.
//!
//! The message tokenizer hands its body (or each multipart part) to whatever
//! handler the `Content-Type` resolved to. The delegate runs over a fresh,
//! self-contained view and returns offsets local to it;
//! [`TokenizeContext::delegate`] re-bases every offset into the caller's
//! coordinate space before splicing. The context also carries the two
//! fail-closed guards: recursion depth and the per-invocation byte budget.

use std::cell::Cell;

use crate::category::Category;
use crate::config::EngineConfig;
use crate::decoration::Decoration;
use crate::registry::LanguageLookup;

/// An immutable view over a sub-range: the text to tokenize plus the
/// absolute offset of its first byte in the caller's buffer.
#[derive(Debug, Clone, Copy)]
pub struct Job<'a> {
    pub source: &'a str,
    pub base_pos: usize,
}

/// Per-invocation state threaded through every handler call.
///
/// One context tree exists per top-level tokenization; the registry and
/// config are shared by reference, the byte budget is shared mutably down
/// the tree, and the depth counter grows by one per delegation.
#[derive(Clone, Copy)]
pub struct TokenizeContext<'a> {
    lookup: &'a dyn LanguageLookup,
    config: &'a EngineConfig,
    budget: &'a Cell<usize>,
    depth: usize,
}

impl<'a> TokenizeContext<'a> {
    pub(crate) fn root(
        lookup: &'a dyn LanguageLookup,
        config: &'a EngineConfig,
        budget: &'a Cell<usize>,
    ) -> Self {
        Self {
            lookup,
            config,
            budget,
            depth: 0,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Runs the handler registered under `language` over `job.source` and
    /// returns its stream re-based by `job.base_pos`.
    ///
    /// When the depth or byte guard trips, the delegate is not invoked and
    /// the sub-range comes back as a single plain decoration. Failures
    /// inside the delegate itself are not caught.
    pub fn delegate(&self, language: Option<&str>, job: Job<'_>) -> Vec<Decoration> {
        if job.source.is_empty() {
            return Vec::new();
        }
        if self.depth >= self.config.max_depth {
            tracing::warn!(
                depth = self.depth,
                "delegation depth limit reached, emitting remainder as plain"
            );
            return vec![Decoration::new(job.base_pos, Category::Plain)];
        }
        if !self.charge(job.source.len()) {
            tracing::warn!(
                len = job.source.len(),
                "byte budget exhausted, emitting remainder as plain"
            );
            return vec![Decoration::new(job.base_pos, Category::Plain)];
        }

        let handler = self.lookup.handler_for(language, job.source);
        let child = Self {
            depth: self.depth + 1,
            ..*self
        };
        handler
            .tokenize(&child, job.source)
            .into_iter()
            .map(|d| Decoration::new(d.pos + job.base_pos, d.category))
            .collect()
    }

    fn charge(&self, cost: usize) -> bool {
        let remaining = self.budget.get();
        if cost > remaining {
            return false;
        }
        self.budget.set(remaining - cost);
        true
    }
}
