//! Language handler registration and lookup.
//!
//! Handlers are registered by name and dispatched dynamically: the tokenizer
//! core depends only on the [`LanguageLookup`] capability, never on concrete
//! handler types. An unknown or absent name resolves to the [`PlainText`]
//! fallback, so a lookup never fails.

use std::cell::Cell;
use std::sync::Arc;

use dashmap::DashMap;
use thiserror::Error;

use crate::category::Category;
use crate::config::EngineConfig;
use crate::decoration::Decoration;
use crate::delegate::TokenizeContext;

/// A tokenizer invocable over a self-contained view of text.
///
/// Implementations emit offsets local to `source`; the caller re-bases them
/// when splicing the stream into a larger buffer.
pub trait LanguageTokenizer: Send + Sync {
    fn tokenize(&self, ctx: &TokenizeContext<'_>, source: &str) -> Vec<Decoration>;
}

/// Handler lookup by language name.
pub trait LanguageLookup: Send + Sync {
    /// Returns the handler registered under `language`, or a fallback when
    /// the name is unknown or absent. `sample` is a content hint for
    /// extension-less lookups; the bundled registry only logs it.
    fn handler_for(&self, language: Option<&str>, sample: &str) -> Arc<dyn LanguageTokenizer>;
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    #[error("language handler already registered: {name}")]
    AlreadyRegistered { name: String },
}

/// Fallback handler for unrecognized content: the whole span comes back as
/// one unstyled decoration.
pub struct PlainText;

impl LanguageTokenizer for PlainText {
    fn tokenize(&self, _ctx: &TokenizeContext<'_>, source: &str) -> Vec<Decoration> {
        if source.is_empty() {
            Vec::new()
        } else {
            vec![Decoration::new(0, Category::Plain)]
        }
    }
}

/// Name-to-handler map shared by all invocations.
///
/// The map is read-mostly: handlers are registered during setup and the
/// registry is then safe for concurrent lookups from any number of threads.
/// Per-invocation state (cursor, budget) lives in the [`TokenizeContext`],
/// never here.
pub struct LanguageRegistry {
    handlers: Arc<DashMap<String, Arc<dyn LanguageTokenizer>>>,
    fallback: Arc<dyn LanguageTokenizer>,
    config: EngineConfig,
}

impl Clone for LanguageRegistry {
    fn clone(&self) -> Self {
        Self {
            handlers: self.handlers.clone(),
            fallback: self.fallback.clone(),
            config: self.config.clone(),
        }
    }
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            handlers: Arc::new(DashMap::new()),
            fallback: Arc::new(PlainText),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Registers one handler under every name in `names`.
    pub fn register(
        &self,
        names: &[&str],
        handler: Arc<dyn LanguageTokenizer>,
    ) -> Result<(), RegistryError> {
        for name in names {
            if self.handlers.contains_key(*name) {
                return Err(RegistryError::AlreadyRegistered {
                    name: (*name).to_string(),
                });
            }
        }
        for name in names {
            self.handlers.insert((*name).to_string(), handler.clone());
        }
        Ok(())
    }

    /// Runs the handler registered under `language` over `source` and
    /// returns its token stream, with offsets absolute in `source`.
    #[tracing::instrument(level = "debug", skip(self, source), fields(len = source.len()))]
    pub fn tokenize(&self, language: &str, source: &str) -> Vec<Decoration> {
        let budget = Cell::new(self.config.byte_budget);
        let ctx = TokenizeContext::root(self, &self.config, &budget);
        self.handler_for(Some(language), source).tokenize(&ctx, source)
    }
}

impl LanguageLookup for LanguageRegistry {
    fn handler_for(&self, language: Option<&str>, sample: &str) -> Arc<dyn LanguageTokenizer> {
        if let Some(name) = language {
            if let Some(handler) = self.handlers.get(name) {
                return handler.value().clone();
            }
            tracing::debug!(
                language = name,
                sample_len = sample.len(),
                "no handler registered, using fallback"
            );
        }
        self.fallback.clone()
    }
}
