//! irodori classifies spans of raw HTTP request / response text into syntax
//! categories for highlighting. The start line, header block and separator
//! are tokenized directly; the body is delegated to a sub-tokenizer chosen
//! from the `Content-Type` header, and `multipart/*` bodies are split on
//! their declared boundary with each part tokenized recursively.
//!
//! ```
//! use irodori::{LanguageRegistry, MessageTokenizer, MimeResolver};
//!
//! let registry = LanguageRegistry::new();
//! MessageTokenizer::install(&registry, MimeResolver::known_types()).unwrap();
//!
//! let decorations = registry.tokenize("http", "GET /x HTTP/1.1\r\n\r\n");
//! assert!(!decorations.is_empty());
//! ```

pub mod category;
pub mod config;
pub mod decoration;
pub mod delegate;
pub mod error;
pub mod matcher;
pub mod mime;
pub mod registry;
pub mod tokenizer;

// Re-exports
pub use category::Category;
pub use config::EngineConfig;
pub use decoration::{spans, Decoration};
pub use delegate::{Job, TokenizeContext};
pub use error::{Error, Result};
pub use matcher::AnchoredPattern;
pub use mime::MimeResolver;
pub use registry::{LanguageLookup, LanguageRegistry, LanguageTokenizer, PlainText};
pub use tokenizer::message::MessageTokenizer;
