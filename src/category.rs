//! Style categories recognized by the highlighting host.
//!
//! The serialized names (`keyword`, `plain`, `string`, `type`, `punctuation`,
//! `literal`) must match the host's style-category strings exactly; `plain`
//! is the unstyled default applied to content the tokenizer does not
//! classify further.

use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A syntax category attached to a span of message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display, EnumIter, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Category {
    /// Unstyled text: whitespace, line terminators, unclassified content.
    Plain,
    /// Request methods, HTTP versions, multipart boundary markers.
    Keyword,
    /// Request targets, status reasons, header values.
    String,
    /// Header field names.
    Type,
    /// The colon separating a header name from its value.
    Punctuation,
    /// Numeric status codes.
    Literal,
}

impl Default for Category {
    fn default() -> Self {
        Category::Plain
    }
}
