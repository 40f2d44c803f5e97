//! The HTTP request / response tokenizer.

use std::sync::Arc;

use regex::Captures;

use crate::category::Category;
use crate::decoration::{Decoration, Emitter};
use crate::delegate::{Job, TokenizeContext};
use crate::mime::MimeResolver;
use crate::registry::{LanguageRegistry, LanguageTokenizer, RegistryError};
use crate::tokenizer::multipart;
use crate::tokenizer::patterns::MessagePatterns;

/// How the body will be handled once the header block is done.
enum BodyDispatch {
    /// Hand the whole remainder to the named sub-tokenizer (or the
    /// unrecognized-content fallback when `None`).
    Delegate(Option<String>),
    /// Split on the declared boundary and tokenize each part as a nested
    /// message.
    Multipart { boundary: String },
}

/// Tokenizer for HTTP requests and responses.
///
/// Classifies the start line, header block and separator itself, then
/// delegates the body to whatever sub-tokenizer the `Content-Type` header
/// resolves to. `multipart/*` bodies are split on their boundary parameter
/// and each part is recursively tokenized as a message in its own right.
///
/// Malformed input never fails; unrecognized spans degrade to plain.
pub struct MessageTokenizer {
    patterns: MessagePatterns,
    resolver: MimeResolver,
}

impl MessageTokenizer {
    /// Names this tokenizer is conventionally registered under. Multipart
    /// recursion looks the tokenizer up again through the registry by the
    /// first of these.
    pub const NAMES: [&'static str; 2] = ["http", "msg"];

    pub fn new(resolver: MimeResolver) -> Self {
        Self {
            patterns: MessagePatterns::new(),
            resolver,
        }
    }

    /// Registers a message tokenizer under [`Self::NAMES`].
    pub fn install(registry: &LanguageRegistry, resolver: MimeResolver) -> Result<(), RegistryError> {
        registry.register(&Self::NAMES, Arc::new(Self::new(resolver)))
    }

    /// Start line: request line first, status line second. Returns whether
    /// either matched; on double failure the cursor stays at offset 0 (a
    /// bare header block is still a valid message).
    fn start_line(&self, em: &mut Emitter, source: &str) -> bool {
        if let Some(req) = self.patterns.request_line.captures(source) {
            em.emit_capture(&req, 2, Category::Keyword);
            em.emit_capture(&req, 3, Category::Plain);
            em.emit_capture(&req, 4, Category::String);
            em.emit_capture(&req, 6, Category::Plain);
            em.emit_capture(&req, 7, Category::Keyword);
            em.emit_capture(&req, 8, Category::Plain);
            true
        } else if let Some(sts) = self.patterns.status_line.captures(source) {
            em.emit_capture(&sts, 2, Category::Keyword);
            em.emit_capture(&sts, 3, Category::Plain);
            em.emit_capture(&sts, 4, Category::Literal);
            em.emit_capture(&sts, 5, Category::Plain);
            em.emit_capture(&sts, 6, Category::String);
            em.emit_capture(&sts, 7, Category::Plain);
            true
        } else {
            false
        }
    }

    /// Header block: anchored header-line matches until the first miss. The
    /// miss is what delimits the block; even a single extra leading blank
    /// character ends it and falls through to the separator.
    fn header_block(&self, em: &mut Emitter, source: &str, start_matched: bool) -> BodyDispatch {
        let mut dispatch = BodyDispatch::Delegate(None);
        let mut content_type_seen = false;
        let mut matched_any = false;
        let mut recovered = false;

        loop {
            if let Some(caps) = self.patterns.header_line.match_at(source, em.cursor()) {
                matched_any = true;
                self.header_line(em, &caps, &mut dispatch, &mut content_type_seen);
                continue;
            }
            // A message whose first line is neither a start line, a header,
            // nor a separator still gets its remaining headers classified:
            // consume that one line as plain and try again. Fires at most
            // once, only at the top of the message.
            if !start_matched
                && !matched_any
                && !recovered
                && !source.is_empty()
                && self.patterns.blank_line.match_at(source, 0).is_none()
            {
                recovered = true;
                let line_end = source.find('\n').map_or(source.len(), |i| i + 1);
                em.emit(line_end, Category::Plain);
                continue;
            }
            break;
        }
        dispatch
    }

    fn header_line(
        &self,
        em: &mut Emitter,
        caps: &Captures<'_>,
        dispatch: &mut BodyDispatch,
        content_type_seen: &mut bool,
    ) {
        em.emit_capture(caps, 2, Category::Type);
        em.emit_capture(caps, 3, Category::Punctuation);
        em.emit_capture(caps, 4, Category::Plain);
        em.emit_capture(caps, 5, Category::Plain);

        let mut value_emitted = false;
        if !*content_type_seen && caps.get(2).map(|m| m.as_str()) == Some("Content-Type") {
            // Only the first Content-Type counts; later ones are emitted as
            // ordinary headers.
            *content_type_seen = true;
            let value = caps.get(6).map_or("", |m| m.as_str());
            let simple_type = value
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase();
            if !simple_type.is_empty() {
                if simple_type.starts_with("multipart/") {
                    if let Some(b) = self.patterns.boundary_param.captures(value) {
                        let boundary = b
                            .get(2)
                            .or_else(|| b.get(5))
                            .map_or_else(String::new, |m| m.as_str().to_string());
                        tracing::debug!(%boundary, "multipart body declared");
                        // The value is emitted piecewise so the boundary
                        // token stands out from the text around it.
                        em.emit_capture(&b, 1, Category::String);
                        em.emit_capture(&b, 2, Category::Keyword);
                        em.emit_capture(&b, 3, Category::String);
                        em.emit_capture(&b, 4, Category::String);
                        em.emit_capture(&b, 5, Category::Keyword);
                        em.emit_capture(&b, 6, Category::String);
                        *dispatch = BodyDispatch::Multipart { boundary };
                        value_emitted = true;
                    } else {
                        // multipart without an extractable boundary degrades
                        // to plain Content-Type driven delegation.
                        *dispatch = BodyDispatch::Delegate(self.resolver.resolve(&simple_type));
                    }
                } else {
                    *dispatch = BodyDispatch::Delegate(self.resolver.resolve(&simple_type));
                }
            }
        }
        if !value_emitted {
            em.emit_capture(caps, 6, Category::String);
        }
        em.emit_capture(caps, 8, Category::Plain);
    }

    /// The blank line between headers and body. Anchored: absence (message
    /// ends right after the headers, or body starts immediately) is
    /// tolerated without consuming anything.
    fn separator(&self, em: &mut Emitter, source: &str) {
        if let Some(caps) = self.patterns.blank_line.match_at(source, em.cursor()) {
            em.emit_capture(&caps, 0, Category::Plain);
        }
    }

    fn body(&self, ctx: &TokenizeContext<'_>, em: &mut Emitter, source: &str, dispatch: BodyDispatch) {
        if em.cursor() + 1 >= source.len() {
            return;
        }
        match dispatch {
            BodyDispatch::Multipart { boundary } => {
                multipart::tokenize_parts(ctx, em, source, &boundary);
            }
            BodyDispatch::Delegate(language) => {
                let rest = &source[em.cursor()..];
                let stream = ctx.delegate(
                    language.as_deref(),
                    Job {
                        source: rest,
                        base_pos: em.cursor(),
                    },
                );
                em.splice(stream, rest.len());
            }
        }
    }
}

impl LanguageTokenizer for MessageTokenizer {
    #[tracing::instrument(
        level = "debug",
        skip(self, ctx, source),
        fields(len = source.len(), depth = ctx.depth())
    )]
    fn tokenize(&self, ctx: &TokenizeContext<'_>, source: &str) -> Vec<Decoration> {
        let mut em = Emitter::new();
        let start_matched = self.start_line(&mut em, source);
        let dispatch = self.header_block(&mut em, source, start_matched);
        self.separator(&mut em, source);
        self.body(ctx, &mut em, source, dispatch);
        em.into_decorations()
    }
}
