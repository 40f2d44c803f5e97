//! Boundary splitting for `multipart/*` bodies.
//!
//! The body is walked as PreBoundary -> (Part -> PreBoundary)* ->
//! ClosingBoundary -> Trailer. Boundary markers are matched as literal
//! substrings of the constructed `--boundary` marker, so metacharacters in
//! the declared boundary need no escaping and each scan step is linear in
//! the remaining input.

use crate::category::Category;
use crate::decoration::Emitter;
use crate::delegate::{Job, TokenizeContext};
use crate::tokenizer::message::MessageTokenizer;

/// Splits `source` from the emitter's cursor onwards on `boundary`, emitting
/// each `--boundary` marker as a keyword and recursively tokenizing each
/// part as a nested message through the registry.
pub(crate) fn tokenize_parts(
    ctx: &TokenizeContext<'_>,
    em: &mut Emitter,
    source: &str,
    boundary: &str,
) {
    let marker = format!("--{boundary}");
    let closing = format!("--{boundary}--");

    // Preamble before the first marker is plain text, not part content.
    if !source[em.cursor()..].starts_with(&marker) {
        if let Some(offset) = source[em.cursor()..].find(&marker) {
            em.emit(offset, Category::Plain);
        }
    }

    loop {
        let rest = &source[em.cursor()..];
        if rest.starts_with(&closing) {
            em.emit(closing.len(), Category::Keyword);
            break;
        }
        if !rest.starts_with(&marker) {
            break;
        }
        // An opening marker must be followed by at least one whitespace
        // character; `--boundaryX` is not a marker and ends the loop.
        let after = &rest[marker.len()..];
        let terminator: usize = after
            .chars()
            .take_while(|c| c.is_whitespace())
            .map(char::len_utf8)
            .sum();
        if terminator == 0 {
            break;
        }
        em.emit(marker.len(), Category::Keyword);
        em.emit(terminator, Category::Plain);

        // Part content runs up to (not including) the next marker
        // occurrence, or to the end of the buffer when the boundary is
        // never closed.
        let content_start = em.cursor();
        let content = &source[content_start..];
        let content_len = content.find(&marker).unwrap_or(content.len());
        let part = &content[..content_len];
        let stream = ctx.delegate(
            Some(MessageTokenizer::NAMES[0]),
            Job {
                source: part,
                base_pos: content_start,
            },
        );
        em.splice(stream, part.len());
    }

    // Garbage after the closing boundary, or a boundary that never closed:
    // flush the remainder as one plain span.
    if em.cursor() + 1 < source.len() {
        em.mark_remainder(Category::Plain, source.len());
    }
}
