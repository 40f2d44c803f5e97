//! Media-type to language resolution.
//!
//! The resolver maps a lowercased, parameter-stripped media type (the portion
//! of a `Content-Type` value before the first `;`) to the name of a
//! registered sub-tokenizer. The rule table is an ordered list: exact matches
//! are declared first, generic suffix-stripping fallbacks (`text/x-*`,
//! `application/x-*`) last, and the first matching rule wins. The table is
//! built once and is read-only afterwards, so concurrent invocations can
//! share one resolver.

use regex::Regex;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    #[error("invalid pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("capture group {group} out of range for pattern {pattern:?}")]
    CaptureOutOfRange { pattern: String, group: usize },
}

#[derive(Debug, Clone)]
enum MimeRule {
    /// The whole media type equals `mime`.
    Exact { mime: String, language: String },
    /// The pattern matches the whole media type.
    Pattern { regex: Regex, language: String },
    /// The pattern matches the whole media type; the indexed capture group
    /// is the language. Lets `text/x-foo` and `application/x-foo-src` both
    /// resolve to `foo` without one rule per variant.
    Capture { regex: Regex, group: usize },
}

/// Ordered media-type rule table. See [`MimeResolver::known_types`] for the
/// default table.
#[derive(Debug, Clone, Default)]
pub struct MimeResolver {
    rules: Vec<MimeRule>,
}

impl MimeResolver {
    pub fn builder() -> MimeResolverBuilder {
        MimeResolverBuilder { rules: Vec::new() }
    }

    /// The default rule table covering the media types commonly seen in HTTP
    /// message bodies. Exact entries precede the generic fallbacks; the
    /// ordering is load-bearing (`text/x-python` must hit the exact `py`
    /// entry, not the capture fallback).
    pub fn known_types() -> Self {
        MimeResolver::builder()
            .language("c")
            .language_alias("cpp", "cplusplus")
            .language_alias("cpp", "c++")
            .language_alias("cs", "csharp")
            .language_alias("cs", "c#")
            .exact("text/css", "css")
            .exact("application/css-stylesheet", "css")
            .exact("text/html", "html")
            .exact("application/xhtml+xml", "html")
            .language("java")
            .language_alias("js", "javascript")
            .language_alias("js", "ecmascript")
            .language("json")
            .exact("text/x-latex", "latex")
            .exact("application/x-latex", "latex")
            .exact("text/x-makefile", "make")
            .language("pascal")
            .language("perl")
            .language("php")
            .language_alias("py", "python")
            .language_alias("rb", "ruby")
            .language("scala")
            .language("sh")
            .language_alias("sh", "shell")
            .language("sql")
            .exact("application/xml", "xml")
            .exact("text/xml", "xml")
            .pattern(r"application/.*\+xml", "xml")
            .unwrap()
            .capture_pattern(r"text/x-(.*?)(?:-src|-source)?", 1)
            .unwrap()
            .capture_pattern(r"application/x-(.*?)(?:-src|-source)?", 1)
            .unwrap()
            .build()
    }

    /// Resolves a media type to a registered language name.
    ///
    /// The input must already be lowercased and parameter-stripped. Returns
    /// `None` when no rule matches; the caller treats that as "use the
    /// unrecognized-content handler", never as an error.
    ///
    /// # Examples
    ///
    /// ```
    /// # use irodori::mime::MimeResolver;
    /// let resolver = MimeResolver::known_types();
    /// assert_eq!(resolver.resolve("application/json").as_deref(), Some("json"));
    /// assert_eq!(resolver.resolve("text/x-rust-src").as_deref(), Some("rust"));
    /// assert!(resolver.resolve("video/mp4").is_none());
    /// ```
    pub fn resolve(&self, content_type: &str) -> Option<String> {
        for rule in &self.rules {
            match rule {
                MimeRule::Exact { mime, language } => {
                    if mime == content_type {
                        return Some(language.clone());
                    }
                }
                MimeRule::Pattern { regex, language } => {
                    if regex.is_match(content_type) {
                        return Some(language.clone());
                    }
                }
                MimeRule::Capture { regex, group } => {
                    if let Some(caps) = regex.captures(content_type) {
                        return caps.get(*group).map(|m| m.as_str().to_string());
                    }
                }
            }
        }
        tracing::debug!(%content_type, "no language rule matched");
        None
    }
}

#[derive(Debug, Clone)]
pub struct MimeResolverBuilder {
    rules: Vec<MimeRule>,
}

impl MimeResolverBuilder {
    /// Adds one exact media-type entry.
    pub fn exact(mut self, mime: &str, language: &str) -> Self {
        self.rules.push(MimeRule::Exact {
            mime: mime.to_string(),
            language: language.to_string(),
        });
        self
    }

    /// Adds the eight canonical media-type spellings of a language:
    /// `text/F`, `text/x-F`, `text/x-F-src`, `text/x-F-source` and the same
    /// four under `application/`.
    pub fn language(self, language: &str) -> Self {
        let spelling = language.to_string();
        self.language_alias(language, &spelling)
    }

    /// Same expansion as [`language`](Self::language) over an alternate
    /// spelling, e.g. `python` for `py`.
    pub fn language_alias(mut self, language: &str, spelling: &str) -> Self {
        for prefix in ["text/", "application/"] {
            for form in ["", "x-"] {
                for suffix in ["", "-src", "-source"] {
                    // suffixes apply only to the x- forms
                    if form.is_empty() && !suffix.is_empty() {
                        continue;
                    }
                    self = self.exact(&format!("{prefix}{form}{spelling}{suffix}"), language);
                }
            }
        }
        self
    }

    /// Adds a pattern rule bound to a fixed language. The pattern is anchored
    /// to match the whole media type.
    pub fn pattern(mut self, pattern: &str, language: &str) -> Result<Self, RuleError> {
        let regex = compile_anchored(pattern)?;
        self.rules.push(MimeRule::Pattern {
            regex,
            language: language.to_string(),
        });
        Ok(self)
    }

    /// Adds a pattern rule whose language is the text of capture group
    /// `group`. The pattern is anchored to match the whole media type.
    pub fn capture_pattern(mut self, pattern: &str, group: usize) -> Result<Self, RuleError> {
        let regex = compile_anchored(pattern)?;
        if group >= regex.captures_len() {
            return Err(RuleError::CaptureOutOfRange {
                pattern: pattern.to_string(),
                group,
            });
        }
        self.rules.push(MimeRule::Capture { regex, group });
        Ok(self)
    }

    pub fn build(self) -> MimeResolver {
        MimeResolver { rules: self.rules }
    }
}

fn compile_anchored(pattern: &str) -> Result<Regex, RuleError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|source| RuleError::Pattern {
        pattern: pattern.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exact_round_trips() {
        let resolver = MimeResolver::known_types();
        let cases = [
            ("text/html", "html"),
            ("application/json", "json"),
            ("text/x-python", "py"),
            ("text/css", "css"),
            ("application/xhtml+xml", "html"),
            ("text/javascript", "js"),
            ("application/x-ecmascript-src", "js"),
            ("text/c#", "cs"),
            ("text/x-c++-source", "cpp"),
            ("text/x-makefile", "make"),
            ("application/x-latex", "latex"),
            ("text/x-shell", "sh"),
            ("application/sql", "sql"),
            ("text/xml", "xml"),
        ];
        for (mime, language) in cases {
            assert_eq!(resolver.resolve(mime).as_deref(), Some(language), "{mime}");
        }
    }

    #[test]
    fn test_exact_rules_shadow_capture_fallbacks() {
        // If the generic `text/x-*` fallback ran first, these would resolve
        // to the raw spelling instead of the canonical name.
        let resolver = MimeResolver::known_types();
        assert_eq!(resolver.resolve("text/x-python").as_deref(), Some("py"));
        assert_eq!(resolver.resolve("text/x-makefile").as_deref(), Some("make"));
        assert_eq!(resolver.resolve("text/x-ruby-src").as_deref(), Some("rb"));
    }

    #[test]
    fn test_capture_fallback_strips_suffixes() {
        let resolver = MimeResolver::known_types();
        assert_eq!(resolver.resolve("text/x-rust").as_deref(), Some("rust"));
        assert_eq!(resolver.resolve("text/x-rust-src").as_deref(), Some("rust"));
        assert_eq!(
            resolver.resolve("application/x-haskell-source").as_deref(),
            Some("haskell")
        );
    }

    #[test]
    fn test_xml_suffix_pattern() {
        let resolver = MimeResolver::known_types();
        assert_eq!(resolver.resolve("application/rss+xml").as_deref(), Some("xml"));
        assert_eq!(resolver.resolve("application/atom+xml").as_deref(), Some("xml"));
    }

    #[test]
    fn test_no_match_is_none() {
        let resolver = MimeResolver::known_types();
        assert!(resolver.resolve("video/mp4").is_none());
        assert!(resolver.resolve("multipart/mixed").is_none());
        assert!(resolver.resolve("").is_none());
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let resolver = MimeResolver::known_types();
        for _ in 0..3 {
            assert_eq!(resolver.resolve("text/x-python").as_deref(), Some("py"));
            assert!(resolver.resolve("video/mp4").is_none());
        }
    }

    #[test]
    fn test_declaration_order_wins() {
        let resolver = MimeResolver::builder()
            .exact("text/x-thing", "first")
            .exact("text/x-thing", "second")
            .build();
        assert_eq!(resolver.resolve("text/x-thing").as_deref(), Some("first"));

        let shadowed = MimeResolver::builder()
            .capture_pattern(r"text/x-(.*)", 1)
            .unwrap()
            .exact("text/x-thing", "exact")
            .build();
        assert_eq!(shadowed.resolve("text/x-thing").as_deref(), Some("thing"));
    }

    #[test]
    fn test_pattern_is_whole_input_anchored() {
        let resolver = MimeResolver::builder()
            .pattern(r"text/plain", "plain")
            .unwrap()
            .build();
        assert_eq!(resolver.resolve("text/plain").as_deref(), Some("plain"));
        assert!(resolver.resolve("text/plain2").is_none());
        assert!(resolver.resolve("xtext/plain").is_none());
    }

    #[test]
    fn test_invalid_pattern_is_an_error() {
        let result = MimeResolver::builder().pattern(r"text/(unclosed", "x");
        assert!(matches!(result, Err(RuleError::Pattern { .. })));
    }

    #[test]
    fn test_capture_group_out_of_range() {
        let result = MimeResolver::builder().capture_pattern(r"text/(.*)", 2);
        assert!(matches!(
            result,
            Err(RuleError::CaptureOutOfRange { group: 2, .. })
        ));
    }
}
