use regex::Regex;

use crate::matcher::AnchoredPattern;

// Capture layout: 1 = method+ws, 2 = method, 3 = ws, 4 = target,
// 5 = ws+version, 6 = ws, 7 = version, 8 = terminator.
const REQUEST_LINE: &str = r"^(([A-Z]+)(\s+))([^\r\n]+?)((\s+)(HTTP/\d+\.\d+))?(\r?\n|$)";

// Capture layout: 1 = version+ws, 2 = version, 3 = ws, 4 = code, 5 = ws,
// 6 = reason, 7 = terminator.
const STATUS_LINE: &str = r"^((HTTP/\d+\.\d+)(\s+))?(\d+)(\s*)([^\r\n]*)(\r?\n|$)";

// Either a named header line or a folded continuation line (leading
// whitespace, no colon). Capture layout: 2 = name, 3 = colon, 4 = spacing,
// 5 = continuation whitespace, 6 = value (spanning folded lines),
// 8 = terminator.
const HEADER_LINE: &str = r"(([-\w]+)(:)(\s*)|([^\S\r\n]+))((\r?\n |[^\r\n])*)(\r?\n|$)";

const BLANK_LINE: &str = r"(\r?\n|$)";

// `boundary=` parameter, quoted (groups 1-3) or bare (groups 4-6); the
// boundary token itself is group 2 or 5, the rest partitions the value.
const BOUNDARY_PARAM: &str = concat!(
    r#"^([\s\S]*?boundary=")([^"\r\n]+)("[\s\S]*)$"#,
    r#"|^([\s\S]*?boundary=)([^"\s,]+)([\s\S]*)$"#
);

pub(crate) struct MessagePatterns {
    pub request_line: Regex,
    pub status_line: Regex,
    pub header_line: AnchoredPattern,
    pub blank_line: AnchoredPattern,
    pub boundary_param: Regex,
}

impl MessagePatterns {
    pub fn new() -> Self {
        Self {
            request_line: Regex::new(REQUEST_LINE).unwrap(),
            status_line: Regex::new(STATUS_LINE).unwrap(),
            header_line: AnchoredPattern::new(HEADER_LINE).unwrap(),
            blank_line: AnchoredPattern::new(BLANK_LINE).unwrap(),
            boundary_param: Regex::new(BOUNDARY_PARAM).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_line_captures() {
        let patterns = MessagePatterns::new();
        let caps = patterns
            .request_line
            .captures("GET /index.html HTTP/1.1\r\nHost: x\r\n")
            .unwrap();
        assert_eq!(&caps[2], "GET");
        assert_eq!(&caps[4], "/index.html");
        assert_eq!(&caps[7], "HTTP/1.1");
        assert_eq!(&caps[8], "\r\n");
    }

    #[test]
    fn test_request_line_without_version() {
        let patterns = MessagePatterns::new();
        let caps = patterns.request_line.captures("GET /\n").unwrap();
        assert_eq!(&caps[2], "GET");
        assert_eq!(&caps[4], "/");
        assert!(caps.get(7).is_none());
    }

    #[test]
    fn test_status_line_captures() {
        let patterns = MessagePatterns::new();
        let caps = patterns
            .status_line
            .captures("HTTP/1.1 404 Not Found\r\n")
            .unwrap();
        assert_eq!(&caps[2], "HTTP/1.1");
        assert_eq!(&caps[4], "404");
        assert_eq!(&caps[6], "Not Found");
    }

    #[test]
    fn test_header_line_with_folding() {
        let patterns = MessagePatterns::new();
        let caps = patterns
            .header_line
            .match_at("X-Long: first\r\n second\r\nNext: 1\r\n", 0)
            .unwrap();
        assert_eq!(&caps[2], "X-Long");
        assert_eq!(&caps[6], "first\r\n second");
    }

    #[test]
    fn test_boundary_param_quoted_and_bare() {
        let patterns = MessagePatterns::new();

        let caps = patterns
            .boundary_param
            .captures(r#"multipart/mixed; boundary="abc123""#)
            .unwrap();
        assert_eq!(&caps[2], "abc123");

        let caps = patterns
            .boundary_param
            .captures("multipart/mixed; boundary=abc123")
            .unwrap();
        assert_eq!(&caps[5], "abc123");
    }
}
