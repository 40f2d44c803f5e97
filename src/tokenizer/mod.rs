//! # Message Tokenizer Component
//!
//! Lexical analysis of raw HTTP request / response text into a stream of
//! `(offset, category)` decorations for the highlighting host.
//!
//! ## Processing Pipeline
//!
//! A message is consumed once, front to back:
//!
//! 1. **Start line**: request line (`METHOD target HTTP-version`) or status
//!    line (`HTTP-version code reason`), whichever matches first
//! 2. **Header block**: anchored header-line matches until the first miss,
//!    tracking the first `Content-Type` seen
//! 3. **Separator**: the blank line between headers and body, if present
//! 4. **Body**: delegated whole to the sub-tokenizer resolved from the
//!    `Content-Type`, or split on the declared boundary for `multipart/*`
//!    bodies with each part recursively tokenized as a nested message
//!
//! ## Error Handling
//!
//! Malformed input never fails: each stage that cannot match simply falls
//! through to the next, degrading classification rather than erroring.
//!
//! ## Component Structure
//!
//! * [`message`]: the state machine and its registration entry point
//! * `multipart`: boundary splitting for `multipart/*` bodies
//! * `patterns`: the compiled line patterns and their capture layouts

pub mod message;
mod multipart;
mod patterns;
