//! Stream-level invariants that must hold for arbitrary input: the emitted
//! spans cover the buffer exactly, offsets never decrease, and tokenization
//! is a pure function of its input.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use irodori::{spans, Category, LanguageRegistry, MessageTokenizer, MimeResolver};

#[ctor::ctor]
fn init_tests() {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber).expect("Failed to set tracing subscriber");
}

fn registry() -> LanguageRegistry {
    let registry = LanguageRegistry::new();
    MessageTokenizer::install(&registry, MimeResolver::known_types()).unwrap();
    registry
}

fn check_invariants(source: &str) -> Result<(), TestCaseError> {
    let registry = registry();
    let decorations = registry.tokenize("http", source);

    // Monotonicity, including across re-based nested streams.
    for pair in decorations.windows(2) {
        prop_assert!(
            pair[0].pos <= pair[1].pos,
            "offsets decreased: {:?}",
            pair
        );
    }
    for decoration in &decorations {
        prop_assert!(decoration.pos < source.len().max(1));
    }

    // Coverage: the spans tile [0, len) with no gaps and no overlaps.
    let tiled = spans(&decorations, source.len());
    if source.is_empty() {
        prop_assert!(tiled.is_empty());
    } else {
        prop_assert_eq!(tiled[0].0.start, 0);
        for pair in tiled.windows(2) {
            prop_assert_eq!(pair[0].0.end, pair[1].0.start);
        }
        prop_assert_eq!(tiled.last().unwrap().0.end, source.len());
    }

    // Purity: a second run over the same input yields the same stream.
    prop_assert_eq!(&decorations, &registry.tokenize("http", source));
    Ok(())
}

fn header_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z0-9-]{0,14}"
}

fn header_value() -> impl Strategy<Value = String> {
    "[ -~]{0,30}"
}

fn request_message() -> impl Strategy<Value = String> {
    (
        "[A-Z]{1,7}",
        "[!-~]{1,12}",
        prop::collection::vec((header_name(), header_value()), 0..5),
        "[ -~\\r\\n]{0,60}",
    )
        .prop_map(|(method, target, headers, body)| {
            let mut message = format!("{method} {target} HTTP/1.1\r\n");
            for (name, value) in headers {
                message.push_str(&format!("{name}: {value}\r\n"));
            }
            message.push_str("\r\n");
            message.push_str(&body);
            message
        })
}

fn multipart_message() -> impl Strategy<Value = String> {
    (
        "[A-Za-z0-9'()+_,./:=?-]{1,10}",
        prop::collection::vec("[ -~]{0,30}", 0..4),
        any::<bool>(),
    )
        .prop_map(|(boundary, parts, closed)| {
            let mut message = format!(
                "Content-Type: multipart/mixed; boundary={boundary}\r\n\r\n"
            );
            for part in parts {
                message.push_str(&format!("--{boundary}\r\n{part}\r\n"));
            }
            if closed {
                message.push_str(&format!("--{boundary}--"));
            }
            message
        })
}

proptest! {
    #[test]
    fn prop_arbitrary_text(source in "[ -~\\r\\n\\t]{0,200}") {
        check_invariants(&source)?;
    }

    #[test]
    fn prop_arbitrary_unicode(source in any::<String>()) {
        check_invariants(&source)?;
    }

    #[test]
    fn prop_request_messages(source in request_message()) {
        check_invariants(&source)?;
    }

    #[test]
    fn prop_multipart_messages(source in multipart_message()) {
        check_invariants(&source)?;
    }
}

#[test]
fn test_resolver_is_deterministic_across_instances() {
    let a = MimeResolver::known_types();
    let b = MimeResolver::known_types();
    for mime in ["text/html", "text/x-python", "application/x-foo-src", "video/mp4"] {
        assert_eq!(a.resolve(mime), b.resolve(mime));
        assert_eq!(a.resolve(mime), a.resolve(mime));
    }
}

#[test]
fn test_registry_is_shareable_across_threads() {
    let registry = std::sync::Arc::new(registry());
    let handles: Vec<_> = (0..4)
        .map(|i| {
            let registry = registry.clone();
            std::thread::spawn(move || {
                let source = format!("GET /{i} HTTP/1.1\r\nHost: x\r\n\r\nbody {i}");
                registry.tokenize("http", &source)
            })
        })
        .collect();
    for handle in handles {
        let decorations = handle.join().unwrap();
        assert_eq!(decorations[0].pos, 0);
        assert_eq!(decorations[0].category, Category::Keyword);
    }
}
