use clap::{command, Parser};
use irodori::{
    spans, EngineConfig, Error, LanguageRegistry, MessageTokenizer, MimeResolver,
};
use std::path::PathBuf;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a file holding the raw HTTP message
    input: PathBuf,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Tokenizer name to start from
    #[arg(short, long, default_value = "http")]
    language: String,

    /// Enable debug mode
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<(), Error> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    debug!("config: {:?}", config);

    let registry = LanguageRegistry::with_config(config);
    MessageTokenizer::install(&registry, MimeResolver::known_types())?;

    let source = std::fs::read_to_string(&cli.input)
        .map_err(|e| Error::internal(format!("Failed to read input file: {}", e)))?;

    let decorations = registry.tokenize(&cli.language, &source);

    for (range, category) in spans(&decorations, source.len()) {
        let excerpt: String = source[range.clone()].chars().take(40).collect();
        println!("{:>6}..{:<6} {:<12} {:?}", range.start, range.end, category, excerpt);
    }

    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
