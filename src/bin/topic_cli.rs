//! Topic parsing command line interface
//!
//! Runs the mention/topic engine over a post body for debugging and
//! batch inspection.
//!
//! # Usage
//!
//! ```bash
//! # Parse a post into topics (pretty JSON)
//! echo 'Met @[Acme](company:1) @ Chicago.' | topic_cli parse
//!
//! # Auto-title a post file
//! topic_cli title --file post.txt --max-length 60
//!
//! # Plain-text preview with a custom config
//! topic_cli --config topics.yaml plain --file post.txt
//! ```

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use mention_topics::{render_plain_text, TopicParser, TopicParserConfig};

#[derive(Parser)]
#[command(name = "topic_cli")]
#[command(version = "0.1.0")]
#[command(about = "Extract mentions, topics and auto-titles from forum content")]
#[command(long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML config file (falls back to TOPIC_PARSER_CONFIG, then defaults)
    #[arg(long, short = 'c', global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse content into topics and standalone mentions
    Parse {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Generate an auto-title
    Title {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Maximum title length (defaults to the configured value)
        #[arg(long, short = 'm')]
        max_length: Option<usize>,
    },

    /// List extracted mentions with their context
    Mentions {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Render mention tokens as plain `@Name` text
    Plain {
        /// Input file (reads stdin if not provided)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => TopicParserConfig::load_from_file(path)?,
        None => TopicParserConfig::from_env()?,
    };
    let parser = TopicParser::new(config);

    match cli.command {
        Commands::Parse { file } => {
            let text = read_input(file.as_deref())?;
            let parsed = parser.parse_content_into_topics(&text);
            println!("{}", serde_json::to_string_pretty(&parsed)?);
        }
        Commands::Title { file, max_length } => {
            let text = read_input(file.as_deref())?;
            let max = max_length.unwrap_or(parser.config().default_title_max_length);
            println!("{}", parser.generate_auto_title_with_max(&text, max));
        }
        Commands::Mentions { file } => {
            let text = read_input(file.as_deref())?;
            let mentions = parser.extract_mentions(&text);
            println!("{}", serde_json::to_string_pretty(&mentions)?);
        }
        Commands::Plain { file } => {
            let text = read_input(file.as_deref())?;
            println!("{}", render_plain_text(&text));
        }
    }

    Ok(())
}

fn read_input(file: Option<&Path>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            Ok(buf)
        }
    }
}
