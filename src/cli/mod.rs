//! CLI command definitions and handlers

mod init;
mod series;
mod text;
mod topic;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use wikibias::config::Settings;
use wikibias::reporters::{self, OutputFormat};

/// Parse and validate a positive count
fn parse_count(s: &str) -> Result<usize, String> {
    let n: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid number", s))?;
    if n == 0 {
        Err("must be at least 1".to_string())
    } else {
        Ok(n)
    }
}

/// wikibias - measure automation bias in wiki edit histories
#[derive(Parser, Debug)]
#[command(name = "wikibias")]
#[command(
    version,
    about = "Measure whether bot edits shift the neutrality of wiki articles",
    long_about = "wikibias fetches revision histories from a MediaWiki API, classifies each \
revision's author as bot or human, scores every revision for biased phrasing and \
neutral-point-of-view compliance, and compares bot and human editing patterns.",
    after_help = "\
Examples:
  wikibias topic \"climate change\"             Analyze one topic
  wikibias topic vaccination -f json -o v.json  Save JSON results
  wikibias run                                Analyze the configured topics
  wikibias text article.txt                   Score a text file offline
  wikibias series revisions.json --title Foo  Analyze a saved revision list"
)]
pub struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, default_value = "warn", value_parser = ["error", "warn", "info", "debug", "trace"])]
    pub log_level: String,

    /// Config file (default: ./wikibias.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search a topic and analyze the revision histories of matching pages
    Topic {
        /// Search query, e.g. "gun control"
        topic: String,

        /// Pages to analyze (default from config)
        #[arg(long, value_parser = parse_count)]
        pages: Option<usize>,

        /// Revisions per page (default from config)
        #[arg(long, value_parser = parse_count)]
        revisions: Option<usize>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout; extension follows the format when omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Analyze several topics and write a combined report
    Run {
        /// Topics to analyze (default: the configured controversial topics)
        topics: Vec<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,

        /// Output file path (default: stdout; extension follows the format when omitted)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Score a text for biased phrasing and neutrality (reads stdin without FILE)
    Text {
        file: Option<PathBuf>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Analyze a saved JSON array of revisions, oldest first
    Series {
        file: PathBuf,

        /// Page title used for topic keyword checks (default: file name)
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Output format: text, json
        #[arg(long, short = 'f', default_value = "text", value_parser = ["text", "json"])]
        format: String,
    },

    /// Write an example wikibias.toml in the current directory
    Init,
}

pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Init => init::run(Path::new(".")),

        Commands::Topic {
            topic,
            pages,
            revisions,
            format,
            output,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;
            topic::run_topic(&settings, &topic, pages, revisions, &format, output.as_deref())
        }

        Commands::Run {
            topics,
            format,
            output,
        } => {
            let settings = Settings::load(cli.config.as_deref())?;
            topic::run_batch(&settings, topics, &format, output.as_deref())
        }

        Commands::Text { file, format } => text::run(file.as_deref(), &format),

        Commands::Series {
            file,
            title,
            format,
        } => series::run(&file, title.as_deref(), &format),
    }
}

/// Print to stdout, or write to `output` when given. A path without an
/// extension gets the one for `format`.
fn emit(content: &str, format: OutputFormat, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            let path = output_path(path, format);
            std::fs::write(&path, content)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("Results saved to {}", path.display());
        }
        None => print!("{content}"),
    }
    Ok(())
}

fn output_path(path: &Path, format: OutputFormat) -> PathBuf {
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(reporters::file_extension(format))
    }
}
