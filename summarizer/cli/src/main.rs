//! Summarize - Command-line surface for the summarization service
//!
//! Probes the service, submits one text and prints the result.
//!
//! # Usage
//!
//! ```bash
//! # Summarize a file
//! summarize article.txt
//!
//! # Read from stdin, shorter summary, forced emotion
//! cat article.txt | summarize --max-length 80 --emotion joy
//!
//! # Try a built-in sample against another host
//! summarize --sample news --api-url http://gpu-box:8000
//!
//! # Just check the service
//! summarize --probe-only
//!
//! # Machine-readable output
//! summarize --json article.txt
//!
//! # Verbose logging
//! RUST_LOG=debug summarize article.txt
//! ```

mod render;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::mpsc;
use tracing::{debug, info};

use summarizer_core::{
    find_sample, load_config, ClientConfig, ClientMessage, HttpBackend, RawSubmission,
    SessionPhase, SubmitError, SummarizerClient, SAMPLE_TEXTS,
};

/// Summarize text with emotion-aware summarization
#[derive(Parser, Debug)]
#[command(name = "summarize")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Base URL of the summarization API
    #[arg(short = 'u', long, env = "SUMMARIZER_API_URL", value_name = "URL")]
    api_url: Option<String>,

    /// Configuration file path
    #[arg(short = 'c', long, env = "SUMMARIZER_CONFIG", value_name = "FILE")]
    config: Option<PathBuf>,

    /// Maximum summary length (clamped to 50-300)
    #[arg(short = 'm', long, value_name = "N")]
    max_length: Option<String>,

    /// Emotion to use instead of auto-detection
    #[arg(short = 'e', long, value_name = "LABEL")]
    emotion: Option<String>,

    /// Use a built-in sample text (news, sports)
    #[arg(short = 's', long, value_name = "NAME", conflicts_with = "file")]
    sample: Option<String>,

    /// Only check service health and supported emotions
    #[arg(long)]
    probe_only: bool,

    /// Print the session snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short = 'l', long, env = "SUMMARIZER_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Text file to summarize (stdin when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

/// Initialize logging with the specified level
fn init_logging(level: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "summarizer_cli={level},summarizer_core={level}"
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve configuration: file and environment, then flags
fn resolve_config(args: &Args) -> Result<ClientConfig> {
    let mut config = load_config(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(ref url) = args.api_url {
        config.base_url.clone_from(url);
    }
    Ok(config)
}

/// Read the text to summarize from a sample, a file, or stdin
fn read_input(sample: Option<&str>, file: Option<&Path>) -> Result<String> {
    if let Some(name) = sample {
        let Some(sample) = find_sample(name) else {
            let known: Vec<&str> = SAMPLE_TEXTS.iter().map(|s| s.key).collect();
            anyhow::bail!("Unknown sample {name:?} (available: {})", known.join(", "));
        };
        return Ok(sample.text.to_string());
    }

    if let Some(path) = file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file: {path:?}"));
    }

    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read stdin")?;
    Ok(text)
}

/// Print pending notifications to stderr
fn drain_notifications(rx: &mut mpsc::Receiver<ClientMessage>) {
    while let Ok(msg) = rx.try_recv() {
        match msg {
            ClientMessage::Notify { level, message } => {
                eprintln!("{}: {message}", render::notify_prefix(level));
            }
            other => debug!(message = ?other, "Client message"),
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let args = Args::parse();

    init_logging(&args.log_level);

    let config = resolve_config(&args)?;
    info!(base_url = %config.base_url, "Summarize starting");

    let (tx, mut rx) = mpsc::channel(64);
    let backend = HttpBackend::from_config(config.backend());
    let mut client = SummarizerClient::new(backend, config, tx);

    client.start().await;
    drain_notifications(&mut rx);

    if args.probe_only {
        if args.json {
            println!("{}", serde_json::to_string_pretty(client.capabilities())?);
        } else {
            println!("{}", render::capability(client.capabilities()));
        }
        return Ok(if client.capabilities().is_available() {
            ExitCode::SUCCESS
        } else {
            ExitCode::FAILURE
        });
    }

    if !args.json {
        println!("{}", render::capability(client.capabilities()));
    }

    let text = read_input(args.sample.as_deref(), args.file.as_deref())?;
    let mut submission = RawSubmission::new(text);
    if let Some(ref max_length) = args.max_length {
        submission = submission.with_max_length_input(max_length.as_str());
    }
    if let Some(ref emotion) = args.emotion {
        submission = submission.with_emotion_override(emotion.as_str());
    }

    match client.submit(submission).await {
        Ok(generation) => debug!(generation = generation.0, "Submitted"),
        Err(SubmitError::Invalid(reason)) => {
            drain_notifications(&mut rx);
            eprintln!("Please fix the input: {reason}");
            return Ok(ExitCode::from(2));
        }
        Err(e) => anyhow::bail!(e),
    }

    if !args.json {
        println!("{}", client.state().phase().description());
    }
    client.wait_for_outcome().await;
    drain_notifications(&mut rx);

    let snapshot = client.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!("\n{}", render::outcome(&snapshot));
    }

    Ok(if snapshot.phase == SessionPhase::Success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_args_parse() {
        let args = Args::parse_from([
            "summarize",
            "--max-length",
            "80",
            "--emotion",
            "joy",
            "--json",
            "article.txt",
        ]);
        assert_eq!(args.max_length.as_deref(), Some("80"));
        assert_eq!(args.emotion.as_deref(), Some("joy"));
        assert!(args.json);
        assert_eq!(args.file, Some(PathBuf::from("article.txt")));
    }

    #[test]
    fn test_sample_conflicts_with_file() {
        let parsed = Args::try_parse_from(["summarize", "--sample", "news", "article.txt"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn test_read_input_from_sample() {
        let text = read_input(Some("sports"), None).unwrap();
        assert!(text.starts_with("In a thrilling match"));
        assert!(read_input(Some("weather"), None).is_err());
    }

    #[test]
    fn test_read_input_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "some text on disk").unwrap();
        assert_eq!(
            read_input(None, Some(file.path())).unwrap(),
            "some text on disk"
        );
    }

    #[test]
    fn test_api_url_flag_overrides_config() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[service]\nbase_url = \"http://from-file:8000\"").unwrap();
        let path = file.path().to_str().unwrap().to_string();

        let args = Args::parse_from([
            "summarize",
            "--config",
            path.as_str(),
            "--api-url",
            "http://from-flag:9000",
        ]);
        let config = resolve_config(&args).unwrap();
        assert_eq!(config.base_url, "http://from-flag:9000");
    }
}
