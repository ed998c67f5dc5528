use anyhow::{Context, Result};
use clap::Parser;
use prospector_config::{ConfigLoader, LogFormat, LoggingConfig, ProspectorConfig};
use prospector_core::{MiddlewarePipeline, NoticeCollector};
use prospector_http::MiddlewareClient;
use prospector_interfaces::{Submission, SubmissionHandler};
use serde_json::Value as JsonValue;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

mod cli;
use cli::{Cli, Commands, ConfigCommands};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Sample generation must work without a usable configuration
    if let Commands::Config {
        config_cmd: ConfigCommands::Generate,
    } = cli.command
    {
        print!("{}", ProspectorConfig::generate_sample());
        return Ok(());
    }

    let config = ConfigLoader::new()
        .load(cli.config.as_ref())
        .context("Failed to load configuration")?;

    init_logging(&config.logging, cli.log_level.as_deref());
    debug!("Configuration loaded");

    match cli.command {
        Commands::Deliver {
            submission,
            update,
            dry_run,
        } => deliver_submission(&config, &submission, update, dry_run).await,
        Commands::Config { config_cmd } => handle_config_command(&config, config_cmd),
    }
}

/// Fire the submission-saved trigger for one exported submission
async fn deliver_submission(
    config: &ProspectorConfig,
    path: &Path,
    update: bool,
    dry_run: bool,
) -> Result<()> {
    let submission = read_submission(path)?;
    info!(submission_id = submission.id, "Loaded submission");

    let client = MiddlewareClient::with_config(config.http.clone().into())
        .context("Failed to create HTTP client")?;
    let reporter = Arc::new(NoticeCollector::new());
    let pipeline =
        MiddlewarePipeline::from_config(config, Arc::new(client)).with_reporter(reporter.clone());

    if dry_run {
        let document = pipeline.preview(&submission);
        println!("{}", serde_json::to_string_pretty(&document)?);
        return Ok(());
    }

    let report = pipeline.on_submission_saved(&submission, update).await;

    for notice in reporter.take_notices() {
        eprintln!("{}", notice);
    }
    println!("{}", serde_json::to_string_pretty(&report)?);

    // The save that triggered the relay succeeded whatever the delivery outcome
    Ok(())
}

fn handle_config_command(config: &ProspectorConfig, command: ConfigCommands) -> Result<()> {
    match command {
        ConfigCommands::Validate => {
            println!("Configuration is valid");
        }
        ConfigCommands::Check => {
            let warnings = config.readiness_warnings();
            if warnings.is_empty() {
                println!(
                    "Ready: submissions will be sent to {}",
                    config.middleware.endpoint_url.as_deref().unwrap_or_default()
                );
            } else {
                for warning in &warnings {
                    warn!("{}", warning);
                    println!("Warning: {}", warning);
                }
            }
        }
        ConfigCommands::Generate => {
            print!("{}", ProspectorConfig::generate_sample());
        }
    }
    Ok(())
}

/// Read a submission export from a file, or stdin when the path is `-`
fn read_submission(path: &Path) -> Result<Submission> {
    let content = if path == Path::new("-") {
        std::io::read_to_string(std::io::stdin())
            .context("Failed to read submission from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read submission {}", path.display()))?
    };

    let export: JsonValue = serde_json::from_str(&content).context("Submission is not valid JSON")?;
    Submission::from_export(export).context("Failed to read submission export")
}

/// Initialize tracing on stderr; stdout is reserved for command output
fn init_logging(config: &LoggingConfig, log_level: Option<&str>) {
    let env_filter = match log_level {
        Some(level) => EnvFilter::try_new(level).unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', falling back to '{}'", level, config.level);
            EnvFilter::new(config.level.as_str())
        }),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(config.level.as_str())),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_file(config.include_location)
        .with_line_number(config.include_location);

    let result = match config.format {
        LogFormat::Json => builder.json().try_init(),
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Text => builder.try_init(),
    };

    if result.is_err() {
        debug!("Global tracing subscriber already initialized, skipping");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_read_submission_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"sid": 42, "webform_id": "rfi", "data": {{"email": "a@b.com"}}}}"#
        )
        .unwrap();

        let submission = read_submission(file.path()).unwrap();
        assert_eq!(submission.id, 42);
        assert_eq!(submission.webform_id(), Some("rfi"));
        assert_eq!(submission.data["email"], "a@b.com");
    }

    #[test]
    fn test_read_submission_rejects_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        assert!(read_submission(file.path()).is_err());
    }

    #[test]
    fn test_read_submission_missing_file() {
        let err = read_submission(Path::new("/nonexistent/submission.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read submission"));
    }
}
