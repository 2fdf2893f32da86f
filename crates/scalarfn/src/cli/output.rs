//! Output formatting utilities

use anyhow::{Context, Result};
use colored::Colorize;
use scalarfn_eval::FunctionError;
use scalarfn_types::ScalarValue;
use std::io::IsTerminal;
use std::str::FromStr;
use tracing_subscriber::EnvFilter;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    JsonPretty,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            "pretty" | "json-pretty" => Ok(Self::JsonPretty),
            other => anyhow::bail!("Unknown output format: {}", other),
        }
    }
}

/// Set up color output based on user preference
pub fn setup_colors(mode: &str) {
    match mode.to_lowercase().as_str() {
        "always" => colored::control::set_override(true),
        "never" => colored::control::set_override(false),
        _ => colored::control::set_override(std::io::stdout().is_terminal()),
    }
}

/// Format an error for display
pub fn format_error(error: &anyhow::Error) -> String {
    match error.downcast_ref::<FunctionError>() {
        Some(function_error) => format!(
            "{} {} {}",
            "Error".red().bold(),
            format!("[{}]", function_error.code()).dimmed(),
            function_error
        ),
        None => format!("{} {:#}", "Error:".red().bold(), error),
    }
}

/// Format a warning for display
pub fn format_warning(warning: &str) -> String {
    format!("{} {}", "Warning:".yellow().bold(), warning)
}

/// Format a function result
pub fn format_value(value: &ScalarValue, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => serde_json::to_string(value).context("Failed to serialize JSON"),
        OutputFormat::JsonPretty => {
            serde_json::to_string_pretty(value).context("Failed to serialize JSON")
        }
    }
}

/// Log filter for the CLI: warnings only, or `RUST_LOG`/debug with `verbose`
pub fn log_filter(verbose: bool) -> EnvFilter {
    if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "debug".into())
    } else {
        EnvFilter::new("warn")
    }
}

/// Install the stderr subscriber; library `log` records are bridged into it
pub fn init_logging(verbose: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(verbose))
        .with_ansi(colored::control::SHOULD_COLORIZE.should_colorize())
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}
