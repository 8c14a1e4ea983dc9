//! Marquee CLI - Command-line interface
//!
//! Runs the web UI or queries the catalog and trend store directly.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use marquee_core::MarqueeConfig;
use marquee_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(about = "Find movies you'll enjoy, with trending searches")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: commands::Commands,

    /// Console log level (RUST_LOG overrides)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info)]
    log_level: CliLogLevel,

    /// Directory for the full-trace log of this run
    #[arg(long, default_value = "logs")]
    logs_dir: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing(cli.log_level.into(), Some(&cli.logs_dir))?;

    let config = checked_config(MarqueeConfig::from_env())?;

    commands::handle_command(cli.command, config).await
}

/// Rejects unusable configuration with a message meant for the terminal.
fn checked_config(config: MarqueeConfig) -> anyhow::Result<MarqueeConfig> {
    if let Err(e) = config.validate() {
        tracing::error!("{e}");
        anyhow::bail!(e.user_message());
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_options_default() {
        let cli = Cli::try_parse_from(["marquee", "trending"]).unwrap();
        assert_eq!(cli.log_level, CliLogLevel::Info);
        assert_eq!(cli.logs_dir, PathBuf::from("logs"));
    }

    #[test]
    fn test_invalid_config_reports_user_message() {
        let mut config = MarqueeConfig::default();
        config.trend_store.trending_limit = 0;

        let err = checked_config(config).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Configuration problem: trending limit must be at least 1"
        );

        assert!(checked_config(MarqueeConfig::default()).is_ok());
    }

    #[test]
    fn test_log_level_parses() {
        let cli = Cli::try_parse_from(["marquee", "--log-level", "debug", "trending"]).unwrap();
        assert_eq!(cli.log_level, CliLogLevel::Debug);

        assert!(Cli::try_parse_from(["marquee", "--log-level", "loud", "trending"]).is_err());
    }
}
