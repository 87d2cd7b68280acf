use anyhow::Result;
use clap::Parser;
use instrument_export::{
    commands::export,
    config::{ExportSettings, RawSettings},
    context::AppContext,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "instrument-export")]
#[command(
    about = "Export index, equity, ETF and crypto metadata from FinanceDatabase into compact JSON for local search"
)]
struct Cli {
    /// Directory the <category>.json files are written to (defaults to ./data)
    #[arg(long = "output-dir", value_name = "PATH")]
    output_dir: Option<PathBuf>,
    /// Read <category>.csv files from a local directory instead of downloading them
    #[arg(long = "source-dir", value_name = "PATH", conflicts_with = "source_url")]
    source_dir: Option<PathBuf>,
    /// Base URL the <category>.csv files are downloaded from
    #[arg(long = "source-url", value_name = "URL")]
    source_url: Option<String>,
    /// Download timeout in seconds
    #[arg(long = "timeout-secs", value_name = "SECS", conflicts_with = "source_dir")]
    timeout_secs: Option<u64>,
    /// Additional PEM root certificate trusted for downloads
    #[arg(long = "ca-cert", value_name = "PATH", conflicts_with = "source_dir")]
    ca_cert: Option<PathBuf>,
}

impl From<Cli> for RawSettings {
    fn from(cli: Cli) -> Self {
        Self {
            output_dir: cli.output_dir,
            source_dir: cli.source_dir,
            source_url: cli.source_url,
            timeout_secs: cli.timeout_secs,
            ca_cert: cli.ca_cert,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = ExportSettings::resolve(cli.into())?;
    let app_context = AppContext::initialize(settings);

    info!("Starting instrument export");
    let total = export::run(&app_context)?;
    info!("Instrument export finished ({} records)", total);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::Cli;
    use clap::{CommandFactory, Parser};

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn runs_without_arguments() {
        let cli = Cli::try_parse_from(["instrument-export"]).unwrap();
        assert!(cli.source_dir.is_none());
        assert!(cli.source_url.is_none());
    }

    #[test]
    fn download_options_conflict_with_source_dir() {
        for extra in [
            ["--timeout-secs", "30"],
            ["--ca-cert", "ca.pem"],
            ["--source-url", "https://example.com"],
        ] {
            let mut args = vec!["instrument-export", "--source-dir", "database"];
            args.extend(extra);
            let err = Cli::try_parse_from(args).err().unwrap();
            assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
        }
    }
}
