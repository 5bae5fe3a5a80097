//! One-shot build-alignment runs against a checked-out work directory.

mod config;

use align_core::{AdjustResult, CommandExecutor};
use align_pme::{PmeProvider, version_from_result};
use clap::Parser;
use std::collections::HashMap;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "align",
    version,
    about = "Align a Maven source tree with the external manipulation tool"
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// Extra adjust parameters as KEY=VALUE entries, repeatable.
    #[arg(short, long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    param: Vec<(String, String)>,

    /// Work directory holding the checked-out source tree.
    work_dir: PathBuf,
}

fn parse_key_value(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(key, value)| (key.to_string(), value.to_string()))
        .ok_or_else(|| format!("expected KEY=VALUE, got \"{raw}\""))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match config::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("failed to load {}: {e}", cli.config.display());
            return ExitCode::FAILURE;
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log.level.clone())),
        )
        .init();

    let provider = PmeProvider::new(config.pme, Arc::new(CommandExecutor::default()));
    let extra: HashMap<String, String> = cli.param.into_iter().collect();
    let mut adjust_result = AdjustResult::default();

    match provider
        .adjust(&cli.work_dir, &extra, &mut adjust_result)
        .await
    {
        Ok(outcome) => {
            if let Some(version) = version_from_result(&adjust_result.result_data) {
                info!("Aligned version is {version}");
            }
            match serde_json::to_string_pretty(&adjust_result) {
                Ok(rendered) => println!("{rendered}"),
                Err(e) => error!("failed to render the adjustment result: {e}"),
            }
            if outcome.passed() {
                ExitCode::SUCCESS
            } else {
                ExitCode::from(u8::try_from(outcome.exit_code).unwrap_or(1))
            }
        }
        Err(e) => {
            error!("{e}");
            let code = e.exit_code().unwrap_or(1);
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}
