use std::sync::Arc;

use clap::Parser;
use jsonapi_cli::{run_features, RunOptions};
use jsonapi_core::{load_settings, Settings};
use jsonapi_exec::ReqwestHttpClient;
use tracing_subscriber::EnvFilter;

mod args;
mod exit_codes;
mod output;

use args::Cli;
use output::{print_error, print_summary};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to create tokio runtime: {e}");
            std::process::exit(exit_codes::RUNTIME_ERROR);
        }
    };

    let exit_code = rt.block_on(run(cli));
    std::process::exit(exit_code);
}

async fn run(cli: Cli) -> i32 {
    let output = cli.output.clone();

    let mut settings = match &cli.config {
        Some(path) => match load_settings(path) {
            Ok(s) => s,
            Err(e) => {
                print_error(
                    output.format,
                    output.quiet,
                    &format!("failed to load settings from {}: {e}", path.display()),
                );
                return exit_codes::RUNTIME_ERROR;
            }
        },
        None => Settings::default(),
    };
    if let Some(base_url) = cli.base_url {
        settings.base_url = base_url;
    }

    if !cli.features.exists() {
        print_error(
            output.format,
            output.quiet,
            &format!("feature path {} does not exist", cli.features.display()),
        );
        return exit_codes::RUNTIME_ERROR;
    }

    let options = RunOptions {
        features: cli.features,
        settings,
        exclude_tags: cli
            .tags_exclude
            .iter()
            .map(|t| t.trim_start_matches('@').to_string())
            .collect(),
    };

    let http = match ReqwestHttpClient::new() {
        Ok(http) => http,
        Err(e) => {
            print_error(output.format, output.quiet, &e.to_string());
            return exit_codes::RUNTIME_ERROR;
        }
    };
    let summary = run_features(options, Arc::new(http)).await;
    print_summary(output.format, output.quiet, &summary);

    if summary.failed {
        exit_codes::SCENARIO_FAILED
    } else {
        exit_codes::SUCCESS
    }
}
