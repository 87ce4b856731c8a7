use jsonapi_cli::RunSummary;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// The cucumber writer already reports progress in text mode; JSON mode adds a
/// machine-readable summary line.
pub fn print_summary(format: OutputFormat, quiet: bool, summary: &RunSummary) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => {}
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string(summary) {
                println!("{json}");
            }
        }
    }
}

pub fn print_error(format: OutputFormat, quiet: bool, message: &str) {
    if quiet {
        return;
    }
    match format {
        OutputFormat::Text => eprintln!("error: {message}"),
        OutputFormat::Json => {
            let err = serde_json::json!({"error": message});
            eprintln!("{}", serde_json::to_string(&err).unwrap_or_default());
        }
    }
}
