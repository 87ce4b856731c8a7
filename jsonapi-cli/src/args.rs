use std::path::PathBuf;

use clap::{Args, Parser};

use crate::output::OutputFormat;

#[derive(Debug, Args, Clone)]
pub struct OutputArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
    #[arg(long, short)]
    pub quiet: bool,
}

#[derive(Debug, Parser)]
#[command(name = "jsonapi", version, about = "Run JSON API feature files")]
pub struct Cli {
    /// Feature file or directory of feature files.
    pub features: PathBuf,

    /// Settings file (YAML or JSON).
    #[arg(long, short)]
    pub config: Option<PathBuf>,

    /// Overrides `base_url` from the settings file.
    #[arg(long, env = "JSONAPI_BASE_URL")]
    pub base_url: Option<String>,

    /// Skip scenarios with this tag; repeatable. A leading `@` is optional.
    #[arg(long = "tags-exclude", value_name = "TAG")]
    pub tags_exclude: Vec<String>,

    #[command(flatten)]
    pub output: OutputArgs,
}
