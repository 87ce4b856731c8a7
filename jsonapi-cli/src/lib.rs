#![forbid(unsafe_code)]

//! Cucumber adapter for JSON API scenarios.
//!
//! [`run_features`] executes feature files against the built-in step
//! vocabulary. Each scenario gets a fresh [`ApiWorld`] whose context is
//! configured from the loaded [`Settings`] before its first step.

mod steps;
pub mod world;

use std::path::PathBuf;
use std::sync::Arc;

use cucumber::writer::Stats as _;
use cucumber::World as _;
use jsonapi_core::Settings;
use jsonapi_exec::HttpClient;
use serde::Serialize;

pub use crate::world::ApiWorld;

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub features: PathBuf,
    pub settings: Settings,
    /// Scenarios carrying any of these tags (without `@`), directly or through
    /// their feature or rule, are skipped.
    pub exclude_tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct RunSummary {
    pub passed_steps: usize,
    pub skipped_steps: usize,
    pub failed_steps: usize,
    pub parsing_errors: usize,
    pub hook_errors: usize,
    pub failed: bool,
}

/// Run every scenario under `options.features`, one at a time.
pub async fn run_features(options: RunOptions, http: Arc<dyn HttpClient>) -> RunSummary {
    let RunOptions {
        features,
        settings,
        exclude_tags,
    } = options;
    let settings = Arc::new(settings);

    tracing::info!(
        features = %features.display(),
        base_url = %settings.base_url,
        "running features"
    );

    let writer = ApiWorld::cucumber()
        .max_concurrent_scenarios(1)
        .with_default_cli()
        .before(move |_feature, _rule, scenario, world| {
            let settings = Arc::clone(&settings);
            let http = Arc::clone(&http);
            Box::pin(async move {
                tracing::debug!(scenario = %scenario.name, "starting scenario");
                world.initialize(&settings, http);
            })
        })
        .filter_run(features, move |feature, rule, scenario| {
            // Scenarios inherit the tags of their feature and rule.
            let mut tags = feature
                .tags
                .iter()
                .chain(rule.into_iter().flat_map(|r| r.tags.iter()))
                .chain(scenario.tags.iter());
            !tags.any(|t| exclude_tags.contains(t))
        })
        .await;

    RunSummary {
        passed_steps: writer.passed_steps(),
        skipped_steps: writer.skipped_steps(),
        failed_steps: writer.failed_steps(),
        parsing_errors: writer.parsing_errors(),
        hook_errors: writer.hook_errors(),
        failed: writer.execution_has_failed(),
    }
}
