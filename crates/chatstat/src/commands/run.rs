use crate::cli::RunArgs;
use anyhow::Context;
use chatstat_core::{AnalyticsConfig, UserSelector};
use chatstat_queries::QueryExecutor;
use std::time::Instant;
use tracing::info;

/// Layer CLI flags over the config file (or defaults)
fn build_config(args: &RunArgs) -> anyhow::Result<AnalyticsConfig> {
    let mut config = match &args.config {
        Some(path) => AnalyticsConfig::load(path)
            .with_context(|| format!("failed to read config {}", path.display()))?,
        None => AnalyticsConfig::default(),
    };

    if let Some(dir) = &args.output_dir {
        config.output_dir = dir.clone();
    }
    if let Some(prefix) = &args.prefix {
        config.prefix = prefix.clone();
    }
    if !args.queries.is_empty() {
        config.queries = args.queries.clone();
    }
    if let Some(user_id) = &args.user_id {
        config.user_id = UserSelector::parse(user_id);
    }
    if let Some(words_count) = args.words_count {
        config.words_count = words_count;
    }
    if args.messages.is_some() {
        config.messages_path = args.messages.clone();
    }
    if args.users.is_some() {
        config.users_path = args.users.clone();
    }
    if args.conversations.is_some() {
        config.conversations_path = args.conversations.clone();
    }

    config.validate()?;
    Ok(config)
}

pub fn run(args: &RunArgs) -> anyhow::Result<()> {
    let started = Instant::now();
    let config = build_config(args)?;

    let executor = QueryExecutor::load(config)?;
    info!(
        records = executor.messages().len(),
        elapsed_secs = started.elapsed().as_secs_f64(),
        "loaded inputs"
    );

    let written = executor.run()?;
    for path in &written {
        println!("{}", path.display());
    }
    info!(
        elapsed_secs = started.elapsed().as_secs_f64(),
        "all tasks finished"
    );
    Ok(())
}
