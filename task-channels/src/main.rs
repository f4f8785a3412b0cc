// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use clap::{Parser, ValueEnum};
use phrase_search_core::aggregator::AggregationStrategy;
use phrase_search_core::config::Config;
use phrase_search_core::error::Result;
use phrase_search_core::logging;
use phrase_search_core::partitioner::PartitionStrategy;
use phrase_search_core::report::SearchReport;
use phrase_search_core::sequential::search_sequential;
use phrase_search_task_channels::ChannelCluster;
use phrase_search_word_count::FileWordCounter;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

#[derive(Clone, Copy, ValueEnum)]
enum Partitioning {
    Column,
    FileRange,
}

impl From<Partitioning> for PartitionStrategy {
    fn from(value: Partitioning) -> Self {
        match value {
            Partitioning::Column => PartitionStrategy::Column,
            Partitioning::FileRange => PartitionStrategy::FileRange,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Aggregation {
    SumReduce,
    Collect,
}

impl From<Aggregation> for AggregationStrategy {
    fn from(value: Aggregation) -> Self {
        match value {
            Aggregation::SumReduce => AggregationStrategy::SumReduce,
            Aggregation::Collect => AggregationStrategy::Collect,
        }
    }
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Text,
    Json,
}

/// Count the words of a phrase across files with a static group of nodes
#[derive(Parser)]
#[command(name = "phrase-search", author, version, about, long_about = None)]
struct Cli {
    /// JSON config file; command-line flags override its values
    #[arg(long)]
    config: Option<String>,

    /// Number of nodes in the group, coordinator included
    #[arg(short, long)]
    nodes: Option<usize>,

    #[arg(long, value_enum)]
    partitioning: Option<Partitioning>,

    #[arg(long, value_enum)]
    aggregation: Option<Aggregation>,

    /// Print the per-term counts under each file
    #[arg(long)]
    breakdown: bool,

    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,

    /// Count on a single node without the group protocol
    #[arg(long)]
    sequential: bool,

    /// Search phrase; terms are separated by whitespace
    phrase: String,

    /// Files to search, reported in this order
    files: Vec<String>,
}

impl Cli {
    fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config {
            Some(path) => Config::load(path)?,
            None => Config::default(),
        };
        if let Some(nodes) = self.nodes {
            config.num_nodes = nodes;
        }
        if let Some(partitioning) = self.partitioning {
            config.partitioning = partitioning.into();
        }
        if let Some(aggregation) = self.aggregation {
            config.aggregation = aggregation.into();
        }
        config.validate()?;
        Ok(config)
    }
}

async fn run(cli: Cli) -> Result<String> {
    let config = cli.resolve_config()?;
    let counter = FileWordCounter::new(config.max_token_length);

    let report: SearchReport = if cli.sequential {
        search_sequential(&config, &counter, &cli.phrase, cli.files.clone())?
    } else {
        ChannelCluster::new(config, counter)
            .run(&cli.phrase, cli.files.clone())
            .await?
    };

    match cli.format {
        Format::Text => Ok(report.render_text(cli.breakdown)),
        Format::Json => Ok(format!("{}\n", report.to_json()?)),
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_with_default("warn");
    let start_time = Instant::now();
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            // Usage errors share the exit code of every other failure
            return if err.use_stderr() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(output) => {
            print!("{}", output);
            info!(elapsed_ms = start_time.elapsed().as_millis() as u64, "search complete");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
