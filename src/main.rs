mod analyze;
mod cli;
mod config;
mod error;
mod logging;
mod report;
mod scan;
mod stats;
mod tree;
mod tune;
mod types;

use crate::analyze::relevance::RelevanceParams;
use crate::error::{Result, SysrecError};
use crate::types::config::SysrecConfig;
use crate::types::system::SystemCatalog;
use clap::Parser;
use std::path::PathBuf;
use tracing::warn;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const NO_RECOMMENDATION: i32 = 1;
    pub const RUNTIME_FAILURE: i32 = 3;
}

/// Command-line weights override the configured ones.
fn resolve_params(weights: &cli::WeightArgs, config: &SysrecConfig) -> Result<RelevanceParams> {
    let base = config.relevance_params();
    let params = RelevanceParams {
        depth_penalty: weights.depth_penalty.unwrap_or(base.depth_penalty),
        pronom_rarity_weight: weights.pronom_weight.unwrap_or(base.pronom_rarity_weight),
        system_rarity_weight: weights.system_weight.unwrap_or(base.system_rarity_weight),
    };
    params.validate()?;
    Ok(params)
}

fn output_format(format: cli::ReportFormat) -> report::OutputFormat {
    match format {
        cli::ReportFormat::Json => report::OutputFormat::Json,
        cli::ReportFormat::Md => report::OutputFormat::Md,
    }
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    logging::init_logger(cli.verbose, cli.quiet);

    let config_dir = cli.config_dir.clone().unwrap_or_else(|| PathBuf::from("."));
    let config = config::load_config(&config_dir)?.unwrap_or_default();

    match cli.command {
        cli::Commands::Relevance(cmd) => {
            let params = resolve_params(&cmd.weights, &config)?;
            let mut scanned = scan::siegfried::load_report(&cmd.report)?;
            let format_stats = scan::corpus::training_statistics(cmd.training.as_deref())?;
            let catalog = match &cmd.catalog {
                Some(path) => scan::catalog::load_catalog(path)?,
                None => SystemCatalog::new(),
            };

            let analysis =
                analyze::relevance_only(&mut scanned.disk, &format_stats, &catalog, params);
            let built = report::build_report(&scanned, &analysis, &catalog);
            println!("{}", report::render(&built, output_format(cmd.format))?);
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Recommend(cmd) => {
            let params = resolve_params(&cmd.weights, &config)?;
            let target = cmd.target.or(config.selection_target());
            if target == Some(0) {
                return Err(SysrecError::InvalidParameter(
                    "target must be at least 1".to_string(),
                ));
            }

            let mut scanned = scan::siegfried::load_report(&cmd.report)?;
            let format_stats = scan::corpus::training_statistics(cmd.training.as_deref())?;
            let mut catalog = scan::catalog::load_catalog(&cmd.catalog)?;

            let analysis = analyze::recommend(
                &mut scanned.disk,
                &format_stats,
                &mut catalog,
                params,
                target,
            );
            let built = report::build_report(&scanned, &analysis, &catalog);
            println!("{}", report::render(&built, output_format(cmd.format))?);

            let recommended = analysis
                .choice
                .as_ref()
                .is_some_and(|choice| !choice.is_empty());
            if recommended {
                Ok(exit_code::SUCCESS)
            } else {
                warn!(report = %cmd.report.display(), "no system can read the relevant formats");
                Ok(exit_code::NO_RECOMMENDATION)
            }
        }
        cli::Commands::Tune(cmd) => {
            let format_stats = scan::corpus::training_statistics(Some(cmd.training.as_path()))?;
            let catalog = scan::catalog::load_catalog(&cmd.catalog)?;
            let catalog_stats = stats::SystemCatalogStatistics::from_systems(catalog.systems());
            let mut disks = tune::load_labels(&cmd.labels)?;
            let options = config
                .tuning_options()
                .unwrap_or_else(tune::default_grid);

            let outcome = tune::tune(&mut disks, &format_stats, &catalog_stats, &options)?;
            println!(
                "best parameters: depth_penalty {}, pronom_rarity_weight {}, system_rarity_weight {}",
                outcome.best.depth_penalty,
                outcome.best.pronom_rarity_weight,
                outcome.best.system_rarity_weight
            );
            println!("score: {}/{}", outcome.score, outcome.disks);
            Ok(exit_code::SUCCESS)
        }
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
