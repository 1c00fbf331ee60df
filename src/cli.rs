use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "sysrec",
    version,
    about = "Recommend emulation systems for a disk image from its Siegfried scan"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Directory holding sysrec.toml (defaults to the current directory)
    #[arg(long, global = true)]
    pub config_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Score the formats found on a disk
    Relevance(RelevanceCommand),
    /// Score the formats and rank the catalog's systems
    Recommend(RecommendCommand),
    /// Search the parameter grid against labeled disks
    Tune(TuneCommand),
}

#[derive(Args, Clone)]
pub struct WeightArgs {
    #[arg(long)]
    pub depth_penalty: Option<f64>,
    #[arg(long)]
    pub pronom_weight: Option<f64>,
    #[arg(long)]
    pub system_weight: Option<f64>,
}

#[derive(Args)]
pub struct RelevanceCommand {
    /// Siegfried JSON report of the disk
    pub report: PathBuf,
    /// Directory of Siegfried reports used as training corpus
    #[arg(long)]
    pub training: Option<PathBuf>,
    /// System catalog (TOML) used for the support adjustment
    #[arg(long)]
    pub catalog: Option<PathBuf>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub weights: WeightArgs,
}

#[derive(Args)]
pub struct RecommendCommand {
    pub report: PathBuf,
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub training: Option<PathBuf>,
    /// Number of systems to aim for (default: 5% of the catalog)
    #[arg(long)]
    pub target: Option<usize>,
    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
    #[command(flatten)]
    pub weights: WeightArgs,
}

#[derive(Args)]
pub struct TuneCommand {
    /// TOML file with [[disk]] entries (report, expected)
    pub labels: PathBuf,
    #[arg(long)]
    pub catalog: PathBuf,
    #[arg(long)]
    pub training: PathBuf,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
}
