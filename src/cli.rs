use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "hackjudge",
    version,
    about = "Automated evaluation and ranking of hackathon submissions"
)]
pub struct Cli {
    /// Increase verbosity (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Evaluate(EvaluateCommand),
    Analyze(AnalyzeCommand),
    Report(ReportCommand),
    Info(InfoCommand),
}

#[derive(Clone, Debug, ValueEnum)]
pub enum ReportFormat {
    Json,
    Md,
    Both,
}

#[derive(Args)]
pub struct EvaluateCommand {
    /// Path to the submissions CSV file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for reports
    #[arg(short, long)]
    pub output: PathBuf,

    /// Directory of local checkouts, one `owner__repo` subdirectory per
    /// submission. Projects without a checkout are scored from CSV signals
    /// only.
    #[arg(long)]
    pub repos: Option<PathBuf>,

    /// Evaluate at most this many projects (0 = all)
    #[arg(long, default_value_t = 0)]
    pub limit: usize,

    #[arg(short, long, value_enum, default_value = "both")]
    pub format: ReportFormat,

    /// Directory holding judge.toml (defaults to the current directory)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    /// Local repository to analyze
    pub path: PathBuf,

    /// Project name override (defaults to the directory name)
    #[arg(long)]
    pub name: Option<String>,

    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}

#[derive(Args)]
pub struct ReportCommand {
    /// Path to a previously exported rankings.json
    #[arg(short, long)]
    pub input: PathBuf,

    /// Output directory for regenerated reports
    #[arg(short, long)]
    pub output: PathBuf,

    #[arg(short, long, value_enum, default_value = "md")]
    pub format: ReportFormat,
}

#[derive(Args)]
pub struct InfoCommand {
    #[arg(long)]
    pub config_dir: Option<PathBuf>,
}
