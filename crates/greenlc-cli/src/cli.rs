use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "greenlc - Scores the environmental impact of liquid-chromatography methods and ranks alternatives.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads used when several methods are evaluated at once.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Score one method document and write the detailed report.
    Evaluate(EvaluateArgs),
    /// Rank several methods (reports or input documents) by total score.
    Compare(CompareArgs),
    /// List the built-in weighting schemes.
    Schemes(SchemesArgs),
    /// List reagent factor rows with their raw S/H/E sums.
    Reagents(ReagentsArgs),
}

/// Scoring options shared by `evaluate` and `compare`.
#[derive(Args, Debug, Default, Clone)]
pub struct ScoringArgs {
    /// Path to a scoring configuration file in TOML format.
    #[arg(short, long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Final weighting scheme, overriding the document's `weightingScheme`.
    #[arg(long, value_name = "NAME")]
    pub scheme: Option<String>,

    /// Safety sub-factor scheme (e.g., 'Personnel_Exposure').
    #[arg(long, value_name = "NAME")]
    pub safety_scheme: Option<String>,

    /// Health sub-factor scheme (e.g., 'Absolute_Balance').
    #[arg(long, value_name = "NAME")]
    pub health_scheme: Option<String>,

    /// Environment sub-factor scheme (e.g., 'Degradation_Priority').
    #[arg(long, value_name = "NAME")]
    pub environment_scheme: Option<String>,

    /// Stage-score scheme (e.g., 'Safety_First').
    #[arg(long, value_name = "NAME")]
    pub stage_scheme: Option<String>,

    /// Number of trapezoid samples per gradient segment.
    #[arg(long, value_name = "NUM")]
    pub samples: Option<usize>,

    /// Which gradient step owns a segment's curve and flow rate: 'leading' or 'trailing'.
    #[arg(long, value_name = "CONVENTION")]
    pub convention: Option<String>,

    /// Reagent factor table (CSV, TOML, or JSON) that replaces the document's own rows.
    #[arg(long, value_name = "PATH")]
    pub factors: Option<PathBuf>,

    /// Reagent data-sheet profiles (TOML or JSON). Their derived rows take precedence over the
    /// factor table.
    #[arg(long, value_name = "PATH")]
    pub profiles: Option<PathBuf>,

    /// Fill reagents missing from the factor table with the built-in reference values.
    #[arg(long)]
    pub builtin_factors: bool,

    /// Override any configuration value.
    /// Format: `KEY=VALUE` (e.g., `-S integration.samples=500`).
    #[arg(short = 'S', long = "set", value_name = "KEY=VALUE", num_args(0..))]
    pub set_values: Vec<String>,
}

/// Arguments for the `evaluate` subcommand.
#[derive(Args, Debug)]
pub struct EvaluateArgs {
    /// Path to the input document (reagent factors, method configuration, gradient).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub input: PathBuf,

    /// Path for the JSON score report. Printed to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Print a human-readable summary of the scores.
    #[arg(long)]
    pub summary: bool,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `compare` subcommand.
#[derive(Args, Debug)]
pub struct CompareArgs {
    /// Documents to compare, each `PATH` or `LABEL=PATH`. A document with a `final`
    /// section is taken as a score result; anything else is evaluated first.
    #[arg(required = true, value_name = "[LABEL=]PATH")]
    pub entries: Vec<String>,

    /// Path for the JSON comparison.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,

    #[command(flatten)]
    pub scoring: ScoringArgs,
}

/// Arguments for the `schemes` subcommand.
#[derive(Args, Debug)]
pub struct SchemesArgs {
    /// Only list one category: safety, health, environment, stage, or final.
    #[arg(long, value_name = "CATEGORY")]
    pub category: Option<String>,

    /// Print the catalog as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Arguments for the `reagents` subcommand.
#[derive(Args, Debug)]
pub struct ReagentsArgs {
    /// List the rows of this factor table (CSV, TOML, or JSON) instead of the built-in one.
    #[arg(long, value_name = "PATH")]
    pub factors: Option<PathBuf>,

    /// List rows derived from these data-sheet profiles (TOML or JSON).
    #[arg(long, value_name = "PATH", conflicts_with = "factors")]
    pub profiles: Option<PathBuf>,

    /// Print the rows as JSON.
    #[arg(long)]
    pub json: bool,
}
