use clap::{Args, Parser, Subcommand};

use super::types::PlanFormat;

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Deterministic parameter-sweep planner for Kafka performance test suites - mixed-radix grid enumeration, saturation-aware skip-ahead, and reproducible test identifiers."
)]
pub struct SweepArgs {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose (debug-level) logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Enumerate every test configuration of a specification
    Plan(PlanArgs),
    /// Print the credit-depletion parameters for the first configuration
    Depletion(DepletionArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PlanArgs {
    /// Path to the test specification file (.toml or .json)
    #[arg(long, short = 's', env = "KSWEEP_SPEC")]
    pub spec: String,

    /// Seed for the id generator; fixed seeds give reproducible plans
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output format
    #[arg(long, default_value = "jsonl", ignore_case = true)]
    pub format: PlanFormat,

    /// Override the step safety cap (defaults to the grid's combination count)
    #[arg(long = "max-steps")]
    pub max_steps: Option<u64>,
}

#[derive(Debug, Args, Clone)]
pub struct DepletionArgs {
    /// Path to the test specification file (.toml or .json)
    #[arg(long, short = 's', env = "KSWEEP_SPEC")]
    pub spec: String,

    /// Seed for the id generator; fixed seeds give reproducible output
    #[arg(long)]
    pub seed: Option<u64>,
}
