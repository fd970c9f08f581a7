use std::path::Path;

use clap::Parser;

use crate::args::{Command, DepletionArgs, PlanArgs, PlanFormat, SweepArgs};
use crate::error::AppResult;
use crate::spec::load_spec;
use crate::sweep::{MaterializedParameters, StepOutcome, SweepSession, TestSpec};

/// CLI entry point.
///
/// # Errors
///
/// Returns an error when argument parsing, specification loading, or the
/// sweep itself fails.
pub fn run() -> AppResult<()> {
    let args = SweepArgs::parse();
    crate::logger::init_logging(args.verbose);

    match args.command {
        Command::Plan(plan) => run_plan(&plan),
        Command::Depletion(depletion) => run_depletion(&depletion),
    }
}

fn run_plan(args: &PlanArgs) -> AppResult<()> {
    let spec = load_spec(Path::new(&args.spec))?;
    tracing::info!(
        dimensions = spec.grid.len(),
        combinations = spec.grid.combination_count(),
        "Loaded test specification"
    );

    let mut session = new_session(spec, args.seed);
    if let Some(limit) = args.max_steps {
        session = session.with_step_limit(limit);
    }

    // Skip-ahead needs feedback from executed tests; a plan enumerates the
    // full grid, so no feedback is supplied.
    let mut configurations: Vec<MaterializedParameters> = Vec::new();
    loop {
        match session.advance(None)? {
            StepOutcome::NextTest(parameters) => {
                tracing::debug!(
                    topic = %parameters.topic_name,
                    throughput_mb_per_sec = parameters.cluster_throughput_mb_per_sec,
                    num_producers = parameters.num_producers,
                    "Planned test"
                );
                configurations.push(parameters);
            }
            StepOutcome::Completed => break,
        }
    }

    match args.format {
        PlanFormat::Json => println!("{}", serde_json::to_string_pretty(&configurations)?),
        PlanFormat::Jsonl => {
            for parameters in &configurations {
                println!("{}", serde_json::to_string(parameters)?);
            }
        }
        PlanFormat::Count => println!("{}", configurations.len()),
    }

    tracing::info!(tests = configurations.len(), "Sweep plan complete");
    Ok(())
}

fn run_depletion(args: &DepletionArgs) -> AppResult<()> {
    let spec = load_spec(Path::new(&args.spec))?;
    let mut session = new_session(spec, args.seed);
    // Depletion parameters are derived from a test in flight; seed the
    // session with the first configuration.
    session.advance(None)?;
    let parameters = session.depletion_parameters()?;
    println!("{}", serde_json::to_string_pretty(&parameters)?);
    Ok(())
}

fn new_session(spec: TestSpec, seed: Option<u64>) -> SweepSession {
    match seed {
        Some(seed) => SweepSession::with_seed(spec, seed),
        None => SweepSession::new(spec),
    }
}
