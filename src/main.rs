//! Command-line interface for the coalres prover.

use clap::{ArgAction, Parser};
use coalres::{
    parse_input, parse_ordering, report, saturate, Heuristic, LiteralPool, ProverConfig,
    ProverError, ProverState, Verbosity,
};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

/// Decides satisfiability of a set of coalition-logic clauses by saturation
/// under a resolution calculus.
#[derive(Parser, Debug)]
#[command(name = "coalres", version, about, disable_help_flag = true)]
struct Args {
    /// Input clause file
    #[arg(short = 'i', value_name = "FILE")]
    input: PathBuf,

    /// Literal-ordering file
    #[arg(short = 'o', value_name = "FILE")]
    ordering: Option<PathBuf>,

    /// Enable unit propagation
    #[arg(short = 'u', value_name = "BOOL", default_value_t = false,
          default_missing_value = "true", num_args = 0..=1)]
    unit_propagation: bool,

    /// Enable purity deletion
    #[arg(short = 'p', value_name = "BOOL", default_value_t = false,
          default_missing_value = "true", num_args = 0..=1)]
    purity_deletion: bool,

    /// Enable forward subsumption
    #[arg(short = 'f', value_name = "BOOL", default_value_t = true,
          default_missing_value = "true", num_args = 0..=1)]
    forward_subsumption: bool,

    /// Enable backward subsumption
    #[arg(short = 'b', value_name = "BOOL", default_value_t = false,
          default_missing_value = "true", num_args = 0..=1)]
    backward_subsumption: bool,

    /// Display the modality of coalition clauses as the coalition vector
    #[arg(short = 'c', value_name = "BOOL", default_value_t = false,
          default_missing_value = "true", num_args = 0..=1)]
    modality_as_vector: bool,

    /// Display per-rule inference statistics
    #[arg(short = 'x', value_name = "BOOL", default_value_t = false,
          default_missing_value = "true", num_args = 0..=1)]
    extra_statistics: bool,

    /// Verbosity: 0 minimal, 1 default, 2 maximal, 3 debug
    #[arg(short = 'v', value_name = "LEVEL", default_value_t = 1,
          value_parser = clap::value_parser!(u8).range(0..=3))]
    verbosity: u8,

    /// Heuristic: 0 smallest clause first, 1 by clause type
    #[arg(short = 'h', value_name = "HEURISTIC", default_value_t = 0,
          value_parser = clap::value_parser!(u8).range(0..=1))]
    heuristic: u8,

    /// Override the number of agents
    #[arg(short = 'a', value_name = "N",
          value_parser = clap::value_parser!(u64).range(1..))]
    num_agents: Option<u64>,

    /// Print help
    #[arg(long, action = ArgAction::HelpLong)]
    help: Option<bool>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(code) => code,
        Err(error) => {
            eprintln!("coalres error: {error}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<ExitCode, ProverError> {
    let start = Instant::now();

    let config = ProverConfig {
        unit_propagation: args.unit_propagation,
        purity_deletion: args.purity_deletion,
        forward_subsumption: args.forward_subsumption,
        backward_subsumption: args.backward_subsumption,
        modality_as_vector: args.modality_as_vector,
        extra_inference_information: args.extra_statistics,
        verbosity: Verbosity::from_level(args.verbosity),
        heuristic: if args.heuristic == 0 {
            Heuristic::GetNextSmallest
        } else {
            Heuristic::GetNext
        },
        num_agents: args.num_agents.map(|n| n as usize),
    };

    let mut pool = if args.ordering.is_some() {
        LiteralPool::with_ordering()
    } else {
        LiteralPool::new()
    };
    if let Some(path) = &args.ordering {
        let source = fs::read_to_string(path).map_err(|source| ProverError::Io {
            path: path.clone(),
            source,
        })?;
        parse_ordering(&mut pool, &source)?;
    }

    let mut state = ProverState::new(pool, config);
    let source = fs::read_to_string(&args.input).map_err(|source| ProverError::Io {
        path: args.input.clone(),
        source,
    })?;
    let parsed = parse_input(&mut state, &source)?;

    if let Some(contradiction) = parsed.contradiction {
        report::display_parsed_contradiction(&state, contradiction);
        return Ok(ExitCode::SUCCESS);
    }
    if parsed.clauses.is_empty() {
        return Err(ProverError::NoClauses);
    }

    state.pool.rebase_ranks();

    report::display_parsed_clauses(&state, &parsed.clauses);
    report::display_parsed_literals(&state);
    report::display_literal_ordering(&state);

    saturate(&mut state, parsed.clauses);

    report::display_statistics(&state);
    println!(
        "execution finished in {} seconds",
        start.elapsed().as_secs_f64()
    );
    Ok(ExitCode::SUCCESS)
}
