//! coalres: a resolution-based satisfiability prover for the clausal normal
//! form of Coalition Logic with multiple agents.
//!
//! Given a finite set of clauses the prover decides satisfiability by
//! exhaustive application of a resolution calculus with seven inference
//! rules and two rewrite rules, using a given-clause saturation loop over
//! feature-indexed clause stores.

pub mod config;
pub mod error;
pub mod index;
pub mod inference;
pub mod logic;
pub mod parser;
pub mod preprocess;
pub mod report;
pub mod saturation;
pub mod state;
pub mod stats;

pub use config::{Heuristic, ProverConfig, Verbosity};
pub use error::{ProverError, Result};
pub use index::ClauseIndex;
pub use logic::{Clause, ClauseId, ClauseKind, Justification, LiteralId, LiteralPool, Rule};
pub use parser::{parse_input, parse_ordering, ParsedInput};
pub use saturation::{saturate, Verdict};
pub use state::ProverState;
pub use stats::Statistics;
