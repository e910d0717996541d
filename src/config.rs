//! Prover configuration types.

use serde::{Deserialize, Serialize};

/// Output verbosity levels, from a bare satisfiability verdict up to
/// debug-level parser tracing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Verbosity {
    /// Output satisfiability only
    Minimal,
    /// Output satisfiability and clauses
    Default,
    /// Output satisfiability, clauses and the derivation
    Maximal,
    /// Debug level output
    Debug,
}

impl Verbosity {
    pub fn from_level(level: u8) -> Self {
        match level {
            0 => Verbosity::Minimal,
            1 => Verbosity::Default,
            2 => Verbosity::Maximal,
            _ => Verbosity::Debug,
        }
    }
}

/// Given-clause selection heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Heuristic {
    /// Pick the clause with the smallest feature-space position.
    GetNextSmallest,
    /// Pick by clause type: universal before coalition before initial,
    /// smallest identifier first within each.
    GetNext,
}

/// Configuration for a prover run.
#[derive(Debug, Clone)]
pub struct ProverConfig {
    pub unit_propagation: bool,
    pub purity_deletion: bool,
    pub forward_subsumption: bool,
    pub backward_subsumption: bool,
    /// Render the modality of coalition clauses as the raw coalition vector.
    pub modality_as_vector: bool,
    /// Print per-rule inference counts in the statistics block.
    pub extra_inference_information: bool,
    pub verbosity: Verbosity,
    pub heuristic: Heuristic,
    /// Override for the number of agents; ignored unless it exceeds the
    /// number of distinct agents in the input.
    pub num_agents: Option<usize>,
}

impl Default for ProverConfig {
    fn default() -> Self {
        ProverConfig {
            unit_propagation: false,
            purity_deletion: false,
            forward_subsumption: true,
            backward_subsumption: false,
            modality_as_vector: false,
            extra_inference_information: false,
            verbosity: Verbosity::Default,
            heuristic: Heuristic::GetNextSmallest,
            num_agents: None,
        }
    }
}
