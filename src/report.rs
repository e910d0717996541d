//! Verbosity-gated output: clause rendering, derivation traces, the final
//! archive/saturation dump and the statistics block.
//!
//! Everything here writes to stdout. The `log` facade is used elsewhere for
//! developer diagnostics; this module is the user-facing surface selected
//! with `-v`.

use crate::config::Verbosity;
use crate::index::ClauseIndex;
use crate::logic::{Clause, ClauseId, LiteralId};
use crate::state::ProverState;

pub const DIVIDER_0: &str =
    "================================================================================";
pub const DIVIDER_1: &str =
    "________________________________________________________________________________";
pub const DIVIDER_2: &str =
    "--------------------------------------------------------------------------------";

pub fn display_title(title: &str) {
    println!("{}", DIVIDER_0);
    println!("       {}", title);
    println!("{}", DIVIDER_0);
}

pub fn display_title_at(state: &ProverState, level: Verbosity, title: &str) {
    if state.config.verbosity >= level {
        display_title(title);
    }
}

fn print_clause(state: &ProverState, clause: &Clause) {
    println!(
        "{}",
        clause.display(&state.pool, state.config.modality_as_vector)
    );
}

fn print_clause_by_id(state: &ProverState, id: ClauseId) {
    print_clause(state, state.clause(id));
}

pub fn display_parsed_clauses(state: &ProverState, clauses: &[ClauseId]) {
    if state.config.verbosity < Verbosity::Maximal {
        return;
    }
    display_title("Parsed Clauses");
    for &id in clauses {
        print_clause_by_id(state, id);
    }
}

pub fn display_parsed_literals(state: &ProverState) {
    if state.config.verbosity < Verbosity::Debug {
        return;
    }
    display_title("Parsed Literals");
    for id in state.pool.ids() {
        let literal = state.pool.get(id);
        println!(
            "Literal {}     [rank: {}, is present: {}]",
            state.pool.display(id),
            literal.rank(),
            literal.is_used()
        );
    }
}

/// The literal ordering, highest rank first.
pub fn display_literal_ordering(state: &ProverState) {
    if state.config.verbosity < Verbosity::Maximal {
        return;
    }
    display_title("Literal Ordering");
    let ids = state.pool.ids_by_descending_rank();
    let rendered: Vec<String> = ids
        .iter()
        .map(|&id| state.pool.display(id).to_string())
        .collect();
    println!("{}", rendered.join(" > "));
}

pub fn trace_given(state: &ProverState, id: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_1);
        println!("Resolving clause:");
        print_clause_by_id(state, id);
    }
}

pub fn trace_resolvents(state: &ProverState, resolvents: &[ClauseId]) {
    if state.config.verbosity < Verbosity::Maximal {
        return;
    }
    println!("Resolvents:");
    if resolvents.is_empty() {
        println!("none");
    }
    for &id in resolvents {
        print_clause_by_id(state, id);
    }
    println!("{}", DIVIDER_1);
}

pub fn trace_tautology(state: &ProverState, given: &Clause, partner: &Clause) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_2);
        println!("Tautology derived by resolving:");
        print_clause(state, given);
        println!("and:");
        print_clause(state, partner);
        println!("{}", DIVIDER_2);
    }
}

pub fn trace_forward_subsumption(state: &ProverState, subsumed: ClauseId, by: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_2);
        println!("Forward subsumption:");
        print_clause_by_id(state, subsumed);
        println!("Subsumed by:");
        print_clause_by_id(state, by);
        println!("{}", DIVIDER_2);
    }
}

pub fn trace_backward_subsumption(state: &ProverState, subsumed: ClauseId, by: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_2);
        println!("Backward subsumption:");
        print_clause_by_id(state, subsumed);
        println!("Subsumed by:");
        print_clause_by_id(state, by);
        println!("{}", DIVIDER_2);
    }
}

pub fn trace_propagating_unit(state: &ProverState, unit: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_1);
        println!("Propagating Unit clause:");
        print_clause_by_id(state, unit);
        println!("{}", DIVIDER_1);
    }
}

pub fn trace_clause_eliminated(state: &ProverState, id: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_2);
        println!("Clause eliminated:");
        print_clause_by_id(state, id);
        println!("{}", DIVIDER_2);
    }
}

pub fn trace_literal_removed(state: &ProverState, literal: LiteralId, from: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_2);
        println!("Removing literal:");
        println!("Literal {}", state.pool.display(literal));
        println!("From clause:");
        print_clause_by_id(state, from);
        println!("{}", DIVIDER_2);
    }
}

pub fn trace_rewrite(state: &ProverState, original: ClauseId, rewritten: ClauseId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_2);
        println!("Rewriting clause:");
        print_clause_by_id(state, original);
        println!("To:");
        print_clause_by_id(state, rewritten);
        println!("{}", DIVIDER_2);
    }
}

pub fn trace_purity_deletion(state: &ProverState, id: ClauseId, pure: LiteralId) {
    if state.config.verbosity >= Verbosity::Maximal {
        println!("{}", DIVIDER_1);
        println!("Deleting clause:");
        print_clause_by_id(state, id);
        println!("No occurrences in parsed clauses of:");
        println!("Literal {}", state.pool.display(pure));
        println!("{}", DIVIDER_1);
    }
}

/// Archived clauses in ascending identifier order.
pub fn display_archive(state: &ProverState) {
    let mut ids = state.archive.clone();
    ids.sort_unstable();
    for id in ids {
        print_clause_by_id(state, id);
    }
}

/// Clauses of an index in ascending identifier order.
pub fn display_index(state: &ProverState, index: &ClauseIndex) {
    let mut ids = index.ids();
    ids.sort_unstable();
    for id in ids {
        print_clause_by_id(state, id);
    }
}

/// The "Result" section for a contradiction found while parsing.
pub fn display_parsed_contradiction(state: &ProverState, id: ClauseId) {
    display_title("Result");
    if state.config.verbosity >= Verbosity::Default {
        println!("Contradiction parsed:");
        print_clause_by_id(state, id);
    }
    println!("Not satisfiable");
}

/// The final statistics block. Conditional lines only appear when the
/// corresponding feature ran.
pub fn display_statistics(state: &ProverState) {
    let stats = &state.stats;
    if state.config.extra_inference_information {
        println!("Applications of IRES1: {}", stats.ires1);
        println!("Applications of GRES1: {}", stats.gres1);
        println!("Applications of CRES1: {}", stats.cres1);
        println!("Applications of CRES2: {}", stats.cres2);
        println!("Applications of CRES3: {}", stats.cres3);
        println!("Applications of CRES4: {}", stats.cres4);
        println!("Applications of CRES5: {}", stats.cres5);
        println!("Tautologies derived: {}", stats.tautologies);
    }
    println!("Total inferences: {}", stats.total_inferences());
    println!("Forward subsumed clauses: {}", stats.forward_subsumed);
    if state.config.backward_subsumption {
        println!("Backward subsumed clauses: {}", stats.backward_subsumed);
    }
    println!("Rewritten clauses: {}", stats.rewrites);
    if state.config.purity_deletion {
        println!(
            "Clauses eliminated in purity deletion: {}",
            stats.purity_deleted
        );
    }
    if state.config.unit_propagation {
        println!(
            "Clauses eliminated in unit propagation: {}",
            stats.unit_propagation_clauses_removed
        );
        println!(
            "Literals eliminated in unit propagation: {}",
            stats.unit_propagation_literals_removed
        );
    }
}
