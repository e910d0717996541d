//! The given-clause saturation loop.
//!
//! Three indices with the same feature shape drive the search: a scratch
//! index for self-subsumption, the saturated index of processed clauses and
//! the non-saturated index of pending ones. A clause migrates from
//! non-saturated to saturated exactly once, at the moment it is selected.
//! The loop ends when the empty clause is derived (unsatisfiable) or the
//! non-saturated index runs dry (satisfiable: the saturated set is closed
//! under all inference rules).

use crate::config::{Heuristic, Verbosity};
use crate::index::ClauseIndex;
use crate::inference;
use crate::logic::{ClauseId, ClauseKind};
use crate::preprocess;
use crate::report;
use crate::state::ProverState;
use std::collections::BTreeSet;

/// Outcome of a saturation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Satisfiable,
    Unsatisfiable,
}

/// Per-kind waiting sets for the by-type heuristic, ordered by identifier.
#[derive(Default)]
struct TypeSets {
    universal: BTreeSet<ClauseId>,
    initial: BTreeSet<ClauseId>,
    coalition: BTreeSet<ClauseId>,
}

impl TypeSets {
    fn insert(&mut self, id: ClauseId, kind: ClauseKind) {
        match kind {
            ClauseKind::Universal => self.universal.insert(id),
            ClauseKind::Initial => self.initial.insert(id),
            _ => self.coalition.insert(id),
        };
    }

    fn remove(&mut self, id: ClauseId, kind: ClauseKind) {
        match kind {
            ClauseKind::Universal => self.universal.remove(&id),
            ClauseKind::Initial => self.initial.remove(&id),
            _ => self.coalition.remove(&id),
        };
    }

    /// Smallest identifier of the first non-empty set, preferring universal
    /// over coalition over initial clauses.
    fn pop(&mut self) -> Option<ClauseId> {
        if let Some(&id) = self.universal.iter().next() {
            self.universal.remove(&id);
            return Some(id);
        }
        if let Some(&id) = self.coalition.iter().next() {
            self.coalition.remove(&id);
            return Some(id);
        }
        if let Some(&id) = self.initial.iter().next() {
            self.initial.remove(&id);
            return Some(id);
        }
        None
    }
}

/// Exhaustively apply the inference rules to the parsed clauses until
/// satisfiability is determined.
pub fn saturate(state: &mut ProverState, parsed: Vec<ClauseId>) -> Verdict {
    let num_literals = state.pool.len();
    let mut temp_index = ClauseIndex::new(num_literals);
    let mut saturated_index = ClauseIndex::new(num_literals);
    let mut non_saturated_index = ClauseIndex::new(num_literals);

    report::display_title_at(state, Verbosity::Maximal, "Initial Self Subsumption");
    let mut parsed = inference::initial_self_subsumption(parsed, &mut temp_index, state);

    if state.config.purity_deletion {
        report::display_title_at(state, Verbosity::Maximal, "Purity Deletion");
        preprocess::purity_deletion(state, &mut parsed);
    }
    if state.config.unit_propagation {
        report::display_title_at(state, Verbosity::Maximal, "Unit Propagation");
        preprocess::unit_propagation(state, &mut parsed);
    }

    if let Some(contradiction) = state.contradiction {
        // bottom fell out of preprocessing; the remaining parsed clauses are
        // no longer needed
        saturated_index.insert(contradiction, state);
        for id in parsed {
            if id != contradiction && state.is_live(id) {
                state.delete_clause(id);
            }
        }
    } else {
        for &id in &parsed {
            non_saturated_index.insert(id, state);
        }
        report::display_title_at(state, Verbosity::Maximal, "Resolution");
        log::debug!(
            "saturating {} clauses with heuristic {:?}",
            parsed.len(),
            state.config.heuristic
        );

        match state.config.heuristic {
            Heuristic::GetNextSmallest => {
                while let Some(given) = non_saturated_index.next_smallest() {
                    let stop = saturation_step(
                        state,
                        given,
                        &mut saturated_index,
                        &mut non_saturated_index,
                        &mut temp_index,
                        None,
                    );
                    if stop {
                        break;
                    }
                }
            }
            Heuristic::GetNext => {
                let mut sets = TypeSets::default();
                for &id in &parsed {
                    sets.insert(id, state.clause(id).kind);
                }
                while !non_saturated_index.is_empty() {
                    let given = match sets.pop() {
                        Some(id) => id,
                        None => break,
                    };
                    let stop = saturation_step(
                        state,
                        given,
                        &mut saturated_index,
                        &mut non_saturated_index,
                        &mut temp_index,
                        Some(&mut sets),
                    );
                    if stop {
                        break;
                    }
                }
            }
        }
    }

    if state.config.verbosity >= Verbosity::Default {
        report::display_title("Archived Clauses");
        report::display_archive(state);
        report::display_title("Saturated Clauses");
        report::display_index(state, &saturated_index);
    }

    report::display_title("Result");
    match state.contradiction {
        Some(contradiction) => {
            if state.config.verbosity >= Verbosity::Default {
                println!("Contradiction derived:");
                println!(
                    "{}",
                    state
                        .clause(contradiction)
                        .display(&state.pool, state.config.modality_as_vector)
                );
            }
            println!("Unsatisfiable");
            Verdict::Unsatisfiable
        }
        None => {
            println!("Satisfiable");
            Verdict::Satisfiable
        }
    }
}

/// One iteration of the given-clause loop. Returns true when the
/// contradiction has been derived and the loop must stop.
fn saturation_step(
    state: &mut ProverState,
    given: ClauseId,
    saturated_index: &mut ClauseIndex,
    non_saturated_index: &mut ClauseIndex,
    temp_index: &mut ClauseIndex,
    mut sets: Option<&mut TypeSets>,
) -> bool {
    report::trace_given(state, given);

    non_saturated_index.remove(given, state);
    saturated_index.insert(given, state);

    let mut resolvents = inference::resolve(saturated_index, given, state);
    resolvents = inference::self_subsumption(resolvents, temp_index, state);
    if state.config.forward_subsumption {
        resolvents = inference::subsumption(resolvents, saturated_index, state);
        resolvents = inference::subsumption(resolvents, non_saturated_index, state);
    }
    if state.config.backward_subsumption {
        for removed in [
            inference::backward_subsumption(&resolvents, saturated_index, state),
            inference::backward_subsumption(&resolvents, non_saturated_index, state),
        ] {
            if let Some(sets) = sets.as_deref_mut() {
                for id in removed {
                    sets.remove(id, state.clause(id).kind);
                }
            }
        }
    }

    report::trace_resolvents(state, &resolvents);

    for &id in &resolvents {
        non_saturated_index.insert(id, state);
        if let Some(sets) = sets.as_deref_mut() {
            sets.insert(id, state.clause(id).kind);
        }
    }

    if let Some(contradiction) = state.contradiction {
        saturated_index.insert(contradiction, state);
        return true;
    }
    false
}
