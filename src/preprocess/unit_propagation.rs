//! Pre-saturation unit propagation.
//!
//! A unit clause is an initial or universal clause of size 1. Propagating a
//! unit `p` removes every clause that is satisfied under the disjunctive
//! reading (`p` in the disjunction, or `~p` in the conjunction) and strips
//! the opposite occurrences (`~p` from disjunctions, `p` from conjunctions)
//! everywhere else. Stripping can demote a clause to a fresh unit, empty a
//! coalition clause's disjunction (triggering the RW1/RW2 rewrite), or
//! derive the empty clause outright, which terminates propagation.
//!
//! Initial units propagate only through initial clauses; universal units
//! propagate through clauses of every kind.

use crate::logic::{ClauseId, ClauseKind, Justification, LiteralList, Rule};
use crate::report;
use crate::state::ProverState;
use std::collections::VecDeque;

pub fn unit_propagation(state: &mut ProverState, clauses: &mut Vec<ClauseId>) {
    let mut units: VecDeque<ClauseId> = VecDeque::new();
    clauses.retain(|&id| {
        let clause = state.clause(id);
        let is_unit = matches!(clause.kind, ClauseKind::Initial | ClauseKind::Universal)
            && clause.size() == 1;
        if is_unit {
            units.push_back(id);
        }
        !is_unit
    });

    let mut propagated: Vec<ClauseId> = Vec::new();
    while let Some(unit) = units.pop_front() {
        propagated.push(unit);
        let new_units = propagate_unit(state, clauses, unit);
        units.extend(new_units);

        if state.contradiction.is_some() {
            // hand everything back; the caller discards the survivors
            for id in propagated.into_iter().chain(units) {
                clauses.push(id);
            }
            return;
        }
    }

    for id in propagated {
        clauses.push(id);
    }
}

/// Propagate one unit clause through the non-unit clauses, returning any
/// newly derived units.
fn propagate_unit(
    state: &mut ProverState,
    clauses: &mut Vec<ClauseId>,
    unit: ClauseId,
) -> Vec<ClauseId> {
    let p = match state.clause(unit).right.maximal() {
        Some(literal) => literal,
        None => return Vec::new(),
    };
    let not_p = state.pool.complement(p);
    let unit_is_initial = state.clause(unit).kind == ClauseKind::Initial;

    report::trace_propagating_unit(state, unit);
    log::debug!(
        "propagating unit clause {} over {} clauses",
        unit,
        clauses.len()
    );

    let mut new_units = Vec::new();
    let mut appended = Vec::new();
    let mut dropped = vec![false; clauses.len()];

    for (position, &id) in clauses.iter().enumerate() {
        {
            let clause = state.clause(id);
            if unit_is_initial && clause.kind != ClauseKind::Initial {
                continue;
            }
        }
        let (satisfied, strip_right, strip_left) = {
            let clause = state.clause(id);
            (
                clause.right.contains(p, &state.pool) || clause.left.contains(not_p, &state.pool),
                clause.right.contains(not_p, &state.pool),
                clause.left.contains(p, &state.pool),
            )
        };

        if satisfied {
            state.stats.unit_propagation_clauses_removed += 1;
            report::trace_clause_eliminated(state, id);
            state.clause_mut(id).active = false;
            state.delete_clause(id);
            dropped[position] = true;
            continue;
        }
        if !strip_right && !strip_left {
            continue;
        }

        if strip_right {
            state.stats.unit_propagation_literals_removed += 1;
            report::trace_literal_removed(state, not_p, id);
            let (clause, pool) = state.clause_and_pool_mut(id);
            clause.right.remove(not_p, pool);
        }
        if strip_left {
            state.stats.unit_propagation_literals_removed += 1;
            report::trace_literal_removed(state, p, id);
            let (clause, pool) = state.clause_and_pool_mut(id);
            clause.left.remove(p, pool);
        }

        let (kind, size, right_empty) = {
            let clause = state.clause(id);
            (clause.kind, clause.size(), clause.right.is_empty())
        };
        match kind {
            ClauseKind::Initial | ClauseKind::Universal => {
                if size == 1 {
                    // demoted to a unit; re-enqueue it
                    new_units.push(id);
                    dropped[position] = true;
                }
            }
            ClauseKind::Positive | ClauseKind::Negative => {
                if right_empty {
                    state.stats.rewrites += 1;
                    state.clause_mut(id).active = false;
                    state.archive_clause(id);
                    dropped[position] = true;

                    let rule = if kind == ClauseKind::Positive {
                        Rule::Rw1
                    } else {
                        Rule::Rw2
                    };
                    let left_literals: Vec<_> = state.clause(id).left.iter().collect();
                    let mut right = LiteralList::new();
                    for literal in left_literals {
                        right.insert(state.pool.complement(literal), &state.pool);
                    }
                    let rewritten = state.new_clause(
                        LiteralList::new(),
                        Vec::new(),
                        right,
                        ClauseKind::Universal,
                        Some(Justification::rewrite(id, rule)),
                        None,
                    );
                    report::trace_rewrite(state, id, rewritten);
                    match state.clause(rewritten).size() {
                        0 => state.set_contradiction(rewritten),
                        1 => new_units.push(rewritten),
                        _ => appended.push(rewritten),
                    }
                }
            }
        }
    }

    let mut position = 0;
    clauses.retain(|_| {
        let keep = !dropped[position];
        position += 1;
        keep
    });
    clauses.extend(appended);
    new_units
}
