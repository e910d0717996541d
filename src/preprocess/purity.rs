//! Purity deletion.
//!
//! A literal is pure when its complement occurs in no parsed clause; any
//! clause containing a pure literal is vacuous and removable. The parser
//! records occurrences under the disjunctive reading (right literals
//! themselves, complements of left literals), so the check here is a plain
//! walk over the used flags.

use crate::logic::{ClauseId, LiteralId};
use crate::report;
use crate::state::ProverState;

pub fn purity_deletion(state: &mut ProverState, clauses: &mut Vec<ClauseId>) {
    let mut kept = Vec::with_capacity(clauses.len());
    for &id in clauses.iter() {
        match pure_literal(state, id) {
            Some(pure) => {
                state.stats.purity_deleted += 1;
                report::trace_purity_deletion(state, id, pure);
                state.delete_clause(id);
            }
            None => kept.push(id),
        }
    }
    *clauses = kept;
}

/// The first literal whose absence makes the clause vacuous, if any. For a
/// left literal that is the literal itself; for a right literal it is the
/// unused complement.
fn pure_literal(state: &ProverState, id: ClauseId) -> Option<LiteralId> {
    let clause = state.clause(id);
    for literal in clause.left.iter() {
        if !state.pool.get(literal).is_used() {
            return Some(literal);
        }
    }
    for literal in clause.right.iter() {
        let complement = state.pool.complement(literal);
        if !state.pool.get(complement).is_used() {
            return Some(complement);
        }
    }
    None
}
