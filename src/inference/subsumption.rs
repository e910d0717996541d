//! Redundancy elimination: forward, self- and backward subsumption.
//!
//! All passes drive the same rectangle queries on a clause index. Forward
//! passes look for stored clauses that could subsume a query clause (smaller
//! or equal maximal rank and size); the backward pass looks for stored
//! clauses the query could subsume (larger or equal on both features).

use crate::index::ClauseIndex;
use crate::logic::{Clause, ClauseId, ClauseKind};
use crate::report;
use crate::state::ProverState;

/// Stable sort by kind, then disjunction size, then conjunction size, then
/// agent count.
pub fn sort_clause_list(ids: &mut [ClauseId], state: &ProverState) {
    ids.sort_by_key(|&id| state.clause(id).ordering_key());
}

/// Index query for clauses that could subsume `clause`. For coalition
/// clauses the candidate set is the union of universal clauses no larger
/// than the disjunction and same-kind clauses no larger than the clause.
fn forward_candidates(
    clause: &Clause,
    index: &ClauseIndex,
    state: &ProverState,
) -> Vec<ClauseId> {
    let rank = clause
        .right
        .maximal()
        .map_or(0, |literal| state.pool.rank(literal));
    match clause.kind {
        ClauseKind::Initial => index.filter_by_max_literal_and_length(
            rank,
            clause.size(),
            &[ClauseKind::Initial, ClauseKind::Universal],
        ),
        ClauseKind::Universal => {
            index.filter_by_max_literal_and_length(rank, clause.size(), &[ClauseKind::Universal])
        }
        ClauseKind::Positive | ClauseKind::Negative => {
            let mut candidates = index.filter_by_max_literal_and_length(
                rank,
                clause.right.len(),
                &[ClauseKind::Universal],
            );
            candidates.extend(index.filter_by_max_literal_and_length(
                rank,
                clause.size(),
                &[clause.kind],
            ));
            candidates
        }
    }
}

fn is_forward_subsumed(
    id: ClauseId,
    index: &ClauseIndex,
    state: &ProverState,
    initial: bool,
) -> Option<ClauseId> {
    let clause = state.clause(id);
    for candidate in forward_candidates(clause, index, state) {
        let by = state.clause(candidate);
        let subsumed = if initial {
            by.initial_subsumes(clause, &state.pool)
        } else {
            by.subsumes(clause, &state.pool)
        };
        if subsumed {
            return Some(candidate);
        }
    }
    None
}

/// Forward subsumption against an existing index. Subsumed clauses are
/// discarded and freed; survivors are returned in order.
pub fn subsumption(
    ids: Vec<ClauseId>,
    index: &ClauseIndex,
    state: &mut ProverState,
) -> Vec<ClauseId> {
    let mut survivors = Vec::with_capacity(ids.len());
    for id in ids {
        match is_forward_subsumed(id, index, state, false) {
            Some(by) => {
                state.stats.forward_subsumed += 1;
                report::trace_forward_subsumption(state, id, by);
                state.delete_clause(id);
            }
            None => survivors.push(id),
        }
    }
    survivors
}

/// Self-subsumption through a scratch index: sort, then walk in order,
/// checking each clause only against the survivors seen so far. The scratch
/// index is emptied again before returning. Filters duplicates and
/// internally redundant clauses before they reach the saturation indices.
pub fn self_subsumption(
    mut ids: Vec<ClauseId>,
    temp_index: &mut ClauseIndex,
    state: &mut ProverState,
) -> Vec<ClauseId> {
    self_subsumption_with(&mut ids, temp_index, state, false);
    ids
}

/// Self-subsumption for parsed clauses, before coalition vectors exist.
pub fn initial_self_subsumption(
    mut ids: Vec<ClauseId>,
    temp_index: &mut ClauseIndex,
    state: &mut ProverState,
) -> Vec<ClauseId> {
    self_subsumption_with(&mut ids, temp_index, state, true);
    ids
}

fn self_subsumption_with(
    ids: &mut Vec<ClauseId>,
    temp_index: &mut ClauseIndex,
    state: &mut ProverState,
    initial: bool,
) {
    sort_clause_list(ids, state);
    let mut survivors = Vec::with_capacity(ids.len());
    for &id in ids.iter() {
        match is_forward_subsumed(id, temp_index, state, initial) {
            Some(by) => {
                state.stats.forward_subsumed += 1;
                report::trace_forward_subsumption(state, id, by);
                state.delete_clause(id);
            }
            None => {
                temp_index.insert(id, state);
                survivors.push(id);
            }
        }
    }
    for &id in &survivors {
        temp_index.remove(id, state);
    }
    *ids = survivors;
}

/// Backward subsumption: remove from `index` every stored clause subsumed by
/// one of `ids`. Subsumed clauses are archived, not freed, and their ids are
/// returned so the caller can keep any selection bookkeeping in sync.
pub fn backward_subsumption(
    ids: &[ClauseId],
    index: &mut ClauseIndex,
    state: &mut ProverState,
) -> Vec<ClauseId> {
    let mut all_removed = Vec::new();
    for &id in ids {
        let clause = state.clause(id);
        let rank = clause
            .right
            .maximal()
            .map_or(0, |literal| state.pool.rank(literal));
        let kinds: &[ClauseKind] = match clause.kind {
            ClauseKind::Initial => &[ClauseKind::Initial],
            ClauseKind::Universal => &[
                ClauseKind::Initial,
                ClauseKind::Universal,
                ClauseKind::Positive,
                ClauseKind::Negative,
            ],
            ClauseKind::Positive => &[ClauseKind::Positive],
            ClauseKind::Negative => &[ClauseKind::Negative],
        };
        let candidates = index.filter_by_min_literal_and_length(rank, clause.size(), kinds);

        let mut removed = Vec::new();
        for candidate in candidates {
            if state.clause(id).subsumes(state.clause(candidate), &state.pool) {
                state.stats.backward_subsumed += 1;
                report::trace_backward_subsumption(state, candidate, id);
                state.archive_clause(candidate);
                removed.push(candidate);
            }
        }
        for &candidate in &removed {
            index.remove(candidate, state);
        }
        all_removed.extend(removed);
    }
    all_removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ProverConfig;
    use crate::logic::{LiteralList, LiteralPool};

    fn state_with(names: &[&str]) -> ProverState {
        let mut pool = LiteralPool::new();
        for name in names {
            pool.intern(name, true);
        }
        ProverState::new(pool, ProverConfig::default())
    }

    fn universal(state: &mut ProverState, names: &[&str]) -> ClauseId {
        let mut right = LiteralList::new();
        for name in names {
            let lit = state.pool.intern(name, true);
            right.insert(lit, &state.pool);
        }
        state.new_clause(
            LiteralList::new(),
            Vec::new(),
            right,
            ClauseKind::Universal,
            None,
            None,
        )
    }

    #[test]
    fn forward_subsumption_discards_wider_clauses() {
        let mut state = state_with(&["p", "q"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let unit = universal(&mut state, &["p"]);
        index.insert(unit, &mut state);

        let wide = universal(&mut state, &["p", "q"]);
        let kept = subsumption(vec![wide], &index, &mut state);
        assert!(kept.is_empty());
        assert_eq!(state.stats.forward_subsumed, 1);
        assert!(!state.is_live(wide));
    }

    #[test]
    fn self_subsumption_keeps_one_of_two_duplicates() {
        let mut state = state_with(&["p", "q"]);
        let mut temp = ClauseIndex::new(state.pool.len());
        let a = universal(&mut state, &["p", "q"]);
        let b = universal(&mut state, &["p", "q"]);
        let c = universal(&mut state, &["p"]);
        let kept = self_subsumption(vec![a, b, c], &mut temp, &mut state);
        // the unit sorts first and subsumes both larger duplicates
        assert_eq!(kept, vec![c]);
        assert_eq!(state.stats.forward_subsumed, 2);
        assert!(temp.is_empty());
    }

    #[test]
    fn backward_subsumption_archives_stored_clauses() {
        let mut state = state_with(&["p", "q"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let wide = universal(&mut state, &["p", "q"]);
        index.insert(wide, &mut state);

        let unit = universal(&mut state, &["p"]);
        let removed = backward_subsumption(&[unit], &mut index, &mut state);
        assert_eq!(removed, vec![wide]);
        assert!(index.is_empty());
        assert_eq!(state.stats.backward_subsumed, 1);
        assert_eq!(state.archive, vec![wide]);
        assert!(state.is_live(wide));
    }
}
