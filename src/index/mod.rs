//! Feature-discriminated clause store.
//!
//! Clauses are bucketed by their three-feature vector (kind, rank of the
//! maximal right literal, total size). The table is a fixed rectangle of
//! `4 × (max_rank + 1) × (max_size + 1)` buckets; the `+1` slots at rank 0
//! and size 0 hold the empty clause. Insertion, removal and exact lookup are
//! O(1); the filter queries scan a rectangle of the feature space rather
//! than the clause population.
//!
//! If clause `C` subsumes `C'` then `C.max_right <= C'.max_right` and
//! `|C| <= |C'|`, which is what makes the rectangle scans sound candidate
//! filters for the subsumption passes.
//!
//! A stored clause carries its bucket position as a back-pointer; removal
//! swap-removes inside the bucket and patches the back-pointer of the clause
//! that moved.

use crate::logic::{ClauseId, ClauseKind, NUM_CLAUSE_KINDS};
use crate::state::ProverState;

pub struct ClauseIndex {
    /// Highest representable rank feature (the pool size).
    max_rank: usize,
    /// Highest representable size feature.
    max_size: usize,
    /// Live-clause count per kind.
    kind_counts: [usize; NUM_CLAUSE_KINDS],
    /// Live-clause count per (kind, rank).
    rank_counts: Vec<usize>,
    buckets: Vec<Vec<ClauseId>>,
    num_clauses: usize,
    /// Largest clause size ever inserted; bounds the min-filter scan.
    max_clause_len: usize,
}

impl ClauseIndex {
    /// Index sized for a pool of `num_literals` literals: ranks and clause
    /// sizes both range over `0..=num_literals`.
    pub fn new(num_literals: usize) -> Self {
        let ranks = num_literals + 1;
        let sizes = num_literals + 1;
        ClauseIndex {
            max_rank: num_literals,
            max_size: num_literals,
            kind_counts: [0; NUM_CLAUSE_KINDS],
            rank_counts: vec![0; NUM_CLAUSE_KINDS * ranks],
            buckets: vec![Vec::new(); NUM_CLAUSE_KINDS * ranks * sizes],
            num_clauses: 0,
            max_clause_len: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.num_clauses
    }

    pub fn is_empty(&self) -> bool {
        self.num_clauses == 0
    }

    fn bucket_index(&self, kind: usize, rank: usize, size: usize) -> usize {
        (kind * (self.max_rank + 1) + rank) * (self.max_size + 1) + size
    }

    pub fn insert(&mut self, id: ClauseId, state: &mut ProverState) {
        let [kind, rank, size] = state.clause(id).features(&state.pool);
        let bucket = self.bucket_index(kind, rank, size);
        let position = self.buckets[bucket].len();
        self.buckets[bucket].push(id);
        state.clause_mut(id).bucket_pos = Some(position);
        self.kind_counts[kind] += 1;
        self.rank_counts[kind * (self.max_rank + 1) + rank] += 1;
        self.num_clauses += 1;
        if size > self.max_clause_len {
            self.max_clause_len = size;
        }
    }

    pub fn remove(&mut self, id: ClauseId, state: &mut ProverState) {
        let position = match state.clause(id).bucket_pos {
            Some(position) => position,
            // not stored in an index, nothing to do
            None => return,
        };
        let [kind, rank, size] = state.clause(id).features(&state.pool);
        let bucket = self.bucket_index(kind, rank, size);
        self.buckets[bucket].swap_remove(position);
        if let Some(&moved) = self.buckets[bucket].get(position) {
            state.clause_mut(moved).bucket_pos = Some(position);
        }
        state.clause_mut(id).bucket_pos = None;
        self.kind_counts[kind] -= 1;
        self.rank_counts[kind * (self.max_rank + 1) + rank] -= 1;
        self.num_clauses -= 1;
    }

    fn collect_bucket(&self, kind: usize, rank: usize, size: usize, out: &mut Vec<ClauseId>) {
        if self.rank_counts[kind * (self.max_rank + 1) + rank] == 0 {
            return;
        }
        out.extend_from_slice(&self.buckets[self.bucket_index(kind, rank, size)]);
    }

    /// All clauses of the given kinds whose maximal right literal has exactly
    /// the given rank.
    pub fn filter_by_max_literal(&self, rank: usize, kinds: &[ClauseKind]) -> Vec<ClauseId> {
        let mut out = Vec::new();
        for &kind in kinds {
            for size in 0..=self.max_size {
                self.collect_bucket(kind.ordinal(), rank, size, &mut out);
            }
        }
        out
    }

    /// Candidates that could subsume a query clause: maximal rank at most
    /// `rank`, size at most `len`.
    pub fn filter_by_max_literal_and_length(
        &self,
        rank: usize,
        len: usize,
        kinds: &[ClauseKind],
    ) -> Vec<ClauseId> {
        let mut out = Vec::new();
        for size in 0..=len.min(self.max_size) {
            for &kind in kinds {
                for r in 0..=rank.min(self.max_rank) {
                    self.collect_bucket(kind.ordinal(), r, size, &mut out);
                }
            }
        }
        out
    }

    /// Candidates that a query clause could subsume: maximal rank at least
    /// `rank`, size at least `len`. The scan stops at the largest size ever
    /// inserted.
    pub fn filter_by_min_literal_and_length(
        &self,
        rank: usize,
        len: usize,
        kinds: &[ClauseKind],
    ) -> Vec<ClauseId> {
        let mut out = Vec::new();
        for size in len..=self.max_clause_len.min(self.max_size) {
            for &kind in kinds {
                for r in rank..=self.max_rank {
                    self.collect_bucket(kind.ordinal(), r, size, &mut out);
                }
            }
        }
        out
    }

    /// Walk the feature space in increasing total-size order and return the
    /// first stored clause. Cost is bounded by the feature-space size, not
    /// the clause count.
    pub fn next_smallest(&self) -> Option<ClauseId> {
        if self.num_clauses == 0 {
            return None;
        }
        for size in 1..=self.max_size {
            for kind in 0..NUM_CLAUSE_KINDS {
                if self.kind_counts[kind] == 0 {
                    continue;
                }
                for rank in 1..=self.max_rank {
                    if self.rank_counts[kind * (self.max_rank + 1) + rank] == 0 {
                        continue;
                    }
                    let bucket = &self.buckets[self.bucket_index(kind, rank, size)];
                    if let Some(&id) = bucket.first() {
                        return Some(id);
                    }
                }
            }
        }
        None
    }

    /// All stored clause ids, in bucket order.
    pub fn ids(&self) -> Vec<ClauseId> {
        let mut out = Vec::with_capacity(self.num_clauses);
        for bucket in &self.buckets {
            out.extend_from_slice(bucket);
        }
        out
    }
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
    fn insert_sets_back_pointer_and_counts() {
        let mut state = state_with(&["p", "q"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let a = universal(&mut state, &["p"]);
        let b = universal(&mut state, &["p", "q"]);
        index.insert(a, &mut state);
        index.insert(b, &mut state);
        assert_eq!(index.len(), 2);
        assert_eq!(state.clause(a).bucket_pos, Some(0));
        let features = state.clause(a).features(&state.pool);
        let bucket = index.bucket_index(features[0], features[1], features[2]);
        assert_eq!(index.buckets[bucket], vec![a]);
    }

    #[test]
    fn remove_then_insert_is_observationally_equal() {
        let mut state = state_with(&["p", "q", "r"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let ids: Vec<ClauseId> = (0..3)
            .map(|i| universal(&mut state, &[["p", "q", "r"][i]]))
            .collect();
        for &id in &ids {
            index.insert(id, &mut state);
        }
        let before: std::collections::BTreeSet<_> = index.ids().into_iter().collect();
        let smallest_before = index.next_smallest();

        index.remove(ids[1], &mut state);
        assert_eq!(state.clause(ids[1]).bucket_pos, None);
        index.insert(ids[1], &mut state);

        let after: std::collections::BTreeSet<_> = index.ids().into_iter().collect();
        assert_eq!(before, after);
        assert_eq!(index.len(), 3);
        assert_eq!(index.next_smallest(), smallest_before);
    }

    #[test]
    fn removing_unstored_clause_is_a_no_op() {
        let mut state = state_with(&["p"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let a = universal(&mut state, &["p"]);
        index.remove(a, &mut state);
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn max_filter_is_sound() {
        let mut state = state_with(&["p", "q", "r"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let small = universal(&mut state, &["p"]);
        let medium = universal(&mut state, &["p", "q"]);
        let large = universal(&mut state, &["p", "q", "r"]);
        for &id in &[small, medium, large] {
            index.insert(id, &mut state);
        }
        let q_id = state.pool.intern("q", true);
        let rank_q = state.pool.rank(q_id);
        let found = index.filter_by_max_literal_and_length(rank_q, 2, &[ClauseKind::Universal]);
        for &id in &found {
            let clause = state.clause(id);
            assert_eq!(clause.kind, ClauseKind::Universal);
            assert!(clause.size() <= 2);
            let max = clause.right.maximal().unwrap();
            assert!(state.pool.rank(max) <= rank_q);
        }
        assert!(found.contains(&small));
        assert!(found.contains(&medium));
        assert!(!found.contains(&large));
    }

    #[test]
    fn min_filter_finds_larger_clauses() {
        let mut state = state_with(&["p", "q", "r"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let small = universal(&mut state, &["p"]);
        let large = universal(&mut state, &["p", "q", "r"]);
        index.insert(small, &mut state);
        index.insert(large, &mut state);
        let p_id = state.pool.intern("p", true);
        let rank_p = state.pool.rank(p_id);
        let found = index.filter_by_min_literal_and_length(rank_p, 2, &[ClauseKind::Universal]);
        assert!(found.contains(&large));
        assert!(!found.contains(&small));
    }

    #[test]
    fn next_smallest_prefers_small_then_kind_order() {
        let mut state = state_with(&["p", "q"]);
        let mut index = ClauseIndex::new(state.pool.len());
        let big = universal(&mut state, &["p", "q"]);
        let unit = universal(&mut state, &["q"]);
        index.insert(big, &mut state);
        index.insert(unit, &mut state);
        assert_eq!(index.next_smallest(), Some(unit));
        index.remove(unit, &mut state);
        assert_eq!(index.next_smallest(), Some(big));
        index.remove(big, &mut state);
        assert_eq!(index.next_smallest(), None);
    }
}
