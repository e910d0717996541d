//! Ordered, duplicate-free literal multisets.
//!
//! A `LiteralList` keeps its literals in strictly ascending rank order; the
//! last element is the maximal literal that resolution targets. All rank
//! comparisons go through the pool, so every operation takes it as an
//! argument.

use super::literal::{LiteralId, LiteralPool};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralList {
    literals: Vec<LiteralId>,
}

impl LiteralList {
    pub fn new() -> Self {
        LiteralList {
            literals: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = LiteralId> + '_ {
        self.literals.iter().copied()
    }

    /// The literal of highest rank, always last in the list.
    pub fn maximal(&self) -> Option<LiteralId> {
        self.literals.last().copied()
    }

    /// A fresh list equal to this one minus its maximal literal.
    pub fn without_maximal(&self) -> LiteralList {
        let mut literals = self.literals.clone();
        literals.pop();
        LiteralList { literals }
    }

    /// Insert at the unique rank-ordered position; a no-op if the literal is
    /// already present.
    pub fn insert(&mut self, literal: LiteralId, pool: &LiteralPool) {
        let rank = pool.rank(literal);
        match self
            .literals
            .binary_search_by(|other| pool.rank(*other).cmp(&rank))
        {
            Ok(_) => {}
            Err(position) => self.literals.insert(position, literal),
        }
    }

    pub fn contains(&self, literal: LiteralId, pool: &LiteralPool) -> bool {
        let rank = pool.rank(literal);
        self.literals
            .binary_search_by(|other| pool.rank(*other).cmp(&rank))
            .is_ok()
    }

    /// Remove the literal if present. Returns whether it was removed.
    pub fn remove(&mut self, literal: LiteralId, pool: &LiteralPool) -> bool {
        let rank = pool.rank(literal);
        match self
            .literals
            .binary_search_by(|other| pool.rank(*other).cmp(&rank))
        {
            Ok(position) => {
                self.literals.remove(position);
                true
            }
            Err(_) => false,
        }
    }

    /// Rank-set inclusion test against `other`.
    pub fn is_subset_of(&self, other: &LiteralList, pool: &LiteralPool) -> bool {
        if self.is_empty() {
            return true;
        }
        if other.is_empty() {
            return false;
        }
        // a greater maximal literal rules inclusion out immediately
        let self_max = pool.rank(*self.literals.last().unwrap());
        let other_max = pool.rank(*other.literals.last().unwrap());
        if self_max > other_max {
            return false;
        }
        let mut j = 0;
        for &literal in &self.literals {
            let rank = pool.rank(literal);
            while j < other.literals.len() && pool.rank(other.literals[j]) < rank {
                j += 1;
            }
            if j >= other.literals.len() || pool.rank(other.literals[j]) != rank {
                return false;
            }
            j += 1;
        }
        true
    }

    /// Is this list a subset of the complements of `other`?
    pub fn is_subset_of_negation_of(&self, other: &LiteralList, pool: &LiteralPool) -> bool {
        if self.is_empty() {
            return true;
        }
        if other.is_empty() {
            return false;
        }
        let self_max = pool.rank(*self.literals.last().unwrap());
        let other_max = pool.rank(*other.literals.last().unwrap());
        if self_max > other_max {
            return false;
        }
        // complement ranks preserve the order of `other`, so a merge walk
        // against them stays valid
        let mut j = 0;
        for &literal in &self.literals {
            let rank = pool.rank(literal);
            while j < other.literals.len()
                && pool.rank(pool.complement(other.literals[j])) < rank
            {
                j += 1;
            }
            if j >= other.literals.len()
                || pool.rank(pool.complement(other.literals[j])) != rank
            {
                return false;
            }
            j += 1;
        }
        true
    }

    /// Merge two lists by rank. The tautology flag is set whenever two input
    /// literals compared during the merge are complementary; it is the only
    /// signal callers use to discard a derived resolvent. If either input is
    /// empty the other is returned unchanged with the flag unset.
    pub fn union(a: &LiteralList, b: &LiteralList, pool: &LiteralPool) -> (LiteralList, bool) {
        if a.is_empty() {
            return (b.clone(), false);
        }
        if b.is_empty() {
            return (a.clone(), false);
        }
        let mut merged = Vec::with_capacity(a.len() + b.len());
        let mut i = 0;
        let mut j = 0;
        while i < a.literals.len() && j < b.literals.len() {
            let x = a.literals[i];
            let y = b.literals[j];
            let rank_x = pool.rank(x);
            let rank_y = pool.rank(y);
            if rank_x < rank_y {
                merged.push(x);
                i += 1;
            } else if rank_y < rank_x {
                merged.push(y);
                j += 1;
            } else {
                merged.push(x);
                i += 1;
                j += 1;
            }
        }
        merged.extend_from_slice(&a.literals[i..]);
        merged.extend_from_slice(&b.literals[j..]);
        // complementary literals carry adjacent ranks, so in the sorted
        // union they sit next to each other
        let is_tautology = merged
            .windows(2)
            .any(|pair| pool.complement(pair[0]) == pair[1]);
        (LiteralList { literals: merged }, is_tautology)
    }
}

impl FromIterator<LiteralId> for LiteralList {
    /// Collect from an iterator; the caller must supply literals in ascending
    /// rank order (used only in tests and display paths).
    fn from_iter<T: IntoIterator<Item = LiteralId>>(iter: T) -> Self {
        LiteralList {
            literals: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pool_with(names: &[&str]) -> LiteralPool {
        let mut pool = LiteralPool::new();
        for name in names {
            pool.intern(name, true);
        }
        pool
    }

    fn list(ids: &[LiteralId], pool: &LiteralPool) -> LiteralList {
        let mut l = LiteralList::new();
        for &id in ids {
            l.insert(id, pool);
        }
        l
    }

    #[test]
    fn insert_keeps_ascending_order_and_dedups() {
        let mut pool = pool_with(&["p", "q", "r"]);
        let p = pool.intern("p", true);
        let q = pool.intern("q", true);
        let r = pool.intern("r", true);
        let l = list(&[r, p, q, p], &pool);
        let ranks: Vec<usize> = l.iter().map(|id| pool.rank(id)).collect();
        assert_eq!(l.len(), 3);
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(l.maximal(), Some(r));
    }

    #[test]
    fn without_maximal_drops_the_last_literal() {
        let mut pool = pool_with(&["p", "q"]);
        let p = pool.intern("p", true);
        let q = pool.intern("q", true);
        let l = list(&[p, q], &pool);
        let shorter = l.without_maximal();
        assert_eq!(shorter.len(), 1);
        assert_eq!(shorter.maximal(), Some(p));
        assert!(LiteralList::new().without_maximal().is_empty());
    }

    #[test]
    fn subset_tests() {
        let mut pool = pool_with(&["p", "q", "r"]);
        let p = pool.intern("p", true);
        let q = pool.intern("q", true);
        let r = pool.intern("r", true);
        let small = list(&[p, r], &pool);
        let big = list(&[p, q, r], &pool);
        assert!(small.is_subset_of(&big, &pool));
        assert!(!big.is_subset_of(&small, &pool));
        assert!(LiteralList::new().is_subset_of(&small, &pool));
        assert!(!small.is_subset_of(&LiteralList::new(), &pool));
    }

    #[test]
    fn subset_of_negation() {
        let mut pool = pool_with(&["p", "q"]);
        let p = pool.intern("p", true);
        let np = pool.intern("p", false);
        let nq = pool.intern("q", false);
        let q = pool.intern("q", true);
        let positives = list(&[p, q], &pool);
        let negatives = list(&[np, nq], &pool);
        assert!(positives.is_subset_of_negation_of(&negatives, &pool));
        assert!(!positives.is_subset_of_negation_of(&positives, &pool));
    }

    #[test]
    fn union_detects_complementary_pairs() {
        let mut pool = pool_with(&["p", "q"]);
        let p = pool.intern("p", true);
        let np = pool.intern("p", false);
        let q = pool.intern("q", true);
        let (merged, taut) = LiteralList::union(&list(&[p], &pool), &list(&[np, q], &pool), &pool);
        assert!(taut);
        assert_eq!(merged.len(), 3);

        let (merged, taut) = LiteralList::union(&list(&[p], &pool), &list(&[q], &pool), &pool);
        assert!(!taut);
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn union_with_empty_side_skips_the_tautology_check() {
        let mut pool = pool_with(&["p"]);
        let p = pool.intern("p", true);
        let np = pool.intern("p", false);
        let tautological = list(&[p, np], &pool);
        let (merged, taut) = LiteralList::union(&tautological, &LiteralList::new(), &pool);
        assert!(!taut);
        assert_eq!(merged, tautological);
    }
}
