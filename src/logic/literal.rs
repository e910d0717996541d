//! Interned literals and the literal pool.
//!
//! Every atom owns exactly two literals (one per polarity), created together
//! and linked through their `complement` ids. Literals are shared by id from
//! all clauses and live for the whole run; after parsing only the `used` flag
//! is ever read.
//!
//! Ranks impose the total order resolution works with. Without an ordering
//! file, ranks ascend from 1 in order of first occurrence; with one, declared
//! atoms take descending ranks from a high watermark so that every declared
//! atom outranks every atom first seen in the clause file. `rebase_ranks`
//! compacts either scheme to the dense range `1..=len` once parsing is done.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Id of an interned literal.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiteralId(pub(crate) u32);

impl LiteralId {
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

/// A propositional atom paired with a polarity.
#[derive(Debug, Clone)]
pub struct Literal {
    name: String,
    polarity: bool,
    complement: LiteralId,
    rank: usize,
    used: bool,
}

impl Literal {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn polarity(&self) -> bool {
        self.polarity
    }

    pub fn complement(&self) -> LiteralId {
        self.complement
    }

    pub fn rank(&self) -> usize {
        self.rank
    }

    /// True if the literal appears in a parsed clause (under the disjunctive
    /// reading of coalition implications).
    pub fn is_used(&self) -> bool {
        self.used
    }
}

// Descending ranks start well clear of anything an ascending run can reach;
// rebase_ranks collapses the gap afterwards.
const DESCENDING_START: usize = usize::MAX / 2;

/// Pool of all literals created during a run.
pub struct LiteralPool {
    literals: Vec<Literal>,
    /// Atom name to the id of its positive literal, in creation order.
    atoms: IndexMap<String, LiteralId>,
    next_rank: usize,
    descending: bool,
}

impl LiteralPool {
    /// Pool assigning ascending ranks from 1 (no ordering file).
    pub fn new() -> Self {
        LiteralPool {
            literals: Vec::new(),
            atoms: IndexMap::new(),
            next_rank: 1,
            descending: false,
        }
    }

    /// Pool assigning descending ranks (an ordering file is in effect).
    pub fn with_ordering() -> Self {
        LiteralPool {
            literals: Vec::new(),
            atoms: IndexMap::new(),
            next_rank: DESCENDING_START,
            descending: true,
        }
    }

    /// Number of literals in the pool (twice the number of atoms).
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    pub fn get(&self, id: LiteralId) -> &Literal {
        &self.literals[id.0 as usize]
    }

    pub fn complement(&self, id: LiteralId) -> LiteralId {
        self.get(id).complement
    }

    pub fn rank(&self, id: LiteralId) -> usize {
        self.get(id).rank
    }

    pub fn mark_used(&mut self, id: LiteralId) {
        self.literals[id.0 as usize].used = true;
    }

    /// Get or create the literal for `name` with the requested polarity.
    pub fn intern(&mut self, name: &str, polarity: bool) -> LiteralId {
        let positive = match self.atoms.get(name) {
            Some(&id) => id,
            None => self.create_pair(name),
        };
        if polarity {
            positive
        } else {
            self.complement(positive)
        }
    }

    /// Declare an atom from the ordering file. A repeated declaration is a
    /// no-op, keeping the rank of the first.
    pub fn declare(&mut self, name: &str) {
        if !self.atoms.contains_key(name) {
            self.create_pair(name);
        }
    }

    /// Create the positive/negative pair for a fresh atom and return the
    /// positive id. The negative literal always ranks one above its
    /// complement, in either rank mode.
    fn create_pair(&mut self, name: &str) -> LiteralId {
        let (positive_rank, negative_rank) = if self.descending {
            let negative = self.next_rank;
            self.next_rank -= 2;
            (negative - 1, negative)
        } else {
            let positive = self.next_rank;
            self.next_rank += 2;
            (positive, positive + 1)
        };
        let positive_id = LiteralId(self.literals.len() as u32);
        let negative_id = LiteralId(self.literals.len() as u32 + 1);
        self.literals.push(Literal {
            name: name.to_string(),
            polarity: true,
            complement: negative_id,
            rank: positive_rank,
            used: false,
        });
        self.literals.push(Literal {
            name: name.to_string(),
            polarity: false,
            complement: positive_id,
            rank: negative_rank,
            used: false,
        });
        self.atoms.insert(name.to_string(), positive_id);
        positive_id
    }

    /// Rebase all ranks to the dense range `1..=len`, preserving order.
    /// Called once, after input parsing, before any index is built.
    pub fn rebase_ranks(&mut self) {
        let min = match self.literals.iter().map(|l| l.rank).min() {
            Some(min) => min,
            None => return,
        };
        for literal in &mut self.literals {
            literal.rank -= min - 1;
        }
    }

    /// All literal ids in creation order.
    pub fn ids(&self) -> impl Iterator<Item = LiteralId> + '_ {
        (0..self.literals.len() as u32).map(LiteralId)
    }

    /// All literal ids in descending rank order, for the ordering display.
    pub fn ids_by_descending_rank(&self) -> Vec<LiteralId> {
        let mut ids: Vec<LiteralId> = self.ids().collect();
        ids.sort_by(|a, b| self.rank(*b).cmp(&self.rank(*a)));
        ids
    }

    pub fn display(&self, id: LiteralId) -> LiteralDisplay<'_> {
        LiteralDisplay { pool: self, id }
    }
}

impl Default for LiteralPool {
    fn default() -> Self {
        Self::new()
    }
}

/// Display wrapper rendering a literal as `name` or `~name`.
pub struct LiteralDisplay<'a> {
    pool: &'a LiteralPool,
    id: LiteralId,
}

impl fmt::Display for LiteralDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let literal = self.pool.get(self.id);
        if !literal.polarity() {
            write!(f, "~")?;
        }
        write!(f, "{}", literal.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complement_links_are_involutive() {
        let mut pool = LiteralPool::new();
        let p = pool.intern("p", true);
        let np = pool.intern("p", false);
        assert_eq!(pool.complement(p), np);
        assert_eq!(pool.complement(np), p);
        assert_ne!(pool.rank(p), pool.rank(np));
        assert!(pool.get(p).polarity());
        assert!(!pool.get(np).polarity());
    }

    #[test]
    fn ascending_ranks_follow_first_occurrence() {
        let mut pool = LiteralPool::new();
        let p = pool.intern("p", true);
        let q = pool.intern("q", false);
        assert!(pool.rank(p) < pool.rank(pool.complement(q)));
        // negative literal of an atom ranks one above the positive
        assert_eq!(pool.rank(pool.complement(p)), pool.rank(p) + 1);
    }

    #[test]
    fn declared_atoms_outrank_later_ones() {
        let mut pool = LiteralPool::with_ordering();
        pool.declare("a");
        pool.declare("b");
        let c = pool.intern("c", true);
        let a = pool.intern("a", true);
        let b = pool.intern("b", true);
        assert!(pool.rank(a) > pool.rank(b));
        assert!(pool.rank(b) > pool.rank(c));
        pool.rebase_ranks();
        let mut ranks: Vec<usize> = pool.ids().map(|id| pool.rank(id)).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=6).collect::<Vec<_>>());
        // order survives the rebase
        assert!(pool.rank(a) > pool.rank(b));
        assert!(pool.rank(b) > pool.rank(c));
    }

    #[test]
    fn duplicate_declaration_is_ignored() {
        let mut pool = LiteralPool::with_ordering();
        pool.declare("a");
        let a = pool.intern("a", true);
        pool.declare("a");
        assert_eq!(pool.intern("a", true), a);
        assert_eq!(pool.len(), 2);
    }
}
