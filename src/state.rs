//! The prover context: literal pool, clause arena, archive, statistics and
//! the contradiction slot.
//!
//! All clause construction goes through `ProverState::new_clause`, which owns
//! the identifier counter and applies the RW1/RW2 rewrite: a coalition clause
//! built with an empty disjunction is archived under its own identifier and
//! replaced by a universal clause over the complements of its conjunction.
//!
//! Ownership contract: live clauses sit in the arena; clauses discarded by
//! forward subsumption or unit propagation are freed immediately, while
//! archived clauses (backward-subsumed, rewritten originals, propagated
//! units) stay in the arena until teardown so the derivation log can still
//! render them.

use crate::config::ProverConfig;
use crate::logic::{
    Clause, ClauseId, ClauseKind, Justification, LiteralList, LiteralPool, Rule,
};
use crate::stats::Statistics;

pub struct ProverState {
    pub pool: LiteralPool,
    pub config: ProverConfig,
    pub stats: Statistics,
    /// Retired clauses, displayed sorted by identifier at the end of a run.
    pub archive: Vec<ClauseId>,
    /// Set as soon as the empty clause is derived; the saturation loop stops
    /// on it.
    pub contradiction: Option<ClauseId>,
    /// Size of the agent universe, fixed when coalition vectors are built.
    pub num_agents: usize,
    slots: Vec<Option<Clause>>,
}

impl ProverState {
    pub fn new(pool: LiteralPool, config: ProverConfig) -> Self {
        ProverState {
            pool,
            config,
            stats: Statistics::default(),
            archive: Vec::new(),
            contradiction: None,
            num_agents: 0,
            slots: Vec::new(),
        }
    }

    /// Identifier the next constructed clause will receive.
    pub fn next_identifier(&self) -> ClauseId {
        self.slots.len() + 1
    }

    pub fn clause(&self, id: ClauseId) -> &Clause {
        self.slots[id - 1]
            .as_ref()
            .expect("clause was freed while still referenced")
    }

    pub fn clause_mut(&mut self, id: ClauseId) -> &mut Clause {
        self.slots[id - 1]
            .as_mut()
            .expect("clause was freed while still referenced")
    }

    pub fn is_live(&self, id: ClauseId) -> bool {
        self.slots[id - 1].is_some()
    }

    /// Mutable access to a clause together with the pool, for literal-list
    /// edits that need rank comparisons.
    pub fn clause_and_pool_mut(&mut self, id: ClauseId) -> (&mut Clause, &LiteralPool) {
        let clause = self.slots[id - 1]
            .as_mut()
            .expect("clause was freed while still referenced");
        (clause, &self.pool)
    }

    /// Construct a clause, applying the empty-disjunction rewrite for
    /// coalition kinds. Returns the identifier of the clause that actually
    /// entered the arena (the rewritten universal when the rewrite fired).
    pub fn new_clause(
        &mut self,
        left: LiteralList,
        agents: Vec<u32>,
        right: LiteralList,
        kind: ClauseKind,
        justification: Option<Justification>,
        coalition: Option<Vec<i64>>,
    ) -> ClauseId {
        if right.is_empty() && kind.is_coalition() {
            self.stats.rewrites += 1;
            let rule = if kind == ClauseKind::Positive {
                Rule::Rw1
            } else {
                Rule::Rw2
            };
            let mut rewritten_right = LiteralList::new();
            for literal in left.iter() {
                rewritten_right.insert(self.pool.complement(literal), &self.pool);
            }
            let original = self.push(Clause {
                id: 0,
                kind,
                left,
                right,
                agents,
                coalition,
                justification,
                active: true,
                bucket_pos: None,
            });
            self.archive.push(original);
            let replacement_justification = Justification::rewrite(original, rule);
            return self.push(Clause {
                id: 0,
                kind: ClauseKind::Universal,
                left: LiteralList::new(),
                right: rewritten_right,
                agents: Vec::new(),
                coalition: None,
                justification: Some(replacement_justification),
                active: true,
                bucket_pos: None,
            });
        }
        self.push(Clause {
            id: 0,
            kind,
            left,
            right,
            agents,
            coalition,
            justification,
            active: true,
            bucket_pos: None,
        })
    }

    fn push(&mut self, mut clause: Clause) -> ClauseId {
        let id = self.next_identifier();
        clause.id = id;
        self.slots.push(Some(clause));
        id
    }

    /// Free a clause immediately (forward subsumption, unit propagation).
    pub fn delete_clause(&mut self, id: ClauseId) {
        self.slots[id - 1] = None;
    }

    /// Retire a clause to the archive; it stays in the arena for display.
    pub fn archive_clause(&mut self, id: ClauseId) {
        self.archive.push(id);
    }

    pub fn set_contradiction(&mut self, id: ClauseId) {
        self.contradiction = Some(id);
    }
}
