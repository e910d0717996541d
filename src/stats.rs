//! Inference and simplification counters for a prover run.

use crate::logic::Rule;
use serde::Serialize;

#[derive(Debug, Default, Clone, Serialize)]
pub struct Statistics {
    pub ires1: usize,
    pub gres1: usize,
    pub cres1: usize,
    pub cres2: usize,
    pub cres3: usize,
    pub cres4: usize,
    pub cres5: usize,
    /// Resolvents discarded because the union of right sides was
    /// tautological (or, for coalition rules, the union of left sides).
    pub tautologies: usize,
    pub forward_subsumed: usize,
    pub backward_subsumed: usize,
    pub rewrites: usize,
    pub unit_propagation_clauses_removed: usize,
    pub unit_propagation_literals_removed: usize,
    pub purity_deleted: usize,
}

impl Statistics {
    pub fn count_rule(&mut self, rule: Rule) {
        match rule {
            Rule::Ires1 => self.ires1 += 1,
            Rule::Gres1 => self.gres1 += 1,
            Rule::Cres1 => self.cres1 += 1,
            Rule::Cres2 => self.cres2 += 1,
            Rule::Cres3 => self.cres3 += 1,
            Rule::Cres4 => self.cres4 += 1,
            Rule::Cres5 => self.cres5 += 1,
            Rule::Rw1 | Rule::Rw2 => self.rewrites += 1,
        }
    }

    pub fn rule_count(&self, rule: Rule) -> usize {
        match rule {
            Rule::Ires1 => self.ires1,
            Rule::Gres1 => self.gres1,
            Rule::Cres1 => self.cres1,
            Rule::Cres2 => self.cres2,
            Rule::Cres3 => self.cres3,
            Rule::Cres4 => self.cres4,
            Rule::Cres5 => self.cres5,
            Rule::Rw1 | Rule::Rw2 => self.rewrites,
        }
    }

    /// All resolution applications plus discarded tautologies.
    pub fn total_inferences(&self) -> usize {
        self.ires1
            + self.gres1
            + self.cres1
            + self.cres2
            + self.cres3
            + self.cres4
            + self.cres5
            + self.tautologies
    }
}
