//! Derivation provenance for clauses.

use super::literal::LiteralId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The inference and rewrite rules of the calculus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rule {
    Ires1,
    Gres1,
    Cres1,
    Cres2,
    Cres3,
    Cres4,
    Cres5,
    Rw1,
    Rw2,
}

impl Rule {
    pub fn name(self) -> &'static str {
        match self {
            Rule::Ires1 => "IRES1",
            Rule::Gres1 => "GRES1",
            Rule::Cres1 => "CRES1",
            Rule::Cres2 => "CRES2",
            Rule::Cres3 => "CRES3",
            Rule::Cres4 => "CRES4",
            Rule::Cres5 => "CRES5",
            Rule::Rw1 => "RW1",
            Rule::Rw2 => "RW2",
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Records how a clause was derived. Parsed (given) clauses carry no
/// justification at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Justification {
    /// Identifier of the first parent clause.
    pub parent: usize,
    /// Identifier of the second parent; absent for rewrites.
    pub second_parent: Option<usize>,
    /// The literal resolved upon; absent for rewrites.
    pub resolved_literal: Option<LiteralId>,
    pub rule: Rule,
}

impl Justification {
    pub fn resolution(
        parent: usize,
        second_parent: usize,
        resolved_literal: LiteralId,
        rule: Rule,
    ) -> Self {
        Justification {
            parent,
            second_parent: Some(second_parent),
            resolved_literal: Some(resolved_literal),
            rule,
        }
    }

    pub fn rewrite(parent: usize, rule: Rule) -> Self {
        Justification {
            parent,
            second_parent: None,
            resolved_literal: None,
            rule,
        }
    }
}
