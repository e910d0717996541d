//! Clauses of the coalition-logic normal form.
//!
//! A clause couples a left-side conjunction and a right-side disjunction of
//! literals with a kind tag, an agent list and (for coalition clauses) a
//! coalition vector. Clauses are stored in an arena and referred to by their
//! identifier everywhere else; the `bucket_pos` back-pointer is owned by
//! whichever clause index currently stores the clause.

use super::justification::Justification;
use super::literal::LiteralPool;
use super::literal_list::LiteralList;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a clause in the arena. Assignment order is creation order
/// and identifiers start at 1, so a clause id can double as a non-zero
/// coalition-vector entry.
pub type ClauseId = usize;

pub const NUM_CLAUSE_KINDS: usize = 4;

/// The four clause shapes of the normal form, in their sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ClauseKind {
    Universal,
    Initial,
    Positive,
    Negative,
}

impl ClauseKind {
    pub fn ordinal(self) -> usize {
        match self {
            ClauseKind::Universal => 0,
            ClauseKind::Initial => 1,
            ClauseKind::Positive => 2,
            ClauseKind::Negative => 3,
        }
    }

    pub fn letter(self) -> &'static str {
        match self {
            ClauseKind::Universal => "U",
            ClauseKind::Initial => "I",
            ClauseKind::Positive => "P",
            ClauseKind::Negative => "N",
        }
    }

    pub fn is_coalition(self) -> bool {
        matches!(self, ClauseKind::Positive | ClauseKind::Negative)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Clause {
    pub id: ClauseId,
    pub kind: ClauseKind,
    pub left: LiteralList,
    pub right: LiteralList,
    /// Ascending agent identifiers; non-empty only for coalition clauses.
    pub agents: Vec<u32>,
    /// One entry per agent in the universe; present only on coalition
    /// clauses once vectors have been built.
    pub coalition: Option<Vec<i64>>,
    /// Absent for parsed (given) clauses.
    pub justification: Option<Justification>,
    /// Used only during unit propagation.
    pub active: bool,
    /// Position inside the index bucket currently holding this clause.
    pub bucket_pos: Option<usize>,
}

impl Clause {
    /// Clause size: conjunction size plus disjunction size.
    pub fn size(&self) -> usize {
        self.left.len() + self.right.len()
    }

    /// The feature vector the clause index discriminates on.
    pub fn features(&self, pool: &LiteralPool) -> [usize; 3] {
        let max_rank = self.right.maximal().map_or(0, |lit| pool.rank(lit));
        [self.kind.ordinal(), max_rank, self.size()]
    }

    /// Sort key: kind, then disjunction size, then conjunction size, then
    /// agent count.
    pub fn ordering_key(&self) -> (usize, usize, usize, usize) {
        (
            self.kind.ordinal(),
            self.right.len(),
            self.left.len(),
            self.agents.len(),
        )
    }

    /// Generic subsumption, valid once coalition vectors have been built.
    pub fn subsumes(&self, other: &Clause, pool: &LiteralPool) -> bool {
        if matches!(other.kind, ClauseKind::Initial | ClauseKind::Universal) {
            self.right.is_subset_of(&other.right, pool)
        } else if self.kind == ClauseKind::Universal {
            self.right.is_subset_of(&other.right, pool)
                || self.right.is_subset_of_negation_of(&other.left, pool)
        } else if self.kind == other.kind {
            self.coalition_subsumes(other)
                && self.right.is_subset_of(&other.right, pool)
                && self.left.is_subset_of(&other.left, pool)
        } else {
            false
        }
    }

    /// Subsumption for parsed clauses, before coalition vectors exist; the
    /// vector test is replaced by an agent-set subset test.
    pub fn initial_subsumes(&self, other: &Clause, pool: &LiteralPool) -> bool {
        if matches!(other.kind, ClauseKind::Initial | ClauseKind::Universal) {
            self.right.is_subset_of(&other.right, pool)
        } else if self.kind == ClauseKind::Universal {
            self.right.is_subset_of(&other.right, pool)
                || self.right.is_subset_of_negation_of(&other.left, pool)
        } else if self.kind == other.kind {
            let agents_ok = if self.kind == ClauseKind::Positive {
                is_agent_subset(&self.agents, &other.agents)
            } else {
                is_agent_subset(&other.agents, &self.agents)
            };
            agents_ok
                && self.right.is_subset_of(&other.right, pool)
                && self.left.is_subset_of(&other.left, pool)
        } else {
            false
        }
    }

    /// A coalition vector subsumes another if every non-zero move has an
    /// equal move at the same position.
    fn coalition_subsumes(&self, other: &Clause) -> bool {
        let this = self.coalition.as_deref().unwrap_or(&[]);
        let that = other.coalition.as_deref().unwrap_or(&[]);
        this.iter()
            .zip(that.iter())
            .all(|(&a, &b)| a == 0 || a == b)
    }

    /// Position-wise merge of two coalition vectors. Fails when two non-zero
    /// moves disagree, or when two distinct negative moves would end up in
    /// the merged vector.
    pub fn merge_coalitions(&self, other: &Clause) -> Option<Vec<i64>> {
        let this = self.coalition.as_deref().unwrap_or(&[]);
        let that = other.coalition.as_deref().unwrap_or(&[]);
        let mut merged = Vec::with_capacity(this.len());
        let mut negative = 0i64;
        for (&a, &b) in this.iter().zip(that.iter()) {
            let move_ = if a == b || (b == 0 && a != 0) {
                a
            } else if a == 0 && b != 0 {
                b
            } else {
                return None;
            };
            if move_ < 0 {
                if negative == 0 {
                    negative = move_;
                } else if move_ != negative {
                    return None;
                }
            }
            merged.push(move_);
        }
        Some(merged)
    }

    pub fn union_agents(&self, other: &Clause) -> Vec<u32> {
        let mut out = Vec::with_capacity(self.agents.len() + other.agents.len());
        let (mut i, mut j) = (0, 0);
        while i < self.agents.len() && j < other.agents.len() {
            match self.agents[i].cmp(&other.agents[j]) {
                std::cmp::Ordering::Less => {
                    out.push(self.agents[i]);
                    i += 1;
                }
                std::cmp::Ordering::Greater => {
                    out.push(other.agents[j]);
                    j += 1;
                }
                std::cmp::Ordering::Equal => {
                    out.push(self.agents[i]);
                    i += 1;
                    j += 1;
                }
            }
        }
        out.extend_from_slice(&self.agents[i..]);
        out.extend_from_slice(&other.agents[j..]);
        out
    }

    pub fn intersection_agents(&self, other: &Clause) -> Vec<u32> {
        self.agents
            .iter()
            .copied()
            .filter(|a| other.agents.binary_search(a).is_ok())
            .collect()
    }

    /// Agents of `self` not present in `other`.
    pub fn relative_complement_agents(&self, other: &Clause) -> Vec<u32> {
        self.agents
            .iter()
            .copied()
            .filter(|a| other.agents.binary_search(a).is_err())
            .collect()
    }

    pub fn display<'a>(&'a self, pool: &'a LiteralPool, as_vector: bool) -> ClauseDisplay<'a> {
        ClauseDisplay {
            clause: self,
            pool,
            as_vector,
        }
    }
}

fn is_agent_subset(subset: &[u32], superset: &[u32]) -> bool {
    if subset.is_empty() {
        return true;
    }
    if superset.is_empty() {
        return false;
    }
    if subset.last() > superset.last() {
        return false;
    }
    subset.iter().all(|a| superset.binary_search(a).is_ok())
}

/// Renders a clause the way the derivation log prints it:
/// `Clause 7 (P)  (a & b)-->[1, 2](c v d)     [3, 5, c, CRES1]`.
pub struct ClauseDisplay<'a> {
    clause: &'a Clause,
    pool: &'a LiteralPool,
    as_vector: bool,
}

impl ClauseDisplay<'_> {
    fn write_literals(
        &self,
        f: &mut fmt::Formatter<'_>,
        list: &LiteralList,
        separator: &str,
    ) -> fmt::Result {
        write!(f, "(")?;
        for (i, literal) in list.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", separator)?;
            }
            write!(f, "{}", self.pool.display(literal))?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for ClauseDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let clause = self.clause;
        write!(f, "Clause {} ({})  ", clause.id, clause.kind.letter())?;

        if !clause.left.is_empty() {
            self.write_literals(f, &clause.left, " & ")?;
        } else if clause.kind.is_coalition() {
            write!(f, "true")?;
        }

        if clause.kind.is_coalition() {
            write!(f, "-->")?;
            if self.as_vector {
                write!(f, "[")?;
                if let Some(vector) = &clause.coalition {
                    for (i, move_) in vector.iter().enumerate() {
                        if i > 0 {
                            write!(f, ", ")?;
                        }
                        write!(f, "{}", move_)?;
                    }
                }
                write!(f, "]")?;
            } else {
                let (open, close) = if clause.kind == ClauseKind::Positive {
                    ("[", "]")
                } else {
                    ("<", ">")
                };
                write!(f, "{}", open)?;
                for (i, agent) in clause.agents.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", agent)?;
                }
                write!(f, "{}", close)?;
            }
        }

        if !clause.right.is_empty() {
            self.write_literals(f, &clause.right, " v ")?;
        } else {
            write!(f, "false")?;
        }

        match &clause.justification {
            Some(j) => {
                write!(f, "     [{}", j.parent)?;
                if let Some(second) = j.second_parent {
                    write!(f, ", {}", second)?;
                }
                if let Some(literal) = j.resolved_literal {
                    write!(f, ", {}", self.pool.get(literal).name())?;
                }
                write!(f, ", {}]", j.rule)
            }
            None => write!(f, "     [Given]"),
        }
    }
}
