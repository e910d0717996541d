//! The resolution rules.
//!
//! `resolve` takes a given clause and builds every simplified,
//! non-tautological resolvent against the stored clauses whose maximal right
//! literal is the complement of the given clause's maximal right literal.
//! The rule applied is determined entirely by the pair of clause kinds.

use crate::index::ClauseIndex;
use crate::logic::{Clause, ClauseId, ClauseKind, Justification, LiteralId, LiteralList, Rule};
use crate::report;
use crate::state::ProverState;

/// Resolve `given` against the clauses stored in `index` and return the
/// surviving resolvents. Sets the contradiction slot and returns early when
/// the empty clause is derived.
pub fn resolve(index: &ClauseIndex, given: ClauseId, state: &mut ProverState) -> Vec<ClauseId> {
    let mut resolvents = Vec::new();
    let given_clause = state.clause(given).clone();
    let max_literal = match given_clause.right.maximal() {
        Some(literal) => literal,
        // the given clause is already the empty clause
        None => return resolvents,
    };
    let partner_rank = state.pool.rank(state.pool.complement(max_literal));

    let partner_kinds: &[ClauseKind] = match given_clause.kind {
        ClauseKind::Initial => &[ClauseKind::Initial, ClauseKind::Universal],
        ClauseKind::Universal => &[
            ClauseKind::Initial,
            ClauseKind::Universal,
            ClauseKind::Positive,
            ClauseKind::Negative,
        ],
        ClauseKind::Positive | ClauseKind::Negative => &[
            ClauseKind::Universal,
            ClauseKind::Positive,
            ClauseKind::Negative,
        ],
    };

    let partners = index.filter_by_max_literal(partner_rank, partner_kinds);
    log::trace!(
        "resolving clause {} against {} partner candidates",
        given,
        partners.len()
    );
    for partner in partners {
        let partner_clause = state.clause(partner).clone();
        let (right, tautology) = LiteralList::union(
            &given_clause.right.without_maximal(),
            &partner_clause.right.without_maximal(),
            &state.pool,
        );
        if tautology {
            state.stats.tautologies += 1;
            report::trace_tautology(state, &given_clause, &partner_clause);
            continue;
        }

        let resolvent = match (given_clause.kind, partner_clause.kind) {
            (ClauseKind::Initial, _) | (ClauseKind::Universal, ClauseKind::Initial) => {
                Some(build_disjunctive(
                    state,
                    right,
                    ClauseKind::Initial,
                    &given_clause,
                    &partner_clause,
                    max_literal,
                    Rule::Ires1,
                ))
            }
            (ClauseKind::Universal, ClauseKind::Universal) => Some(build_disjunctive(
                state,
                right,
                ClauseKind::Universal,
                &given_clause,
                &partner_clause,
                max_literal,
                Rule::Gres1,
            )),
            (ClauseKind::Universal, _) => Some(build_inherited(
                state,
                right,
                &partner_clause,
                &given_clause,
                &partner_clause,
                max_literal,
            )),
            (_, ClauseKind::Universal) => Some(build_inherited(
                state,
                right,
                &given_clause,
                &given_clause,
                &partner_clause,
                max_literal,
            )),
            _ => build_coalition(
                state,
                right,
                &given_clause,
                &partner_clause,
                max_literal,
            ),
        };

        if let Some(id) = resolvent {
            if state.clause(id).size() == 0 {
                state.set_contradiction(id);
                return resolvents;
            }
            resolvents.push(id);
        }
    }

    resolvents
}

/// IRES1/GRES1 resolvents: a bare disjunction, no left side or agents.
fn build_disjunctive(
    state: &mut ProverState,
    right: LiteralList,
    kind: ClauseKind,
    given: &Clause,
    partner: &Clause,
    max_literal: LiteralId,
    rule: Rule,
) -> ClauseId {
    state.stats.count_rule(rule);
    state.new_clause(
        LiteralList::new(),
        Vec::new(),
        right,
        kind,
        Some(Justification::resolution(
            given.id, partner.id, max_literal, rule,
        )),
        None,
    )
}

/// CRES2/CRES4 resolvents: one parent is universal, the coalition side of
/// the resolvent is inherited from the coalition parent.
fn build_inherited(
    state: &mut ProverState,
    right: LiteralList,
    coalition_parent: &Clause,
    given: &Clause,
    partner: &Clause,
    max_literal: LiteralId,
) -> ClauseId {
    let rule = if coalition_parent.kind == ClauseKind::Positive {
        Rule::Cres2
    } else {
        Rule::Cres4
    };
    state.stats.count_rule(rule);
    state.new_clause(
        coalition_parent.left.clone(),
        coalition_parent.agents.clone(),
        right,
        coalition_parent.kind,
        Some(Justification::resolution(
            given.id, partner.id, max_literal, rule,
        )),
        coalition_parent.coalition.clone(),
    )
}

/// CRES1/CRES3/CRES5 resolvents between two coalition clauses. Returns None
/// when the left union is tautological or the coalition merge fails.
fn build_coalition(
    state: &mut ProverState,
    right: LiteralList,
    given: &Clause,
    partner: &Clause,
    max_literal: LiteralId,
) -> Option<ClauseId> {
    let (left, left_tautology) = LiteralList::union(&given.left, &partner.left, &state.pool);
    if left_tautology {
        state.stats.tautologies += 1;
        report::trace_tautology(state, given, partner);
        return None;
    }
    let merged = given.merge_coalitions(partner)?;

    let (rule, kind, agents) = match (given.kind, partner.kind) {
        (ClauseKind::Positive, ClauseKind::Positive) => (
            Rule::Cres1,
            ClauseKind::Positive,
            given.union_agents(partner),
        ),
        (ClauseKind::Positive, ClauseKind::Negative) => (
            Rule::Cres3,
            ClauseKind::Negative,
            partner.relative_complement_agents(given),
        ),
        (ClauseKind::Negative, ClauseKind::Positive) => (
            Rule::Cres3,
            ClauseKind::Negative,
            given.relative_complement_agents(partner),
        ),
        _ => (
            Rule::Cres5,
            ClauseKind::Negative,
            given.intersection_agents(partner),
        ),
    };
    state.stats.count_rule(rule);
    Some(state.new_clause(
        left,
        agents,
        right,
        kind,
        Some(Justification::resolution(
            given.id, partner.id, max_literal, rule,
        )),
        Some(merged),
    ))
}
