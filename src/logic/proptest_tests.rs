//! Property-based tests for the literal-list laws and clause subsumption.

use super::clause::{Clause, ClauseKind};
use super::literal::{LiteralId, LiteralPool};
use super::literal_list::LiteralList;
use proptest::prelude::*;

const ATOMS: [&str; 4] = ["p", "q", "r", "s"];

/// A literal description before interning: atom index and polarity.
type LitDesc = (usize, bool);

fn arb_literal_set(max_len: usize) -> impl Strategy<Value = Vec<LitDesc>> {
    proptest::collection::vec(((0..ATOMS.len()), any::<bool>()), 0..=max_len)
}

fn pool() -> LiteralPool {
    let mut pool = LiteralPool::new();
    for name in ATOMS {
        pool.intern(name, true);
    }
    pool
}

fn build_list(descs: &[LitDesc], pool: &mut LiteralPool) -> LiteralList {
    let mut list = LiteralList::new();
    for &(atom, polarity) in descs {
        let id = pool.intern(ATOMS[atom], polarity);
        list.insert(id, pool);
    }
    list
}

fn rank_set(list: &LiteralList, pool: &LiteralPool) -> std::collections::BTreeSet<usize> {
    list.iter().map(|id| pool.rank(id)).collect()
}

fn universal(right: LiteralList) -> Clause {
    Clause {
        id: 1,
        kind: ClauseKind::Universal,
        left: LiteralList::new(),
        right,
        agents: Vec::new(),
        coalition: None,
        justification: None,
        active: true,
        bucket_pos: None,
    }
}

proptest! {
    /// Lists stay strictly ascending by rank, without duplicates.
    #[test]
    fn insert_preserves_strict_order(descs in arb_literal_set(8)) {
        let mut pool = pool();
        let list = build_list(&descs, &mut pool);
        let ranks: Vec<usize> = list.iter().map(|id| pool.rank(id)).collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] < w[1]));
    }

    /// The union of two non-empty lists is tautological exactly when it
    /// contains a literal together with its complement.
    #[test]
    fn union_tautology_is_exact(a in arb_literal_set(6), b in arb_literal_set(6)) {
        let mut pool = pool();
        let list_a = build_list(&a, &mut pool);
        let list_b = build_list(&b, &mut pool);
        prop_assume!(!list_a.is_empty() && !list_b.is_empty());

        let (merged, tautology) = LiteralList::union(&list_a, &list_b, &pool);
        let ids: std::collections::BTreeSet<LiteralId> = merged.iter().collect();
        let has_pair = ids.iter().any(|&id| ids.contains(&pool.complement(id)));
        prop_assert_eq!(tautology, has_pair);

        // the union is exactly the set union of the inputs
        let expected: std::collections::BTreeSet<LiteralId> =
            list_a.iter().chain(list_b.iter()).collect();
        prop_assert_eq!(ids, expected);
    }

    /// Subset testing agrees with rank-set inclusion.
    #[test]
    fn subset_matches_rank_sets(a in arb_literal_set(6), b in arb_literal_set(6)) {
        let mut pool = pool();
        let list_a = build_list(&a, &mut pool);
        let list_b = build_list(&b, &mut pool);
        let expected = rank_set(&list_a, &pool).is_subset(&rank_set(&list_b, &pool));
        prop_assert_eq!(list_a.is_subset_of(&list_b, &pool), expected);
    }

    /// Every clause subsumes itself.
    #[test]
    fn subsumption_is_reflexive(right in arb_literal_set(6), left in arb_literal_set(4)) {
        let mut pool = pool();
        let right = build_list(&right, &mut pool);
        let left = build_list(&left, &mut pool);

        let u = universal(right.clone());
        prop_assert!(u.subsumes(&u, &pool));

        let coalition = Clause {
            id: 2,
            kind: ClauseKind::Positive,
            left,
            right,
            agents: vec![1],
            coalition: Some(vec![2, 0]),
            justification: None,
            active: true,
            bucket_pos: None,
        };
        prop_assert!(coalition.subsumes(&coalition, &pool));
        prop_assert!(coalition.initial_subsumes(&coalition, &pool));
    }

    /// For disjunction-only clauses, subsumption implies right-side
    /// inclusion as rank sets.
    #[test]
    fn subsumption_is_antitone_on_right(a in arb_literal_set(6), b in arb_literal_set(6)) {
        let mut pool = pool();
        let clause_a = universal(build_list(&a, &mut pool));
        let clause_b = universal(build_list(&b, &mut pool));
        if clause_a.subsumes(&clause_b, &pool) {
            prop_assert!(
                rank_set(&clause_a.right, &pool).is_subset(&rank_set(&clause_b.right, &pool))
            );
        }
    }
}
