//! Property tests over randomly shaped taxonomies
use proptest::prelude::*;
use proptest::sample::Index;
use std::collections::HashSet;
use std::io::Cursor;
use taxtree::{CanonicalRank, TaxonId, TaxonomyBuilder, TaxonomyTree};

const RANKS: &[&str] = &[
    "superkingdom",
    "kingdom",
    "phylum",
    "class",
    "order",
    "family",
    "genus",
    "species",
    "no rank",
    "clade",
    "subfamily",
    "strain",
];

/// Taxon `i + 2` hangs below a uniformly chosen earlier taxon; the root is 1
fn arb_tree() -> impl Strategy<Value = TaxonomyTree> {
    prop::collection::vec((any::<Index>(), 0..RANKS.len()), 1..60).prop_map(|specs| {
        let mut nodes = String::from("1\t|\t1\t|\tno rank\t|\n");
        let mut names = String::from("1\t|\troot\t|\t\t|\tscientific name\t|\n");
        for (offset, (parent, rank)) in specs.iter().enumerate() {
            let taxon = offset as u32 + 2;
            let parent = parent.index(offset + 1) as u32 + 1;
            nodes.push_str(&format!("{}\t|\t{}\t|\t{}\t|\n", taxon, parent, RANKS[*rank]));
            names.push_str(&format!(
                "{}\t|\ttaxon {}\t|\t\t|\tscientific name\t|\n",
                taxon, taxon
            ));
        }
        TaxonomyBuilder::from_readers(Cursor::new(nodes), Cursor::new(names))
            .expect("generated taxonomy should build")
    })
}

fn all_ids(tree: &TaxonomyTree) -> Vec<TaxonId> {
    let mut taxa: Vec<TaxonId> = tree.taxon_ids().copied().collect();
    taxa.sort();
    taxa
}

/// LCA by walking parent links, independent of the cached lineages
fn naive_lca(tree: &TaxonomyTree, a: TaxonId, b: TaxonId) -> TaxonId {
    let mut ancestors = HashSet::new();
    let mut current = Some(a);
    while let Some(taxon) = current {
        ancestors.insert(taxon);
        current = tree.parent(taxon).unwrap();
    }
    let mut current = b;
    while !ancestors.contains(&current) {
        current = tree.parent(current).unwrap().unwrap();
    }
    current
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn lineage_runs_from_root_to_taxon(tree in arb_tree()) {
        for taxon in all_ids(&tree) {
            let lineage = tree.lineage(taxon).unwrap();
            prop_assert_eq!(lineage.first().copied(), Some(TaxonId::ROOT));
            prop_assert_eq!(lineage.last().copied(), Some(taxon));
        }
        prop_assert_eq!(tree.lineage(TaxonId::ROOT).unwrap().to_vec(), vec![TaxonId::ROOT]);
    }

    #[test]
    fn lca_is_symmetric_and_correct(tree in arb_tree(), a in any::<Index>(), b in any::<Index>()) {
        let taxa = all_ids(&tree);
        let (a, b) = (*a.get(&taxa), *b.get(&taxa));

        let lca = tree.lca(a, b).unwrap();
        prop_assert_eq!(lca, tree.lca(b, a).unwrap());
        prop_assert_eq!(lca, naive_lca(&tree, a, b));
        prop_assert_eq!(tree.lca(a, a).unwrap(), a);
    }

    #[test]
    fn distance_decomposes_through_lca(
        tree in arb_tree(),
        a in any::<Index>(),
        b in any::<Index>()
    ) {
        let taxa = all_ids(&tree);
        let (a, b) = (*a.get(&taxa), *b.get(&taxa));

        let lca = tree.lca(a, b).unwrap();
        let distance = tree.distance(a, b).unwrap();
        prop_assert_eq!(distance, tree.distance(lca, a).unwrap() + tree.distance(lca, b).unwrap());
        prop_assert_eq!(distance, tree.distance(b, a).unwrap());
        prop_assert_eq!(tree.distance(a, a).unwrap(), 0);
        prop_assert_eq!(
            distance,
            tree.depth(a).unwrap() + tree.depth(b).unwrap() - 2 * tree.depth(lca).unwrap()
        );
    }

    #[test]
    fn leaves_of_root_are_childless_taxa(tree in arb_tree()) {
        let leaves = tree.leaves(&[TaxonId::ROOT]).unwrap();
        let childless: HashSet<TaxonId> = all_ids(&tree)
            .into_iter()
            .filter(|&t| tree.children(t).unwrap().is_empty())
            .collect();
        prop_assert_eq!(&leaves[&TaxonId::ROOT], &childless);

        let leaf_set: HashSet<TaxonId> = tree.leaf_ids().copied().collect();
        prop_assert_eq!(leaf_set, childless);
    }

    #[test]
    fn clade_contains_descendant_paths(tree in arb_tree(), pick in any::<Index>()) {
        let taxa = all_ids(&tree);
        let taxon = *pick.get(&taxa);
        let clade = tree.clade(taxon).unwrap();
        prop_assert!(clade.contains(&taxon));

        for &member in &clade {
            let lineage = tree.lineage(member).unwrap();
            let start = lineage.iter().position(|&t| t == taxon);
            prop_assert!(start.is_some());
            for step in &lineage[start.unwrap()..] {
                prop_assert!(clade.contains(step));
            }
        }
    }

    #[test]
    fn exact_rank_codes_match_own_rank(tree in arb_tree()) {
        for taxon in all_ids(&tree) {
            let rank = tree.rank_code(taxon).unwrap();
            if rank.rank_depth == 0 && rank.rank_code != CanonicalRank::Root {
                prop_assert_eq!(
                    CanonicalRank::from_rank_name(&rank.rank_name),
                    Some(rank.rank_code)
                );
            }
        }
    }

    #[test]
    fn cached_answers_never_change(tree in arb_tree(), a in any::<Index>(), b in any::<Index>()) {
        let taxa = all_ids(&tree);
        let (a, b) = (*a.get(&taxa), *b.get(&taxa));

        let first = (
            tree.lineage(a).unwrap().to_vec(),
            tree.lca(a, b).unwrap(),
            tree.distance(a, b).unwrap(),
            tree.rank_code(b).unwrap(),
        );
        let second = (
            tree.lineage(a).unwrap().to_vec(),
            tree.lca(a, b).unwrap(),
            tree.distance(a, b).unwrap(),
            tree.rank_code(b).unwrap(),
        );
        prop_assert_eq!(&first, &second);

        tree.clear_caches();
        let third = (
            tree.lineage(a).unwrap().to_vec(),
            tree.lca(a, b).unwrap(),
            tree.distance(a, b).unwrap(),
            tree.rank_code(b).unwrap(),
        );
        prop_assert_eq!(first, third);
    }
}
