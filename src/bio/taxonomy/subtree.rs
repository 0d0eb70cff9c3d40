//! Clade, leaf, rank and sibling traversals.
//!
//! Real taxonomies are millions of nodes deep and wide, so every traversal
//! uses an explicit stack instead of recursion.

use super::tree::TaxonomyTree;
use super::types::{CanonicalRank, TaxonId};
use crate::{Result, TaxTreeError};
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Canonical-rank taxa found in a clade, keyed by rank
pub type RankTaxa = HashMap<CanonicalRank, HashSet<TaxonId>>;

impl TaxonomyTree {
    /// `taxon` and all of its descendants
    pub fn clade(&self, taxon: TaxonId) -> Result<HashSet<TaxonId>> {
        let mut clade = HashSet::from([taxon]);
        let mut pool: Vec<TaxonId> = self.children(taxon)?.to_vec();

        while let Some(member) = pool.pop() {
            if clade.insert(member) {
                pool.extend_from_slice(self.children(member)?);
            }
        }
        Ok(clade)
    }

    /// Leaf taxa of the clade rooted at each of `taxa`
    pub fn leaves(&self, taxa: &[TaxonId]) -> Result<HashMap<TaxonId, HashSet<TaxonId>>> {
        taxa.iter()
            .map(|&taxon| Ok((taxon, self.clade_leaves(taxon)?)))
            .collect()
    }

    fn clade_leaves(&self, start: TaxonId) -> Result<HashSet<TaxonId>> {
        let mut leaves = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(taxon) = stack.pop() {
            if !visited.insert(taxon) {
                continue;
            }
            let children = self.children(taxon)?;
            if children.is_empty() {
                leaves.insert(taxon);
            } else {
                stack.extend_from_slice(children);
            }
        }
        Ok(leaves)
    }

    /// Taxa sitting exactly on a canonical rank inside each clade.
    ///
    /// With `rank` set only that rank is collected, otherwise all eight
    /// canonical ranks are. Every wanted rank gets an entry, empty or not.
    ///
    /// The search does not descend below a taxon whose rank code is already
    /// at or past the deepest wanted rank (nothing below a species is
    /// visited when genera are wanted). This assumes rank codes only get
    /// deeper along a path, which irregular "no rank" insertions in real
    /// taxonomies do not strictly guarantee.
    pub fn clade_rank_taxids(
        &self,
        taxa: &[TaxonId],
        rank: Option<CanonicalRank>,
    ) -> Result<HashMap<TaxonId, RankTaxa>> {
        let wanted: HashSet<CanonicalRank> = match rank {
            Some(rank) => HashSet::from([rank]),
            None => CanonicalRank::ALL.into_iter().collect(),
        };
        let deepest = wanted
            .iter()
            .copied()
            .max()
            .unwrap_or(CanonicalRank::Root);

        taxa.iter()
            .map(|&taxon| Ok((taxon, self.collect_rank_taxa(taxon, &wanted, deepest)?)))
            .collect()
    }

    fn collect_rank_taxa(
        &self,
        start: TaxonId,
        wanted: &HashSet<CanonicalRank>,
        deepest: CanonicalRank,
    ) -> Result<RankTaxa> {
        let mut found: RankTaxa = wanted.iter().map(|&r| (r, HashSet::new())).collect();
        let mut visited = HashSet::new();
        let mut stack = vec![start];

        while let Some(taxon) = stack.pop() {
            if !visited.insert(taxon) {
                continue;
            }

            let rank = self.rank_code(taxon)?;
            if rank.is_exact() {
                if let Some(bucket) = found.get_mut(&rank.rank_code) {
                    bucket.insert(taxon);
                }
            }

            if rank.rank_code < deepest {
                stack.extend_from_slice(self.children(taxon)?);
            }
        }

        debug!(
            "Collected {} canonical taxa below {}",
            found.values().map(HashSet::len).sum::<usize>(),
            start
        );
        Ok(found)
    }

    /// Taxa of the same canonical rank as `taxon` under its nearest
    /// canonical parent.
    ///
    /// `taxon` must sit exactly on species, genus, family, order, class or
    /// phylum. For a species this returns every species of its genus
    /// (itself included); for a genus every genus of its family. The parent
    /// is the nearest ancestor exactly on one of those ranks, or the root.
    pub fn siblings(&self, taxon: TaxonId) -> Result<HashSet<TaxonId>> {
        let rank = self.rank_code(taxon)?;
        if !rank.is_exact() || !CanonicalRank::SIBLING_RANKS.contains(&rank.rank_code) {
            return Err(TaxTreeError::InvalidRank(format!(
                "taxon {} is '{}' ({}); siblings need a taxon exactly at rank S, G, F, O, C or P",
                taxon, rank.rank_name, rank
            )));
        }

        let anchor = self.sibling_anchor(taxon)?;
        let wanted = rank.rank_code;

        let mut siblings = HashSet::new();
        let mut visited = HashSet::new();
        let mut stack = vec![anchor];
        while let Some(current) = stack.pop() {
            if !visited.insert(current) {
                continue;
            }
            if self.rank_code(current)?.rank_code == wanted {
                siblings.insert(current);
            } else {
                stack.extend_from_slice(self.children(current)?);
            }
        }
        Ok(siblings)
    }

    fn sibling_anchor(&self, taxon: TaxonId) -> Result<TaxonId> {
        let mut current = taxon;
        while let Some(parent) = self.parent(current)? {
            let rank = self.rank_code(parent)?;
            let exact_sibling_rank =
                rank.is_exact() && CanonicalRank::SIBLING_RANKS.contains(&rank.rank_code);
            if exact_sibling_rank || parent.is_root() {
                return Ok(parent);
            }
            current = parent;
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::super::tree::tests::sample_tree;
    use super::*;

    fn set(raw: &[u32]) -> HashSet<TaxonId> {
        raw.iter().copied().map(TaxonId).collect()
    }

    #[test]
    fn test_clade() {
        let tree = sample_tree();
        assert_eq!(
            tree.clade(TaxonId(3337)).unwrap(),
            set(&[3337, 3352, 3351, 99001, 3340, 3348])
        );
        assert_eq!(tree.clade(TaxonId(3323)).unwrap(), set(&[3323]));
        assert_eq!(tree.clade(TaxonId::ROOT).unwrap().len(), tree.len());
        assert!(matches!(
            tree.clade(TaxonId(42)),
            Err(TaxTreeError::UnknownTaxon(_))
        ));
    }

    #[test]
    fn test_leaves() {
        let tree = sample_tree();
        let leaves = tree.leaves(&[TaxonId::ROOT, TaxonId(3337), TaxonId(3323)]).unwrap();
        assert_eq!(leaves[&TaxonId::ROOT], set(&[2000, 3352, 99001, 3348, 3323]));
        assert_eq!(leaves[&TaxonId(3337)], set(&[3352, 99001, 3348]));
        assert_eq!(leaves[&TaxonId(3323)], set(&[3323]));
    }

    #[test]
    fn test_leaves_match_leaf_set() {
        let tree = sample_tree();
        let leaves = tree.leaves(&[TaxonId::ROOT]).unwrap();
        let leaf_set: HashSet<TaxonId> = tree.leaf_ids().copied().collect();
        assert_eq!(leaves[&TaxonId::ROOT], leaf_set);
    }

    #[test]
    fn test_clade_rank_taxids_single_rank() {
        let tree = sample_tree();
        let found = tree
            .clade_rank_taxids(&[TaxonId::ROOT], Some(CanonicalRank::Genus))
            .unwrap();
        let by_rank = &found[&TaxonId::ROOT];
        assert_eq!(by_rank.len(), 1);
        assert_eq!(by_rank[&CanonicalRank::Genus], set(&[3337, 3322]));
    }

    #[test]
    fn test_clade_rank_taxids_all_ranks() {
        let tree = sample_tree();
        let found = tree.clade_rank_taxids(&[TaxonId(2759)], None).unwrap();
        let by_rank = &found[&TaxonId(2759)];

        assert_eq!(by_rank.len(), 8);
        assert_eq!(by_rank[&CanonicalRank::Superkingdom], set(&[2759]));
        assert_eq!(by_rank[&CanonicalRank::Family], set(&[3318]));
        assert_eq!(by_rank[&CanonicalRank::Species], set(&[3352, 3351, 3348, 3323]));
        assert!(by_rank[&CanonicalRank::Phylum].is_empty());
    }

    #[test]
    fn test_clade_rank_taxids_prunes_below_wanted_rank() {
        let tree = sample_tree();
        let found = tree
            .clade_rank_taxids(&[TaxonId(3318)], Some(CanonicalRank::Family))
            .unwrap();
        assert_eq!(found[&TaxonId(3318)][&CanonicalRank::Family], set(&[3318]));
        // Pruned at the family: no species lineage was ever needed
        assert!(!tree.caches.lineages.contains_key(&TaxonId(3348)));
    }

    #[test]
    fn test_siblings_of_species() {
        let tree = sample_tree();
        assert_eq!(
            tree.siblings(TaxonId(3352)).unwrap(),
            set(&[3352, 3351, 3348])
        );
    }

    #[test]
    fn test_siblings_of_genus() {
        let tree = sample_tree();
        assert_eq!(tree.siblings(TaxonId(3322)).unwrap(), set(&[3337, 3322]));
    }

    #[test]
    fn test_siblings_anchor_falls_back_to_root() {
        let tree = sample_tree();
        assert_eq!(tree.siblings(TaxonId(3318)).unwrap(), set(&[3318]));
        assert_eq!(tree.siblings(TaxonId(20)).unwrap(), set(&[20]));
    }

    #[test]
    fn test_siblings_rejects_inexact_or_unsupported_ranks() {
        let tree = sample_tree();
        for taxon in [3340, 99001, 2759, 1] {
            assert!(
                matches!(tree.siblings(TaxonId(taxon)), Err(TaxTreeError::InvalidRank(_))),
                "taxon {taxon} should be rejected"
            );
        }
    }
}
