//! The built taxonomy and its query caches.
//!
//! The node map, rank index and leaf set never change after construction.
//! The three caches beside them are independently locked concurrent maps, so
//! every query takes `&self` and the tree can be shared between threads.

use super::builder::TaxonomyBuilder;
use super::types::{Lineage, TaxonId, TaxonNode};
use crate::{Result, TaxTreeError};
use dashmap::DashMap;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// Cache key for symmetric pairwise queries, smaller id first
pub(crate) type PairKey = (TaxonId, TaxonId);

pub(crate) fn pair_key(a: TaxonId, b: TaxonId) -> PairKey {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Memoized query results. Entries are never invalidated since the tree is
/// immutable.
#[derive(Debug, Default)]
pub(crate) struct TreeCaches {
    pub(crate) lineages: DashMap<TaxonId, Lineage>,
    pub(crate) distances: DashMap<PairKey, usize>,
    pub(crate) lcas: DashMap<PairKey, TaxonId>,
}

/// Number of memoized entries per cache
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct CacheStats {
    pub lineages: usize,
    pub distances: usize,
    pub lcas: usize,
}

/// Immutable NCBI taxonomy tree with memoizing query methods.
///
/// Query methods live in the `ancestry`, `rank` and `subtree` modules.
#[derive(Debug)]
pub struct TaxonomyTree {
    nodes: HashMap<TaxonId, TaxonNode>,
    by_rank: HashMap<String, HashSet<TaxonId>>,
    leaves: HashSet<TaxonId>,
    pub(crate) caches: TreeCaches,
}

impl TaxonomyTree {
    pub(crate) fn from_parts(
        nodes: HashMap<TaxonId, TaxonNode>,
        by_rank: HashMap<String, HashSet<TaxonId>>,
        leaves: HashSet<TaxonId>,
    ) -> Self {
        Self {
            nodes,
            by_rank,
            leaves,
            caches: TreeCaches::default(),
        }
    }

    /// Build a tree from `nodes.dmp` and `names.dmp`
    pub fn from_dump_files<P: AsRef<Path>, Q: AsRef<Path>>(nodes: P, names: Q) -> Result<Self> {
        TaxonomyBuilder::new(nodes, names).build()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, taxon: TaxonId) -> bool {
        self.nodes.contains_key(&taxon)
    }

    pub fn node(&self, taxon: TaxonId) -> Result<&TaxonNode> {
        self.nodes
            .get(&taxon)
            .ok_or(TaxTreeError::UnknownTaxon(taxon))
    }

    pub fn scientific_name(&self, taxon: TaxonId) -> Result<Option<&str>> {
        Ok(self.node(taxon)?.scientific_name.as_deref())
    }

    pub fn common_name(&self, taxon: TaxonId) -> Result<Option<&str>> {
        Ok(self.node(taxon)?.common_name.as_deref())
    }

    pub fn rank(&self, taxon: TaxonId) -> Result<Option<&str>> {
        Ok(self.node(taxon)?.rank.as_deref())
    }

    pub fn parent(&self, taxon: TaxonId) -> Result<Option<TaxonId>> {
        Ok(self.node(taxon)?.parent)
    }

    pub fn children(&self, taxon: TaxonId) -> Result<&[TaxonId]> {
        Ok(&self.node(taxon)?.children)
    }

    /// Leaf membership; unknown taxa are not leaves
    pub fn is_leaf(&self, taxon: TaxonId) -> bool {
        self.leaves.contains(&taxon)
    }

    pub fn leaf_ids(&self) -> impl Iterator<Item = &TaxonId> {
        self.leaves.iter()
    }

    /// All taxa whose textual rank is exactly `rank`
    pub fn taxa_with_rank(&self, rank: &str) -> Option<&HashSet<TaxonId>> {
        self.by_rank.get(rank)
    }

    /// Every textual rank present in the tree
    pub fn ranks(&self) -> impl Iterator<Item = &str> {
        self.by_rank.keys().map(String::as_str)
    }

    pub fn taxon_ids(&self) -> impl Iterator<Item = &TaxonId> {
        self.nodes.keys()
    }

    /// Find the taxa carrying each scientific name.
    ///
    /// Names are matched exactly. A name may map to several taxa (homonyms
    /// in different kingdoms) or to none.
    pub fn translate_to_taxids<S: AsRef<str>>(&self, names: &[S]) -> HashMap<String, Vec<TaxonId>> {
        let mut found: HashMap<String, Vec<TaxonId>> = names
            .iter()
            .map(|name| (name.as_ref().to_string(), Vec::new()))
            .collect();

        if found.len() != names.len() {
            tracing::warn!("Duplicated names in translate_to_taxids input");
        }

        for (taxon, node) in &self.nodes {
            if let Some(ids) = node
                .scientific_name
                .as_deref()
                .and_then(|name| found.get_mut(name))
            {
                ids.push(*taxon);
            }
        }

        for ids in found.values_mut() {
            ids.sort();
        }
        found
    }

    pub fn cache_stats(&self) -> CacheStats {
        CacheStats {
            lineages: self.caches.lineages.len(),
            distances: self.caches.distances.len(),
            lcas: self.caches.lcas.len(),
        }
    }

    /// Drop memoized results to release memory. Query results are unchanged.
    pub fn clear_caches(&self) {
        self.caches.lineages.clear();
        self.caches.distances.clear();
        self.caches.lcas.clear();
    }
}
