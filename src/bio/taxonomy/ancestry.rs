//! Lineage, lowest common ancestor and distance queries.
//!
//! Everything here is built on cached lineages. Pairwise results are cached
//! under the ordered pair (smaller id first), so `lca(a, b)` and `lca(b, a)`
//! share one entry.

use super::tree::{pair_key, TaxonomyTree};
use super::types::{Lineage, TaxonId};
use crate::{Result, TaxTreeError};
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::trace;

impl TaxonomyTree {
    /// Root-first path from the root down to `taxon`, inclusive.
    ///
    /// The upward walk stops early at the first ancestor whose lineage is
    /// already cached and reuses it as the prefix.
    pub fn lineage(&self, taxon: TaxonId) -> Result<Lineage> {
        if let Some(hit) = self.caches.lineages.get(&taxon) {
            return Ok(Arc::clone(hit.value()));
        }

        let mut tail = vec![taxon];
        let mut prefix: Option<Lineage> = None;
        let mut current = self.node(taxon)?.parent;
        while let Some(parent) = current {
            if let Some(hit) = self.caches.lineages.get(&parent) {
                prefix = Some(Arc::clone(hit.value()));
                break;
            }
            tail.push(parent);
            current = self.node(parent)?.parent;
        }
        tail.reverse();

        let lineage: Lineage = match prefix {
            Some(prefix) => prefix.iter().copied().chain(tail).collect(),
            None => tail.into(),
        };
        trace!("Computed lineage of {} ({} taxa)", taxon, lineage.len());

        let entry = self.caches.lineages.entry(taxon).or_insert(lineage);
        Ok(Arc::clone(entry.value()))
    }

    /// Resolve many lineages in parallel. Each taxon succeeds or fails on
    /// its own.
    pub fn lineages(&self, taxa: &[TaxonId]) -> HashMap<TaxonId, Result<Lineage>> {
        taxa.par_iter()
            .map(|&taxon| (taxon, self.lineage(taxon)))
            .collect()
    }

    /// Number of edges between the root and `taxon`
    pub fn depth(&self, taxon: TaxonId) -> Result<usize> {
        Ok(self.lineage(taxon)?.len() - 1)
    }

    /// Lowest common ancestor of two taxa.
    ///
    /// Two root-first lineages share a prefix and never reconverge, so the
    /// number of shared taxa `k` places the LCA at index `k - 1`.
    pub fn lca(&self, a: TaxonId, b: TaxonId) -> Result<TaxonId> {
        let key = pair_key(a, b);
        if let Some(hit) = self.caches.lcas.get(&key) {
            return Ok(*hit.value());
        }

        let lineage_a = self.lineage(a)?;
        let lineage_b = self.lineage(b)?;
        let in_b: HashSet<TaxonId> = lineage_b.iter().copied().collect();
        let shared = lineage_a.iter().filter(|t| in_b.contains(*t)).count();

        let lca = shared
            .checked_sub(1)
            .and_then(|index| lineage_a.get(index))
            .copied()
            .ok_or_else(|| {
                TaxTreeError::Invariant(format!("taxa {} and {} share no ancestor", a, b))
            })?;

        self.caches.lcas.entry(key).or_insert(lca);
        Ok(lca)
    }

    /// Number of edges on the path between two taxa
    pub fn distance(&self, a: TaxonId, b: TaxonId) -> Result<usize> {
        let key = pair_key(a, b);
        if let Some(hit) = self.caches.distances.get(&key) {
            return Ok(*hit.value());
        }

        let lca = self.lca(a, b)?;
        let distance = self.one_way_distance(lca, a)? + self.one_way_distance(lca, b)?;

        self.caches.distances.entry(key).or_insert(distance);
        Ok(distance)
    }

    /// Edges from `ancestor` down to `taxon`; `ancestor` must be on the
    /// lineage of `taxon`. Callers pass an LCA, so a miss means the built
    /// tree is inconsistent.
    fn one_way_distance(&self, ancestor: TaxonId, taxon: TaxonId) -> Result<usize> {
        let lineage = self.lineage(taxon)?;
        let ancestor_index = lineage
            .iter()
            .position(|&t| t == ancestor)
            .ok_or_else(|| {
                TaxTreeError::Invariant(format!(
                    "taxon {} is not an ancestor of {}",
                    ancestor, taxon
                ))
            })?;
        Ok(lineage.len() - 1 - ancestor_index)
    }
}
