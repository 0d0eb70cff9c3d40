//! Kraken 2 style rank codes
use super::tree::TaxonomyTree;
use super::types::{CanonicalRank, RankCode, TaxonId};
use crate::Result;

impl TaxonomyTree {
    /// Classify `taxon` by its nearest canonical-rank ancestor.
    ///
    /// A `superfamily` four edges below its order resolves to `O4`; a
    /// species resolves to `S` at depth 0. Taxa with no canonical ancestor
    /// resolve against the root (`R`).
    pub fn rank_code(&self, taxon: TaxonId) -> Result<RankCode> {
        let (anchor, code) = self.canonical_anchor(taxon)?;
        let rank_depth = self.distance(anchor, taxon)?;
        let rank_name = self.rank(taxon)?.unwrap_or_default().to_string();

        Ok(RankCode {
            rank_name,
            rank_code: code,
            rank_depth,
        })
    }

    /// Rank codes for several taxa; any unknown taxon fails the whole call
    pub fn rank_codes(&self, taxa: &[TaxonId]) -> Result<Vec<(TaxonId, RankCode)>> {
        taxa.iter()
            .map(|&taxon| Ok((taxon, self.rank_code(taxon)?)))
            .collect()
    }

    /// Walk up from `taxon` itself to the first taxon with a canonical
    /// textual rank, or to the root.
    fn canonical_anchor(&self, taxon: TaxonId) -> Result<(TaxonId, CanonicalRank)> {
        let mut current = taxon;
        loop {
            let node = self.node(current)?;
            if let Some(code) = node.rank.as_deref().and_then(CanonicalRank::from_rank_name) {
                return Ok((current, code));
            }
            match node.parent {
                Some(parent) if !current.is_root() => current = parent,
                _ => return Ok((current, CanonicalRank::Root)),
            }
        }
    }
}
