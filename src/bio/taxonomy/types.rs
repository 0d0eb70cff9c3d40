//! Taxonomy value types shared by the builder and the query engines
use crate::TaxTreeError;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Taxonomy ID type - newtype pattern for type safety
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
pub struct TaxonId(pub u32);

impl TaxonId {
    /// The root of every NCBI taxonomy
    pub const ROOT: Self = Self(1);

    pub fn new(id: u32) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u32 {
        self.0
    }

    /// Check if this is the root taxon (1)
    pub fn is_root(&self) -> bool {
        *self == Self::ROOT
    }
}

impl fmt::Display for TaxonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for TaxonId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<TaxonId> for u32 {
    fn from(taxon: TaxonId) -> Self {
        taxon.0
    }
}

impl FromStr for TaxonId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>().map(Self)
    }
}

/// Root-first path from the tree root down to (and including) a taxon.
///
/// Shared so cached lineages can be handed out without copying.
pub type Lineage = Arc<[TaxonId]>;

/// Names attached to a taxon in `names.dmp`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonNames {
    pub scientific_name: Option<String>,
    /// GenBank common name
    pub common_name: Option<String>,
}

/// One node of the taxonomy tree
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonNode {
    pub scientific_name: Option<String>,
    pub common_name: Option<String>,
    /// Textual NCBI rank ("species", "no rank", ...). Only unset while a
    /// placeholder parent is waiting for its own record.
    pub rank: Option<String>,
    /// `None` only for the root once the tree is built
    pub parent: Option<TaxonId>,
    /// Direct children in the order they were read
    pub children: Vec<TaxonId>,
}

impl TaxonNode {
    pub(crate) fn placeholder(names: Option<&TaxonNames>) -> Self {
        Self {
            scientific_name: names.and_then(|n| n.scientific_name.clone()),
            common_name: names.and_then(|n| n.common_name.clone()),
            ..Self::default()
        }
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Canonical ranks with Kraken 2 report codes, in canonical order
/// (root first, species last). The derived ordering is the canonical one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CanonicalRank {
    Root,
    Superkingdom,
    Kingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl CanonicalRank {
    /// Every canonical rank except the root pseudo-rank
    pub const ALL: [CanonicalRank; 8] = [
        Self::Superkingdom,
        Self::Kingdom,
        Self::Phylum,
        Self::Class,
        Self::Order,
        Self::Family,
        Self::Genus,
        Self::Species,
    ];

    /// Ranks that [`crate::TaxonomyTree::siblings`] accepts
    pub const SIBLING_RANKS: [CanonicalRank; 6] = [
        Self::Species,
        Self::Genus,
        Self::Family,
        Self::Order,
        Self::Class,
        Self::Phylum,
    ];

    pub fn code(&self) -> char {
        match self {
            Self::Root => 'R',
            Self::Superkingdom => 'D',
            Self::Kingdom => 'K',
            Self::Phylum => 'P',
            Self::Class => 'C',
            Self::Order => 'O',
            Self::Family => 'F',
            Self::Genus => 'G',
            Self::Species => 'S',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Root => "root",
            Self::Superkingdom => "superkingdom",
            Self::Kingdom => "kingdom",
            Self::Phylum => "phylum",
            Self::Class => "class",
            Self::Order => "order",
            Self::Family => "family",
            Self::Genus => "genus",
            Self::Species => "species",
        }
    }

    /// Map a textual NCBI rank onto its canonical rank, if it has one.
    ///
    /// `domain` replaced `superkingdom` in recent NCBI dumps and shares its
    /// code. The root pseudo-rank is never returned here.
    pub fn from_rank_name(rank: &str) -> Option<Self> {
        match rank.trim().to_lowercase().as_str() {
            "superkingdom" | "domain" => Some(Self::Superkingdom),
            "kingdom" => Some(Self::Kingdom),
            "phylum" => Some(Self::Phylum),
            "class" => Some(Self::Class),
            "order" => Some(Self::Order),
            "family" => Some(Self::Family),
            "genus" => Some(Self::Genus),
            "species" => Some(Self::Species),
            _ => None,
        }
    }

    pub fn from_code(code: char) -> Option<Self> {
        match code.to_ascii_uppercase() {
            'R' => Some(Self::Root),
            'D' => Some(Self::Superkingdom),
            'K' => Some(Self::Kingdom),
            'P' => Some(Self::Phylum),
            'C' => Some(Self::Class),
            'O' => Some(Self::Order),
            'F' => Some(Self::Family),
            'G' => Some(Self::Genus),
            'S' => Some(Self::Species),
            _ => None,
        }
    }
}

impl fmt::Display for CanonicalRank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for CanonicalRank {
    type Err = TaxTreeError;

    /// Accepts a rank name ("genus") or a single-letter code ("G").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let parsed = match (chars.next(), chars.next()) {
            (Some(code), None) => Self::from_code(code),
            _ if trimmed.eq_ignore_ascii_case("root") => Some(Self::Root),
            _ => Self::from_rank_name(trimmed),
        };
        parsed.ok_or_else(|| TaxTreeError::InvalidRank(s.to_string()))
    }
}

impl Serialize for CanonicalRank {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code().to_string())
    }
}

/// Rank classification of a taxon relative to its nearest canonical ancestor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankCode {
    /// The taxon's own textual rank
    pub rank_name: String,
    pub rank_code: CanonicalRank,
    /// Edges between the taxon and the nearest canonical-rank (or root) ancestor
    pub rank_depth: usize,
}

impl RankCode {
    /// True when the taxon itself sits on a canonical rank
    pub fn is_exact(&self) -> bool {
        self.rank_depth == 0
    }
}

impl fmt::Display for RankCode {
    /// Kraken report style: `S`, `G`, `O4`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.rank_depth == 0 {
            write!(f, "{}", self.rank_code)
        } else {
            write!(f, "{}{}", self.rank_code, self.rank_depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_taxon_id_conversion() {
        let id: u32 = 12345;
        let taxon = TaxonId::from(id);
        let back: u32 = taxon.into();
        assert_eq!(id, back);
        assert_eq!(" 9606 ".parse::<TaxonId>().unwrap(), TaxonId(9606));
        assert!(TaxonId::ROOT.is_root());
    }

    #[test]
    fn test_canonical_order() {
        let mut ranks = CanonicalRank::ALL.to_vec();
        ranks.push(CanonicalRank::Root);
        ranks.sort();
        let codes: String = ranks.iter().map(|r| r.code()).collect();
        assert_eq!(codes, "RDKPCOFGS");
    }

    #[test]
    fn test_rank_parsing() {
        assert_eq!("genus".parse::<CanonicalRank>().unwrap(), CanonicalRank::Genus);
        assert_eq!("G".parse::<CanonicalRank>().unwrap(), CanonicalRank::Genus);
        assert_eq!("s".parse::<CanonicalRank>().unwrap(), CanonicalRank::Species);
        assert_eq!("root".parse::<CanonicalRank>().unwrap(), CanonicalRank::Root);
        assert_eq!(
            CanonicalRank::from_rank_name("domain"),
            Some(CanonicalRank::Superkingdom)
        );
        assert_eq!(CanonicalRank::from_rank_name("no rank"), None);
        assert!(matches!(
            "superfamily".parse::<CanonicalRank>(),
            Err(TaxTreeError::InvalidRank(_))
        ));
    }

    #[test]
    fn test_rank_code_display() {
        let exact = RankCode {
            rank_name: "species".to_string(),
            rank_code: CanonicalRank::Species,
            rank_depth: 0,
        };
        assert_eq!(exact.to_string(), "S");
        assert!(exact.is_exact());

        let nested = RankCode {
            rank_name: "superfamily".to_string(),
            rank_code: CanonicalRank::Order,
            rank_depth: 4,
        };
        assert_eq!(nested.to_string(), "O4");
        assert_eq!(
            serde_json::to_value(&nested).unwrap(),
            serde_json::json!({"rank_name": "superfamily", "rank_code": "O", "rank_depth": 4})
        );
    }
}
