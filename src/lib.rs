//! In-memory NCBI taxonomy tree with memoized structural queries.
//!
//! Build a [`TaxonomyTree`] once from `nodes.dmp` and `names.dmp`, then ask it
//! for lineages, lowest common ancestors, distances, Kraken-style rank codes,
//! clades, leaves and same-rank siblings.

pub mod bio;
pub mod cli;
pub mod core;
pub mod utils;

pub use crate::bio::taxonomy::{
    CanonicalRank, Lineage, RankCode, TaxonId, TaxonNames, TaxonNode, TaxonomyBuilder,
    TaxonomyTree,
};

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaxTreeError {
    #[error("Taxonomy source not found: {}", .path.display())]
    SourceNotFound { path: PathBuf },

    #[error("Found more than one {kind} for taxon {taxon}")]
    DuplicateName { taxon: TaxonId, kind: &'static str },

    #[error("Tree construction error: {0}")]
    TreeConstruction(String),

    #[error("Unknown taxon: {0}")]
    UnknownTaxon(TaxonId),

    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    /// A query found the built tree in a state the builder rules out
    #[error("Broken taxonomy invariant: {0}")]
    Invariant(String),
}

pub type Result<T> = std::result::Result<T, TaxTreeError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_error_display() {
        let missing = TaxTreeError::SourceNotFound {
            path: PathBuf::from("/data/nodes.dmp"),
        };
        assert_eq!(
            missing.to_string(),
            "Taxonomy source not found: /data/nodes.dmp"
        );

        let duplicate = TaxTreeError::DuplicateName {
            taxon: TaxonId(9606),
            kind: "scientific name",
        };
        assert_eq!(
            duplicate.to_string(),
            "Found more than one scientific name for taxon 9606"
        );

        let unknown = TaxTreeError::UnknownTaxon(TaxonId(42));
        assert_eq!(unknown.to_string(), "Unknown taxon: 42");

        let rank = TaxTreeError::InvalidRank("superfamily".to_string());
        assert_eq!(rank.to_string(), "Invalid rank: superfamily");

        let invariant = TaxTreeError::Invariant("taxa 3 and 5 share no ancestor".to_string());
        assert_eq!(
            invariant.to_string(),
            "Broken taxonomy invariant: taxa 3 and 5 share no ancestor"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "access denied");
        let err: TaxTreeError = io_err.into();

        match err {
            TaxTreeError::Io(e) => assert_eq!(e.kind(), io::ErrorKind::PermissionDenied),
            _ => panic!("Expected Io error variant"),
        }
    }
}
