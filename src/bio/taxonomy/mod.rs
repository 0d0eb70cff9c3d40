//! NCBI taxonomy tree construction and structural queries.
//!
//! [`TaxonomyBuilder`] reads `names.dmp` and `nodes.dmp` into a
//! [`TaxonomyTree`]. The tree is immutable once built; lineage, LCA and
//! distance results are memoized inside it as queries arrive.

mod ancestry;
pub mod builder;
mod dump;
pub mod names;
mod rank;
mod subtree;
pub mod tree;
pub mod types;

pub use builder::TaxonomyBuilder;
pub use names::{load_names, parse_names};
pub use subtree::RankTaxa;
pub use tree::{CacheStats, TaxonomyTree};
pub use types::{CanonicalRank, Lineage, RankCode, TaxonId, TaxonNames, TaxonNode};
