pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "taxtree",
    version,
    about = "Query an NCBI taxonomy: lineages, LCAs, distances, rank codes and clades",
    long_about = "taxtree builds an in-memory taxonomy tree from nodes.dmp and names.dmp \
                  and answers structural queries over it. Rank codes follow the Kraken 2 \
                  report convention (R, D, K, P, C, O, F, G, S plus a depth offset)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to nodes.dmp
    #[arg(long, env = "TAXTREE_NODES", global = true, value_name = "FILE")]
    pub nodes: Option<PathBuf>,

    /// Path to names.dmp
    #[arg(long, env = "TAXTREE_NAMES", global = true, value_name = "FILE")]
    pub names: Option<PathBuf>,

    /// TOML configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Verbosity level (can be repeated)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Show progress bars while loading the taxonomy
    #[arg(long, global = true)]
    pub progress: bool,

    /// Number of threads for batch queries (0 = all available)
    #[arg(short = 'j', long, global = true)]
    pub threads: Option<usize>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the root-first lineage of each taxon
    Lineage(commands::ancestry::LineageArgs),

    /// Lowest common ancestor of two taxa
    Lca(commands::ancestry::PairArgs),

    /// Number of edges between two taxa
    Distance(commands::ancestry::PairArgs),

    /// Kraken-style rank code of each taxon
    Rank(commands::rank::RankArgs),

    /// Taxa exactly on canonical ranks within clades
    RankTaxids(commands::rank::RankTaxidsArgs),

    /// Same-rank taxa under the nearest canonical parent
    Siblings(commands::rank::SiblingsArgs),

    /// A taxon and all of its descendants
    Clade(commands::clade::CladeArgs),

    /// Leaf taxa of clades
    Leaves(commands::clade::LeavesArgs),

    /// Scientific and common names of taxa
    Name(commands::names::NameArgs),

    /// Find taxon ids by scientific name
    Lookup(commands::names::LookupArgs),

    /// Overview of the loaded taxonomy
    Summary,
}
