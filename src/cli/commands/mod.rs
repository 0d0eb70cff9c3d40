pub mod ancestry;
pub mod clade;
pub mod names;
pub mod rank;

use crate::cli::{Cli, Commands};
use crate::core::config::{load_config, Config};
use crate::utils::parallel::configure_thread_pool;
use crate::{TaxonomyBuilder, TaxonomyTree};
use tracing::debug;

/// Loaded taxonomy plus output settings shared by every query command
pub struct Session {
    pub tree: TaxonomyTree,
    pub json: bool,
}

pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => Config::default(),
    };

    let threads = cli.threads.unwrap_or(config.query.threads);
    if let Err(e) = configure_thread_pool(threads) {
        debug!("Thread pool already configured: {}", e);
    }

    let (nodes, names) = config.resolve_sources(cli.nodes.as_deref(), cli.names.as_deref())?;
    let tree = TaxonomyBuilder::new(&nodes, &names)
        .with_progress(cli.progress || config.build.show_progress)
        .build()?;

    let session = Session {
        tree,
        json: cli.json,
    };

    match cli.command {
        Commands::Lineage(args) => ancestry::run_lineage(&session, args),
        Commands::Lca(args) => ancestry::run_lca(&session, args),
        Commands::Distance(args) => ancestry::run_distance(&session, args),
        Commands::Rank(args) => rank::run_rank(&session, args),
        Commands::RankTaxids(args) => rank::run_rank_taxids(&session, args),
        Commands::Siblings(args) => rank::run_siblings(&session, args),
        Commands::Clade(args) => clade::run_clade(&session, args),
        Commands::Leaves(args) => clade::run_leaves(&session, args),
        Commands::Name(args) => names::run_name(&session, args),
        Commands::Lookup(args) => names::run_lookup(&session, args),
        Commands::Summary => names::run_summary(&session),
    }
}
