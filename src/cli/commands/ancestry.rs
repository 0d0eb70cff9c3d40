use super::Session;
use crate::cli::output::{join_ids, print_json};
use crate::TaxonId;
use clap::Args;
use serde::Serialize;

#[derive(Args)]
pub struct LineageArgs {
    /// Taxon ids to resolve
    #[arg(required = true)]
    pub taxa: Vec<TaxonId>,
}

#[derive(Args)]
pub struct PairArgs {
    pub a: TaxonId,
    pub b: TaxonId,
}

#[derive(Serialize)]
struct LineageRow {
    taxon: TaxonId,
    lineage: Vec<TaxonId>,
}

/// Lineages are printed in the order the taxa were given; a repeated taxon
/// is printed once.
pub fn run_lineage(session: &Session, args: LineageArgs) -> anyhow::Result<()> {
    let mut results = session.tree.lineages(&args.taxa);

    let mut resolved = Vec::with_capacity(args.taxa.len());
    let mut first_error = None;
    for &taxon in &args.taxa {
        match results.remove(&taxon) {
            Some(Ok(lineage)) => resolved.push(LineageRow {
                taxon,
                lineage: lineage.to_vec(),
            }),
            Some(Err(e)) => {
                tracing::warn!("Skipping {}: {}", taxon, e);
                first_error.get_or_insert(e);
            }
            None => {}
        }
    }

    if session.json {
        print_json(&resolved)?;
    } else {
        for row in &resolved {
            println!("{}\t{}", row.taxon, join_ids(&row.lineage));
        }
    }

    match first_error {
        Some(e) => Err(e.into()),
        None => Ok(()),
    }
}

pub fn run_lca(session: &Session, args: PairArgs) -> anyhow::Result<()> {
    let lca = session.tree.lca(args.a, args.b)?;
    if session.json {
        print_json(&serde_json::json!({ "a": args.a, "b": args.b, "lca": lca }))
    } else {
        println!("{}", lca);
        Ok(())
    }
}

pub fn run_distance(session: &Session, args: PairArgs) -> anyhow::Result<()> {
    let distance = session.tree.distance(args.a, args.b)?;
    if session.json {
        print_json(&serde_json::json!({ "a": args.a, "b": args.b, "distance": distance }))
    } else {
        println!("{}", distance);
        Ok(())
    }
}
