use super::Session;
use crate::cli::output::{join_ids, print_json, sorted};
use crate::TaxonId;
use clap::Args;
use std::collections::BTreeMap;

#[derive(Args)]
pub struct CladeArgs {
    pub taxon: TaxonId,
}

#[derive(Args)]
pub struct LeavesArgs {
    /// Clade roots (defaults to the whole tree)
    pub taxa: Vec<TaxonId>,
}

pub fn run_clade(session: &Session, args: CladeArgs) -> anyhow::Result<()> {
    let clade = sorted(&session.tree.clade(args.taxon)?);
    if session.json {
        return print_json(&clade);
    }
    for taxon in &clade {
        println!("{}", taxon);
    }
    Ok(())
}

pub fn run_leaves(session: &Session, args: LeavesArgs) -> anyhow::Result<()> {
    let roots = if args.taxa.is_empty() {
        vec![TaxonId::ROOT]
    } else {
        args.taxa
    };
    let leaves: BTreeMap<TaxonId, Vec<TaxonId>> = session
        .tree
        .leaves(&roots)?
        .iter()
        .map(|(root, taxa)| (*root, sorted(taxa)))
        .collect();

    if session.json {
        return print_json(&leaves);
    }
    for (root, taxa) in &leaves {
        println!("{}\t{}", root, join_ids(taxa));
    }
    Ok(())
}
