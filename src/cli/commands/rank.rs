use super::Session;
use crate::cli::output::{join_ids, print_json, sorted};
use crate::{CanonicalRank, RankCode, TaxonId};
use clap::Args;
use std::collections::BTreeMap;

#[derive(Args)]
pub struct RankArgs {
    #[arg(required = true)]
    pub taxa: Vec<TaxonId>,
}

#[derive(Args)]
pub struct RankTaxidsArgs {
    /// Only collect this rank (name like "genus" or code like "G")
    #[arg(short, long)]
    pub rank: Option<CanonicalRank>,

    /// Clade roots to search (defaults to the whole tree)
    pub taxa: Vec<TaxonId>,
}

#[derive(Args)]
pub struct SiblingsArgs {
    pub taxon: TaxonId,
}

pub fn run_rank(session: &Session, args: RankArgs) -> anyhow::Result<()> {
    let codes: BTreeMap<TaxonId, RankCode> = session
        .tree
        .rank_codes(&args.taxa)?
        .into_iter()
        .collect();

    if session.json {
        return print_json(&codes);
    }
    for (taxon, code) in &codes {
        println!("{}\t{}\t{}", taxon, code, code.rank_name);
    }
    Ok(())
}

pub fn run_rank_taxids(session: &Session, args: RankTaxidsArgs) -> anyhow::Result<()> {
    let roots = if args.taxa.is_empty() {
        vec![TaxonId::ROOT]
    } else {
        args.taxa
    };
    let found = session.tree.clade_rank_taxids(&roots, args.rank)?;

    // Ordered view: clade root -> rank -> ascending ids
    let ordered: BTreeMap<TaxonId, BTreeMap<CanonicalRank, Vec<TaxonId>>> = found
        .iter()
        .map(|(root, by_rank)| {
            let ranks = by_rank
                .iter()
                .map(|(rank, taxa)| (*rank, sorted(taxa)))
                .collect();
            (*root, ranks)
        })
        .collect();

    if session.json {
        return print_json(&ordered);
    }
    for (root, by_rank) in &ordered {
        for (rank, taxa) in by_rank {
            println!("{}\t{}\t{}", root, rank, join_ids(taxa));
        }
    }
    Ok(())
}

pub fn run_siblings(session: &Session, args: SiblingsArgs) -> anyhow::Result<()> {
    let siblings = sorted(&session.tree.siblings(args.taxon)?);
    if session.json {
        return print_json(&siblings);
    }
    for taxon in &siblings {
        println!("{}", taxon);
    }
    Ok(())
}
