use super::Session;
use crate::cli::output::{print_json, section_header_with_line, tree_item};
use crate::TaxonId;
use clap::Args;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Args)]
pub struct NameArgs {
    #[arg(required = true)]
    pub taxa: Vec<TaxonId>,
}

#[derive(Args)]
pub struct LookupArgs {
    /// Exact scientific names
    #[arg(id = "scientific_names", value_name = "NAMES", required = true)]
    pub names: Vec<String>,
}

#[derive(Serialize)]
struct NameRow<'a> {
    scientific_name: Option<&'a str>,
    common_name: Option<&'a str>,
}

pub fn run_name(session: &Session, args: NameArgs) -> anyhow::Result<()> {
    let mut rows = BTreeMap::new();
    for &taxon in &args.taxa {
        let node = session.tree.node(taxon)?;
        rows.insert(
            taxon,
            NameRow {
                scientific_name: node.scientific_name.as_deref(),
                common_name: node.common_name.as_deref(),
            },
        );
    }

    if session.json {
        return print_json(&rows);
    }
    for (taxon, row) in &rows {
        println!(
            "{}\t{}\t{}",
            taxon,
            row.scientific_name.unwrap_or("-"),
            row.common_name.unwrap_or("-")
        );
    }
    Ok(())
}

pub fn run_lookup(session: &Session, args: LookupArgs) -> anyhow::Result<()> {
    let found: BTreeMap<String, Vec<TaxonId>> = session
        .tree
        .translate_to_taxids(args.names.as_slice())
        .into_iter()
        .collect();

    if session.json {
        return print_json(&found);
    }
    for (name, taxa) in &found {
        let ids: Vec<String> = taxa.iter().map(TaxonId::to_string).collect();
        println!("{}\t{}", name, ids.join(";"));
    }
    Ok(())
}

pub fn run_summary(session: &Session) -> anyhow::Result<()> {
    let tree = &session.tree;
    let mut ranks: BTreeMap<&str, usize> = BTreeMap::new();
    for rank in tree.ranks() {
        ranks.insert(rank, tree.taxa_with_rank(rank).map_or(0, |t| t.len()));
    }
    let leaves = tree.leaf_ids().count();

    if session.json {
        return print_json(&serde_json::json!({
            "taxa": tree.len(),
            "leaves": leaves,
            "ranks": ranks,
        }));
    }

    section_header_with_line("Taxonomy Summary");
    tree_item(false, "Taxa", &tree.len().to_string());
    tree_item(false, "Leaves", &leaves.to_string());
    tree_item(true, "Distinct ranks", &ranks.len().to_string());

    section_header_with_line("Taxa per Rank");
    let total = ranks.len();
    for (index, (rank, count)) in ranks.iter().enumerate() {
        tree_item(index + 1 == total, rank, &count.to_string());
    }
    Ok(())
}
