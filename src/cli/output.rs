//! Query result printing for the command line
use crate::TaxonId;
use colored::*;
use serde::Serialize;
use std::collections::HashSet;

pub fn section_header_with_line(title: &str) {
    println!("\n{}", title.bold().cyan());
    println!("{}", "─".repeat(title.len()).dimmed());
}

pub fn tree_item(is_last: bool, label: &str, value: &str) {
    let prefix = if is_last { "└─" } else { "├─" };
    println!("{} {}: {}", prefix.dimmed(), label, value);
}

/// Print `value` as pretty JSON
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Ascending ids for stable output
pub fn sorted(taxa: &HashSet<TaxonId>) -> Vec<TaxonId> {
    let mut taxa: Vec<TaxonId> = taxa.iter().copied().collect();
    taxa.sort();
    taxa
}

/// `1;131567;2759` style id list
pub fn join_ids<'a, I: IntoIterator<Item = &'a TaxonId>>(taxa: I) -> String {
    taxa.into_iter()
        .map(TaxonId::to_string)
        .collect::<Vec<_>>()
        .join(";")
}
