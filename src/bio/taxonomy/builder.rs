//! Tree construction from `nodes.dmp` joined with `names.dmp`.
//!
//! Records may reference a parent before the parent's own line appears. Such
//! parents are registered as placeholders and back-filled later. Once every
//! record is read, the root's self-loop is removed in one normalization step
//! and the result is checked to be a single tree hanging off the root.

use super::dump::{decode_line, open_source, parse_taxon_id, require_fields};
use super::names::parse_names;
use super::tree::TaxonomyTree;
use super::types::{TaxonId, TaxonNames, TaxonNode};
use crate::utils::progress::{create_file_progress, create_spinner};
use crate::{Result, TaxTreeError};
use std::collections::{HashMap, HashSet};
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Builds a [`TaxonomyTree`] from a pair of NCBI dump files
#[derive(Debug, Clone)]
pub struct TaxonomyBuilder {
    nodes_path: PathBuf,
    names_path: PathBuf,
    show_progress: bool,
}

impl TaxonomyBuilder {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(nodes_path: P, names_path: Q) -> Self {
        Self {
            nodes_path: nodes_path.as_ref().to_path_buf(),
            names_path: names_path.as_ref().to_path_buf(),
            show_progress: false,
        }
    }

    /// Draw progress bars on stderr while parsing
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    pub fn build(self) -> Result<TaxonomyTree> {
        info!("Constructing taxonomy tree...");

        let names_file = open_source(&self.names_path)?;
        let names_len = names_file.metadata()?.len();
        let names_progress =
            create_file_progress(names_len, "Parsing names.dmp", self.show_progress);
        info!(
            "Mapping taxon ids to names from {}",
            self.names_path.display()
        );
        let names = parse_names(
            BufReader::new(names_progress.wrap_read(names_file)),
            &self.names_path,
        )?;
        names_progress.finish_with_message("Names parsed");

        let nodes_file = open_source(&self.nodes_path)?;
        let nodes_len = nodes_file.metadata()?.len();
        let nodes_progress =
            create_file_progress(nodes_len, "Parsing nodes.dmp", self.show_progress);
        info!("Reading taxonomy from {}", self.nodes_path.display());
        let mut state = TreeState::default();
        state.read_nodes(
            BufReader::new(nodes_progress.wrap_read(nodes_file)),
            &self.nodes_path,
            &names,
        )?;
        nodes_progress.finish_with_message("Nodes parsed");

        let spinner = create_spinner("Linking taxonomy tree", self.show_progress);
        let tree = state.finish()?;
        spinner.finish_with_message("Taxonomy tree built");
        Ok(tree)
    }

    /// Build from in-memory readers instead of files
    pub fn from_readers<N: BufRead, M: BufRead>(nodes: N, names: M) -> Result<TaxonomyTree> {
        let names = parse_names(names, Path::new("names.dmp"))?;
        let mut state = TreeState::default();
        state.read_nodes(nodes, Path::new("nodes.dmp"), &names)?;
        state.finish()
    }
}

/// Mutable tree under construction
#[derive(Default)]
struct TreeState {
    nodes: HashMap<TaxonId, TaxonNode>,
    by_rank: HashMap<String, HashSet<TaxonId>>,
    leaves: HashSet<TaxonId>,
}

impl TreeState {
    fn read_nodes<R: BufRead>(
        &mut self,
        reader: R,
        source: &Path,
        names: &HashMap<TaxonId, TaxonNames>,
    ) -> Result<()> {
        for (index, line) in reader.lines().enumerate() {
            let line_no = index + 1;
            let line = decode_line(line, source, line_no)?;
            if line.trim().is_empty() {
                continue;
            }

            let fields = require_fields(&line, 3, source, line_no)?;
            let taxon = parse_taxon_id(fields[0], source, line_no)?;
            let parent = parse_taxon_id(fields[1], source, line_no)?;
            let rank = fields[2].to_string();

            self.insert_record(taxon, parent, rank, names)
                .map_err(|msg| {
                    TaxTreeError::TreeConstruction(format!(
                        "{}:{}: {}",
                        source.display(),
                        line_no,
                        msg
                    ))
                })?;
        }

        debug!(
            "Read {} taxa in {} rank buckets",
            self.nodes.len(),
            self.by_rank.len()
        );
        Ok(())
    }

    fn insert_record(
        &mut self,
        taxon: TaxonId,
        parent: TaxonId,
        rank: String,
        names: &HashMap<TaxonId, TaxonNames>,
    ) -> std::result::Result<(), String> {
        match self.nodes.get_mut(&taxon) {
            Some(node) if node.rank.is_some() => {
                return Err(format!("duplicate record for taxon {}", taxon));
            }
            // Registered earlier as someone's parent
            Some(node) => {
                node.rank = Some(rank.clone());
                node.parent = Some(parent);
            }
            None => {
                let mut node = TaxonNode::placeholder(names.get(&taxon));
                node.rank = Some(rank.clone());
                node.parent = Some(parent);
                self.nodes.insert(taxon, node);
                self.leaves.insert(taxon);
            }
        }

        match self.nodes.get_mut(&parent) {
            Some(parent_node) => {
                parent_node.children.push(taxon);
                self.leaves.remove(&parent);
            }
            None => {
                let mut parent_node = TaxonNode::placeholder(names.get(&parent));
                parent_node.children.push(taxon);
                self.nodes.insert(parent, parent_node);
            }
        }

        self.by_rank.entry(rank).or_default().insert(taxon);
        Ok(())
    }

    /// The root lists itself as parent and child in the dump format
    fn normalize_root(&mut self) -> Result<()> {
        let root = self.nodes.get_mut(&TaxonId::ROOT).ok_or_else(|| {
            TaxTreeError::TreeConstruction(format!("root taxon {} not found", TaxonId::ROOT))
        })?;

        if root.parent != Some(TaxonId::ROOT) {
            return Err(TaxTreeError::TreeConstruction(format!(
                "root taxon {} must be its own parent, found {:?}",
                TaxonId::ROOT,
                root.parent.map(|p| p.value())
            )));
        }

        root.children.retain(|&child| child != TaxonId::ROOT);
        root.parent = None;
        if root.children.is_empty() {
            self.leaves.insert(TaxonId::ROOT);
        }
        Ok(())
    }

    /// Every taxon must have its own record and hang off the root
    fn validate(&self) -> Result<()> {
        let mut dangling: Vec<TaxonId> = self
            .nodes
            .iter()
            .filter(|(id, node)| node.rank.is_none() || (node.parent.is_none() && !id.is_root()))
            .map(|(id, _)| *id)
            .collect();
        if !dangling.is_empty() {
            dangling.sort();
            return Err(TaxTreeError::TreeConstruction(format!(
                "{} taxa are referenced as parents but have no record (first: {})",
                dangling.len(),
                dangling[0]
            )));
        }

        let mut reached = 0usize;
        let mut stack = vec![TaxonId::ROOT];
        let mut seen = HashSet::with_capacity(self.nodes.len());
        while let Some(taxon) = stack.pop() {
            if !seen.insert(taxon) {
                continue;
            }
            reached += 1;
            if let Some(node) = self.nodes.get(&taxon) {
                stack.extend(node.children.iter().copied());
            }
        }

        if reached != self.nodes.len() {
            return Err(TaxTreeError::TreeConstruction(format!(
                "{} taxa are not connected to the root (parent cycle)",
                self.nodes.len() - reached
            )));
        }
        Ok(())
    }

    fn finish(mut self) -> Result<TaxonomyTree> {
        self.normalize_root()?;
        self.validate()?;

        let unnamed = self
            .nodes
            .values()
            .filter(|node| node.scientific_name.is_none())
            .count();
        if unnamed > 0 {
            warn!("{} taxa have no scientific name", unnamed);
        }

        info!(
            "Taxonomy tree built: {} taxa, {} leaves",
            self.nodes.len(),
            self.leaves.len()
        );
        Ok(TaxonomyTree::from_parts(self.nodes, self.by_rank, self.leaves))
    }
}
