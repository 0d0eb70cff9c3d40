//! Name resolution from `names.dmp`.
//!
//! Only scientific names and GenBank common names are kept; NCBI guarantees
//! at most one of each per taxon, so a second one is treated as corrupt input.

use super::dump::{decode_line, open_source, parse_taxon_id, require_fields};
use super::types::{TaxonId, TaxonNames};
use crate::{Result, TaxTreeError};
use std::collections::HashMap;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

const SCIENTIFIC_NAME: &str = "scientific name";
const GENBANK_COMMON_NAME: &str = "genbank common name";

/// Load the name mapping from a `names.dmp` file
pub fn load_names<P: AsRef<Path>>(path: P) -> Result<HashMap<TaxonId, TaxonNames>> {
    let path = path.as_ref();
    info!("Mapping taxon ids to names from {}", path.display());
    let file = open_source(path)?;
    parse_names(BufReader::new(file), path)
}

/// Parse `names.dmp` records from any buffered reader.
///
/// `source` is only used in error messages.
pub fn parse_names<R: BufRead>(reader: R, source: &Path) -> Result<HashMap<TaxonId, TaxonNames>> {
    let mut names: HashMap<TaxonId, TaxonNames> = HashMap::new();
    let mut skipped = 0usize;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = decode_line(line, source, line_no)?;
        if line.trim().is_empty() {
            continue;
        }

        let fields = require_fields(&line, 4, source, line_no)?;
        let name_type = fields[3];
        if name_type != SCIENTIFIC_NAME && name_type != GENBANK_COMMON_NAME {
            skipped += 1;
            continue;
        }

        let taxon = parse_taxon_id(fields[0], source, line_no)?;
        let entry = names.entry(taxon).or_default();
        let (slot, kind) = if name_type == SCIENTIFIC_NAME {
            (&mut entry.scientific_name, SCIENTIFIC_NAME)
        } else {
            (&mut entry.common_name, GENBANK_COMMON_NAME)
        };

        if slot.is_some() {
            return Err(TaxTreeError::DuplicateName { taxon, kind });
        }
        *slot = Some(fields[1].to_string());
    }

    debug!(
        "Kept names for {} taxa, skipped {} other name records",
        names.len(),
        skipped
    );
    Ok(names)
}
