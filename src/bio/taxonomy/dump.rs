//! Shared helpers for reading NCBI `.dmp` files
use super::types::TaxonId;
use crate::{Result, TaxTreeError};
use std::fs::File;
use std::io;
use std::path::Path;

/// Open a dump file, reporting a missing file as [`TaxTreeError::SourceNotFound`].
pub(crate) fn open_source(path: &Path) -> Result<File> {
    File::open(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => TaxTreeError::SourceNotFound {
            path: path.to_path_buf(),
        },
        _ => TaxTreeError::Io(e),
    })
}

/// Split a record on `|` and trim each field.
///
/// Works for both the tab-padded NCBI layout (`1\t|\t1\t|\tno rank\t|`) and
/// plain `1|1|no rank` lines.
pub(crate) fn split_fields(line: &str) -> Vec<&str> {
    line.split('|').map(str::trim).collect()
}

/// Unwrap a line from `BufRead::lines`. Bytes that are not UTF-8 make the
/// record malformed rather than an I/O failure.
pub(crate) fn decode_line(
    line: io::Result<String>,
    source: &Path,
    line_no: usize,
) -> Result<String> {
    line.map_err(|e| match e.kind() {
        io::ErrorKind::InvalidData => TaxTreeError::TreeConstruction(format!(
            "{}:{}: invalid UTF-8",
            source.display(),
            line_no
        )),
        _ => TaxTreeError::Io(e),
    })
}

pub(crate) fn parse_taxon_id(field: &str, source: &Path, line_no: usize) -> Result<TaxonId> {
    field.parse::<TaxonId>().map_err(|_| {
        TaxTreeError::TreeConstruction(format!(
            "{}:{}: invalid taxon id '{}'",
            source.display(),
            line_no,
            field
        ))
    })
}

pub(crate) fn require_fields<'a>(
    line: &'a str,
    min: usize,
    source: &Path,
    line_no: usize,
) -> Result<Vec<&'a str>> {
    let fields = split_fields(line);
    if fields.len() < min {
        return Err(TaxTreeError::TreeConstruction(format!(
            "{}:{}: expected at least {} fields, found {}",
            source.display(),
            line_no,
            min,
            fields.len()
        )));
    }
    Ok(fields)
}
