//! CID list reader
//!
//! The list is delimited text whose first field on each row is the CID.
//! Reading is all-or-nothing: a file that cannot be opened or a malformed
//! row fails the whole read, so the pipeline never starts on a partial list.

use cidscrape_common::{Result, ScrapeError};
use std::io::Read;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct CidSourceOptions {
    /// Treat the first row as a header and skip it
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for CidSourceOptions {
    fn default() -> Self {
        Self {
            has_header: false,
            delimiter: b',',
        }
    }
}

/// Read the ordered CID list from `path`.
pub fn read_cids(path: impl AsRef<Path>, options: CidSourceOptions) -> Result<Vec<String>> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| {
        ScrapeError::input(format!("cannot open CID list {}: {}", path.display(), e))
    })?;

    let cids = read_cids_from_reader(file, options)?;
    tracing::info!(path = %path.display(), count = cids.len(), "Loaded CID list");
    Ok(cids)
}

/// Read the ordered CID list from any reader.
///
/// Rows with an empty first field are skipped. Duplicates are kept in order.
pub fn read_cids_from_reader<R: Read>(reader: R, options: CidSourceOptions) -> Result<Vec<String>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .delimiter(options.delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut cids = Vec::new();
    for (index, record) in csv_reader.records().enumerate() {
        let record = record.map_err(|e| {
            ScrapeError::input(format!("malformed CID list at record {}: {}", index + 1, e))
        })?;

        match record.get(0) {
            Some(cid) if !cid.is_empty() => cids.push(cid.to_string()),
            _ => tracing::debug!(record = index + 1, "Skipping row without a CID"),
        }
    }

    Ok(cids)
}
