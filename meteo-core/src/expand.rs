use tracing::debug;

use crate::{
    CandidateSet,
    directory::{Criterion, LocationDirectory},
    error::Result,
};

/// Expands a postal code (or prefix) into every full code the directory files under it.
#[derive(Debug, Clone, Copy)]
pub struct ZipExpander<'a> {
    directory: &'a dyn LocationDirectory,
}

impl<'a> ZipExpander<'a> {
    pub fn new(directory: &'a dyn LocationDirectory) -> Self {
        Self { directory }
    }

    /// Full codes in directory response order. An empty set means the directory had no hits.
    pub async fn expand(&self, code_or_prefix: &str) -> Result<CandidateSet> {
        let records = self.directory.lookup(Criterion::ByCode, code_or_prefix).await?;
        let candidates = CandidateSet::from_records(&records);

        debug!(code_or_prefix, codes = ?candidates.codes(), "expanded postal code");

        Ok(candidates)
    }
}
