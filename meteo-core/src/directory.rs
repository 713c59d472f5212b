use crate::{LocationRecord, error::Result};
use async_trait::async_trait;
use std::{convert::TryFrom, fmt::Debug};

pub mod swisspost;

pub use swisspost::SwissPostDirectory;

/// Which directory field a lookup filters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Criterion {
    ByCode,
    ByName,
}

impl Criterion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Criterion::ByCode => "code",
            Criterion::ByName => "name",
        }
    }

    pub const fn all() -> &'static [Criterion] {
        &[Criterion::ByCode, Criterion::ByName]
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Criterion {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> std::result::Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "code" => Ok(Criterion::ByCode),
            "name" => Ok(Criterion::ByName),
            _ => Err(anyhow::anyhow!(
                "Unknown lookup criterion '{value}'. Supported criteria: code, name."
            )),
        }
    }
}

/// Postal-code directory.
///
/// An empty `Vec` means "no matches" and is not an error; only transport and
/// decoding failures are reported as [`crate::Error::Upstream`].
#[async_trait]
pub trait LocationDirectory: Send + Sync + Debug {
    async fn lookup(&self, criterion: Criterion, value: &str) -> Result<Vec<LocationRecord>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn criterion_as_str_roundtrip() {
        for criterion in Criterion::all() {
            let parsed = Criterion::try_from(criterion.as_str()).expect("roundtrip should succeed");
            assert_eq!(*criterion, parsed);
        }
    }

    #[test]
    fn unknown_criterion_error() {
        let err = Criterion::try_from("canton").unwrap_err();
        assert!(err.to_string().contains("Unknown lookup criterion"));
    }
}
