/*
    Derivation paths. Copay wallets only ever use non-hardened paths of
    the form 0/i, but the type handles any sequence of non-hardened
    indices.
*/

use std::fmt;
use std::str::FromStr;

use crate::hdwallet::HDWError;

/// Indices at or above 2^31 are reserved for hardened derivation
pub const HARDENED_THRESHOLD: u32 = 0x8000_0000;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Path {
    pub indexes: Vec<u32>,
}

impl Path {
    pub fn new(indexes: Vec<u32>) -> Self {
        Self { indexes }
    }

    pub fn empty() -> Self {
        Self { indexes: vec![] }
    }

    /// Returns a new path with `index` appended. The original is left
    /// untouched so a prefix can be extended repeatedly.
    pub fn extended(&self, index: u32) -> Self {
        let mut indexes = self.indexes.clone();
        indexes.push(index);
        Self { indexes }
    }
}

impl FromStr for Path {
    type Err = HDWError;

    /// Parses paths like "m/0/5". Hardened markers (') are rejected
    /// since a public-only wallet cannot traverse them.
    fn from_str(path: &str) -> Result<Self, HDWError> {
        let mut parts = path.split('/');
        if parts.next() != Some("m") {
            return Err(HDWError::BadPath(path.to_string()));
        }

        let mut indexes: Vec<u32> = vec![];
        for part in parts {
            if part.ends_with('\'') || part.ends_with('h') {
                let index: u32 = part[..part.len() - 1]
                    .parse()
                    .map_err(|_| HDWError::BadPath(path.to_string()))?;
                return Err(HDWError::HardenedIndex(index | HARDENED_THRESHOLD));
            }

            let index: u32 = part
                .parse()
                .map_err(|_| HDWError::BadPath(path.to_string()))?;
            if index >= HARDENED_THRESHOLD {
                return Err(HDWError::HardenedIndex(index));
            }
            indexes.push(index);
        }

        Ok(Self { indexes })
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "m")?;
        for index in &self.indexes {
            write!(f, "/{}", index)?;
        }
        Ok(())
    }
}
