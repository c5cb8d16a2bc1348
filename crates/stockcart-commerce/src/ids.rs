//! Newtype IDs for type-safe identifiers.
//!
//! Product ids come from the external catalog as plain integers. Wrapping
//! them keeps a product id from being confused with an amount.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;
use thiserror::Error;

/// A product identifier, serialized as a bare JSON number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    /// Create a new ID from its numeric value.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Get the numeric value.
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for ProductId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// Error parsing a [`ProductId`] from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseProductIdError {
    #[error("invalid product id: {0}")]
    Invalid(#[from] ParseIntError),

    #[error("product id must be positive")]
    Zero,
}

impl FromStr for ProductId {
    type Err = ParseProductIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u64>()? {
            0 => Err(ParseProductIdError::Zero),
            id => Ok(Self(id)),
        }
    }
}
