use std::num::ParseIntError;
use std::path::PathBuf;
use thiserror::Error;

use crate::types::VlanTrunkRange;

/// Errors raised while parsing, validating, resolving or applying a trunk
#[derive(Debug, Error)]
pub enum TrunkError {
    /// A range bound is not a non-negative integer
    #[error("invalid trunk range token {token:?}: {source}")]
    Parse {
        token: String,
        #[source]
        source: ParseIntError,
    },

    /// Range start is greater than its end
    #[error("invalid trunk range {start}-{end}: start is greater than end")]
    RangeOrder { start: u32, end: u32 },

    /// Range leaves the usable VLAN ID space
    #[error("invalid trunk range {start}-{end}: VLAN IDs must be between 1 and 4094")]
    OutOfBounds { start: u32, end: u32 },

    /// Range runs into a range listed after it
    #[error("trunk range {first} overlaps trunk range {second}")]
    Overlap {
        first: VlanTrunkRange,
        second: VlanTrunkRange,
    },

    /// Reading or writing a device attribute failed
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The device belongs to a vendor without a trunk provider
    #[error("unsupported vendor {0:?}")]
    UnsupportedVendor(String),

    /// The vendor cannot represent the requested range set
    #[error("{vendor} cannot trunk {requested} ranges (limit {limit})")]
    UnsupportedRange {
        vendor: &'static str,
        requested: usize,
        limit: usize,
    },

    /// A provider operation ran before init_config
    #[error("{0} called before the provider was initialized")]
    Precondition(&'static str),

    /// The network configuration lacks something a provider needs
    #[error("invalid network configuration: {0}")]
    InvalidConfig(String),
}

impl TrunkError {
    /// Build an I/O error for an attribute path
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
