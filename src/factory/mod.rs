//! Vendor dispatch
//!
//! Maps the PCI vendor ID of a device to the trunk provider for that vendor.

use std::fmt;
use tracing::info;

use crate::error::TrunkError;
use crate::providers::{IntelTrunkProvider, MellanoxTrunkProvider, Provider};
use crate::sysfs::Sysfs;

/// Intel PCI vendor ID
pub const INTEL_VENDOR_ID: &str = "0x8086";
/// Mellanox PCI vendor ID
pub const MELLANOX_VENDOR_ID: &str = "0x15b3";

/// NIC vendors with a trunk provider
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vendor {
    Intel,
    Mellanox,
}

impl Vendor {
    /// Look up the vendor for a PCI vendor ID
    pub fn from_id(vendor_id: &str) -> Result<Self, TrunkError> {
        match vendor_id {
            INTEL_VENDOR_ID => Ok(Vendor::Intel),
            MELLANOX_VENDOR_ID => Ok(Vendor::Mellanox),
            other => Err(TrunkError::UnsupportedVendor(other.to_string())),
        }
    }

    /// PCI vendor ID
    pub fn id(&self) -> &'static str {
        match self {
            Vendor::Intel => INTEL_VENDOR_ID,
            Vendor::Mellanox => MELLANOX_VENDOR_ID,
        }
    }

    /// Human readable vendor name
    pub fn name(&self) -> &'static str {
        match self {
            Vendor::Intel => "Intel",
            Vendor::Mellanox => "Mellanox",
        }
    }

    /// Build an uninitialized provider for this vendor. Does no I/O.
    pub fn provider(&self, sysfs: &Sysfs, max_ranges: Option<usize>) -> Provider {
        match self {
            Vendor::Intel => Provider::Intel(IntelTrunkProvider::new(sysfs.clone(), max_ranges)),
            Vendor::Mellanox => {
                Provider::Mellanox(MellanoxTrunkProvider::new(sysfs.clone(), max_ranges))
            }
        }
    }
}

impl fmt::Display for Vendor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name(), self.id())
    }
}

/// Resolve the vendor of a device and build its provider
pub fn get_provider_config(
    device_id: &str,
    sysfs: &Sysfs,
    max_ranges: Option<usize>,
) -> Result<Provider, TrunkError> {
    let vendor_id = sysfs.vendor_id(device_id)?;
    let vendor = Vendor::from_id(&vendor_id)?;

    info!("Using {} trunk provider for device {}", vendor, device_id);
    Ok(vendor.provider(sysfs, max_ranges))
}
