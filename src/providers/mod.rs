//! Vendor trunk providers
//!
//! Every provider goes through the same life cycle: it is created empty,
//! `init_config` hands it the validated ranges, and then `apply_config` or
//! `remove_config` writes the vendor encoding to the VF's trunk attribute.
//! Applying or removing before initialization is rejected.

mod intel;
mod mellanox;

pub use intel::{IntelEncoding, IntelTrunkProvider};
pub use mellanox::{MellanoxEncoding, MellanoxTrunkProvider};

use std::fs::OpenOptions;
use std::io::Write;
use std::marker::PhantomData;
use std::path::Path;
use tracing::{debug, info};

use crate::config::NetConf;
use crate::error::TrunkError;
use crate::factory::Vendor;
use crate::sysfs::Sysfs;
use crate::types::VlanTrunkRangeData;

/// Operations every vendor trunk provider offers
pub trait VlanTrunkProviderConfig {
    /// Store the validated ranges for the following apply or remove
    fn init_config(&mut self, ranges: &VlanTrunkRangeData);

    /// Write the stored ranges to the VF named in `conf`
    fn apply_config(&mut self, conf: &NetConf) -> Result<(), TrunkError>;

    /// Clear the stored ranges from the VF named in `conf`
    fn remove_config(&mut self, conf: &NetConf) -> Result<(), TrunkError>;

    /// Encode ranges the way this vendor's trunk attribute expects them,
    /// one entry per write
    fn get_vlan_data(&self, ranges: &VlanTrunkRangeData) -> Result<Vec<String>, TrunkError>;
}

/// Where a provider is in its life cycle
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigPhase {
    #[default]
    Uninitialized,
    Initialized,
    Applied,
    Removed,
}

/// How a vendor's trunk attribute expects ranges to be written
pub trait TrunkEncoding {
    /// Vendor the encoding belongs to
    const VENDOR: Vendor;

    /// One entry per write, for a non-empty range set
    fn encode(ranges: &VlanTrunkRangeData) -> Vec<String>;
}

/// Trunk provider for one vendor encoding
#[derive(Debug, Clone)]
pub struct TrunkProvider<E> {
    sysfs: Sysfs,
    max_ranges: Option<usize>,
    phase: ConfigPhase,
    ranges: VlanTrunkRangeData,
    encoding: PhantomData<E>,
}

impl<E: TrunkEncoding> TrunkProvider<E> {
    /// Create an uninitialized provider
    pub fn new(sysfs: Sysfs, max_ranges: Option<usize>) -> Self {
        Self {
            sysfs,
            max_ranges,
            phase: ConfigPhase::Uninitialized,
            ranges: VlanTrunkRangeData::default(),
            encoding: PhantomData,
        }
    }

    /// Current life cycle phase
    pub fn phase(&self) -> ConfigPhase {
        self.phase
    }

    fn write(&self, conf: &NetConf, verb: &str, operation: &'static str) -> Result<(), TrunkError> {
        if self.phase == ConfigPhase::Uninitialized {
            return Err(TrunkError::Precondition(operation));
        }

        let (master, vf) = vf_target(conf)?;
        let entries = self.get_vlan_data(&self.ranges)?;

        write_trunk_commands(&self.sysfs.trunk_file(master, vf), verb, &entries)
    }
}

impl<E: TrunkEncoding> Default for TrunkProvider<E> {
    fn default() -> Self {
        Self::new(Sysfs::default(), None)
    }
}

impl<E: TrunkEncoding> VlanTrunkProviderConfig for TrunkProvider<E> {
    fn init_config(&mut self, ranges: &VlanTrunkRangeData) {
        self.ranges = ranges.clone();
        self.phase = ConfigPhase::Initialized;
    }

    fn apply_config(&mut self, conf: &NetConf) -> Result<(), TrunkError> {
        self.write(conf, "add", "apply_config")?;
        self.phase = ConfigPhase::Applied;
        Ok(())
    }

    fn remove_config(&mut self, conf: &NetConf) -> Result<(), TrunkError> {
        self.write(conf, "rem", "remove_config")?;
        self.phase = ConfigPhase::Removed;
        Ok(())
    }

    fn get_vlan_data(&self, ranges: &VlanTrunkRangeData) -> Result<Vec<String>, TrunkError> {
        if ranges.is_empty() {
            return Err(TrunkError::InvalidConfig(format!(
                "no trunk ranges for {}",
                E::VENDOR.name()
            )));
        }

        if let Some(limit) = self.max_ranges.filter(|&limit| ranges.len() > limit) {
            return Err(TrunkError::UnsupportedRange {
                vendor: E::VENDOR.name(),
                requested: ranges.len(),
                limit,
            });
        }

        Ok(E::encode(ranges))
    }
}

/// Trunk provider selected for a device
#[derive(Debug, Clone)]
pub enum Provider {
    Intel(IntelTrunkProvider),
    Mellanox(MellanoxTrunkProvider),
}

impl Provider {
    /// Vendor this provider drives
    pub fn vendor(&self) -> Vendor {
        match self {
            Provider::Intel(_) => Vendor::Intel,
            Provider::Mellanox(_) => Vendor::Mellanox,
        }
    }

    /// Current life cycle phase
    pub fn phase(&self) -> ConfigPhase {
        match self {
            Provider::Intel(p) => p.phase(),
            Provider::Mellanox(p) => p.phase(),
        }
    }
}

impl VlanTrunkProviderConfig for Provider {
    fn init_config(&mut self, ranges: &VlanTrunkRangeData) {
        match self {
            Provider::Intel(p) => p.init_config(ranges),
            Provider::Mellanox(p) => p.init_config(ranges),
        }
    }

    fn apply_config(&mut self, conf: &NetConf) -> Result<(), TrunkError> {
        match self {
            Provider::Intel(p) => p.apply_config(conf),
            Provider::Mellanox(p) => p.apply_config(conf),
        }
    }

    fn remove_config(&mut self, conf: &NetConf) -> Result<(), TrunkError> {
        match self {
            Provider::Intel(p) => p.remove_config(conf),
            Provider::Mellanox(p) => p.remove_config(conf),
        }
    }

    fn get_vlan_data(&self, ranges: &VlanTrunkRangeData) -> Result<Vec<String>, TrunkError> {
        match self {
            Provider::Intel(p) => p.get_vlan_data(ranges),
            Provider::Mellanox(p) => p.get_vlan_data(ranges),
        }
    }
}

/// PF interface name and VF index a NetConf points at
fn vf_target(conf: &NetConf) -> Result<(&str, u32), TrunkError> {
    let missing = |what: &str| {
        TrunkError::InvalidConfig(format!("no {} for device {}", what, conf.device_id))
    };

    let master = conf
        .master
        .as_deref()
        .filter(|m| !m.is_empty())
        .ok_or_else(|| missing("PF interface"))?;
    let vf = conf.vf.ok_or_else(|| missing("VF index"))?;

    Ok((master, vf))
}

/// Write each command to the trunk attribute with its own write
///
/// The attribute must already exist; a missing VF is an error, not a new file.
fn write_trunk_commands(path: &Path, verb: &str, entries: &[String]) -> Result<(), TrunkError> {
    for entry in entries {
        let command = format!("{} {}", verb, entry);
        debug!("Writing {:?} to {}", command, path.display());

        let mut file = OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .map_err(|e| TrunkError::io(path, e))?;
        file.write_all(command.as_bytes())
            .map_err(|e| TrunkError::io(path, e))?;
    }

    info!("Wrote {} trunk command(s) to {}", entries.len(), path.display());
    Ok(())
}
