use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use crate::error::TrunkError;

/// Locations of the device attribute trees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SysfsPaths {
    /// PCI device directory
    pub pci_dir: PathBuf,
    /// Network interface directory
    pub net_dir: PathBuf,
}

impl Default for SysfsPaths {
    fn default() -> Self {
        Self {
            pci_dir: PathBuf::from("/sys/bus/pci/devices"),
            net_dir: PathBuf::from("/sys/class/net"),
        }
    }
}

/// Reads device attributes below a set of [`SysfsPaths`]
#[derive(Debug, Clone, Default)]
pub struct Sysfs {
    paths: SysfsPaths,
}

impl Sysfs {
    /// Create a reader rooted at the given paths
    pub fn new(paths: SysfsPaths) -> Self {
        Self { paths }
    }

    /// The paths this reader uses
    pub fn paths(&self) -> &SysfsPaths {
        &self.paths
    }

    /// Read the vendor ID of a PCI device, e.g. `0x8086`
    ///
    /// Only the first line of the attribute counts. Nothing is cached.
    pub fn vendor_id(&self, device_id: &str) -> Result<String, TrunkError> {
        let path = self.device_dir(device_id)?.join("vendor");
        let contents = fs::read_to_string(&path).map_err(|e| TrunkError::io(&path, e))?;

        let vendor = contents.lines().next().unwrap_or_default().trim().to_string();
        debug!("Device {} reports vendor {}", device_id, vendor);
        Ok(vendor)
    }

    /// Name of the physical function interface that owns a VF
    pub fn pf_name(&self, device_id: &str) -> Result<String, TrunkError> {
        let net = self.device_dir(device_id)?.join("physfn").join("net");
        let mut entries = fs::read_dir(&net)
            .map_err(|e| TrunkError::io(&net, e))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().into_string().ok())
            .collect::<Vec<_>>();
        entries.sort();

        entries.into_iter().next().ok_or_else(|| {
            TrunkError::io(
                &net,
                io::Error::new(
                    io::ErrorKind::NotFound,
                    "no network interface on physical function",
                ),
            )
        })
    }

    /// Index of a VF below its physical function
    ///
    /// Walks the `virtfnN` links of the PF and returns the N whose target is
    /// the given device.
    pub fn vf_index(&self, device_id: &str) -> Result<u32, TrunkError> {
        let physfn = self.device_dir(device_id)?.join("physfn");
        let entries = fs::read_dir(&physfn).map_err(|e| TrunkError::io(&physfn, e))?;

        for entry in entries {
            let entry = entry.map_err(|e| TrunkError::io(&physfn, e))?;
            let name = entry.file_name();
            let Some(index) = name
                .to_str()
                .and_then(|n| n.strip_prefix("virtfn"))
                .and_then(|n| n.parse::<u32>().ok())
            else {
                continue;
            };

            let target = fs::read_link(entry.path()).map_err(|e| TrunkError::io(entry.path(), e))?;
            if target.file_name().and_then(|n| n.to_str()) == Some(device_id) {
                return Ok(index);
            }
        }

        Err(TrunkError::io(
            &physfn,
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("device {} is not a virtual function of this device", device_id),
            ),
        ))
    }

    /// Trunk control attribute of a VF
    pub fn trunk_file(&self, pf_name: &str, vf: u32) -> PathBuf {
        self.paths
            .net_dir
            .join(pf_name)
            .join("device")
            .join("sriov")
            .join(vf.to_string())
            .join("trunk")
    }

    fn device_dir(&self, device_id: &str) -> Result<PathBuf, TrunkError> {
        if !is_plain_name(device_id) {
            let path = self.paths.pci_dir.join(device_id);
            return Err(TrunkError::io(
                path,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("device ID {:?} is not a plain device name", device_id),
                ),
            ));
        }

        Ok(self.paths.pci_dir.join(device_id))
    }
}

fn is_plain_name(name: &str) -> bool {
    !name.is_empty() && name != "." && name != ".." && !name.contains('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names() {
        assert!(is_plain_name("0000:af:06.0"));
        assert!(!is_plain_name(""));
        assert!(!is_plain_name(".."));
        assert!(!is_plain_name("../etc"));
        assert!(!is_plain_name("/abs"));
    }

    #[test]
    fn trunk_file_layout() {
        let sysfs = Sysfs::default();
        assert_eq!(
            sysfs.trunk_file("ens1f0", 3),
            PathBuf::from("/sys/class/net/ens1f0/device/sriov/3/trunk")
        );
    }
}
