// File: tests/fixtures/fake_sysfs.rs

use std::fs;
use std::io;
use std::os::unix::fs::symlink;
use std::path::PathBuf;

use sriov_trunk::config::PluginConfig;
use sriov_trunk::sysfs::{Sysfs, SysfsPaths};
use tempfile::TempDir;

/// A throwaway PCI/net attribute tree laid out like sysfs
pub struct FakeSysfs {
    dir: TempDir,
}

impl FakeSysfs {
    pub fn new() -> io::Result<Self> {
        let dir = tempfile::tempdir()?;
        fs::create_dir_all(dir.path().join("pci"))?;
        fs::create_dir_all(dir.path().join("net"))?;
        Ok(Self { dir })
    }

    pub fn paths(&self) -> SysfsPaths {
        SysfsPaths {
            pci_dir: self.dir.path().join("pci"),
            net_dir: self.dir.path().join("net"),
        }
    }

    pub fn sysfs(&self) -> Sysfs {
        Sysfs::new(self.paths())
    }

    pub fn plugin_config(&self) -> PluginConfig {
        PluginConfig {
            sysfs: self.paths(),
            ..PluginConfig::default()
        }
    }

    /// A bare PCI device with only a vendor attribute
    pub fn add_device(&self, device_id: &str, vendor: &str) -> io::Result<()> {
        let dev = self.paths().pci_dir.join(device_id);
        fs::create_dir_all(&dev)?;
        fs::write(dev.join("vendor"), format!("{}\n", vendor))
    }

    /// A VF below a PF, returning the VF's trunk attribute
    pub fn add_vf(
        &self,
        device_id: &str,
        vendor: &str,
        pf_pci: &str,
        pf_name: &str,
        vf: u32,
    ) -> io::Result<PathBuf> {
        let pci = self.paths().pci_dir;

        self.add_device(device_id, vendor)?;
        fs::create_dir_all(pci.join(pf_pci).join("net").join(pf_name))?;
        symlink(format!("../{}", device_id), pci.join(pf_pci).join(format!("virtfn{}", vf)))?;
        symlink(format!("../{}", pf_pci), pci.join(device_id).join("physfn"))?;

        let sriov = self
            .paths()
            .net_dir
            .join(pf_name)
            .join("device/sriov")
            .join(vf.to_string());
        fs::create_dir_all(&sriov)?;
        let trunk = sriov.join("trunk");
        fs::write(&trunk, "")?;
        Ok(trunk)
    }
}
