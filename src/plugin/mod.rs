use anyhow::{Context, Result};
use tracing::info;

use crate::config::{NetConf, PluginConfig};
use crate::error::TrunkError;
use crate::factory;
use crate::providers::{Provider, VlanTrunkProviderConfig};
use crate::sysfs::Sysfs;
use crate::trunk;
use crate::types::VlanTrunkRangeData;

/// Applies and removes VLAN trunks on SR-IOV VFs
pub struct TrunkPlugin {
    /// Runtime configuration
    config: PluginConfig,
    /// Device attribute reader
    sysfs: Sysfs,
}

impl TrunkPlugin {
    /// Create a new trunk plugin
    pub fn new(config: PluginConfig) -> Self {
        let sysfs = Sysfs::new(config.sysfs.clone());
        Self { config, sysfs }
    }

    /// Configure the trunk ranges of `conf` on its VF
    pub fn apply_config(&self, conf: &NetConf) -> Result<()> {
        let (mut provider, conf) = self.prepare(conf)?;

        provider
            .apply_config(&conf)
            .with_context(|| format!("Failed to apply VLAN trunk on device {}", conf.device_id))?;

        info!("Applied VLAN trunk {} on device {}", conf.vlan_trunk, conf.device_id);
        Ok(())
    }

    /// Remove the trunk ranges of `conf` from its VF
    pub fn remove_config(&self, conf: &NetConf) -> Result<()> {
        let (mut provider, conf) = self.prepare(conf)?;

        provider
            .remove_config(&conf)
            .with_context(|| format!("Failed to remove VLAN trunk on device {}", conf.device_id))?;

        info!("Removed VLAN trunk {} from device {}", conf.vlan_trunk, conf.device_id);
        Ok(())
    }

    /// Parse and validate the trunk specification of `conf`
    pub fn trunk_ranges(&self, conf: &NetConf) -> Result<VlanTrunkRangeData> {
        trunk::get_vlan_trunk_range(&conf.vlan_trunk, self.config.overlap_check).map_err(|e| {
            let stage = match &e {
                TrunkError::Parse { .. } => "parse",
                _ => "validate",
            };
            let message = format!("Failed to {} VLAN trunk {:?}", stage, conf.vlan_trunk);
            anyhow::Error::new(e).context(message)
        })
    }

    /// Select the provider for the device of `conf`
    pub fn provider(&self, conf: &NetConf) -> Result<Provider> {
        let max_ranges = self.config.max_trunk_ranges;
        factory::get_provider_config(&conf.device_id, &self.sysfs, max_ranges).map_err(|e| {
            let stage = match &e {
                TrunkError::UnsupportedVendor(_) => "dispatch provider for",
                _ => "resolve vendor of",
            };
            let message = format!("Failed to {} device {}", stage, conf.device_id);
            anyhow::Error::new(e).context(message)
        })
    }

    /// Fill in the PF name and VF index when the orchestrator left them out
    pub fn resolve_target(&self, conf: &NetConf) -> Result<NetConf> {
        let mut conf = conf.clone();

        if conf.master.is_none() {
            let master = self
                .sysfs
                .pf_name(&conf.device_id)
                .with_context(|| format!("Failed to resolve PF of device {}", conf.device_id))?;
            conf.master = Some(master);
        }

        if conf.vf.is_none() {
            let vf = self.sysfs.vf_index(&conf.device_id).with_context(|| {
                format!("Failed to resolve VF index of device {}", conf.device_id)
            })?;
            conf.vf = Some(vf);
        }

        Ok(conf)
    }

    /// Run every stage up to the provider write
    fn prepare(&self, conf: &NetConf) -> Result<(Provider, NetConf)> {
        let ranges = self.trunk_ranges(conf)?;
        let mut provider = self.provider(conf)?;
        let conf = self.resolve_target(conf)?;

        provider.init_config(&ranges);
        Ok((provider, conf))
    }
}
