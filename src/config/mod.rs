use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::sysfs::SysfsPaths;
use crate::trunk::OverlapCheck;

/// Environment variable naming the plugin configuration file
pub const CONFIG_ENV: &str = "SRIOV_TRUNK_CONFIG";

/// Runtime configuration for the trunk plugin
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Device attribute locations
    #[serde(flatten)]
    pub sysfs: SysfsPaths,
    /// How trunk ranges are checked against each other
    pub overlap_check: OverlapCheck,
    /// Most ranges a provider will write to one VF
    pub max_trunk_ranges: Option<usize>,
}

impl PluginConfig {
    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let bytes = fs::read(path)
            .with_context(|| format!("Failed to read plugin config {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("Failed to parse plugin config {}", path.display()))
    }

    /// Load configuration from the file named by `SRIOV_TRUNK_CONFIG`,
    /// or use the defaults when it is unset
    pub fn from_env() -> Result<Self> {
        match env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path)),
            None => Ok(Self::default()),
        }
    }
}

/// Network attachment configuration handed in by the orchestrator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetConf {
    /// CNI specification version
    #[serde(rename = "cniVersion", default)]
    pub cni_version: String,
    /// Name of the network
    #[serde(default)]
    pub name: String,
    /// Type of CNI plugin
    #[serde(rename = "type", default)]
    pub plugin_type: String,
    /// PCI address of the VF
    #[serde(rename = "deviceID")]
    pub device_id: String,
    /// Trunk specification, e.g. `10-20,30`
    pub vlan_trunk: String,
    /// PF interface name, looked up from the device when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub master: Option<String>,
    /// VF index below the PF, looked up from the device when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vf: Option<u32>,
}

impl NetConf {
    /// Parse NetConf from bytes
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let conf: NetConf = serde_json::from_slice(bytes)
            .context("Failed to parse network configuration")?;

        if conf.device_id.is_empty() {
            anyhow::bail!("deviceID is required");
        }

        Ok(conf)
    }

    /// Create a configuration for a device and trunk specification
    pub fn new(device_id: &str, vlan_trunk: &str) -> Self {
        Self {
            cni_version: "1.0.0".to_string(),
            name: "sriov-trunk".to_string(),
            plugin_type: "sriov".to_string(),
            device_id: device_id.to_string(),
            vlan_trunk: vlan_trunk.to_string(),
            master: None,
            vf: None,
        }
    }
}
