//! VLAN trunking for SR-IOV virtual functions
//! 
//! This crate configures 802.1Q trunk ranges on SR-IOV VFs:
//! - Parses and validates trunk specifications such as `10-20,30`
//! - Resolves the NIC vendor of a VF from its PCI attributes
//! - Dispatches to the Intel or Mellanox trunk provider
//! - Writes or clears the trunk on the VF

pub mod config;
pub mod error;
pub mod factory;
pub mod plugin;
pub mod providers;
pub mod sysfs;
pub mod trunk;
pub mod types;

// Re-export commonly used items
pub use config::{NetConf, PluginConfig};
pub use error::TrunkError;
pub use factory::{get_provider_config, Vendor};
pub use plugin::TrunkPlugin;
pub use providers::{Provider, VlanTrunkProviderConfig};
pub use trunk::{get_vlan_trunk_range, OverlapCheck};
pub use types::{VlanTrunkRange, VlanTrunkRangeData};
