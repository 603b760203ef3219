// File: tests/config_test.rs

use std::fs;
use std::path::PathBuf;

use sriov_trunk::{NetConf, OverlapCheck, PluginConfig};

#[test]
fn test_net_conf_parse() -> Result<(), Box<dyn std::error::Error>> {
    let conf = NetConf::parse(
        br#"{
            "cniVersion": "0.3.1",
            "name": "sriov-trunk-net",
            "type": "sriov",
            "deviceID": "0000:af:06.0",
            "vlan_trunk": "10-20,30",
            "master": "ens1f0",
            "vf": 2
        }"#,
    )?;

    assert_eq!(conf.cni_version, "0.3.1");
    assert_eq!(conf.name, "sriov-trunk-net");
    assert_eq!(conf.plugin_type, "sriov");
    assert_eq!(conf.device_id, "0000:af:06.0");
    assert_eq!(conf.vlan_trunk, "10-20,30");
    assert_eq!(conf.master.as_deref(), Some("ens1f0"));
    assert_eq!(conf.vf, Some(2));

    Ok(())
}

#[test]
fn test_net_conf_optional_fields() -> Result<(), Box<dyn std::error::Error>> {
    let conf = NetConf::parse(br#"{"deviceID": "0000:af:06.0", "vlan_trunk": "5"}"#)?;
    assert!(conf.master.is_none());
    assert!(conf.vf.is_none());

    let json = serde_json::to_string(&conf)?;
    assert!(!json.contains("master"));

    Ok(())
}

#[test]
fn test_net_conf_rejects_missing_fields() {
    assert!(NetConf::parse(br#"{"vlan_trunk": "5"}"#).is_err());
    assert!(NetConf::parse(br#"{"deviceID": "0000:af:06.0"}"#).is_err());
    assert!(NetConf::parse(br#"{"deviceID": "", "vlan_trunk": "5"}"#).is_err());
    assert!(NetConf::parse(b"not json").is_err());
}

#[test]
fn test_plugin_config_defaults() {
    let config = PluginConfig::default();
    assert_eq!(config.sysfs.pci_dir, PathBuf::from("/sys/bus/pci/devices"));
    assert_eq!(config.sysfs.net_dir, PathBuf::from("/sys/class/net"));
    assert_eq!(config.overlap_check, OverlapCheck::Ordered);
    assert_eq!(config.max_trunk_ranges, None);
}

#[test]
fn test_plugin_config_load() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("trunk.json");
    fs::write(
        &path,
        r#"{"pci_dir": "/tmp/pci", "overlap_check": "sorted", "max_trunk_ranges": 8}"#,
    )?;

    let config = PluginConfig::load(&path)?;
    assert_eq!(config.sysfs.pci_dir, PathBuf::from("/tmp/pci"));
    assert_eq!(config.sysfs.net_dir, PathBuf::from("/sys/class/net"));
    assert_eq!(config.overlap_check, OverlapCheck::Sorted);
    assert_eq!(config.max_trunk_ranges, Some(8));

    Ok(())
}

#[test]
fn test_plugin_config_load_errors() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    assert!(PluginConfig::load(&dir.path().join("missing.json")).is_err());

    let path = dir.path().join("bad.json");
    fs::write(&path, r#"{"overlap_check": "sideways"}"#)?;
    let err = PluginConfig::load(&path).unwrap_err();
    assert!(format!("{:#}", err).contains("Failed to parse plugin config"));

    Ok(())
}
