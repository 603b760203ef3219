use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use sriov_trunk::sysfs::Sysfs;
use sriov_trunk::{get_provider_config, get_vlan_trunk_range, NetConf, PluginConfig, TrunkPlugin};

/// A command line tool to configure VLAN trunks on SR-IOV VFs
#[derive(Parser)]
#[command(name = "trunk-ctl", author, version, about)]
struct Cli {
    /// Path to the plugin configuration file, defaults to $SRIOV_TRUNK_CONFIG
    #[arg(long)]
    config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse and validate a trunk specification
    Check {
        /// Trunk specification, e.g. 10-20,30
        trunk: String,
    },

    /// Show the vendor and provider of a device
    Vendor {
        /// PCI address of the device
        device_id: String,
    },

    /// Apply the trunk of a network configuration
    Apply {
        /// Network configuration file, stdin when absent
        #[arg(long)]
        conf: Option<PathBuf>,
    },

    /// Remove the trunk of a network configuration
    Remove {
        /// Network configuration file, stdin when absent
        #[arg(long)]
        conf: Option<PathBuf>,
    },
}

#[derive(Serialize)]
struct VendorReport<'a> {
    device_id: &'a str,
    vendor_id: &'static str,
    provider: &'static str,
}

fn read_net_conf(path: Option<&Path>) -> Result<NetConf> {
    let bytes = match path {
        Some(path) => fs::read(path)
            .with_context(|| format!("Failed to read network configuration {}", path.display()))?,
        None => {
            let mut bytes = Vec::new();
            io::stdin()
                .read_to_end(&mut bytes)
                .context("Failed to read from stdin")?;
            bytes
        }
    };

    NetConf::parse(&bytes)
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => PluginConfig::load(path)?,
        None => PluginConfig::from_env()?,
    };

    match cli.command {
        Commands::Check { trunk } => {
            let ranges = get_vlan_trunk_range(&trunk, config.overlap_check)
                .with_context(|| format!("Invalid VLAN trunk {:?}", trunk))?;
            println!("{}", serde_json::to_string_pretty(&ranges)?);
        }

        Commands::Vendor { device_id } => {
            let sysfs = Sysfs::new(config.sysfs.clone());
            let provider = get_provider_config(&device_id, &sysfs, config.max_trunk_ranges)
                .with_context(|| format!("Failed to select provider for device {}", device_id))?;
            let vendor = provider.vendor();

            let report = VendorReport {
                device_id: &device_id,
                vendor_id: vendor.id(),
                provider: vendor.name(),
            };
            println!("{}", serde_json::to_string_pretty(&report)?);
        }

        Commands::Apply { conf } => {
            let conf = read_net_conf(conf.as_deref())?;
            TrunkPlugin::new(config).apply_config(&conf)?;
        }

        Commands::Remove { conf } => {
            let conf = read_net_conf(conf.as_deref())?;
            TrunkPlugin::new(config).remove_config(&conf)?;
        }
    }

    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Configure logging based on verbosity, RUST_LOG wins when set
    let log_level = if cli.verbose { "debug" } else { "info" };
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level)),
        )
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set default subscriber")?;

    if let Err(err) = run(cli) {
        error!("trunk-ctl failed: {:#}", err);
        std::process::exit(1);
    }

    Ok(())
}
