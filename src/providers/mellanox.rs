use super::{TrunkEncoding, TrunkProvider};
use crate::factory::Vendor;
use crate::types::VlanTrunkRangeData;

/// Mellanox takes one range per write, as `add <start> <end>`
#[derive(Debug, Clone, Copy, Default)]
pub struct MellanoxEncoding;

impl TrunkEncoding for MellanoxEncoding {
    const VENDOR: Vendor = Vendor::Mellanox;

    fn encode(ranges: &VlanTrunkRangeData) -> Vec<String> {
        ranges
            .iter()
            .map(|r| format!("{} {}", r.start, r.end))
            .collect()
    }
}

/// Trunk provider for Mellanox VFs
pub type MellanoxTrunkProvider = TrunkProvider<MellanoxEncoding>;
