use itertools::Itertools;

use super::{TrunkEncoding, TrunkProvider};
use crate::factory::Vendor;
use crate::types::VlanTrunkRangeData;

/// Intel takes the whole range set in one command, `add 10-20,30`
#[derive(Debug, Clone, Copy, Default)]
pub struct IntelEncoding;

impl TrunkEncoding for IntelEncoding {
    const VENDOR: Vendor = Vendor::Intel;

    fn encode(ranges: &VlanTrunkRangeData) -> Vec<String> {
        vec![ranges.iter().join(",")]
    }
}

/// Trunk provider for Intel VFs
pub type IntelTrunkProvider = TrunkProvider<IntelEncoding>;
