use serde::{Deserialize, Serialize};
use std::fmt;

/// Lowest usable 802.1Q VLAN ID
pub const VLAN_ID_MIN: u32 = 1;
/// Highest usable 802.1Q VLAN ID (4095 is reserved)
pub const VLAN_ID_MAX: u32 = 4094;

/// A single trunked VLAN range, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanTrunkRange {
    /// First VLAN ID of the range
    pub start: u32,
    /// Last VLAN ID of the range
    pub end: u32,
}

impl VlanTrunkRange {
    /// Create a new range
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Create a range covering a single VLAN
    pub fn single(vlan: u32) -> Self {
        Self { start: vlan, end: vlan }
    }

    /// Whether the range covers exactly one VLAN
    pub fn is_single(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for VlanTrunkRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_single() {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// Ordered set of trunk ranges, in the order they were given
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VlanTrunkRangeData {
    /// The ranges, in input order
    pub vlan_trunk_ranges: Vec<VlanTrunkRange>,
}

impl VlanTrunkRangeData {
    /// Wrap an already validated list of ranges
    pub fn new(vlan_trunk_ranges: Vec<VlanTrunkRange>) -> Self {
        Self { vlan_trunk_ranges }
    }

    /// Number of ranges
    pub fn len(&self) -> usize {
        self.vlan_trunk_ranges.len()
    }

    /// Whether there are no ranges at all
    pub fn is_empty(&self) -> bool {
        self.vlan_trunk_ranges.is_empty()
    }

    /// Iterate over the ranges in input order
    pub fn iter(&self) -> std::slice::Iter<'_, VlanTrunkRange> {
        self.vlan_trunk_ranges.iter()
    }
}

impl<'a> IntoIterator for &'a VlanTrunkRangeData {
    type Item = &'a VlanTrunkRange;
    type IntoIter = std::slice::Iter<'a, VlanTrunkRange>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
