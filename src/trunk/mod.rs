//! VLAN trunk range parsing and validation
//!
//! A trunk specification is a comma separated list of `start-end` or single
//! `n` tokens, e.g. `10-20,30,40-50`. Parsing keeps token order; validation
//! depends on it.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;
use tracing::debug;

use crate::error::TrunkError;
use crate::types::{VlanTrunkRange, VlanTrunkRangeData, VLAN_ID_MAX, VLAN_ID_MIN};

/// How ranges are checked against each other
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OverlapCheck {
    /// Each range must end no later than every range listed after it starts.
    /// Callers must list ranges in ascending order; touching ends are accepted.
    #[default]
    Ordered,
    /// Ranges are sorted first, then any shared VLAN between neighbours is rejected.
    Sorted,
}

/// Split a trunk specification into ranges, keeping input order
///
/// Each token is split on `-` and its first and last pieces become the bounds,
/// so `5` is the range 5-5 and `1-2-3` is the range 1-3. Bounds too large
/// for `u32` saturate and are left for validation to reject.
pub fn parse_vlan_trunk_range(spec: &str) -> Result<Vec<VlanTrunkRange>, TrunkError> {
    spec.split(',')
        .map(|token| {
            let mut bounds = token.split('-');
            let first = bounds.next().unwrap_or_default();
            let last = bounds.last().unwrap_or(first);

            let bound = |value: &str| match value.parse::<u32>() {
                Ok(bound) => Ok(bound),
                Err(e) if *e.kind() == IntErrorKind::PosOverflow => Ok(u32::MAX),
                Err(source) => Err(TrunkError::Parse {
                    token: token.to_string(),
                    source,
                }),
            };

            Ok(VlanTrunkRange::new(bound(first)?, bound(last)?))
        })
        .collect()
}

/// Check parsed ranges against the VLAN ID space and each other
pub fn validate_vlan_trunk_range(
    ranges: &[VlanTrunkRange],
    check: OverlapCheck,
) -> Result<(), TrunkError> {
    match check {
        OverlapCheck::Ordered => validate_ordered(ranges),
        OverlapCheck::Sorted => validate_sorted(ranges),
    }
}

/// Parse and validate a trunk specification in one step
pub fn get_vlan_trunk_range(
    spec: &str,
    check: OverlapCheck,
) -> Result<VlanTrunkRangeData, TrunkError> {
    let ranges = parse_vlan_trunk_range(spec)?;
    validate_vlan_trunk_range(&ranges, check)?;

    debug!("Validated trunk ranges: {}", ranges.iter().join(","));
    Ok(VlanTrunkRangeData::new(ranges))
}

fn check_range(range: &VlanTrunkRange) -> Result<(), TrunkError> {
    if range.start > range.end {
        return Err(TrunkError::RangeOrder {
            start: range.start,
            end: range.end,
        });
    }

    if range.start < VLAN_ID_MIN || range.end > VLAN_ID_MAX {
        return Err(TrunkError::OutOfBounds {
            start: range.start,
            end: range.end,
        });
    }

    Ok(())
}

fn validate_ordered(ranges: &[VlanTrunkRange]) -> Result<(), TrunkError> {
    for (i, first) in ranges.iter().enumerate() {
        check_range(first)?;

        // Only later ranges are compared, so unsorted input fails here too
        if let Some(second) = ranges[i + 1..].iter().find(|r| first.end > r.start) {
            return Err(TrunkError::Overlap {
                first: *first,
                second: *second,
            });
        }
    }

    Ok(())
}

fn validate_sorted(ranges: &[VlanTrunkRange]) -> Result<(), TrunkError> {
    ranges.iter().try_for_each(check_range)?;

    let sorted = ranges.iter().sorted_by_key(|r| (r.start, r.end));
    for (first, second) in sorted.tuple_windows() {
        if first.end >= second.start {
            return Err(TrunkError::Overlap {
                first: *first,
                second: *second,
            });
        }
    }

    Ok(())
}
