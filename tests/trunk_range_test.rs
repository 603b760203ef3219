// File: tests/trunk_range_test.rs

use sriov_trunk::trunk::{parse_vlan_trunk_range, validate_vlan_trunk_range};
use sriov_trunk::{get_vlan_trunk_range, OverlapCheck, TrunkError, VlanTrunkRange};

fn range(start: u32, end: u32) -> VlanTrunkRange {
    VlanTrunkRange::new(start, end)
}

#[test]
fn test_parse_keeps_token_order() -> Result<(), Box<dyn std::error::Error>> {
    let ranges = parse_vlan_trunk_range("10-20,30-40")?;
    assert_eq!(ranges, vec![range(10, 20), range(30, 40)]);

    let ranges = parse_vlan_trunk_range("300,5-7,100")?;
    assert_eq!(ranges, vec![range(300, 300), range(5, 7), range(100, 100)]);

    Ok(())
}

#[test]
fn test_parse_rejects_non_numeric_bound() {
    let err = parse_vlan_trunk_range("abc-20").unwrap_err();
    assert!(matches!(err, TrunkError::Parse { ref token, .. } if token == "abc-20"));
}

#[test]
fn test_validate_rejects_reversed_range() {
    let err = validate_vlan_trunk_range(&[range(20, 10)], OverlapCheck::Ordered).unwrap_err();
    assert!(matches!(err, TrunkError::RangeOrder { start: 20, end: 10 }));
}

#[test]
fn test_validate_rejects_out_of_bounds() {
    for bad in [range(0, 10), range(10, 4095)] {
        for check in [OverlapCheck::Ordered, OverlapCheck::Sorted] {
            let err = validate_vlan_trunk_range(&[bad], check).unwrap_err();
            assert!(matches!(err, TrunkError::OutOfBounds { .. }), "{bad} gave {err}");
        }
    }

    assert!(validate_vlan_trunk_range(&[range(1, 4094)], OverlapCheck::Ordered).is_ok());
}

#[test]
fn test_ascending_disjoint_ranges_pass_both_checks() {
    let ranges = [range(10, 20), range(25, 30)];
    assert!(validate_vlan_trunk_range(&ranges, OverlapCheck::Ordered).is_ok());
    assert!(validate_vlan_trunk_range(&ranges, OverlapCheck::Sorted).is_ok());
}

#[test]
fn test_descending_disjoint_ranges_only_pass_sorted_check() {
    // The ordered check compares each range only with the ones after it,
    // so disjoint ranges listed high to low are reported as overlapping.
    let ranges = [range(25, 30), range(10, 20)];

    let err = validate_vlan_trunk_range(&ranges, OverlapCheck::Ordered).unwrap_err();
    match err {
        TrunkError::Overlap { first, second } => {
            assert_eq!(first, range(25, 30));
            assert_eq!(second, range(10, 20));
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(validate_vlan_trunk_range(&ranges, OverlapCheck::Sorted).is_ok());
}

#[test]
fn test_real_overlap_fails_both_checks_in_both_orders() {
    for ranges in [[range(10, 20), range(15, 30)], [range(15, 30), range(10, 20)]] {
        for check in [OverlapCheck::Ordered, OverlapCheck::Sorted] {
            let err = validate_vlan_trunk_range(&ranges, check).unwrap_err();
            assert!(matches!(err, TrunkError::Overlap { .. }));
        }
    }
}

#[test]
fn test_shared_end_vlan_only_passes_ordered_check() {
    let ranges = [range(10, 20), range(20, 30)];
    assert!(validate_vlan_trunk_range(&ranges, OverlapCheck::Ordered).is_ok());
    assert!(validate_vlan_trunk_range(&ranges, OverlapCheck::Sorted).is_err());
}

#[test]
fn test_get_vlan_trunk_range_builds_data() -> Result<(), Box<dyn std::error::Error>> {
    let data = get_vlan_trunk_range("10-20,30-40", OverlapCheck::default())?;
    assert_eq!(data.len(), 2);
    assert_eq!(data.vlan_trunk_ranges, vec![range(10, 20), range(30, 40)]);

    assert!(matches!(
        get_vlan_trunk_range("10-20,x", OverlapCheck::default()),
        Err(TrunkError::Parse { .. })
    ));
    assert!(matches!(
        get_vlan_trunk_range("20-10", OverlapCheck::default()),
        Err(TrunkError::RangeOrder { .. })
    ));

    Ok(())
}

#[test]
fn test_bounds_beyond_u32_are_out_of_bounds() {
    let err = get_vlan_trunk_range("10-5000000000", OverlapCheck::Ordered).unwrap_err();
    assert!(matches!(err, TrunkError::OutOfBounds { start: 10, .. }));

    let err = get_vlan_trunk_range("30-40,99999999999", OverlapCheck::Ordered).unwrap_err();
    assert!(matches!(err, TrunkError::OutOfBounds { .. }));

    let err = get_vlan_trunk_range("99999999999", OverlapCheck::Sorted).unwrap_err();
    assert!(matches!(err, TrunkError::OutOfBounds { .. }));
}

#[test]
fn test_range_display() {
    assert_eq!(range(10, 20).to_string(), "10-20");
    assert_eq!(range(7, 7).to_string(), "7");
}
