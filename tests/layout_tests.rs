//! Geometry tests
//!
//! Offset tables, binary-search hit testing, column naming and cell
//! references.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use sheetgrid::cell_ref::{
    column_name_for_number, column_number_for_name, parse_cell_range, parse_cell_ref,
};
use sheetgrid::layout::{index_for_offset, OffsetTable};
use test_case::test_case;

/// Sizes cycling through a few uneven values, like a sheet after resizing.
fn uneven(count: usize) -> OffsetTable {
    let sizes = [20.0, 35.0, 12.5, 60.0, 20.0];
    let mut table = OffsetTable::default();
    for i in 0..count {
        table.append(1, sizes[i % sizes.len()]);
    }
    table
}

#[test]
fn column_names_round_trip() {
    for n in 1..=20_000 {
        let name = column_name_for_number(n);
        assert_eq!(column_number_for_name(&name), Some(n), "{name}");
    }
}

#[test_case(1, "A")]
#[test_case(26, "Z")]
#[test_case(27, "AA")]
#[test_case(52, "AZ")]
#[test_case(53, "BA")]
#[test_case(702, "ZZ")]
#[test_case(703, "AAA")]
#[test_case(16_384, "XFD")]
fn column_names(n: usize, expected: &str) {
    assert_eq!(column_name_for_number(n), expected);
}

#[test]
fn offsets_are_strictly_increasing() {
    let table = uneven(500);
    let entries = table.as_slice();
    assert_eq!(entries.len(), 501);
    assert_eq!(entries[0], 0.0);
    for pair in entries.windows(2) {
        assert!(pair[0] < pair[1]);
    }
}

#[test]
fn lookup_agrees_with_a_linear_scan() {
    let table = uneven(200);
    let entries = table.as_slice();
    let mut coordinate = 0.0;
    while coordinate < table.total() {
        let expected = entries
            .windows(2)
            .position(|w| w[0] <= coordinate && coordinate < w[1])
            .unwrap();
        assert_eq!(table.index_for_offset(coordinate), expected, "at {coordinate}");
        coordinate += 3.25;
    }
}

#[test]
fn lookup_is_monotonic_and_clamped() {
    let table = uneven(100);
    let mut last = 0;
    let mut coordinate = -50.0;
    while coordinate < table.total() + 50.0 {
        let index = table.index_for_offset(coordinate);
        assert!(index >= last);
        assert!(index < table.count());
        last = index;
        coordinate += 1.0;
    }
    assert_eq!(table.index_for_offset(-1.0), 0);
    assert_eq!(table.index_for_offset(1e12), 99);
}

#[test]
fn boundaries_belong_to_the_following_section() {
    let table = OffsetTable::uniform(10, 20.0);
    assert_eq!(table.index_for_offset(19.999), 0);
    assert_eq!(table.index_for_offset(20.0), 1);
    assert_eq!(index_for_offset(table.as_slice(), 199.0), 9);
}

#[test]
fn resize_moves_only_later_entries() {
    let mut table = uneven(20);
    let before = table.as_slice().to_vec();
    assert!(table.resize_boundary(7, 13.0, 10.0));
    let after = table.as_slice();
    assert_eq!(&after[..7], &before[..7]);
    for i in 7..after.len() {
        assert_eq!(after[i], before[i] + 13.0);
    }
    assert!(!table.resize_boundary(0, 5.0, 10.0));
    assert!(!table.resize_boundary(21, 5.0, 10.0));
}

#[test]
fn remove_keeps_other_sizes() {
    let mut table = uneven(10);
    let sizes: Vec<f64> = (0..10).map(|i| table.size(i)).collect();
    assert_eq!(table.remove(3), Some(sizes[3]));
    let remaining: Vec<f64> = (0..9).map(|i| table.size(i)).collect();
    let mut expected = sizes.clone();
    expected.remove(3);
    assert_eq!(remaining, expected);
    assert_eq!(table.remove(9), None);
}

#[test_case("A1", Some((0, 0)))]
#[test_case("c12", Some((11, 2)))]
#[test_case("AA100", Some((99, 26)))]
#[test_case("A0", None)]
#[test_case("12", None)]
#[test_case("", None)]
fn cell_refs(reference: &str, expected: Option<(usize, usize)>) {
    assert_eq!(parse_cell_ref(reference), expected);
}

#[test]
fn ranges_normalize_corners() {
    assert_eq!(parse_cell_range("C4:A1"), Some((0, 0, 3, 2)));
    assert_eq!(parse_cell_range("B2"), Some((1, 1, 1, 1)));
    assert_eq!(parse_cell_range("B2:"), None);
}
