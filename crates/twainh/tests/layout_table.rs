// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com
//
// Whole-table properties of the published TWAIN layout table.
//
// These hold on every target; platform specific sizes are checked against the
// declarative model instead of hard-coded numbers.

use twainh::{twain_schema, verify, LayoutTable, Platform};

fn table() -> &'static LayoutTable {
    LayoutTable::global().expect("layout table builds")
}

#[test]
fn test_every_struct_has_positive_size_and_offsets_inside() {
    for s in table().structs() {
        assert!(s.size > 0, "{} has size {}", s.name, s.size);
        assert!(!s.offsets.is_empty(), "{} has no members", s.name);
        for (member, &offset) in &s.offsets {
            assert!(
                (0..s.size).contains(&offset),
                "{}.{} at {} outside size {}",
                s.name,
                member,
                offset,
                s.size
            );
        }
    }
}

#[test]
fn test_offsets_are_non_decreasing_in_declaration_order() {
    for s in table().structs() {
        let offsets: Vec<i32> = s.offsets.values().copied().collect();
        assert!(
            offsets.windows(2).all(|w| w[0] <= w[1]),
            "{}: {:?}",
            s.name,
            offsets
        );
    }
}

#[test]
fn test_building_twice_is_identical() {
    let a = LayoutTable::build().unwrap();
    let b = LayoutTable::build().unwrap();
    assert_eq!(a, b);
    assert_eq!(&a, table());
}

#[test]
fn test_fixed_scalar_sizes() {
    let t = table();
    assert_eq!(t.type_size("TW_BOOL"), Some(2));
    assert_eq!(t.type_size("TW_UINT32"), Some(4));
    assert_eq!(t.type_size("TW_INT8"), Some(1));
    assert_eq!(t.type_size("TW_STR255"), Some(256));
    assert_eq!(
        t.type_size("TW_HANDLE"),
        Some(std::mem::size_of::<usize>() as i32)
    );
}

#[test]
fn test_version_offsets_strictly_increase() {
    let version = table().get_struct("TW_VERSION").unwrap();
    let members: Vec<_> = version.members().collect();
    assert_eq!(members, ["MajorNum", "MinorNum", "Language", "Country", "Info"]);

    let offsets: Vec<i32> = version.offsets.values().copied().collect();
    assert!(offsets.windows(2).all(|w| w[0] < w[1]), "{:?}", offsets);
}

#[test]
fn test_union_members_share_offsets() {
    let t = table();
    let pairs = [
        ("TW_INFO", "ReturnCode", "CondCode"),
        ("TW_FILESYSTEM", "Recursive", "Subdirectories"),
        ("TW_FILESYSTEM", "FileType", "FileSystemType"),
        ("TW_PENDINGXFERS", "EOJ", "Reserved"),
        ("TW_STATUS", "Data", "Reserved"),
    ];
    for (name, a, b) in pairs {
        assert_eq!(t.offset(name, a), t.offset(name, b), "{}.{}/{}", name, a, b);
        assert!(t.offset(name, a).is_some());
    }
}

#[test]
fn test_native_table_agrees_with_model() {
    let schema = twain_schema(Platform::host()).unwrap();
    let report = verify(table(), &schema).unwrap();
    for m in report.mismatches() {
        eprintln!("{}", m);
    }
    assert!(report.is_clean());
}

#[test]
fn test_host_json_shape() {
    let json = twainh::to_host_json(table()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    let types = value["typedefs"]["types"].as_object().unwrap();
    let structs = value["typedefs"]["structs"].as_object().unwrap();
    assert_eq!(types.len(), table().type_count());
    assert_eq!(structs.len(), table().struct_count());

    let identity = &structs["TW_IDENTITY"];
    assert_eq!(
        identity["size"].as_i64(),
        table().struct_size("TW_IDENTITY").map(i64::from)
    );
    assert_eq!(identity["offsets"].as_object().unwrap().len(), 8);
}
