// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Layout table builder.
//!
//! Turns the registration list into the published two-level lookup:
//! `types: name -> {size}` and `structs: name -> {size, offsets}`. All numbers
//! are narrowed to `i32` with checked conversions; a value that does not fit
//! aborts construction instead of being wrapped.

use std::sync::OnceLock;

use indexmap::map::Entry;
use indexmap::IndexMap;
use serde::Serialize;

use crate::error::LayoutError;
use crate::registry::{self, StructEntry, TypeEntry};

/// Size of one scalar typedef.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeDescriptor {
    #[serde(skip)]
    pub name: String,
    pub size: i32,
}

/// Size and member offsets of one struct. Offsets keep declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StructDescriptor {
    #[serde(skip)]
    pub name: String,
    pub size: i32,
    pub offsets: IndexMap<String, i32>,
}

impl StructDescriptor {
    /// Offset of `member`, if registered.
    pub fn offset(&self, member: &str) -> Option<i32> {
        self.offsets.get(member).copied()
    }

    /// Member names in declaration order.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.offsets.keys().map(String::as_str)
    }
}

/// The published layout table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LayoutTable {
    types: IndexMap<String, TypeDescriptor>,
    structs: IndexMap<String, StructDescriptor>,
}

static GLOBAL: OnceLock<Result<LayoutTable, LayoutError>> = OnceLock::new();

impl LayoutTable {
    /// Build the table from the TWAIN registration list.
    pub fn build() -> Result<Self, LayoutError> {
        Self::from_entries(registry::TYPES, registry::STRUCTS)
    }

    /// Process-wide table, built on first access.
    ///
    /// A construction failure is cached too; every later call reports the
    /// same error and no table is ever handed out.
    pub fn global() -> Result<&'static LayoutTable, LayoutError> {
        GLOBAL
            .get_or_init(|| {
                let result = Self::build();
                if let Err(ref e) = result {
                    log::error!("TWAIN layout table construction failed: {}", e);
                }
                result
            })
            .as_ref()
            .map_err(Clone::clone)
    }

    /// Build a table from an arbitrary registration list.
    pub fn from_entries(types: &[TypeEntry], structs: &[StructEntry]) -> Result<Self, LayoutError> {
        let mut table = LayoutTable {
            types: IndexMap::with_capacity(types.len()),
            structs: IndexMap::with_capacity(structs.len()),
        };

        for entry in types {
            let descriptor = TypeDescriptor {
                name: entry.name.to_string(),
                size: narrow(entry.size, entry.name, None)?,
            };
            match table.types.entry(entry.name.to_string()) {
                Entry::Occupied(_) => return Err(LayoutError::DuplicateType(entry.name.into())),
                Entry::Vacant(slot) => {
                    slot.insert(descriptor);
                }
            }
        }

        for entry in structs {
            let descriptor = describe_struct(entry)?;
            match table.structs.entry(entry.name.to_string()) {
                Entry::Occupied(_) => return Err(LayoutError::DuplicateType(entry.name.into())),
                Entry::Vacant(slot) => {
                    slot.insert(descriptor);
                }
            }
        }

        log::debug!(
            "built TWAIN layout table: {} types, {} structs, {} offsets",
            table.types.len(),
            table.structs.len(),
            table.structs.values().map(|s| s.offsets.len()).sum::<usize>()
        );

        Ok(table)
    }

    /// Scalar typedefs in registration order.
    pub fn types(&self) -> impl Iterator<Item = &TypeDescriptor> {
        self.types.values()
    }

    /// Structs in registration order.
    pub fn structs(&self) -> impl Iterator<Item = &StructDescriptor> {
        self.structs.values()
    }

    pub fn type_count(&self) -> usize {
        self.types.len()
    }

    pub fn struct_count(&self) -> usize {
        self.structs.len()
    }

    pub fn get_type(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    pub fn get_struct(&self, name: &str) -> Option<&StructDescriptor> {
        self.structs.get(name)
    }

    pub fn type_size(&self, name: &str) -> Option<i32> {
        self.types.get(name).map(|t| t.size)
    }

    pub fn struct_size(&self, name: &str) -> Option<i32> {
        self.structs.get(name).map(|s| s.size)
    }

    /// Byte offset of `member` within struct `name`.
    pub fn offset(&self, name: &str, member: &str) -> Option<i32> {
        self.structs.get(name).and_then(|s| s.offset(member))
    }

    /// Copy of the table keeping the typedefs and structs whose names pass
    /// the respective predicate. Registration order is kept.
    pub fn filtered(
        &self,
        keep_type: impl Fn(&str) -> bool,
        keep_struct: impl Fn(&str) -> bool,
    ) -> LayoutTable {
        LayoutTable {
            types: self
                .types
                .iter()
                .filter(|(name, _)| keep_type(name))
                .map(|(name, t)| (name.clone(), t.clone()))
                .collect(),
            structs: self
                .structs
                .iter()
                .filter(|(name, _)| keep_struct(name))
                .map(|(name, s)| (name.clone(), s.clone()))
                .collect(),
        }
    }
}

fn describe_struct(entry: &StructEntry) -> Result<StructDescriptor, LayoutError> {
    let size = narrow(entry.size, entry.name, None)?;
    let mut offsets = IndexMap::with_capacity(entry.members.len());

    for member in entry.members {
        if member.offset >= entry.size {
            return Err(LayoutError::OffsetOutOfBounds {
                type_name: entry.name.to_string(),
                member: member.name.to_string(),
                offset: member.offset,
                size: entry.size,
            });
        }
        let offset = narrow(member.offset, entry.name, Some(member.name))?;
        if offsets.insert(member.name.to_string(), offset).is_some() {
            return Err(LayoutError::DuplicateMember {
                type_name: entry.name.to_string(),
                member: member.name.to_string(),
            });
        }
    }

    Ok(StructDescriptor {
        name: entry.name.to_string(),
        size,
        offsets,
    })
}

fn narrow(value: usize, type_name: &str, member: Option<&str>) -> Result<i32, LayoutError> {
    i32::try_from(value).map_err(|_| LayoutError::Overflow {
        type_name: type_name.to_string(),
        member: member.map(str::to_string),
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{record, MemberEntry};

    #[test]
    fn test_build_registers_everything() {
        let table = LayoutTable::build().unwrap();
        assert_eq!(table.type_count(), registry::TYPES.len());
        assert_eq!(table.struct_count(), registry::STRUCTS.len());

        for entry in registry::STRUCTS {
            let desc = table.get_struct(entry.name).unwrap();
            let names: Vec<_> = desc.members().collect();
            let expected: Vec<_> = entry.members.iter().map(|m| m.name).collect();
            assert_eq!(names, expected, "{}", entry.name);
        }
    }

    #[test]
    fn test_fix32_scenario() {
        let table = LayoutTable::build().unwrap();
        let fix = table.get_struct("TW_FIX32").unwrap();
        assert_eq!(fix.size, 4);
        assert_eq!(fix.offset("Whole"), Some(0));
        assert_eq!(fix.offset("Frac"), Some(2));
        assert_eq!(fix.offsets.len(), 2);
    }

    #[test]
    fn test_lookup_misses() {
        let table = LayoutTable::build().unwrap();
        assert_eq!(table.type_size("TW_FLOAT"), None);
        assert_eq!(table.struct_size("TW_FIX64"), None);
        assert_eq!(table.offset("TW_FIX32", "Numerator"), None);
        assert_eq!(table.offset("TW_NOPE", "Whole"), None);
    }

    #[test]
    fn test_global_is_shared() {
        let a = LayoutTable::global().unwrap();
        let b = LayoutTable::global().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a, &LayoutTable::build().unwrap());
    }

    #[test]
    fn test_filtered_keeps_order_and_descriptors() {
        let table = LayoutTable::build().unwrap();
        let subset = table.filtered(|n| n == "TW_BOOL", |n| n == "TW_VERSION" || n == "TW_FIX32");

        assert_eq!(subset.type_count(), 1);
        let names: Vec<_> = subset.structs().map(|s| s.name.as_str()).collect();
        assert_eq!(names, ["TW_FIX32", "TW_VERSION"]);
        assert_eq!(subset.get_struct("TW_VERSION"), table.get_struct("TW_VERSION"));

        let empty = table.filtered(|_| false, |_| false);
        assert_eq!((empty.type_count(), empty.struct_count()), (0, 0));
    }

    #[test]
    fn test_size_overflow_is_rejected() {
        static MEMBERS: &[MemberEntry] = &[MemberEntry { name: "Head", offset: 0 }];
        let huge = StructEntry {
            name: "TW_HUGE",
            size: i32::MAX as usize + 1,
            members: MEMBERS,
        };

        let err = LayoutTable::from_entries(&[], &[huge]).unwrap_err();
        assert_eq!(
            err,
            LayoutError::Overflow {
                type_name: "TW_HUGE".into(),
                member: None,
                value: i32::MAX as usize + 1,
            }
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_native_oversized_struct_is_rejected() {
        #[allow(non_snake_case, dead_code)]
        #[repr(C)]
        struct TW_HUGE {
            Head: u32,
            Blob: [u8; 1 << 31],
            Tail: u32,
        }

        let entry = record!(TW_HUGE { Head, Blob, Tail });
        assert!(entry.size > i32::MAX as usize);

        match LayoutTable::from_entries(&[], &[entry]) {
            Err(LayoutError::Overflow { type_name, .. }) => assert_eq!(type_name, "TW_HUGE"),
            other => panic!("expected overflow, got {:?}", other),
        }
    }

    #[test]
    fn test_size_checked_before_members() {
        static MEMBERS: &[MemberEntry] = &[MemberEntry {
            name: "Far",
            offset: i32::MAX as usize + 8,
        }];
        let entry = StructEntry {
            name: "TW_FAR",
            size: usize::MAX,
            members: MEMBERS,
        };
        assert!(matches!(
            LayoutTable::from_entries(&[], &[entry]),
            Err(LayoutError::Overflow { member: None, .. })
        ));
    }

    #[test]
    fn test_type_overflow_is_rejected() {
        let wide = TypeEntry {
            name: "TW_WIDE",
            size: u32::MAX as usize,
        };
        assert!(matches!(
            LayoutTable::from_entries(&[wide], &[]),
            Err(LayoutError::Overflow { .. })
        ));
    }

    #[test]
    fn test_offset_past_end_is_rejected() {
        static MEMBERS: &[MemberEntry] = &[MemberEntry { name: "Past", offset: 8 }];
        let entry = StructEntry {
            name: "TW_SHORT",
            size: 8,
            members: MEMBERS,
        };
        assert!(matches!(
            LayoutTable::from_entries(&[], &[entry]),
            Err(LayoutError::OffsetOutOfBounds { offset: 8, size: 8, .. })
        ));
    }

    #[test]
    fn test_duplicates_are_rejected() {
        let t = TypeEntry { name: "TW_X", size: 2 };
        assert_eq!(
            LayoutTable::from_entries(&[t, t], &[]),
            Err(LayoutError::DuplicateType("TW_X".into()))
        );

        static MEMBERS: &[MemberEntry] = &[
            MemberEntry { name: "A", offset: 0 },
            MemberEntry { name: "A", offset: 2 },
        ];
        let s = StructEntry {
            name: "TW_DUP",
            size: 4,
            members: MEMBERS,
        };
        assert!(matches!(
            LayoutTable::from_entries(&[], &[s]),
            Err(LayoutError::DuplicateMember { .. })
        ));
    }

    #[test]
    fn test_no_partial_table_on_failure() {
        let good = registry::STRUCTS[0];
        let bad = StructEntry {
            name: "TW_BAD",
            size: usize::MAX,
            members: &[],
        };
        assert!(LayoutTable::from_entries(registry::TYPES, &[good, bad]).is_err());
    }
}
