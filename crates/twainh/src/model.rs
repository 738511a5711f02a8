// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Declarative layout model.
//!
//! Computes struct layouts from field-type descriptions using C layout rules,
//! independently of the compiler. Used to cross-check the native table (see
//! [`crate::verify`]) and to answer layout questions for targets other than
//! the one being compiled for.
//!
//! # Rules
//!
//! ```text
//! field align  = min(natural align, pack)       // pack = natural for Packing::Natural
//! field offset = round_up(cursor, field align)
//! record align = max(field aligns), at least 1
//! record size  = round_up(end of last field, record align)
//! union        = every member at the union offset, size = max member size
//! ```

use std::collections::HashMap;

use crate::error::ModelError;

/// Struct packing rule of the target compiler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Packing {
    /// Natural alignment (Apple `align=power` for these types).
    Natural,
    /// `#pragma pack(n)`.
    Pack(usize),
}

impl Packing {
    fn cap(self, align: usize) -> usize {
        match self {
            Packing::Natural => align,
            Packing::Pack(n) => align.min(n),
        }
    }
}

/// Target properties that change TWAIN layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Platform {
    /// Pointer width in bytes.
    pub pointer_width: usize,
    pub packing: Packing,
    /// Apple header variants (pointer-typed `Id` and `RefCon`, natural packing).
    pub apple: bool,
}

impl Platform {
    pub const WIN32: Platform = Platform {
        pointer_width: 4,
        packing: Packing::Pack(2),
        apple: false,
    };
    pub const WIN64: Platform = Platform {
        pointer_width: 8,
        packing: Packing::Pack(2),
        apple: false,
    };
    pub const LINUX64: Platform = Platform {
        pointer_width: 8,
        packing: Packing::Pack(2),
        apple: false,
    };
    pub const MACOS64: Platform = Platform {
        pointer_width: 8,
        packing: Packing::Natural,
        apple: true,
    };

    /// The platform this crate is compiled for.
    pub fn host() -> Platform {
        let apple = cfg!(any(target_os = "macos", target_os = "ios"));
        Platform {
            pointer_width: std::mem::size_of::<usize>(),
            packing: if apple {
                Packing::Natural
            } else {
                Packing::Pack(2)
            },
            apple,
        }
    }
}

/// C scalar kinds used by the TWAIN header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scalar {
    I8,
    U8,
    I16,
    U16,
    I32,
    U32,
    /// C `int`.
    Int,
    /// Data pointer or function pointer.
    Pointer,
    /// Pointer-sized unsigned integer.
    UIntPtr,
}

impl Scalar {
    /// Natural size, which is also the natural alignment.
    pub fn size(self, platform: &Platform) -> usize {
        match self {
            Scalar::I8 | Scalar::U8 => 1,
            Scalar::I16 | Scalar::U16 => 2,
            Scalar::I32 | Scalar::U32 | Scalar::Int => 4,
            Scalar::Pointer | Scalar::UIntPtr => platform.pointer_width,
        }
    }
}

/// Type of one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldType {
    Scalar(Scalar),
    Array(Box<FieldType>, usize),
    /// Another record of the same schema, by name.
    Record(&'static str),
    /// Anonymous union; members are published flat under their own names.
    Union(Vec<FieldDef>),
}

impl FieldType {
    pub fn array(elem: FieldType, len: usize) -> FieldType {
        FieldType::Array(Box::new(elem), len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub ty: FieldType,
}

/// Shorthand constructor for [`FieldDef`].
pub fn field(name: &'static str, ty: FieldType) -> FieldDef {
    FieldDef { name, ty }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDef {
    pub name: &'static str,
    pub fields: Vec<FieldDef>,
}

/// Computed placement of one (flattened) field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    pub name: &'static str,
    pub offset: usize,
    pub size: usize,
    pub align: usize,
}

/// Computed layout of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub name: &'static str,
    pub size: usize,
    pub align: usize,
    pub fields: Vec<FieldLayout>,
}

impl RecordLayout {
    pub fn field(&self, name: &str) -> Option<&FieldLayout> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// Ordered set of record definitions for one platform.
#[derive(Debug, Clone)]
pub struct Schema {
    platform: Platform,
    records: Vec<RecordDef>,
    index: HashMap<&'static str, usize>,
}

/// Size and alignment of a field type.
#[derive(Debug, Clone, Copy)]
struct Extent {
    size: usize,
    align: usize,
}

impl Schema {
    pub fn new(platform: Platform) -> Result<Self, ModelError> {
        if let Packing::Pack(n) = platform.packing {
            if !n.is_power_of_two() {
                return Err(ModelError::InvalidPacking(n));
            }
        }
        Ok(Schema {
            platform,
            records: Vec::new(),
            index: HashMap::new(),
        })
    }

    /// Add a record. A later definition with the same name replaces the earlier one.
    pub fn record(mut self, name: &'static str, fields: Vec<FieldDef>) -> Self {
        let def = RecordDef { name, fields };
        match self.index.get(name) {
            Some(&i) => self.records[i] = def,
            None => {
                self.index.insert(name, self.records.len());
                self.records.push(def);
            }
        }
        self
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Record definitions in insertion order.
    pub fn records(&self) -> &[RecordDef] {
        &self.records
    }

    pub fn get(&self, name: &str) -> Option<&RecordDef> {
        self.index.get(name).map(|&i| &self.records[i])
    }

    /// Compute the layout of record `name`.
    pub fn layout(&self, name: &str) -> Result<RecordLayout, ModelError> {
        let mut stack = Vec::new();
        self.layout_inner(name, &mut stack)
    }

    /// Layouts of every record, in insertion order.
    pub fn layouts(&self) -> Result<Vec<RecordLayout>, ModelError> {
        self.records.iter().map(|r| self.layout(r.name)).collect()
    }

    fn layout_inner(
        &self,
        name: &str,
        stack: &mut Vec<&'static str>,
    ) -> Result<RecordLayout, ModelError> {
        let def = self
            .get(name)
            .ok_or_else(|| ModelError::UnknownRecord(name.to_string()))?;
        if stack.contains(&def.name) {
            return Err(ModelError::CyclicRecord(def.name.to_string()));
        }
        stack.push(def.name);

        let mut cursor = 0;
        let mut record_align = 1;
        let mut fields = Vec::with_capacity(def.fields.len());

        for f in &def.fields {
            let extent = self.extent(&f.ty, stack)?;
            let align = self.platform.packing.cap(extent.align);
            let offset = round_up(cursor, align);
            record_align = record_align.max(align);

            match &f.ty {
                FieldType::Union(members) => {
                    for m in members {
                        let member = self.extent(&m.ty, stack)?;
                        fields.push(FieldLayout {
                            name: m.name,
                            offset,
                            size: member.size,
                            align: self.platform.packing.cap(member.align),
                        });
                    }
                }
                _ => fields.push(FieldLayout {
                    name: f.name,
                    offset,
                    size: extent.size,
                    align,
                }),
            }

            cursor = offset + extent.size;
        }

        stack.pop();

        Ok(RecordLayout {
            name: def.name,
            size: round_up(cursor, record_align),
            align: record_align,
            fields,
        })
    }

    fn extent(&self, ty: &FieldType, stack: &mut Vec<&'static str>) -> Result<Extent, ModelError> {
        match ty {
            FieldType::Scalar(s) => {
                let size = s.size(&self.platform);
                Ok(Extent { size, align: size })
            }
            FieldType::Array(elem, len) => {
                let e = self.extent(elem, stack)?;
                Ok(Extent {
                    size: e.size * len,
                    align: e.align,
                })
            }
            FieldType::Record(name) => {
                let layout = self.layout_inner(name, stack)?;
                Ok(Extent {
                    size: layout.size,
                    align: layout.align,
                })
            }
            FieldType::Union(members) => {
                let mut size = 0;
                let mut align = 1;
                for m in members {
                    let e = self.extent(&m.ty, stack)?;
                    size = size.max(e.size);
                    align = align.max(self.platform.packing.cap(e.align));
                }
                Ok(Extent {
                    size: round_up(size, align),
                    align,
                })
            }
        }
    }
}

fn round_up(value: usize, align: usize) -> usize {
    if align <= 1 {
        return value;
    }
    (value + align - 1) & !(align - 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(s: Scalar) -> FieldType {
        FieldType::Scalar(s)
    }

    #[test]
    fn test_round_up() {
        assert_eq!(round_up(0, 4), 0);
        assert_eq!(round_up(1, 4), 4);
        assert_eq!(round_up(6, 2), 6);
        assert_eq!(round_up(7, 1), 7);
    }

    #[test]
    fn test_pack2_caps_alignment() {
        let schema = Schema::new(Platform::WIN64)
            .unwrap()
            .record(
                "S",
                vec![field("a", scalar(Scalar::U16)), field("b", scalar(Scalar::Pointer))],
            );
        let layout = schema.layout("S").unwrap();
        assert_eq!(layout.field("b").unwrap().offset, 2);
        assert_eq!(layout.size, 10);
        assert_eq!(layout.align, 2);
    }

    #[test]
    fn test_natural_alignment_pads() {
        let schema = Schema::new(Platform::MACOS64)
            .unwrap()
            .record(
                "S",
                vec![field("a", scalar(Scalar::U16)), field("b", scalar(Scalar::Pointer))],
            );
        let layout = schema.layout("S").unwrap();
        assert_eq!(layout.field("b").unwrap().offset, 8);
        assert_eq!(layout.size, 16);
    }

    #[test]
    fn test_trailing_padding_to_record_align() {
        let schema = Schema::new(Platform::WIN32).unwrap().record(
            "S",
            vec![
                field("a", scalar(Scalar::U16)),
                field("b", scalar(Scalar::U32)),
                field("c", FieldType::array(scalar(Scalar::U8), 1)),
            ],
        );
        let layout = schema.layout("S").unwrap();
        assert_eq!(layout.field("c").unwrap().offset, 6);
        assert_eq!(layout.size, 8);
    }

    #[test]
    fn test_union_members_share_offset() {
        let schema = Schema::new(Platform::LINUX64).unwrap().record(
            "S",
            vec![
                field("head", scalar(Scalar::U16)),
                field(
                    "u",
                    FieldType::Union(vec![
                        field("x", scalar(Scalar::Int)),
                        field("y", scalar(Scalar::U16)),
                    ]),
                ),
                field("tail", scalar(Scalar::U16)),
            ],
        );
        let layout = schema.layout("S").unwrap();
        let names: Vec<_> = layout.fields.iter().map(|f| f.name).collect();
        assert_eq!(names, ["head", "x", "y", "tail"]);
        assert_eq!(layout.field("x").unwrap().offset, 2);
        assert_eq!(layout.field("y").unwrap().offset, 2);
        assert_eq!(layout.field("tail").unwrap().offset, 6);
    }

    #[test]
    fn test_nested_records() {
        let schema = Schema::new(Platform::WIN32)
            .unwrap()
            .record(
                "P",
                vec![field("x", scalar(Scalar::I16)), field("y", scalar(Scalar::U16))],
            )
            .record(
                "Q",
                vec![
                    field("p", FieldType::array(FieldType::Record("P"), 3)),
                    field("n", scalar(Scalar::U8)),
                ],
            );
        let layout = schema.layout("Q").unwrap();
        assert_eq!(layout.field("n").unwrap().offset, 12);
        assert_eq!(layout.size, 14);
    }

    #[test]
    fn test_unknown_and_cyclic_records() {
        let schema = Schema::new(Platform::WIN32)
            .unwrap()
            .record("A", vec![field("b", FieldType::Record("B"))])
            .record("B", vec![field("a", FieldType::Record("A"))])
            .record("C", vec![field("z", FieldType::Record("Z"))]);
        assert_eq!(
            schema.layout("A"),
            Err(ModelError::CyclicRecord("A".to_string()))
        );
        assert_eq!(
            schema.layout("C"),
            Err(ModelError::UnknownRecord("Z".to_string()))
        );
        assert_eq!(
            schema.layout("nope"),
            Err(ModelError::UnknownRecord("nope".to_string()))
        );
    }

    #[test]
    fn test_invalid_packing() {
        let platform = Platform {
            packing: Packing::Pack(3),
            ..Platform::WIN32
        };
        assert!(matches!(
            Schema::new(platform),
            Err(ModelError::InvalidPacking(3))
        ));
    }

    #[test]
    fn test_redefinition_replaces() {
        let schema = Schema::new(Platform::WIN32)
            .unwrap()
            .record("S", vec![field("a", scalar(Scalar::U8))])
            .record("S", vec![field("a", scalar(Scalar::U32))]);
        assert_eq!(schema.records().len(), 1);
        assert_eq!(schema.layout("S").unwrap().size, 4);
    }
}
