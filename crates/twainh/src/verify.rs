// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Cross-check of the native layout table against the declarative schema.
//!
//! The registration list and the schema are written separately, so a member
//! missing from one of them, or a field declared with the wrong type, shows up
//! here as a [`Mismatch`].

use std::fmt;

use crate::error::ModelError;
use crate::model::Schema;
use crate::schema::{twain_typedefs, typedef_size};
use crate::table::LayoutTable;

/// One disagreement between the native table and the schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Struct defined in the schema but not registered.
    MissingStruct(String),
    /// Struct registered but not defined in the schema.
    UnexpectedStruct(String),
    SizeMismatch {
        name: String,
        native: i32,
        model: usize,
    },
    /// Member present in the schema but not registered.
    MissingMember { name: String, member: String },
    /// Member registered but not present in the schema.
    ExtraMember { name: String, member: String },
    OffsetMismatch {
        name: String,
        member: String,
        native: i32,
        model: usize,
    },
    /// Typedef defined in the model but not registered.
    MissingType(String),
    /// Typedef registered but not defined in the model.
    UnexpectedType(String),
    TypeSizeMismatch {
        name: String,
        native: i32,
        model: usize,
    },
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mismatch::MissingStruct(name) => write!(f, "{}: not registered", name),
            Mismatch::UnexpectedStruct(name) => write!(f, "{}: not in schema", name),
            Mismatch::SizeMismatch {
                name,
                native,
                model,
            } => write!(f, "{}: size {} (model {})", name, native, model),
            Mismatch::MissingMember { name, member } => {
                write!(f, "{}.{}: not registered", name, member)
            }
            Mismatch::ExtraMember { name, member } => {
                write!(f, "{}.{}: not in schema", name, member)
            }
            Mismatch::OffsetMismatch {
                name,
                member,
                native,
                model,
            } => write!(f, "{}.{}: offset {} (model {})", name, member, native, model),
            Mismatch::MissingType(name) => write!(f, "{}: type not registered", name),
            Mismatch::UnexpectedType(name) => write!(f, "{}: type not in model", name),
            Mismatch::TypeSizeMismatch {
                name,
                native,
                model,
            } => write!(f, "{}: type size {} (model {})", name, native, model),
        }
    }
}

/// Result of [`verify`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
    mismatches: Vec<Mismatch>,
    structs_checked: usize,
    members_checked: usize,
}

impl Report {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn structs_checked(&self) -> usize {
        self.structs_checked
    }

    pub fn members_checked(&self) -> usize {
        self.members_checked
    }
}

/// Compare every struct of `table` with `schema`, and every typedef with the
/// TWAIN typedef list.
///
/// Only meaningful when `schema` was built for the platform the table was
/// compiled on.
pub fn verify(table: &LayoutTable, schema: &Schema) -> Result<Report, ModelError> {
    let mut report = Report::default();

    for def in schema.records() {
        let layout = schema.layout(def.name)?;
        let Some(native) = table.get_struct(layout.name) else {
            report
                .mismatches
                .push(Mismatch::MissingStruct(layout.name.to_string()));
            continue;
        };
        report.structs_checked += 1;

        if native.size as usize != layout.size {
            report.mismatches.push(Mismatch::SizeMismatch {
                name: layout.name.to_string(),
                native: native.size,
                model: layout.size,
            });
        }

        for field in &layout.fields {
            match native.offset(field.name) {
                None => report.mismatches.push(Mismatch::MissingMember {
                    name: layout.name.to_string(),
                    member: field.name.to_string(),
                }),
                Some(offset) => {
                    report.members_checked += 1;
                    if offset as usize != field.offset {
                        report.mismatches.push(Mismatch::OffsetMismatch {
                            name: layout.name.to_string(),
                            member: field.name.to_string(),
                            native: offset,
                            model: field.offset,
                        });
                    }
                }
            }
        }

        for member in native.members() {
            if layout.field(member).is_none() {
                report.mismatches.push(Mismatch::ExtraMember {
                    name: layout.name.to_string(),
                    member: member.to_string(),
                });
            }
        }
    }

    for native in table.structs() {
        if schema.get(&native.name).is_none() {
            report
                .mismatches
                .push(Mismatch::UnexpectedStruct(native.name.clone()));
        }
    }

    let typedefs = twain_typedefs();
    for (name, _) in &typedefs {
        let Some(native) = table.get_type(name) else {
            report.mismatches.push(Mismatch::MissingType(name.to_string()));
            continue;
        };
        if let Some(model) = typedef_size(schema.platform(), name) {
            if native.size as usize != model {
                report.mismatches.push(Mismatch::TypeSizeMismatch {
                    name: native.name.clone(),
                    native: native.size,
                    model,
                });
            }
        }
    }

    for native in table.types() {
        if !typedefs.iter().any(|(name, _)| *name == native.name) {
            report
                .mismatches
                .push(Mismatch::UnexpectedType(native.name.clone()));
        }
    }

    if report.is_clean() {
        log::debug!(
            "layout verified: {} structs, {} members",
            report.structs_checked,
            report.members_checked
        );
    } else {
        for m in &report.mismatches {
            log::warn!("layout mismatch: {}", m);
        }
    }

    Ok(report)
}
