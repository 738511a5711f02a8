// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error types for layout table construction and the declarative model.

use thiserror::Error;

/// Layout table construction failures.
///
/// Every variant is fatal: the table is either fully built or not published.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A size or offset does not fit the published `i32` width.
    #[error("{what} of {type_name} is {value} bytes, exceeds i32::MAX", what = describe(.member))]
    Overflow {
        type_name: String,
        /// `None` when the struct or type size itself overflowed.
        member: Option<String>,
        value: usize,
    },
    /// A registered member lies outside its struct.
    #[error("offset {offset} of {type_name}.{member} is not below struct size {size}")]
    OffsetOutOfBounds {
        type_name: String,
        member: String,
        offset: usize,
        size: usize,
    },
    /// A type or struct name was registered twice.
    #[error("type {0} registered twice")]
    DuplicateType(String),
    /// A member name was registered twice within one struct.
    #[error("member {type_name}.{member} registered twice")]
    DuplicateMember { type_name: String, member: String },
}

fn describe(member: &Option<String>) -> String {
    match member {
        Some(member) => format!("offset of member {}", member),
        None => "size".to_string(),
    }
}

/// Declarative model failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    /// A field refers to a record the schema does not define.
    #[error("record {0} is not defined in the schema")]
    UnknownRecord(String),
    /// A record contains itself, directly or through other records.
    #[error("record {0} contains itself")]
    CyclicRecord(String),
    /// Pack values must be a power of two.
    #[error("invalid packing value {0}")]
    InvalidPacking(usize),
}
