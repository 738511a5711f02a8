// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # twainh
//!
//! Binary layout of the TWAIN protocol header: the size of every scalar
//! typedef and the size and member offsets of every struct, as produced by
//! the compiling toolchain.
//!
//! ## Quick Start
//!
//! ```rust
//! use twainh::LayoutTable;
//!
//! let table = LayoutTable::global()?;
//! assert_eq!(table.type_size("TW_BOOL"), Some(2));
//! assert_eq!(table.offset("TW_FIX32", "Frac"), Some(2));
//!
//! let json = twainh::to_host_json(table)?;
//! assert!(json.starts_with(r#"{"typedefs":{"types":"#));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`table`]: the published table, built once from [`registry`]
//! - [`host`]: JSON view for host runtimes
//! - [`model`] / [`schema`]: compiler-independent layout model of the header
//! - [`verify`]: cross-check of the native table against the model

pub mod error;
pub mod host;
pub mod model;
pub mod registry;
pub mod schema;
pub mod table;
pub mod twain;
pub mod verify;

pub use error::{LayoutError, ModelError};
pub use host::{to_host_json, to_host_json_pretty, HostView};
pub use model::{Packing, Platform, Schema};
pub use schema::twain_schema;
pub use table::{LayoutTable, StructDescriptor, TypeDescriptor};
pub use verify::{verify, Mismatch, Report};
