// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Host-facing JSON view of the layout table.
//!
//! ```json
//! {"typedefs": {"types": {"TW_BOOL": {"size": 2}, ...},
//!               "structs": {"TW_FIX32": {"size": 4, "offsets": {"Whole": 0, "Frac": 2}}, ...}}}
//! ```

use serde::Serialize;

use crate::table::LayoutTable;

/// The single `typedefs` property exposed to a host.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct HostView<'a> {
    pub typedefs: &'a LayoutTable,
}

impl<'a> HostView<'a> {
    pub fn new(table: &'a LayoutTable) -> Self {
        HostView { typedefs: table }
    }
}

/// Serialize `table` in the host shape, compact.
pub fn to_host_json(table: &LayoutTable) -> serde_json::Result<String> {
    serde_json::to_string(&HostView::new(table))
}

/// Serialize `table` in the host shape, indented.
pub fn to_host_json_pretty(table: &LayoutTable) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&HostView::new(table))
}
