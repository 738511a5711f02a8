// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # twainh C FFI Bindings
//!
//! C-compatible access to the TWAIN layout table for host runtimes that embed
//! a native library instead of linking Rust.
//!
//! # Safety
//!
//! All public functions taking pointers are `unsafe` and require the caller to
//! uphold the invariants documented in each function's safety comment.

mod logging;

pub use logging::*;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::ptr;
use std::sync::OnceLock;

use twainh::{LayoutError, LayoutTable};

/// Error codes for twainh C API
///
/// # Error Code Categories
///
/// - **0-9**: Success and generic errors
/// - **10-19**: Layout table construction errors
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwainhError {
    /// Operation completed successfully
    TwainhOk = 0,
    /// Invalid argument provided (null pointer, invalid UTF-8)
    TwainhInvalidArgument = 1,
    /// Type, struct or member name not registered
    TwainhNotFound = 2,
    /// Generic operation failure
    TwainhOperationFailed = 3,

    // === Layout errors (10-19) ===
    /// A size or offset does not fit in 32 bits
    TwainhOverflow = 10,
    /// The registration list is inconsistent (duplicate name, offset past end)
    TwainhInvalidLayout = 11,
}

impl From<&LayoutError> for TwainhError {
    fn from(err: &LayoutError) -> Self {
        match err {
            LayoutError::Overflow { .. } => TwainhError::TwainhOverflow,
            LayoutError::OffsetOutOfBounds { .. }
            | LayoutError::DuplicateType(_)
            | LayoutError::DuplicateMember { .. } => TwainhError::TwainhInvalidLayout,
        }
    }
}

fn table() -> Result<&'static LayoutTable, TwainhError> {
    LayoutTable::global().map_err(|e| TwainhError::from(&e))
}

/// Borrow a C string argument as UTF-8.
unsafe fn arg<'a>(s: *const c_char) -> Result<&'a str, TwainhError> {
    if s.is_null() {
        return Err(TwainhError::TwainhInvalidArgument);
    }
    CStr::from_ptr(s)
        .to_str()
        .map_err(|_| TwainhError::TwainhInvalidArgument)
}

/// Answer a lookup through `out`.
unsafe fn lookup<T>(out: *mut T, f: impl FnOnce(&'static LayoutTable) -> Option<T>) -> TwainhError {
    if out.is_null() {
        return TwainhError::TwainhInvalidArgument;
    }
    let table = match table() {
        Ok(t) => t,
        Err(e) => return e,
    };
    match f(table) {
        Some(v) => {
            *out = v;
            TwainhError::TwainhOk
        }
        None => TwainhError::TwainhNotFound,
    }
}

/// Build the layout table now instead of on first lookup.
///
/// Safe to call any number of times; construction happens once and its
/// outcome is returned by every call.
///
/// # Returns
/// `TwainhOk`, or `TwainhOverflow` / `TwainhInvalidLayout` when the table
/// could not be built. No lookup will succeed after a failure.
#[no_mangle]
pub extern "C" fn twainh_init() -> TwainhError {
    match table() {
        Ok(_) => TwainhError::TwainhOk,
        Err(e) => e,
    }
}

/// Get twainh library version string
///
/// # Safety
/// The returned pointer is valid for the lifetime of the process (static storage).
#[no_mangle]
pub unsafe extern "C" fn twainh_version() -> *const c_char {
    static VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), "\0");
    VERSION.as_ptr().cast::<c_char>()
}

/// Size in bytes of a scalar typedef (e.g. `"TW_BOOL"`).
///
/// # Safety
/// - `name` must be a valid null-terminated C string
/// - `out_size` must be a valid pointer to an `int32_t`
#[no_mangle]
pub unsafe extern "C" fn twainh_type_size(name: *const c_char, out_size: *mut i32) -> TwainhError {
    let name = match arg(name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    lookup(out_size, |t| t.type_size(name))
}

/// Size in bytes of a struct (e.g. `"TW_IDENTITY"`).
///
/// # Safety
/// - `name` must be a valid null-terminated C string
/// - `out_size` must be a valid pointer to an `int32_t`
#[no_mangle]
pub unsafe extern "C" fn twainh_struct_size(
    name: *const c_char,
    out_size: *mut i32,
) -> TwainhError {
    let name = match arg(name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    lookup(out_size, |t| t.struct_size(name))
}

/// Byte offset of `member` within struct `name`.
///
/// # Safety
/// - `name` and `member` must be valid null-terminated C strings
/// - `out_offset` must be a valid pointer to an `int32_t`
#[no_mangle]
pub unsafe extern "C" fn twainh_struct_offset(
    name: *const c_char,
    member: *const c_char,
    out_offset: *mut i32,
) -> TwainhError {
    let (name, member) = match (arg(name), arg(member)) {
        (Ok(n), Ok(m)) => (n, m),
        (Err(e), _) | (_, Err(e)) => return e,
    };
    lookup(out_offset, |t| t.offset(name, member))
}

/// Number of registered members of struct `name`.
///
/// # Safety
/// - `name` must be a valid null-terminated C string
/// - `out_count` must be a valid pointer to a `size_t`
#[no_mangle]
pub unsafe extern "C" fn twainh_member_count(
    name: *const c_char,
    out_count: *mut usize,
) -> TwainhError {
    let name = match arg(name) {
        Ok(n) => n,
        Err(e) => return e,
    };
    lookup(out_count, |t| t.get_struct(name).map(|s| s.offsets.len()))
}

/// Number of registered structs, 0 if the table could not be built.
#[no_mangle]
pub extern "C" fn twainh_struct_count() -> usize {
    table().map_or(0, LayoutTable::struct_count)
}

/// Number of registered scalar typedefs, 0 if the table could not be built.
#[no_mangle]
pub extern "C" fn twainh_type_count() -> usize {
    table().map_or(0, LayoutTable::type_count)
}

/// Copy the struct name at `index` (registration order) into `out_buf`.
///
/// # Safety
/// - `out_buf` must point to at least `capacity` writable bytes, or be NULL
///
/// # Returns
/// Bytes needed excluding the NUL, or 0 when `index` is out of range.
#[no_mangle]
pub unsafe extern "C" fn twainh_struct_name(
    index: usize,
    out_buf: *mut c_char,
    capacity: usize,
) -> usize {
    match table().ok().and_then(|t| t.structs().nth(index)) {
        Some(s) => copy_str_to_buf(&s.name, out_buf, capacity),
        None => 0,
    }
}

/// Copy the host JSON document into `out_buf`.
///
/// The document is `{"typedefs":{"types":{...},"structs":{...}}}`. Output is
/// NUL-terminated and truncated to `capacity - 1` bytes. Call with a NULL
/// buffer first to learn the required size.
///
/// # Safety
/// - `out_buf` must point to at least `capacity` writable bytes, or be NULL
///
/// # Returns
/// Bytes needed excluding the NUL, or 0 if the table could not be built.
#[no_mangle]
pub unsafe extern "C" fn twainh_typedefs_json(out_buf: *mut c_char, capacity: usize) -> usize {
    static JSON: OnceLock<Option<String>> = OnceLock::new();

    let json = JSON.get_or_init(|| {
        let table = table().ok()?;
        match twainh::to_host_json(table) {
            Ok(json) => Some(json),
            Err(e) => {
                log::error!("failed to serialize layout table: {}", e);
                None
            }
        }
    });

    match json {
        Some(json) => copy_str_to_buf(json, out_buf, capacity),
        None => 0,
    }
}

/// Copy a Rust str into a C buffer. Returns bytes needed (excluding null).
///
/// # Safety
/// `out_buf` must be NULL or point to at least `capacity` writable bytes.
unsafe fn copy_str_to_buf(s: &str, out_buf: *mut c_char, capacity: usize) -> usize {
    let needed = s.len();
    if !out_buf.is_null() && capacity > 0 {
        let copy_len = needed.min(capacity - 1);
        ptr::copy_nonoverlapping(s.as_ptr(), out_buf.cast::<u8>(), copy_len);
        *out_buf.add(copy_len) = 0;
    }
    needed
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::CString;

    #[test]
    fn test_init_succeeds() {
        assert_eq!(twainh_init(), TwainhError::TwainhOk);
        assert_eq!(twainh_init(), TwainhError::TwainhOk);
    }

    #[test]
    fn test_null_safety() {
        let name = CString::new("TW_FIX32").unwrap();
        let mut out = 0i32;
        let mut count = 0usize;
        unsafe {
            assert_eq!(
                twainh_type_size(ptr::null(), &mut out),
                TwainhError::TwainhInvalidArgument
            );
            assert_eq!(
                twainh_struct_size(name.as_ptr(), ptr::null_mut()),
                TwainhError::TwainhInvalidArgument
            );
            assert_eq!(
                twainh_struct_offset(name.as_ptr(), ptr::null(), &mut out),
                TwainhError::TwainhInvalidArgument
            );
            assert_eq!(
                twainh_member_count(ptr::null(), &mut count),
                TwainhError::TwainhInvalidArgument
            );
            assert!(twainh_typedefs_json(ptr::null_mut(), 0) > 0);
        }
    }

    #[test]
    fn test_invalid_utf8() {
        let bad = [0xffu8, 0xfe, 0];
        let mut out = 0i32;
        unsafe {
            assert_eq!(
                twainh_type_size(bad.as_ptr().cast(), &mut out),
                TwainhError::TwainhInvalidArgument
            );
        }
    }

    #[test]
    fn test_not_found_leaves_output_untouched() {
        let name = CString::new("TW_FIX64").unwrap();
        let mut out = -7i32;
        unsafe {
            assert_eq!(
                twainh_struct_size(name.as_ptr(), &mut out),
                TwainhError::TwainhNotFound
            );
        }
        assert_eq!(out, -7);
    }

    #[test]
    fn test_error_mapping() {
        let overflow = LayoutError::Overflow {
            type_name: "TW_HUGE".into(),
            member: None,
            value: 1 << 31,
        };
        assert_eq!(TwainhError::from(&overflow), TwainhError::TwainhOverflow);
        assert_eq!(
            TwainhError::from(&LayoutError::DuplicateType("TW_X".into())),
            TwainhError::TwainhInvalidLayout
        );
    }

    #[test]
    fn test_copy_str_to_buf_truncates() {
        let mut buf = [0x55 as c_char; 4];
        let needed = unsafe { copy_str_to_buf("TW_BOOL", buf.as_mut_ptr(), buf.len()) };
        assert_eq!(needed, 7);
        assert_eq!(buf.map(|c| c as u8), *b"TW_\0");

        // NULL buffer or zero capacity only reports the size.
        let untouched = [0x55 as c_char; 4];
        let mut buf = untouched;
        assert_eq!(unsafe { copy_str_to_buf("TW_BOOL", ptr::null_mut(), 4) }, 7);
        assert_eq!(unsafe { copy_str_to_buf("TW_BOOL", buf.as_mut_ptr(), 0) }, 7);
        assert_eq!(buf, untouched);
    }

    #[test]
    fn test_struct_name_by_index() {
        let mut buf = [0 as c_char; 32];
        unsafe {
            let n = twainh_struct_name(0, buf.as_mut_ptr(), buf.len());
            assert_eq!(n, "TW_FIX32".len());
            assert_eq!(CStr::from_ptr(buf.as_ptr()).to_str().unwrap(), "TW_FIX32");
            assert_eq!(
                twainh_struct_name(twainh_struct_count(), buf.as_mut_ptr(), buf.len()),
                0
            );
        }
    }

    #[test]
    fn test_version() {
        unsafe {
            let v = CStr::from_ptr(twainh_version()).to_str().unwrap();
            assert_eq!(v, env!("CARGO_PKG_VERSION"));
        }
    }
}
