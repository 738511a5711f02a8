// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

// Lookups through the C API, the way a host runtime would call them.

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::ptr;

use twainh_c::*;

fn c(s: &str) -> CString {
    CString::new(s).unwrap()
}

#[test]
fn test_fix32_through_c_api() {
    assert_eq!(twainh_init(), TwainhError::TwainhOk);

    let fix = c("TW_FIX32");
    let mut size = 0i32;
    let mut whole = -1i32;
    let mut frac = -1i32;
    let mut members = 0usize;
    unsafe {
        assert_eq!(twainh_struct_size(fix.as_ptr(), &mut size), TwainhError::TwainhOk);
        assert_eq!(
            twainh_struct_offset(fix.as_ptr(), c("Whole").as_ptr(), &mut whole),
            TwainhError::TwainhOk
        );
        assert_eq!(
            twainh_struct_offset(fix.as_ptr(), c("Frac").as_ptr(), &mut frac),
            TwainhError::TwainhOk
        );
        assert_eq!(
            twainh_member_count(fix.as_ptr(), &mut members),
            TwainhError::TwainhOk
        );
    }
    assert_eq!((size, whole, frac, members), (4, 0, 2, 2));
}

#[test]
fn test_scalar_sizes_through_c_api() {
    let mut size = 0i32;
    unsafe {
        assert_eq!(
            twainh_type_size(c("TW_BOOL").as_ptr(), &mut size),
            TwainhError::TwainhOk
        );
        assert_eq!(size, 2);
        assert_eq!(
            twainh_type_size(c("TW_UINT32").as_ptr(), &mut size),
            TwainhError::TwainhOk
        );
        assert_eq!(size, 4);
        assert_eq!(
            twainh_type_size(c("TW_FLOAT").as_ptr(), &mut size),
            TwainhError::TwainhNotFound
        );
    }
}

#[test]
fn test_unknown_member() {
    let mut offset = 0i32;
    unsafe {
        assert_eq!(
            twainh_struct_offset(c("TW_FIX32").as_ptr(), c("Numerator").as_ptr(), &mut offset),
            TwainhError::TwainhNotFound
        );
    }
}

#[test]
fn test_counts() {
    assert_eq!(twainh_struct_count(), 43);
    assert_eq!(twainh_type_count(), 14);
}

#[test]
fn test_json_two_call_pattern() {
    unsafe {
        let needed = twainh_typedefs_json(ptr::null_mut(), 0);
        assert!(needed > 0);

        let mut buf = vec![0 as c_char; needed + 1];
        assert_eq!(twainh_typedefs_json(buf.as_mut_ptr(), buf.len()), needed);

        let json = CStr::from_ptr(buf.as_ptr()).to_str().unwrap();
        assert_eq!(json.len(), needed);
        assert!(json.starts_with(r#"{"typedefs":{"types":{"#));
        assert!(json.contains(r#""TW_FIX32":{"size":4,"offsets":{"Whole":0,"Frac":2}}"#));
    }
}

#[test]
fn test_json_truncated_is_terminated() {
    let mut buf = [0x7f as c_char; 16];
    unsafe {
        let needed = twainh_typedefs_json(buf.as_mut_ptr(), buf.len());
        assert!(needed > buf.len());
        let json = CStr::from_ptr(buf.as_ptr()).to_str().unwrap();
        assert_eq!(json, r#"{"typedefs":{"t"#);
    }
}
