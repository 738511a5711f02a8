// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Logger setup for C hosts.
//!
//! The library logs through the `log` facade: table construction reports a
//! `debug` summary or an `error`, and layout cross-checks report `warn` per
//! mismatch. A C host has no Rust logger of its own, so one of these
//! functions installs `env_logger` on stderr. Call it before `twainh_init`
//! to see construction output.

use std::ffi::CStr;
use std::os::raw::c_char;

use super::TwainhError;

/// Minimum severity written to stderr
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TwainhLogLevel {
    TwainhLogOff = 0,
    TwainhLogError = 1,
    TwainhLogWarn = 2,
    TwainhLogInfo = 3,
    TwainhLogDebug = 4,
    TwainhLogTrace = 5,
}

impl From<TwainhLogLevel> for log::LevelFilter {
    fn from(level: TwainhLogLevel) -> Self {
        match level {
            TwainhLogLevel::TwainhLogOff => log::LevelFilter::Off,
            TwainhLogLevel::TwainhLogError => log::LevelFilter::Error,
            TwainhLogLevel::TwainhLogWarn => log::LevelFilter::Warn,
            TwainhLogLevel::TwainhLogInfo => log::LevelFilter::Info,
            TwainhLogLevel::TwainhLogDebug => log::LevelFilter::Debug,
            TwainhLogLevel::TwainhLogTrace => log::LevelFilter::Trace,
        }
    }
}

fn installed(result: Result<(), log::SetLoggerError>) -> TwainhError {
    match result {
        Ok(()) => TwainhError::TwainhOk,
        Err(_) => TwainhError::TwainhOperationFailed, // Already initialized
    }
}

/// Install a stderr logger at `level`.
///
/// Only one logger can exist per process; a second call (from here or from
/// any other crate in the process) returns `TwainhOperationFailed`.
///
/// # Example (C)
/// ```c
/// twainh_logging_init(TWAINH_LOG_DEBUG);
/// twainh_init();
/// ```
#[no_mangle]
pub extern "C" fn twainh_logging_init(level: TwainhLogLevel) -> TwainhError {
    installed(
        env_logger::Builder::new()
            .filter_level(level.into())
            .format_timestamp_millis()
            .try_init(),
    )
}

/// Install a stderr logger configured by `RUST_LOG`, or at `default_level`
/// when the variable is unset.
#[no_mangle]
pub extern "C" fn twainh_logging_init_env(default_level: TwainhLogLevel) -> TwainhError {
    let filter: log::LevelFilter = default_level.into();

    installed(
        env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(filter.to_string()),
        )
        .format_timestamp_millis()
        .try_init(),
    )
}

/// Install a stderr logger with an `env_logger` filter string, e.g.
/// `"twainh=debug"` to see the construction summary and nothing else.
///
/// # Safety
/// - `filter` must be a valid null-terminated C string or NULL.
///
/// # Example (C)
/// ```c
/// twainh_logging_init_with_filter("twainh=debug");
/// twainh_init();   /* logs "built TWAIN layout table: 14 types, 43 structs, ..." */
/// ```
#[no_mangle]
pub unsafe extern "C" fn twainh_logging_init_with_filter(filter: *const c_char) -> TwainhError {
    if filter.is_null() {
        return TwainhError::TwainhInvalidArgument;
    }

    let Ok(filter_str) = CStr::from_ptr(filter).to_str() else {
        return TwainhError::TwainhInvalidArgument;
    };

    installed(
        env_logger::Builder::new()
            .parse_filters(filter_str)
            .format_timestamp_millis()
            .try_init(),
    )
}
