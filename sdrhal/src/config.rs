// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Build-time constants and path resolution for the native runtime.
//!
//! The build script stamps one (ABI, API, Lib) version triple per layer
//! into `constants.rs`; this module includes them and resolves where the
//! native runtime shared library lives.

// Build script generates constants.rs with the per-layer version stamps.
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

/// Environment variable overriding the native runtime library path.
pub const RUNTIME_PATH_ENV: &str = "SDRHAL_RUNTIME_PATH";

/// Returns the path to the native runtime shared library.
///
/// Honors the `SDRHAL_RUNTIME_PATH` environment variable; otherwise returns
/// just the library name and relies on the dynamic linker search path.
///
/// # Examples
///
/// ```no_run
/// use sdrhal::{config::get_runtime_lib_path, load_runtime};
///
/// # fn main() -> Result<(), sdrhal::Error> {
/// let api = load_runtime(get_runtime_lib_path())?;
/// # Ok(())
/// # }
/// ```
pub fn get_runtime_lib_path() -> std::path::PathBuf {
    match std::env::var(RUNTIME_PATH_ENV) {
        Ok(path) if !path.is_empty() => path.into(),
        _ => "libsdrruntime.so".into(),
    }
}
