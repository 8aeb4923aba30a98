// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Dynamic loading of the native SDR runtime library.
//!
//! The runtime exports its version identity through three C functions, each
//! returning a static NUL-terminated string:
//!
//! ```c
//! const char *sdr_abi_version(void);
//! const char *sdr_api_version(void);
//! const char *sdr_lib_version(void);
//! ```
//!
//! [`load_runtime`] opens the shared library and [`RuntimeApi`] wraps those
//! queries, forwarding the runtime's strings unchanged.

use std::ffi::{CStr, OsStr};

use libloading::Library;
use tracing::{debug, warn};

use crate::{Error, Result, VersionInfo, config};

type VersionFn = unsafe extern "C" fn() -> *const std::os::raw::c_char;

/// Handle to a loaded native runtime library.
///
/// The library stays loaded for the lifetime of the handle. Version queries
/// are read-only calls into static data and are safe to issue from any
/// thread.
pub struct RuntimeApi {
    library: Library,
}

/// Loads the native runtime shared library.
///
/// # Arguments
///
/// * `path` - Library name or path, e.g. from
///   [`config::get_runtime_lib_path`]
///
/// # Errors
///
/// Returns [`Error::LibLoading`] if the library cannot be opened.
///
/// # Examples
///
/// ```no_run
/// use sdrhal::{config::get_runtime_lib_path, load_runtime};
///
/// # fn main() -> Result<(), sdrhal::Error> {
/// let api = load_runtime(get_runtime_lib_path())?;
/// println!("runtime: {}", api.lib_version()?);
/// # Ok(())
/// # }
/// ```
pub fn load_runtime<P: AsRef<OsStr>>(path: P) -> Result<RuntimeApi> {
    let library = unsafe { Library::new(path.as_ref())? };
    debug!(path = %path.as_ref().to_string_lossy(), "loaded native runtime library");
    Ok(RuntimeApi { library })
}

impl RuntimeApi {
    /// Resolves one version symbol and copies its string out.
    fn version_string(&self, symbol: &[u8]) -> Result<String> {
        let string = unsafe {
            let query = self.library.get::<VersionFn>(symbol)?;
            let ptr = query();
            if ptr.is_null() {
                return Err(Error::Other(format!(
                    "Runtime returned a null version string for {}.",
                    String::from_utf8_lossy(&symbol[..symbol.len() - 1])
                )));
            }
            CStr::from_ptr(ptr).to_str()?.to_string()
        };
        Ok(string)
    }

    /// Returns the runtime's ABI compatibility class.
    pub fn abi_version(&self) -> Result<String> {
        self.version_string(b"sdr_abi_version\0")
    }

    /// Returns the runtime's source-level API version.
    pub fn api_version(&self) -> Result<String> {
        self.version_string(b"sdr_api_version\0")
    }

    /// Returns the runtime's full release version string.
    pub fn lib_version(&self) -> Result<String> {
        self.version_string(b"sdr_lib_version\0")
    }

    /// Queries all three version strings as a [`VersionInfo`].
    pub fn versions(&self) -> Result<VersionInfo> {
        Ok(VersionInfo::new(
            self.abi_version()?,
            self.api_version()?,
            self.lib_version()?,
        ))
    }

    /// Verifies that the loaded runtime matches the ABI these bindings were
    /// built against.
    ///
    /// Call this before any further interaction with the runtime; crossing
    /// an ABI boundary with mismatched builds risks undefined behavior in
    /// the native layer.
    ///
    /// # Errors
    ///
    /// Returns [`Error::AbiCheckFailed`] on mismatch.
    pub fn ensure_abi_compatible(&self) -> Result<()> {
        let runtime = self.abi_version()?;
        let bindings = config::BINDING_ABI_VERSION;
        if runtime != bindings {
            warn!(%runtime, bindings, "ABI mismatch between runtime and bindings");
            return Err(Error::AbiCheckFailed {
                runtime,
                bindings: bindings.to_string(),
            });
        }
        Ok(())
    }
}
