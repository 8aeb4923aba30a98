// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Version sources for registry population.
//!
//! Where a layer's version strings come from is deliberately pluggable: the
//! assembly and binding-module triples are always stamped at compile time,
//! but the runtime triple can either use the build-time stamp (matched
//! build) or be queried live from the loaded native library.

use crate::{Layer, Result, RuntimeApi, VersionInfo, config};

/// Supplies one layer's version triple.
pub trait VersionSource {
    /// Returns the layer's version triple.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot produce the triple (e.g. the
    /// native library is missing a version symbol).
    fn versions(&self) -> Result<VersionInfo>;
}

/// Version triples stamped into the crate at compile time.
///
/// These are literal strings generated by the build script, so this source
/// is infallible in practice.
pub struct BuildTimeVersions {
    layer: Layer,
}

impl BuildTimeVersions {
    /// Creates a build-time source for the given layer.
    pub fn new(layer: Layer) -> Self {
        Self { layer }
    }
}

impl VersionSource for BuildTimeVersions {
    fn versions(&self) -> Result<VersionInfo> {
        Ok(match self.layer {
            Layer::Assembly => VersionInfo::new(
                config::ASSEMBLY_ABI_VERSION,
                config::ASSEMBLY_API_VERSION,
                config::ASSEMBLY_LIB_VERSION,
            ),
            Layer::BindingModule => VersionInfo::new(
                config::BINDING_ABI_VERSION,
                config::BINDING_API_VERSION,
                config::BINDING_LIB_VERSION,
            ),
            Layer::Runtime => VersionInfo::new(
                config::RUNTIME_ABI_VERSION,
                config::RUNTIME_API_VERSION,
                config::RUNTIME_LIB_VERSION,
            ),
        })
    }
}

/// Version triple queried live from the loaded native runtime library.
///
/// The runtime's strings are forwarded unchanged, so a registry populated
/// from this source reflects the library actually loaded into the process,
/// not the one the bindings were compiled against.
pub struct NativeRuntimeVersions {
    api: RuntimeApi,
}

impl NativeRuntimeVersions {
    /// Creates a source that queries the given runtime handle.
    pub fn new(api: RuntimeApi) -> Self {
        Self { api }
    }
}

impl VersionSource for NativeRuntimeVersions {
    fn versions(&self) -> Result<VersionInfo> {
        self.api.versions()
    }
}
