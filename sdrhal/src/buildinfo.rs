// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! The build/version metadata registry.
//!
//! This module defines the core data model:
//! - [`Layer`]: the closed set of independently-versioned layers
//! - [`VersionInfo`]: one layer's (ABI, API, Lib) version triple
//! - [`VersionRegistry`]: the read-only mapping from layer to triple,
//!   populated once and immutable afterwards
//!
//! A process-wide registry built from the constants stamped at compile time
//! is available through [`VersionRegistry::global`].

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    Error, Result,
    source::{BuildTimeVersions, VersionSource},
};

/// One of the three independently-versioned layers of the binding stack.
///
/// The set is closed: the generated binding assembly, the binding/glue
/// module underneath it, and the native runtime library at the bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Layer {
    /// The generated binding assembly (this crate).
    Assembly,
    /// The binding/glue module between the assembly and the runtime.
    BindingModule,
    /// The underlying native runtime library.
    Runtime,
}

impl Layer {
    /// All layers, in registry order.
    pub const ALL: [Layer; 3] = [Layer::Assembly, Layer::BindingModule, Layer::Runtime];

    /// Returns the canonical layer name used for string lookups.
    pub fn name(&self) -> &'static str {
        match self {
            Layer::Assembly => "Assembly",
            Layer::BindingModule => "BindingModule",
            Layer::Runtime => "Runtime",
        }
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Layer {
    type Err = Error;

    /// Parses a canonical layer name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLayer`] for any name outside the closed set.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "Assembly" => Ok(Layer::Assembly),
            "BindingModule" => Ok(Layer::BindingModule),
            "Runtime" => Ok(Layer::Runtime),
            other => Err(Error::UnknownLayer(other.to_string())),
        }
    }
}

/// Immutable version identity of one layer.
///
/// # Examples
///
/// ```
/// use sdrhal::VersionInfo;
///
/// let info = VersionInfo::new("0.8", "0.8.1", "0.8.1-g1234567");
/// assert!(info.is_complete());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VersionInfo {
    /// Binary-interface compatibility class, e.g. `"0.8"`.
    pub abi_version: String,
    /// Source-level API version, e.g. `"0.8.1"`.
    pub api_version: String,
    /// Full release version including build metadata, e.g. `"0.8.1-g1234567"`.
    pub lib_version: String,
}

impl VersionInfo {
    /// Creates a version triple from the three identifiers.
    pub fn new(
        abi_version: impl Into<String>,
        api_version: impl Into<String>,
        lib_version: impl Into<String>,
    ) -> Self {
        Self {
            abi_version: abi_version.into(),
            api_version: api_version.into(),
            lib_version: lib_version.into(),
        }
    }

    /// Returns the fields with their names, in declaration order.
    pub(crate) fn fields(&self) -> [(&'static str, &str); 3] {
        [
            ("abi_version", self.abi_version.as_str()),
            ("api_version", self.api_version.as_str()),
            ("lib_version", self.lib_version.as_str()),
        ]
    }

    /// Returns true iff all three fields are non-empty.
    pub fn is_complete(&self) -> bool {
        self.fields().iter().all(|(_, value)| !value.is_empty())
    }
}

/// Read-only mapping from [`Layer`] to [`VersionInfo`].
///
/// A registry is populated exactly once at construction and never mutated
/// afterwards, so shared references can be read concurrently from any number
/// of threads without locking.
///
/// # Examples
///
/// ```
/// use sdrhal::{Layer, VersionRegistry};
///
/// let registry = VersionRegistry::global();
/// assert!(registry.all_non_empty());
/// assert!(registry.is_compatible(Layer::Assembly, Layer::Assembly));
/// ```
#[derive(Debug, Clone)]
pub struct VersionRegistry {
    // Indexed by Layer discriminant, in Layer::ALL order.
    entries: [VersionInfo; 3],
}

impl VersionRegistry {
    /// Creates a registry from the three layers' version triples.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyVersionField`] if any field of any triple is
    /// empty. The registry fails fast instead of substituting a placeholder,
    /// since a placeholder would defeat ABI-mismatch detection later.
    pub fn new(
        assembly: VersionInfo,
        binding_module: VersionInfo,
        runtime: VersionInfo,
    ) -> Result<Self> {
        let registry = Self {
            entries: [assembly, binding_module, runtime],
        };
        registry.verify()?;
        Ok(registry)
    }

    /// Creates a registry with the assembly and binding-module triples taken
    /// from the build-time stamp and the runtime triple from the given
    /// source (e.g. [`crate::NativeRuntimeVersions`] querying the loaded
    /// native library).
    ///
    /// # Errors
    ///
    /// Propagates source failures and the non-empty invariant check.
    pub fn with_runtime_source(runtime: &dyn VersionSource) -> Result<Self> {
        Self::new(
            BuildTimeVersions::new(Layer::Assembly).versions()?,
            BuildTimeVersions::new(Layer::BindingModule).versions()?,
            runtime.versions()?,
        )
    }

    /// Creates a registry entirely from the constants stamped at build time.
    pub fn from_build_time() -> Result<Self> {
        Self::with_runtime_source(&BuildTimeVersions::new(Layer::Runtime))
    }

    /// Returns the process-wide registry, initializing it from the
    /// build-time constants on first access.
    ///
    /// # Panics
    ///
    /// Panics if the build system stamped an empty version string. This is
    /// a build error, not a runtime condition.
    pub fn global() -> &'static VersionRegistry {
        static GLOBAL: OnceLock<VersionRegistry> = OnceLock::new();
        GLOBAL.get_or_init(|| {
            let registry = VersionRegistry::from_build_time()
                .expect("build error: empty version field stamped at build time");
            debug!(
                assembly = %registry.get(Layer::Assembly).lib_version,
                binding_module = %registry.get(Layer::BindingModule).lib_version,
                runtime = %registry.get(Layer::Runtime).lib_version,
                "version registry initialized"
            );
            registry
        })
    }

    /// Checks the non-empty invariant, naming the first offending field.
    fn verify(&self) -> Result<()> {
        for layer in Layer::ALL {
            for (field, value) in self.get(layer).fields() {
                if value.is_empty() {
                    return Err(Error::EmptyVersionField { layer, field });
                }
            }
        }
        Ok(())
    }

    /// Returns the version triple for the given layer.
    pub fn get(&self, layer: Layer) -> &VersionInfo {
        &self.entries[layer as usize]
    }

    /// Returns the version triple for the layer with the given name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownLayer`] for names outside the closed set.
    pub fn get_by_name(&self, name: &str) -> Result<&VersionInfo> {
        Ok(self.get(name.parse()?))
    }

    /// Returns true iff the two layers share the same ABI compatibility
    /// class.
    ///
    /// Used to detect mismatched native-runtime vs. binding-module builds
    /// before any further interaction is attempted. Pure comparison, no
    /// side effects; callers decide whether a mismatch is fatal.
    pub fn is_compatible(&self, a: Layer, b: Layer) -> bool {
        self.get(a).abi_version == self.get(b).abi_version
    }

    /// Returns true iff every field of every registered triple is non-empty.
    ///
    /// Always true for a registry built through [`VersionRegistry::new`],
    /// which enforces the invariant at construction.
    pub fn all_non_empty(&self) -> bool {
        Layer::ALL.iter().all(|&layer| self.get(layer).is_complete())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triple(abi: &str, api: &str, lib: &str) -> VersionInfo {
        VersionInfo::new(abi, api, lib)
    }

    #[test]
    fn all_non_empty_detects_a_single_forced_empty_field() {
        // Bypasses the validating constructor to reach the false branch.
        let registry = VersionRegistry {
            entries: [
                triple("0.8", "0.8.1", "0.8.1-abc"),
                triple("0.8", "0.8.1", ""),
                triple("0.7", "0.7.3", "0.7.3-def"),
            ],
        };
        assert!(!registry.all_non_empty());
    }

    #[test]
    fn new_rejects_empty_fields_naming_layer_and_field() {
        let result = VersionRegistry::new(
            triple("0.8", "0.8.1", "0.8.1-abc"),
            triple("0.8", "0.8.1", "0.8.1-abc"),
            triple("", "0.7.3", "0.7.3-def"),
        );
        match result {
            Err(Error::EmptyVersionField { layer, field }) => {
                assert_eq!(layer, Layer::Runtime);
                assert_eq!(field, "abi_version");
            }
            other => panic!("expected EmptyVersionField, got {other:?}"),
        }
    }

    #[test]
    fn layer_names_round_trip() {
        for layer in Layer::ALL {
            assert_eq!(layer.name().parse::<Layer>().unwrap(), layer);
        }
    }
}
