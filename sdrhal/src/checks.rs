// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Named self-checks, dispatched through an explicit registration table.
//!
//! Tooling runs individual checks by name without compile-time linkage to
//! the check function. The table is built at startup; there is no runtime
//! reflection involved.

use tracing::info;

use crate::{Error, Layer, Result, VersionRegistry};

/// A registered self-check. Returns `Ok(())` on success.
pub type CheckFn = fn() -> Result<()>;

/// Registration table mapping check names to check functions.
///
/// # Examples
///
/// ```
/// use sdrhal::CheckRegistry;
///
/// let checks = CheckRegistry::with_builtin_checks();
/// checks.run("build_info_strings").unwrap();
/// ```
pub struct CheckRegistry {
    checks: Vec<(&'static str, CheckFn)>,
}

impl CheckRegistry {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Creates a table with all built-in checks registered.
    pub fn with_builtin_checks() -> Self {
        let mut registry = Self::new();
        registry.register("build_info_strings", build_info_strings);
        registry
    }

    /// Registers a check under the given name, replacing any previous
    /// registration of that name.
    pub fn register(&mut self, name: &'static str, check: CheckFn) {
        self.checks.retain(|(existing, _)| *existing != name);
        self.checks.push((name, check));
    }

    /// Returns the registered check names, in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.checks.iter().map(|(name, _)| *name)
    }

    /// Runs the check registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnknownCheck`] if no check is registered under that
    /// name, or [`Error::CheckFailed`] if the check itself fails.
    pub fn run(&self, name: &str) -> Result<()> {
        let (_, check) = self
            .checks
            .iter()
            .find(|(existing, _)| *existing == name)
            .ok_or_else(|| Error::UnknownCheck(name.to_string()))?;
        info!(check = name, "running self-check");
        check().map_err(|error| Error::CheckFailed {
            name: name.to_string(),
            reason: error.to_string(),
        })
    }
}

impl Default for CheckRegistry {
    fn default() -> Self {
        Self::with_builtin_checks()
    }
}

/// Verifies that every layer reports three non-empty version strings, and
/// logs one line per layer.
fn build_info_strings() -> Result<()> {
    let registry = VersionRegistry::global();
    for layer in Layer::ALL {
        let versions = registry.get(layer);
        for (field, value) in versions.fields() {
            if value.is_empty() {
                return Err(Error::EmptyVersionField { layer, field });
            }
        }
        info!(
            "{}: ABI={}, API={}, Lib={}",
            layer, versions.abi_version, versions.api_version, versions.lib_version
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_check_is_rejected() {
        let checks = CheckRegistry::with_builtin_checks();
        assert!(matches!(
            checks.run("NotACheck"),
            Err(Error::UnknownCheck(name)) if name == "NotACheck"
        ));
    }

    #[test]
    fn registration_replaces_by_name() {
        fn always_fails() -> Result<()> {
            Err(Error::Other("forced".to_string()))
        }

        let mut checks = CheckRegistry::new();
        checks.register("probe", always_fails);
        checks.register("probe", || Ok(()));
        assert_eq!(checks.names().count(), 1);
        checks.run("probe").unwrap();
    }
}
