// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Error types for sdrhal operations.

use crate::Layer;

/// Convenience result type using [`Error`] as the error variant.
pub type Result<T> = core::result::Result<T, Error>;

/// Errors that can occur when querying build/version metadata.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A layer name outside the fixed set `Assembly`, `BindingModule`,
    /// `Runtime` was queried.
    #[error("Unknown layer: {0:?}")]
    UnknownLayer(String),

    /// A version string was empty when the registry was initialized.
    ///
    /// This is fatal: an empty field would silently defeat ABI-mismatch
    /// detection, so the registry refuses to come up instead.
    #[error("Empty {field} for layer {layer}")]
    EmptyVersionField {
        /// The layer whose version record is incomplete.
        layer: Layer,
        /// Name of the offending field.
        field: &'static str,
    },

    /// A self-check name outside the registered set was requested.
    #[error("Unknown check: {0:?}")]
    UnknownCheck(String),

    /// A registered self-check ran and failed.
    #[error("Check {name:?} failed: {reason}")]
    CheckFailed {
        /// Name of the check that failed.
        name: String,
        /// Failure description from the check itself.
        reason: String,
    },

    /// The native runtime reports a different ABI than the one these
    /// bindings were built against.
    #[error("Failed ABI check. Runtime {runtime}, bindings {bindings}. Rebuild the module.")]
    AbiCheckFailed {
        /// ABI version reported by the loaded runtime library.
        runtime: String,
        /// ABI version stamped into the bindings at build time.
        bindings: String,
    },

    /// The native runtime returned a version string that is not valid UTF-8.
    #[error("Invalid UTF-8 in version string: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// Failed to load or interact with the native runtime library.
    #[error("Loading library: {0}")]
    LibLoading(#[from] libloading::Error),

    /// A generic error for failures not covered by the variants above.
    #[error("Other error: {0}")]
    Other(String),
}
