// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! # sdrhal - SDR hardware abstraction binding layer
//!
//! Build/version metadata for the three independently-versioned layers of
//! the binding stack: the generated binding assembly, the binding/glue
//! module, and the underlying native SDR runtime library.
//!
//! ## Overview
//!
//! Each layer carries an (ABI, API, Lib) version triple. The crate exposes
//! them through a process-wide, read-only [`VersionRegistry`], populated
//! once from build-time constants (and optionally from a live query against
//! the loaded native runtime), and lets callers detect ABI skew between
//! layers before any further interaction with the native side.
//!
//! ### Key Concepts
//!
//! - **Layer**: one of `Assembly`, `BindingModule`, `Runtime` ([`Layer`])
//! - **Version triple**: ABI compatibility class, source-level API version,
//!   full release version ([`VersionInfo`])
//! - **Registry**: the immutable layer-to-triple mapping ([`VersionRegistry`])
//! - **Runtime API**: dynamic handle to the native library, forwarding its
//!   self-reported versions unchanged ([`RuntimeApi`])
//!
//! ## Examples
//!
//! ### Querying the process-wide registry
//!
//! ```
//! use sdrhal::{Layer, VersionRegistry};
//!
//! let registry = VersionRegistry::global();
//! for layer in Layer::ALL {
//!     let versions = registry.get(layer);
//!     println!(
//!         "{}: ABI={}, API={}, Lib={}",
//!         layer, versions.abi_version, versions.api_version, versions.lib_version
//!     );
//! }
//! assert!(registry.is_compatible(Layer::Assembly, Layer::BindingModule));
//! ```
//!
//! ### Checking against the live native runtime
//!
//! ```no_run
//! use sdrhal::{config::get_runtime_lib_path, load_runtime, NativeRuntimeVersions, VersionRegistry};
//!
//! # fn main() -> Result<(), sdrhal::Error> {
//! let api = load_runtime(get_runtime_lib_path())?;
//! api.ensure_abi_compatible()?; // fatal on ABI skew
//!
//! let registry = VersionRegistry::with_runtime_source(&NativeRuntimeVersions::new(api))?;
//! println!("runtime: {}", registry.get(sdrhal::Layer::Runtime).lib_version);
//! # Ok(())
//! # }
//! ```
//!
//! ## Thread Safety
//!
//! The registry is populated before any consumer can observe it and is
//! immutable afterwards; all queries are pure, constant-time reads that are
//! safe to issue concurrently without locking.

mod api;
mod buildinfo;
mod checks;
mod error;
mod source;

pub mod config;

pub use api::{RuntimeApi, load_runtime};
pub use buildinfo::{Layer, VersionInfo, VersionRegistry};
pub use checks::{CheckFn, CheckRegistry};
pub use error::{Error, Result};
pub use source::{BuildTimeVersions, NativeRuntimeVersions, VersionSource};
