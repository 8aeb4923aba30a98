// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Integration tests for the build/version metadata registry.
//!
//! These tests exercise the registry against both the build-time stamp (the
//! process-wide registry) and explicitly constructed layer triples,
//! covering the non-empty invariant, ABI compatibility checks and the named
//! self-check dispatch table.

use sdrhal::{CheckRegistry, Error, Layer, VersionInfo, VersionRegistry};
use tracing::info;

/// Ensures logging is initialized only once across all tests.
static LOG_ONCE: std::sync::Once = std::sync::Once::new();

/// Initializes logging (respects the RUST_LOG environment variable).
fn setup_logging() {
    LOG_ONCE.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::builder()
                    .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                    .from_env_lossy(),
            )
            .init();
    });
}

/// Builds a registry with an intentionally older runtime layer.
fn skewed_registry() -> VersionRegistry {
    VersionRegistry::new(
        VersionInfo::new("0.8", "0.8.1", "0.8.1-abc"),
        VersionInfo::new("0.8", "0.8.1", "0.8.1-abc"),
        VersionInfo::new("0.7", "0.7.3", "0.7.3-def"),
    )
    .unwrap()
}

/// Every layer of the process-wide registry reports three non-empty
/// version strings.
#[test]
fn build_info_strings_are_non_empty() {
    setup_logging();

    let registry = VersionRegistry::global();
    for layer in Layer::ALL {
        let versions = registry.get(layer);
        assert!(!versions.abi_version.is_empty());
        assert!(!versions.api_version.is_empty());
        assert!(!versions.lib_version.is_empty());
        info!(
            "{}: ABI={}, API={}, Lib={}",
            layer, versions.abi_version, versions.api_version, versions.lib_version
        );
    }
    assert!(registry.all_non_empty());
}

/// A layer is always ABI-compatible with itself.
#[test]
fn compatibility_is_reflexive() {
    let registry = VersionRegistry::global();
    for layer in Layer::ALL {
        assert!(registry.is_compatible(layer, layer));
    }
}

/// Looking up a name outside the closed layer set fails with UnknownLayer.
#[test]
fn unknown_layer_name_is_rejected() {
    let registry = VersionRegistry::global();
    match registry.get_by_name("NotALayer") {
        Err(Error::UnknownLayer(name)) => assert_eq!(name, "NotALayer"),
        other => panic!("expected UnknownLayer, got {other:?}"),
    }
}

/// Successive queries return field-for-field identical values; the
/// registry is immutable after initialization.
#[test]
fn get_is_idempotent() {
    let registry = VersionRegistry::global();
    for layer in Layer::ALL {
        let first = registry.get(layer).clone();
        let second = registry.get(layer);
        assert_eq!(&first, second);
    }
}

/// String and enum lookups agree on the same layer.
#[test]
fn lookup_by_name_matches_lookup_by_layer() {
    let registry = VersionRegistry::global();
    for layer in Layer::ALL {
        assert_eq!(registry.get_by_name(layer.name()).unwrap(), registry.get(layer));
    }
}

/// An older runtime build is flagged as ABI-incompatible with the binding
/// layers, while the matched layers stay compatible.
#[test]
fn abi_skew_is_detected_between_layers() {
    setup_logging();

    let registry = skewed_registry();
    assert!(registry.is_compatible(Layer::Assembly, Layer::BindingModule));
    assert!(!registry.is_compatible(Layer::Assembly, Layer::Runtime));
    assert!(!registry.is_compatible(Layer::BindingModule, Layer::Runtime));
    // Skew is a compatibility result, not an invariant violation.
    assert!(registry.all_non_empty());
}

/// Construction fails fast when a version string was not stamped; no
/// placeholder is substituted.
#[test]
fn empty_version_field_fails_initialization() {
    let result = VersionRegistry::new(
        VersionInfo::new("0.8", "0.8.1", "0.8.1-abc"),
        VersionInfo::new("0.8", "", "0.8.1-abc"),
        VersionInfo::new("0.8", "0.8.1", "0.8.1-abc"),
    );
    match result {
        Err(Error::EmptyVersionField { layer, field }) => {
            assert_eq!(layer, Layer::BindingModule);
            assert_eq!(field, "api_version");
        }
        other => panic!("expected EmptyVersionField, got {other:?}"),
    }
}

/// The built-in self-check passes against the process-wide registry and
/// unknown check names are rejected.
#[test]
fn named_self_check_dispatch() {
    setup_logging();

    let checks = CheckRegistry::with_builtin_checks();
    assert!(checks.names().any(|name| name == "build_info_strings"));
    checks.run("build_info_strings").unwrap();

    match checks.run("NotACheck") {
        Err(Error::UnknownCheck(name)) => assert_eq!(name, "NotACheck"),
        other => panic!("expected UnknownCheck, got {other:?}"),
    }
}

/// Version triples serialize with stable field names for tooling.
#[test]
fn version_info_serializes_to_json() {
    let versions = VersionInfo::new("0.8", "0.8.1", "0.8.1-abc");
    let json = serde_json::to_value(&versions).unwrap();
    assert_eq!(json["abi_version"], "0.8");
    assert_eq!(json["api_version"], "0.8.1");
    assert_eq!(json["lib_version"], "0.8.1-abc");
}
