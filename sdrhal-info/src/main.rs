// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Command line tool for inspecting sdrhal build/version metadata.
//!
//! Prints the per-layer version table (text or JSON), checks ABI
//! compatibility between layers, and runs named self-checks. By default the
//! runtime layer uses the build-time stamp; pass `--runtime-lib` to query
//! the native runtime library live instead.

use std::collections::BTreeMap;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sdrhal::{
    CheckRegistry, Layer, NativeRuntimeVersions, Result, VersionRegistry, load_runtime,
};
use tracing::warn;

#[derive(Parser)]
#[command(name = "sdrhal-info", version, about = "Inspect sdrhal build/version metadata")]
struct Cli {
    /// Query this native runtime library for the Runtime layer instead of
    /// using the build-time stamp.
    #[arg(long, value_name = "PATH", global = true)]
    runtime_lib: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version table for all layers.
    Versions {
        /// Emit JSON instead of the text table.
        #[arg(long)]
        json: bool,
    },
    /// Check ABI compatibility between two layers.
    ///
    /// Exits non-zero on mismatch.
    Compat {
        /// First layer (Assembly, BindingModule or Runtime).
        layer_a: Layer,
        /// Second layer.
        layer_b: Layer,
    },
    /// Run a named self-check, or list the available checks.
    Check {
        /// Check name; omit to list registered checks.
        name: Option<String>,
    },
}

/// Initializes logging to stdout (respects the RUST_LOG environment
/// variable).
fn setup_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(tracing::level_filters::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .init();
}

/// Builds the registry to report on, querying the native runtime when a
/// library path was given.
fn build_registry(runtime_lib: Option<&PathBuf>) -> Result<VersionRegistry> {
    match runtime_lib {
        Some(path) => {
            let api = load_runtime(path)?;
            if let Err(error) = api.ensure_abi_compatible() {
                // Still report the versions; skew is exactly what this tool
                // is for diagnosing.
                warn!("{error}");
            }
            VersionRegistry::with_runtime_source(&NativeRuntimeVersions::new(api))
        }
        None => Ok(VersionRegistry::global().clone()),
    }
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Versions { json } => {
            let registry = build_registry(cli.runtime_lib.as_ref())?;
            if json {
                let table: BTreeMap<&str, _> = Layer::ALL
                    .iter()
                    .map(|&layer| (layer.name(), registry.get(layer)))
                    .collect();
                println!(
                    "{}",
                    serde_json::to_string_pretty(&table)
                        .map_err(|error| sdrhal::Error::Other(error.to_string()))?
                );
            } else {
                for layer in Layer::ALL {
                    let versions = registry.get(layer);
                    println!(
                        "{}: ABI={}, API={}, Lib={}",
                        layer, versions.abi_version, versions.api_version, versions.lib_version
                    );
                }
            }
        }
        Command::Compat { layer_a, layer_b } => {
            let registry = build_registry(cli.runtime_lib.as_ref())?;
            if registry.is_compatible(layer_a, layer_b) {
                println!(
                    "{} and {} are ABI-compatible ({})",
                    layer_a,
                    layer_b,
                    registry.get(layer_a).abi_version
                );
            } else {
                println!(
                    "{} ({}) and {} ({}) are NOT ABI-compatible",
                    layer_a,
                    registry.get(layer_a).abi_version,
                    layer_b,
                    registry.get(layer_b).abi_version
                );
                std::process::exit(1);
            }
        }
        Command::Check { name } => {
            let checks = CheckRegistry::with_builtin_checks();
            match name {
                Some(name) => {
                    checks.run(&name)?;
                    println!("{name}: ok");
                }
                None => {
                    for name in checks.names() {
                        println!("{name}");
                    }
                }
            }
        }
    }

    Ok(())
}
