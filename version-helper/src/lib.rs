// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! build.rs helper for stamping build/version metadata.
//!
//! This crate is meant to be called from a build script. It determines the
//! crate version (following `version.workspace = true` indirection if
//! present), the current git commit and the build date, and exports them to
//! the compiled crate as environment variables:
//!
//! - `COMMIT_ID`: short git commit hash, or `"RELEASE"` outside a git tree
//! - `BUILD_REL_DATE`: commit date, or today's date outside a git tree
//!
//! The same data is returned as a [`BuildInfo`] so that build scripts can
//! derive further constants (e.g. a full library version string) from it.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use chrono::Utc;
use toml_edit::DocumentMut;

/// Version metadata determined at build time.
pub struct BuildInfo {
    /// Crate version as declared in Cargo.toml (e.g. `"0.8.1"`).
    pub version: String,
    /// Short git commit hash, or `"RELEASE"` when not built from a git tree.
    pub commit_id: String,
    /// Commit date (or today's date) formatted as `YYYY-MM-DD`.
    pub build_date: String,
}

impl BuildInfo {
    /// Returns the full library version string, e.g. `"0.8.1-g1234567"`.
    ///
    /// For release builds (no git tree available) the date is used instead
    /// of a commit hash, e.g. `"0.8.1-2026.08.23"`.
    pub fn lib_version(&self) -> String {
        if self.commit_id == "RELEASE" {
            format!("{}-{}", self.version, self.build_date.replace('-', "."))
        } else {
            format!("{}-g{}", self.version, self.commit_id)
        }
    }

    /// Returns the ABI compatibility class, i.e. the `major.minor` prefix
    /// of the crate version.
    pub fn abi_version(&self) -> String {
        self.version
            .splitn(3, '.')
            .take(2)
            .collect::<Vec<_>>()
            .join(".")
    }
}

/// Collects build metadata and exports it to the calling crate.
///
/// Must be called from a build script. Emits `cargo:rustc-env` lines for
/// `COMMIT_ID` and `BUILD_REL_DATE`, plus the `rerun-if-changed` lines
/// needed to re-stamp when the git head moves.
pub fn info() -> BuildInfo {
    let crate_dir =
        PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"));

    let version = crate_version(&crate_dir)
        .or_else(|| env::var("CARGO_PKG_VERSION").ok())
        .expect("failed to determine crate version");

    let (commit_id, build_date) = match git_info(&crate_dir) {
        Some((commit, date)) => (commit, date),
        None => ("RELEASE".to_string(), Utc::now().format("%Y-%m-%d").to_string()),
    };

    println!("cargo:rustc-env=COMMIT_ID={commit_id}");
    println!("cargo:rustc-env=BUILD_REL_DATE={build_date}");

    BuildInfo {
        version,
        commit_id,
        build_date,
    }
}

/// Reads the `version` field from the crate's Cargo.toml, following
/// `version.workspace = true` to the workspace manifest if necessary.
fn crate_version(crate_dir: &Path) -> Option<String> {
    let manifest = parse_manifest(&crate_dir.join("Cargo.toml"))?;
    let version = manifest.get("package")?.as_table_like()?.get("version")?;

    if let Some(version) = version.as_str() {
        return Some(version.to_string());
    }

    // version.workspace = true: look for the workspace manifest upwards.
    let from_workspace = version
        .as_table_like()
        .and_then(|t| t.get("workspace"))
        .and_then(|w| w.as_bool())
        == Some(true);
    if from_workspace {
        let mut dir = crate_dir.parent();
        while let Some(candidate) = dir {
            if let Some(version) = parse_manifest(&candidate.join("Cargo.toml"))
                .as_ref()
                .and_then(workspace_package_version)
            {
                return Some(version);
            }
            dir = candidate.parent();
        }
    }

    None
}

fn workspace_package_version(manifest: &DocumentMut) -> Option<String> {
    manifest
        .get("workspace")?
        .as_table_like()?
        .get("package")?
        .as_table_like()?
        .get("version")?
        .as_str()
        .map(str::to_string)
}

fn parse_manifest(path: &Path) -> Option<DocumentMut> {
    fs::read_to_string(path).ok()?.parse::<DocumentMut>().ok()
}

/// Queries git for the short commit hash and commit date of HEAD.
///
/// Returns `None` when the crate is not built from a git checkout (e.g.
/// from a release tarball).
fn git_info(crate_dir: &Path) -> Option<(String, String)> {
    let commit = git(crate_dir, &["rev-parse", "--short=7", "HEAD"])?;
    let date = git(
        crate_dir,
        &["show", "-s", "--format=%cd", "--date=format:%Y-%m-%d", "HEAD"],
    )?;

    // Re-stamp whenever HEAD moves.
    if let Some(git_dir) = git(crate_dir, &["rev-parse", "--git-dir"]) {
        // May be relative to the crate directory.
        let git_dir = crate_dir.join(git_dir);
        println!("cargo:rerun-if-changed={}", git_dir.join("HEAD").display());
    }

    Some((commit, date))
}

fn git(dir: &Path, args: &[&str]) -> Option<String> {
    let output = Command::new("git").current_dir(dir).args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let stdout = String::from_utf8(output.stdout).ok()?;
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::BuildInfo;

    #[test]
    fn abi_version_is_major_minor() {
        let info = BuildInfo {
            version: "0.8.1".to_string(),
            commit_id: "1234567".to_string(),
            build_date: "2026-08-23".to_string(),
        };
        assert_eq!(info.abi_version(), "0.8");
    }

    #[test]
    fn lib_version_includes_commit() {
        let info = BuildInfo {
            version: "0.8.1".to_string(),
            commit_id: "1234567".to_string(),
            build_date: "2026-08-23".to_string(),
        };
        assert_eq!(info.lib_version(), "0.8.1-g1234567");
    }

    #[test]
    fn lib_version_falls_back_to_date_for_releases() {
        let info = BuildInfo {
            version: "0.8.1".to_string(),
            commit_id: "RELEASE".to_string(),
            build_date: "2026-08-23".to_string(),
        };
        assert_eq!(info.lib_version(), "0.8.1-2026.08.23");
    }
}
