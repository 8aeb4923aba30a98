// SPDX-FileCopyrightText: 2026 Contributors to the sdrhal project.
// SPDX-License-Identifier: Apache-2.0

//! Build script for the `sdrhal` binding crate.
//!
//! Stamps the version identity of each layer into the build:
//! 1. Collects crate version, git commit and build date via
//!    `sdrhal-version-helper`
//! 2. Writes `constants.rs` into `OUT_DIR` with one (ABI, API, Lib) triple
//!    per layer
//!
//! All three triples default to the crate's own stamp (a matched build).
//! Each field can be overridden through a
//! `SDRHAL_<LAYER>_<FIELD>_VERSION` environment variable (e.g.
//! `SDRHAL_RUNTIME_ABI_VERSION`) when building against an older runtime.

use std::env;
use std::fs;
use std::path::PathBuf;

/// One stamped (ABI, API, Lib) triple.
struct LayerStamp {
    prefix: &'static str,
    abi: String,
    api: String,
    lib: String,
}

impl LayerStamp {
    fn new(prefix: &'static str, info: &sdrhal_version_helper::BuildInfo) -> Self {
        Self {
            prefix,
            abi: info.abi_version(),
            api: info.version.clone(),
            lib: info.lib_version(),
        }
    }

    /// Applies `SDRHAL_<LAYER>_{ABI,API,LIB}_VERSION` overrides.
    fn with_env_overrides(mut self) -> Self {
        for (field, slot) in [
            ("ABI", &mut self.abi),
            ("API", &mut self.api),
            ("LIB", &mut self.lib),
        ] {
            let var = format!("SDRHAL_{}_{}_VERSION", self.prefix, field);
            println!("cargo:rerun-if-env-changed={var}");
            if let Ok(value) = env::var(&var) {
                *slot = value;
            }
        }
        self
    }

    fn emit(&self, out: &mut String) {
        out.push_str(&format!(
            "pub(crate) const {}_ABI_VERSION: &str = {:?};\n",
            self.prefix, self.abi
        ));
        out.push_str(&format!(
            "pub(crate) const {}_API_VERSION: &str = {:?};\n",
            self.prefix, self.api
        ));
        out.push_str(&format!(
            "pub(crate) const {}_LIB_VERSION: &str = {:?};\n",
            self.prefix, self.lib
        ));
    }
}

fn main() {
    let info = sdrhal_version_helper::info();

    let stamps = [
        LayerStamp::new("ASSEMBLY", &info).with_env_overrides(),
        LayerStamp::new("BINDING", &info).with_env_overrides(),
        LayerStamp::new("RUNTIME", &info).with_env_overrides(),
    ];

    let mut constants = String::new();
    for stamp in &stamps {
        stamp.emit(&mut constants);
    }

    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    fs::write(out_dir.join("constants.rs"), constants).expect("failed to write constants.rs");
}
