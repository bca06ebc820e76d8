//! Manifest files describing a program and its help topics.
//!
//! A manifest lets a host keep its identity and documentation-only topics in
//! YAML instead of code:
//!
//! ```yaml
//! name: demo
//! version: ${DEMO_VERSION:-dev}
//! description: Demo command line
//! topics:
//!   - command: environment
//!     short: environment variables
//!     help: |
//!       DEMO_HOME sets the data directory.
//! ```
//!
//! ## Environment Variable Expansion
//!
//! Values may reference environment variables before parsing:
//! - `${VAR}` - Simple substitution
//! - `${VAR:-default}` - Use default if VAR is unset or empty
//! - `${VAR-default}` - Use default if VAR is unset
//! - `${VAR:+alt}` - Use alt if VAR is set and non-empty
//! - `${VAR+alt}` - Use alt if VAR is set

use anyhow::Context;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::{env, fs};

use crate::command::HelpTopic;
use crate::program::Program;

/// Environment variable naming a manifest that overrides the default path.
pub const MANIFEST_ENV: &str = "SUBCLI_MANIFEST";

static PLACEHOLDER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)(?:(:?[-+])([^}]*))?\}")
        .expect("placeholder pattern is valid")
});

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    #[serde(flatten)]
    pub program: Program,
    /// Documentation-only entries listed under "Additional help topics"
    #[serde(default)]
    pub topics: Vec<HelpTopic>,
}

/// Reads and parses a manifest, expanding environment placeholders first.
pub fn load_manifest(path: &Path) -> anyhow::Result<Manifest> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading manifest {}", path.display()))?;
    let manifest: Manifest = serde_yaml::from_str(&expand_env_placeholders(&raw))
        .with_context(|| format!("parsing manifest {}", path.display()))?;
    Ok(manifest)
}

/// `$SUBCLI_MANIFEST` if set, otherwise `default`.
pub fn manifest_path(default: impl Into<PathBuf>) -> PathBuf {
    env::var(MANIFEST_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|_| default.into())
}

pub fn save_manifest(manifest: &Manifest, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let data = serde_yaml::to_string(manifest)?;
    fs::write(path, data).with_context(|| format!("writing manifest {}", path.display()))?;
    Ok(())
}

pub fn expand_env_placeholders(input: &str) -> String {
    PLACEHOLDER
        .replace_all(input, |caps: &regex::Captures| {
            let var_name = &caps[1];
            let op = caps.get(2).map_or("", |m| m.as_str());
            let val = caps.get(3).map_or("", |m| m.as_str());
            let var = env::var(var_name).ok();

            match (var.as_deref(), op) {
                (Some(v), "") => v.to_string(),                    // ${VAR}
                (Some(v), ":-") if !v.is_empty() => v.to_string(), // ${VAR:-default}
                (_, ":-") => val.to_string(),
                (Some(v), "-") => v.to_string(), // ${VAR-default}
                (None, "-") => val.to_string(),
                (Some(v), ":+") if !v.is_empty() => val.to_string(), // ${VAR:+alt}
                (Some(_), "+") => val.to_string(),                   // ${VAR+alt}
                _ => String::new(),
            }
        })
        .into_owned()
}
