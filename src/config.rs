//! Configuration discovery and effective settings resolution.
//!
//! The checker reads `matlab_style.toml|yaml|yml` from the target directory
//! (or closest ancestor) and merges it with CLI flags into an `Effective`.
//! Defaults:
//! - `output`: `human`
//! - `check.verbose`: false
//!
//! Overrides precedence: CLI > config file > defaults. The rule set itself is
//! fixed and has no configuration keys. Formatter overwrites are only ever
//! enabled by `--force` on the command line.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["matlab_style.toml", "matlab_style.yaml", "matlab_style.yml"];

#[derive(Debug, Default, Deserialize, Clone)]
/// Checker section under `[check]`.
pub struct CheckCfg {
    pub verbose: Option<bool>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root configuration loaded from `matlab_style.toml|yaml`.
pub struct StyleConfig {
    pub output: Option<OutputMode>,
    pub check: Option<CheckCfg>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
/// Report format for the checker.
pub enum OutputMode {
    Human,
    Json,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by the binaries after applying precedence.
pub struct Effective {
    pub config_root: Option<PathBuf>,
    pub output: OutputMode,
    pub verbose: bool,
}

/// Walk upward from `start` to the closest directory holding a config file.
///
/// Stops at a `.git` directory; returns `None` when nothing is found.
pub fn find_config_root(start: &Path) -> Option<PathBuf> {
    let start = fs::canonicalize(start).unwrap_or_else(|_| start.to_path_buf());
    let mut cur = start.as_path();
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).is_file()) {
            return Some(cur.to_path_buf());
        }
        if cur.join(".git").exists() {
            return None;
        }
        cur = cur.parent()?;
    }
}

/// Load `StyleConfig` from `dir` if a config file is present and parses.
pub fn load_config(dir: &Path) -> Option<StyleConfig> {
    let toml_path = dir.join(CONFIG_NAMES[0]);
    if toml_path.exists() {
        let s = fs::read_to_string(&toml_path).ok()?;
        return toml::from_str(&s).ok();
    }
    for yml in &CONFIG_NAMES[1..] {
        let p = dir.join(yml);
        if p.exists() {
            let s = fs::read_to_string(&p).ok()?;
            return serde_yaml::from_str(&s).ok();
        }
    }
    None
}

/// Resolve `Effective` by merging CLI flags, discovered config, and defaults.
///
/// `target` is the directory (or file) the command acts on; discovery starts
/// from it, or from its parent when it is a file.
pub fn resolve_effective(
    target: &Path,
    cli_output: Option<OutputMode>,
    cli_verbose: Option<bool>,
) -> Effective {
    let start = if target.is_file() {
        target.parent().unwrap_or_else(|| Path::new("."))
    } else {
        target
    };
    let config_root = find_config_root(start);
    let cfg = config_root
        .as_deref()
        .and_then(load_config)
        .unwrap_or_default();

    let output = cli_output.or(cfg.output).unwrap_or(OutputMode::Human);
    let verbose = cli_verbose
        .or_else(|| cfg.check.as_ref().and_then(|c| c.verbose))
        .unwrap_or(false);
    Effective {
        config_root,
        output,
        verbose,
    }
}
