//! Configuration module for golive
//!
//! Configuration hierarchy:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (GOLIVE_*)
//! 3. Project config (<source>/golive.toml)
//! 4. Built-in defaults (lowest priority)
//!
//! The built-in defaults describe the original single-app layout: one code
//! file that follows the source on every run, one data file that is seeded
//! once and then owned by the live instance.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::GoliveResult;
use crate::sync::OverwritePolicy;

/// A managed file entry: where it comes from and how it is synchronized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileEntry {
    /// Path relative to the source directory
    pub source: PathBuf,

    /// Destination filename inside the live directory (defaults to the source filename)
    #[serde(default)]
    pub dest: Option<String>,

    #[serde(default)]
    pub policy: OverwritePolicy,
}

impl FileEntry {
    /// Destination filename, falling back to the source filename
    pub fn dest_name(&self) -> String {
        match &self.dest {
            Some(name) => name.clone(),
            None => self
                .source
                .file_name()
                .map(|n| n.to_string_lossy().to_string())
                .unwrap_or_default(),
        }
    }
}

/// Environment (virtualenv) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvConfig {
    /// Directory of the virtualenv, relative to the live directory
    #[serde(default = "default_env_dir")]
    pub dir: PathBuf,

    /// Interpreter used to create the virtualenv
    #[serde(default = "default_python")]
    pub python: String,

    /// Packages installed into the environment, in order
    #[serde(default = "default_packages")]
    pub packages: Vec<String>,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            dir: default_env_dir(),
            python: default_python(),
            packages: default_packages(),
        }
    }
}

fn default_env_dir() -> PathBuf {
    PathBuf::from(".venv")
}

fn default_python() -> String {
    "python3".to_string()
}

fn default_packages() -> Vec<String> {
    vec![
        "gtts".to_string(),
        "pydub".to_string(),
        "pandas".to_string(),
    ]
}

/// Launch configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Entry file, resolved inside the live directory
    #[serde(default = "default_entry")]
    pub entry: String,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            entry: default_entry(),
        }
    }
}

fn default_entry() -> String {
    "language_learner.py".to_string()
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Live deployment directory; `~` expands, relative paths resolve against
    /// the source directory's parent
    #[serde(default = "default_live_dir")]
    pub live_dir: PathBuf,

    #[serde(default)]
    pub env: EnvConfig,

    #[serde(default)]
    pub run: RunConfig,

    #[serde(default = "default_files")]
    pub files: Vec<FileEntry>,
}

fn default_live_dir() -> PathBuf {
    PathBuf::from("live")
}

fn default_files() -> Vec<FileEntry> {
    vec![
        FileEntry {
            source: PathBuf::from("language_learner.py"),
            dest: None,
            policy: OverwritePolicy::Overwrite,
        },
        FileEntry {
            source: PathBuf::from("sentence_pairs.csv"),
            dest: None,
            policy: OverwritePolicy::Preserve,
        },
    ]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            live_dir: default_live_dir(),
            env: EnvConfig::default(),
            run: RunConfig::default(),
            files: default_files(),
        }
    }
}

/// Non-fatal configuration warning surfaced to CLI users.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
    pub line: Option<usize>,
    pub suggestion: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> GoliveResult<Self> {
        let (config, _warnings) = Self::load_with_warnings(path)?;
        Ok(config)
    }

    /// Load configuration and collect non-fatal warnings (e.g. unknown keys).
    pub fn load_with_warnings(path: &Path) -> GoliveResult<(Self, Vec<ConfigWarning>)> {
        let content = fs::read_to_string(path)?;

        let mut unknown_paths: Vec<String> = Vec::new();
        let deserializer = toml::de::Deserializer::new(&content);

        let config: Self = serde_ignored::deserialize(deserializer, |path| {
            unknown_paths.push(path.to_string());
        })
        .map_err(|e| crate::error::GoliveError::Config {
            file: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let warnings = unknown_paths
            .into_iter()
            .map(|path_str| {
                let key = path_str
                    .split('.')
                    .next_back()
                    .unwrap_or(path_str.as_str())
                    .to_string();
                ConfigWarning {
                    key: key.clone(),
                    file: path.to_path_buf(),
                    line: find_line_number(&content, &key),
                    suggestion: suggest_key(&key),
                }
            })
            .collect();

        Ok((config, warnings))
    }

    /// Apply environment variable overrides (GOLIVE_* prefix)
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(dir) = std::env::var("GOLIVE_LIVE_DIR") {
            if !dir.is_empty() {
                self.live_dir = PathBuf::from(dir);
            }
        }

        if let Ok(python) = std::env::var("GOLIVE_PYTHON") {
            if !python.is_empty() {
                self.env.python = python;
            }
        }

        self
    }

    /// Resolve the live directory against the source directory's parent,
    /// expanding `~` first
    pub fn resolve_live_dir(&self, source: &Path) -> PathBuf {
        let expanded = crate::fs::expand_home(&self.live_dir);
        if expanded.is_absolute() {
            expanded
        } else {
            source
                .parent()
                .unwrap_or_else(|| Path::new("."))
                .join(expanded)
        }
    }
}

/// Whether GOLIVE_DRY_RUN requests a dry run. Accepts 1/true/yes in any case;
/// anything else, including unset, means a real run.
pub fn env_dry_run() -> bool {
    match std::env::var("GOLIVE_DRY_RUN") {
        Ok(value) => matches!(
            value.to_ascii_lowercase().as_str(),
            "1" | "true" | "yes"
        ),
        Err(_) => false,
    }
}

fn find_line_number(content: &str, needle: &str) -> Option<usize> {
    for (i, line) in content.lines().enumerate() {
        if line.contains(needle) {
            return Some(i + 1);
        }
    }
    None
}

fn suggest_key(unknown: &str) -> Option<String> {
    const CANDIDATES: &[&str] = &[
        "live_dir", "env", "dir", "python", "packages", "run", "entry", "files", "source", "dest",
        "policy",
    ];

    let mut best: Option<(&str, usize)> = None;
    for candidate in CANDIDATES {
        let dist = levenshtein(unknown, candidate);
        best = match best {
            None => Some((candidate, dist)),
            Some((_, best_dist)) if dist < best_dist => Some((candidate, dist)),
            Some(current) => Some(current),
        };
    }

    match best {
        Some((candidate, dist)) if dist <= 2 => Some(candidate.to_string()),
        _ => None,
    }
}

fn levenshtein(a: &str, b: &str) -> usize {
    if a == b {
        return 0;
    }

    let a_bytes = a.as_bytes();
    let b_bytes = b.as_bytes();

    let mut prev: Vec<usize> = (0..=b_bytes.len()).collect();
    let mut curr = vec![0usize; b_bytes.len() + 1];

    for (i, &ac) in a_bytes.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &bc) in b_bytes.iter().enumerate() {
            let cost = if ac == bc { 0 } else { 1 };
            curr[j + 1] = std::cmp::min(
                std::cmp::min(prev[j + 1] + 1, curr[j] + 1),
                prev[j] + cost,
            );
        }
        prev.clone_from_slice(&curr);
    }

    prev[b_bytes.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.live_dir, PathBuf::from("live"));
        assert_eq!(config.env.dir, PathBuf::from(".venv"));
        assert_eq!(config.env.python, "python3");
        assert_eq!(config.env.packages, vec!["gtts", "pydub", "pandas"]);
        assert_eq!(config.run.entry, "language_learner.py");
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[0].policy, OverwritePolicy::Overwrite);
        assert_eq!(config.files[1].policy, OverwritePolicy::Preserve);
    }

    #[test]
    fn test_config_parse_toml() {
        let toml = r#"
live_dir = "deploy/live"

[env]
dir = "venv"
python = "python3.12"
packages = ["gtts"]

[run]
entry = "app.py"

[[files]]
source = "app.py"
policy = "overwrite"

[[files]]
source = "data/pairs.csv"
dest = "sentence_pairs.csv"
policy = "preserve"
"#;

        let config: Config = toml::from_str(toml).unwrap();

        assert_eq!(config.live_dir, PathBuf::from("deploy/live"));
        assert_eq!(config.env.python, "python3.12");
        assert_eq!(config.env.packages, vec!["gtts"]);
        assert_eq!(config.files.len(), 2);
        assert_eq!(config.files[1].dest_name(), "sentence_pairs.csv");
        assert_eq!(config.files[1].policy, OverwritePolicy::Preserve);
    }

    #[test]
    fn test_dest_name_falls_back_to_source_filename() {
        let entry = FileEntry {
            source: PathBuf::from("data/pairs.csv"),
            dest: None,
            policy: OverwritePolicy::Preserve,
        };
        assert_eq!(entry.dest_name(), "pairs.csv");
    }

    #[test]
    fn test_resolve_live_dir_relative_to_source_parent() {
        let config = Config::default();
        let resolved = config.resolve_live_dir(Path::new("/projects/app/src"));
        assert_eq!(resolved, PathBuf::from("/projects/app/live"));
    }

    #[test]
    fn test_resolve_live_dir_absolute() {
        let config = Config {
            live_dir: PathBuf::from("/srv/live"),
            ..Config::default()
        };
        let resolved = config.resolve_live_dir(Path::new("/projects/app"));
        assert_eq!(resolved, PathBuf::from("/srv/live"));
    }

    #[test]
    fn test_env_override_live_dir() {
        // SAFETY: Single-threaded test, no concurrent access to env vars
        unsafe { std::env::set_var("GOLIVE_LIVE_DIR", "/tmp/other-live") };
        let config = Config::default().with_env_overrides();
        assert_eq!(config.live_dir, PathBuf::from("/tmp/other-live"));
        unsafe { std::env::remove_var("GOLIVE_LIVE_DIR") };
    }

    #[test]
    fn test_env_override_python() {
        // SAFETY: Single-threaded test, no concurrent access to env vars
        unsafe { std::env::set_var("GOLIVE_PYTHON", "python3.11") };
        let config = Config::default().with_env_overrides();
        assert_eq!(config.env.python, "python3.11");
        unsafe { std::env::remove_var("GOLIVE_PYTHON") };
    }

    #[test]
    fn test_env_dry_run_truthy_values() {
        // SAFETY: Single-threaded test, no concurrent access to env vars
        for value in ["1", "true", "YES", "True"] {
            unsafe { std::env::set_var("GOLIVE_DRY_RUN", value) };
            assert!(env_dry_run(), "{value} should request a dry run");
        }
        for value in ["0", "false", "no", ""] {
            unsafe { std::env::set_var("GOLIVE_DRY_RUN", value) };
            assert!(!env_dry_run(), "{value} should not request a dry run");
        }
        unsafe { std::env::remove_var("GOLIVE_DRY_RUN") };
        assert!(!env_dry_run());
    }

    #[test]
    fn test_config_load_with_warnings_reports_unknown_key_with_suggestion() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golive.toml");

        fs::write(&path, "live_dri = \"live\"\n").unwrap();

        let (_config, warnings) = Config::load_with_warnings(&path).unwrap();
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].key, "live_dri");
        assert_eq!(warnings[0].line, Some(1));
        assert_eq!(warnings[0].suggestion, Some("live_dir".to_string()));
    }

    #[test]
    fn test_config_load_invalid_toml_is_config_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("golive.toml");

        fs::write(&path, "files = \"not-a-list\"\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("invalid config"));
    }
}
