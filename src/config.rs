//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--sort`, `--log-file`, positional tree file)
//! 2. `$DOCNAV_CONFIG` environment variable (path to config file)
//! 3. Project-local `.docnav.toml` in the current working directory
//! 4. Global `~/.config/docnav/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::components::list::{DEFAULT_OVERSCAN, DEFAULT_VIRTUALIZE_THRESHOLD};
use crate::view::{EngineTiming, SortDirection, SortField, SortOption};

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// JSON document tree to browse (overridden by CLI positional arg).
    pub tree_file: Option<String>,
}

/// Search box settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SearchConfig {
    /// Quiet period before typed text filters the list.
    pub debounce_ms: Option<u64>,
}

/// Simulated folder loading latency.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct NavigationConfig {
    pub forward_latency_ms: Option<u64>,
    pub back_latency_ms: Option<u64>,
}

/// Initial sort order.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct SortConfig {
    /// "name" or "date".
    pub field: Option<String>,
    /// "asc" or "desc".
    pub direction: Option<String>,
}

/// Document list settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ListConfig {
    /// List length at which rows are rendered in a window only.
    pub virtualize_threshold: Option<usize>,
    /// Extra rows kept materialized around the window.
    pub overscan: Option<usize>,
}

/// Log output settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Log file path; the terminal is owned by the UI.
    pub file: Option<String>,
    /// Default filter directive when `RUST_LOG` is unset.
    pub level: Option<String>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub search: SearchConfig,
    pub navigation: NavigationConfig,
    pub sort: SortConfig,
    pub list: ListConfig,
    pub log: LogConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default search debounce in milliseconds.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;
/// Default latency for opening a folder.
pub const DEFAULT_FORWARD_LATENCY_MS: u64 = 300;
/// Default latency for going back.
pub const DEFAULT_BACK_LATENCY_MS: u64 = 200;
/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("DOCNAV_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".docnav.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("docnav").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed; parse failures are pushed to `warnings`.
fn load_file(path: &Path, warnings: &mut Vec<String>) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warnings.push(format!("ignoring config file {}: {}", path.display(), e));
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                tree_file: other
                    .general
                    .tree_file
                    .clone()
                    .or(self.general.tree_file),
            },
            search: SearchConfig {
                debounce_ms: other.search.debounce_ms.or(self.search.debounce_ms),
            },
            navigation: NavigationConfig {
                forward_latency_ms: other
                    .navigation
                    .forward_latency_ms
                    .or(self.navigation.forward_latency_ms),
                back_latency_ms: other
                    .navigation
                    .back_latency_ms
                    .or(self.navigation.back_latency_ms),
            },
            sort: SortConfig {
                field: other.sort.field.clone().or(self.sort.field),
                direction: other.sort.direction.clone().or(self.sort.direction),
            },
            list: ListConfig {
                virtualize_threshold: other
                    .list
                    .virtualize_threshold
                    .or(self.list.virtualize_threshold),
                overscan: other.list.overscan.or(self.list.overscan),
            },
            log: LogConfig {
                file: other.log.file.clone().or(self.log.file),
                level: other.log.level.clone().or(self.log.level),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    ///
    /// Runs before logging exists (the log file is itself configured here), so
    /// files that fail to parse come back as warnings for the caller to log.
    pub fn load(
        cli_config_path: Option<&Path>,
        cli_overrides: Option<&AppConfig>,
    ) -> (AppConfig, Vec<String>) {
        let mut config = AppConfig::default();
        let mut warnings = Vec::new();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path, &mut warnings) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path, &mut warnings) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        (config, warnings)
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn tree_file(&self) -> Option<&Path> {
        self.general.tree_file.as_deref().map(Path::new)
    }

    pub fn debounce_ms(&self) -> u64 {
        self.search.debounce_ms.unwrap_or(DEFAULT_DEBOUNCE_MS)
    }

    pub fn forward_latency_ms(&self) -> u64 {
        self.navigation
            .forward_latency_ms
            .unwrap_or(DEFAULT_FORWARD_LATENCY_MS)
    }

    pub fn back_latency_ms(&self) -> u64 {
        self.navigation
            .back_latency_ms
            .unwrap_or(DEFAULT_BACK_LATENCY_MS)
    }

    /// Engine timers built from the millisecond settings.
    pub fn timing(&self) -> EngineTiming {
        EngineTiming {
            debounce: Duration::from_millis(self.debounce_ms()),
            forward_latency: Duration::from_millis(self.forward_latency_ms()),
            back_latency: Duration::from_millis(self.back_latency_ms()),
        }
    }

    pub fn sort_option(&self) -> SortOption {
        SortOption::new(
            SortField::from_str(self.sort.field.as_deref().unwrap_or("name")),
            SortDirection::from_str(self.sort.direction.as_deref().unwrap_or("asc")),
        )
    }

    pub fn virtualize_threshold(&self) -> usize {
        self.list
            .virtualize_threshold
            .unwrap_or(DEFAULT_VIRTUALIZE_THRESHOLD)
    }

    pub fn overscan(&self) -> usize {
        self.list.overscan.unwrap_or(DEFAULT_OVERSCAN)
    }

    /// Log file, defaulting to `<cache dir>/docnav/docnav.log`.
    pub fn log_file(&self) -> PathBuf {
        match &self.log.file {
            Some(file) => PathBuf::from(file),
            None => dirs::cache_dir()
                .unwrap_or_else(std::env::temp_dir)
                .join("docnav")
                .join("docnav.log"),
        }
    }

    pub fn log_level(&self) -> &str {
        self.log.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert!(cfg.tree_file().is_none());
        assert_eq!(cfg.debounce_ms(), 300);
        assert_eq!(cfg.forward_latency_ms(), 300);
        assert_eq!(cfg.back_latency_ms(), 200);
        assert_eq!(cfg.sort_option(), SortOption::default());
        assert_eq!(cfg.virtualize_threshold(), 50);
        assert_eq!(cfg.overscan(), 5);
        assert_eq!(cfg.log_level(), "info");
        assert!(cfg.log_file().ends_with("docnav/docnav.log"));
        assert_eq!(cfg.timing(), EngineTiming::default());
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[general]
tree_file = "/srv/docs.json"

[search]
debounce_ms = 150

[navigation]
forward_latency_ms = 0
back_latency_ms = 50

[sort]
field = "date"
direction = "desc"

[list]
virtualize_threshold = 100
overscan = 2

[log]
file = "/tmp/docnav-test.log"
level = "debug"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.tree_file(), Some(Path::new("/srv/docs.json")));
        assert_eq!(cfg.debounce_ms(), 150);
        assert_eq!(cfg.forward_latency_ms(), 0);
        assert_eq!(cfg.back_latency_ms(), 50);
        assert_eq!(
            cfg.sort_option(),
            SortOption::new(SortField::Date, SortDirection::Desc)
        );
        assert_eq!(cfg.virtualize_threshold(), 100);
        assert_eq!(cfg.overscan(), 2);
        assert_eq!(cfg.log_file(), PathBuf::from("/tmp/docnav-test.log"));
        assert_eq!(cfg.log_level(), "debug");
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[sort]
direction = "desc"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(
            cfg.sort_option(),
            SortOption::new(SortField::Name, SortDirection::Desc)
        );
        assert_eq!(cfg.debounce_ms(), 300);
    }

    #[test]
    fn test_toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert_eq!(cfg.debounce_ms(), 300);
        assert_eq!(cfg.sort_option(), SortOption::default());
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            search: SearchConfig {
                debounce_ms: Some(100),
            },
            navigation: NavigationConfig {
                forward_latency_ms: Some(10),
                back_latency_ms: Some(20),
            },
            ..Default::default()
        };
        let over = AppConfig {
            navigation: NavigationConfig {
                forward_latency_ms: Some(500),
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.debounce_ms(), 100);
        assert_eq!(merged.forward_latency_ms(), 500);
        assert_eq!(merged.back_latency_ms(), 20);
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            sort: SortConfig {
                field: Some("date".into()),
                direction: Some("desc".into()),
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert_eq!(
            merged.sort_option(),
            SortOption::new(SortField::Date, SortDirection::Desc)
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[search]
debounce_ms = 75

[list]
overscan = 9
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path, &mut Vec::new()).expect("load");
        assert_eq!(cfg.debounce_ms(), 75);
        assert_eq!(cfg.overscan(), 9);
        assert_eq!(cfg.virtualize_threshold(), 50);
    }

    #[test]
    fn test_load_missing_file() {
        let mut warnings = Vec::new();
        assert!(load_file(Path::new("/nonexistent/config.toml"), &mut warnings).is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        let mut warnings = Vec::new();
        assert!(load_file(&cfg_path, &mut warnings).is_none());
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_load_reports_unparsable_cli_config() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("broken.toml");
        std::fs::write(&cfg_path, "[search\ndebounce_ms = 10").expect("write");

        let (cfg, warnings) = AppConfig::load(Some(&cfg_path), None);
        assert_eq!(cfg.debounce_ms(), DEFAULT_DEBOUNCE_MS);
        assert!(warnings.iter().any(|w| w.contains("broken.toml")));
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[general]
tree_file = "from-file.json"

[search]
debounce_ms = 120
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            general: GeneralConfig {
                tree_file: Some("from-cli.json".into()),
            },
            ..Default::default()
        };

        let (cfg, _warnings) = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        assert_eq!(cfg.tree_file(), Some(Path::new("from-cli.json")));
        assert_eq!(cfg.debounce_ms(), 120);
    }
}
