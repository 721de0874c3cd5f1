//! Configuration loading for Fairwalk.
//!
//! `~/.fairwalk/config.toml` is deserialized into raw section structs whose fields
//! are all optional, then resolved into validated settings (see [`resolve`]). A
//! missing file is not an error: every field has a default.

use std::{
    env,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use thiserror::Error;

use fairwalk_types::Scenario;

mod resolve;

pub use resolve::{ParticipantScript, ResolveError, RunnerSettings};

/// Environment variable naming an alternative config file.
pub const CONFIG_ENV: &str = "FAIRWALK_CONFIG";
/// Environment variable overriding `[export].dir`.
pub const EXPORT_DIR_ENV: &str = "FAIRWALK_EXPORT_DIR";

#[derive(Debug, Default, Deserialize)]
pub struct FairwalkConfig {
    pub app: Option<AppConfig>,
    pub timing: Option<TimingConfig>,
    pub navigation: Option<NavigationConfig>,
    pub targets: Option<TargetsConfig>,
    pub participant: Option<ParticipantConfig>,
    pub export: Option<ExportConfig>,
    /// Replaces the built-in eight-scenario study when present.
    pub scenarios: Option<Vec<Scenario>>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

/// Runner frame loop.
#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Real time between frames. Default: 16.
    pub frame_ms: Option<u64>,
    /// Simulated seconds per real second. Default: 1.0.
    pub time_scale: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TimingConfig {
    /// Wait at the chosen option before walking back. Default: 3000.
    pub dwell_ms: Option<u64>,
    /// Delay between arriving home and the next scenario. Default: 100.
    pub settle_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct NavigationConfig {
    /// Units per second. Default: 3.0.
    pub speed: Option<f64>,
    pub arrival_threshold: Option<f64>,
    /// Ground position `[x, z]` the avatar starts from and returns to. Default: `[0, 8]`.
    pub home: Option<[f64; 2]>,
    pub height: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TargetsConfig {
    pub standoff: Option<f64>,
    pub path_entrance_z: Option<f64>,
    pub queue_origin_z: Option<f64>,
    pub queue_spacing: Option<f64>,
    pub queue_padding: Option<f64>,
    pub queue_margin: Option<f64>,
}

/// The scripted participant driven by the headless runner.
#[derive(Debug, Default, Deserialize)]
pub struct ParticipantConfig {
    pub name: Option<String>,
    pub avatar: Option<String>,
    /// Option id to pick per scenario, in order. Missing entries pick the left option.
    #[serde(default)]
    pub choices: Vec<String>,
    /// Simulated time spent looking at each scenario before clicking. Default: 1500.
    pub think_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ExportConfig {
    /// Directory for export files. `${VAR}` references are expanded.
    pub dir: Option<String>,
}

impl FairwalkConfig {
    /// Load from [`config_path`]. `Ok(None)` when there is no file.
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(None);
        }
        Self::load_from(&path).map(Some)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(config),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }
}

/// `$FAIRWALK_CONFIG` if set, else `~/.fairwalk/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    config_path_with(env::var_os(CONFIG_ENV).map(PathBuf::from))
}

fn config_path_with(override_path: Option<PathBuf>) -> Option<PathBuf> {
    override_path
        .filter(|path| !path.as_os_str().is_empty())
        .or_else(|| dirs::home_dir().map(|home| home.join(".fairwalk").join("config.toml")))
}

/// Replace `${VAR}` with the variable's value (empty when unset).
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            break;
        };
        out.push_str(&rest[..start]);
        let var = &after[..end];
        if var.is_empty() {
            out.push_str("${}");
        } else {
            out.push_str(&env::var(var).unwrap_or_default());
        }
        rest = &after[end + 1..];
    }

    out.push_str(rest);
    out
}
