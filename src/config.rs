use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::Error;

/// Name of the per-project config file, looked up in the working directory.
pub const CONFIG_FILE: &str = ".livetext.toml";

/// Address the service binds when nothing else is configured.
pub const DEFAULT_BIND: &str = "127.0.0.1:3456";

/// Per-request timeout used by the HTTP client.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where edits go and whether editing is on.
///
/// Threaded into every request instead of living in ambient state.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Editing is refused while this is off.
    pub edit_mode: bool,
    /// File tried before any resolver guess.
    pub explicit_file: Option<PathBuf>,
    /// Root of the project the resolver guesses inside.
    pub project_root: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        return Self {
            edit_mode: true,
            explicit_file: None,
            project_root: None,
        };
    }
}

/// How the patch service is reached and served.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listen address for `livetext serve`.
    pub bind: String,
    /// Client timeout per patch request, in seconds.
    pub timeout_secs: u64,
    /// When set, `save` sends patches to this service instead of patching in-process.
    pub url: Option<String>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        return Self {
            bind: DEFAULT_BIND.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            url: None,
        };
    }
}

impl ServiceConfig {
    /// The client timeout as a `Duration`.
    pub const fn timeout(&self) -> Duration {
        return Duration::from_secs(self.timeout_secs);
    }
}

/// Project configuration loaded from `.livetext.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Config {
    /// Service endpoint settings.
    pub service: ServiceConfig,
    /// Edit settings.
    pub settings: Settings,
}

/// Raw TOML structure: settings at the top level, `[service]` as a table.
#[derive(serde::Deserialize)]
struct LivetextTomlConfig {
    /// The `[service]` table.
    #[serde(default)]
    service: ServiceConfig,
    /// Top-level keys.
    #[serde(flatten)]
    settings: Settings,
}

impl Config {
    /// Load config from `.livetext.toml` in the given directory.
    ///
    /// Returns defaults if the file doesn't exist. A file that exists but is
    /// malformed is an error, never a silent fallback to defaults.
    ///
    /// # Errors
    ///
    /// Returns `Error::Io` if reading fails (other than not-found),
    /// or `Error::ConfigInvalid` if the TOML is malformed.
    pub fn load(dir: &Path) -> Result<Self, Error> {
        let path = dir.join(CONFIG_FILE);
        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(Error::Io {
                    name: CONFIG_FILE.to_string(),
                    source,
                });
            },
        };
        return Self::parse(&path, &content);
    }

    /// Parse config file content.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigInvalid` if the TOML is malformed.
    pub fn parse(path: &Path, content: &str) -> Result<Self, Error> {
        let raw: LivetextTomlConfig = toml::from_str(content).map_err(|source| {
            return Error::ConfigInvalid {
                path: path.to_path_buf(),
                source,
            };
        })?;
        return Ok(Self {
            service: raw.service,
            settings: raw.settings,
        });
    }
}
