//! Configuration for Palco.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::PalcoResult;

/// Main configuration for Palco.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// General settings.
    #[serde(default)]
    pub general: GeneralConfig,

    /// Compiler Explorer settings.
    #[serde(default)]
    pub godbolt: GodboltConfig,

    /// Rendering settings.
    #[serde(default)]
    pub render: RenderConfig,
}

/// General settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Log format (text, json).
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// HTTP transport timeout (in seconds).
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            log_format: default_log_format(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "text".to_string()
}

fn default_timeout() -> u64 {
    60
}

/// Compiler Explorer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GodboltConfig {
    /// Service endpoint.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Default compiler identifier.
    #[serde(default = "default_compiler")]
    pub compiler: String,

    /// Default compiler flags.
    #[serde(default = "default_flags")]
    pub flags: String,
}

impl Default for GodboltConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            compiler: default_compiler(),
            flags: default_flags(),
        }
    }
}

fn default_endpoint() -> String {
    "https://godbolt.org".to_string()
}

fn default_compiler() -> String {
    "cg141".to_string()
}

fn default_flags() -> String {
    "-O0".to_string()
}

/// Rendering settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Show inline per-line annotations.
    #[serde(default = "default_true")]
    pub inline: bool,

    /// Show the aggregate output panel.
    #[serde(default = "default_true")]
    pub panel: bool,

    /// Show the Compiler Explorer link.
    #[serde(default = "default_true")]
    pub link: bool,

    /// Width constraint for the code block (CSS size).
    #[serde(default)]
    pub max_width: Option<String>,

    /// Height constraint for the code block (CSS size).
    #[serde(default)]
    pub max_height: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            inline: true,
            panel: true,
            link: true,
            max_width: None,
            max_height: None,
        }
    }
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Loads configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> PalcoResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Saves configuration to a TOML file.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> PalcoResult<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Creates default configuration.
    pub fn default_config() -> Self {
        Self {
            general: GeneralConfig::default(),
            godbolt: GodboltConfig::default(),
            render: RenderConfig::default(),
        }
    }

    /// Tries to load configuration from the current directory, then from
    /// the user config directory, falling back to defaults.
    pub fn load_or_default() -> Self {
        if let Ok(config) = Self::load("palco.toml") {
            return config;
        }

        if let Some(dir) = dirs::config_dir() {
            if let Ok(config) = Self::load(dir.join("palco").join("palco.toml")) {
                return config;
            }
        }

        Self::default_config()
    }

    /// Baseline runner options derived from this configuration.
    pub fn runner_options(&self) -> RunnerOptions {
        RunnerOptions {
            compiler: self.godbolt.compiler.clone(),
            flags: self.godbolt.flags.clone(),
            inline: self.render.inline,
            panel: self.render.panel,
            link: self.render.link,
            max_width: self.render.max_width.clone(),
            max_height: self.render.max_height.clone(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

/// Fully-resolved options for one runner invocation.
///
/// Immutable once resolved; produced by merging caller overrides onto the
/// defaults with [`RunnerOptions::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunnerOptions {
    /// Compiler identifier on the remote service.
    pub compiler: String,

    /// Compiler command-line flags.
    pub flags: String,

    /// Show inline per-line annotations.
    pub inline: bool,

    /// Show the aggregate output panel.
    pub panel: bool,

    /// Show the external-service link.
    pub link: bool,

    /// Width constraint (CSS size).
    pub max_width: Option<String>,

    /// Height constraint (CSS size).
    pub max_height: Option<String>,
}

impl Default for RunnerOptions {
    fn default() -> Self {
        Config::default_config().runner_options()
    }
}

impl RunnerOptions {
    /// Pure merge: each field takes the override's value when present,
    /// otherwise the default. Values themselves are not validated.
    pub fn merge(&self, overrides: &RunnerOverrides) -> RunnerOptions {
        RunnerOptions {
            compiler: overrides
                .compiler
                .clone()
                .unwrap_or_else(|| self.compiler.clone()),
            flags: overrides
                .flags
                .clone()
                .unwrap_or_else(|| self.flags.clone()),
            inline: overrides.inline.unwrap_or(self.inline),
            panel: overrides.panel.unwrap_or(self.panel),
            link: overrides.link.unwrap_or(self.link),
            max_width: overrides.max_width.clone().or_else(|| self.max_width.clone()),
            max_height: overrides
                .max_height
                .clone()
                .or_else(|| self.max_height.clone()),
        }
    }
}

/// Partial overrides supplied by the caller.
///
/// Unrecognized fields in the incoming bag are ignored deterministically.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerOverrides {
    pub compiler: Option<String>,
    pub flags: Option<String>,
    pub inline: Option<bool>,
    pub panel: Option<bool>,
    pub link: Option<bool>,
    pub max_width: Option<String>,
    pub max_height: Option<String>,
}

impl RunnerOverrides {
    /// Extracts overrides from a free-form options bag.
    ///
    /// Hosts pass either the recognized options directly or nested under a
    /// `runner_options`/`runnerOptions` key; anything unparseable yields
    /// empty overrides.
    pub fn from_bag(bag: &serde_json::Value) -> Self {
        let nested = bag
            .get("runner_options")
            .or_else(|| bag.get("runnerOptions"));

        let value = nested.unwrap_or(bag);
        serde_json::from_value(value.clone()).unwrap_or_default()
    }
}
