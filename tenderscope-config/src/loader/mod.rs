//! Resolution order for the engine configuration.
//!
//! 1. `$TENDERSCOPE_CONFIG_PATH` (TOML or JSON file)
//! 2. `$TENDERSCOPE_CONFIG_JSON` (inline JSON)
//! 3. `tenderscope.toml`, `tenderscope.json`, `config/tenderscope.toml` or
//!    `config/tenderscope.json` under the loader root
//! 4. built-in defaults
//!
//! A `.env` file is loaded first so the variables above can live there.

pub mod error;

use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, anyhow};
use tenderscope_core::EngineConfig;
use tracing::{debug, info};

use error::ConfigLoadError;

pub const CONFIG_PATH_VAR: &str = "TENDERSCOPE_CONFIG_PATH";
pub const CONFIG_JSON_VAR: &str = "TENDERSCOPE_CONFIG_JSON";

const DEFAULT_FILES: &[&str] = &[
    "tenderscope.toml",
    "tenderscope.json",
    "config/tenderscope.toml",
    "config/tenderscope.json",
];

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConfigSource {
    #[default]
    Default,
    EnvPath(PathBuf),
    EnvInline,
    File(PathBuf),
}

/// A validated configuration and its provenance.
#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: EngineConfig,
    pub source: ConfigSource,
    pub env_file_loaded: bool,
}

/// Builder for one configuration load.
///
/// Variables are read from the process environment unless overridden with
/// [`ConfigLoader::var`], which keeps tests independent of each other.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    root: PathBuf,
    load_env_file: bool,
    overrides: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            root: PathBuf::from("."),
            load_env_file: true,
            overrides: None,
        }
    }

    /// Directory the default file candidates are looked up in.
    pub fn root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    pub fn skip_env_file(mut self) -> Self {
        self.load_env_file = false;
        self
    }

    /// Read variables from this map instead of the process environment.
    pub fn var(mut self, key: &str, value: impl Into<String>) -> Self {
        self.overrides
            .get_or_insert_with(HashMap::new)
            .insert(key.to_string(), value.into());
        self
    }

    pub fn load(&self) -> anyhow::Result<ConfigLoad> {
        let env_file_loaded = self.load_env_file && dotenvy::dotenv().is_ok();

        let (config, source) = self.resolve()?;
        config
            .validate()
            .map_err(|source_err| ConfigLoadError::Invalid {
                origin: describe(&source),
                source: source_err,
            })?;

        info!(source = %describe(&source), page_size = config.page_size, "engine config loaded");
        Ok(ConfigLoad {
            config,
            source,
            env_file_loaded,
        })
    }

    fn resolve(&self) -> anyhow::Result<(EngineConfig, ConfigSource)> {
        if let Some(path) = self.lookup(CONFIG_PATH_VAR) {
            let path = PathBuf::from(path);
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::EnvPath(path)));
        }

        if let Some(raw) = self.lookup(CONFIG_JSON_VAR) {
            let config = parse_json(&raw)
                .with_context(|| format!("failed to parse {CONFIG_JSON_VAR}"))?;
            return Ok((config, ConfigSource::EnvInline));
        }

        if let Some(path) = self.find_default_file() {
            let config = load_from_file(&path)?;
            return Ok((config, ConfigSource::File(path)));
        }

        debug!("no config override found, using defaults");
        Ok((EngineConfig::default(), ConfigSource::Default))
    }

    fn lookup(&self, key: &str) -> Option<String> {
        let value = match &self.overrides {
            Some(vars) => vars.get(key).cloned(),
            None => env::var(key).ok(),
        };
        value.filter(|value| !value.trim().is_empty())
    }

    fn find_default_file(&self) -> Option<PathBuf> {
        DEFAULT_FILES
            .iter()
            .map(|candidate| self.root.join(candidate))
            .find(|path| path.exists())
    }
}

/// Read a config file, choosing the format from its extension. Files without
/// a known extension are tried as TOML first, then JSON.
pub fn load_from_file(path: &Path) -> anyhow::Result<EngineConfig> {
    if !path.exists() {
        return Err(ConfigLoadError::MissingFile(path.to_path_buf()).into());
    }
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read engine config from {}", path.display()))?;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => parse_json(&contents)
            .with_context(|| format!("invalid engine config {}", path.display())),
        Some("toml") => toml::from_str(&contents)
            .map_err(|err| anyhow!("invalid engine config {}: {}", path.display(), err)),
        _ => parse_from_str(&contents, &path.display().to_string()),
    }
}

pub fn parse_from_str(contents: &str, origin: &str) -> anyhow::Result<EngineConfig> {
    toml::from_str(contents).or_else(|toml_err| {
        serde_json::from_str(contents).map_err(|json_err| {
            anyhow::Error::from(ConfigLoadError::Unparseable {
                origin: origin.to_string(),
                toml: toml_err.to_string(),
                json: json_err.to_string(),
            })
        })
    })
}

pub fn parse_json(raw: &str) -> anyhow::Result<EngineConfig> {
    serde_json::from_str(raw).map_err(|err| anyhow!("invalid engine config json: {err}"))
}

fn describe(source: &ConfigSource) -> String {
    match source {
        ConfigSource::Default => "defaults".to_string(),
        ConfigSource::EnvPath(path) => format!("${CONFIG_PATH_VAR} ({})", path.display()),
        ConfigSource::EnvInline => format!("${CONFIG_JSON_VAR}"),
        ConfigSource::File(path) => path.display().to_string(),
    }
}
