use itemnet::cli::PairImportConfig;
use itemnet::network::{DegeneracyCheck, NetworkSection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Default)]
pub struct CliConfig {
    path: Option<PathBuf>,
    data: RawConfig,
}

impl CliConfig {
    pub fn load(explicit: Option<PathBuf>) -> Result<Self, ConfigError> {
        let path = explicit.or_else(default_config_path);
        let data = match path.as_ref() {
            Some(config_path) if config_path.exists() => read_file(config_path)?,
            _ => RawConfig::default(),
        };
        Ok(Self { path, data })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn exists(&self) -> bool {
        self.path.as_ref().is_some_and(|path| path.exists())
    }

    pub fn network(&self) -> NetworkSection {
        self.data.network
    }

    /// Applies the `[import]` section to `cfg`; explicit flags are applied later.
    pub fn apply_import(&self, cfg: &mut PairImportConfig) -> Result<(), ConfigError> {
        let section = &self.data.import;
        if let Some(col) = &section.a_column {
            cfg.a_column = col.clone();
        }
        if let Some(col) = &section.b_column {
            cfg.b_column = col.clone();
        }
        if let Some(col) = &section.count_column {
            cfg.count_column = Some(col.clone());
        }
        if let Some(delimiter) = section.delimiter {
            cfg.delimiter = delimiter_byte(delimiter)?;
        }
        if let Some(has_headers) = section.has_headers {
            cfg.has_headers = has_headers;
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(&self.data).map_err(|source| ConfigError::Serialize { source })
    }

    /// Writes a starter config with every default spelled out.
    pub fn init(&mut self, force: bool) -> Result<PathBuf, ConfigError> {
        if self.exists() && !force {
            return Err(ConfigError::AlreadyExists {
                path: self.path.clone().unwrap_or_default(),
            });
        }
        self.data = RawConfig {
            network: NetworkSection {
                keep_order: Some(false),
                ignore_key_equality_error: Some(false),
                degeneracy: Some(DegeneracyCheck::ValueEquality),
            },
            import: ImportSection {
                a_column: Some("a".into()),
                b_column: Some("b".into()),
                count_column: None,
                delimiter: Some(','),
                has_headers: Some(true),
            },
        };
        self.persist()
    }

    pub fn persist(&self) -> Result<PathBuf, ConfigError> {
        let target = if let Some(path) = &self.path {
            path.clone()
        } else if let Some(default) = default_config_path() {
            default
        } else {
            return Err(ConfigError::NoConfigPath);
        };
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let serialized = self.to_toml()?;
        fs::write(&target, serialized).map_err(|source| ConfigError::Write {
            path: target.clone(),
            source,
        })?;
        Ok(target)
    }
}

pub fn delimiter_byte(delimiter: char) -> Result<u8, ConfigError> {
    if delimiter.is_ascii() {
        Ok(delimiter as u8)
    } else {
        Err(ConfigError::InvalidDelimiter { value: delimiter })
    }
}

fn read_file(path: &Path) -> Result<RawConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct RawConfig {
    #[serde(default)]
    network: NetworkSection,
    #[serde(default)]
    import: ImportSection,
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct ImportSection {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    a_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    b_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    count_column: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    delimiter: Option<char>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    has_headers: Option<bool>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read CLI config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse CLI config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to serialize CLI config: {source}")]
    Serialize { source: toml::ser::Error },
    #[error("failed to write CLI config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("config {path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
    #[error("delimiter '{value}' must be a single ASCII character")]
    InvalidDelimiter { value: char },
    #[error("no config directory found; pass --config or set ITEMNET_CONFIG")]
    NoConfigPath,
}

pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|base| base.join("itemnet").join("cli.toml"))
}
