//! Object factory configuration.

use crate::error::ConfigError;
use serde::Deserialize;
use std::env;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Environment variable holding comma-separated environment labels. When set
/// and non-empty it replaces the labels from the configuration file.
pub const ENVIRONMENTS_VAR: &str = "STEPWIRE_ENVIRONMENTS";

/// File names searched by [`FactoryConfig::load`], in order.
pub const CONFIG_FILE_NAMES: [&str; 2] = ["stepwire.yaml", "stepwire.yml"];

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FactoryConfig {
  /// Environment labels the bean context is started with.
  #[serde(default = "default_environments")]
  pub environments: Vec<String>,
}

fn default_environments() -> Vec<String> {
  vec!["acceptance".to_string(), "test".to_string()]
}

impl Default for FactoryConfig {
  fn default() -> Self {
    Self {
      environments: default_environments(),
    }
  }
}

impl FactoryConfig {
  pub fn new<I, S>(environments: I) -> Self
  where
    I: IntoIterator<Item = S>,
    S: Into<String>,
  {
    Self {
      environments: environments.into_iter().map(Into::into).collect(),
    }
  }

  pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|e| ConfigError::Parse(e.to_string()))
  }

  pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
    if !path.exists() {
      return Err(ConfigError::NotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    serde_yaml::from_reader(reader).map_err(|e| ConfigError::Parse(e.to_string()))
  }

  /// The first of [`CONFIG_FILE_NAMES`] present in `dir`.
  pub fn find_config_file(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILE_NAMES
      .iter()
      .map(|name| dir.join(name))
      .find(|path| path.is_file())
  }

  /// Reads the configuration file in `dir` if there is one, falls back to the
  /// defaults otherwise, then applies [`ENVIRONMENTS_VAR`].
  pub fn load(dir: &Path) -> Result<Self, ConfigError> {
    let config = match Self::find_config_file(dir) {
      Some(path) => {
        tracing::debug!(path = %path.display(), "loading object factory configuration");
        Self::from_file(&path)?
      }
      None => Self::default(),
    };
    Ok(config.apply_environment_override(env::var(ENVIRONMENTS_VAR).ok().as_deref()))
  }

  /// Replaces the environments with the comma-separated labels in `value`.
  /// Blank labels are dropped; a missing or blank value changes nothing.
  pub fn apply_environment_override(mut self, value: Option<&str>) -> Self {
    let labels: Vec<String> = value
      .unwrap_or_default()
      .split(',')
      .map(str::trim)
      .filter(|label| !label.is_empty())
      .map(str::to_string)
      .collect();
    if !labels.is_empty() {
      self.environments = labels;
    }
    self
  }
}
