use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::emitter::{Serialization, SymbolStyle};

pub const DEFAULT_SHADER_ROOT: &str = "src/Graphics/Shaders";
pub const DEFAULT_OUTPUT_NAME: &str = "Shaders.h";
pub const DEFAULT_ORGANISATION: &str = "Bifrost Entertainment AS";
pub const DEFAULT_LICENSE: &str = "Distributed under the MIT License.";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read configuration {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub shader_root: PathBuf,
    pub output_name: String,
    pub serialization: Serialization,
    pub symbols: SymbolStyle,
    pub organisation: String,
    pub license: Option<String>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            shader_root: PathBuf::from(DEFAULT_SHADER_ROOT),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
            serialization: Serialization::default(),
            symbols: SymbolStyle::default(),
            organisation: DEFAULT_ORGANISATION.to_string(),
            license: Some(DEFAULT_LICENSE.to_string()),
        }
    }
}

impl GeneratorConfig {
    pub fn from_toml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shader_root.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("shader_root must not be empty".into()));
        }
        let name = self.output_name.trim();
        if name.is_empty() {
            return Err(ConfigError::Invalid("output_name must not be empty".into()));
        }
        if name.contains(['/', '\\']) {
            return Err(ConfigError::Invalid(format!(
                "output_name '{name}' must be a bare file name"
            )));
        }
        Ok(())
    }

    pub fn output_path(&self) -> PathBuf {
        self.shader_root.join(&self.output_name)
    }
}
