//! Configuration file handling (tailor.toml).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Result;
use serde::Deserialize;

/// Configuration file structure (tailor.toml).
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Deserialize)]
pub struct LibraryConfig {
    /// Directory scanned for component manifests
    #[serde(default = "default_library_dir")]
    pub dir: PathBuf,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dir: default_library_dir(),
        }
    }
}

fn default_library_dir() -> PathBuf {
    PathBuf::from("styles")
}

/// Load configuration from `path` if it exists.
/// Returns an error if the config file exists but is malformed.
pub fn load_config(path: &Path) -> Result<ConfigFile> {
    if path.exists() {
        let content = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        let config: ConfigFile = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse {}: {}", path.display(), e))?;
        tracing::debug!("Loaded config from {}", path.display());
        return Ok(config);
    }
    Ok(ConfigFile::default())
}
