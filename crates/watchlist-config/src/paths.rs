use anyhow::Result;
use std::path::{Path, PathBuf};

/// Environment variable naming a directory to keep config and data under
pub const BASE_PATH_ENV: &str = "CINELIST_BASE_PATH";

/// Base directory override from the environment, if one is set
pub fn base_path_override() -> Option<PathBuf> {
    std::env::var_os(BASE_PATH_ENV)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// An override is only honoured when it points at an existing directory
fn pick_base(override_dir: Option<PathBuf>, platform_dir: Option<PathBuf>) -> Option<PathBuf> {
    match override_dir {
        Some(dir) if dir.is_dir() => Some(dir),
        _ => platform_dir.map(|dir| dir.join("cinelist")),
    }
}

pub struct PathManager {
    config_dir: PathBuf,
    data_dir: PathBuf,
}

impl PathManager {
    pub fn new() -> Result<Self> {
        let base_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?
            .join("cinelist");

        Ok(Self::from_base(base_dir))
    }

    /// Lay out config and data under one directory
    pub fn from_base(base: PathBuf) -> Self {
        Self {
            config_dir: base.clone(),
            data_dir: base.join("data"),
        }
    }

    pub fn config_dir(&self) -> &Path {
        &self.config_dir
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Directory backing the client-local key-value store
    pub fn storage_dir(&self) -> PathBuf {
        self.data_dir.join("storage")
    }

    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.toml")
    }

    pub fn ensure_directories(&self) -> Result<()> {
        std::fs::create_dir_all(&self.config_dir)?;
        std::fs::create_dir_all(&self.data_dir)?;
        std::fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }
}

impl Default for PathManager {
    fn default() -> Self {
        // ~/.config/cinelist on Linux unless $CINELIST_BASE_PATH names an existing directory
        match pick_base(base_path_override(), dirs::config_dir()) {
            Some(base) => Self::from_base(base),
            None => Self::from_base(PathBuf::from(".cinelist")),
        }
    }
}
