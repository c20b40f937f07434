use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::{BaseDirs, ProjectDirs};
use once_cell::sync::Lazy;

static DB_FILE_NAME: &str = "tasklist.sqlite3";
static LOG_FILE_NAME: &str = "tasklist.log";
static ENV_DATA_DIR: &str = "TASKLIST_DATA_DIR";
static FALLBACK_DIR_NAME: &str = ".tasklist";

static PROJECT_DIRS: Lazy<Option<ProjectDirs>> =
    Lazy::new(|| ProjectDirs::from("dev", "tasklist", "tasklist"));

/// Which rule picked the data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataDirSource {
    Flag,
    Environment,
    DevBuild,
    Platform,
    Home,
    WorkingDir,
}

impl fmt::Display for DataDirSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            DataDirSource::Flag => "--data-dir",
            DataDirSource::Environment => ENV_DATA_DIR,
            DataDirSource::DevBuild => "dev build",
            DataDirSource::Platform => "platform data dir",
            DataDirSource::Home => "home dir",
            DataDirSource::WorkingDir => "working dir",
        };
        f.write_str(label)
    }
}

/// Resolved locations of everything the app writes.
#[derive(Debug, Clone)]
pub struct AppConfig {
    data_dir: PathBuf,
    db_path: PathBuf,
    log_path: PathBuf,
    source: DataDirSource,
}

impl AppConfig {
    /// Resolve the data directory (override, then `TASKLIST_DATA_DIR`, then
    /// platform defaults) and make sure it exists.
    pub fn discover(data_dir_override: Option<PathBuf>) -> Result<Self> {
        let env_dir = env::var(ENV_DATA_DIR).ok();
        let (data_dir, source) = resolve_data_dir(data_dir_override, env_dir)?;
        fs::create_dir_all(&data_dir).with_context(|| {
            format!("Failed to create data directory at {}", data_dir.display())
        })?;
        let mut config = Self::from_data_dir(data_dir)?;
        config.source = source;
        Ok(config)
    }

    /// Use `data_dir` as is, without creating it.
    pub fn from_data_dir(data_dir: PathBuf) -> Result<Self> {
        Ok(Self {
            db_path: data_dir.join(DB_FILE_NAME),
            log_path: data_dir.join(LOG_FILE_NAME),
            data_dir,
            source: DataDirSource::Flag,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    pub fn log_path(&self) -> &Path {
        &self.log_path
    }

    pub fn source(&self) -> DataDirSource {
        self.source
    }
}

fn resolve_data_dir(
    data_dir_override: Option<PathBuf>,
    env_dir: Option<String>,
) -> Result<(PathBuf, DataDirSource)> {
    if let Some(dir) = data_dir_override {
        return Ok((dir, DataDirSource::Flag));
    }

    if let Some(dir) = env_dir.filter(|dir| !dir.trim().is_empty()) {
        return Ok((PathBuf::from(dir), DataDirSource::Environment));
    }

    if cfg!(debug_assertions) {
        let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let dev_dir = manifest_dir.join("..").join("tmp").join("dev-tasklist");
        return Ok((dev_dir, DataDirSource::DevBuild));
    }

    if let Some(project) = &*PROJECT_DIRS {
        return Ok((project.data_dir().to_path_buf(), DataDirSource::Platform));
    }

    if let Some(base) = BaseDirs::new() {
        return Ok((base.home_dir().join(FALLBACK_DIR_NAME), DataDirSource::Home));
    }

    let cwd = env::current_dir().context("Failed to read the working directory")?;
    Ok((cwd.join(FALLBACK_DIR_NAME), DataDirSource::WorkingDir))
}
