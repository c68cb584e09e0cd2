#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::utils::error::{HktError, Result};
use crate::utils::validation::{validate_non_empty_secret, validate_path, Validate};
use std::path::{Path, PathBuf};

/// 本地執行時讀取工作目錄（或上層）的 .env；已存在的環境變數不覆蓋
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}

pub fn load_dotenv_from(path: &Path) -> Result<()> {
    dotenvy::from_path(path).map_err(|e| HktError::ConfigError {
        message: format!("cannot load {}: {}", path.display(), e),
    })
}

/// `run` 子命令的完整設定：Drive id 與本地路徑
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub input_file_id: String,
    pub input_file: PathBuf,
    pub daily_overviews_dir: PathBuf,
    pub statistics_dir: PathBuf,
    pub parent_id_daily_overviews: String,
    pub parent_id_stats: String,
}

impl ConfigProvider for WorkflowSettings {
    fn input_file_id(&self) -> &str {
        &self.input_file_id
    }

    fn input_file(&self) -> &Path {
        &self.input_file
    }

    fn daily_overviews_dir(&self) -> &Path {
        &self.daily_overviews_dir
    }

    fn statistics_dir(&self) -> &Path {
        &self.statistics_dir
    }

    fn parent_id_daily_overviews(&self) -> &str {
        &self.parent_id_daily_overviews
    }

    fn parent_id_stats(&self) -> &str {
        &self.parent_id_stats
    }
}

impl Validate for WorkflowSettings {
    fn validate(&self) -> Result<()> {
        validate_non_empty_secret("input_file_id", &self.input_file_id)?;
        validate_non_empty_secret("parent_id_daily_overviews", &self.parent_id_daily_overviews)?;
        validate_non_empty_secret("parent_id_stats", &self.parent_id_stats)?;
        validate_path("input_file", &self.input_file.to_string_lossy())?;
        validate_path("daily_overviews_dir", &self.daily_overviews_dir.to_string_lossy())?;
        validate_path("statistics_dir", &self.statistics_dir.to_string_lossy())?;
        Ok(())
    }
}
