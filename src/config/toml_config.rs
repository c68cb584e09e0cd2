use crate::adapters::google_drive::{DriveEndpoints, DEFAULT_API_BASE, DEFAULT_UPLOAD_BASE};
use crate::adapters::wkhtmltopdf::PdfRenderer;
use crate::core::daily_overview::OverviewOptions;
use crate::utils::error::{HktError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_path, validate_range, validate_url, Validate,
};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "hkt.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub google: GoogleConfig,
    pub render: RenderConfig,
    pub workflow: WorkflowPaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GoogleConfig {
    pub api_base: String,
    pub upload_base: String,
    pub request_timeout_seconds: u64,
}

impl Default for GoogleConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_base: DEFAULT_UPLOAD_BASE.to_string(),
            request_timeout_seconds: 60,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub pdf: bool,
    pub docx: bool,
    pub keep_html: bool,
    pub wkhtmltopdf: String,
    pub user_style_sheet: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            pdf: true,
            docx: true,
            keep_html: false,
            wkhtmltopdf: "wkhtmltopdf".to_string(),
            user_style_sheet: Some("style.css".to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkflowPaths {
    pub input_file: String,
    pub daily_overviews_dir: String,
    pub statistics_dir: String,
}

impl Default for WorkflowPaths {
    fn default() -> Self {
        Self {
            input_file: "HomeKitaTage.xlsx".to_string(),
            daily_overviews_dir: "daily_overviews".to_string(),
            statistics_dir: "stats".to_string(),
        }
    }
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| HktError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 指定路徑必須存在；未指定時若有 hkt.toml 就讀取，否則使用預設值
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path.display());
                Self::from_file(path)
            }
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => {
                tracing::info!("📁 Loading configuration from: {}", DEFAULT_CONFIG_FILE);
                Self::from_file(DEFAULT_CONFIG_FILE)
            }
            None => {
                tracing::debug!("No configuration file, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// 替換環境變數 (例如 ${PARENT_ID_STATS})，未設定的保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| HktError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn drive_endpoints(&self) -> DriveEndpoints {
        DriveEndpoints {
            api_base: self.google.api_base.clone(),
            upload_base: self.google.upload_base.clone(),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.google.request_timeout_seconds)
    }

    pub fn overview_options(&self) -> OverviewOptions {
        OverviewOptions {
            pdf: self.render.pdf.then(|| {
                PdfRenderer::new(
                    &self.render.wkhtmltopdf,
                    self.render.user_style_sheet.as_ref().map(PathBuf::from),
                )
            }),
            docx: self.render.docx,
            keep_html: self.render.keep_html,
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_url("google.api_base", &self.google.api_base)?;
        validate_url("google.upload_base", &self.google.upload_base)?;
        validate_range(
            "google.request_timeout_seconds",
            self.google.request_timeout_seconds,
            1,
            600,
        )?;

        if self.render.pdf {
            validate_non_empty_string("render.wkhtmltopdf", &self.render.wkhtmltopdf)?;
        }
        if let Some(style_sheet) = &self.render.user_style_sheet {
            validate_path("render.user_style_sheet", style_sheet)?;
        }
        if !self.render.pdf && !self.render.docx && !self.render.keep_html {
            return Err(HktError::ConfigValidationError {
                field: "render".to_string(),
                message: "At least one of pdf, docx or keep_html must be enabled".to_string(),
            });
        }

        validate_path("workflow.input_file", &self.workflow.input_file)?;
        validate_path("workflow.daily_overviews_dir", &self.workflow.daily_overviews_dir)?;
        validate_path("workflow.statistics_dir", &self.workflow.statistics_dir)?;

        tracing::debug!("✅ Configuration validation passed");
        Ok(())
    }
}
