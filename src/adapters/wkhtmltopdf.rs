use crate::utils::error::{HktError, Result};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::process::Command;

/// 以 wkhtmltopdf 將 HTML 轉成 PDF
#[derive(Debug, Clone)]
pub struct PdfRenderer {
    binary: PathBuf,
    user_style_sheet: Option<PathBuf>,
}

impl PdfRenderer {
    pub fn new(binary: impl Into<PathBuf>, user_style_sheet: Option<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
            user_style_sheet,
        }
    }

    fn arguments(&self, html: &Path, pdf: &Path) -> Vec<String> {
        let mut args = vec![
            "--quiet".to_string(),
            "--encoding".to_string(),
            "UTF-8".to_string(),
        ];

        if let Some(style_sheet) = &self.user_style_sheet {
            if style_sheet.is_file() {
                args.push("--user-style-sheet".to_string());
                args.push(style_sheet.display().to_string());
            } else {
                tracing::warn!(
                    "⚠️ Style sheet {} not found, rendering without it",
                    style_sheet.display()
                );
            }
        }

        args.push(html.display().to_string());
        args.push(pdf.display().to_string());
        args
    }

    pub async fn render(&self, html: &Path, pdf: &Path) -> Result<()> {
        let args = self.arguments(html, pdf);
        tracing::debug!("Running {} {}", self.binary.display(), args.join(" "));

        let output = Command::new(&self.binary)
            .args(&args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|e| HktError::RenderError {
                message: format!("could not start {}: {}", self.binary.display(), e),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(HktError::RenderError {
                message: format!(
                    "{} exited with {}: {}",
                    self.binary.display(),
                    output.status,
                    stderr
                ),
            });
        }

        Ok(())
    }
}
