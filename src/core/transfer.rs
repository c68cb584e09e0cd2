use crate::adapters::google_drive::mime_type_for;
use crate::domain::model::DriveFile;
use crate::domain::ports::RemoteStorage;
use crate::utils::error::{HktError, Result};
use std::path::{Path, PathBuf};

/// 下載輸入檔到 `dest`，舊檔先刪除
pub async fn download_input_file<R: RemoteStorage + ?Sized>(
    remote: &R,
    file_id: &str,
    dest: &Path,
) -> Result<PathBuf> {
    match tokio::fs::remove_file(dest).await {
        Ok(()) => tracing::debug!("Removed old {}", dest.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => return Err(e.into()),
    }

    tracing::info!("⬇️ Downloading input file {}", file_id);
    let data = remote.download(file_id).await?;

    if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(dest, &data).await?;

    if !dest.is_file() {
        return Err(HktError::ProcessingError {
            message: format!("File {} not found after download", dest.display()),
        });
    }

    tracing::info!("✅ Saved {} bytes to {}", data.len(), dest.display());
    Ok(dest.to_path_buf())
}

/// 上傳檔案到資料夾；同名舊檔先刪除
pub async fn upload_files<R: RemoteStorage + ?Sized>(
    remote: &R,
    parent_id: &str,
    files: &[PathBuf],
) -> Result<Vec<DriveFile>> {
    let mut uploaded = Vec::with_capacity(files.len());

    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| HktError::ValidationError {
                message: format!("{} has no valid file name", path.display()),
            })?;

        for existing in remote.find_by_name(parent_id, name).await? {
            tracing::debug!("Replacing {} ({})", existing.name, existing.id);
            remote.delete(&existing.id).await?;
        }

        let data = tokio::fs::read(path).await?;
        let file = remote
            .upload(parent_id, name, mime_type_for(path), data)
            .await?;

        tracing::info!(
            "⬆️ Uploaded {} to {}",
            file.name,
            file.web_view_link.as_deref().unwrap_or("(no link)")
        );
        uploaded.push(file);
    }

    Ok(uploaded)
}

/// 參數若是存在的路徑就直接使用，否則當成 glob；沒有匹配即錯誤
pub fn expand_file_patterns(patterns: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for pattern in patterns {
        let path = Path::new(pattern);
        if path.is_file() {
            files.push(path.to_path_buf());
            continue;
        }
        if path.is_dir() {
            tracing::debug!("Skipping directory {}", pattern);
            continue;
        }

        let entries = glob::glob(pattern).map_err(|e| HktError::InvalidConfigValueError {
            field: "files".to_string(),
            value: pattern.clone(),
            reason: e.to_string(),
        })?;

        let mut matched: Vec<PathBuf> = entries
            .filter_map(|entry| match entry {
                Ok(p) => Some(p),
                Err(e) => {
                    tracing::warn!("⚠️ Cannot read {}: {}", e.path().display(), e);
                    None
                }
            })
            .filter(|p| p.is_file())
            .collect();

        if matched.is_empty() {
            return Err(HktError::InvalidConfigValueError {
                field: "files".to_string(),
                value: pattern.clone(),
                reason: "No file matches this path or pattern".to_string(),
            });
        }

        matched.sort();
        files.append(&mut matched);
    }

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tokio::sync::Mutex;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        Download(String),
        Find(String, String),
        Delete(String),
        Upload(String, String, String, usize),
    }

    #[derive(Clone, Default)]
    struct MockDrive {
        calls: Arc<Mutex<Vec<Call>>>,
        existing: Vec<DriveFile>,
    }

    #[async_trait]
    impl RemoteStorage for MockDrive {
        async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
            self.calls.lock().await.push(Call::Download(file_id.to_string()));
            if file_id == "missing" {
                return Err(HktError::DriveError {
                    status: 404,
                    message: "File not found: missing.".to_string(),
                });
            }
            Ok(b"xlsx-bytes".to_vec())
        }

        async fn find_by_name(&self, parent_id: &str, name: &str) -> Result<Vec<DriveFile>> {
            self.calls
                .lock()
                .await
                .push(Call::Find(parent_id.to_string(), name.to_string()));
            Ok(self.existing.iter().filter(|f| f.name == name).cloned().collect())
        }

        async fn delete(&self, file_id: &str) -> Result<()> {
            self.calls.lock().await.push(Call::Delete(file_id.to_string()));
            Ok(())
        }

        async fn upload(&self, parent_id: &str, name: &str, mime_type: &str, data: Vec<u8>) -> Result<DriveFile> {
            self.calls.lock().await.push(Call::Upload(
                parent_id.to_string(),
                name.to_string(),
                mime_type.to_string(),
                data.len(),
            ));
            Ok(DriveFile {
                id: format!("new-{}", name),
                name: name.to_string(),
                web_view_link: Some(format!("https://drive.google.com/file/d/new-{}/view", name)),
            })
        }
    }

    #[tokio::test]
    async fn test_download_replaces_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("HomeKitaTage.xlsx");
        std::fs::write(&dest, b"old").unwrap();

        let drive = MockDrive::default();
        download_input_file(&drive, "file-123", &dest).await.unwrap();

        assert_eq!(std::fs::read(&dest).unwrap(), b"xlsx-bytes");
        assert_eq!(*drive.calls.lock().await, vec![Call::Download("file-123".to_string())]);
    }

    #[tokio::test]
    async fn test_download_error_leaves_no_stale_file() {
        let temp_dir = TempDir::new().unwrap();
        let dest = temp_dir.path().join("HomeKitaTage.xlsx");
        std::fs::write(&dest, b"old").unwrap();

        let drive = MockDrive::default();
        let err = download_input_file(&drive, "missing", &dest).await.unwrap_err();

        assert!(matches!(err, HktError::DriveError { status: 404, .. }));
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_upload_deletes_same_name_files_first() {
        let temp_dir = TempDir::new().unwrap();
        let pdf = temp_dir.path().join("stay_at_home_Bears_1_Monday.pdf");
        let png = temp_dir.path().join("Bears_daily_distributions.png");
        std::fs::write(&pdf, b"%PDF").unwrap();
        std::fs::write(&png, b"png").unwrap();

        let drive = MockDrive {
            existing: vec![
                DriveFile {
                    id: "old-1".to_string(),
                    name: "stay_at_home_Bears_1_Monday.pdf".to_string(),
                    web_view_link: None,
                },
                DriveFile {
                    id: "old-2".to_string(),
                    name: "stay_at_home_Bears_1_Monday.pdf".to_string(),
                    web_view_link: None,
                },
            ],
            ..Default::default()
        };

        let uploaded = upload_files(&drive, "folder-1", &[pdf, png]).await.unwrap();

        assert_eq!(uploaded.len(), 2);
        assert_eq!(uploaded[0].id, "new-stay_at_home_Bears_1_Monday.pdf");
        assert_eq!(
            *drive.calls.lock().await,
            vec![
                Call::Find("folder-1".to_string(), "stay_at_home_Bears_1_Monday.pdf".to_string()),
                Call::Delete("old-1".to_string()),
                Call::Delete("old-2".to_string()),
                Call::Upload(
                    "folder-1".to_string(),
                    "stay_at_home_Bears_1_Monday.pdf".to_string(),
                    "application/pdf".to_string(),
                    4
                ),
                Call::Find("folder-1".to_string(), "Bears_daily_distributions.png".to_string()),
                Call::Upload(
                    "folder-1".to_string(),
                    "Bears_daily_distributions.png".to_string(),
                    "image/png".to_string(),
                    3
                ),
            ]
        );
    }

    #[test]
    fn test_expand_file_patterns() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join("b.pdf"), b"b").unwrap();
        std::fs::write(temp_dir.path().join("a.pdf"), b"a").unwrap();
        std::fs::write(temp_dir.path().join("a.docx"), b"a").unwrap();
        std::fs::create_dir(temp_dir.path().join("sub.pdf")).unwrap();

        let explicit = temp_dir.path().join("a.docx").display().to_string();
        let pattern = temp_dir.path().join("*.pdf").display().to_string();

        let files = expand_file_patterns(&[explicit, pattern]).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.docx", "a.pdf", "b.pdf"]);
    }

    #[test]
    fn test_expand_unmatched_pattern_fails() {
        let temp_dir = TempDir::new().unwrap();
        let pattern = temp_dir.path().join("*.pdf").display().to_string();
        assert!(matches!(
            expand_file_patterns(&[pattern]),
            Err(HktError::InvalidConfigValueError { .. })
        ));
    }
}
