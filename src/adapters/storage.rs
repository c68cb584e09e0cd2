use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    fn root(&self) -> &Path {
        &self.base_path
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<PathBuf> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        fs::write(&full_path, data).await?;
        Ok(full_path)
    }

    async fn remove_file(&self, path: &str) -> Result<()> {
        match fs::remove_file(self.resolve(path)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn prepare(&self) -> Result<()> {
        fs::create_dir_all(&self.base_path).await?;

        let mut removed = 0usize;
        let mut entries = fs::read_dir(&self.base_path).await?;
        while let Some(entry) = entries.next_entry().await? {
            if entry.file_type().await?.is_file() {
                fs::remove_file(entry.path()).await?;
                removed += 1;
            }
        }

        tracing::debug!(
            "Prepared output directory {} ({} old files removed)",
            self.base_path.display(),
            removed
        );
        Ok(())
    }
}
