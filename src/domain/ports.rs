use crate::domain::model::{DriveFile, LoadSummary, ReportBundle, Roster};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// 本地輸出目錄
pub trait Storage: Send + Sync {
    fn root(&self) -> &Path;

    fn resolve(&self, path: &str) -> PathBuf {
        self.root().join(path)
    }

    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<PathBuf>> + Send;
    fn remove_file(&self, path: &str) -> impl std::future::Future<Output = Result<()>> + Send;
    /// 建立目錄並刪除其中的檔案（子目錄保留）
    fn prepare(&self) -> impl std::future::Future<Output = Result<()>> + Send;
}

/// 遠端檔案儲存（Google Drive）
#[async_trait]
pub trait RemoteStorage: Send + Sync {
    async fn download(&self, file_id: &str) -> Result<Vec<u8>>;
    async fn find_by_name(&self, parent_id: &str, name: &str) -> Result<Vec<DriveFile>>;
    async fn delete(&self, file_id: &str) -> Result<()>;
    async fn upload(
        &self,
        parent_id: &str,
        name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile>;
}

pub trait ConfigProvider: Send + Sync {
    fn input_file_id(&self) -> &str;
    fn input_file(&self) -> &Path;
    fn daily_overviews_dir(&self) -> &Path;
    fn statistics_dir(&self) -> &Path;
    fn parent_id_daily_overviews(&self) -> &str;
    fn parent_id_stats(&self) -> &str;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Roster>;
    async fn transform(&self, roster: Roster) -> Result<ReportBundle>;
    async fn load(&self, bundle: ReportBundle) -> Result<LoadSummary>;
}
