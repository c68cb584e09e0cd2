//! Google Drive v3 REST client.
//!
//! Only the handful of calls the report workflow needs: media download,
//! listing by name inside a folder, delete, and multipart upload.

use crate::adapters::google_auth::ServiceAccountAuth;
use crate::domain::model::DriveFile;
use crate::domain::ports::RemoteStorage;
use crate::utils::error::{HktError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::path::Path;

pub const DEFAULT_API_BASE: &str = "https://www.googleapis.com";
pub const DEFAULT_UPLOAD_BASE: &str = "https://www.googleapis.com/upload";

const MULTIPART_BOUNDARY: &str = "hkt_upload_boundary_5f3b2c";

#[derive(Debug, Clone)]
pub struct DriveEndpoints {
    pub api_base: String,
    pub upload_base: String,
}

impl Default for DriveEndpoints {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            upload_base: DEFAULT_UPLOAD_BASE.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
    #[serde(default)]
    next_page_token: Option<String>,
}

pub struct GoogleDriveClient {
    client: Client,
    auth: ServiceAccountAuth,
    endpoints: DriveEndpoints,
}

impl GoogleDriveClient {
    pub fn new(client: Client, auth: ServiceAccountAuth, endpoints: DriveEndpoints) -> Self {
        Self {
            client,
            auth,
            endpoints,
        }
    }

    fn files_url(&self) -> String {
        format!("{}/drive/v3/files", self.endpoints.api_base.trim_end_matches('/'))
    }

    fn file_url(&self, file_id: &str) -> String {
        format!("{}/{}", self.files_url(), file_id)
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/drive/v3/files",
            self.endpoints.upload_base.trim_end_matches('/')
        )
    }

    /// 非 2xx 回應轉成 DriveError
    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
            .unwrap_or(body);

        Err(HktError::DriveError {
            status: status.as_u16(),
            message,
        })
    }
}

/// Drive 查詢字串中的字面值需跳脫 `\` 與 `'`
pub fn escape_query_literal(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

pub fn mime_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());

    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("docx") => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("png") => "image/png",
        Some("csv") => "text/csv",
        Some("html") | Some("htm") => "text/html",
        _ => "application/octet-stream",
    }
}

fn multipart_related_body(metadata: &serde_json::Value, mime_type: &str, data: &[u8]) -> Vec<u8> {
    let mut body = Vec::with_capacity(data.len() + 512);
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(b"Content-Type: application/json; charset=UTF-8\r\n\r\n");
    body.extend_from_slice(metadata.to_string().as_bytes());
    body.extend_from_slice(format!("\r\n--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", mime_type).as_bytes());
    body.extend_from_slice(data);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());
    body
}

#[async_trait]
impl RemoteStorage for GoogleDriveClient {
    async fn download(&self, file_id: &str) -> Result<Vec<u8>> {
        let token = self.auth.access_token().await?;
        tracing::debug!("Downloading Drive file {}", file_id);

        let response = self
            .client
            .get(self.file_url(file_id))
            .bearer_auth(token)
            .query(&[("alt", "media"), ("supportsAllDrives", "true")])
            .send()
            .await?;

        let response = Self::check(response).await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn find_by_name(&self, parent_id: &str, name: &str) -> Result<Vec<DriveFile>> {
        let token = self.auth.access_token().await?;
        let query = format!(
            "name = '{}' and '{}' in parents and trashed = false",
            escape_query_literal(name),
            escape_query_literal(parent_id)
        );

        let mut files = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![
                ("q", query.clone()),
                ("fields", "nextPageToken, files(id, name, webViewLink)".to_string()),
                ("pageSize", "100".to_string()),
                ("supportsAllDrives", "true".to_string()),
                ("includeItemsFromAllDrives", "true".to_string()),
            ];
            if let Some(next) = &page_token {
                params.push(("pageToken", next.clone()));
            }

            let response = self
                .client
                .get(self.files_url())
                .bearer_auth(&token)
                .query(&params)
                .send()
                .await?;

            let page: FileList = Self::check(response).await?.json().await?;
            files.extend(page.files);

            match page.next_page_token {
                Some(next) if !next.is_empty() => page_token = Some(next),
                _ => break,
            }
        }

        Ok(files)
    }

    async fn delete(&self, file_id: &str) -> Result<()> {
        let token = self.auth.access_token().await?;
        tracing::debug!("Deleting Drive file {}", file_id);

        let response = self
            .client
            .delete(self.file_url(file_id))
            .bearer_auth(token)
            .query(&[("supportsAllDrives", "true")])
            .send()
            .await?;

        Self::check(response).await?;
        Ok(())
    }

    async fn upload(
        &self,
        parent_id: &str,
        name: &str,
        mime_type: &str,
        data: Vec<u8>,
    ) -> Result<DriveFile> {
        let token = self.auth.access_token().await?;
        let metadata = serde_json::json!({
            "name": name,
            "parents": [parent_id],
        });
        let body = multipart_related_body(&metadata, mime_type, &data);

        tracing::debug!("Uploading {} ({} bytes, {})", name, data.len(), mime_type);

        let response = self
            .client
            .post(self.upload_url())
            .bearer_auth(token)
            .query(&[
                ("uploadType", "multipart"),
                ("fields", "id,name,webViewLink"),
                ("supportsAllDrives", "true"),
            ])
            .header(
                reqwest::header::CONTENT_TYPE,
                format!("multipart/related; boundary={}", MULTIPART_BOUNDARY),
            )
            .body(body)
            .send()
            .await?;

        let file: DriveFile = Self::check(response).await?.json().await?;
        Ok(file)
    }
}
