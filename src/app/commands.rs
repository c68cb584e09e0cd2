use crate::adapters::google_auth::{ServiceAccountAuth, ServiceAccountKey, DRIVE_SCOPE};
use crate::adapters::google_drive::GoogleDriveClient;
use crate::adapters::storage::LocalStorage;
use crate::app::pipelines::ReportPipeline;
use crate::config::cli::{Cli, Commands, CredentialArgs};
use crate::config::toml_config::TomlConfig;
use crate::config::WorkflowSettings;
use crate::core::daily_overview::create_daily_overviews;
use crate::core::etl::EtlEngine;
use crate::core::statistics::create_statistics;
use crate::core::transfer::{download_input_file, expand_file_patterns, upload_files};
use crate::core::workbook::load_roster;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_secret, Validate};
use reqwest::Client;
use std::path::PathBuf;

/// 依設定建立 Drive client（含 service account 認證）
pub fn build_drive_client(credentials: &CredentialArgs, config: &TomlConfig) -> Result<GoogleDriveClient> {
    let key = ServiceAccountKey::from_base64(&credentials.service_account_key)?;
    let client = Client::builder().timeout(config.request_timeout()).build()?;

    let auth = ServiceAccountAuth::new(key, &[DRIVE_SCOPE], client.clone());
    tracing::debug!("Authenticating as {}", auth.client_email());

    Ok(GoogleDriveClient::new(client, auth, config.drive_endpoints()))
}

/// 執行子命令，回傳給使用者看的結果摘要
pub async fn execute(cli: &Cli, config: &TomlConfig) -> Result<String> {
    match &cli.command {
        Commands::DownloadInputFile {
            credentials,
            input_file_id,
            output_file_path,
        } => {
            validate_non_empty_secret("input_file_id", input_file_id)?;
            let drive = build_drive_client(credentials, config)?;
            let path = download_input_file(&drive, input_file_id, output_file_path).await?;
            Ok(format!("📁 Input file saved to: {}", path.display()))
        }

        Commands::UploadFiles {
            credentials,
            parent_id,
            files,
        } => {
            validate_non_empty_secret("parent_id", parent_id)?;
            let files = expand_file_patterns(files)?;
            let drive = build_drive_client(credentials, config)?;
            let uploaded = upload_files(&drive, parent_id, &files).await?;
            Ok(format!("⬆️ Uploaded {} files", uploaded.len()))
        }

        Commands::CreateDailyOverviews {
            input_file,
            output_dir,
            no_pdf,
            no_docx,
            keep_html,
        } => {
            let mut options = config.overview_options();
            if *no_pdf {
                options.pdf = None;
            }
            if *no_docx {
                options.docx = false;
            }
            options.keep_html |= *keep_html;

            let roster = load_roster(input_file.clone()).await?;
            let storage = LocalStorage::new(output_dir);
            let produced = create_daily_overviews(&roster, &storage, &options).await?;
            Ok(format!(
                "📁 {} daily overview files saved to: {}",
                produced.len(),
                output_dir.display()
            ))
        }

        Commands::CreateStatistics {
            input_file,
            output_dir,
        } => {
            let roster = load_roster(input_file.clone()).await?;
            let storage = LocalStorage::new(output_dir);
            let produced = create_statistics(&roster, &storage).await?;
            Ok(format!(
                "📁 {} statistics files saved to: {}",
                produced.len(),
                output_dir.display()
            ))
        }

        Commands::Run {
            credentials,
            input_file_id,
            parent_id_daily_overviews,
            parent_id_stats,
            input_file,
            daily_overviews_dir,
            statistics_dir,
        } => {
            let settings = WorkflowSettings {
                input_file_id: input_file_id.clone(),
                input_file: input_file
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&config.workflow.input_file)),
                daily_overviews_dir: daily_overviews_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&config.workflow.daily_overviews_dir)),
                statistics_dir: statistics_dir
                    .clone()
                    .unwrap_or_else(|| PathBuf::from(&config.workflow.statistics_dir)),
                parent_id_daily_overviews: parent_id_daily_overviews.clone(),
                parent_id_stats: parent_id_stats.clone(),
            };
            settings.validate()?;
            tracing::debug!("Workflow settings: {:?}", settings);

            let drive = build_drive_client(credentials, config)?;
            let pipeline = ReportPipeline::with_options(drive, settings, config.overview_options());
            let engine = EtlEngine::new_with_monitoring(pipeline, cli.monitor);

            let summary = engine.run().await?;
            Ok(format!("⬆️ Uploaded {} files", summary.uploaded.len()))
        }
    }
}
