use crate::adapters::storage::LocalStorage;
use crate::core::daily_overview::{create_daily_overviews, OverviewOptions};
use crate::core::statistics::create_statistics;
use crate::core::transfer::{download_input_file, upload_files};
use crate::core::workbook::load_roster;
use crate::core::{ConfigProvider, LoadSummary, Pipeline, RemoteStorage, ReportBundle, Roster};
use crate::utils::error::Result;

/// 下載名單 → 產生名單與統計 → 上傳到兩個 Drive 資料夾
pub struct ReportPipeline<R: RemoteStorage, C: ConfigProvider> {
    pub(crate) remote: R,
    pub(crate) config: C,
    pub(crate) options: OverviewOptions,
}

impl<R: RemoteStorage, C: ConfigProvider> ReportPipeline<R, C> {
    pub fn new(remote: R, config: C) -> Self {
        Self::with_options(remote, config, OverviewOptions::default())
    }

    pub fn with_options(remote: R, config: C, options: OverviewOptions) -> Self {
        Self {
            remote,
            config,
            options,
        }
    }
}

#[async_trait::async_trait]
impl<R: RemoteStorage, C: ConfigProvider> Pipeline for ReportPipeline<R, C> {
    async fn extract(&self) -> Result<Roster> {
        let input_file = download_input_file(
            &self.remote,
            self.config.input_file_id(),
            self.config.input_file(),
        )
        .await?;

        load_roster(input_file).await
    }

    async fn transform(&self, roster: Roster) -> Result<ReportBundle> {
        let overview_storage = LocalStorage::new(self.config.daily_overviews_dir());
        let daily_overviews = create_daily_overviews(&roster, &overview_storage, &self.options).await?;

        let statistics_storage = LocalStorage::new(self.config.statistics_dir());
        let statistics = create_statistics(&roster, &statistics_storage).await?;

        Ok(ReportBundle {
            daily_overviews,
            statistics,
        })
    }

    async fn load(&self, bundle: ReportBundle) -> Result<LoadSummary> {
        let mut uploaded = upload_files(
            &self.remote,
            self.config.parent_id_daily_overviews(),
            &bundle.daily_overviews,
        )
        .await?;

        uploaded.extend(
            upload_files(&self.remote, self.config.parent_id_stats(), &bundle.statistics).await?,
        );

        Ok(LoadSummary { uploaded })
    }
}
