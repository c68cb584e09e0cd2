pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::{Cli, Commands};

pub use adapters::{google_drive::GoogleDriveClient, storage::LocalStorage};
pub use app::pipelines::ReportPipeline;
pub use config::{toml_config::TomlConfig, WorkflowSettings};
pub use core::etl::EtlEngine;
pub use domain::model::{Attendance, Child, DayPart, GroupDistribution, Mark, OverviewSheet, Roster};
pub use utils::error::{HktError, Result};
