pub mod daily_overview;
pub mod docx;
pub mod etl;
pub mod html;
pub mod statistics;
pub mod transfer;
pub mod workbook;

pub use crate::domain::model::{LoadSummary, ReportBundle, Roster};
pub use crate::domain::ports::{ConfigProvider, Pipeline, RemoteStorage, Storage};
pub use crate::utils::error::Result;
