use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "hkt")]
#[command(version, about = "HomeKitaTage: daily overviews and statistics from the KITA attendance workbook")]
pub struct Cli {
    /// TOML 配置檔（預設讀取 ./hkt.toml，若存在）
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    #[arg(long, global = true, help = "Log CPU and memory usage per phase")]
    pub monitor: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    Compact,
    Json,
}

#[derive(Debug, Clone, Args)]
pub struct CredentialArgs {
    /// Base64 編碼的 service account JSON key
    #[arg(
        long = "google-workspace-service-account-key",
        env = "GOOGLE_WORKSPACE_SERVICE_ACCOUNT_KEY",
        hide_env_values = true
    )]
    pub service_account_key: String,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Download the attendance workbook from Google Drive
    DownloadInputFile {
        #[command(flatten)]
        credentials: CredentialArgs,

        #[arg(long, env = "INPUT_FILE_ID", hide_env_values = true)]
        input_file_id: String,

        output_file_path: PathBuf,
    },

    /// Upload files to a Google Drive folder, replacing same-name files
    UploadFiles {
        #[command(flatten)]
        credentials: CredentialArgs,

        #[arg(long, env = "PARENT_ID", hide_env_values = true)]
        parent_id: String,

        /// Paths or glob patterns
        #[arg(required = true)]
        files: Vec<String>,
    },

    /// Render per group, weekday and attendance the list of children as PDF/DOCX
    CreateDailyOverviews {
        input_file: PathBuf,
        output_dir: PathBuf,

        #[arg(long, help = "Skip PDF rendering with wkhtmltopdf")]
        no_pdf: bool,

        #[arg(long, help = "Skip DOCX output")]
        no_docx: bool,

        #[arg(long, help = "Keep the intermediate HTML files")]
        keep_html: bool,
    },

    /// Render per group the half-day distribution chart and table
    CreateStatistics {
        input_file: PathBuf,
        output_dir: PathBuf,
    },

    /// Download, create all reports and upload them in one go
    Run {
        #[command(flatten)]
        credentials: CredentialArgs,

        #[arg(long, env = "INPUT_FILE_ID", hide_env_values = true)]
        input_file_id: String,

        #[arg(long, env = "PARENT_ID_DAILY_OVERVIEWS", hide_env_values = true)]
        parent_id_daily_overviews: String,

        #[arg(long, env = "PARENT_ID_STATS", hide_env_values = true)]
        parent_id_stats: String,

        /// 未指定時使用配置檔 [workflow] 的值
        #[arg(long)]
        input_file: Option<PathBuf>,

        #[arg(long)]
        daily_overviews_dir: Option<PathBuf>,

        #[arg(long)]
        statistics_dir: Option<PathBuf>,
    },
}

impl Commands {
    pub fn name(&self) -> &'static str {
        match self {
            Commands::DownloadInputFile { .. } => "download-input-file",
            Commands::UploadFiles { .. } => "upload-files",
            Commands::CreateDailyOverviews { .. } => "create-daily-overviews",
            Commands::CreateStatistics { .. } => "create-statistics",
            Commands::Run { .. } => "run",
        }
    }
}
