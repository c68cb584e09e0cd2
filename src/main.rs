use clap::Parser;
use hkt::app::commands;
use hkt::config::cli::LogFormat;
use hkt::utils::error::{ErrorSeverity, HktError};
use hkt::utils::{logger, validation::Validate};
use hkt::{Cli, TomlConfig};

fn report_failure(context: &str, e: &HktError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ {} failed: {} (Category: {:?}, Severity: {:?})",
        context,
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼，任何失敗都要讓 workflow 停下
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 本地執行時由 .env 提供環境變數（CI 直接設定）
    let dotenv_path = hkt::config::load_dotenv();
    let cli = Cli::parse();

    // 初始化日誌
    match cli.log_format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting hkt {}", cli.command.name());
    if let Some(path) = &dotenv_path {
        tracing::debug!("Loaded environment from {}", path.display());
    }

    let config = match TomlConfig::load(cli.config.as_deref()).and_then(|c| c.validate().map(|_| c)) {
        Ok(config) => config,
        Err(e) => report_failure("Configuration", &e),
    };
    if cli.verbose {
        tracing::debug!("Config: {:?}", config);
    }

    if cli.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    match commands::execute(&cli, &config).await {
        Ok(summary) => {
            tracing::info!("✅ {} completed successfully!", cli.command.name());
            println!("✅ {} completed successfully!", cli.command.name());
            println!("{}", summary);
        }
        Err(e) => report_failure(cli.command.name(), &e),
    }

    Ok(())
}
