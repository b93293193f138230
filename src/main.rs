use clap::Parser;
use receipt_points::adapters::http;
use receipt_points::utils::error::{ErrorSeverity, Result};
use receipt_points::utils::{logger, validation::Validate};
use receipt_points::{AppState, CliConfig, ConfigProvider, ReceiptService, SledScoreStore, TomlConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 設定檔要先讀，log 格式可能寫在裡面
    let file_config = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(config) => Some(config),
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => None,
    };

    let (json_logs, verbose) = match &file_config {
        Some(config) => (
            cli.json_logs || config.logging.json,
            cli.verbose || config.verbose(),
        ),
        None => (cli.json_logs, cli.verbose),
    };
    if json_logs {
        logger::init_json_logger(verbose);
    } else {
        logger::init_cli_logger(verbose);
    }

    tracing::info!("Starting receipt-points {}", env!("CARGO_PKG_VERSION"));

    let result = match file_config {
        Some(config) => run(config).await,
        None => run(cli).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run<C: ConfigProvider + Validate>(config: C) -> Result<()> {
    config.validate()?;
    tracing::debug!(
        "Resolved config: {}:{} db={} temporary={} open_timeout={:?}",
        config.host(),
        config.port(),
        config.db_path(),
        config.temporary(),
        config.open_timeout()
    );

    let store = SledScoreStore::from_config(&config).await?;
    tracing::info!("📁 Score store holds {} receipts", store.len());

    let service = ReceiptService::new(Arc::new(store));
    let listener = http::bind(&config).await?;

    http::serve(listener, AppState::new(service), shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
