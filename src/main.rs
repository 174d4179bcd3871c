use anyhow::{Context, Result};
use clap::Parser;
use staffing::app::Application;
use staffing::shutdown::wait_for_shutdown_signal;
use staffing_core::{init_logging_from_config, AppConfig};
use tracing::info;

/// 短期用工撮合与排班引擎
#[derive(Debug, Parser)]
#[command(name = "staffing", version, about = "短期用工撮合与排班引擎")]
struct Cli {
    /// 配置文件路径，缺省时依次尝试 config/staffing.toml 与 staffing.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<String>,

    /// 日志级别
    #[arg(short, long, value_name = "LEVEL", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: Option<String>,

    /// 日志格式
    #[arg(long, value_name = "FORMAT", value_parser = ["json", "pretty"])]
    log_format: Option<String>,

    /// 覆盖 api.bind_address
    #[arg(short, long, value_name = "ADDR")]
    bind: Option<String>,

    /// 工单表为空时写入演示数据
    #[arg(long)]
    seed_demo: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("加载配置失败")?;
    if let Some(level) = cli.log_level {
        config.observability.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.observability.log_format = format;
    }
    if let Some(bind) = cli.bind {
        config.api.bind_address = bind;
    }

    init_logging_from_config(&config.observability)?;
    config.validate().context("配置验证失败")?;

    info!("启动撮合与排班引擎 v{}", env!("CARGO_PKG_VERSION"));
    info!("数据库: {}", config.database.url);

    let app = Application::new(config).await?;

    if cli.seed_demo {
        app.seed_demo().await?;
    }

    app.run(async {
        wait_for_shutdown_signal().await;
        info!("收到关闭信号，开始优雅关闭...");
    })
    .await?;

    info!("撮合与排班引擎已退出");
    Ok(())
}
