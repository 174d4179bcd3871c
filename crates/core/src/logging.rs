use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::ObservabilityConfig;

/// 初始化日志系统
///
/// `RUST_LOG` 存在时优先于配置中的日志级别。
pub fn init_logging(log_level: &str, log_format: &str) -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    let registry = tracing_subscriber::registry().with(env_filter);

    match log_format {
        "json" => {
            registry
                .with(tracing_subscriber::fmt::layer().json())
                .try_init()
                .context("初始化JSON日志格式失败")?;
        }
        "pretty" => {
            registry
                .with(tracing_subscriber::fmt::layer().pretty())
                .try_init()
                .context("初始化Pretty日志格式失败")?;
        }
        _ => {
            return Err(anyhow::anyhow!("不支持的日志格式: {log_format}"));
        }
    }

    Ok(())
}

pub fn init_logging_from_config(config: &ObservabilityConfig) -> Result<()> {
    init_logging(&config.log_level, &config.log_format)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_format_rejected() {
        assert!(init_logging("info", "xml").is_err());
    }
}
