//! 配置管理
//!
//! 默认值 → TOML 配置文件 → `STAFFING__` 前缀环境变量，逐层覆盖。

pub mod models;

pub use models::{
    ApiConfig, AppConfig, DatabaseConfig, MatchingConfig, MatchingFactors, MatchingWeights,
    ObservabilityConfig, OfferPolicyConfig,
};
