//! ユーティリティ（設定読み込み・ログ設定）

pub mod config_loader;
pub mod log_config;
