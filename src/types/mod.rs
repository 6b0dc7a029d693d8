//! 型定義モジュール
//!
//! アプリケーション全体で使用される共通的な型定義を管理します。
//! - エラー型: ステージング処理と設定のエラー分類
//! - バッチ結果型: 収集・エクスポート・レビュー処理の統一表現

pub mod config;
pub mod error;
pub mod result;

// 便利な再エクスポート
pub use config::{ConfigError, ConfigResult};
pub use error::{StagingError, StagingResult};
pub use result::{ExportStats, ExportedArticle, FetchStats, ReviewStats};
