//! ドメインモジュール
//!
//! 記事・フィード・関連性フィルターのモデルとロジックを管理します。

pub mod article;
pub mod feed;
pub mod filter;
