//! govwatch: AIガバナンス関連ニュースの収集・レビュー・エクスポートツール
//!
//! RSSフィードからAIガバナンス関連の記事を収集し、レビュー用の
//! ステージングツリーへ保存、承認された記事をObsidian Vaultへ
//! エクスポートする一連のワークフローを提供します。

pub mod app;
pub mod domain;
pub mod infra;
pub mod staging;
pub mod types;
pub mod vault;
