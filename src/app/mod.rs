//! アプリケーションモジュール
//!
//! 設定の読み込みと、収集〜レビュー〜エクスポートの
//! オーケストレーションを管理します。

pub mod config;
pub mod workflow;
