//! インフラストラクチャモジュール
//!
//! 外部世界との境界（HTTP、フィード解析、ファイルストレージ）を管理します。

pub mod api;
pub mod parser;
pub mod storage;
