//! ステージングモジュール
//!
//! レビュー待ちコンテンツの3分割ディレクトリ（new/reviewed/rejected）と
//! メタデータサイドカーストア、およびそれらを遷移させるワークフローを管理します。
//!
//! ディスク上のレイアウト（互換性のため固定）:
//! ```text
//! staging/
//!   new/{id}.md
//!   reviewed/{id}.md
//!   rejected/{id}.md
//!   metadata/{id}.json
//! ```
//!
//! 制約: 同一のステージングツリーに対する複数プロセスの同時実行は
//! サポートしない（ファイルロックは行わない）。プロセス内の直列化は
//! ワークフローが担う。

pub mod stats;
pub mod store;
pub mod workflow;

use crate::types::{StagingError, StagingResult};
use std::fs;
use std::path::{Path, PathBuf};

/// ステージングの3領域
///
/// 記事本文は常にこのうち1つの領域にだけ存在する。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StagingArea {
    New,
    Reviewed,
    Rejected,
}

impl StagingArea {
    pub fn dir_name(&self) -> &'static str {
        match self {
            StagingArea::New => "new",
            StagingArea::Reviewed => "reviewed",
            StagingArea::Rejected => "rejected",
        }
    }
}

impl std::fmt::Display for StagingArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.dir_name())
    }
}

/// ステージングディレクトリツリーのパス管理
#[derive(Debug, Clone)]
pub struct StagingLayout {
    root: PathBuf,
}

impl StagingLayout {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// 領域ディレクトリのパス
    pub fn area_dir(&self, area: StagingArea) -> PathBuf {
        self.root.join(area.dir_name())
    }

    /// メタデータディレクトリのパス
    pub fn metadata_dir(&self) -> PathBuf {
        self.root.join("metadata")
    }

    /// 指定領域内の本文ファイルパス
    pub fn content_path(&self, area: StagingArea, id: &str) -> PathBuf {
        self.area_dir(area).join(format!("{}.md", id))
    }

    /// 必要なディレクトリを作成する
    ///
    /// ベースディレクトリが作れない場合のみ致命的エラーとして伝播する。
    pub fn ensure_directories(&self) -> StagingResult<()> {
        for dir in [
            self.area_dir(StagingArea::New),
            self.area_dir(StagingArea::Reviewed),
            self.area_dir(StagingArea::Rejected),
            self.metadata_dir(),
        ] {
            fs::create_dir_all(&dir)
                .map_err(|e| StagingError::file_io(dir.display().to_string(), e))?;
        }
        Ok(())
    }

    /// 領域内の本文ファイル（.md）のid一覧を返す
    ///
    /// ディレクトリが未作成の場合は空とみなす。
    pub fn list_area_ids(&self, area: StagingArea) -> StagingResult<Vec<String>> {
        let dir = self.area_dir(area);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&dir)
            .map_err(|e| StagingError::file_io(dir.display().to_string(), e))?;

        let mut ids = Vec::new();
        for entry in entries.flatten() {
            let file_name = entry.file_name();
            let name = file_name.to_string_lossy();
            if let Some(id) = name.strip_suffix(".md") {
                ids.push(id.to_string());
            }
        }
        ids.sort();
        Ok(ids)
    }

    /// 領域内の本文ファイル数
    pub fn count_area(&self, area: StagingArea) -> usize {
        self.list_area_ids(area).map(|ids| ids.len()).unwrap_or(0)
    }
}
