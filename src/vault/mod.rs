//! Obsidian Vault出力モジュール
//!
//! 承認済み記事のエクスポート先となるVaultディレクトリツリーを管理します。
//! Vault直下に「AI Governance」フォルダを置き、その下にカテゴリ別の
//! 表示名フォルダを作ります。

use crate::types::{StagingError, StagingResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Vault内のトップレベルフォルダ名
pub const VAULT_TOP_FOLDER: &str = "AI Governance";

/// カテゴリ識別子からVault内の表示名フォルダへのマッピング
///
/// 未知のカテゴリはそのままフォルダ名として使う。
pub fn category_display_name(category: &str) -> &str {
    match category {
        "journalism" => "Journalism",
        "international_org" => "International Organizations",
        "ngo" => "NGOs",
        "government" => "Government",
        "academic" => "Academic",
        "zh-cn" => "Chinese Sources",
        "ja" => "Japanese Sources",
        "ru" => "Russian Sources",
        "es" => "Spanish Sources",
        other => other,
    }
}

/// Obsidian Vaultのパス管理と書き込み
#[derive(Debug, Clone)]
pub struct ObsidianVault {
    root: PathBuf,
}

impl ObsidianVault {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// カテゴリ別フォルダのパス
    pub fn category_dir(&self, category: &str) -> PathBuf {
        self.root
            .join(VAULT_TOP_FOLDER)
            .join(category_display_name(category))
    }

    /// カテゴリフォルダを作成して返す
    ///
    /// エクスポートのたびに呼んでよい（既存なら何もしない）。
    pub fn ensure_category_dir(&self, category: &str) -> StagingResult<PathBuf> {
        let dir = self.category_dir(category);
        fs::create_dir_all(&dir)
            .map_err(|e| StagingError::file_io(dir.display().to_string(), e))?;
        Ok(dir)
    }

    /// ステージング済みノートをVaultへコピーする
    ///
    /// コピー元はそのまま残す（reviewedディレクトリが正本）。
    /// コピー先の同名ファイルは上書きされる。
    pub fn copy_note(
        &self,
        source: &Path,
        category: &str,
        file_name: &str,
    ) -> StagingResult<PathBuf> {
        let dir = self.ensure_category_dir(category)?;
        let destination = dir.join(file_name);
        fs::copy(source, &destination)
            .map_err(|e| StagingError::file_io(destination.display().to_string(), e))?;
        Ok(destination)
    }
}
