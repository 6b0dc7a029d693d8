use crate::infra::storage::file::load_yaml_from_file;
use anyhow::{Context, Result};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::path::Path;

/// 記事の安定識別子を計算する
///
/// URL・タイトル・公開日時のSHA-256ダイジェスト（16進数文字列）。
/// 各フィールドは長さ（u64リトルエンディアン）を前置してからハッシュに
/// 投入するため、フィールド境界の曖昧さによるid衝突は起きない。
/// 同じ入力からは常に同じidが得られる。
pub fn compute_article_id(url: &str, title: &str, published: &str) -> String {
    let mut hasher = Sha256::new();
    for field in [url, title, published] {
        hasher.update((field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }
    format!("{:x}", hasher.finalize())
}

/// ロケールごとのキーワード集合による関連性フィルター
///
/// キーワードファイル（YAML、ロケール→キーワードリスト）から構築する。
#[derive(Debug, Clone, Default)]
pub struct KeywordSet {
    keywords: HashMap<String, Vec<String>>,
}

impl KeywordSet {
    /// ロケール→キーワードリストのマップから作成
    pub fn new(keywords: HashMap<String, Vec<String>>) -> Self {
        Self { keywords }
    }

    /// YAMLファイルからキーワード集合を読み込む
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let keywords: HashMap<String, Vec<String>> = load_yaml_from_file(path)
            .with_context(|| format!("キーワードファイルの読み込みに失敗: {}", path.display()))?;
        Ok(Self::new(keywords))
    }

    /// キーワードが1つも無いか
    pub fn is_empty(&self) -> bool {
        self.keywords.values().all(|list| list.is_empty())
    }

    /// 登録キーワードの総数
    pub fn len(&self) -> usize {
        self.keywords.values().map(|list| list.len()).sum()
    }

    /// タイトル・概要・本文のいずれかにキーワードが含まれるか判定する
    ///
    /// 大文字小文字を区別しない部分一致。最初の一致で即true。
    /// ランキングやスコアリングは行わない。空のキーワード集合は常にfalse。
    pub fn is_relevant(&self, title: &str, description: &str, content: &str) -> bool {
        if self.is_empty() {
            return false;
        }

        let combined = format!("{} {} {}", title, description, content).to_lowercase();

        for list in self.keywords.values() {
            for keyword in list {
                if combined.contains(&keyword.to_lowercase()) {
                    return true;
                }
            }
        }

        false
    }
}
