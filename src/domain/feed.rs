use crate::infra::storage::file::load_yaml_from_file;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// 監視対象フィードの設定
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Feed {
    pub url: String,
    pub source: String,
    pub category: String,
    pub language: String,
}

impl fmt::Display for Feed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} ({})", self.category, self.source, self.url)
    }
}

/// フィードソースが生成するエントリの契約形
///
/// フィードの取得・解析はコラボレータの責務で、コアはこの形だけに依存する。
#[derive(Debug, Clone)]
pub struct FeedEntry {
    pub title: String,
    pub link: String,
    /// フィードが配信した公開日時の文字列
    pub published_at: String,
    pub summary: String,
    pub description: Option<String>,
}

impl FeedEntry {
    /// 概要として使うテキスト（descriptionがあれば優先）
    pub fn description_or_summary(&self) -> &str {
        self.description.as_deref().unwrap_or(&self.summary)
    }
}

/// Feed検索のフィルター条件を表す構造体
#[derive(Debug, Default)]
pub struct FeedQuery {
    pub category: Option<String>,
    pub source: Option<String>,
}

impl FeedQuery {
    pub fn from_category(category: &str) -> Self {
        Self {
            category: Some(category.to_string()),
            source: None,
        }
    }
}

// feeds.yamlのエントリ（カテゴリ→ソース名→仕様のネストに対応）
#[derive(Debug, Deserialize)]
struct FeedSpec {
    url: String,
    language: String,
}

// YAMLファイルの構造に対応する型
type FeedMap = HashMap<String, HashMap<String, FeedSpec>>;

/// feeds.yamlからフィード情報を読み込み、Feedのベクタとして返す
fn load_feeds_from_yaml(file_path: &Path) -> Result<Vec<Feed>> {
    let feed_map: FeedMap = load_yaml_from_file(file_path)
        .with_context(|| format!("フィードYAMLファイルの読み込みに失敗: {}", file_path.display()))?;

    let mut feeds = Vec::new();

    for (category, sources) in feed_map {
        for (source, spec) in sources {
            feeds.push(Feed {
                url: spec.url,
                source,
                category: category.clone(),
                language: spec.language,
            });
        }
    }

    Ok(feeds)
}

/// フィード情報を3段階で絞り込み検索する
/// 1. 絞り込みなし（全件）
/// 2. categoryのみ指定
/// 3. category & source指定
pub fn search_feeds(file_path: &Path, query: Option<FeedQuery>) -> Result<Vec<Feed>> {
    let feeds = load_feeds_from_yaml(file_path)?;
    let query = query.unwrap_or_default();

    let filtered_feeds = feeds
        .iter()
        .filter(|feed| {
            if let Some(ref category_filter) = query.category {
                if feed.category != *category_filter {
                    return false;
                }
            }

            if let Some(ref source_filter) = query.source {
                if feed.source != *source_filter {
                    return false;
                }
            }

            true
        })
        .cloned()
        .collect();

    Ok(filtered_feeds)
}
