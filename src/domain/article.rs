use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 全記事に必ず付与される基本タグ
pub const GOVERNANCE_TAG: &str = "ai-governance";

/// 記事のライフサイクル状態を表現するenum
///
/// 遷移は new → approved | rejected → exported の一方向のみ。
/// newへ戻る経路は存在しない。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArticleStatus {
    /// ステージング直後、レビュー待ち
    New,
    /// レビューで承認済み（本文はreviewedディレクトリ）
    Approved,
    /// レビューで却下済み（本文はrejectedディレクトリ）
    Rejected,
    /// Vaultへエクスポート済み（終端状態、本文はreviewedに残る）
    Exported,
}

impl ArticleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArticleStatus::New => "new",
            ArticleStatus::Approved => "approved",
            ArticleStatus::Rejected => "rejected",
            ArticleStatus::Exported => "exported",
        }
    }
}

impl std::fmt::Display for ArticleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 記事メタデータレコード（idごとにJSONサイドカー1ファイル）
///
/// id・タイトル等の記述フィールドは作成時に確定し以後不変。
/// statusと遷移タイムスタンプのみがワークフローによって更新される。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArticleRecord {
    pub id: String,
    pub title: String,
    pub url: String,
    /// フィードが配信した公開日時の文字列（例: "2025-04-07 10:00:00"）
    /// エクスポート先ファイル名の日付部分はここから導出される
    pub date: String,
    pub source: String,
    pub language: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: ArticleStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approved_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejected_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_path: Option<String>,
}

impl ArticleRecord {
    /// 新規レコードを作成する。statusはnew、created_atは現在時刻。
    /// tagsに基本タグが含まれない場合は先頭に補う。
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        date: impl Into<String>,
        source: impl Into<String>,
        language: impl Into<String>,
        category: impl Into<String>,
        mut tags: Vec<String>,
    ) -> Self {
        if !tags.iter().any(|t| t == GOVERNANCE_TAG) {
            tags.insert(0, GOVERNANCE_TAG.to_string());
        }
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            date: date.into(),
            source: source.into(),
            language: language.into(),
            category: category.into(),
            tags,
            status: ArticleStatus::New,
            created_at: Utc::now(),
            approved_at: None,
            rejected_at: None,
            exported_at: None,
            destination_path: None,
        }
    }

    /// メタデータ欠落時のフォールバックレコードを合成する
    ///
    /// エクスポートは本文さえ存在すれば進行できる必要があるため、
    /// idと現在日付から最低限のレコードを作る。
    pub fn synthesized(id: &str) -> Self {
        Self::new(
            id,
            id,
            "",
            Utc::now().format("%Y-%m-%d").to_string(),
            "unknown",
            "unknown",
            "unknown",
            vec![GOVERNANCE_TAG.to_string()],
        )
    }

    /// ステータスごとの並び替えキー（そのステータスに到達した時刻）
    /// 対応するタイムスタンプが無い場合はcreated_atへフォールバック
    pub fn sort_timestamp(&self) -> DateTime<Utc> {
        match self.status {
            ArticleStatus::New => self.created_at,
            ArticleStatus::Approved => self.approved_at.unwrap_or(self.created_at),
            ArticleStatus::Rejected => self.rejected_at.unwrap_or(self.created_at),
            ArticleStatus::Exported => self.exported_at.unwrap_or(self.created_at),
        }
    }
}

/// 記事本文ノートをレンダリングする（フロントマター＋本文）
///
/// このテンプレートはVault側の既存コンシューマとの互換性のため固定。
pub fn render_article_note(record: &ArticleRecord, summary: &str, content: &str) -> String {
    format!(
        r#"---
title: "{title}"
source: "{source}"
url: "{url}"
date: "{date}"
language: "{language}"
category: "{category}"
tags: [{tags}]
---

# {title}

**Source**: {source}
**Date**: {date}
**URL**: {url}
**Language**: {language}
**Category**: {category}

## Summary

{summary}

## Content

{content}

"#,
        title = record.title,
        source = record.source,
        url = record.url,
        date = record.date,
        language = record.language,
        category = record.category,
        tags = record.tags.join(", "),
        summary = summary,
        content = content,
    )
}
