use crate::domain::feed::{Feed, FeedEntry};
use crate::infra::api::http::HttpClient;
use crate::infra::parser::{extract_feed_entries, parse_channel_from_xml_str};
use anyhow::{Context, Result};
use async_trait::async_trait;

/// フィードソースの抽象化トレイト
///
/// 設定されたフィード1件からエントリ列を生成するコラボレータ。
/// コアはこの契約形にだけ依存し、取得・解析の実装は差し替え可能。
#[async_trait]
pub trait FeedSource {
    async fn fetch_entries(&self, feed: &Feed) -> Result<Vec<FeedEntry>>;
}

/// HTTP経由でRSSを取得・解析する本番用フィードソース
pub struct RssFeedSource<H: HttpClient> {
    http_client: H,
    timeout_secs: u64,
}

impl<H: HttpClient> RssFeedSource<H> {
    pub fn new(http_client: H) -> Self {
        Self {
            http_client,
            timeout_secs: 30,
        }
    }
}

#[async_trait]
impl<H: HttpClient + Send + Sync> FeedSource for RssFeedSource<H> {
    async fn fetch_entries(&self, feed: &Feed) -> Result<Vec<FeedEntry>> {
        let xml_content = self
            .http_client
            .fetch_text(&feed.url, self.timeout_secs)
            .await
            .context(format!("RSSフィードの取得に失敗: {}", feed.url))?;
        let channel = parse_channel_from_xml_str(&xml_content).context("XMLの解析に失敗")?;
        Ok(extract_feed_entries(&channel))
    }
}

/// テスト用のモックフィードソース
///
/// 定義済みのエントリ列またはエラーを返す。
pub struct MockFeedSource {
    pub entries: Vec<FeedEntry>,
    pub should_succeed: bool,
}

impl MockFeedSource {
    /// 固定エントリを返すモックを作成
    pub fn new_success(entries: Vec<FeedEntry>) -> Self {
        Self {
            entries,
            should_succeed: true,
        }
    }

    /// エラーを返すモックを作成
    pub fn new_error() -> Self {
        Self {
            entries: Vec::new(),
            should_succeed: false,
        }
    }
}

#[async_trait]
impl FeedSource for MockFeedSource {
    async fn fetch_entries(&self, feed: &Feed) -> Result<Vec<FeedEntry>> {
        if self.should_succeed {
            Ok(self.entries.clone())
        } else {
            Err(anyhow::anyhow!("モックフィード取得エラー: {}", feed.url))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::api::http::MockHttpClient;

    fn test_feed() -> Feed {
        Feed {
            url: "https://example.com/rss.xml".to_string(),
            source: "テストソース".to_string(),
            category: "journalism".to_string(),
            language: "ja".to_string(),
        }
    }

    #[tokio::test]
    async fn test_rss_feed_source_with_mock_http() {
        let rss_xml = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
    <channel>
        <title>テストRSSフィード</title>
        <item>
            <title>記事1</title>
            <link>https://example.com/article1</link>
            <description>AIガバナンスの記事</description>
            <pubDate>Wed, 01 Jan 2025 12:00:00 GMT</pubDate>
        </item>
        <item>
            <title>記事2</title>
            <link>https://example.com/article2</link>
            <pubDate>Thu, 02 Jan 2025 12:00:00 GMT</pubDate>
        </item>
    </channel>
</rss>"#;

        let source = RssFeedSource::new(MockHttpClient::new_success(rss_xml));
        let entries = source
            .fetch_entries(&test_feed())
            .await
            .expect("フィード取得が失敗");

        assert_eq!(entries.len(), 2, "2件のエントリが取得されるべき");
        assert_eq!(entries[0].link, "https://example.com/article1");
        assert_eq!(entries[0].title, "記事1");

        println!("✅ モックHTTP使用のフィードソーステスト完了");
    }

    #[tokio::test]
    async fn test_rss_feed_source_http_error() {
        let source = RssFeedSource::new(MockHttpClient::new_error("接続タイムアウト"));
        let result = source.fetch_entries(&test_feed()).await;

        assert!(result.is_err(), "エラーが発生するべき");
        let error_msg = result.unwrap_err().to_string();
        assert!(error_msg.contains("RSSフィードの取得に失敗"));
    }

    #[tokio::test]
    async fn test_rss_feed_source_invalid_xml() {
        let source = RssFeedSource::new(MockHttpClient::new_success("<invalid>xml</broken>"));
        let result = source.fetch_entries(&test_feed()).await;

        assert!(result.is_err(), "無効なXMLでエラーが発生するべき");
    }
}
