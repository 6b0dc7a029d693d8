use crate::infra::api::http::HttpClient;
use anyhow::Result;
use async_trait::async_trait;

/// 記事本文フェッチャーの抽象化トレイト
///
/// URLから記事の全文テキストを取得するコラボレータ。
#[async_trait]
pub trait ContentFetcher {
    async fn fetch_content(&self, url: &str) -> Result<String>;
}

/// HTTPクライアントをそのまま使う本番用フェッチャー
///
/// 取得したレスポンスボディをそのまま本文として返す。
/// 本文抽出（HTML除去など）は現状行わない。
pub struct HttpContentFetcher<H: HttpClient> {
    http_client: H,
    timeout_secs: u64,
}

impl<H: HttpClient> HttpContentFetcher<H> {
    pub fn new(http_client: H) -> Self {
        Self {
            http_client,
            timeout_secs: 30,
        }
    }
}

#[async_trait]
impl<H: HttpClient + Send + Sync> ContentFetcher for HttpContentFetcher<H> {
    async fn fetch_content(&self, url: &str) -> Result<String> {
        self.http_client.fetch_text(url, self.timeout_secs).await
    }
}

/// テスト・オフライン実行用のモックフェッチャー
///
/// URLを埋め込んだ定型本文を返す。
pub struct MockContentFetcher {
    pub fixed_content: Option<String>,
}

impl MockContentFetcher {
    /// URLごとの定型文を返すモックを作成
    pub fn new() -> Self {
        Self {
            fixed_content: None,
        }
    }

    /// 固定の本文を返すモックを作成
    pub fn with_content(content: &str) -> Self {
        Self {
            fixed_content: Some(content.to_string()),
        }
    }
}

impl Default for MockContentFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ContentFetcher for MockContentFetcher {
    async fn fetch_content(&self, url: &str) -> Result<String> {
        match &self.fixed_content {
            Some(content) => Ok(content.clone()),
            None => Ok(format!(
                "This is a mock article content for {}. It contains information about AI governance and regulation.",
                url
            )),
        }
    }
}
