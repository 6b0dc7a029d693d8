use crate::domain::feed::FeedEntry;
use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Utc};
use rss::Channel;
use std::io::BufRead;

/// 文字列を日付型に変換するヘルパー関数
///
/// `dateparser`クレートを利用して、様々な形式の日付文字列を解析し、
/// `DateTime<Utc>`型に変換する。
///
/// # サポート形式の例
/// - "2025-01-15"
/// - "2025-01-15T10:00:00Z"
/// - "Sun, 10 Aug 2025 12:00:00 +0000"
pub fn parse_date(date_str: &str) -> Result<DateTime<Utc>> {
    // `dateparser`はタイムゾーンを持つ`DateTime`を返すため、UTCに変換する
    match dateparser::parse(date_str) {
        Ok(dt) => Ok(dt.with_timezone(&Utc)),
        Err(_) => Err(anyhow!("不正な日付形式: {}", date_str)),
    }
}

/// XML文字列からRSSチャンネルを解析する
pub fn parse_channel_from_xml_str(xml: &str) -> Result<Channel> {
    Channel::read_from(xml.as_bytes()).context("XMLからのRSSチャンネル解析に失敗")
}

/// リーダーからRSSチャンネルを解析する
pub fn parse_channel_from_reader<R: BufRead>(reader: R) -> Result<Channel> {
    Channel::read_from(reader).context("RSSチャンネルの解析に失敗")
}

/// RSSチャンネルの<item>要素からフィードエントリを抽出する
///
/// リンクと公開日時を持たないitemは対象外。
pub fn extract_feed_entries(channel: &Channel) -> Vec<FeedEntry> {
    let mut entries = Vec::new();

    for item in channel.items() {
        if let (Some(link), Some(pub_date)) = (item.link(), item.pub_date()) {
            entries.push(FeedEntry {
                title: item.title().unwrap_or("タイトルなし").to_string(),
                link: link.to_string(),
                published_at: pub_date.to_string(),
                summary: item.description().unwrap_or("").to_string(),
                description: item.content().map(|c| c.to_string()),
            });
        }
    }

    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::storage::file::load_file;
    use chrono::TimeZone;
    use std::path::PathBuf;

    // 日付解析のテスト
    mod date_parsing {
        use super::*;

        #[test]
        fn test_parse_common_date_formats() {
            // ISO 8601 / RFC 3339
            let rfc3339 = "2025-08-10T12:30:00Z";
            let expected_rfc3339 = Utc.with_ymd_and_hms(2025, 8, 10, 12, 30, 0).unwrap();
            assert_eq!(parse_date(rfc3339).unwrap(), expected_rfc3339);

            // RFC 2822 (RSSで一般的)
            let rfc2822 = "Sun, 10 Aug 2025 12:30:00 +0000";
            assert_eq!(parse_date(rfc2822).unwrap(), expected_rfc3339);

            // YYYY-MM-DD（dateparserは現在時刻で補完するため、日付のみをチェック）
            let ymd = "2025-08-10";
            let parsed_ymd = parse_date(ymd).unwrap();
            assert_eq!(
                parsed_ymd.date_naive(),
                chrono::NaiveDate::from_ymd_opt(2025, 8, 10).unwrap(),
                "日付部分が期待と異なります"
            );
        }

        #[test]
        fn test_parse_with_timezones() {
            // JST (+09:00)
            let jst_str = "2025-08-10T21:30:00+09:00";
            let expected_utc = Utc.with_ymd_and_hms(2025, 8, 10, 12, 30, 0).unwrap();
            assert_eq!(parse_date(jst_str).unwrap(), expected_utc);
        }

        #[test]
        fn test_parse_invalid_formats() {
            assert!(parse_date("invalid-date").is_err());
            assert!(parse_date("2025-13-40").is_err()); // 不正な月日
            assert!(parse_date("").is_err()); // 空文字列
        }
    }

    // チャンネル解析・エントリ抽出のテスト
    mod entry_extraction {
        use super::*;

        #[test]
        fn test_extract_feed_entries_from_xml() {
            // xml->channel->entryの流れの確認
            let xml = r#"
                <rss version="2.0">
                    <channel>
                        <title>Test Feed</title>
                        <link>http://example.com</link>
                        <description>Test Description</description>
                        <item>
                            <title>AI Governance Framework Proposed</title>
                            <link>http://example.com/article1</link>
                            <description>A new framework for AI governance.</description>
                            <pubDate>Sun, 10 Aug 2025 12:00:00 +0000</pubDate>
                        </item>
                        <item>
                            <title>Second Article</title>
                            <link>http://example.com/article2</link>
                            <description>Another description.</description>
                            <pubDate>Sun, 10 Aug 2025 13:00:00 +0000</pubDate>
                        </item>
                    </channel>
                </rss>
                "#;

            let channel = parse_channel_from_xml_str(xml).expect("テストRSSの解析に失敗");
            let entries = extract_feed_entries(&channel);

            assert_eq!(entries.len(), 2, "2件のエントリが抽出されるはず");
            assert_eq!(entries[0].title, "AI Governance Framework Proposed");
            assert_eq!(entries[0].link, "http://example.com/article1");
            assert_eq!(entries[0].summary, "A new framework for AI governance.");
            assert_eq!(entries[0].published_at, "Sun, 10 Aug 2025 12:00:00 +0000");
        }

        #[test]
        fn test_extract_feed_entries_missing_link() {
            // リンクまたはpubDateがないitemは除外される
            let xml = r#"
                <rss version="2.0">
                    <channel>
                        <title>Test Feed</title>
                        <item>
                            <title>No Link Article</title>
                        </item>
                        <item>
                            <title>Article With Link</title>
                            <link>http://example.com/with-link</link>
                            <pubDate>Sun, 10 Aug 2025 14:00:00 +0000</pubDate>
                        </item>
                    </channel>
                </rss>
                "#;

            let channel = parse_channel_from_xml_str(xml).expect("テストRSSの解析に失敗");
            let entries = extract_feed_entries(&channel);

            assert_eq!(
                entries.len(),
                1,
                "リンクまたはpubDateがない記事は除外されるはず"
            );
            assert_eq!(entries[0].title, "Article With Link");
        }

        #[test]
        fn test_extract_feed_entries_from_mock_file() {
            // モックRSSファイルからの抽出テスト
            let reader = load_file(&PathBuf::from("mock/rss/governance.rss"))
                .expect("モックRSSファイルの読み込みに失敗");
            let channel = parse_channel_from_reader(reader).expect("モックRSSの解析に失敗");
            let entries = extract_feed_entries(&channel);

            assert!(!entries.is_empty(), "モックフィードの記事が0件");
            for entry in &entries {
                assert!(!entry.title.is_empty(), "記事のタイトルが空です");
                assert!(entry.link.starts_with("http"), "リンクがHTTP形式ではありません");
            }

            println!("✅ モックRSS抽出テスト成功: {}件", entries.len());
        }

        #[test]
        fn test_parse_invalid_xml() {
            let result = parse_channel_from_xml_str("<invalid>xml content</broken>");
            assert!(result.is_err(), "無効なXMLでエラーが発生するべき");
        }
    }
}
