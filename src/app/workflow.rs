use crate::domain::article::{render_article_note, ArticleRecord, ArticleStatus};
use crate::domain::feed::{Feed, FeedEntry};
use crate::domain::filter::{compute_article_id, KeywordSet};
use crate::infra::api::content::ContentFetcher;
use crate::infra::api::feed::FeedSource;
use crate::staging::workflow::StagingWorkflow;
use crate::types::{FetchStats, ReviewStats};
use anyhow::Result;

/// エントリ1件の処理結果
enum EntryOutcome {
    /// 新規にステージングした
    Staged,
    /// 既知のidだったためスキップ
    Duplicate,
    /// キーワードに一致しなかったためスキップ
    NotRelevant,
}

/// フィード収集ワークフローのメイン実行関数（依存性を注入）
///
/// 1. 各フィードからエントリを取得
/// 2. エントリごとに本文を取得してキーワード判定
/// 3. 関連ありと判定した新規記事をステージング
///
/// 個別のフィード・エントリの失敗は集約し、バッチ全体は失敗させない。
pub async fn fetch_and_process_feeds<S: FeedSource, C: ContentFetcher>(
    feed_source: &S,
    content_fetcher: &C,
    feeds: &[Feed],
    keywords: &KeywordSet,
    workflow: &StagingWorkflow,
) -> FetchStats {
    println!("=== フィード収集開始 ===");
    println!("対象フィード数: {}件", feeds.len());

    let mut stats = FetchStats {
        total_feeds: feeds.len(),
        ..Default::default()
    };

    for feed in feeds {
        println!("フィード処理中: {}", feed);

        let entries = match feed_source.fetch_entries(feed).await {
            Ok(entries) => {
                stats.processed_feeds += 1;
                entries
            }
            Err(e) => {
                stats.failed_feeds += 1;
                stats.errors.push(format!("{}: {}", feed, e));
                eprintln!("  フィード取得エラー: {}", e);
                continue;
            }
        };
        println!("  {}件のエントリを取得", entries.len());

        for entry in &entries {
            stats.total_entries += 1;
            match process_feed_entry(content_fetcher, feed, entry, keywords, workflow).await {
                Ok(EntryOutcome::Staged) => {
                    stats.relevant_entries += 1;
                    println!("  ステージング: {}", entry.title);
                }
                Ok(EntryOutcome::Duplicate) => {
                    stats.skipped_duplicate += 1;
                }
                Ok(EntryOutcome::NotRelevant) => {}
                Err(e) => {
                    stats.errors.push(format!("{}: {}", entry.link, e));
                    eprintln!("  エントリ処理エラー: {} - {}", entry.link, e);
                }
            }
        }
    }

    println!("=== フィード収集完了 ===");
    println!("{}", stats);
    stats
}

/// エントリ1件を処理する
///
/// 本文取得 → キーワード判定 → id計算 → 重複判定 → ステージングの順。
async fn process_feed_entry<C: ContentFetcher>(
    content_fetcher: &C,
    feed: &Feed,
    entry: &FeedEntry,
    keywords: &KeywordSet,
    workflow: &StagingWorkflow,
) -> Result<EntryOutcome> {
    let content = content_fetcher.fetch_content(&entry.link).await?;

    if !keywords.is_relevant(&entry.title, entry.description_or_summary(), &content) {
        return Ok(EntryOutcome::NotRelevant);
    }

    let id = compute_article_id(&entry.link, &entry.title, &entry.published_at);
    if workflow.is_known(&id) {
        return Ok(EntryOutcome::Duplicate);
    }

    let record = ArticleRecord::new(
        id,
        &entry.title,
        &entry.link,
        &entry.published_at,
        &feed.source,
        &feed.language,
        &feed.category,
        vec![],
    );
    let note = render_article_note(&record, entry.description_or_summary(), &content);

    if workflow.stage(&record, &note)? {
        Ok(EntryOutcome::Staged)
    } else {
        Ok(EntryOutcome::Duplicate)
    }
}

/// 新着記事を一括処理する
///
/// auto_approveが有効な場合は全新着記事を承認してVaultへエクスポートする。
/// 無効な場合は件数の報告のみ行い、レビューは手動操作に委ねる。
pub fn process_new_articles(workflow: &StagingWorkflow, auto_approve: bool) -> ReviewStats {
    let mut stats = ReviewStats::default();

    let new_articles = match workflow.list(ArticleStatus::New) {
        Ok(articles) => articles,
        Err(e) => {
            stats.errors += 1;
            stats.error_messages.push(format!("新着一覧の取得に失敗: {}", e));
            return stats;
        }
    };
    stats.total = new_articles.len();

    if !auto_approve {
        println!(
            "新着{}件がレビュー待ちです（approve/rejectコマンドで処理してください）",
            stats.total
        );
        return stats;
    }

    println!("=== 新着記事の自動承認開始 ===");
    for record in new_articles {
        match workflow.approve(&record.id) {
            Ok(_) => {
                stats.approved += 1;
                match workflow.export_article(&record.id) {
                    Ok(exported) => {
                        stats.exported += 1;
                        println!("  エクスポート: {}", exported.path);
                    }
                    Err(e) => {
                        stats.errors += 1;
                        stats
                            .error_messages
                            .push(format!("{}: エクスポート失敗: {}", record.id, e));
                        eprintln!("  エクスポートエラー: {} - {}", record.id, e);
                    }
                }
            }
            Err(e) => {
                stats.errors += 1;
                stats
                    .error_messages
                    .push(format!("{}: 承認失敗: {}", record.id, e));
                eprintln!("  承認エラー: {} - {}", record.id, e);
            }
        }
    }
    println!("=== 新着記事の自動承認完了 ===");
    println!("{}", stats);
    stats
}
