use anyhow::{Context, Result};
use govwatch::app::config::AppConfig;
use govwatch::app::workflow::{fetch_and_process_feeds, process_new_articles};
use govwatch::domain::article::ArticleStatus;
use govwatch::domain::feed::search_feeds;
use govwatch::domain::filter::KeywordSet;
use govwatch::infra::api::content::HttpContentFetcher;
use govwatch::infra::api::feed::RssFeedSource;
use govwatch::infra::api::http::ReqwestHttpClient;
use govwatch::staging::stats::collect_stats;
use govwatch::staging::workflow::StagingWorkflow;

#[tokio::main]
async fn main() {
    // 環境変数を読み込み（.envファイルがあれば使用）
    let _ = dotenvy::dotenv();

    let args: Vec<String> = std::env::args().collect();
    let command = args.get(1).map(String::as_str).unwrap_or("help");
    let target = args.get(2).map(String::as_str);

    if let Err(e) = run_command(command, target).await {
        eprintln!("エラー: {:#}", e);
        std::process::exit(1);
    }
}

async fn run_command(command: &str, target: Option<&str>) -> Result<()> {
    let config = AppConfig::from_env().context("設定の読み込みに失敗")?;
    let workflow = StagingWorkflow::new(&config.staging_dir, &config.vault_dir)
        .context("ステージングツリーの初期化に失敗")?;

    match command {
        "fetch" => {
            fetch(&config, &workflow).await?;
        }
        "run" => {
            fetch(&config, &workflow).await?;
            process_new_articles(&workflow, config.auto_approve);
        }
        "list" => {
            let status = match target {
                Some(name) => parse_status(name)?,
                None => ArticleStatus::New,
            };
            list_articles(&workflow, status)?;
        }
        "approve" => {
            let id = target.context("approveには記事idが必要です")?;
            let record = workflow.approve(id)?;
            println!("承認しました: {} ({})", record.title, record.id);
        }
        "reject" => {
            let id = target.context("rejectには記事idが必要です")?;
            let record = workflow.reject(id)?;
            println!("却下しました: {} ({})", record.title, record.id);
        }
        "export" => {
            let stats = workflow.export(target)?;
            for article in &stats.articles {
                println!("エクスポート: {} -> {}", article.title, article.path);
            }
            for message in &stats.error_messages {
                eprintln!("エクスポートエラー: {}", message);
            }
            println!("{}", stats);
        }
        "stats" => {
            let stats = collect_stats(workflow.layout(), workflow.store())?;
            print!("{}", stats);
        }
        _ => {
            print_usage();
        }
    }
    Ok(())
}

/// フィード収集を実行する
async fn fetch(config: &AppConfig, workflow: &StagingWorkflow) -> Result<()> {
    let feeds = search_feeds(&config.feeds_path, None).context("フィード設定の読み込みに失敗")?;
    let keywords =
        KeywordSet::from_yaml_file(&config.keywords_path).context("キーワードの読み込みに失敗")?;
    println!("キーワード{}件で判定します", keywords.len());

    let feed_source = RssFeedSource::new(ReqwestHttpClient::new());
    let content_fetcher = HttpContentFetcher::new(ReqwestHttpClient::new());

    fetch_and_process_feeds(&feed_source, &content_fetcher, &feeds, &keywords, workflow).await;
    Ok(())
}

/// 指定ステータスの記事一覧を表示する
fn list_articles(workflow: &StagingWorkflow, status: ArticleStatus) -> Result<()> {
    let records = workflow.list(status)?;
    println!("=== {}の記事: {}件 ===", status, records.len());
    for record in records {
        println!("{}  [{}] {} ({})", record.id, record.category, record.title, record.date);
    }
    Ok(())
}

fn parse_status(name: &str) -> Result<ArticleStatus> {
    match name {
        "new" => Ok(ArticleStatus::New),
        "approved" => Ok(ArticleStatus::Approved),
        "rejected" => Ok(ArticleStatus::Rejected),
        "exported" => Ok(ArticleStatus::Exported),
        other => anyhow::bail!(
            "不明なステータス: {}（new/approved/rejected/exportedのいずれかを指定）",
            other
        ),
    }
}

fn print_usage() {
    println!("使い方: govwatch <コマンド> [引数]");
    println!();
    println!("コマンド:");
    println!("  fetch            フィードを収集して新規記事をステージング");
    println!("  run              収集後、設定に応じて新着記事を一括処理");
    println!("  list [status]    記事一覧を表示（デフォルト: new）");
    println!("  approve <id>     記事を承認（new → reviewed）");
    println!("  reject <id>      記事を却下（new → rejected）");
    println!("  export [id]      承認済み記事をVaultへエクスポート");
    println!("  stats            ステージング統計を表示");
}
