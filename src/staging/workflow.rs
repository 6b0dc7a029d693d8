use crate::domain::article::{ArticleRecord, ArticleStatus};
use crate::staging::store::MetadataStore;
use crate::staging::{StagingArea, StagingLayout};
use crate::types::{ExportStats, ExportedArticle, StagingError, StagingResult};
use crate::vault::ObsidianVault;
use chrono::Utc;
use std::fs;
use std::path::PathBuf;
use std::sync::Mutex;

/// ステージングワークフロー
///
/// 記事の状態遷移 new → approved | rejected → exported を実行する。
/// 遷移は内部のMutexで直列化され、同一プロセス内の並行呼び出しでも
/// 本文の移動とメタデータ更新が交錯しない。
pub struct StagingWorkflow {
    layout: StagingLayout,
    store: MetadataStore,
    vault: ObsidianVault,
    lock: Mutex<()>,
}

impl StagingWorkflow {
    /// ステージングツリーとVaultのルートからワークフローを構築する
    ///
    /// 必要なステージングディレクトリはこの時点で作成される。
    pub fn new<P: Into<PathBuf>, Q: Into<PathBuf>>(
        staging_root: P,
        vault_root: Q,
    ) -> StagingResult<Self> {
        let layout = StagingLayout::new(staging_root);
        layout.ensure_directories()?;
        let store = MetadataStore::new(layout.metadata_dir());
        let vault = ObsidianVault::new(vault_root);
        Ok(Self {
            layout,
            store,
            vault,
            lock: Mutex::new(()),
        })
    }

    pub fn layout(&self) -> &StagingLayout {
        &self.layout
    }

    pub fn store(&self) -> &MetadataStore {
        &self.store
    }

    pub fn vault(&self) -> &ObsidianVault {
        &self.vault
    }

    /// このidが既にステージング済みか（重複判定に使う）
    pub fn is_known(&self, id: &str) -> bool {
        self.store.exists(id)
    }

    /// 記事をステージングする
    ///
    /// 本文ノートをnewディレクトリへ、メタデータをストアへ書き込む。
    /// 既知のidの場合は何も書き込まずOk(false)を返す。
    pub fn stage(&self, record: &ArticleRecord, note: &str) -> StagingResult<bool> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        if self.store.exists(&record.id) {
            return Ok(false);
        }

        let path = self.layout.content_path(StagingArea::New, &record.id);
        fs::write(&path, note)
            .map_err(|e| StagingError::file_io(path.display().to_string(), e))?;

        self.store.put(record).map_err(|e| {
            StagingError::partial_write(
                &record.id,
                format!("本文は書き込み済み。メタデータの保存に失敗: {}", e),
            )
        })?;

        Ok(true)
    }

    /// 記事を承認する（new → reviewed）
    pub fn approve(&self, id: &str) -> StagingResult<ArticleRecord> {
        self.transition(id, StagingArea::Reviewed, ArticleStatus::Approved)
    }

    /// 記事を却下する（new → rejected）
    pub fn reject(&self, id: &str) -> StagingResult<ArticleRecord> {
        self.transition(id, StagingArea::Rejected, ArticleStatus::Rejected)
    }

    /// レビュー遷移の共通処理
    ///
    /// 本文がnewに存在しなければNotFoundで中断し、何も変更しない。
    /// 本文移動後のメタデータ更新失敗はPartialWriteとして区別する。
    fn transition(
        &self,
        id: &str,
        to_area: StagingArea,
        to_status: ArticleStatus,
    ) -> StagingResult<ArticleRecord> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        let source = self.layout.content_path(StagingArea::New, id);
        if !source.is_file() {
            return Err(StagingError::not_found(id, StagingArea::New.dir_name()));
        }

        let mut record = self.load_or_synthesize(id);

        let destination = self.layout.content_path(to_area, id);
        fs::rename(&source, &destination)
            .map_err(|e| StagingError::file_io(destination.display().to_string(), e))?;

        let now = Utc::now();
        record.status = to_status;
        match to_status {
            ArticleStatus::Approved => record.approved_at = Some(now),
            ArticleStatus::Rejected => record.rejected_at = Some(now),
            _ => {}
        }

        self.store.put(&record).map_err(|e| {
            StagingError::partial_write(
                id,
                format!(
                    "本文は{}へ移動済み。メタデータの更新に失敗: {}",
                    to_area, e
                ),
            )
        })?;

        Ok(record)
    }

    /// 記事1件をVaultへエクスポートする
    ///
    /// 本文はreviewedディレクトリに必要（エクスポート後もそこに残るため、
    /// 同じidの再エクスポートは常に成功する）。メタデータが欠落・破損して
    /// いる場合は最低限のレコードを合成して進行する。
    pub fn export_article(&self, id: &str) -> StagingResult<ExportedArticle> {
        let _guard = self.lock.lock().unwrap_or_else(|p| p.into_inner());

        let source = self.layout.content_path(StagingArea::Reviewed, id);
        if !source.is_file() {
            return Err(StagingError::not_found(
                id,
                StagingArea::Reviewed.dir_name(),
            ));
        }

        let mut record = self.load_or_synthesize(id);

        let file_name = format!(
            "{} - {}.md",
            date_part(&record.date),
            note_file_title(&record)
        );
        let destination = self.vault.copy_note(&source, &record.category, &file_name)?;

        record.status = ArticleStatus::Exported;
        record.exported_at = Some(Utc::now());
        record.destination_path = Some(destination.display().to_string());

        self.store.put(&record).map_err(|e| {
            StagingError::partial_write(
                id,
                format!("ノートはVaultへコピー済み。メタデータの更新に失敗: {}", e),
            )
        })?;

        Ok(ExportedArticle {
            id: id.to_string(),
            title: record.title.clone(),
            path: destination.display().to_string(),
        })
    }

    /// エクスポートを実行する
    ///
    /// idを指定した場合はその1件のみ、Noneの場合はreviewedディレクトリの
    /// 本文のうちエクスポート済み（exported）を除く全件を対象にする。
    /// 本文を基準に列挙するため、メタデータが欠落・破損した記事も
    /// 対象に含まれる（合成レコードで進行する）。
    /// 個別の失敗は集約され、バッチ全体は失敗しない。
    pub fn export(&self, id: Option<&str>) -> StagingResult<ExportStats> {
        let ids: Vec<String> = match id {
            Some(id) => vec![id.to_string()],
            None => {
                let mut ids = Vec::new();
                for id in self.layout.list_area_ids(StagingArea::Reviewed)? {
                    match self.store.get(&id) {
                        Ok(Some(record)) if record.status == ArticleStatus::Exported => {}
                        _ => ids.push(id),
                    }
                }
                ids
            }
        };

        let mut stats = ExportStats::empty();
        for id in ids {
            match self.export_article(&id) {
                Ok(article) => {
                    stats.exported += 1;
                    stats.articles.push(article);
                }
                Err(e) => {
                    stats.errors += 1;
                    stats.error_messages.push(format!("{}: {}", id, e));
                }
            }
        }
        Ok(stats)
    }

    /// 指定ステータスの記事一覧（新しい順）
    pub fn list(&self, status: ArticleStatus) -> StagingResult<Vec<ArticleRecord>> {
        self.store.list_by_status(status)
    }

    /// メタデータを読み込む。欠落・破損時は警告を出して合成レコードで代替する
    fn load_or_synthesize(&self, id: &str) -> ArticleRecord {
        match self.store.get(id) {
            Ok(Some(record)) => record,
            Ok(None) => {
                eprintln!("警告: メタデータが見つからないため合成します: {}", id);
                ArticleRecord::synthesized(id)
            }
            Err(e) => {
                eprintln!("警告: メタデータを読めないため合成します: {} - {}", id, e);
                ArticleRecord::synthesized(id)
            }
        }
    }
}

/// エクスポートファイル名に使うタイトル部分
///
/// サニタイズの結果が空になった場合はidへフォールバックする。
fn note_file_title(record: &ArticleRecord) -> String {
    let sanitized = sanitize_title(&record.title);
    if sanitized.is_empty() {
        record.id.clone()
    } else {
        sanitized
    }
}

/// タイトルをファイル名に安全な形へ変換する
///
/// 英数字・ハイフン・アンダースコアは保持し、それ以外の文字の連続は
/// 単一のアンダースコアに置き換え、先頭・末尾のアンダースコアは落とす。
pub fn sanitize_title(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    let mut pending_separator = false;
    for c in title.chars() {
        if c.is_alphanumeric() || c == '-' || c == '_' {
            if pending_separator && !out.is_empty() {
                out.push('_');
            }
            out.push(c);
            pending_separator = false;
        } else {
            pending_separator = true;
        }
    }
    out.trim_matches('_').to_string()
}

/// 配信日時文字列から日付部分を取り出す
///
/// "2025-04-07 10:00:00"や"2025-04-07T10:00:00Z"の先頭部分を使う。
/// 空の場合は今日の日付にフォールバックする。
fn date_part(date: &str) -> String {
    let trimmed = date.trim();
    if trimmed.is_empty() {
        return Utc::now().format("%Y-%m-%d").to_string();
    }
    trimmed
        .split(|c| c == ' ' || c == 'T')
        .next()
        .unwrap_or(trimmed)
        .to_string()
}
