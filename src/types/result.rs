/// フィード収集バッチの実行結果
///
/// 個々のエントリの失敗はここに集約され、バッチ全体は失敗しない。
#[derive(Debug, Clone, Default)]
pub struct FetchStats {
    /// 設定されたフィード総数
    pub total_feeds: usize,
    /// 正常に処理できたフィード数
    pub processed_feeds: usize,
    /// 取得・解析に失敗したフィード数
    pub failed_feeds: usize,
    /// 処理したエントリ総数
    pub total_entries: usize,
    /// 関連ありと判定しステージングした件数
    pub relevant_entries: usize,
    /// 既知のidとして保存をスキップした件数
    pub skipped_duplicate: usize,
    /// 個別エラーメッセージの一覧
    pub errors: Vec<String>,
}

impl std::fmt::Display for FetchStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "フィード処理完了: {}フィード中{}件成功・{}件失敗、エントリ{}件中{}件を新規ステージング（重複スキップ{}件、エラー{}件）",
            self.total_feeds,
            self.processed_feeds,
            self.failed_feeds,
            self.total_entries,
            self.relevant_entries,
            self.skipped_duplicate,
            self.errors.len()
        )
    }
}

/// エクスポート済み記事1件の情報
#[derive(Debug, Clone)]
pub struct ExportedArticle {
    pub id: String,
    pub title: String,
    pub path: String,
}

/// エクスポートバッチの実行結果
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// エクスポートに成功した件数
    pub exported: usize,
    /// 失敗した件数
    pub errors: usize,
    /// エクスポートされた記事の一覧
    pub articles: Vec<ExportedArticle>,
    /// 個別エラーメッセージの一覧
    pub error_messages: Vec<String>,
}

impl ExportStats {
    /// 空の結果を作成
    pub fn empty() -> Self {
        Self::default()
    }
}

impl std::fmt::Display for ExportStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "エクスポート完了: 成功{}件、エラー{}件",
            self.exported, self.errors
        )
    }
}

/// 新着記事の一括処理（自動承認＋エクスポート）の実行結果
#[derive(Debug, Clone, Default)]
pub struct ReviewStats {
    /// 対象になった新着記事数
    pub total: usize,
    /// 承認された件数
    pub approved: usize,
    /// Vaultへエクスポートされた件数
    pub exported: usize,
    /// 失敗した件数
    pub errors: usize,
    /// 個別エラーメッセージの一覧
    pub error_messages: Vec<String>,
}

impl std::fmt::Display for ReviewStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "新着{}件を処理: 承認{}件、エクスポート{}件、エラー{}件",
            self.total, self.approved, self.exported, self.errors
        )
    }
}
