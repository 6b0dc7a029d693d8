use crate::domain::article::{ArticleRecord, ArticleStatus};
use crate::types::{StagingError, StagingResult};
use std::fs;
use std::path::{Path, PathBuf};

/// メタデータサイドカーストア
///
/// idごとに1つのJSONファイルを保持するキー付きレコードストア。
/// putはid単位の完全上書きで、部分マージは行わない。
/// 同一idへの並行putの順序は保証しない（単一ライター前提。
/// ミューテーションの直列化はワークフロー側が担う）。
#[derive(Debug, Clone)]
pub struct MetadataStore {
    dir: PathBuf,
}

impl MetadataStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// レコードファイルのパス
    fn record_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    /// レコードが存在するか
    pub fn exists(&self, id: &str) -> bool {
        self.record_path(id).is_file()
    }

    /// レコードを取得する
    ///
    /// 存在しない場合はOk(None)。読めるが解析できない場合はCorrupt。
    pub fn get(&self, id: &str) -> StagingResult<Option<ArticleRecord>> {
        let path = self.record_path(id);
        if !path.is_file() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path)
            .map_err(|e| StagingError::file_io(path.display().to_string(), e))?;
        let record = serde_json::from_str(&raw)
            .map_err(|e| StagingError::corrupt(path.display().to_string(), e.to_string()))?;
        Ok(Some(record))
    }

    /// レコードを保存する（完全上書き）
    pub fn put(&self, record: &ArticleRecord) -> StagingResult<()> {
        let path = self.record_path(&record.id);
        let json = serde_json::to_string_pretty(record)
            .map_err(|e| StagingError::json(format!("レコードの直列化: {}", record.id), e))?;
        fs::write(&path, json)
            .map_err(|e| StagingError::file_io(path.display().to_string(), e))?;
        Ok(())
    }

    /// 全レコードを読み込む
    ///
    /// 破損したレコードは警告を出力してスキップし、一覧全体は失敗させない。
    pub fn list_all(&self) -> StagingResult<Vec<ArticleRecord>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| StagingError::file_io(self.dir.display().to_string(), e))?;

        let mut records = Vec::new();
        for entry in entries.flatten() {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }

            match fs::read_to_string(&path) {
                Ok(raw) => match serde_json::from_str::<ArticleRecord>(&raw) {
                    Ok(record) => records.push(record),
                    Err(e) => {
                        eprintln!(
                            "警告: 破損したメタデータをスキップ: {} - {}",
                            path.display(),
                            e
                        );
                    }
                },
                Err(e) => {
                    eprintln!(
                        "警告: メタデータの読み込みに失敗: {} - {}",
                        path.display(),
                        e
                    );
                }
            }
        }

        Ok(records)
    }

    /// 指定ステータスのレコード一覧を返す
    ///
    /// そのステータスに到達した時刻の降順（新しい順）で並べる。
    pub fn list_by_status(&self, status: ArticleStatus) -> StagingResult<Vec<ArticleRecord>> {
        let mut records: Vec<ArticleRecord> = self
            .list_all()?
            .into_iter()
            .filter(|r| r.status == status)
            .collect();

        records.sort_by(|a, b| b.sort_timestamp().cmp(&a.sort_timestamp()));
        Ok(records)
    }
}
