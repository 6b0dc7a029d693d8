use thiserror::Error;

/// ステージング処理の共通エラー型
/// 状態遷移・メタデータストア・エクスポートで発生するエラーを種別ごとに定義
#[derive(Error, Debug)]
pub enum StagingError {
    /// 期待されるディレクトリに記事本文が存在しない
    /// 状態遷移はこのエラーで中断され、何も変更しない
    #[error("記事が見つかりません: {id} ({area}ディレクトリ)")]
    NotFound { id: String, area: String },

    /// メタデータレコードが読み取り不能・不正
    #[error("メタデータが破損しています: {path} - {detail}")]
    Corrupt { path: String, detail: String },

    /// 本文の移動は成功したがメタデータの書き込みに失敗した状態
    /// NotFoundとは区別して報告し、運用側に整合性の回復を促す
    #[error("部分書き込みの疑い: {id} - {detail}")]
    PartialWrite { id: String, detail: String },

    /// ファイルI/Oエラー
    #[error("ファイル操作エラー: {path} - {source}")]
    FileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSONシリアライゼーション/デシリアライゼーションエラー
    #[error("JSON処理エラー: {context} - {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

impl StagingError {
    /// 本文未発見エラーを作成
    pub fn not_found<I: Into<String>, A: Into<String>>(id: I, area: A) -> Self {
        Self::NotFound {
            id: id.into(),
            area: area.into(),
        }
    }

    /// メタデータ破損エラーを作成
    pub fn corrupt<P: Into<String>, D: Into<String>>(path: P, detail: D) -> Self {
        Self::Corrupt {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// 部分書き込みエラーを作成
    pub fn partial_write<I: Into<String>, D: Into<String>>(id: I, detail: D) -> Self {
        Self::PartialWrite {
            id: id.into(),
            detail: detail.into(),
        }
    }

    /// ファイルI/Oエラーを作成
    pub fn file_io<P: Into<String>>(path: P, source: std::io::Error) -> Self {
        Self::FileIo {
            path: path.into(),
            source,
        }
    }

    /// JSON処理エラーを作成
    pub fn json<C: Into<String>>(context: C, source: serde_json::Error) -> Self {
        Self::Json {
            context: context.into(),
            source,
        }
    }
}

/// ステージングエラーのResult型エイリアス
pub type StagingResult<T> = std::result::Result<T, StagingError>;
