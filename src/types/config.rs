use thiserror::Error;

/// 設定関連のエラー型
/// 環境変数から読み込んだ設定値の検証エラーを定義
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 設定値が不正
    #[error("設定値が不正です: {reason}")]
    InvalidValue { reason: String },
}

impl ConfigError {
    /// 不正な設定値エラーを作成
    pub fn invalid_value<R: Into<String>>(reason: R) -> Self {
        Self::InvalidValue {
            reason: reason.into(),
        }
    }
}

/// 設定エラーのResult型エイリアス
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;
