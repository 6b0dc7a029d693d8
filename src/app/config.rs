use crate::types::{ConfigError, ConfigResult};
use std::env;
use std::path::PathBuf;

/// アプリケーション設定
///
/// すべて環境変数から読み込む（.envファイルはmain側でdotenvyが読む）。
/// 未設定の変数にはローカル実行向けのデフォルト値を使う。
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// ステージングツリーのルート（GOVWATCH_STAGING_DIR、デフォルト: staging）
    pub staging_dir: PathBuf,
    /// Obsidian Vaultのルート（GOVWATCH_VAULT_DIR、デフォルト: obsidian-vault）
    pub vault_dir: PathBuf,
    /// フィード設定YAMLのパス（GOVWATCH_FEEDS_FILE）
    pub feeds_path: PathBuf,
    /// キーワードYAMLのパス（GOVWATCH_KEYWORDS_FILE）
    pub keywords_path: PathBuf,
    /// 新着記事を自動承認するか（GOVWATCH_AUTO_APPROVE、デフォルト: false）
    pub auto_approve: bool,
}

impl AppConfig {
    /// 環境変数から設定を構築する
    pub fn from_env() -> ConfigResult<Self> {
        Ok(Self {
            staging_dir: env_or_default("GOVWATCH_STAGING_DIR", "staging").into(),
            vault_dir: env_or_default("GOVWATCH_VAULT_DIR", "obsidian-vault").into(),
            feeds_path: env_or_default("GOVWATCH_FEEDS_FILE", "src/domain/data/feeds.yaml")
                .into(),
            keywords_path: env_or_default(
                "GOVWATCH_KEYWORDS_FILE",
                "src/domain/data/keywords.yaml",
            )
            .into(),
            auto_approve: parse_bool_env("GOVWATCH_AUTO_APPROVE", false)?,
        })
    }
}

/// 環境変数を読み、未設定ならデフォルト値を返す
///
/// フォールバック時はその旨を通知する。
fn env_or_default(name: &str, default: &str) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            println!("{}が未設定のためデフォルトを使用: {}", name, default);
            default.to_string()
        }
    }
}

/// 真偽値の環境変数を解釈する
///
/// 受理する値: true/false/1/0（大文字小文字は区別しない）。
fn parse_bool_env(name: &str, default: bool) -> ConfigResult<bool> {
    match env::var(name) {
        Ok(value) => match value.trim().to_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            other => Err(ConfigError::invalid_value(format!(
                "{}の値が不正です: {}（true/false/1/0のいずれかを指定）",
                name, other
            ))),
        },
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 環境変数を触るテストは変数名を分けて衝突を避ける

    #[test]
    fn test_env_or_default() {
        env::remove_var("GOVWATCH_TEST_UNSET");
        assert_eq!(env_or_default("GOVWATCH_TEST_UNSET", "fallback"), "fallback");

        env::set_var("GOVWATCH_TEST_SET", "custom");
        assert_eq!(env_or_default("GOVWATCH_TEST_SET", "fallback"), "custom");
        env::remove_var("GOVWATCH_TEST_SET");

        // 空文字はデフォルト扱い
        env::set_var("GOVWATCH_TEST_EMPTY", "");
        assert_eq!(env_or_default("GOVWATCH_TEST_EMPTY", "fallback"), "fallback");
        env::remove_var("GOVWATCH_TEST_EMPTY");
    }

    #[test]
    fn test_parse_bool_env() {
        env::remove_var("GOVWATCH_TEST_BOOL_UNSET");
        assert!(!parse_bool_env("GOVWATCH_TEST_BOOL_UNSET", false).unwrap());
        assert!(parse_bool_env("GOVWATCH_TEST_BOOL_UNSET", true).unwrap());

        env::set_var("GOVWATCH_TEST_BOOL_TRUE", "TRUE");
        assert!(parse_bool_env("GOVWATCH_TEST_BOOL_TRUE", false).unwrap());
        env::remove_var("GOVWATCH_TEST_BOOL_TRUE");

        env::set_var("GOVWATCH_TEST_BOOL_BAD", "yes");
        let result = parse_bool_env("GOVWATCH_TEST_BOOL_BAD", false);
        assert!(
            matches!(result, Err(ConfigError::InvalidValue { .. })),
            "不正な値はエラーになるはず"
        );
        env::remove_var("GOVWATCH_TEST_BOOL_BAD");

        println!("✅ 真偽値環境変数テスト成功");
    }
}
