use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// ファイルパスからBufReaderを作成する
/// パースやデータ変換は各ドメインで行う
pub fn load_file(file_path: &Path) -> Result<BufReader<File>> {
    let file = File::open(file_path)
        .with_context(|| format!("ファイルの読み込みに失敗しました: {}", file_path.display()))?;
    let buf_reader = BufReader::new(file);
    Ok(buf_reader)
}

/// JSONファイルからSerdeでDeserializeできる型を読み込む
pub fn load_json_from_file<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let buf_reader = load_file(file_path)?;
    serde_json::from_reader(buf_reader)
        .with_context(|| format!("JSONファイルの解析に失敗: {}", file_path.display()))
}

/// YAMLファイルからSerdeでDeserializeできる型を読み込む
pub fn load_yaml_from_file<T: DeserializeOwned>(file_path: &Path) -> Result<T> {
    let buf_reader = load_file(file_path)?;
    serde_yaml::from_reader(buf_reader)
        .with_context(|| format!("YAMLファイルの解析に失敗: {}", file_path.display()))
}

/// 文字列をファイルへ書き込む（既存内容は上書き）
pub fn write_string_to_file(file_path: &Path, content: &str) -> Result<()> {
    let mut file = File::create(file_path)
        .with_context(|| format!("ファイルの作成に失敗しました: {}", file_path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("ファイルへの書き込みに失敗: {}", file_path.display()))?;
    Ok(())
}
