//! FileSink - JSON 配列ファイルへの追記
//!
//! # 学習ポイント
//! - read-modify-write の全体書き換え
//! - 読み込み失敗（ファイルなし / 壊れた内容）は「空」とみなす
//! - ファイルハンドルはスコープで解放される（tokio::fs の一括 read / write）

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::domain::{OutputType, RedemptionRecord, SinkError};
use crate::ports::RedemptionSink;

/// JsonFileStore は `[{voucher, timestamp}, ...]` を 1 ファイルに保持する
///
/// # 既知の制限
/// load → push → save はアトミックではなく、ロックもしません。
/// 同じファイルに複数の書き手が同時に追記すると、片方の記録が失われます。
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 既存の記録を読む（失敗は空リスト扱い）
    pub async fn load(&self) -> Vec<RedemptionRecord> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "no prior records, starting empty");
                return Vec::new();
            }
        };
        match serde_json::from_slice(&bytes) {
            Ok(records) => records,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "unparseable records, starting empty");
                Vec::new()
            }
        }
    }

    /// 全体を上書き保存
    pub async fn save(&self, records: &[RedemptionRecord]) -> Result<(), SinkError> {
        let bytes = serde_json::to_vec(records)?;
        tokio::fs::write(&self.path, bytes)
            .await
            .map_err(|e| SinkError::unavailable(OutputType::File, e))
    }

    pub async fn append(&self, record: RedemptionRecord) -> Result<(), SinkError> {
        let mut records = self.load().await;
        records.push(record);
        self.save(&records).await
    }

    /// 書き込めるかどうか（ファイルは変更しない）
    ///
    /// - 既存ファイル: append モードで開けるか
    /// - 未作成: 親ディレクトリが存在し、読み取り専用でないか
    pub async fn is_writable(&self) -> bool {
        match tokio::fs::metadata(&self.path).await {
            Ok(meta) if meta.is_file() => tokio::fs::OpenOptions::new()
                .append(true)
                .open(&self.path)
                .await
                .is_ok(),
            Ok(_) => false,
            Err(_) => {
                let parent = match self.path.parent() {
                    Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
                    _ => PathBuf::from("."),
                };
                match tokio::fs::metadata(&parent).await {
                    Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
                    Err(_) => false,
                }
            }
        }
    }
}

/// FileSink は JsonFileStore に 1 件ずつ追記する
#[derive(Debug, Clone)]
pub struct FileSink {
    store: JsonFileStore,
}

impl FileSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            store: JsonFileStore::new(path),
        }
    }

    pub fn store(&self) -> &JsonFileStore {
        &self.store
    }
}

#[async_trait]
impl RedemptionSink for FileSink {
    fn output_type(&self) -> OutputType {
        OutputType::File
    }

    async fn consume(&self, record: RedemptionRecord) -> Result<(), SinkError> {
        self.store.append(record).await
    }

    async fn health(&self) -> bool {
        self.store.is_writable().await
    }
}
