//! DatabaseSink - SQLite の `vouchers` テーブルに 1 行ずつ挿入
//!
//! # 学習ポイント
//! - 呼び出しごとに接続を開いて閉じる（プールなし）
//! - `CREATE TABLE IF NOT EXISTS` による冪等なセットアップ

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};

use crate::domain::{OutputType, RedemptionRecord, SinkError};
use crate::ports::RedemptionSink;

const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS vouchers (
    id INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
    voucher TEXT(1024),
    "timestamp" INTEGER
)
"#;

const INSERT: &str = r#"INSERT INTO vouchers (voucher, "timestamp") VALUES (?, ?)"#;

/// DatabaseSink は 1 consume = 1 接続 = 1 INSERT
///
/// health() は「新しい接続を開けるか」を意味します（ファイルは作成しない）。
#[derive(Debug, Clone)]
pub struct DatabaseSink {
    path: PathBuf,
}

impl DatabaseSink {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection, sqlx::Error> {
        SqliteConnectOptions::new()
            .filename(&self.path)
            .create_if_missing(true)
            .connect()
            .await
    }

    /// 既存ファイルは実際に開いてみる。未作成なら親ディレクトリが書き込めるかだけを見る
    async fn can_connect(&self) -> Result<bool, sqlx::Error> {
        if tokio::fs::metadata(&self.path).await.is_ok() {
            let conn = SqliteConnectOptions::new()
                .filename(&self.path)
                .connect()
                .await?;
            conn.close().await?;
            return Ok(true);
        }
        let parent = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Ok(match tokio::fs::metadata(&parent).await {
            Ok(meta) => meta.is_dir() && !meta.permissions().readonly(),
            Err(_) => false,
        })
    }

    /// テーブルを用意する（何度実行してもよい）
    pub async fn setup(&self) -> Result<(), SinkError> {
        let mut conn = self.connect().await.map_err(unavailable)?;
        sqlx::query(DDL)
            .execute(&mut conn)
            .await
            .map_err(unavailable)?;
        conn.close().await.map_err(unavailable)
    }

    async fn insert(&self, record: &RedemptionRecord) -> Result<(), sqlx::Error> {
        let mut conn = self.connect().await?;
        sqlx::query(DDL).execute(&mut conn).await?;
        sqlx::query(INSERT)
            .bind(record.voucher())
            .bind(record.timestamp_millis())
            .execute(&mut conn)
            .await?;
        conn.close().await
    }
}

fn unavailable(e: sqlx::Error) -> SinkError {
    SinkError::unavailable(OutputType::Database, e)
}

#[async_trait]
impl RedemptionSink for DatabaseSink {
    fn output_type(&self) -> OutputType {
        OutputType::Database
    }

    async fn consume(&self, record: RedemptionRecord) -> Result<(), SinkError> {
        self.insert(&record).await.map_err(unavailable)?;
        tracing::debug!(voucher = record.voucher(), path = %self.path.display(), "voucher row inserted");
        Ok(())
    }

    async fn health(&self) -> bool {
        match self.can_connect().await {
            Ok(ok) => ok,
            Err(e) => {
                tracing::debug!(path = %self.path.display(), error = %e, "database unreachable");
                false
            }
        }
    }
}
