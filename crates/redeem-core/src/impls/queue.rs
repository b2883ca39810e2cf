//! QueueSink - AMQP のキューへ JSON を publish
//!
//! # フロー（publish ごと）
//! 1. 接続を開く
//! 2. チャネルを作成
//! 3. キューを宣言（なければ作成）
//! 4. 1 メッセージを publish
//! 5. チャネル・接続を閉じる
//!
//! 成功 / 失敗はどちらもログに出してから返します。

use async_trait::async_trait;
use lapin::options::{BasicPublishOptions, QueueDeclareOptions};
use lapin::types::FieldTable;
use lapin::protocol::constants::REPLY_SUCCESS;
use lapin::{BasicProperties, Connection, ConnectionProperties};

use crate::config::QueueTarget;
use crate::domain::{OutputType, RedemptionRecord, SinkError};
use crate::ports::RedemptionSink;

/// QueueSink は 1 consume = 1 接続 = 1 メッセージ
#[derive(Debug, Clone)]
pub struct QueueSink {
    target: QueueTarget,
    queue: String,
}

impl QueueSink {
    pub fn new(target: QueueTarget, queue: impl Into<String>) -> Self {
        Self {
            target,
            queue: queue.into(),
        }
    }

    async fn connect(&self) -> Result<Connection, lapin::Error> {
        Connection::connect(&self.target.amqp_uri(), ConnectionProperties::default()).await
    }

    async fn publish(&self, payload: &[u8]) -> Result<(), lapin::Error> {
        let conn = self.connect().await?;
        let channel = conn.create_channel().await?;
        channel
            .queue_declare(&self.queue, declare_options(), FieldTable::default())
            .await?;
        channel
            .basic_publish(
                "",
                &self.queue,
                BasicPublishOptions::default(),
                payload,
                BasicProperties::default(),
            )
            .await?
            .await?;
        channel.close(REPLY_SUCCESS, "OK").await?;
        conn.close(REPLY_SUCCESS, "OK").await
    }
}

/// 既存の durable キューと宣言が食い違うとブローカーが 406 を返すため durable で宣言する
fn declare_options() -> QueueDeclareOptions {
    QueueDeclareOptions {
        durable: true,
        ..QueueDeclareOptions::default()
    }
}

/// メッセージ本文（UTF-8 JSON `{voucher, timestamp}`）
fn encode(record: &RedemptionRecord) -> Result<Vec<u8>, SinkError> {
    Ok(serde_json::to_vec(record)?)
}

#[async_trait]
impl RedemptionSink for QueueSink {
    fn output_type(&self) -> OutputType {
        OutputType::Queue
    }

    async fn consume(&self, record: RedemptionRecord) -> Result<(), SinkError> {
        let payload = encode(&record)?;
        match self.publish(&payload).await {
            Ok(()) => {
                tracing::info!(queue = %self.queue, "Sent to {}", self.queue);
                Ok(())
            }
            Err(e) => {
                tracing::error!(queue = %self.queue, error = %e, "Error sending to {}", self.queue);
                Err(SinkError::unavailable(OutputType::Queue, e))
            }
        }
    }

    async fn health(&self) -> bool {
        match self.connect().await {
            Ok(conn) => conn.close(REPLY_SUCCESS, "OK").await.is_ok(),
            Err(e) => {
                tracing::debug!(uri = %self.target.amqp_uri(), error = %e, "broker unreachable");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // 何も listen していないポート
    fn unreachable() -> QueueSink {
        QueueSink::new(
            QueueTarget {
                host: "127.0.0.1".to_string(),
                port: 1,
            },
            "design-patterns-frws",
        )
    }

    #[test]
    fn declares_durable_queue() {
        let options = declare_options();
        assert!(options.durable);
        assert!(!options.passive);
        assert!(!options.exclusive);
        assert!(!options.auto_delete);
    }

    #[test]
    fn message_body_is_json_voucher_and_millis() {
        let ts = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let body = encode(&RedemptionRecord::new("V1", ts)).unwrap();

        assert_eq!(
            String::from_utf8(body).unwrap(),
            format!(r#"{{"voucher":"V1","timestamp":{}}}"#, ts.timestamp_millis())
        );
    }

    #[tokio::test]
    async fn unreachable_broker_is_reported() {
        let err = unreachable()
            .consume(RedemptionRecord::new("V1", Utc::now()))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            SinkError::Unavailable {
                output: OutputType::Queue,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn unreachable_broker_is_unhealthy() {
        assert!(!unreachable().health().await);
    }
}
