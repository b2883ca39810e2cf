//! RedemptionSink port - 利用記録の出力先の抽象化
//!
//! # 実装
//! - ConsoleSink / FileSink / DatabaseSink / QueueSink / NullSink（impls/ を参照）

use async_trait::async_trait;

use crate::domain::{OutputType, RedemptionRecord, SinkError};

/// RedemptionSink は RedemptionRecord を記録する
///
/// # 使用例
/// ```ignore
/// let sink = factory.create(OutputType::File);
/// sink.consume(record).await?;
/// ```
///
/// # 契約
/// - `consume` は I/O を伴う可能性がある（常に await する）
/// - 失敗は握りつぶさず `SinkError` で返す
/// - `health` は業務状態を変更しない（接続できるか、書き込めるか だけを見る）
///
/// # Thread Safety
/// - `Send + Sync` を要求（`Box<dyn RedemptionSink>` を task 間で受け渡すため）
#[async_trait]
pub trait RedemptionSink: Send + Sync {
    /// この Sink に対応する OutputType
    fn output_type(&self) -> OutputType;

    async fn consume(&self, record: RedemptionRecord) -> Result<(), SinkError>;

    /// 外部依存がなければ常に true
    async fn health(&self) -> bool {
        true
    }
}
