//! NullSink - 何もしない Sink
//!
//! 呼び出し側を分岐させずに出力を止めたいときに使います。

use async_trait::async_trait;

use crate::domain::{OutputType, RedemptionRecord, SinkError};
use crate::ports::RedemptionSink;

#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

#[async_trait]
impl RedemptionSink for NullSink {
    fn output_type(&self) -> OutputType {
        OutputType::Null
    }

    async fn consume(&self, _record: RedemptionRecord) -> Result<(), SinkError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[tokio::test]
    async fn discards_and_succeeds() {
        let sink = NullSink;
        assert!(sink.consume(RedemptionRecord::new("V1", Utc::now())).await.is_ok());
        assert!(sink.health().await);
    }
}
