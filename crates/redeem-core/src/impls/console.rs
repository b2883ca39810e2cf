//! ConsoleSink - 標準出力に 1 行の JSON を書く

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{OutputType, RedemptionRecord, SinkError};
use crate::ports::RedemptionSink;

/// ConsoleSink は `{"voucher":..,"timestamp":..}` を 1 行で出力する
///
/// 外部依存がないので health() は常に true。
/// テストでは `with_writer` で出力先を差し替えます。
pub struct ConsoleSink {
    out: Mutex<Box<dyn Write + Send>>,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self::with_writer(std::io::stdout())
    }

    pub fn with_writer(writer: impl Write + Send + 'static) -> Self {
        Self {
            out: Mutex::new(Box::new(writer)),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RedemptionSink for ConsoleSink {
    fn output_type(&self) -> OutputType {
        OutputType::Console
    }

    async fn consume(&self, record: RedemptionRecord) -> Result<(), SinkError> {
        let line = serde_json::to_string(&record)?;
        // poison されていても書き込み先自体は使える
        let mut out = self.out.lock().unwrap_or_else(|e| e.into_inner());
        writeln!(out, "{line}")
            .and_then(|_| out.flush())
            .map_err(|e| SinkError::unavailable(OutputType::Console, e))
    }
}
