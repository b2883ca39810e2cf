//! テスト用の Sink と補助型

use std::io::Write;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::{OutputType, RedemptionRecord, SinkError};
use crate::ports::RedemptionSink;

/// Write を複数箇所から覗けるバッファ
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().unwrap().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

/// 受け取った記録を保存するだけの Sink
///
/// factory から毎回新しいインスタンスが作られても、`received` は共有されます。
#[derive(Clone)]
pub struct SpySink {
    output: OutputType,
    received: Arc<Mutex<Vec<RedemptionRecord>>>,
    healthy: bool,
    fail_with: Option<String>,
}

impl SpySink {
    pub fn new(output: OutputType) -> Self {
        Self {
            output,
            received: Arc::new(Mutex::new(Vec::new())),
            healthy: true,
            fail_with: None,
        }
    }

    pub fn unhealthy(mut self) -> Self {
        self.healthy = false;
        self
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.fail_with = Some(message.to_string());
        self
    }

    pub fn received(&self) -> Vec<RedemptionRecord> {
        self.received.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedemptionSink for SpySink {
    fn output_type(&self) -> OutputType {
        self.output
    }

    async fn consume(&self, record: RedemptionRecord) -> Result<(), SinkError> {
        if let Some(message) = &self.fail_with {
            return Err(SinkError::unavailable(self.output, message.clone()));
        }
        self.received.lock().unwrap().push(record);
        Ok(())
    }

    async fn health(&self) -> bool {
        self.healthy
    }
}
