//! HealthChecker - 全 Sink の生存確認

use std::sync::Arc;

use crate::app::factory::SinkFactory;
use crate::domain::OutputType;

/// HealthChecker は OutputType::ALL の全 Sink の health() を AND する
///
/// どの Sink が落ちているかは戻り値に含めません（ログにのみ出します）。
pub struct HealthChecker {
    factory: Arc<SinkFactory>,
}

impl HealthChecker {
    pub fn new(factory: Arc<SinkFactory>) -> Self {
        Self { factory }
    }

    /// 全 Sink が healthy なら true（最初に unhealthy を見つけた時点で打ち切る）
    pub async fn status(&self) -> bool {
        for output in OutputType::ALL {
            let sink = self.factory.create(output);
            if !sink.health().await {
                tracing::warn!(%output, "sink reported unhealthy");
                return false;
            }
        }
        true
    }
}
