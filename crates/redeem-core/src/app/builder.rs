//! AppBuilder - アプリケーションの構築とワイヤリング
//!
//! # 学習ポイント
//! - Builder パターンの実装
//! - 起動時検証（Fail-fast 設計）

use std::sync::Arc;

use crate::app::factory::SinkFactory;
use crate::app::health::HealthChecker;
use crate::app::service::RedemptionService;
use crate::config::SinkConfig;
use crate::domain::{OutputType, ValidVoucherSet};
use crate::ports::{Clock, RedemptionSink, SystemClock};

/// AppBuilder は RedemptionService と HealthChecker を同じ SinkFactory で組み立てる
///
/// # 使用例
/// ```ignore
/// let app = AppBuilder::new(SinkConfig::init_from_env()?)
///     .valid_vouchers(ValidVoucherSet::new(["V1"]))
///     .expect_outputs(&[OutputType::File, OutputType::Database])
///     .build()?;
/// app.service.consume("V1", OutputType::File).await?;
/// ```
///
/// # Fail-fast 設計
/// - expect_outputs() で期待される OutputType を登録
/// - build() 時に「期待集合 ⊆ 登録済み集合」をチェック
/// - 不足があれば BuildError を返す（Console への暗黙のフォールバックを防ぐ）
pub struct AppBuilder {
    factory: SinkFactory,
    valid: ValidVoucherSet,
    clock: Arc<dyn Clock>,
    expected_outputs: Option<Vec<OutputType>>,
}

/// BuildError はアプリケーション構築時のエラー
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("Missing output types: {0:?}. These outputs were expected but not registered.")]
    MissingOutputTypes(Vec<OutputType>),
}

impl AppBuilder {
    /// 5 種類の Sink を登録済みの状態から始める
    pub fn new(config: SinkConfig) -> Self {
        Self::with_factory(SinkFactory::new(config))
    }

    pub fn with_factory(factory: SinkFactory) -> Self {
        Self {
            factory,
            valid: ValidVoucherSet::default(),
            clock: Arc::new(SystemClock),
            expected_outputs: None,
        }
    }

    pub fn valid_vouchers(mut self, valid: ValidVoucherSet) -> Self {
        self.valid = valid;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Sink のコンストラクタを登録（既定の登録を置き換える）
    pub fn register<F>(mut self, output: OutputType, constructor: F) -> Self
    where
        F: Fn(&SinkConfig) -> Box<dyn RedemptionSink> + Send + Sync + 'static,
    {
        self.factory.register(output, constructor);
        self
    }

    pub fn expect_outputs(mut self, outputs: &[OutputType]) -> Self {
        self.expected_outputs = Some(outputs.to_vec());
        self
    }

    pub fn build(self) -> Result<App, BuildError> {
        if let Some(expected_outputs) = &self.expected_outputs {
            let registered = self.factory.registered_outputs();
            let missing: Vec<OutputType> = expected_outputs
                .iter()
                .filter(|x| !registered.contains(x))
                .copied()
                .collect();
            if !missing.is_empty() {
                return Err(BuildError::MissingOutputTypes(missing));
            }
        }

        let factory = Arc::new(self.factory);
        Ok(App {
            service: RedemptionService::with_clock(self.valid, factory.clone(), self.clock),
            health: HealthChecker::new(factory),
        })
    }
}

/// App はワイヤリング済みのサービス群
pub struct App {
    pub service: RedemptionService,
    pub health: HealthChecker,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{RedeemError, RedemptionRecord};
    use crate::ports::FixedClock;
    use crate::test_support::SpySink;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_build_success() {
        let app = AppBuilder::new(SinkConfig::default())
            .expect_outputs(&OutputType::ALL)
            .build();
        assert!(app.is_ok());
    }

    #[test]
    fn test_build_missing_output_types() {
        let app = AppBuilder::with_factory(SinkFactory::empty(SinkConfig::default()))
            .register(OutputType::Null, |_| Box::new(SpySink::new(OutputType::Null)))
            .expect_outputs(&[OutputType::Null, OutputType::Queue])
            .build();
        assert!(matches!(
            app,
            Err(BuildError::MissingOutputTypes(missing)) if missing == vec![OutputType::Queue]
        ));
    }

    #[test]
    fn test_build_no_expect_outputs() {
        let app = AppBuilder::with_factory(SinkFactory::empty(SinkConfig::default())).build();
        assert!(app.is_ok());
    }

    #[tokio::test]
    async fn test_service_and_health_share_factory() {
        let at = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let spy = SpySink::new(OutputType::Database);
        let mut builder = AppBuilder::with_factory(SinkFactory::empty(SinkConfig::default()))
            .valid_vouchers(ValidVoucherSet::new(["V1"]))
            .clock(FixedClock::new(at));
        for output in OutputType::ALL {
            let spy = spy.clone();
            builder = builder.register(output, move |_| Box::new(spy.clone()));
        }
        let app = builder.build().unwrap();

        app.service.consume("V1", OutputType::Database).await.unwrap();
        assert!(matches!(
            app.service.consume("nope", OutputType::Database).await,
            Err(RedeemError::InvalidVoucher(_))
        ));
        assert_eq!(spy.received(), vec![RedemptionRecord::new("V1", at)]);
        assert!(app.health.status().await);
    }
}
