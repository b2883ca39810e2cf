//! SinkFactory - OutputType から RedemptionSink を作る（Factory Method）
//!
//! # 学習ポイント
//! - HashMap に型消去したコンストラクタ（`Arc<dyn Fn>`）を登録
//! - 呼び出しごとに新しいインスタンスを返す（Sink は状態を持たない）
//! - 未登録 / 未知のタグは ConsoleSink にフォールバック

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::{QueueTarget, SinkConfig};
use crate::domain::OutputType;
use crate::impls::{ConsoleSink, DatabaseSink, FileSink, NullSink, QueueSink};
use crate::ports::RedemptionSink;

/// SinkConfig から Sink を組み立てるコンストラクタ
pub type SinkConstructor = Arc<dyn Fn(&SinkConfig) -> Box<dyn RedemptionSink> + Send + Sync>;

/// SinkFactory は OutputType ごとのコンストラクタを保持
///
/// # 使用例
/// ```ignore
/// let factory = SinkFactory::new(SinkConfig::init_from_env()?);
/// let sink = factory.create(OutputType::File);
/// sink.consume(record).await?;
/// ```
pub struct SinkFactory {
    config: SinkConfig,
    constructors: HashMap<OutputType, SinkConstructor>,
}

impl SinkFactory {
    /// 5 種類すべての Sink を登録済みの Factory
    pub fn new(config: SinkConfig) -> Self {
        let mut factory = Self::empty(config);
        factory.register(OutputType::Console, |_| Box::new(ConsoleSink::new()));
        factory.register(OutputType::File, |config| {
            Box::new(FileSink::new(config.file_path.clone()))
        });
        factory.register(OutputType::Database, |config| {
            Box::new(DatabaseSink::new(config.database_path.clone()))
        });
        factory.register(OutputType::Queue, |config| {
            Box::new(QueueSink::new(
                QueueTarget::resolve(config),
                config.queue_name.clone(),
            ))
        });
        factory.register(OutputType::Null, |_| Box::new(NullSink));
        factory
    }

    /// 何も登録されていない Factory（全て Console にフォールバック）
    pub fn empty(config: SinkConfig) -> Self {
        Self {
            config,
            constructors: HashMap::new(),
        }
    }

    /// コンストラクタを登録（既存の登録は置き換える）
    pub fn register<F>(&mut self, output: OutputType, constructor: F)
    where
        F: Fn(&SinkConfig) -> Box<dyn RedemptionSink> + Send + Sync + 'static,
    {
        self.constructors.insert(output, Arc::new(constructor));
    }

    pub fn registered_outputs(&self) -> Vec<OutputType> {
        self.constructors.keys().copied().collect()
    }

    pub fn create(&self, output: OutputType) -> Box<dyn RedemptionSink> {
        match self.constructors.get(&output) {
            Some(constructor) => constructor(&self.config),
            None => {
                tracing::warn!(%output, "no sink registered, falling back to CONSOLE");
                self.console()
            }
        }
    }

    /// タグ文字列から作る（未知のタグは Console）
    pub fn create_for_tag(&self, tag: &str) -> Box<dyn RedemptionSink> {
        self.create(OutputType::from_tag(tag))
    }

    fn console(&self) -> Box<dyn RedemptionSink> {
        match self.constructors.get(&OutputType::Console) {
            Some(constructor) => constructor(&self.config),
            None => Box::new(ConsoleSink::new()),
        }
    }
}

impl Default for SinkFactory {
    fn default() -> Self {
        Self::new(SinkConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SpySink;
    use rstest::rstest;

    #[rstest]
    #[case::console("CONSOLE", OutputType::Console)]
    #[case::file("FILE", OutputType::File)]
    #[case::database("DATABASE", OutputType::Database)]
    #[case::db("DB", OutputType::Database)]
    #[case::queue("QUEUE", OutputType::Queue)]
    #[case::null("NULL", OutputType::Null)]
    fn creates_sink_matching_tag(#[case] tag: &str, #[case] expected: OutputType) {
        let factory = SinkFactory::default();
        assert_eq!(factory.create_for_tag(tag).output_type(), expected);
    }

    #[test]
    fn unknown_tag_falls_back_to_console() {
        let factory = SinkFactory::default();
        assert_eq!(
            factory.create_for_tag("CARRIER_PIGEON").output_type(),
            OutputType::Console
        );
    }

    #[test]
    fn unregistered_output_falls_back_to_console() {
        let factory = SinkFactory::empty(SinkConfig::default());
        assert_eq!(factory.create(OutputType::Queue).output_type(), OutputType::Console);
        assert!(factory.registered_outputs().is_empty());
    }

    #[test]
    fn registers_all_outputs_by_default() {
        let mut registered = SinkFactory::default().registered_outputs();
        registered.sort_by_key(|o| o.as_str());
        let mut all = OutputType::ALL.to_vec();
        all.sort_by_key(|o| o.as_str());
        assert_eq!(registered, all);
    }

    #[tokio::test]
    async fn registration_replaces_default_constructor() {
        let spy = SpySink::new(OutputType::Queue);
        let mut factory = SinkFactory::default();
        factory.register(OutputType::Queue, {
            let spy = spy.clone();
            move |_| Box::new(spy.clone())
        });

        let sink = factory.create(OutputType::Queue);
        sink.consume(crate::domain::RedemptionRecord::new("V1", chrono::Utc::now()))
            .await
            .unwrap();
        assert_eq!(spy.received().len(), 1);
    }

    #[test]
    fn constructors_receive_factory_config() {
        let config = SinkConfig {
            rabbit_host: Some("rabbit.local".to_string()),
            ..SinkConfig::default()
        };
        let mut factory = SinkFactory::empty(config);
        factory.register(OutputType::Queue, |config| {
            assert_eq!(config.rabbit_host.as_deref(), Some("rabbit.local"));
            Box::new(SpySink::new(OutputType::Queue))
        });
        assert_eq!(factory.create(OutputType::Queue).output_type(), OutputType::Queue);
    }
}
