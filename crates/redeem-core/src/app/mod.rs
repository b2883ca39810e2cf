//! App - アプリケーション層
//!
//! ports を組み合わせてアプリケーションロジックを実装します。
//!
//! # 主要コンポーネント
//! - **SinkFactory**: OutputType → RedemptionSink（Factory Method）
//! - **RedemptionService**: 検証してから Sink に委譲
//! - **HealthChecker**: 全 Sink の health() の AND
//! - **AppBuilder**: 上記のワイヤリングと起動時検証

pub mod builder;
pub mod factory;
pub mod health;
pub mod service;

pub use self::builder::{App, AppBuilder, BuildError};
pub use self::factory::{SinkConstructor, SinkFactory};
pub use self::health::HealthChecker;
pub use self::service::RedemptionService;
