//! redeem-core
//!
//! バウチャー利用記録を、差し替え可能な出力先（Sink）に書き出すためのライブラリ。
//!
//! # モジュール構成
//! - **domain**: ドメインモデル（RedemptionRecord, OutputType, ValidVoucherSet, errors）
//! - **ports**: 抽象化レイヤー（RedemptionSink, Clock）
//! - **impls**: Sink の実装（Console, File, Database, Queue, Null）
//! - **app**: アプリケーションロジック（SinkFactory, RedemptionService, HealthChecker, AppBuilder）
//! - **config**: 環境変数からの設定（SinkConfig, QueueTarget）

pub mod app;
pub mod config;
pub mod domain;
pub mod impls;
pub mod ports;

#[cfg(test)]
mod test_support;
