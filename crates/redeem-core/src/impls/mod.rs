//! Impls - RedemptionSink の実装
//!
//! # 含まれる実装
//! - **ConsoleSink**: 標準出力に JSON 1 行
//! - **FileSink**: JSON 配列ファイル（JsonFileStore）
//! - **DatabaseSink**: SQLite（sqlx）
//! - **QueueSink**: AMQP（lapin）
//! - **NullSink**: 何もしない

pub mod console;
pub mod database;
pub mod file;
pub mod null;
pub mod queue;

pub use self::console::ConsoleSink;
pub use self::database::DatabaseSink;
pub use self::file::{FileSink, JsonFileStore};
pub use self::null::NullSink;
pub use self::queue::QueueSink;
