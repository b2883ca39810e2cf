//! Ports - 抽象化レイヤー
//!
//! Hexagonal Architecture の「ポート」を定義します。
//! 出力先（標準出力、ファイル、SQLite、AMQP）の詳細は impls/ に隠蔽します。

pub mod clock;
pub mod sink;

pub use self::clock::{Clock, FixedClock, SystemClock};
pub use self::sink::RedemptionSink;
