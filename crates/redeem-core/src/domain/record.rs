//! RedemptionRecord - 利用済みバウチャーの記録
//!
//! Sink に渡される唯一の値です。RedemptionService が検証に成功した後でのみ生成します。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// RedemptionRecord は「いつ、どのバウチャーが使われたか」を表す
///
/// # シリアライズ形式
/// ```json
/// {"voucher":"V1","timestamp":1704110400000}
/// ```
/// timestamp は epoch ミリ秒（File / Queue sink の形式と一致）。
///
/// フィールドは公開しません。生成後に書き換えられないようにするためです。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedemptionRecord {
    voucher: String,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    timestamp: DateTime<Utc>,
}

impl RedemptionRecord {
    pub fn new(voucher: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            voucher: voucher.into(),
            timestamp,
        }
    }

    pub fn voucher(&self) -> &str {
        &self.voucher
    }

    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// epoch ミリ秒（Database sink の timestamp 列）
    pub fn timestamp_millis(&self) -> i64 {
        self.timestamp.timestamp_millis()
    }
}
