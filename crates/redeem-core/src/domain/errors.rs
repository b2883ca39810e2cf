//! Errors - エラー型と分類
//!
//! # 分類
//! - **RedeemError::InvalidVoucher**: 検証で拒否（I/O の前、リトライ無意味）
//! - **SinkError**: Sink の I/O 失敗（そのまま呼び出し元へ）

use super::output_type::OutputType;

type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// SinkError は Sink::consume の失敗
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// 下位の I/O（ファイル、DB、キュー接続）が失敗
    #[error("{output} sink unavailable: {source}")]
    Unavailable {
        output: OutputType,
        #[source]
        source: BoxError,
    },

    #[error("failed to encode redemption record: {0}")]
    Encode(#[from] serde_json::Error),
}

impl SinkError {
    pub fn unavailable(output: OutputType, source: impl Into<BoxError>) -> Self {
        SinkError::Unavailable {
            output,
            source: source.into(),
        }
    }
}

/// RedeemError は RedemptionService::consume の失敗
#[derive(Debug, thiserror::Error)]
pub enum RedeemError {
    #[error("Voucher {0} doesn't exist")]
    InvalidVoucher(String),

    /// Sink のエラーを包まずに通す
    #[error(transparent)]
    Sink(#[from] SinkError),
}
