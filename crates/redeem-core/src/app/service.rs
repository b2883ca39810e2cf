//! RedemptionService - バウチャーを検証して Sink に委譲する
//!
//! # フロー
//! 1. ValidVoucherSet に含まれなければ InvalidVoucher（Sink は呼ばない）
//! 2. Clock の現在時刻で RedemptionRecord を作る
//! 3. SinkFactory で Sink を選び、consume に委譲する
//!
//! Sink のエラーはそのまま返します（リトライなし）。

use std::sync::Arc;

use crate::app::factory::SinkFactory;
use crate::domain::{OutputType, RedeemError, RedemptionRecord, ValidVoucherSet};
use crate::ports::{Clock, SystemClock};

pub struct RedemptionService {
    valid: ValidVoucherSet,
    factory: Arc<SinkFactory>,
    clock: Arc<dyn Clock>,
}

impl RedemptionService {
    pub fn new(valid: ValidVoucherSet, factory: Arc<SinkFactory>) -> Self {
        Self::with_clock(valid, factory, Arc::new(SystemClock))
    }

    pub fn with_clock(
        valid: ValidVoucherSet,
        factory: Arc<SinkFactory>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            valid,
            factory,
            clock,
        }
    }

    /// バウチャーを利用済みとして記録し、作成した記録を返す
    pub async fn consume(
        &self,
        voucher: &str,
        output: OutputType,
    ) -> Result<RedemptionRecord, RedeemError> {
        if !self.valid.contains(voucher) {
            let err = RedeemError::InvalidVoucher(voucher.to_string());
            tracing::warn!(%voucher, "{err}");
            return Err(err);
        }

        let record = RedemptionRecord::new(voucher, self.clock.now());
        let sink = self.factory.create(output);
        sink.consume(record.clone()).await?;

        tracing::debug!(%voucher, output = %sink.output_type(), "voucher redeemed");
        Ok(record)
    }

    /// タグ文字列版（未知のタグは Console）
    pub async fn consume_tag(
        &self,
        voucher: &str,
        tag: &str,
    ) -> Result<RedemptionRecord, RedeemError> {
        self.consume(voucher, OutputType::from_tag(tag)).await
    }
}
