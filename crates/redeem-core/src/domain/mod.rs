//! Domain model (records, output types, voucher set, errors).

pub mod errors;
pub mod output_type;
pub mod record;
pub mod voucher;

pub use self::errors::{RedeemError, SinkError};
pub use self::output_type::{OutputType, UnknownOutputType};
pub use self::record::RedemptionRecord;
pub use self::voucher::{ValidVoucherSet, VoucherSetError};
