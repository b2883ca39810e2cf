//! ValidVoucherSet - 受け付けるバウチャーの集合
//!
//! 構築後は読み取り専用です（複数タスクから共有しても安全）。

use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// ValidVoucherSet は RedemptionService が受け付けるバウチャーの集合
///
/// # 注意
/// 「使用済み」の追跡はしません。File / Database sink が履歴を書き残しても、
/// この集合は参照しないため、同じバウチャーを何度でも受け付けます。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidVoucherSet {
    vouchers: HashSet<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum VoucherSetError {
    #[error("failed to read voucher file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("voucher file {path} is not a JSON array of strings: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl ValidVoucherSet {
    pub fn new<I, S>(vouchers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            vouchers: vouchers.into_iter().map(Into::into).collect(),
        }
    }

    /// JSON 配列（`["id-1", "id-2"]`）のファイルから読み込む
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, VoucherSetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path).map_err(|source| VoucherSetError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let vouchers: Vec<String> =
            serde_json::from_slice(&bytes).map_err(|source| VoucherSetError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(vouchers))
    }

    pub fn contains(&self, voucher: &str) -> bool {
        self.vouchers.contains(voucher)
    }

    pub fn len(&self) -> usize {
        self.vouchers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ValidVoucherSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<S: Into<String>> Extend<S> for ValidVoucherSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.vouchers.extend(iter.into_iter().map(Into::into));
    }
}

impl IntoIterator for ValidVoucherSet {
    type Item = String;
    type IntoIter = std::collections::hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.vouchers.into_iter()
    }
}
