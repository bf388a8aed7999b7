//! Common ID types

use std::fmt;

use rand::Rng;

use crate::{consts, date_time};

/// Identifier correlating an order with its gateway callback.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct TransactionId(String);

impl TransactionId {
    /// `DN` + unix millis + random alphanumerics. The timestamp keeps ids
    /// roughly sortable, the random tail separates requests that land in the
    /// same millisecond.
    pub fn generate() -> Self {
        let mut rng = rand::thread_rng();
        let random_part: String = (0..consts::TRANSACTION_ID_RANDOM_LENGTH)
            .map(|_| consts::ALPHABETS[rng.gen_range(0..consts::ALPHABETS.len())])
            .collect();
        Self(format!(
            "{}{}{}",
            consts::TRANSACTION_ID_PREFIX,
            date_time::now_unix_timestamp_millis(),
            random_part
        ))
    }

    /// Wraps an id received from a caller or the gateway without validation
    pub fn new_unchecked(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn get_string_repr(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for TransactionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
