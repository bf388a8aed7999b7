use common_utils::{
    date_time,
    id_type::TransactionId,
    types::{MinorUnit, StringMajorUnit},
};
use time::OffsetDateTime;

use crate::errors::StoreError;

/// Lifecycle of a donation. Only `Pending` ever changes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    serde::Serialize,
    serde::Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum DonationStatus {
    Pending,
    Completed,
    Failed,
}

impl DonationStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    pub fn can_transition_to(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Completed) | (Self::Pending, Self::Failed)
        )
    }
}

/// A donation keyed by its transaction id.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DonationRecord {
    pub txnid: TransactionId,
    pub amount: StringMajorUnit,
    pub email: String,
    pub firstname: String,
    pub phone: Option<String>,
    pub status: DonationStatus,
    pub payu_money_id: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Result of asking a store to move a donation to a new status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusTransition {
    /// The status changed with this call
    Applied(DonationRecord),
    /// The donation already had the requested status, nothing changed
    AlreadyApplied(DonationRecord),
}

impl StatusTransition {
    pub fn record(&self) -> &DonationRecord {
        match self {
            Self::Applied(record) | Self::AlreadyApplied(record) => record,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }
}

impl DonationRecord {
    pub fn new_pending(
        txnid: TransactionId,
        amount: MinorUnit,
        email: String,
        firstname: String,
        phone: Option<String>,
    ) -> Self {
        let now = date_time::now();
        Self {
            txnid,
            amount: amount.to_major_unit_as_string(),
            email,
            firstname,
            phone,
            status: DonationStatus::Pending,
            payu_money_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Moves the record to `next`, enforcing `pending -> completed | failed`.
    /// Returns `false` when the record already had that status.
    pub fn apply_status(
        &mut self,
        next: DonationStatus,
        payu_money_id: Option<String>,
    ) -> Result<bool, StoreError> {
        if self.status == next {
            return Ok(false);
        }
        if !self.status.can_transition_to(next) {
            return Err(StoreError::InvalidStatusTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        if payu_money_id.is_some() {
            self.payu_money_id = payu_money_id;
        }
        self.updated_at = date_time::now();
        Ok(true)
    }
}
