use common_utils::{id_type::TransactionId, CustomResult};
use domain_types::{
    donation::{DonationRecord, DonationStatus, StatusTransition},
    errors::StoreError,
};

/// Persistence capability for donation records, keyed by transaction id.
#[async_trait::async_trait]
pub trait DonationStore: Send + Sync {
    /// Inserts `record` unless a donation with the same txnid exists.
    /// Returns whether the record was inserted.
    async fn create_if_absent(&self, record: DonationRecord) -> CustomResult<bool, StoreError>;

    /// Moves a donation to `status`. Transitions out of a terminal status fail
    /// with [`StoreError::InvalidStatusTransition`].
    async fn transition_status(
        &self,
        txnid: &TransactionId,
        status: DonationStatus,
        payu_money_id: Option<String>,
    ) -> CustomResult<StatusTransition, StoreError>;

    async fn find(&self, txnid: &TransactionId) -> CustomResult<Option<DonationRecord>, StoreError>;
}
