//! Donation persistence backed by process memory.

use std::collections::HashMap;

use common_utils::{id_type::TransactionId, CustomResult};
use domain_types::{
    donation::{DonationRecord, DonationStatus, StatusTransition},
    errors::StoreError,
};
use error_stack::report;
use interfaces::store::DonationStore;
use tokio::sync::RwLock;

/// Records live for the lifetime of the process. Status changes happen under
/// the write lock, so concurrent callbacks for one txnid apply at most once.
#[derive(Debug, Default)]
pub struct InMemoryDonationStore {
    donations: RwLock<HashMap<TransactionId, DonationRecord>>,
}

impl InMemoryDonationStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.donations.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.donations.read().await.is_empty()
    }
}

#[async_trait::async_trait]
impl DonationStore for InMemoryDonationStore {
    async fn create_if_absent(&self, record: DonationRecord) -> CustomResult<bool, StoreError> {
        let mut donations = self.donations.write().await;
        if donations.contains_key(&record.txnid) {
            tracing::debug!(txnid = %record.txnid, "donation already recorded");
            return Ok(false);
        }
        tracing::debug!(txnid = %record.txnid, "recording donation");
        donations.insert(record.txnid.clone(), record);
        Ok(true)
    }

    async fn transition_status(
        &self,
        txnid: &TransactionId,
        status: DonationStatus,
        payu_money_id: Option<String>,
    ) -> CustomResult<StatusTransition, StoreError> {
        let mut donations = self.donations.write().await;
        let record = donations.get_mut(txnid).ok_or_else(|| {
            report!(StoreError::NotFound {
                txnid: txnid.to_string(),
            })
        })?;

        let applied = record
            .apply_status(status, payu_money_id)
            .map_err(|error| report!(error).attach_printable(format!("txnid: {txnid}")))?;

        Ok(if applied {
            StatusTransition::Applied(record.clone())
        } else {
            StatusTransition::AlreadyApplied(record.clone())
        })
    }

    async fn find(&self, txnid: &TransactionId) -> CustomResult<Option<DonationRecord>, StoreError> {
        Ok(self.donations.read().await.get(txnid).cloned())
    }
}
