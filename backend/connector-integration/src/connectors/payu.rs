pub mod constants;
pub mod transformers;


use common_utils::{crypto, id_type::TransactionId, CustomResult};
use domain_types::{api::ValidatedOrder, errors::DonationError};
use error_stack::report;
use hyperswitch_masking::PeekInterface;
use interfaces::verification::SourceVerification;

use self::transformers::{
    required_field, PayuAuthType, PayuCallbackForm, PayuEnvironment, PayuOrderPayload,
    PayuOrderRouterData, PayuRedirectUrls, PayuVerifyInput, VerifiedCallback,
};

/// PayU hosted checkout: signs outgoing orders and authenticates callbacks.
#[derive(Debug, Clone)]
pub struct Payu {
    auth: PayuAuthType,
    environment: PayuEnvironment,
    product_info: String,
}

impl Payu {
    pub fn new(auth: PayuAuthType, environment: PayuEnvironment, product_info: String) -> Self {
        Self {
            auth,
            environment,
            product_info,
        }
    }

    pub fn id(&self) -> &'static str {
        "payu"
    }

    pub fn payment_url(&self) -> &'static str {
        self.environment.payment_url()
    }

    pub fn product_info(&self) -> &str {
        &self.product_info
    }

    /// Builds the signed form the donor's browser submits to PayU.
    pub fn build_order_payload(
        &self,
        txnid: &TransactionId,
        order: &ValidatedOrder,
        redirect_urls: &PayuRedirectUrls,
    ) -> PayuOrderPayload {
        PayuOrderPayload::from(PayuOrderRouterData {
            auth: &self.auth,
            txnid,
            order,
            product_info: &self.product_info,
            redirect_urls,
        })
    }

    /// Authenticates a callback. Anything short of a matching hash is a
    /// [`DonationError::SourceVerificationFailed`].
    pub fn verify_callback(
        &self,
        callback: &PayuCallbackForm,
    ) -> CustomResult<VerifiedCallback, DonationError> {
        match self.verify(callback) {
            Ok(true) => VerifiedCallback::try_from(callback),
            Ok(false) => {
                tracing::warn!(
                    connector = self.id(),
                    txnid = ?callback.txnid,
                    "callback hash mismatch"
                );
                Err(report!(DonationError::SourceVerificationFailed))
            }
            Err(error) => {
                tracing::warn!(
                    connector = self.id(),
                    txnid = ?callback.txnid,
                    ?error,
                    "callback could not be verified"
                );
                Err(error.change_context(DonationError::SourceVerificationFailed))
            }
        }
    }
}

impl SourceVerification<PayuCallbackForm> for Payu {
    fn get_secrets(&self) -> CustomResult<Vec<u8>, DonationError> {
        Ok(self.auth.salt.peek().as_bytes().to_vec())
    }

    fn get_algorithm(&self) -> Box<dyn crypto::VerifySignature + Send> {
        Box::new(crypto::Sha512)
    }

    fn get_signature(&self, payload: &PayuCallbackForm) -> CustomResult<Vec<u8>, DonationError> {
        required_field(&payload.hash, "hash").map(|hash| hash.trim().as_bytes().to_vec())
    }

    fn get_message(
        &self,
        payload: &PayuCallbackForm,
        secrets: &[u8],
    ) -> CustomResult<Vec<u8>, DonationError> {
        let key = required_field(&payload.key, "key")?;
        if key != self.auth.key.peek().as_str() {
            return Err(report!(DonationError::SourceVerificationFailed)
                .attach_printable("callback carries a different merchant key"));
        }
        let salt = std::str::from_utf8(secrets).map_err(|_| {
            report!(DonationError::MissingConfiguration {
                key: "payu.merchant_salt"
            })
        })?;

        let message = PayuVerifyInput {
            additional_charges: payload.additional_charges(),
            status: required_field(&payload.status, "status")?,
            key,
            txnid: required_field(&payload.txnid, "txnid")?,
            amount: required_field(&payload.amount, "amount")?,
            productinfo: required_field(&payload.productinfo, "productinfo")?,
            firstname: required_field(&payload.firstname, "firstname")?,
            email: required_field(&payload.email, "email")?,
            udf: payload.udf_fields(),
            salt,
        }
        .hash_sequence()
        .join(constants::HASH_DELIMITER);

        Ok(message.into_bytes())
    }
}
