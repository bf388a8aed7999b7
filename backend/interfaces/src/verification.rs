use common_utils::{crypto, CustomResult};
use domain_types::errors::DonationError;
use error_stack::ResultExt;

/// Core trait for authenticating a payload posted by a payment gateway
pub trait SourceVerification<Payload> {
    /// Shared secret mixed into the signature
    fn get_secrets(&self) -> CustomResult<Vec<u8>, DonationError>;

    /// Get the verification algorithm being used
    fn get_algorithm(&self) -> Box<dyn crypto::VerifySignature + Send>;

    /// Get the signature/hash value from the payload for verification
    fn get_signature(&self, payload: &Payload) -> CustomResult<Vec<u8>, DonationError>;

    /// Get the message that should be verified
    fn get_message(&self, payload: &Payload, secrets: &[u8])
        -> CustomResult<Vec<u8>, DonationError>;

    /// Perform the verification
    fn verify(&self, payload: &Payload) -> CustomResult<bool, DonationError> {
        let algorithm = self.get_algorithm();
        let extracted_secrets = self.get_secrets()?;
        let signature = self.get_signature(payload)?;
        let message = self.get_message(payload, &extracted_secrets)?;

        // Verify the signature against the message
        algorithm
            .verify_signature(&extracted_secrets, &signature, &message)
            .change_context(DonationError::SourceVerificationFailed)
    }
}
