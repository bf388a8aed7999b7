//! Digest and signature primitives used by gateway integrations.

use error_stack::report;
use sha2::Digest;
use subtle::ConstantTimeEq;

use crate::errors::{CryptoError, CustomResult};

/// Computes a one-way digest over a message.
pub trait GenerateDigest {
    fn generate_digest(&self, message: &[u8]) -> Vec<u8>;
}

/// Checks a signature supplied by a third party against a message.
pub trait VerifySignature {
    fn verify_signature(
        &self,
        secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError>;
}

/// SHA-512 digest. The secret is expected to already be part of the message,
/// which is how PayU style "salted" hashes work.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha512;

impl GenerateDigest for Sha512 {
    fn generate_digest(&self, message: &[u8]) -> Vec<u8> {
        sha2::Sha512::digest(message).to_vec()
    }
}

impl VerifySignature for Sha512 {
    /// `signature` is the hex encoded digest, in either case.
    fn verify_signature(
        &self,
        _secret: &[u8],
        signature: &[u8],
        msg: &[u8],
    ) -> CustomResult<bool, CryptoError> {
        let supplied =
            hex::decode(signature).map_err(|_| report!(CryptoError::InvalidSignatureEncoding))?;
        let expected = self.generate_digest(msg);
        Ok(constant_time_eq(&expected, &supplied))
    }
}

/// Lower-case hex SHA-512 of `message`
pub fn sha512_hex(message: &str) -> String {
    hex::encode(Sha512.generate_digest(message.as_bytes()))
}

/// Byte comparison whose running time does not depend on where the inputs differ
pub fn constant_time_eq(left: &[u8], right: &[u8]) -> bool {
    left.ct_eq(right).into()
}
