//! # Signer Recovery
//!
//! Maps `(digest, signature)` to the address of the key that produced it.
//! The registry holds a `dyn SignerRecovery` so tests and alternative
//! signature schemes can be plugged in behind the same seam.

use isw_core::Address;
use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use k256::elliptic_curve::sec1::ToEncodedPoint;

use crate::error::CryptoError;
use crate::keccak::address_from_public_key;
use crate::signature::SignatureBytes;

/// Recovers the signer address of a prehashed digest.
pub trait SignerRecovery: Send + Sync {
    /// Recover the address that signed `digest`.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError`] if the signature is malformed or does not
    /// correspond to any public key.
    fn recover(&self, digest: &[u8; 32], signature: &SignatureBytes)
        -> Result<Address, CryptoError>;
}

/// ECDSA public-key recovery over secp256k1.
#[derive(Debug, Clone, Copy, Default)]
pub struct Secp256k1Recovery;

impl SignerRecovery for Secp256k1Recovery {
    fn recover(
        &self,
        digest: &[u8; 32],
        signature: &SignatureBytes,
    ) -> Result<Address, CryptoError> {
        let parsed = signature.parse()?;
        let sig = Signature::from_slice(&parsed.rs)
            .map_err(|e| CryptoError::RecoveryFailed(format!("invalid r/s: {e}")))?;
        let recovery_id = RecoveryId::from_byte(parsed.recovery_id)
            .ok_or(CryptoError::InvalidRecoveryId(parsed.recovery_id))?;
        let key = VerifyingKey::recover_from_prehash(digest, &sig, recovery_id)
            .map_err(|e| CryptoError::RecoveryFailed(e.to_string()))?;
        Ok(address_of(&key))
    }
}

/// The account address of a secp256k1 public key.
pub fn address_of(key: &VerifyingKey) -> Address {
    let point = key.as_affine().to_encoded_point(false);
    let mut xy = [0u8; 64];
    // Uncompressed SEC1 is 0x04 ‖ x ‖ y.
    xy.copy_from_slice(&point.as_bytes()[1..]);
    address_from_public_key(&xy)
}
