//! # Local Signer
//!
//! An in-process secp256k1 key that produces owner approvals. Used by
//! operator tooling and tests; production owners typically sign with a
//! hardware wallet and submit the resulting bytes.
//!
//! ## Security Invariant
//!
//! Secret material never appears in `Debug` output, and intermediate
//! buffers holding decoded key bytes are zeroized on drop.

use std::fmt;

use isw_core::{hex, Address, Nonce};
use k256::ecdsa::SigningKey;
use rand_core::OsRng;
use zeroize::Zeroizing;

use crate::eip712::{Eip712Domain, RecipientAction};
use crate::error::CryptoError;
use crate::recovery::address_of;
use crate::signature::SignatureBytes;

/// A secp256k1 signing key and its derived address.
#[derive(Clone)]
pub struct LocalSigner {
    key: SigningKey,
    address: Address,
}

impl LocalSigner {
    /// Build a signer from 32 secret-key bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CryptoError::InvalidSecretKey`] if the bytes are zero or
    /// not below the curve order.
    pub fn from_bytes(secret: &[u8]) -> Result<Self, CryptoError> {
        let key = SigningKey::from_slice(secret)
            .map_err(|e| CryptoError::InvalidSecretKey(e.to_string()))?;
        let address = address_of(key.verifying_key());
        Ok(Self { key, address })
    }

    /// Build a signer from a hex secret (optional `0x`, left-padded).
    pub fn from_hex(secret: &str) -> Result<Self, CryptoError> {
        let bytes = Zeroizing::new(
            hex::decode_fixed::<32>(secret.trim(), true)
                .ok_or_else(|| CryptoError::HexDecode("secret key is not 32-byte hex".into()))?,
        );
        Self::from_bytes(&bytes[..])
    }

    /// Generate a fresh key from the operating system RNG.
    pub fn generate() -> Self {
        let key = SigningKey::random(&mut OsRng);
        let address = address_of(key.verifying_key());
        Self { key, address }
    }

    /// The signer's account address.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Sign a 32-byte prehashed digest, returning `r ‖ s ‖ v` with
    /// `v ∈ {27, 28}` and low `s`.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Result<SignatureBytes, CryptoError> {
        let (sig, recovery_id) = self
            .key
            .sign_prehash_recoverable(digest)
            .map_err(|e| CryptoError::SigningFailed(e.to_string()))?;
        let mut out = Vec::with_capacity(65);
        out.extend_from_slice(&sig.to_bytes());
        out.push(27 + recovery_id.to_byte());
        Ok(SignatureBytes::new(out))
    }

    /// Approve a whitelist mutation under `domain`.
    pub fn sign_recipient_action(
        &self,
        domain: &Eip712Domain,
        action: RecipientAction,
        recipient: &Address,
        nonce: Nonce,
    ) -> Result<SignatureBytes, CryptoError> {
        self.sign_digest(&action.digest(domain, recipient, nonce))
    }
}

impl fmt::Debug for LocalSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalSigner")
            .field("address", &self.address)
            .field("key", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recovery::{Secp256k1Recovery, SignerRecovery};

    #[test]
    fn well_known_key_addresses() {
        let one = LocalSigner::from_hex("0x01").unwrap();
        assert_eq!(
            one.address(),
            Address::from_hex("0x7E5F4552091A69125d5DfCb7b8C2659029395Bdf").unwrap()
        );
        let two = LocalSigner::from_hex("02").unwrap();
        assert_eq!(
            two.address(),
            Address::from_hex("0x2B5AD5c4795c026514f8317c7a215E218DcCD6cF").unwrap()
        );
    }

    #[test]
    fn rejects_invalid_secrets() {
        assert!(matches!(
            LocalSigner::from_bytes(&[0u8; 32]),
            Err(CryptoError::InvalidSecretKey(_))
        ));
        assert!(matches!(
            LocalSigner::from_bytes(&[0xffu8; 32]),
            Err(CryptoError::InvalidSecretKey(_))
        ));
        assert!(matches!(
            LocalSigner::from_hex("not hex"),
            Err(CryptoError::HexDecode(_))
        ));
    }

    #[test]
    fn signatures_are_low_s_with_ethereum_v() {
        let signer = LocalSigner::generate();
        for i in 0u8..16 {
            let sig = signer.sign_digest(&[i; 32]).unwrap();
            assert_eq!(sig.as_bytes().len(), 65);
            assert!(matches!(sig.as_bytes()[64], 27 | 28));
            assert!(sig.parse().is_ok());
        }
    }

    #[test]
    fn signing_is_deterministic() {
        let signer = LocalSigner::from_hex("0x01").unwrap();
        assert_eq!(
            signer.sign_digest(&[7u8; 32]).unwrap(),
            signer.sign_digest(&[7u8; 32]).unwrap()
        );
    }

    #[test]
    fn recipient_action_round_trip() {
        let signer = LocalSigner::generate();
        let domain = Eip712Domain::new("InnocentSupportWallet", "1", 31337, Address::from_low_u64(1));
        let recipient = Address::from_low_u64(0xabc);
        let sig = signer
            .sign_recipient_action(&domain, RecipientAction::Remove, &recipient, Nonce::new(5))
            .unwrap();
        let digest = RecipientAction::Remove.digest(&domain, &recipient, Nonce::new(5));
        assert_eq!(Secp256k1Recovery.recover(&digest, &sig).unwrap(), signer.address());
    }

    #[test]
    fn debug_redacts_key() {
        let signer = LocalSigner::from_hex("0x01").unwrap();
        let dbg = format!("{signer:?}");
        assert!(dbg.contains("[REDACTED]"));
        assert!(dbg.contains("0x7e5f4552091a69125d5dfcb7b8c2659029395bdf"));
    }
}
