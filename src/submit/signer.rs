use ed25519_dalek::{Signature, Signer as _, SigningKey as DalekSigningKey, Verifier, VerifyingKey};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::ledger::PayloadMap;

/// Ed25519 signing key supplied per submission call.
///
/// Borrowed for the duration of the call and never retained by the
/// submitter; Debug output is redacted.
pub struct SigningKey {
    inner: DalekSigningKey,
}

impl SigningKey {
    pub fn from_bytes(bytes: &[u8; 32]) -> Self {
        Self {
            inner: DalekSigningKey::from_bytes(bytes),
        }
    }

    pub fn generate() -> Self {
        Self {
            inner: DalekSigningKey::generate(&mut rand::rngs::OsRng),
        }
    }

    pub fn public_key_bytes(&self) -> [u8; 32] {
        self.inner.verifying_key().to_bytes()
    }

    pub fn public_key_hex(&self) -> String {
        hex::encode(self.public_key_bytes())
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<redacted>)")
    }
}

/// A commitment payload signed for broadcast.
///
/// The signed message is the JSON encoding of the payload; serde_json
/// orders object keys, so the encoding is canonical for a given payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignedCommitment {
    pub payload: PayloadMap,
    #[serde(with = "hex::serde")]
    pub signature: Vec<u8>,
    #[serde(with = "hex::serde")]
    pub signer_public_key: Vec<u8>,
    /// Fee the submitter is willing to pay, in the ledger's native unit
    pub fee: u64,
}

impl SignedCommitment {
    pub fn seal(payload: PayloadMap, key: &SigningKey, fee: u64) -> Self {
        let message = canonical_bytes(&payload);
        let signature = key.inner.sign(&message);
        Self {
            payload,
            signature: signature.to_bytes().to_vec(),
            signer_public_key: key.public_key_bytes().to_vec(),
            fee,
        }
    }

    /// Check the signature against the embedded public key
    pub fn verify_signature(&self) -> bool {
        let Ok(pk_bytes) = <[u8; 32]>::try_from(self.signer_public_key.as_slice()) else {
            return false;
        };
        let Ok(verifying_key) = VerifyingKey::from_bytes(&pk_bytes) else {
            return false;
        };
        let Ok(sig_bytes) = <[u8; 64]>::try_from(self.signature.as_slice()) else {
            return false;
        };
        let signature = Signature::from_bytes(&sig_bytes);
        verifying_key
            .verify(&canonical_bytes(&self.payload), &signature)
            .is_ok()
    }
}

fn canonical_bytes(payload: &PayloadMap) -> Vec<u8> {
    // Map serialization cannot fail for JSON-native values
    serde_json::to_vec(&Value::Object(payload.clone())).unwrap_or_default()
}
