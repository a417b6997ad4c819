//! Ed25519 signatures over 32-byte digests.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use hive_types::{PrivateKey, PublicKey, Signature};

pub fn sign_digest(digest: &[u8; 32], private_key: &PrivateKey) -> Signature {
    let signing_key = SigningKey::from_bytes(&private_key.0);
    Signature(signing_key.sign(digest).to_bytes())
}

/// Strict verification: malformed keys, non-canonical signatures and
/// small-order points all fail.
pub fn verify_digest(digest: &[u8; 32], signature: &Signature, public_key: &PublicKey) -> bool {
    VerifyingKey::from_bytes(&public_key.0)
        .map(|key| {
            let sig = ed25519_dalek::Signature::from_bytes(&signature.0);
            key.verify_strict(digest, &sig).is_ok()
        })
        .unwrap_or(false)
}
