//! Admission credentials: the owner-signed message that lets an account join a group.
//!
//! The message is the `join`-tagged hash of the group address, optionally
//! extended with the joiner's address. Without the joiner the signature is a bearer
//! capability: anyone holding it may join that group, and only that group.

use hive_types::{Address, PrivateKey, PublicKey, Signature};

/// Action tag bound into every admission message.
pub const JOIN_TAG: &[u8] = b"join";

/// Build the 32-byte admission digest for `group`.
///
/// With `joiner = Some(addr)` the credential is bound to that account.
pub fn admission_message(group: &Address, joiner: Option<&Address>) -> [u8; 32] {
    match joiner {
        None => crate::tagged_hash(JOIN_TAG, &[group.as_str().as_bytes()]),
        Some(joiner) => crate::tagged_hash(
            JOIN_TAG,
            &[group.as_str().as_bytes(), joiner.as_str().as_bytes()],
        ),
    }
}

/// Sign an admission credential with the group owner's key.
pub fn sign_admission(
    owner_key: &PrivateKey,
    group: &Address,
    joiner: Option<&Address>,
) -> Signature {
    crate::sign_digest(&admission_message(group, joiner), owner_key)
}

/// Check that `signature` is the owner's admission credential for `group`.
pub fn verify_admission(
    owner: &PublicKey,
    group: &Address,
    joiner: Option<&Address>,
    signature: &Signature,
) -> bool {
    crate::verify_digest(&admission_message(group, joiner), signature, owner)
}
