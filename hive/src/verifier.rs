//! Admission signature verification.

use crate::config::AdmissionScope;
use crate::HiveError;
use hive_types::{Address, PublicKey, Signature};

/// Checks admission credentials for one hive against its owner's key.
pub struct SignatureVerifier<'a> {
    owner: &'a PublicKey,
    hive: &'a Address,
    scope: AdmissionScope,
}

impl<'a> SignatureVerifier<'a> {
    pub fn new(owner: &'a PublicKey, hive: &'a Address, scope: AdmissionScope) -> Self {
        Self { owner, hive, scope }
    }

    /// Accept `signature` as `joiner`'s admission to the hive.
    ///
    /// Under [`AdmissionScope::AnyHolder`] the joiner is not part of the
    /// signed message, so one credential admits any number of accounts.
    pub fn verify(&self, joiner: &Address, signature: &Signature) -> Result<(), HiveError> {
        let bound = match self.scope {
            AdmissionScope::AnyHolder => None,
            AdmissionScope::Joiner => Some(joiner),
        };
        if hive_crypto::verify_admission(self.owner, self.hive, bound, signature) {
            Ok(())
        } else {
            Err(HiveError::InvalidSignature)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_crypto::{contract_address, derive_address, keypair_from_seed, sign_admission};

    fn setup() -> (hive_types::KeyPair, Address, Address, Address) {
        let owner = keypair_from_seed(&[1u8; 32]);
        let hive = contract_address(&derive_address(&owner.public), 0);
        let bob = derive_address(&keypair_from_seed(&[2u8; 32]).public);
        let carol = derive_address(&keypair_from_seed(&[3u8; 32]).public);
        (owner, hive, bob, carol)
    }

    #[test]
    fn bearer_credential_admits_anyone() {
        let (owner, hive, bob, carol) = setup();
        let sig = sign_admission(&owner.private, &hive, None);
        let verifier = SignatureVerifier::new(&owner.public, &hive, AdmissionScope::AnyHolder);
        assert!(verifier.verify(&bob, &sig).is_ok());
        assert!(verifier.verify(&carol, &sig).is_ok());
    }

    #[test]
    fn bound_credential_admits_only_joiner() {
        let (owner, hive, bob, carol) = setup();
        let sig = sign_admission(&owner.private, &hive, Some(&bob));
        let verifier = SignatureVerifier::new(&owner.public, &hive, AdmissionScope::Joiner);
        assert!(verifier.verify(&bob, &sig).is_ok());
        assert!(matches!(
            verifier.verify(&carol, &sig),
            Err(HiveError::InvalidSignature)
        ));
    }

    #[test]
    fn bearer_credential_rejected_under_joiner_scope() {
        let (owner, hive, bob, _) = setup();
        let sig = sign_admission(&owner.private, &hive, None);
        let verifier = SignatureVerifier::new(&owner.public, &hive, AdmissionScope::Joiner);
        assert!(verifier.verify(&bob, &sig).is_err());
    }

    #[test]
    fn foreign_signer_rejected() {
        let (owner, hive, bob, _) = setup();
        let intruder = keypair_from_seed(&[9u8; 32]);
        let sig = sign_admission(&intruder.private, &hive, None);
        let verifier = SignatureVerifier::new(&owner.public, &hive, AdmissionScope::AnyHolder);
        assert!(matches!(
            verifier.verify(&bob, &sig),
            Err(HiveError::InvalidSignature)
        ));
    }
}
