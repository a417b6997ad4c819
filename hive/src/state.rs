//! Serializable hive state.

use crate::config::AdmissionScope;
use crate::events::HiveEvent;
use crate::request::RequestLedger;
use crate::HiveError;
use hive_types::{Address, BasisPoints, MemberId, PublicKey};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Everything a hive owns, minus its collaborator handles.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HiveState {
    pub address: Address,
    pub owner: Address,
    /// Key that signs admission credentials; `owner` is derived from it.
    pub owner_key: PublicKey,
    pub own_identity: MemberId,
    pub fee_rate: BasisPoints,
    pub data_uri: String,
    pub admission_scope: AdmissionScope,
    pub max_beneficiaries: usize,
    pub members: BTreeSet<MemberId>,
    pub requests: RequestLedger,
    pub events: Vec<HiveEvent>,
}

impl HiveState {
    /// Encode with bincode.
    pub fn save(&self) -> Result<Vec<u8>, HiveError> {
        bincode::serialize(self).map_err(|e| HiveError::State(e.to_string()))
    }

    /// Decode a blob produced by [`HiveState::save`].
    pub fn load(data: &[u8]) -> Result<Self, HiveError> {
        bincode::deserialize(data).map_err(|e| HiveError::State(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hive_crypto::{contract_address, derive_address, keypair_from_seed};

    #[test]
    fn truncated_blob_is_a_state_error() {
        let owner = keypair_from_seed(&[1u8; 32]);
        let owner_addr = derive_address(&owner.public);
        let state = HiveState {
            address: contract_address(&owner_addr, 0),
            owner: owner_addr,
            owner_key: owner.public,
            own_identity: MemberId::new(3),
            fee_rate: BasisPoints::new(1000),
            data_uri: String::new(),
            admission_scope: AdmissionScope::AnyHolder,
            max_beneficiaries: 64,
            members: [MemberId::new(2), MemberId::new(3)].into_iter().collect(),
            requests: RequestLedger::new(),
            events: Vec::new(),
        };
        let bytes = state.save().unwrap();
        assert_eq!(HiveState::load(&bytes).unwrap(), state);
        assert!(matches!(
            HiveState::load(&bytes[..bytes.len() / 2]),
            Err(HiveError::State(_))
        ));
    }
}
