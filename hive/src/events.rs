//! Notifications emitted by successful operations, for off-chain indexing.

use hive_types::{Address, Amount, BasisPoints, JobId, MemberId, RequestId};
use serde::{Deserialize, Serialize};

use crate::HiveError;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum HiveEvent {
    /// Emitted by the factory.
    HiveCreated {
        hive: Address,
        owner: Address,
        own_identity: MemberId,
        fee_rate: BasisPoints,
    },
    MemberJoined {
        member: MemberId,
        account: Address,
    },
    ProposalRequestCreated {
        request_id: RequestId,
        requester: MemberId,
        job_id: JobId,
    },
    ProposalRequestExecuted {
        request_id: RequestId,
        executor: MemberId,
        job_id: JobId,
    },
    FundsShared {
        request_id: RequestId,
        amount: Amount,
        fee: Amount,
        remainder: Amount,
    },
    DataUriUpdated {
        data_uri: String,
    },
}

impl HiveEvent {
    /// One JSON object per event, for indexers tailing the log.
    pub fn to_json(&self) -> Result<String, HiveError> {
        serde_json::to_string(self).map_err(|e| HiveError::State(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_names_the_variant() {
        let event = HiveEvent::FundsShared {
            request_id: RequestId::new(3),
            amount: Amount::new(600),
            fee: Amount::new(60),
            remainder: Amount::ZERO,
        };
        let json = event.to_json().unwrap();
        assert!(json.starts_with("{\"FundsShared\":"));
        let back: HiveEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
