//! Proposal requests and the per-hive ledger that stores them.

use crate::external::ProposalTerms;
use hive_types::{Amount, BasisPoints, JobId, MemberId, PlatformId, RequestId, Timestamp, Token};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Lifecycle of a proposal request. The only transition is Pending → Executed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RequestStatus {
    /// Recorded internally, not yet registered with the marketplace.
    Pending,
    /// Registered with the marketplace under the hive's identity.
    Executed,
}

/// Caller-supplied description of a bid and its internal split.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequestParams {
    pub job_id: JobId,
    pub rate_token: Token,
    pub rate_amount: Amount,
    pub platform_id: PlatformId,
    pub data_uri: String,
    pub expiration_date: Timestamp,
    pub beneficiaries: Vec<MemberId>,
    pub shares: Vec<BasisPoints>,
}

/// A pending or executed claim on a future job's proceeds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalRequest {
    pub id: RequestId,
    pub requester: MemberId,
    pub job_id: JobId,
    pub rate_token: Token,
    pub rate_amount: Amount,
    pub platform_id: PlatformId,
    pub data_uri: String,
    pub expiration_date: Timestamp,
    pub beneficiaries: Vec<MemberId>,
    /// Parallel to `beneficiaries`, summing to 10000.
    pub shares: Vec<BasisPoints>,
    pub status: RequestStatus,
    /// Cumulative released amount already distributed. Never decreases.
    pub shared_amount: Amount,
    /// Cumulative fee plus rounding remainder kept by the hive.
    pub retained_amount: Amount,
}

impl ProposalRequest {
    fn new(id: RequestId, requester: MemberId, params: ProposalRequestParams) -> Self {
        Self {
            id,
            requester,
            job_id: params.job_id,
            rate_token: params.rate_token,
            rate_amount: params.rate_amount,
            platform_id: params.platform_id,
            data_uri: params.data_uri,
            expiration_date: params.expiration_date,
            beneficiaries: params.beneficiaries,
            shares: params.shares,
            status: RequestStatus::Pending,
            shared_amount: Amount::ZERO,
            retained_amount: Amount::ZERO,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == RequestStatus::Pending
    }

    /// Marketplace terms for this request, proposed under `owner_id`.
    pub fn terms(&self, owner_id: MemberId) -> ProposalTerms {
        ProposalTerms {
            job_id: self.job_id,
            owner_id,
            platform_id: self.platform_id,
            rate_token: self.rate_token.clone(),
            rate_amount: self.rate_amount,
            data_uri: self.data_uri.clone(),
            expiration_date: self.expiration_date,
        }
    }

    /// `(beneficiary, share)` pairs in order.
    pub fn split_entries(&self) -> impl Iterator<Item = (MemberId, BasisPoints)> + '_ {
        self.beneficiaries
            .iter()
            .copied()
            .zip(self.shares.iter().copied())
    }
}

/// Ordered store of one hive's proposal requests. Ids start at 1.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestLedger {
    next_id: RequestId,
    requests: BTreeMap<RequestId, ProposalRequest>,
}

impl RequestLedger {
    pub fn new() -> Self {
        Self {
            next_id: RequestId::FIRST,
            requests: BTreeMap::new(),
        }
    }

    /// Store a new pending request and return its id.
    pub fn insert(&mut self, requester: MemberId, params: ProposalRequestParams) -> RequestId {
        let id = self.next_id;
        self.requests
            .insert(id, ProposalRequest::new(id, requester, params));
        self.next_id = id.next();
        id
    }

    pub fn get(&self, id: RequestId) -> Option<&ProposalRequest> {
        self.requests.get(&id)
    }

    pub(crate) fn get_mut(&mut self, id: RequestId) -> Option<&mut ProposalRequest> {
        self.requests.get_mut(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProposalRequest> {
        self.requests.values()
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}

impl Default for RequestLedger {
    fn default() -> Self {
        Self::new()
    }
}
