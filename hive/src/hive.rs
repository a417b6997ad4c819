//! A single hive: membership, proposal requests and fund distribution.

use crate::distribution::{Distribution, DistributionEngine};
use crate::events::HiveEvent;
use crate::external::{Collaborators, Transfer};
use crate::fees;
use crate::request::{ProposalRequest, ProposalRequestParams, RequestStatus};
use crate::state::HiveState;
use crate::verifier::SignatureVerifier;
use crate::HiveError;
use hive_types::{Address, Amount, BasisPoints, MemberId, PlatformId, RequestId, Signature};
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

/// One hive instance and the collaborators it calls out to.
///
/// Operations take `&mut self` and run to completion; there is no
/// interleaving inside a hive. Each one re-reads membership and request
/// status on entry rather than trusting anything observed earlier.
pub struct Hive {
    state: HiveState,
    collaborators: Collaborators,
}

impl Hive {
    pub(crate) fn new(state: HiveState, collaborators: Collaborators) -> Self {
        Self {
            state,
            collaborators,
        }
    }

    /// Rebuild a hive from a blob produced by [`Hive::save_state`].
    pub fn load_state(data: &[u8], collaborators: Collaborators) -> Result<Self, HiveError> {
        Ok(Self::new(HiveState::load(data)?, collaborators))
    }

    pub fn save_state(&self) -> Result<Vec<u8>, HiveError> {
        self.state.save()
    }

    // ── Accessors ──────────────────────────────────────────────────────

    pub fn address(&self) -> &Address {
        &self.state.address
    }

    pub fn owner(&self) -> &Address {
        &self.state.owner
    }

    /// The hive's own registry identity; proposals are made under it.
    pub fn own_identity(&self) -> MemberId {
        self.state.own_identity
    }

    pub fn fee_rate(&self) -> BasisPoints {
        self.state.fee_rate
    }

    pub fn data_uri(&self) -> &str {
        &self.state.data_uri
    }

    pub fn is_member(&self, id: MemberId) -> bool {
        self.state.members.contains(&id)
    }

    pub fn members(&self) -> &BTreeSet<MemberId> {
        &self.state.members
    }

    pub fn proposal_request(&self, id: RequestId) -> Option<&ProposalRequest> {
        self.state.requests.get(id)
    }

    pub fn proposal_requests(&self) -> impl Iterator<Item = &ProposalRequest> {
        self.state.requests.iter()
    }

    pub fn events(&self) -> &[HiveEvent] {
        &self.state.events
    }

    pub fn state(&self) -> &HiveState {
        &self.state
    }

    // ── Operations ─────────────────────────────────────────────────────

    /// Join with an owner-signed admission credential, minting the caller an
    /// identity with `handle`.
    pub fn join(
        &mut self,
        caller: &Address,
        signature: &Signature,
        platform_id: PlatformId,
        handle: &str,
        payment: Amount,
    ) -> Result<MemberId, HiveError> {
        SignatureVerifier::new(
            &self.state.owner_key,
            &self.state.address,
            self.state.admission_scope,
        )
        .verify(caller, signature)
        .inspect_err(|_| warn!(hive = %self.state.address, %caller, "rejected admission credential"))?;

        let registry = &self.collaborators.registry;
        if let Some(existing) = registry.id_of(caller) {
            if self.is_member(existing) {
                return Err(HiveError::AlreadyMember(existing));
            }
        }

        let member = registry.mint(caller, platform_id, handle, payment)?;
        self.state.members.insert(member);
        self.record(HiveEvent::MemberJoined {
            member,
            account: caller.clone(),
        });
        info!(hive = %self.state.address, %member, handle, "member joined");
        Ok(member)
    }

    /// Record a pending claim describing a bid on `params.job_id` and how
    /// its proceeds are split among members.
    pub fn create_proposal_request(
        &mut self,
        caller: &Address,
        params: ProposalRequestParams,
    ) -> Result<RequestId, HiveError> {
        let requester = self.require_member(caller)?;
        if let Some(outsider) = params.beneficiaries.iter().find(|b| !self.is_member(**b)) {
            return Err(HiveError::NotAMember(outsider.to_string()));
        }
        fees::validate_shares(
            &params.beneficiaries,
            &params.shares,
            self.state.fee_rate,
            self.state.max_beneficiaries,
        )?;

        let job_id = params.job_id;
        let request_id = self.state.requests.insert(requester, params);
        self.record(HiveEvent::ProposalRequestCreated {
            request_id,
            requester,
            job_id,
        });
        info!(hive = %self.state.address, %request_id, %requester, %job_id, "proposal request created");
        Ok(request_id)
    }

    /// Register a pending request with the marketplace under the hive's own
    /// identity. The requester cannot execute their own request.
    pub fn execute_proposal_request(
        &mut self,
        caller: &Address,
        request_id: RequestId,
    ) -> Result<(), HiveError> {
        let executor = self.require_member(caller)?;
        let request = self
            .state
            .requests
            .get(request_id)
            .ok_or(HiveError::RequestNotFound(request_id))?;
        if !request.is_pending() {
            return Err(HiveError::RequestNotPending(request_id));
        }
        if request.requester == executor {
            return Err(HiveError::OwnerCannotExecuteOwnRequest(request_id));
        }

        let terms = request.terms(self.state.own_identity);
        self.collaborators.marketplace.create_proposal(&terms)?;

        let request = self
            .state
            .requests
            .get_mut(request_id)
            .ok_or(HiveError::RequestNotFound(request_id))?;
        request.status = RequestStatus::Executed;
        let job_id = request.job_id;
        self.record(HiveEvent::ProposalRequestExecuted {
            request_id,
            executor,
            job_id,
        });
        info!(hive = %self.state.address, %request_id, %executor, %job_id, "proposal request executed");
        Ok(())
    }

    /// Distribute whatever the escrow released for this request since the
    /// last distribution, keeping the hive fee and rounding remainder.
    pub fn share_funds(
        &mut self,
        caller: &Address,
        request_id: RequestId,
    ) -> Result<Distribution, HiveError> {
        self.require_member(caller)?;
        let request = self
            .state
            .requests
            .get(request_id)
            .ok_or(HiveError::RequestNotFound(request_id))?;
        if request.is_pending() {
            return Err(HiveError::RequestNotExecuted(request_id));
        }

        let released = self
            .collaborators
            .marketplace
            .released_amount(request.job_id, self.state.own_identity);
        let distribution = DistributionEngine::plan(request, released, self.state.fee_rate)?;

        let transfers = distribution
            .payouts
            .iter()
            .filter(|p| !p.amount.is_zero())
            .map(|p| -> Result<Transfer, HiveError> {
                let profile = self
                    .collaborators
                    .registry
                    .profile(p.beneficiary)
                    .ok_or(HiveError::UnknownIdentity(p.beneficiary))?;
                Ok(Transfer {
                    to: profile.account,
                    amount: p.amount,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let bank = &self.collaborators.bank;
        let needed = distribution.paid_out();
        let available = bank.balance_of(&distribution.token, &self.state.address);
        if available < needed {
            return Err(HiveError::InsufficientGroupBalance { needed, available });
        }
        bank.transfer_batch(&distribution.token, &self.state.address, &transfers)?;

        let request = self
            .state
            .requests
            .get_mut(request_id)
            .ok_or(HiveError::RequestNotFound(request_id))?;
        DistributionEngine::apply(request, &distribution)?;
        debug!(
            %request_id,
            watermark = %request.shared_amount,
            retained = %request.retained_amount,
            "watermark advanced"
        );

        self.record(HiveEvent::FundsShared {
            request_id,
            amount: distribution.amount,
            fee: distribution.fee,
            remainder: distribution.remainder,
        });
        info!(
            hive = %self.state.address,
            %request_id,
            amount = %distribution.amount,
            fee = %distribution.fee,
            paid_out = %needed,
            "funds shared"
        );
        Ok(distribution)
    }

    /// Replace the hive's metadata URI. Owner only.
    pub fn update_data_uri(
        &mut self,
        caller: &Address,
        data_uri: impl Into<String>,
    ) -> Result<(), HiveError> {
        if caller != &self.state.owner {
            return Err(HiveError::NotOwner);
        }
        let data_uri = data_uri.into();
        self.state.data_uri = data_uri.clone();
        info!(hive = %self.state.address, %data_uri, "data uri updated");
        self.record(HiveEvent::DataUriUpdated { data_uri });
        Ok(())
    }

    // ── Internals ──────────────────────────────────────────────────────

    /// The caller's identity, if it is currently a member.
    fn require_member(&self, caller: &Address) -> Result<MemberId, HiveError> {
        self.collaborators
            .registry
            .id_of(caller)
            .filter(|id| self.is_member(*id))
            .ok_or_else(|| HiveError::NotAMember(caller.to_string()))
    }

    fn record(&mut self, event: HiveEvent) {
        self.state.events.push(event);
    }
}
