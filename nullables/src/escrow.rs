//! Nullable marketplace/escrow — records proposals and pushes releases into the bank.

use crate::bank::NullBank;
use crate::clock::NullClock;
use hive_core::{IdentityRegistry, Marketplace, MarketplaceError, ProposalTerms};
use hive_types::{Amount, JobId, MemberId, Token};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct EscrowInner {
    jobs: HashSet<JobId>,
    allowed_tokens: HashSet<Token>,
    proposals: HashMap<(JobId, MemberId), ProposalTerms>,
    released: HashMap<(JobId, MemberId), Amount>,
}

/// In-memory marketplace. Releases credit the proposal owner's account in
/// the shared [`NullBank`], the way a real escrow pays the hive.
pub struct NullEscrow {
    registry: Arc<dyn IdentityRegistry>,
    bank: Arc<NullBank>,
    clock: Arc<NullClock>,
    inner: Mutex<EscrowInner>,
}

impl NullEscrow {
    /// The native asset is accepted from the start.
    pub fn new(
        registry: Arc<dyn IdentityRegistry>,
        bank: Arc<NullBank>,
        clock: Arc<NullClock>,
    ) -> Self {
        let mut inner = EscrowInner::default();
        inner.allowed_tokens.insert(Token::Native);
        Self {
            registry,
            bank,
            clock,
            inner: Mutex::new(inner),
        }
    }

    /// Post a job that proposals can target.
    pub fn open_job(&self, job_id: JobId) {
        self.inner.lock().unwrap().jobs.insert(job_id);
    }

    pub fn allow_token(&self, token: Token) {
        self.inner.lock().unwrap().allowed_tokens.insert(token);
    }

    pub fn proposal(&self, job_id: JobId, owner: MemberId) -> Option<ProposalTerms> {
        self.inner
            .lock()
            .unwrap()
            .proposals
            .get(&(job_id, owner))
            .cloned()
    }

    /// The job's payer releases `amount` of the proposal to its owner.
    ///
    /// Cumulative releases cannot exceed the proposal's rate amount.
    pub fn release(
        &self,
        job_id: JobId,
        owner: MemberId,
        amount: Amount,
    ) -> Result<(), MarketplaceError> {
        let mut inner = self.inner.lock().unwrap();
        let key = (job_id, owner);
        let terms = inner
            .proposals
            .get(&key)
            .cloned()
            .ok_or(MarketplaceError::JobNotFound(job_id))?;
        let released = inner.released.get(&key).copied().unwrap_or_default();
        let total = released
            .checked_add(amount)
            .filter(|total| *total <= terms.rate_amount)
            .ok_or_else(|| {
                MarketplaceError::Other(format!(
                    "release of {amount} exceeds proposal amount {}",
                    terms.rate_amount
                ))
            })?;
        let recipient = self
            .registry
            .profile(owner)
            .ok_or_else(|| MarketplaceError::Other(format!("no profile for {owner}")))?
            .account;
        self.bank
            .credit(&terms.rate_token, &recipient, amount)
            .map_err(|e| MarketplaceError::Other(e.to_string()))?;
        inner.released.insert(key, total);
        Ok(())
    }
}

impl Marketplace for NullEscrow {
    fn create_proposal(&self, terms: &ProposalTerms) -> Result<(), MarketplaceError> {
        let mut inner = self.inner.lock().unwrap();
        if !inner.jobs.contains(&terms.job_id) {
            return Err(MarketplaceError::JobNotFound(terms.job_id));
        }
        if !inner.allowed_tokens.contains(&terms.rate_token) {
            return Err(MarketplaceError::TokenNotAllowed(terms.rate_token.clone()));
        }
        if terms.expiration_date.is_past(self.clock.now()) {
            return Err(MarketplaceError::Expired(terms.expiration_date));
        }
        let key = (terms.job_id, terms.owner_id);
        if inner.proposals.contains_key(&key) {
            return Err(MarketplaceError::ProposalExists {
                job_id: terms.job_id,
                owner: terms.owner_id,
            });
        }
        inner.proposals.insert(key, terms.clone());
        Ok(())
    }

    fn released_amount(&self, job_id: JobId, proposal_owner: MemberId) -> Amount {
        self.inner
            .lock()
            .unwrap()
            .released
            .get(&(job_id, proposal_owner))
            .copied()
            .unwrap_or_default()
    }
}
