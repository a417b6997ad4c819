//! Interfaces to the systems a hive depends on but does not own.
//!
//! The identity registry, the marketplace/escrow and the token balance source
//! are injected as trait objects so the ledger can run against real adapters
//! or the in-memory doubles in `hive-nullables`. All methods take `&self`;
//! implementations own their interior mutability.

use hive_types::{Address, Amount, JobId, MemberId, PlatformId, Timestamp, Token};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("handle {0} is already taken")]
    HandleTaken(String),

    #[error("handle {0} is not a valid handle")]
    InvalidHandle(String),

    #[error("minting is disabled")]
    MintingDisabled,

    #[error("insufficient payment: required {required}, paid {paid}")]
    InsufficientPayment { required: Amount, paid: Amount },

    #[error("account {0} already holds an identity")]
    AlreadyRegistered(Address),

    #[error("platform {0} does not exist")]
    UnknownPlatform(PlatformId),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketplaceError {
    #[error("job {0} does not exist")]
    JobNotFound(JobId),

    #[error("{owner} already has a proposal on job {job_id}")]
    ProposalExists { job_id: JobId, owner: MemberId },

    #[error("token {0} is not accepted")]
    TokenNotAllowed(Token),

    #[error("proposal expiration {0} is in the past")]
    Expired(Timestamp),

    #[error("{0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BankError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: Amount, available: Amount },

    #[error("balance overflow")]
    Overflow,
}

/// A registry identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: MemberId,
    /// The account the identity was minted to; payouts go here.
    pub account: Address,
    pub platform_id: PlatformId,
    pub handle: String,
}

/// Identity registry: mints and resolves member identifiers.
pub trait IdentityRegistry: Send + Sync {
    /// Payment required for one mint.
    fn mint_fee(&self) -> Amount;

    /// Dry-run of [`IdentityRegistry::mint`]: fails exactly when `mint` would.
    ///
    /// Callers minting several identities in one operation rely on this.
    /// [`HiveFactory::create_hive`](crate::HiveFactory::create_hive) checks
    /// both the owner's and the hive's mint before performing either, and
    /// has no way to revoke the owner's identity if the second mint then
    /// fails. An implementation whose `mint` can reject what `check_mint`
    /// accepted breaks that operation's atomicity.
    fn check_mint(
        &self,
        account: &Address,
        platform_id: PlatformId,
        handle: &str,
        payment: Amount,
    ) -> Result<(), RegistryError>;

    /// Mint a new identity with `handle` to `account`.
    fn mint(
        &self,
        account: &Address,
        platform_id: PlatformId,
        handle: &str,
        payment: Amount,
    ) -> Result<MemberId, RegistryError>;

    /// The identity held by `account`, if any.
    fn id_of(&self, account: &Address) -> Option<MemberId>;

    fn profile(&self, id: MemberId) -> Option<Profile>;
}

/// Everything the marketplace needs to register a proposal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalTerms {
    pub job_id: JobId,
    /// Nominal owner of the proposal (always the hive's own identity).
    pub owner_id: MemberId,
    pub platform_id: PlatformId,
    pub rate_token: Token,
    pub rate_amount: Amount,
    pub data_uri: String,
    pub expiration_date: Timestamp,
}

/// Marketplace/escrow: accepts proposals and reports released funds.
pub trait Marketplace: Send + Sync {
    fn create_proposal(&self, terms: &ProposalTerms) -> Result<(), MarketplaceError>;

    /// Cumulative amount the escrow has released for the proposal that
    /// `proposal_owner` holds on `job_id`. Never decreases.
    fn released_amount(&self, job_id: JobId, proposal_owner: MemberId) -> Amount;
}

/// One leg of a batch payout.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub to: Address,
    pub amount: Amount,
}

/// Native and token balances.
pub trait TokenBank: Send + Sync {
    fn balance_of(&self, token: &Token, account: &Address) -> Amount;

    /// Move funds from `from` to every recipient, all or nothing.
    fn transfer_batch(
        &self,
        token: &Token,
        from: &Address,
        transfers: &[Transfer],
    ) -> Result<(), BankError>;
}

/// The external systems a hive talks to.
#[derive(Clone)]
pub struct Collaborators {
    pub registry: Arc<dyn IdentityRegistry>,
    pub marketplace: Arc<dyn Marketplace>,
    pub bank: Arc<dyn TokenBank>,
}

impl Collaborators {
    pub fn new(
        registry: Arc<dyn IdentityRegistry>,
        marketplace: Arc<dyn Marketplace>,
        bank: Arc<dyn TokenBank>,
    ) -> Self {
        Self {
            registry,
            marketplace,
            bank,
        }
    }
}
