use crate::external::{BankError, MarketplaceError, RegistryError};
use hive_types::{Address, Amount, BasisPoints, MemberId, RequestId};
use thiserror::Error;

/// Every way a hive operation can fail.
///
/// All variants are terminal validation failures: the operation that
/// returned one left the hive untouched, and retrying without changing the
/// input (or waiting for more funds) fails the same way.
#[derive(Debug, Error)]
pub enum HiveError {
    #[error("admission signature was not issued by the hive owner")]
    InvalidSignature,

    #[error("identity registration failed: {0}")]
    RegistrationFailed(#[from] RegistryError),

    #[error("{0} is not a member of the hive")]
    NotAMember(String),

    #[error("owner cannot execute its own proposal request {0}")]
    OwnerCannotExecuteOwnRequest(RequestId),

    #[error("proposal request {0} is not pending")]
    RequestNotPending(RequestId),

    #[error("shares plus fee sum to {total} bps, expected {}", BasisPoints::DIVIDER)]
    SharesNotComplete { total: u64 },

    #[error("no funds to share for proposal request {0}")]
    NoFundsToShare(RequestId),

    #[error("proposal request {0} not found")]
    RequestNotFound(RequestId),

    #[error("proposal request {0} has not been executed")]
    RequestNotExecuted(RequestId),

    #[error("{beneficiaries} beneficiaries but {shares} shares")]
    BeneficiaryShareMismatch { beneficiaries: usize, shares: usize },

    #[error("too many beneficiaries: {count} > {max}")]
    TooManyBeneficiaries { count: usize, max: usize },

    #[error("{0} is already a member of the hive")]
    AlreadyMember(MemberId),

    #[error("only the hive owner can do this")]
    NotOwner,

    #[error("fee rate {0} exceeds 100%")]
    InvalidFeeRate(BasisPoints),

    #[error("no registry profile for {0}")]
    UnknownIdentity(MemberId),

    #[error("hive balance too low: need {needed}, have {available}")]
    InsufficientGroupBalance { needed: Amount, available: Amount },

    #[error("marketplace rejected the call: {0}")]
    Marketplace(#[from] MarketplaceError),

    #[error("token transfer failed: {0}")]
    Bank(#[from] BankError),

    #[error("hive {0} not found")]
    HiveNotFound(Address),

    #[error("amount overflow")]
    Overflow,

    #[error("config error: {0}")]
    Config(String),

    #[error("state encoding error: {0}")]
    State(String),
}
