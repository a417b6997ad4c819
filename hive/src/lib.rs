//! Hive accounting and authorization engine.
//!
//! A hive is a group of members that bid on external jobs together and
//! split the proceeds. This crate owns the ledger side of that arrangement:
//!
//! - **Factory** — creates hives, mints the owner's and the hive's own
//!   identities, admits both as the first members.
//! - **Membership** — accounts join with an owner-signed admission credential.
//! - **Proposal requests** — a member describes a bid and an internal share
//!   split (basis points that sum to 10000 together with the hive fee); a
//!   *different* member executes it, registering the proposal with the
//!   marketplace under the hive's identity.
//! - **Distribution** — as the escrow releases funds for the proposal, any
//!   member can trigger `share_funds`, which pays out only the newly released
//!   delta, keeps the hive fee and rounding remainder, and advances a
//!   per-request watermark.
//!
//! External systems (identity registry, marketplace/escrow, token balances)
//! are reached only through the traits in [`external`], injected at
//! construction as [`Collaborators`].
//!
//! Every operation validates its full precondition chain before the first
//! external side effect and mutates hive state only after all external calls
//! succeeded, so a failed call leaves no partial state behind.

pub mod config;
pub mod distribution;
pub mod error;
pub mod events;
pub mod external;
pub mod factory;
pub mod fees;
pub mod hive;
pub mod request;
pub mod state;
pub mod verifier;

pub use config::{AdmissionScope, HiveConfig};
pub use distribution::{Distribution, DistributionEngine, Payout};
pub use error::HiveError;
pub use events::HiveEvent;
pub use external::{
    BankError, Collaborators, IdentityRegistry, Marketplace, MarketplaceError, Profile,
    ProposalTerms, RegistryError, TokenBank, Transfer,
};
pub use factory::{CreateHiveParams, HiveFactory};
pub use hive::Hive;
pub use request::{ProposalRequest, ProposalRequestParams, RequestLedger, RequestStatus};
pub use state::HiveState;
pub use verifier::SignatureVerifier;
