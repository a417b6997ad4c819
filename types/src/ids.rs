//! Integer identifiers handed out by the ledger and its collaborators.

use serde::{Deserialize, Serialize};
use std::fmt;

macro_rules! id_type {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        pub struct $name(u64);

        impl $name {
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            pub fn get(&self) -> u64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($label, "#{}"), self.0)
            }
        }
    };
}

id_type!(
    /// Identity minted by the external registry for an account or a group.
    MemberId,
    "member"
);

id_type!(
    /// Proposal request id, scoped to one group, starting at 1.
    RequestId,
    "request"
);

id_type!(
    /// External job (service) a proposal targets.
    JobId,
    "job"
);

id_type!(
    /// Platform under which identities are minted and proposals are made.
    PlatformId,
    "platform"
);

impl RequestId {
    /// The first id allocated in a fresh ledger.
    pub const FIRST: Self = Self(1);

    pub fn next(&self) -> Self {
        Self(self.0 + 1)
    }
}
