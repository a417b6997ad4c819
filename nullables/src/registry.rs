//! Nullable identity registry — in-memory handle minting.

use hive_core::{IdentityRegistry, Profile, RegistryError};
use hive_types::{Address, Amount, MemberId, PlatformId};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

const MIN_HANDLE_LEN: usize = 5;
const MAX_HANDLE_LEN: usize = 31;

struct RegistryInner {
    next_id: u64,
    mint_fee: Amount,
    minting_enabled: bool,
    platforms: HashSet<PlatformId>,
    by_account: HashMap<Address, MemberId>,
    handles: HashSet<String>,
    profiles: HashMap<MemberId, Profile>,
    collected: Amount,
}

/// In-memory registry: one identity per account, unique handles, ids from 1.
pub struct NullIdentityRegistry {
    inner: Mutex<RegistryInner>,
}

impl NullIdentityRegistry {
    pub fn new(mint_fee: Amount) -> Self {
        Self {
            inner: Mutex::new(RegistryInner {
                next_id: 1,
                mint_fee,
                minting_enabled: true,
                platforms: HashSet::new(),
                by_account: HashMap::new(),
                handles: HashSet::new(),
                profiles: HashMap::new(),
                collected: Amount::ZERO,
            }),
        }
    }

    /// Register a platform identities can be minted under.
    pub fn add_platform(&self, platform_id: PlatformId) {
        self.inner.lock().unwrap().platforms.insert(platform_id);
    }

    pub fn set_minting_enabled(&self, enabled: bool) {
        self.inner.lock().unwrap().minting_enabled = enabled;
    }

    pub fn set_mint_fee(&self, fee: Amount) {
        self.inner.lock().unwrap().mint_fee = fee;
    }

    /// Total mint payments received.
    pub fn collected_fees(&self) -> Amount {
        self.inner.lock().unwrap().collected
    }
}

impl RegistryInner {
    fn check(
        &self,
        account: &Address,
        platform_id: PlatformId,
        handle: &str,
        payment: Amount,
    ) -> Result<(), RegistryError> {
        if !self.minting_enabled {
            return Err(RegistryError::MintingDisabled);
        }
        if !self.platforms.contains(&platform_id) {
            return Err(RegistryError::UnknownPlatform(platform_id));
        }
        if self.by_account.contains_key(account) {
            return Err(RegistryError::AlreadyRegistered(account.clone()));
        }
        let valid_chars = handle
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-' || b == b'_');
        if !(MIN_HANDLE_LEN..=MAX_HANDLE_LEN).contains(&handle.len()) || !valid_chars {
            return Err(RegistryError::InvalidHandle(handle.to_string()));
        }
        if self.handles.contains(handle) {
            return Err(RegistryError::HandleTaken(handle.to_string()));
        }
        if payment < self.mint_fee {
            return Err(RegistryError::InsufficientPayment {
                required: self.mint_fee,
                paid: payment,
            });
        }
        Ok(())
    }
}

impl IdentityRegistry for NullIdentityRegistry {
    fn mint_fee(&self) -> Amount {
        self.inner.lock().unwrap().mint_fee
    }

    fn check_mint(
        &self,
        account: &Address,
        platform_id: PlatformId,
        handle: &str,
        payment: Amount,
    ) -> Result<(), RegistryError> {
        self.inner
            .lock()
            .unwrap()
            .check(account, platform_id, handle, payment)
    }

    fn mint(
        &self,
        account: &Address,
        platform_id: PlatformId,
        handle: &str,
        payment: Amount,
    ) -> Result<MemberId, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        inner.check(account, platform_id, handle, payment)?;

        let id = MemberId::new(inner.next_id);
        inner.next_id += 1;
        inner.by_account.insert(account.clone(), id);
        inner.handles.insert(handle.to_string());
        inner.profiles.insert(
            id,
            Profile {
                id,
                account: account.clone(),
                platform_id,
                handle: handle.to_string(),
            },
        );
        inner.collected = inner.collected.saturating_add(payment);
        Ok(id)
    }

    fn id_of(&self, account: &Address) -> Option<MemberId> {
        self.inner.lock().unwrap().by_account.get(account).copied()
    }

    fn profile(&self, id: MemberId) -> Option<Profile> {
        self.inner.lock().unwrap().profiles.get(&id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn addr(name: &str) -> Address {
        Address::parse(format!("hive_{name}")).unwrap()
    }

    fn registry() -> NullIdentityRegistry {
        let registry = NullIdentityRegistry::new(Amount::new(100));
        registry.add_platform(PlatformId::new(1));
        registry
    }

    #[test]
    fn mints_sequential_ids() {
        let r = registry();
        let p = PlatformId::new(1);
        assert_eq!(r.mint(&addr("a"), p, "dave_", Amount::new(100)), Ok(MemberId::new(1)));
        assert_eq!(r.mint(&addr("b"), p, "alice", Amount::new(100)), Ok(MemberId::new(2)));
        assert_eq!(r.id_of(&addr("b")), Some(MemberId::new(2)));
        assert_eq!(r.profile(MemberId::new(2)).unwrap().handle, "alice");
        assert_eq!(r.collected_fees(), Amount::new(200));
    }

    #[test]
    fn rejects_taken_handle() {
        let r = registry();
        let p = PlatformId::new(1);
        r.mint(&addr("a"), p, "alice", Amount::new(100)).unwrap();
        assert_eq!(
            r.mint(&addr("b"), p, "alice", Amount::new(100)),
            Err(RegistryError::HandleTaken("alice".to_string()))
        );
    }

    #[test]
    fn rejects_second_identity_for_account() {
        let r = registry();
        let p = PlatformId::new(1);
        r.mint(&addr("a"), p, "alice", Amount::new(100)).unwrap();
        assert!(matches!(
            r.mint(&addr("a"), p, "alice2", Amount::new(100)),
            Err(RegistryError::AlreadyRegistered(_))
        ));
    }

    #[test]
    fn rejects_short_payment_and_bad_handles() {
        let r = registry();
        let p = PlatformId::new(1);
        assert!(matches!(
            r.check_mint(&addr("a"), p, "alice", Amount::new(99)),
            Err(RegistryError::InsufficientPayment { .. })
        ));
        assert!(matches!(
            r.check_mint(&addr("a"), p, "bob", Amount::new(100)),
            Err(RegistryError::InvalidHandle(_))
        ));
        assert!(matches!(
            r.check_mint(&addr("a"), p, "Alice", Amount::new(100)),
            Err(RegistryError::InvalidHandle(_))
        ));
    }

    #[test]
    fn fee_change_applies_to_next_mint() {
        let r = registry();
        let p = PlatformId::new(1);
        r.set_mint_fee(Amount::new(250));
        assert_eq!(r.mint_fee(), Amount::new(250));
        assert!(matches!(
            r.check_mint(&addr("a"), p, "alice", Amount::new(100)),
            Err(RegistryError::InsufficientPayment { .. })
        ));
        r.mint(&addr("a"), p, "alice", Amount::new(250)).unwrap();
        assert_eq!(r.collected_fees(), Amount::new(250));
    }

    #[test]
    fn rejects_when_disabled_or_unknown_platform() {
        let r = registry();
        assert_eq!(
            r.check_mint(&addr("a"), PlatformId::new(9), "alice", Amount::new(100)),
            Err(RegistryError::UnknownPlatform(PlatformId::new(9)))
        );
        r.set_minting_enabled(false);
        assert_eq!(
            r.check_mint(&addr("a"), PlatformId::new(1), "alice", Amount::new(100)),
            Err(RegistryError::MintingDisabled)
        );
    }
}
