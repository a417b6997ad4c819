//! Hive factory: creates hives and keeps the registry of everything it created.

use crate::config::HiveConfig;
use crate::events::HiveEvent;
use crate::external::{Collaborators, RegistryError};
use crate::hive::Hive;
use crate::request::RequestLedger;
use crate::state::HiveState;
use crate::HiveError;
use hive_types::{Address, Amount, BasisPoints, PlatformId, PublicKey};
use std::collections::BTreeMap;
use tracing::{info, warn};

/// Arguments to [`HiveFactory::create_hive`].
#[derive(Clone, Debug)]
pub struct CreateHiveParams {
    pub platform_id: PlatformId,
    /// Registry handle minted to the hive itself.
    pub group_handle: String,
    /// Registry handle minted to the creator.
    pub owner_handle: String,
    pub fee_rate: BasisPoints,
}

/// Creates hives and owns them, keyed by address.
pub struct HiveFactory {
    address: Address,
    nonce: u64,
    config: HiveConfig,
    collaborators: Collaborators,
    hives: BTreeMap<Address, Hive>,
    events: Vec<HiveEvent>,
}

impl HiveFactory {
    pub fn new(address: Address, config: HiveConfig, collaborators: Collaborators) -> Self {
        Self {
            address,
            nonce: 0,
            config,
            collaborators,
            hives: BTreeMap::new(),
            events: Vec::new(),
        }
    }

    pub fn address(&self) -> &Address {
        &self.address
    }

    pub fn config(&self) -> &HiveConfig {
        &self.config
    }

    /// Create a hive owned by `creator`.
    ///
    /// `payment` must cover two registry mints: one for the creator's
    /// identity, one for the hive's own. Both mints are dry-run before either
    /// is performed, so a rejected handle or short payment creates nothing.
    pub fn create_hive(
        &mut self,
        creator: &PublicKey,
        params: CreateHiveParams,
        payment: Amount,
    ) -> Result<Address, HiveError> {
        if !params.fee_rate.is_valid_fraction() {
            return Err(HiveError::InvalidFeeRate(params.fee_rate));
        }

        let owner = hive_crypto::derive_address(creator);
        let hive_address = self.next_free_address();
        let registry = &self.collaborators.registry;

        let mint_fee = registry.mint_fee();
        let required = mint_fee.checked_mul(2).ok_or(HiveError::Overflow)?;
        if payment < required {
            return Err(RegistryError::InsufficientPayment {
                required,
                paid: payment,
            }
            .into());
        }
        if params.group_handle == params.owner_handle {
            return Err(RegistryError::HandleTaken(params.group_handle).into());
        }
        let group_payment = payment.saturating_sub(mint_fee);
        registry.check_mint(&owner, params.platform_id, &params.owner_handle, mint_fee)?;
        registry.check_mint(
            &hive_address,
            params.platform_id,
            &params.group_handle,
            group_payment,
        )?;

        let owner_id = registry.mint(&owner, params.platform_id, &params.owner_handle, mint_fee)?;
        let own_identity = registry
            .mint(
                &hive_address,
                params.platform_id,
                &params.group_handle,
                group_payment,
            )
            .inspect_err(|e| {
                warn!(%owner, %owner_id, error = %e, "hive identity mint failed after owner mint")
            })?;
        self.nonce += 1;

        let state = HiveState {
            address: hive_address.clone(),
            owner: owner.clone(),
            owner_key: creator.clone(),
            own_identity,
            fee_rate: params.fee_rate,
            data_uri: String::new(),
            admission_scope: self.config.admission_scope,
            max_beneficiaries: self.config.max_beneficiaries,
            members: [owner_id, own_identity].into_iter().collect(),
            requests: RequestLedger::new(),
            events: Vec::new(),
        };
        self.hives.insert(
            hive_address.clone(),
            Hive::new(state, self.collaborators.clone()),
        );
        self.events.push(HiveEvent::HiveCreated {
            hive: hive_address.clone(),
            owner: owner.clone(),
            own_identity,
            fee_rate: params.fee_rate,
        });
        info!(
            hive = %hive_address,
            %owner,
            %owner_id,
            %own_identity,
            fee_rate = %params.fee_rate,
            "hive created"
        );
        Ok(hive_address)
    }

    /// Next contract address not already held (restored hives may occupy some).
    fn next_free_address(&mut self) -> Address {
        loop {
            let candidate = hive_crypto::contract_address(&self.address, self.nonce);
            if !self.hives.contains_key(&candidate) {
                return candidate;
            }
            self.nonce += 1;
        }
    }

    pub fn hive(&self, address: &Address) -> Result<&Hive, HiveError> {
        self.hives
            .get(address)
            .ok_or_else(|| HiveError::HiveNotFound(address.clone()))
    }

    pub fn hive_mut(&mut self, address: &Address) -> Result<&mut Hive, HiveError> {
        self.hives
            .get_mut(address)
            .ok_or_else(|| HiveError::HiveNotFound(address.clone()))
    }

    pub fn hives(&self) -> impl Iterator<Item = &Hive> {
        self.hives.values()
    }

    /// Factory-level notifications (`HiveCreated`).
    pub fn events(&self) -> &[HiveEvent] {
        &self.events
    }

    /// Re-attach a hive saved with [`Hive::save_state`] to this factory's
    /// collaborators. Replaces any hive already held at that address.
    pub fn restore_hive(&mut self, data: &[u8]) -> Result<Address, HiveError> {
        let hive = Hive::load_state(data, self.collaborators.clone())?;
        let address = hive.address().clone();
        self.hives.insert(address.clone(), hive);
        Ok(address)
    }
}
