//! Nullable token bank — thread-safe in-memory balances.

use hive_core::{BankError, TokenBank, Transfer};
use hive_types::{Address, Amount, Token};
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory balances for the native asset and any number of token contracts.
#[derive(Default)]
pub struct NullBank {
    balances: Mutex<HashMap<(Token, Address), Amount>>,
}

impl NullBank {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mint `amount` of `token` into `account`.
    pub fn credit(&self, token: &Token, account: &Address, amount: Amount) -> Result<(), BankError> {
        let mut balances = self.balances.lock().unwrap();
        let entry = balances
            .entry((token.clone(), account.clone()))
            .or_default();
        *entry = entry.checked_add(amount).ok_or(BankError::Overflow)?;
        Ok(())
    }

    /// Burn `amount` of `token` from `account`.
    pub fn debit(&self, token: &Token, account: &Address, amount: Amount) -> Result<(), BankError> {
        let mut balances = self.balances.lock().unwrap();
        let key = (token.clone(), account.clone());
        let available = balances.get(&key).copied().unwrap_or_default();
        let left = available
            .checked_sub(amount)
            .ok_or(BankError::InsufficientBalance {
                needed: amount,
                available,
            })?;
        balances.insert(key, left);
        Ok(())
    }
}

impl TokenBank for NullBank {
    fn balance_of(&self, token: &Token, account: &Address) -> Amount {
        self.balances
            .lock()
            .unwrap()
            .get(&(token.clone(), account.clone()))
            .copied()
            .unwrap_or_default()
    }

    fn transfer_batch(
        &self,
        token: &Token,
        from: &Address,
        transfers: &[Transfer],
    ) -> Result<(), BankError> {
        let mut balances = self.balances.lock().unwrap();

        // Stage every new balance first so a failure leaves nothing applied.
        let mut staged: HashMap<Address, Amount> = HashMap::new();
        let balance = |staged: &HashMap<Address, Amount>, account: &Address| {
            staged.get(account).copied().unwrap_or_else(|| {
                balances
                    .get(&(token.clone(), account.clone()))
                    .copied()
                    .unwrap_or_default()
            })
        };

        for transfer in transfers {
            let available = balance(&staged, from);
            let debited =
                available
                    .checked_sub(transfer.amount)
                    .ok_or(BankError::InsufficientBalance {
                        needed: transfer.amount,
                        available,
                    })?;
            staged.insert(from.clone(), debited);
            let credited = balance(&staged, &transfer.to)
                .checked_add(transfer.amount)
                .ok_or(BankError::Overflow)?;
            staged.insert(transfer.to.clone(), credited);
        }

        for (account, amount) in staged {
            balances.insert((token.clone(), account), amount);
        }
        Ok(())
    }
}
