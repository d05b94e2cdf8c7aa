//! # In-Memory Token
//!
//! An ERC-20 style token held in process memory: balances, allowances and
//! a total supply behind one `parking_lot::Mutex`. Every operation
//! validates completely before touching state, so a refused call leaves
//! nothing half-applied.
//!
//! Allowances follow the common convention: an allowance of
//! [`Amount::MAX`] is treated as unlimited and is not decremented.

use std::collections::HashMap;

use isw_core::{Address, Amount};
use parking_lot::Mutex;

use crate::error::TransferError;
use crate::ledger::TokenLedger;

#[derive(Debug, Default)]
struct TokenState {
    balances: HashMap<Address, Amount>,
    allowances: HashMap<(Address, Address), Amount>,
    total_supply: Amount,
}

impl TokenState {
    fn balance(&self, holder: &Address) -> Amount {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    /// Check and apply a balance move. Nothing is written on `Err`.
    fn move_balance(
        &mut self,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if from.is_zero() {
            return Err(TransferError::InvalidSender(*from));
        }
        if to.is_zero() {
            return Err(TransferError::InvalidReceiver(*to));
        }
        let from_balance = self.balance(from);
        let debited = from_balance
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientBalance {
                holder: *from,
                balance: from_balance,
                requested: amount,
            })?;
        if from == to {
            return Ok(());
        }
        let credited = self
            .balance(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        self.balances.insert(*from, debited);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// A process-local fungible token.
#[derive(Debug)]
pub struct InMemoryToken {
    address: Address,
    state: Mutex<TokenState>,
}

impl InMemoryToken {
    /// An empty token living at `address`.
    pub fn new(address: Address) -> Self {
        Self {
            address,
            state: Mutex::new(TokenState::default()),
        }
    }

    /// Create `amount` new tokens for `to`.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidReceiver`] for the zero address,
    /// [`TransferError::Overflow`] if the supply would overflow.
    pub fn mint(&self, to: &Address, amount: Amount) -> Result<(), TransferError> {
        if to.is_zero() {
            return Err(TransferError::InvalidReceiver(*to));
        }
        let mut state = self.state.lock();
        let supply = state
            .total_supply
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        // Every balance is bounded by the supply, so this cannot overflow
        // once the supply check passed.
        let balance = state
            .balance(to)
            .checked_add(amount)
            .ok_or(TransferError::Overflow)?;
        state.total_supply = supply;
        state.balances.insert(*to, balance);
        tracing::debug!(token = %self.address, to = %to, amount = %amount, "minted");
        Ok(())
    }

    /// Set `spender`'s allowance over `owner`'s tokens to `amount`.
    ///
    /// # Errors
    ///
    /// [`TransferError::InvalidSender`] for a zero owner,
    /// [`TransferError::InvalidSpender`] for a zero spender.
    pub fn approve(
        &self,
        owner: &Address,
        spender: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        if owner.is_zero() {
            return Err(TransferError::InvalidSender(*owner));
        }
        if spender.is_zero() {
            return Err(TransferError::InvalidSpender(*spender));
        }
        self.state
            .lock()
            .allowances
            .insert((*owner, *spender), amount);
        Ok(())
    }

    /// Remaining allowance of `spender` over `owner`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> Amount {
        self.state.lock().allowance(owner, spender)
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> Amount {
        self.state.lock().total_supply
    }
}

impl TokenLedger for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn balance_of(&self, holder: &Address) -> Amount {
        self.state.lock().balance(holder)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: Amount) -> Result<(), TransferError> {
        self.state.lock().move_balance(from, to, amount)?;
        tracing::debug!(token = %self.address, from = %from, to = %to, amount = %amount, "transfer");
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: &Address,
        payer: &Address,
        payee: &Address,
        amount: Amount,
    ) -> Result<(), TransferError> {
        let mut state = self.state.lock();
        let allowance = state.allowance(payer, spender);
        let remaining = allowance
            .checked_sub(amount)
            .ok_or(TransferError::InsufficientAllowance {
                owner: *payer,
                spender: *spender,
                allowance,
                requested: amount,
            })?;
        state.move_balance(payer, payee, amount)?;
        if allowance != Amount::MAX {
            state.allowances.insert((*payer, *spender), remaining);
        }
        tracing::debug!(
            token = %self.address,
            spender = %spender,
            from = %payer,
            to = %payee,
            amount = %amount,
            "transfer_from"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const TOKEN: Address = Address::from_low_u64(0x70);
    const ALICE: Address = Address::from_low_u64(0xa1);
    const BOB: Address = Address::from_low_u64(0xb0);
    const SPENDER: Address = Address::from_low_u64(0x5e);

    fn funded() -> InMemoryToken {
        let t = InMemoryToken::new(TOKEN);
        t.mint(&ALICE, Amount::new(1_000)).unwrap();
        t
    }

    #[test]
    fn mint_and_transfer() {
        let t = funded();
        assert_eq!(t.address(), TOKEN);
        t.transfer(&ALICE, &BOB, Amount::new(300)).unwrap();
        assert_eq!(t.balance_of(&ALICE), Amount::new(700));
        assert_eq!(t.balance_of(&BOB), Amount::new(300));
        assert_eq!(t.total_supply(), Amount::new(1_000));
    }

    #[test]
    fn insufficient_balance_changes_nothing() {
        let t = funded();
        let err = t.transfer(&ALICE, &BOB, Amount::new(1_001)).unwrap_err();
        assert_eq!(
            err,
            TransferError::InsufficientBalance {
                holder: ALICE,
                balance: Amount::new(1_000),
                requested: Amount::new(1_001),
            }
        );
        assert_eq!(t.balance_of(&ALICE), Amount::new(1_000));
        assert_eq!(t.balance_of(&BOB), Amount::ZERO);
    }

    #[test]
    fn zero_addresses_rejected() {
        let t = funded();
        assert_eq!(
            t.transfer(&ALICE, &Address::ZERO, Amount::new(1)),
            Err(TransferError::InvalidReceiver(Address::ZERO))
        );
        assert_eq!(
            t.transfer(&Address::ZERO, &BOB, Amount::new(1)),
            Err(TransferError::InvalidSender(Address::ZERO))
        );
        assert_eq!(
            t.mint(&Address::ZERO, Amount::new(1)),
            Err(TransferError::InvalidReceiver(Address::ZERO))
        );
        assert_eq!(
            t.approve(&ALICE, &Address::ZERO, Amount::new(1)),
            Err(TransferError::InvalidSpender(Address::ZERO))
        );
    }

    #[test]
    fn self_transfer_is_a_no_op() {
        let t = funded();
        t.transfer(&ALICE, &ALICE, Amount::new(400)).unwrap();
        assert_eq!(t.balance_of(&ALICE), Amount::new(1_000));
        assert!(t.transfer(&ALICE, &ALICE, Amount::new(1_001)).is_err());
    }

    #[test]
    fn transfer_from_consumes_allowance() {
        let t = funded();
        t.approve(&ALICE, &SPENDER, Amount::new(500)).unwrap();
        t.transfer_from(&SPENDER, &ALICE, &BOB, Amount::new(200)).unwrap();
        assert_eq!(t.allowance(&ALICE, &SPENDER), Amount::new(300));
        assert_eq!(t.balance_of(&BOB), Amount::new(200));

        let err = t
            .transfer_from(&SPENDER, &ALICE, &BOB, Amount::new(301))
            .unwrap_err();
        assert!(matches!(err, TransferError::InsufficientAllowance { .. }));
        assert_eq!(t.allowance(&ALICE, &SPENDER), Amount::new(300));
    }

    #[test]
    fn failed_transfer_from_keeps_allowance() {
        let t = funded();
        t.approve(&ALICE, &SPENDER, Amount::new(5_000)).unwrap();
        let err = t
            .transfer_from(&SPENDER, &ALICE, &BOB, Amount::new(2_000))
            .unwrap_err();
        assert!(matches!(err, TransferError::InsufficientBalance { .. }));
        assert_eq!(t.allowance(&ALICE, &SPENDER), Amount::new(5_000));
        assert!(t
            .transfer_from(&SPENDER, &ALICE, &Address::ZERO, Amount::new(1))
            .is_err());
        assert_eq!(t.allowance(&ALICE, &SPENDER), Amount::new(5_000));
    }

    #[test]
    fn unlimited_allowance_is_not_decremented() {
        let t = funded();
        t.approve(&ALICE, &SPENDER, Amount::MAX).unwrap();
        t.transfer_from(&SPENDER, &ALICE, &BOB, Amount::new(999)).unwrap();
        assert_eq!(t.allowance(&ALICE, &SPENDER), Amount::MAX);
    }

    #[test]
    fn supply_overflow_rejected() {
        let t = funded();
        assert_eq!(t.mint(&BOB, Amount::MAX), Err(TransferError::Overflow));
        assert_eq!(t.total_supply(), Amount::new(1_000));
    }

    #[test]
    fn works_through_arc_dyn() {
        let t: std::sync::Arc<dyn TokenLedger> = std::sync::Arc::new(funded());
        t.transfer(&ALICE, &BOB, Amount::new(1)).unwrap();
        assert_eq!(t.balance_of(&BOB), Amount::new(1));
    }

    proptest! {
        #[test]
        fn transfers_conserve_supply(moves in proptest::collection::vec((0u8..3, 0u8..3, 0u128..600), 0..40)) {
            let accounts = [ALICE, BOB, SPENDER];
            let t = funded();
            for (from, to, amount) in moves {
                let _ = t.transfer(&accounts[from as usize], &accounts[to as usize], Amount::new(amount));
            }
            let sum = accounts
                .iter()
                .map(|a| t.balance_of(a).as_u128())
                .sum::<u128>();
            prop_assert_eq!(sum, 1_000);
            prop_assert_eq!(t.total_supply(), Amount::new(1_000));
        }
    }
}
