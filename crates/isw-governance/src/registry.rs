//! # Governance Registry
//!
//! Holds custody funds and the withdrawal whitelist. Two fixed owners
//! co-sign every whitelist change with EIP-712 approvals; any whitelisted
//! account may then withdraw without further approval.
//!
//! ## Security Invariant
//!
//! Each mutating operation runs validate → token transfer → commit under a
//! single write lock on the registry state. A nonce is checked and marked
//! used inside the same critical section, so two concurrent calls with the
//! same nonce cannot both pass. Nothing is written until every check has
//! passed; a rejected call leaves state and the event log untouched.
//!
//! Lock order is registry → token. The token never calls back.

use std::collections::HashSet;
use std::sync::Arc;

use isw_core::{Address, Amount, AuditEvent, Clock, EventLog, Nonce, SystemClock};
use isw_crypto::{
    Eip712Domain, RecipientAction, Secp256k1Recovery, SignatureBytes, SignerRecovery,
};
use isw_token::TokenLedger;
use parking_lot::RwLock;

use crate::config::RegistryConfig;
use crate::error::RegistryError;

/// Number of owner approvals required for a whitelist change.
pub const REQUIRED_SIGNATURES: usize = 2;

#[derive(Debug, Default)]
struct RegistryState {
    whitelist: HashSet<Address>,
    used_nonces: HashSet<Nonce>,
    events: EventLog,
}

/// The two-owner custody registry.
pub struct GovernanceRegistry {
    config: RegistryConfig,
    owners: [Address; 2],
    domain: Eip712Domain,
    domain_separator: [u8; 32],
    token: Arc<dyn TokenLedger>,
    recovery: Arc<dyn SignerRecovery>,
    clock: Arc<dyn Clock>,
    state: RwLock<RegistryState>,
}

impl std::fmt::Debug for GovernanceRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GovernanceRegistry")
            .field("address", &self.config.address)
            .field("owners", &self.owners)
            .field("token", &self.config.token_address)
            .field("chain_id", &self.config.chain_id)
            .finish_non_exhaustive()
    }
}

impl GovernanceRegistry {
    /// Create a registry.
    ///
    /// # Errors
    ///
    /// [`RegistryError::InvalidConfiguration`] unless there are exactly two
    /// distinct non-zero owners, the registry and token addresses are
    /// non-zero, and `token` lives at `config.token_address`.
    pub fn new(
        config: RegistryConfig,
        token: Arc<dyn TokenLedger>,
        recovery: Arc<dyn SignerRecovery>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, RegistryError> {
        let owners: [Address; 2] = match config.owners.as_slice() {
            [a, b] => [*a, *b],
            _ => return Err(RegistryError::config("Must have exactly 2 owners")),
        };
        if owners.iter().any(Address::is_zero) {
            return Err(RegistryError::config("Invalid owner address"));
        }
        if owners[0] == owners[1] {
            return Err(RegistryError::config("Owners must be distinct"));
        }
        if config.token_address.is_zero() {
            return Err(RegistryError::config("Invalid token address"));
        }
        if config.address.is_zero() {
            return Err(RegistryError::config("Invalid registry address"));
        }
        if token.address() != config.token_address {
            return Err(RegistryError::config(format!(
                "token ledger lives at {}, configured {}",
                token.address(),
                config.token_address
            )));
        }

        let domain = config.domain();
        let domain_separator = domain.separator();
        tracing::debug!(
            registry = %config.address,
            chain_id = config.chain_id,
            owner0 = %owners[0],
            owner1 = %owners[1],
            "governance registry created"
        );
        Ok(Self {
            config,
            owners,
            domain,
            domain_separator,
            token,
            recovery,
            clock,
            state: RwLock::new(RegistryState::default()),
        })
    }

    /// A registry using secp256k1 recovery and the system clock.
    pub fn with_defaults(
        config: RegistryConfig,
        token: Arc<dyn TokenLedger>,
    ) -> Result<Self, RegistryError> {
        Self::new(
            config,
            token,
            Arc::new(Secp256k1Recovery),
            Arc::new(SystemClock),
        )
    }

    // ── Governance ─────────────────────────────────────────────────────

    /// Whitelist `recipient`, authorized by both owners.
    ///
    /// Checks, first failure wins: signature count, nonce freshness,
    /// signer recovery and ownership, distinct signers, ascending signer
    /// order, non-zero recipient. Adding an already whitelisted recipient
    /// succeeds and still consumes the nonce.
    ///
    /// # Errors
    ///
    /// See [`RegistryError`].
    pub fn add_recipient(
        &self,
        recipient: Address,
        signatures: &[SignatureBytes],
        nonce: Nonce,
    ) -> Result<(), RegistryError> {
        self.apply(RecipientAction::Add, recipient, signatures, nonce)
    }

    /// Remove `recipient` from the whitelist, authorized by both owners.
    ///
    /// Same contract as [`add_recipient`](Self::add_recipient) with the
    /// `RemoveRecipient` message. Removing an absent recipient succeeds
    /// and consumes the nonce.
    ///
    /// # Errors
    ///
    /// See [`RegistryError`].
    pub fn remove_recipient(
        &self,
        recipient: Address,
        signatures: &[SignatureBytes],
        nonce: Nonce,
    ) -> Result<(), RegistryError> {
        self.apply(RecipientAction::Remove, recipient, signatures, nonce)
    }

    fn apply(
        &self,
        action: RecipientAction,
        recipient: Address,
        signatures: &[SignatureBytes],
        nonce: Nonce,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write();

        if let Err(e) = self.authorize(&state, action, &recipient, signatures, nonce) {
            tracing::warn!(
                registry = %self.config.address,
                action = %action,
                recipient = %recipient,
                nonce = %nonce,
                code = e.code(),
                error = %e,
                "whitelist change rejected"
            );
            return Err(e);
        }

        state.used_nonces.insert(nonce);
        let timestamp = self.clock.now();
        let event = match action {
            RecipientAction::Add => {
                state.whitelist.insert(recipient);
                AuditEvent::RecipientAdded {
                    recipient,
                    timestamp,
                }
            }
            RecipientAction::Remove => {
                state.whitelist.remove(&recipient);
                AuditEvent::RecipientRemoved {
                    recipient,
                    timestamp,
                }
            }
        };
        state.events.append(event);
        tracing::info!(
            registry = %self.config.address,
            action = %action,
            recipient = %recipient,
            nonce = %nonce,
            "whitelist updated"
        );
        Ok(())
    }

    fn authorize(
        &self,
        state: &RegistryState,
        action: RecipientAction,
        recipient: &Address,
        signatures: &[SignatureBytes],
        nonce: Nonce,
    ) -> Result<(), RegistryError> {
        if signatures.len() != REQUIRED_SIGNATURES {
            return Err(RegistryError::InvalidSignatureCount {
                expected: REQUIRED_SIGNATURES,
                got: signatures.len(),
            });
        }
        if state.used_nonces.contains(&nonce) {
            return Err(RegistryError::NonceReused { nonce });
        }

        let digest = self.recipient_digest(action, recipient, nonce);
        let first = self.recover_owner(&digest, 0, &signatures[0])?;
        let second = self.recover_owner(&digest, 1, &signatures[1])?;

        if first == second {
            return Err(RegistryError::DuplicateSigner { signer: first });
        }
        if first > second {
            return Err(RegistryError::SignatureOrderInvalid { first, second });
        }
        if recipient.is_zero() {
            return Err(RegistryError::InvalidRecipient);
        }
        Ok(())
    }

    fn recover_owner(
        &self,
        digest: &[u8; 32],
        index: usize,
        signature: &SignatureBytes,
    ) -> Result<Address, RegistryError> {
        let signer = self
            .recovery
            .recover(digest, signature)
            .map_err(|source| RegistryError::MalformedSignature { index, source })?;
        if !self.is_owner(&signer) {
            return Err(RegistryError::UnauthorizedSigner { index, signer });
        }
        Ok(signer)
    }

    // ── Withdrawal ─────────────────────────────────────────────────────

    /// Send `amount` of custody funds to `recipient`, on behalf of
    /// `caller`.
    ///
    /// Gated only by `caller` being whitelisted; there is no nonce and no
    /// rate limit.
    ///
    /// # Errors
    ///
    /// [`RegistryError::CallerNotWhitelisted`], then
    /// [`RegistryError::InsufficientBalance`], then any token failure as
    /// [`RegistryError::Transfer`].
    pub fn withdraw(
        &self,
        caller: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), RegistryError> {
        let mut state = self.state.write();
        let result = self.execute_withdrawal(&state, caller, recipient, amount);
        match &result {
            Ok(()) => {
                state.events.append(AuditEvent::WithdrawalExecuted {
                    recipient: *recipient,
                    amount,
                    timestamp: self.clock.now(),
                });
                tracing::info!(
                    registry = %self.config.address,
                    caller = %caller,
                    recipient = %recipient,
                    amount = %amount,
                    "withdrawal executed"
                );
            }
            Err(e) => {
                tracing::warn!(
                    registry = %self.config.address,
                    caller = %caller,
                    recipient = %recipient,
                    amount = %amount,
                    code = e.code(),
                    error = %e,
                    "withdrawal rejected"
                );
            }
        }
        result
    }

    fn execute_withdrawal(
        &self,
        state: &RegistryState,
        caller: &Address,
        recipient: &Address,
        amount: Amount,
    ) -> Result<(), RegistryError> {
        if !state.whitelist.contains(caller) {
            return Err(RegistryError::CallerNotWhitelisted { caller: *caller });
        }
        let available = self.token.balance_of(&self.config.address);
        if available < amount {
            return Err(RegistryError::InsufficientBalance {
                available,
                requested: amount,
            });
        }
        self.token.transfer(&self.config.address, recipient, amount)?;
        Ok(())
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// Whether `address` is one of the two owners.
    pub fn is_owner(&self, address: &Address) -> bool {
        self.owners.contains(address)
    }

    /// Whether `address` may withdraw.
    pub fn is_whitelisted(&self, address: &Address) -> bool {
        self.state.read().whitelist.contains(address)
    }

    /// Whether `nonce` has been consumed.
    pub fn is_nonce_used(&self, nonce: Nonce) -> bool {
        self.state.read().used_nonces.contains(&nonce)
    }

    /// The owners, in configured order.
    pub fn owners(&self) -> [Address; 2] {
        self.owners
    }

    /// Custody funds currently held.
    pub fn custody_balance(&self) -> Amount {
        self.token.balance_of(&self.config.address)
    }

    /// The registry's own account.
    pub fn address(&self) -> Address {
        self.config.address
    }

    /// The custody token.
    pub fn token_address(&self) -> Address {
        self.config.token_address
    }

    /// The signing domain approvals must use.
    pub fn domain(&self) -> &Eip712Domain {
        &self.domain
    }

    /// The EIP-712 domain separator.
    pub fn domain_separator(&self) -> [u8; 32] {
        self.domain_separator
    }

    /// The exact digest owners must sign to authorize `action`.
    pub fn recipient_digest(
        &self,
        action: RecipientAction,
        recipient: &Address,
        nonce: Nonce,
    ) -> [u8; 32] {
        Eip712Domain::digest_with_separator(
            &self.domain_separator,
            &action.struct_hash(recipient, nonce),
        )
    }

    /// Every whitelisted address, in ascending order.
    pub fn whitelist(&self) -> Vec<Address> {
        let mut list: Vec<Address> = self.state.read().whitelist.iter().copied().collect();
        list.sort();
        list
    }

    /// A copy of the audit log, oldest first.
    pub fn events(&self) -> Vec<AuditEvent> {
        self.state.read().events.entries().to_vec()
    }

    /// Audit events at positions `cursor..`.
    pub fn events_since(&self, cursor: usize) -> Vec<AuditEvent> {
        self.state.read().events.events_since(cursor)
    }

    /// Number of audit events; a cursor for [`events_since`](Self::events_since).
    pub fn event_count(&self) -> usize {
        self.state.read().events.len()
    }
}
