//! # Contribution Ledger
//!
//! Accepts donations whose only authorization is a group-membership
//! proof. The donor's identity never reaches the ledger; the nullifier is
//! the sole replay tag, so each donor can contribute once per scope.
//!
//! ## Security Invariant
//!
//! Proof verification, the nullifier check, the token pull and the commit
//! all happen under one write lock. A nullifier is therefore consumed at
//! most once even under concurrent submission, and it is consumed only if
//! the funds actually moved.
//!
//! Lock order is ledger → token. The verifier and token never call back.

use std::collections::HashMap;
use std::sync::Arc;

use isw_core::{Address, Amount, AuditEvent, Clock, EventLog, FieldElement, Nullifier};
use isw_token::TokenLedger;
use isw_zkp::MembershipVerifier;
use parking_lot::RwLock;

use crate::config::LedgerConfig;
use crate::error::LedgerError;
use crate::record::{ContributionRequest, DonationRecord};

#[derive(Debug, Default)]
struct LedgerState {
    donations: HashMap<Nullifier, DonationRecord>,
    total_donated: Amount,
    events: EventLog,
}

/// The anonymous contribution ledger.
pub struct ContributionLedger {
    config: LedgerConfig,
    verifier: Arc<dyn MembershipVerifier>,
    token: Arc<dyn TokenLedger>,
    clock: Arc<dyn Clock>,
    state: RwLock<LedgerState>,
}

impl std::fmt::Debug for ContributionLedger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContributionLedger")
            .field("config", &self.config)
            .field("donations", &self.state.read().donations.len())
            .finish_non_exhaustive()
    }
}

impl ContributionLedger {
    /// Create a ledger.
    ///
    /// # Errors
    ///
    /// [`LedgerError::InvalidConfiguration`] if any configured address is
    /// zero or `token` does not live at `config.token_address`.
    pub fn new(
        config: LedgerConfig,
        verifier: Arc<dyn MembershipVerifier>,
        token: Arc<dyn TokenLedger>,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, LedgerError> {
        let checks = [
            (config.address, "Invalid ledger address"),
            (config.verifier_address, "Invalid verifier address"),
            (config.token_address, "Invalid token address"),
            (config.custody_target, "Invalid custody target address"),
        ];
        if let Some((_, reason)) = checks.iter().find(|(addr, _)| addr.is_zero()) {
            return Err(LedgerError::InvalidConfiguration {
                reason: (*reason).to_string(),
            });
        }
        if token.address() != config.token_address {
            return Err(LedgerError::InvalidConfiguration {
                reason: format!(
                    "token ledger lives at {}, configured {}",
                    token.address(),
                    config.token_address
                ),
            });
        }
        tracing::debug!(
            ledger = %config.address,
            custody_target = %config.custody_target,
            "contribution ledger created"
        );
        Ok(Self {
            config,
            verifier,
            token,
            clock,
            state: RwLock::new(LedgerState::default()),
        })
    }

    /// Record an anonymous contribution from `donor`.
    ///
    /// `donor` is only the token payer; it must have approved this
    /// ledger's address for at least `request.amount`. Checks, first
    /// failure wins: proof validity, nullifier freshness, token transfer
    /// into `request.custody_target`.
    ///
    /// # Errors
    ///
    /// See [`LedgerError`].
    pub fn record_contribution(
        &self,
        donor: &Address,
        request: &ContributionRequest,
    ) -> Result<DonationRecord, LedgerError> {
        let mut state = self.state.write();

        let total_donated = match self.accept(&state, donor, request) {
            Ok(total) => total,
            Err(e) => {
                tracing::warn!(
                    ledger = %self.config.address,
                    nullifier = %request.nullifier,
                    custody_target = %request.custody_target,
                    amount = %request.amount,
                    code = e.code(),
                    error = %e,
                    "contribution rejected"
                );
                return Err(e);
            }
        };

        let record = DonationRecord {
            nullifier: request.nullifier,
            amount: request.amount,
            custody_target: request.custody_target,
            timestamp: self.clock.now(),
        };
        state.donations.insert(request.nullifier, record);
        state.total_donated = total_donated;
        state.events.append(AuditEvent::DonationRecorded {
            nullifier: record.nullifier,
            custody_target: record.custody_target,
            amount: record.amount,
            timestamp: record.timestamp,
        });
        tracing::info!(
            ledger = %self.config.address,
            nullifier = %record.nullifier,
            custody_target = %record.custody_target,
            amount = %record.amount,
            "contribution recorded"
        );
        Ok(record)
    }

    /// Everything up to and including the token pull. Returns the new
    /// running total.
    fn accept(
        &self,
        state: &LedgerState,
        donor: &Address,
        request: &ContributionRequest,
    ) -> Result<Amount, LedgerError> {
        let message = FieldElement::from(request.amount);
        let scope = FieldElement::from(request.custody_target);
        let valid = self.verifier.verify(
            &request.group_root,
            &request.nullifier,
            &request.proof,
            &message,
            &scope,
        )?;
        if !valid {
            return Err(LedgerError::InvalidProof {
                nullifier: request.nullifier,
            });
        }
        if state.donations.contains_key(&request.nullifier) {
            return Err(LedgerError::NullifierReused {
                nullifier: request.nullifier,
            });
        }
        let total = state
            .total_donated
            .checked_add(request.amount)
            .ok_or(LedgerError::TotalOverflow {
                total: state.total_donated,
                amount: request.amount,
            })?;
        self.token.transfer_from(
            &self.config.address,
            donor,
            &request.custody_target,
            request.amount,
        )?;
        Ok(total)
    }

    // ── Reads ──────────────────────────────────────────────────────────

    /// The record for `nullifier`, or [`DonationRecord::EMPTY`].
    pub fn donation_by_nullifier(&self, nullifier: &Nullifier) -> DonationRecord {
        self.state
            .read()
            .donations
            .get(nullifier)
            .copied()
            .unwrap_or(DonationRecord::EMPTY)
    }

    /// Whether `nullifier` has been spent.
    pub fn is_nullifier_used(&self, nullifier: &Nullifier) -> bool {
        self.state.read().donations.contains_key(nullifier)
    }

    /// Number of recorded contributions.
    pub fn donation_count(&self) -> usize {
        self.state.read().donations.len()
    }

    /// Sum of all recorded contributions.
    pub fn total_donated(&self) -> Amount {
        self.state.read().total_donated
    }

    /// The ledger's own account (the token spender).
    pub fn address(&self) -> Address {
        self.config.address
    }

    /// The configured verifier address.
    pub fn verifier_address(&self) -> Address {
        self.config.verifier_address
    }

    /// The contribution token.
    pub fn token_address(&self) -> Address {
        self.config.token_address
    }

    /// The default custody target.
    pub fn custody_target(&self) -> Address {
        self.config.custody_target
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
