//! Shared deployment fixture: one token, one registry, one ledger, two
//! real secp256k1 owners and a funded donor.

#![allow(dead_code)]

use std::sync::Arc;

use isw_core::{Address, Amount, GroupRoot, ManualClock, Nonce, Nullifier, Timestamp};
use isw_crypto::{LocalSigner, RecipientAction, Secp256k1Recovery, SignatureBytes};
use isw_governance::{GovernanceRegistry, RegistryConfig, RegistryError};
use isw_ledger::{ContributionLedger, ContributionRequest, DonationRecord, LedgerConfig, LedgerError};
use isw_token::InMemoryToken;
use isw_zkp::{MembershipProof, MockMembershipVerifier};

pub const CHAIN_ID: u64 = 31337;
pub const TOKEN: Address = Address::from_low_u64(0x70ce);
pub const REGISTRY: Address = Address::from_low_u64(0xbeef);
pub const LEDGER: Address = Address::from_low_u64(0xd0e);
pub const VERIFIER: Address = Address::from_low_u64(0x555);
pub const DONOR: Address = Address::from_low_u64(0xd0d0);
pub const ROOT: GroupRoot = GroupRoot::from_u128(0x1111);
pub const START: Timestamp = Timestamp::from_unix(1_768_478_400);

/// Install a test subscriber once. `RUST_LOG=debug` shows the core's events.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub struct Deployment {
    pub token: Arc<InMemoryToken>,
    pub registry: Arc<GovernanceRegistry>,
    pub ledger: Arc<ContributionLedger>,
    pub verifier: Arc<MockMembershipVerifier>,
    pub clock: Arc<ManualClock>,
    /// Ascending by address.
    pub owners: [LocalSigner; 2],
}

pub fn owner_signers() -> [LocalSigner; 2] {
    let mut owners = [
        LocalSigner::from_hex("0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80")
            .unwrap(),
        LocalSigner::from_hex("0x59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d")
            .unwrap(),
    ];
    owners.sort_by_key(LocalSigner::address);
    owners
}

pub fn registry_config(address: Address, owners: &[LocalSigner; 2]) -> RegistryConfig {
    RegistryConfig::new(
        CHAIN_ID,
        address,
        owners.iter().map(LocalSigner::address).collect(),
        TOKEN,
    )
}

pub fn ledger_config(address: Address, custody_target: Address) -> LedgerConfig {
    LedgerConfig {
        address,
        verifier_address: VERIFIER,
        token_address: TOKEN,
        custody_target,
    }
}

pub fn deploy() -> Deployment {
    init_tracing();
    let token = Arc::new(InMemoryToken::new(TOKEN));
    let clock = Arc::new(ManualClock::new(START));
    let verifier = Arc::new(MockMembershipVerifier::accepting());
    let owners = owner_signers();

    let registry = GovernanceRegistry::new(
        registry_config(REGISTRY, &owners),
        token.clone(),
        Arc::new(Secp256k1Recovery),
        clock.clone(),
    )
    .unwrap();
    let ledger = ContributionLedger::new(
        ledger_config(LEDGER, REGISTRY),
        verifier.clone(),
        token.clone(),
        clock.clone(),
    )
    .unwrap();

    token.mint(&DONOR, Amount::from_tokens(1_000_000)).unwrap();
    token.approve(&DONOR, &LEDGER, Amount::MAX).unwrap();

    Deployment {
        token,
        registry: Arc::new(registry),
        ledger: Arc::new(ledger),
        verifier,
        clock,
        owners,
    }
}

impl Deployment {
    pub fn approvals(
        &self,
        action: RecipientAction,
        recipient: Address,
        nonce: u128,
    ) -> Vec<SignatureBytes> {
        sign_pair(&self.owners, self.registry.domain(), action, recipient, nonce)
    }

    pub fn add(&self, recipient: Address, nonce: u128) -> Result<(), RegistryError> {
        let sigs = self.approvals(RecipientAction::Add, recipient, nonce);
        self.registry
            .add_recipient(recipient, &sigs, Nonce::new(nonce))
    }

    pub fn remove(&self, recipient: Address, nonce: u128) -> Result<(), RegistryError> {
        let sigs = self.approvals(RecipientAction::Remove, recipient, nonce);
        self.registry
            .remove_recipient(recipient, &sigs, Nonce::new(nonce))
    }

    pub fn donate(&self, nullifier: u128, amount: Amount) -> Result<DonationRecord, LedgerError> {
        self.ledger
            .record_contribution(&DONOR, &contribution(nullifier, REGISTRY, amount))
    }
}

pub fn sign_pair(
    owners: &[LocalSigner; 2],
    domain: &isw_crypto::Eip712Domain,
    action: RecipientAction,
    recipient: Address,
    nonce: u128,
) -> Vec<SignatureBytes> {
    owners
        .iter()
        .map(|o| {
            o.sign_recipient_action(domain, action, &recipient, Nonce::new(nonce))
                .unwrap()
        })
        .collect()
}

pub fn contribution(nullifier: u128, custody_target: Address, amount: Amount) -> ContributionRequest {
    ContributionRequest {
        group_root: ROOT,
        nullifier: Nullifier::from_u128(nullifier),
        proof: MembershipProof::from_seed(nullifier),
        custody_target,
        amount,
    }
}
