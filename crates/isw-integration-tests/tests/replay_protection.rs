//! # Signature Replay Across Domains and Message Types
//!
//! An approval binds registry name, version, chain id, registry address,
//! action, recipient and nonce. Changing any of them must turn a valid
//! owner signature into one that recovers to a stranger.

mod common;

use std::sync::Arc;

use common::*;
use isw_core::{Address, ManualClock, Nonce};
use isw_crypto::{Eip712Domain, RecipientAction, Secp256k1Recovery};
use isw_governance::{GovernanceRegistry, RegistryConfig, RegistryError};
use isw_token::InMemoryToken;

const RECIPIENT: Address = Address::from_low_u64(0x4242);

fn second_registry(config: RegistryConfig) -> GovernanceRegistry {
    GovernanceRegistry::new(
        config,
        Arc::new(InMemoryToken::new(TOKEN)),
        Arc::new(Secp256k1Recovery),
        Arc::new(ManualClock::new(START)),
    )
    .unwrap()
}

fn assert_unauthorized(result: Result<(), RegistryError>) {
    match result {
        Err(RegistryError::UnauthorizedSigner { index: 0, .. }) => {}
        other => panic!("expected UnauthorizedSigner at index 0, got {other:?}"),
    }
}

#[test]
fn approval_for_registry_a_rejected_by_registry_b() {
    let d = deploy();
    let b = second_registry(registry_config(Address::from_low_u64(0xb2), &d.owners));

    let sigs = d.approvals(RecipientAction::Add, RECIPIENT, 1);
    assert_unauthorized(b.add_recipient(RECIPIENT, &sigs, Nonce::new(1)));
    assert!(!b.is_nonce_used(Nonce::new(1)));

    d.registry
        .add_recipient(RECIPIENT, &sigs, Nonce::new(1))
        .unwrap();
}

#[test]
fn approval_for_another_chain_rejected() {
    let d = deploy();
    let mut config = registry_config(REGISTRY, &d.owners);
    config.chain_id = 1;
    let mainnet = second_registry(config);

    let sigs = d.approvals(RecipientAction::Add, RECIPIENT, 1);
    assert_unauthorized(mainnet.add_recipient(RECIPIENT, &sigs, Nonce::new(1)));
}

#[test]
fn approval_under_another_domain_name_or_version_rejected() {
    let d = deploy();
    for (name, version) in [("SomethingElse", "1"), ("InnocentSupportWallet", "2")] {
        let domain = Eip712Domain::new(name, version, CHAIN_ID, REGISTRY);
        let sigs = sign_pair(&d.owners, &domain, RecipientAction::Add, RECIPIENT, 1);
        assert_unauthorized(d.registry.add_recipient(RECIPIENT, &sigs, Nonce::new(1)));
    }
    assert!(!d.registry.is_nonce_used(Nonce::new(1)));
}

#[test]
fn add_approval_cannot_remove() {
    let d = deploy();
    d.add(RECIPIENT, 1).unwrap();
    let add_sigs = d.approvals(RecipientAction::Add, RECIPIENT, 2);
    assert_unauthorized(
        d.registry
            .remove_recipient(RECIPIENT, &add_sigs, Nonce::new(2)),
    );
    assert!(d.registry.is_whitelisted(&RECIPIENT));
}

#[test]
fn approval_for_other_recipient_or_nonce_rejected() {
    let d = deploy();
    let sigs = d.approvals(RecipientAction::Add, RECIPIENT, 1);
    assert_unauthorized(d.registry.add_recipient(
        Address::from_low_u64(0x4243),
        &sigs,
        Nonce::new(1),
    ));
    assert_unauthorized(d.registry.add_recipient(RECIPIENT, &sigs, Nonce::new(2)));
}

#[test]
fn replayed_approval_is_nonce_reused() {
    let d = deploy();
    let sigs = d.approvals(RecipientAction::Add, RECIPIENT, 1);
    d.registry
        .add_recipient(RECIPIENT, &sigs, Nonce::new(1))
        .unwrap();
    assert_eq!(
        d.registry.add_recipient(RECIPIENT, &sigs, Nonce::new(1)),
        Err(RegistryError::NonceReused {
            nonce: Nonce::new(1)
        })
    );
}

#[test]
fn high_s_twin_is_rejected_as_malformed() {
    // secp256k1 group order n.
    const N: [u8; 32] = [
        0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff,
        0xfe, 0xba, 0xae, 0xdc, 0xe6, 0xaf, 0x48, 0xa0, 0x3b, 0xbf, 0xd2, 0x5e, 0x8c, 0xd0, 0x36,
        0x41, 0x41,
    ];
    let d = deploy();
    let mut sigs = d.approvals(RecipientAction::Add, RECIPIENT, 1);

    // s' = n - s, v flipped: the same key, a different encoding.
    let mut bytes = sigs[0].as_bytes().to_vec();
    let mut borrow = 0i16;
    for i in (0..32).rev() {
        let diff = N[i] as i16 - bytes[32 + i] as i16 - borrow;
        borrow = i16::from(diff < 0);
        bytes[32 + i] = diff.rem_euclid(256) as u8;
    }
    bytes[64] = if bytes[64] == 27 { 28 } else { 27 };
    sigs[0] = isw_crypto::SignatureBytes::new(bytes);

    let err = d
        .registry
        .add_recipient(RECIPIENT, &sigs, Nonce::new(1))
        .unwrap_err();
    assert!(matches!(
        err,
        RegistryError::MalformedSignature { index: 0, .. }
    ));
}
