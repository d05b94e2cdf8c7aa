//! # Concurrent Submission
//!
//! Many threads racing the same nonce or nullifier: exactly one wins, the
//! rest see the replay error, and balances reflect exactly one movement.

mod common;

use std::sync::Barrier;
use std::thread;

use common::*;
use isw_core::{Address, Amount, Nonce, Nullifier};
use isw_crypto::RecipientAction;
use isw_governance::RegistryError;
use isw_ledger::LedgerError;
use isw_token::TokenLedger;

const THREADS: usize = 16;

#[test]
fn same_nullifier_races_record_once() {
    let d = deploy();
    let barrier = Barrier::new(THREADS);

    let results: Vec<Result<_, LedgerError>> = thread::scope(|s| {
        let handles: Vec<_> = (0..THREADS)
            .map(|_| {
                let d = &d;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    d.donate(999, Amount::new(100))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let wins = results.iter().filter(|r| r.is_ok()).count();
    assert_eq!(wins, 1);
    for r in results.iter().filter(|r| r.is_err()) {
        assert_eq!(
            r.as_ref().unwrap_err(),
            &LedgerError::NullifierReused {
                nullifier: Nullifier::from_u128(999)
            }
        );
    }
    assert_eq!(d.registry.custody_balance(), Amount::new(100));
    assert_eq!(d.ledger.event_count(), 1);
}

#[test]
fn same_nonce_races_commit_once() {
    let d = deploy();
    let barrier = Barrier::new(THREADS);
    // Every thread whitelists a different recipient with the same nonce.
    let prepared: Vec<_> = (0..THREADS)
        .map(|i| {
            let recipient = Address::from_low_u64(0x1000 + i as u64);
            (recipient, d.approvals(RecipientAction::Add, recipient, 7))
        })
        .collect();

    let results: Vec<Result<(), RegistryError>> = thread::scope(|s| {
        let handles: Vec<_> = prepared
            .iter()
            .map(|(recipient, sigs)| {
                let d = &d;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    d.registry.add_recipient(*recipient, sigs, Nonce::new(7))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    assert!(results
        .iter()
        .filter_map(|r| r.as_ref().err())
        .all(|e| e.code() == "NONCE_REUSED"));
    assert_eq!(d.registry.whitelist().len(), 1);
    assert_eq!(d.registry.event_count(), 1);
}

#[test]
fn distinct_nullifiers_all_succeed_in_parallel() {
    let d = deploy();
    thread::scope(|s| {
        for i in 0..THREADS as u128 {
            let d = &d;
            s.spawn(move || d.donate(10_000 + i, Amount::new(3)).unwrap());
        }
    });
    assert_eq!(d.ledger.donation_count(), THREADS);
    assert_eq!(d.ledger.total_donated(), Amount::new(3 * THREADS as u128));
    assert_eq!(d.registry.custody_balance(), Amount::new(3 * THREADS as u128));
}

#[test]
fn concurrent_withdrawals_never_overdraw() {
    let d = deploy();
    d.donate(1, Amount::new(1_000)).unwrap();
    let recipients: Vec<Address> = (0..THREADS)
        .map(|i| Address::from_low_u64(0x2000 + i as u64))
        .collect();
    for (n, r) in recipients.iter().enumerate() {
        d.add(*r, n as u128 + 1).unwrap();
    }

    let barrier = Barrier::new(THREADS);
    let successes: usize = thread::scope(|s| {
        let handles: Vec<_> = recipients
            .iter()
            .map(|r| {
                let d = &d;
                let barrier = &barrier;
                s.spawn(move || {
                    barrier.wait();
                    d.registry.withdraw(r, r, Amount::new(300)).is_ok()
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| usize::from(h.join().unwrap()))
            .sum()
    });

    assert_eq!(successes, 3);
    assert_eq!(d.registry.custody_balance(), Amount::new(100));
    let paid: u128 = recipients
        .iter()
        .map(|r| d.token.balance_of(r).as_u128())
        .sum();
    assert_eq!(paid, 900);
}

#[test]
fn reads_during_writes_see_whole_states() {
    let d = deploy();
    let target = Address::from_low_u64(0x3000);
    thread::scope(|s| {
        let d = &d;
        s.spawn(move || {
            for n in 0..50u128 {
                if n % 2 == 0 {
                    d.add(target, n).unwrap();
                } else {
                    d.remove(target, n).unwrap();
                }
            }
        });
        s.spawn(move || {
            for _ in 0..200 {
                // Whitelisted exactly when an odd number of events committed.
                let events = d.registry.event_count();
                let listed = d.registry.is_whitelisted(&target);
                let events_after = d.registry.event_count();
                if events == events_after {
                    assert_eq!(listed, events % 2 == 1);
                }
            }
        });
    });
    assert!(!d.registry.is_whitelisted(&target));
}
