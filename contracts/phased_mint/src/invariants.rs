#![allow(dead_code)]

extern crate std;

use crate::types::MetadataState;
use crate::MAX_SUPPLY;

/// INV-1: `total_minted` equals the sum of all per-phase minted counters.
pub fn assert_supply_bookkeeping(total_minted: u32, per_phase_minted: &[u32]) {
    let sum: u32 = per_phase_minted.iter().sum();
    assert_eq!(
        total_minted, sum,
        "INV-1 violated: total_minted {} != sum of per-phase counters {}",
        total_minted, sum
    );
}

/// INV-2: `total_minted` never exceeds the global supply ceiling.
pub fn assert_supply_ceiling(total_minted: u32) {
    assert!(
        total_minted <= MAX_SUPPLY,
        "INV-2 violated: total_minted {} exceeds ceiling {}",
        total_minted,
        MAX_SUPPLY
    );
}

/// INV-3: a phase never mints past its configured cap.
pub fn assert_phase_cap(phase_id: u32, minted: u32, cap: u32) {
    assert!(
        minted <= cap,
        "INV-3 violated: phase {} minted {} past its cap {}",
        phase_id,
        minted,
        cap
    );
}

/// INV-4: the sum of all released amounts never exceeds `total_received`.
pub fn assert_release_conservation(released: &[i128], total_received: i128) {
    let sum: i128 = released.iter().sum();
    assert!(
        sum <= total_received,
        "INV-4 violated: released {} exceeds total_received {}",
        sum,
        total_received
    );
}

/// INV-5: no payee is ever paid past their floor-division entitlement.
pub fn assert_entitlement_bound(released: i128, total_received: i128, shares: u32, total_shares: u32) {
    let entitlement = total_received * shares as i128 / total_shares as i128;
    assert!(
        released <= entitlement,
        "INV-5 violated: released {} exceeds entitlement {} ({}:{} shares of {})",
        released,
        entitlement,
        shares,
        total_shares,
        total_received
    );
}

/// INV-6: once frozen, the metadata record is bit-for-bit immutable.
pub fn assert_frozen_unchanged(before: &MetadataState, after: &MetadataState) {
    assert!(before.frozen, "INV-6 only applies to frozen metadata");
    assert_eq!(
        before, after,
        "INV-6 violated: frozen metadata record changed"
    );
}
