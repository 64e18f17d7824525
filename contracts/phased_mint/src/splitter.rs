//! # Payment splitter
//!
//! Pull-based revenue splitting. Payees and their share weights are fixed
//! at initialization; each payee (or anyone on their behalf) calls
//! `release` to withdraw the difference between their proportional
//! entitlement and what they have already been paid.
//!
//! `TotalReceived` is the running sum of every amount ever credited to the
//! contract — mint payments and direct `fund` contributions — not the
//! current token balance, so entitlements stay correct after earlier
//! releases.
//!
//! This module owns its storage keys ([`SplitterKey`]). All keys live on
//! the instance tier: the payee set is fixed, small, and lives exactly as
//! long as the contract.

use soroban_sdk::{contracttype, token, Address, Env, Vec};

use crate::{storage, Error};

/// Storage keys owned by this module (Instance tier).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum SplitterKey {
    /// All payees, in construction order.
    Payees,
    /// Sum of all share weights.
    TotalShares,
    /// Running sum of every amount ever credited. Monotonic.
    TotalReceived,
    /// Share weight of one payee.
    Shares(Address),
    /// Amount already released to one payee. Monotonic.
    Released(Address),
}

/// Record the payee set. Called once from `initialize`.
///
/// An empty `payees` vector defaults to the administrator holding all 100
/// shares. Fails with [`Error::InvalidPayees`] on length mismatch, a zero
/// share weight, or a duplicate payee address.
pub fn init(env: &Env, fallback: &Address, payees: Vec<Address>, shares: Vec<u32>) -> Result<(), Error> {
    let (payees, shares) = if payees.is_empty() && shares.is_empty() {
        (
            soroban_sdk::vec![env, fallback.clone()],
            soroban_sdk::vec![env, 100u32],
        )
    } else {
        (payees, shares)
    };

    if payees.len() != shares.len() || payees.is_empty() {
        return Err(Error::InvalidPayees);
    }

    let mut total_shares: u32 = 0;
    for i in 0..payees.len() {
        let payee = payees.get_unchecked(i);
        let weight = shares.get_unchecked(i);
        if weight == 0 {
            return Err(Error::InvalidPayees);
        }
        if env
            .storage()
            .instance()
            .has(&SplitterKey::Shares(payee.clone()))
        {
            return Err(Error::InvalidPayees);
        }
        env.storage()
            .instance()
            .set(&SplitterKey::Shares(payee), &weight);
        total_shares += weight;
    }

    env.storage().instance().set(&SplitterKey::Payees, &payees);
    env.storage()
        .instance()
        .set(&SplitterKey::TotalShares, &total_shares);
    Ok(())
}

/// All payees, in construction order.
pub fn payees(env: &Env) -> Vec<Address> {
    env.storage()
        .instance()
        .get(&SplitterKey::Payees)
        .unwrap_or_else(|| Vec::new(env))
}

/// Share weight of `payee`, 0 if it holds no shares.
pub fn shares(env: &Env, payee: &Address) -> u32 {
    env.storage()
        .instance()
        .get(&SplitterKey::Shares(payee.clone()))
        .unwrap_or(0)
}

/// Sum of all share weights.
pub fn total_shares(env: &Env) -> u32 {
    env.storage()
        .instance()
        .get(&SplitterKey::TotalShares)
        .unwrap_or(0)
}

/// Running sum of every amount ever credited.
pub fn total_received(env: &Env) -> i128 {
    env.storage()
        .instance()
        .get(&SplitterKey::TotalReceived)
        .unwrap_or(0)
}

/// Amount already released to `payee`.
pub fn released(env: &Env, payee: &Address) -> i128 {
    env.storage()
        .instance()
        .get(&SplitterKey::Released(payee.clone()))
        .unwrap_or(0)
}

/// Credit incoming funds to the running total. Called by the mint path
/// and the direct `fund` entry point after the token transfer succeeds.
pub fn credit(env: &Env, amount: i128) {
    let total = total_received(env) + amount;
    env.storage()
        .instance()
        .set(&SplitterKey::TotalReceived, &total);
}

/// Pay out everything currently due to `payee` and return the amount.
///
/// Entitlement is `total_received * shares / total_shares` with floor
/// division; the due amount is the entitlement minus what was already
/// released. Fails [`Error::UnknownPayee`] for an address with no shares
/// and [`Error::NothingDue`] when nothing is outstanding.
pub fn release(env: &Env, payee: &Address) -> Result<i128, Error> {
    let weight = shares(env, payee);
    if weight == 0 {
        return Err(Error::UnknownPayee);
    }

    let entitlement = total_received(env) * weight as i128 / total_shares(env) as i128;
    let already = released(env, payee);
    let due = entitlement - already;
    if due <= 0 {
        return Err(Error::NothingDue);
    }

    let token_client = token::Client::new(env, &storage::payment_token(env));
    token_client.transfer(&env.current_contract_address(), payee, &due);

    env.storage()
        .instance()
        .set(&SplitterKey::Released(payee.clone()), &entitlement);

    Ok(due)
}
