//! # Access guard and pause switch
//!
//! Single-administrator ownership plus the binary pause latch that gates
//! the mint path. This module owns its storage keys ([`AccessKey`]); no
//! other module reads or writes them.
//!
//! The guard failure deliberately panics with the literal string
//! `"caller is not the owner"` so existing integrations that match on the
//! legacy revert text keep working. Every other failure in the contract is
//! a typed [`crate::Error`] code.
//!
//! Ownership can be renounced. A contract with no owner rejects every
//! gated call forever; configuration is then permanently fixed.

use soroban_sdk::{contracttype, Address, Env};

use crate::Error;

/// Storage keys owned by this module (Instance tier).
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AccessKey {
    /// Current administrator. Absent before init and after renouncement.
    Owner,
    /// Pause latch for the mint path. Absent means active.
    Paused,
}

/// Record the initial administrator. Called once from `initialize`.
pub fn init_owner(env: &Env, owner: &Address) {
    env.storage().instance().set(&AccessKey::Owner, owner);
}

/// Current administrator.
/// Panics if the contract is uninitialized or ownership was renounced.
pub fn owner(env: &Env) -> Address {
    env.storage()
        .instance()
        .get(&AccessKey::Owner)
        .expect("owner not set")
}

/// Guard for every administrator-gated entry point.
///
/// Panics with the exact legacy message when `caller` is not the current
/// owner, including when no owner exists at all.
pub fn require_owner(env: &Env, caller: &Address) {
    let owner: Option<Address> = env.storage().instance().get(&AccessKey::Owner);
    match owner {
        Some(owner) if owner == *caller => {}
        _ => panic!("caller is not the owner"),
    }
}

/// Hand the administrator role to `new_owner`.
pub fn transfer_ownership(env: &Env, new_owner: &Address) {
    env.storage().instance().set(&AccessKey::Owner, new_owner);
}

/// Remove the administrator entirely. Irreversible.
pub fn renounce_ownership(env: &Env) {
    env.storage().instance().remove(&AccessKey::Owner);
}

/// True while the mint path is paused.
pub fn paused(env: &Env) -> bool {
    env.storage()
        .instance()
        .get(&AccessKey::Paused)
        .unwrap_or(false)
}

/// Engage the pause latch. Fails if already paused.
pub fn pause(env: &Env) -> Result<(), Error> {
    if paused(env) {
        return Err(Error::OperationPaused);
    }
    env.storage().instance().set(&AccessKey::Paused, &true);
    Ok(())
}

/// Release the pause latch. Fails if already active.
pub fn unpause(env: &Env) -> Result<(), Error> {
    if !paused(env) {
        return Err(Error::InvalidState);
    }
    env.storage().instance().set(&AccessKey::Paused, &false);
    Ok(())
}
