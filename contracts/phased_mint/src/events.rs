//! # Contract events
//!
//! Payload structs and publish helpers for every externally observable
//! state change. Topics are short symbols; payloads are `contracttype`
//! structs so off-chain consumers can decode them field by field.
//!
//! | Topic       | Payload             | Emitted on                      |
//! |-------------|---------------------|---------------------------------|
//! | `minted`    | [`TokensMinted`]    | successful `mint_presale` (its `paid` field carries the credited payment) |
//! | `received`  | [`PaymentReceived`] | direct `fund` contribution      |
//! | `released`  | [`PaymentReleased`] | successful `release`            |
//! | `phase`     | `u32`               | `set_current_phase`             |
//! | `paused`    | `Address` (caller)  | `pause`                         |
//! | `unpaused`  | `Address` (caller)  | `unpause`                       |
//! | `own_xfer`  | [`OwnerChanged`]    | transfer / renounce ownership   |
//! | `frozen`    | `Address` (caller)  | `freeze_metadata`               |
//! | `revealed`  | `bool`              | `set_revealed`                  |

use soroban_sdk::{contracttype, symbol_short, Address, Env};

/// A batch of tokens was issued to one wallet.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct TokensMinted {
    pub minter: Address,
    pub phase_id: u32,
    /// First id of the batch; the batch covers `quantity` sequential ids.
    pub first_token_id: u32,
    pub quantity: u32,
    /// Amount credited to the payment ledger for this batch.
    pub paid: i128,
}

/// Funds were credited to the payment ledger.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentReceived {
    pub from: Address,
    pub amount: i128,
}

/// A payee withdrew their outstanding entitlement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PaymentReleased {
    pub payee: Address,
    pub amount: i128,
}

/// The administrator changed. `new_owner` is `None` after renouncement.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct OwnerChanged {
    pub previous_owner: Address,
    pub new_owner: Option<Address>,
}

pub fn minted(env: &Env, event: TokensMinted) {
    env.events()
        .publish((symbol_short!("minted"), event.phase_id), event);
}

pub fn received(env: &Env, event: PaymentReceived) {
    env.events().publish((symbol_short!("received"),), event);
}

pub fn released(env: &Env, event: PaymentReleased) {
    env.events().publish((symbol_short!("released"),), event);
}

pub fn phase_changed(env: &Env, phase_id: u32) {
    env.events().publish((symbol_short!("phase"),), phase_id);
}

pub fn paused(env: &Env, caller: &Address) {
    env.events()
        .publish((symbol_short!("paused"),), caller.clone());
}

pub fn unpaused(env: &Env, caller: &Address) {
    env.events()
        .publish((symbol_short!("unpaused"),), caller.clone());
}

pub fn owner_changed(env: &Env, event: OwnerChanged) {
    env.events().publish((symbol_short!("own_xfer"),), event);
}

pub fn metadata_frozen(env: &Env, caller: &Address) {
    env.events()
        .publish((symbol_short!("frozen"),), caller.clone());
}

pub fn reveal_set(env: &Env, revealed: bool) {
    env.events().publish((symbol_short!("revealed"),), revealed);
}
