//! # Storage
//!
//! Typed helpers over Soroban's two storage tiers for the mint ledger,
//! phase registry, and metadata record. The access guard and the payment
//! splitter own their storage slices in their own modules and never touch
//! these keys.
//!
//! ## Instance storage (contract-lifetime TTL)
//!
//! | Key                 | Type            | Description                         |
//! |---------------------|-----------------|-------------------------------------|
//! | `PaymentToken`      | `Address`       | Token all payments are made in      |
//! | `CurrentPhase`      | `u32`           | Active phase id (0 = none)          |
//! | `MaxPerMint`        | `u32`           | Global per-call purchase cap        |
//! | `WalletPhaseCap`    | `u32`           | Cumulative per-wallet cap (0 = off) |
//! | `TotalMinted`       | `u32`           | Tokens issued across all phases     |
//! | `Metadata`          | `MetadataState` | URI strings + freeze latch          |
//! | `Revealed`          | `bool`          | Reveal flag for URI resolution      |
//!
//! Instance TTL is bumped by **7 days** whenever it falls below 1 day remaining.
//!
//! ## Persistent storage (per-entry TTL)
//!
//! | Key                       | Type      | Description                       |
//! |---------------------------|-----------|-----------------------------------|
//! | `Phase(id)`               | `Phase`   | Per-phase price/cap/root          |
//! | `PhaseMinted(id)`         | `u32`     | Tokens issued by one phase        |
//! | `WalletMinted(addr, id)`  | `u32`     | Tokens issued to one wallet/phase |
//! | `TokenOwner(token_id)`    | `Address` | Owner recorded at mint time       |
//!
//! Persistent TTL is bumped by **30 days** whenever it falls below 7 days remaining.

use soroban_sdk::{contracttype, Address, BytesN, Env, String};

use crate::types::{MetadataState, Phase};

// ── TTL Constants ────────────────────────────────────────────────────

/// Approximate ledgers per day (~5 seconds per ledger).
const DAY_IN_LEDGERS: u32 = 17_280;

/// Instance storage: bump by 7 days when below 1 day remaining.
const INSTANCE_BUMP_AMOUNT: u32 = 7 * DAY_IN_LEDGERS;
const INSTANCE_LIFETIME_THRESHOLD: u32 = DAY_IN_LEDGERS;

/// Persistent storage: bump by 30 days when below 7 days remaining.
const PERSISTENT_BUMP_AMOUNT: u32 = 30 * DAY_IN_LEDGERS;
const PERSISTENT_LIFETIME_THRESHOLD: u32 = 7 * DAY_IN_LEDGERS;

// ── Storage Keys ─────────────────────────────────────────────────────

/// Mint-ledger, phase-registry, and metadata storage keys.
///
/// Instance-tier keys hold contract-wide scalars and are extended
/// together. Persistent-tier keys hold per-phase / per-token data with
/// independent TTLs.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum DataKey {
    /// Token in which all purchases and releases are denominated (Instance).
    PaymentToken,
    /// Id of the phase currently open for purchases, 0 = none (Instance).
    CurrentPhase,
    /// Global maximum quantity for a single mint call (Instance).
    MaxPerMint,
    /// Cumulative per-wallet-per-phase cap, 0 disables (Instance).
    WalletPhaseCap,
    /// Total tokens issued across all phases (Instance).
    TotalMinted,
    /// Metadata strings and freeze latch (Instance).
    Metadata,
    /// Whether token URIs resolve to the base URI yet (Instance).
    Revealed,
    /// Phase configuration keyed by phase id (Persistent).
    Phase(u32),
    /// Tokens issued by one phase (Persistent).
    PhaseMinted(u32),
    /// Tokens issued to one wallet within one phase (Persistent).
    WalletMinted(Address, u32),
    /// Owner recorded for a token at mint time (Persistent).
    TokenOwner(u32),
}

// ── Instance Storage Helpers ─────────────────────────────────────────

/// Extend instance storage TTL if it falls below the threshold.
fn bump_instance(env: &Env) {
    env.storage()
        .instance()
        .extend_ttl(INSTANCE_LIFETIME_THRESHOLD, INSTANCE_BUMP_AMOUNT);
}

/// True once `initialize` has run. Keyed on the payment token rather than
/// the owner so that renouncing ownership can never reopen initialization.
pub fn is_initialized(env: &Env) -> bool {
    env.storage().instance().has(&DataKey::PaymentToken)
}

/// Store the payment token address. Written once at initialization.
pub fn set_payment_token(env: &Env, token: &Address) {
    env.storage().instance().set(&DataKey::PaymentToken, token);
    bump_instance(env);
}

/// Retrieve the payment token address.
/// Panics if the contract has not been initialized.
pub fn payment_token(env: &Env) -> Address {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::PaymentToken)
        .expect("payment token not set")
}

pub fn set_current_phase(env: &Env, phase_id: u32) {
    env.storage()
        .instance()
        .set(&DataKey::CurrentPhase, &phase_id);
    bump_instance(env);
}

/// Active phase id; 0 means no phase is open for purchases.
pub fn current_phase(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::CurrentPhase)
        .unwrap_or(0)
}

pub fn set_max_purchase_per_mint(env: &Env, max: u32) {
    env.storage().instance().set(&DataKey::MaxPerMint, &max);
    bump_instance(env);
}

pub fn max_purchase_per_mint(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::MaxPerMint)
        .unwrap_or(crate::DEFAULT_MAX_PURCHASE_PER_MINT)
}

pub fn set_wallet_phase_cap(env: &Env, cap: u32) {
    env.storage().instance().set(&DataKey::WalletPhaseCap, &cap);
    bump_instance(env);
}

/// Cumulative per-wallet-per-phase cap; 0 disables the check.
pub fn wallet_phase_cap(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::WalletPhaseCap)
        .unwrap_or(0)
}

pub fn set_total_minted(env: &Env, total: u32) {
    env.storage().instance().set(&DataKey::TotalMinted, &total);
    bump_instance(env);
}

pub fn total_minted(env: &Env) -> u32 {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::TotalMinted)
        .unwrap_or(0)
}

/// Save the metadata record (strings + freeze latch).
pub fn save_metadata(env: &Env, metadata: &MetadataState) {
    env.storage().instance().set(&DataKey::Metadata, metadata);
    bump_instance(env);
}

/// Load the metadata record, defaulting to empty unfrozen strings.
pub fn metadata(env: &Env) -> MetadataState {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Metadata)
        .unwrap_or_else(|| MetadataState {
            base_uri: String::from_str(env, ""),
            not_revealed_uri: String::from_str(env, ""),
            provenance_hash: String::from_str(env, ""),
            frozen: false,
        })
}

pub fn set_revealed(env: &Env, revealed: bool) {
    env.storage().instance().set(&DataKey::Revealed, &revealed);
    bump_instance(env);
}

pub fn revealed(env: &Env) -> bool {
    bump_instance(env);
    env.storage()
        .instance()
        .get(&DataKey::Revealed)
        .unwrap_or(false)
}

// ── Persistent Storage Helpers ───────────────────────────────────────

/// Extend the TTL for a persistent storage key.
fn bump_persistent(env: &Env, key: &DataKey) {
    env.storage()
        .persistent()
        .extend_ttl(key, PERSISTENT_LIFETIME_THRESHOLD, PERSISTENT_BUMP_AMOUNT);
}

/// Save a phase configuration under its administrator-chosen id.
pub fn save_phase(env: &Env, phase_id: u32, phase: &Phase) {
    let key = DataKey::Phase(phase_id);
    env.storage().persistent().set(&key, phase);
    bump_persistent(env, &key);
}

/// Load a phase configuration, or the zero-valued default if the id was
/// never configured (price 0, cap 0, all-zero root).
pub fn phase(env: &Env, phase_id: u32) -> Phase {
    let key = DataKey::Phase(phase_id);
    if let Some(phase) = env.storage().persistent().get::<_, Phase>(&key) {
        bump_persistent(env, &key);
        phase
    } else {
        Phase {
            unit_price: 0,
            purchase_cap: 0,
            merkle_root: BytesN::from_array(env, &[0u8; 32]),
        }
    }
}

pub fn set_phase_minted(env: &Env, phase_id: u32, minted: u32) {
    let key = DataKey::PhaseMinted(phase_id);
    env.storage().persistent().set(&key, &minted);
    bump_persistent(env, &key);
}

/// Tokens issued by one phase so far.
pub fn phase_minted(env: &Env, phase_id: u32) -> u32 {
    let key = DataKey::PhaseMinted(phase_id);
    if let Some(minted) = env.storage().persistent().get::<_, u32>(&key) {
        bump_persistent(env, &key);
        minted
    } else {
        0
    }
}

pub fn set_wallet_phase_minted(env: &Env, wallet: &Address, phase_id: u32, minted: u32) {
    let key = DataKey::WalletMinted(wallet.clone(), phase_id);
    env.storage().persistent().set(&key, &minted);
    bump_persistent(env, &key);
}

/// Tokens issued to one wallet within one phase so far.
pub fn wallet_phase_minted(env: &Env, wallet: &Address, phase_id: u32) -> u32 {
    let key = DataKey::WalletMinted(wallet.clone(), phase_id);
    if let Some(minted) = env.storage().persistent().get::<_, u32>(&key) {
        bump_persistent(env, &key);
        minted
    } else {
        0
    }
}

/// Record the owner of a freshly minted token.
pub fn set_token_owner(env: &Env, token_id: u32, owner: &Address) {
    let key = DataKey::TokenOwner(token_id);
    env.storage().persistent().set(&key, owner);
    bump_persistent(env, &key);
}

/// Owner recorded at mint time, or `None` for an unminted id.
pub fn token_owner(env: &Env, token_id: u32) -> Option<Address> {
    let key = DataKey::TokenOwner(token_id);
    let owner = env.storage().persistent().get::<_, Address>(&key);
    if owner.is_some() {
        bump_persistent(env, &key);
    }
    owner
}
