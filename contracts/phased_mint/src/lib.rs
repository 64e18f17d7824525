//! # Phased Mint Contract
//!
//! A fixed-supply collectible issuance contract with phased, allowlist-gated
//! sales and pull-based revenue splitting. The single `PhasedMint` contract
//! exposes entry points covering the full sale lifecycle:
//!
//! | Concern        | Entry Point(s)                                          |
//! |----------------|---------------------------------------------------------|
//! | Bootstrap      | [`PhasedMint::initialize`]                              |
//! | Ownership      | `transfer_ownership`, `renounce_ownership`, `owner`     |
//! | Operation gate | `pause`, `unpause`, `paused`                            |
//! | Phase registry | `set_phase_params`, `set_phase_merkle_root`, `set_current_phase` |
//! | Purchase       | `is_allow_list_eligible`, `mint_presale`                |
//! | Revenue        | `fund`, `release`, splitter getters                     |
//! | Metadata       | `set_provenance_hash`, `set_token_base_uri`, `set_not_revealed_uri`, `set_revealed`, `freeze_metadata`, `token_uri` |
//!
//! ## Architecture
//!
//! Authorization and the pause latch are fully delegated to [`access`].
//! Allowlist proof checking is fully delegated to [`merkle`]. The payment
//! ledger is fully delegated to [`splitter`]. Phase, counter, token, and
//! metadata storage access is fully delegated to [`storage`]. This file
//! contains **only** the public entry points, their check ordering, and
//! event emissions — no storage key is touched here directly.
//!
//! Every fallible entry point returns `Result<_, Error>`; a returned error
//! makes the host roll the whole transaction back, so no partial mutation
//! is ever observable. The only string panics are the legacy owner-guard
//! message and the `owner` read after renouncement.

#![no_std]

use soroban_sdk::{
    contract, contracterror, contractimpl, token, Address, BytesN, Env, String, Vec,
};

mod access;
mod events;
mod merkle;
mod splitter;
mod storage;
mod types;

#[cfg(test)]
mod invariants;
#[cfg(test)]
mod test_splitter;

pub use events::{OwnerChanged, PaymentReceived, PaymentReleased, TokensMinted};
pub use types::{MetadataState, Phase};

/// Hard ceiling on tokens issued across all phases.
pub const MAX_SUPPLY: u32 = 9_999;

/// Token ids are assigned sequentially starting here.
pub const TOKEN_ID_OFFSET: u32 = 1;

/// Per-call purchase cap before the administrator configures one.
pub const DEFAULT_MAX_PURCHASE_PER_MINT: u32 = 10;

/// Longest URI `token_uri` can compose (base prefix plus decimal id).
pub const MAX_URI_LEN: u32 = 256;

/// Decimal digits reserved for the token id suffix of a composed URI.
const MAX_ID_DIGITS: u32 = 10;

#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum Error {
    /// Caller is not the administrator. The access guard itself panics
    /// with the legacy `"caller is not the owner"` string instead; this
    /// code is reserved for integrations that match on codes.
    AccessDenied = 1,
    /// The mint path is paused (or `pause` was called while paused).
    OperationPaused = 2,
    /// Wrong or unset active phase, or an otherwise inapplicable state.
    InvalidState = 3,
    /// The allowlist proof does not match the phase's root.
    InvalidProof = 4,
    /// Per-call, per-wallet, per-phase, or global cap exceeded.
    LimitExceeded = 5,
    /// Offered payment does not equal `unit_price * quantity`.
    PaymentMismatch = 6,
    /// Metadata mutation after `freeze_metadata`.
    Frozen = 7,
    /// `release` target holds no shares.
    UnknownPayee = 8,
    /// `release` target has no outstanding entitlement.
    NothingDue = 9,
    /// `initialize` called more than once.
    AlreadyInitialized = 10,
    /// Malformed payee/share construction arguments.
    InvalidPayees = 11,
    /// Base URI too long for `token_uri` to append a token id to.
    UriTooLong = 12,
}

#[contract]
pub struct PhasedMint;

#[contractimpl]
impl PhasedMint {
    // ─────────────────────────────────────────────────────────
    // Initialisation
    // ─────────────────────────────────────────────────────────

    /// Initialise the contract: administrator, payment token, and payee set.
    ///
    /// Must be called exactly once immediately after deployment; subsequent
    /// calls fail with `Error::AlreadyInitialized` (even after ownership
    /// is renounced — the contract can never be re-seized).
    ///
    /// Passing empty `payees`/`shares` defaults to `owner` holding all 100
    /// shares. Otherwise the vectors must have equal length, every weight
    /// must be positive, and payee addresses must be unique.
    pub fn initialize(
        env: Env,
        owner: Address,
        payment_token: Address,
        payees: Vec<Address>,
        shares: Vec<u32>,
    ) -> Result<(), Error> {
        owner.require_auth();
        if storage::is_initialized(&env) {
            return Err(Error::AlreadyInitialized);
        }
        access::init_owner(&env, &owner);
        storage::set_payment_token(&env, &payment_token);
        splitter::init(&env, &owner, payees, shares)
    }

    // ─────────────────────────────────────────────────────────
    // Ownership
    // ─────────────────────────────────────────────────────────

    /// Hand the administrator role to `new_owner`.
    pub fn transfer_ownership(env: Env, caller: Address, new_owner: Address) {
        require_admin(&env, &caller);
        access::transfer_ownership(&env, &new_owner);
        events::owner_changed(
            &env,
            OwnerChanged {
                previous_owner: caller,
                new_owner: Some(new_owner),
            },
        );
    }

    /// Renounce the administrator role. Irreversible: every gated entry
    /// point fails from then on and configuration is permanently fixed.
    pub fn renounce_ownership(env: Env, caller: Address) {
        require_admin(&env, &caller);
        access::renounce_ownership(&env);
        events::owner_changed(
            &env,
            OwnerChanged {
                previous_owner: caller,
                new_owner: None,
            },
        );
    }

    /// Current administrator. Panics if ownership was renounced.
    pub fn owner(env: Env) -> Address {
        access::owner(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Pause switch
    // ─────────────────────────────────────────────────────────

    /// Pause the mint path. Fails `OperationPaused` if already paused.
    pub fn pause(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller);
        access::pause(&env)?;
        events::paused(&env, &caller);
        Ok(())
    }

    /// Reopen the mint path. Fails `InvalidState` if not paused.
    pub fn unpause(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller);
        access::unpause(&env)?;
        events::unpaused(&env, &caller);
        Ok(())
    }

    pub fn paused(env: Env) -> bool {
        access::paused(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Phase registry
    // ─────────────────────────────────────────────────────────

    /// Upsert a phase's price and cap, preserving its allowlist root.
    pub fn set_phase_params(
        env: Env,
        caller: Address,
        phase_id: u32,
        unit_price: i128,
        purchase_cap: u32,
    ) -> Result<(), Error> {
        require_admin(&env, &caller);
        if unit_price < 0 {
            return Err(Error::InvalidState);
        }
        let mut phase = storage::phase(&env, phase_id);
        phase.unit_price = unit_price;
        phase.purchase_cap = purchase_cap;
        storage::save_phase(&env, phase_id, &phase);
        Ok(())
    }

    /// Upsert a phase's allowlist root, preserving its price and cap.
    pub fn set_phase_merkle_root(env: Env, caller: Address, phase_id: u32, root: BytesN<32>) {
        require_admin(&env, &caller);
        let mut phase = storage::phase(&env, phase_id);
        phase.merkle_root = root;
        storage::save_phase(&env, phase_id, &phase);
    }

    /// Point the active-phase reference at `phase_id` (0 closes all sales).
    ///
    /// The target phase is not required to be configured; opening an
    /// unconfigured phase is the administrator's responsibility (its zero
    /// cap means it cannot mint anyway).
    pub fn set_current_phase(env: Env, caller: Address, phase_id: u32) {
        require_admin(&env, &caller);
        storage::set_current_phase(&env, phase_id);
        events::phase_changed(&env, phase_id);
    }

    /// Full phase record for `phase_id`; zero-valued if never configured.
    pub fn presale_params(env: Env, phase_id: u32) -> Phase {
        storage::phase(&env, phase_id)
    }

    /// Active phase id, 0 when no phase is open.
    pub fn current_phase(env: Env) -> u32 {
        storage::current_phase(&env)
    }

    /// Set the global per-call purchase cap.
    pub fn set_max_purchase_per_mint(env: Env, caller: Address, max: u32) {
        require_admin(&env, &caller);
        storage::set_max_purchase_per_mint(&env, max);
    }

    pub fn max_purchase_per_mint(env: Env) -> u32 {
        storage::max_purchase_per_mint(&env)
    }

    /// Set the cumulative per-wallet-per-phase cap; 0 disables it.
    ///
    /// The per-call cap always applies; this cap additionally bounds one
    /// wallet's total purchases across a whole phase when non-zero.
    pub fn set_wallet_phase_cap(env: Env, caller: Address, cap: u32) {
        require_admin(&env, &caller);
        storage::set_wallet_phase_cap(&env, cap);
    }

    pub fn wallet_phase_cap(env: Env) -> u32 {
        storage::wallet_phase_cap(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Purchase path
    // ─────────────────────────────────────────────────────────

    /// Read-only eligibility check: does `proof` place `wallet` in phase
    /// `phase_id`'s allowlist? Never fails; forged proofs return `false`.
    pub fn is_allow_list_eligible(
        env: Env,
        phase_id: u32,
        wallet: Address,
        proof: Vec<BytesN<32>>,
    ) -> bool {
        let phase = storage::phase(&env, phase_id);
        let leaf = merkle::address_leaf(&env, &wallet);
        merkle::verify(&env, &phase.merkle_root, &leaf, &proof)
    }

    /// Purchase `quantity` tokens in the active phase.
    ///
    /// `payment` is the offered amount in the payment token and must equal
    /// `unit_price * quantity` exactly; it is pulled from `minter` only
    /// after every check passes. Returns the first token id of the batch.
    ///
    /// Check order: pause gate, active phase, allowlist proof, quantity
    /// limits (per-call, optional per-wallet cumulative, per-phase cap,
    /// global ceiling), then payment. Any failure rolls the whole call
    /// back; a success atomically records the tokens, bumps all three
    /// counters, and credits the payment ledger.
    pub fn mint_presale(
        env: Env,
        minter: Address,
        phase_id: u32,
        proof: Vec<BytesN<32>>,
        quantity: u32,
        payment: i128,
    ) -> Result<u32, Error> {
        minter.require_auth();

        if access::paused(&env) {
            return Err(Error::OperationPaused);
        }

        let current = storage::current_phase(&env);
        if current == 0 || phase_id != current {
            return Err(Error::InvalidState);
        }

        let phase = storage::phase(&env, phase_id);
        let leaf = merkle::address_leaf(&env, &minter);
        if !merkle::verify(&env, &phase.merkle_root, &leaf, &proof) {
            return Err(Error::InvalidProof);
        }

        if quantity == 0 || quantity > storage::max_purchase_per_mint(&env) {
            return Err(Error::LimitExceeded);
        }
        let wallet_minted = storage::wallet_phase_minted(&env, &minter, phase_id);
        let wallet_cap = storage::wallet_phase_cap(&env);
        if wallet_cap > 0 && wallet_minted + quantity > wallet_cap {
            return Err(Error::LimitExceeded);
        }
        let phase_minted = storage::phase_minted(&env, phase_id);
        if phase_minted + quantity > phase.purchase_cap {
            return Err(Error::LimitExceeded);
        }
        let total_minted = storage::total_minted(&env);
        if total_minted + quantity > MAX_SUPPLY {
            return Err(Error::LimitExceeded);
        }

        if payment != phase.unit_price * quantity as i128 {
            return Err(Error::PaymentMismatch);
        }

        // All checks passed; effects from here on.
        let token_client = token::Client::new(&env, &storage::payment_token(&env));
        token_client.transfer(&minter, &env.current_contract_address(), &payment);

        let first_token_id = TOKEN_ID_OFFSET + total_minted;
        for i in 0..quantity {
            storage::set_token_owner(&env, first_token_id + i, &minter);
        }
        storage::set_total_minted(&env, total_minted + quantity);
        storage::set_phase_minted(&env, phase_id, phase_minted + quantity);
        storage::set_wallet_phase_minted(&env, &minter, phase_id, wallet_minted + quantity);
        splitter::credit(&env, payment);

        events::minted(
            &env,
            TokensMinted {
                minter,
                phase_id,
                first_token_id,
                quantity,
                paid: payment,
            },
        );

        Ok(first_token_id)
    }

    /// Total tokens issued across all phases.
    pub fn total_minted(env: Env) -> u32 {
        storage::total_minted(&env)
    }

    /// Tokens issued by one phase.
    pub fn phase_minted(env: Env, phase_id: u32) -> u32 {
        storage::phase_minted(&env, phase_id)
    }

    /// Tokens issued to one wallet within one phase.
    pub fn wallet_phase_minted(env: Env, wallet: Address, phase_id: u32) -> u32 {
        storage::wallet_phase_minted(&env, &wallet, phase_id)
    }

    /// Owner recorded at mint time, `None` for an unminted id.
    pub fn token_owner(env: Env, token_id: u32) -> Option<Address> {
        storage::token_owner(&env, token_id)
    }

    // ─────────────────────────────────────────────────────────
    // Revenue
    // ─────────────────────────────────────────────────────────

    /// Contribute funds directly, outside any purchase.
    ///
    /// Pulls `amount` of the payment token from `from` and credits the
    /// payment ledger, exactly like a mint payment.
    pub fn fund(env: Env, from: Address, amount: i128) -> Result<(), Error> {
        from.require_auth();
        if amount <= 0 {
            return Err(Error::PaymentMismatch);
        }
        let token_client = token::Client::new(&env, &storage::payment_token(&env));
        token_client.transfer(&from, &env.current_contract_address(), &amount);
        splitter::credit(&env, amount);
        events::received(&env, PaymentReceived { from, amount });
        Ok(())
    }

    /// Pay out everything currently due to `payee`; callable by anyone.
    /// Returns the released amount.
    pub fn release(env: Env, payee: Address) -> Result<i128, Error> {
        let amount = splitter::release(&env, &payee)?;
        events::released(&env, PaymentReleased { payee, amount });
        Ok(amount)
    }

    /// All payees, in construction order.
    pub fn payees(env: Env) -> Vec<Address> {
        splitter::payees(&env)
    }

    /// Share weight of `payee`, 0 if it holds none.
    pub fn shares(env: Env, payee: Address) -> u32 {
        splitter::shares(&env, &payee)
    }

    pub fn total_shares(env: Env) -> u32 {
        splitter::total_shares(&env)
    }

    /// Running sum of every amount ever credited (not the current balance).
    pub fn total_received(env: Env) -> i128 {
        splitter::total_received(&env)
    }

    /// Amount already released to `payee`.
    pub fn released(env: Env, payee: Address) -> i128 {
        splitter::released(&env, &payee)
    }

    /// Token all payments are denominated in.
    pub fn payment_token(env: Env) -> Address {
        storage::payment_token(&env)
    }

    // ─────────────────────────────────────────────────────────
    // Metadata
    // ─────────────────────────────────────────────────────────

    /// Set the provenance commitment. Fails `Frozen` after freeze.
    pub fn set_provenance_hash(env: Env, caller: Address, hash: String) -> Result<(), Error> {
        require_admin(&env, &caller);
        let mut metadata = require_not_frozen(&env)?;
        metadata.provenance_hash = hash;
        storage::save_metadata(&env, &metadata);
        Ok(())
    }

    /// Set the revealed-URI prefix. Fails `Frozen` after freeze, and
    /// `UriTooLong` when the prefix would leave no room for the decimal
    /// token id inside [`MAX_URI_LEN`].
    pub fn set_token_base_uri(env: Env, caller: Address, uri: String) -> Result<(), Error> {
        require_admin(&env, &caller);
        if uri.len() > MAX_URI_LEN - MAX_ID_DIGITS {
            return Err(Error::UriTooLong);
        }
        let mut metadata = require_not_frozen(&env)?;
        metadata.base_uri = uri;
        storage::save_metadata(&env, &metadata);
        Ok(())
    }

    /// Set the pre-reveal placeholder URI. Fails `Frozen` after freeze.
    pub fn set_not_revealed_uri(env: Env, caller: Address, uri: String) -> Result<(), Error> {
        require_admin(&env, &caller);
        let mut metadata = require_not_frozen(&env)?;
        metadata.not_revealed_uri = uri;
        storage::save_metadata(&env, &metadata);
        Ok(())
    }

    /// Flip the reveal flag. Not blocked by the freeze latch: revealing is
    /// an operational act, not a metadata edit.
    pub fn set_revealed(env: Env, caller: Address, revealed: bool) {
        require_admin(&env, &caller);
        storage::set_revealed(&env, revealed);
        events::reveal_set(&env, revealed);
    }

    /// Permanently freeze all metadata strings. A second call fails
    /// `Frozen`, like every other mutator after the latch.
    pub fn freeze_metadata(env: Env, caller: Address) -> Result<(), Error> {
        require_admin(&env, &caller);
        let mut metadata = require_not_frozen(&env)?;
        metadata.frozen = true;
        storage::save_metadata(&env, &metadata);
        events::metadata_frozen(&env, &caller);
        Ok(())
    }

    /// Current provenance commitment (empty until set).
    pub fn provenance_hash(env: Env) -> String {
        storage::metadata(&env).provenance_hash
    }

    /// Full metadata record.
    pub fn metadata(env: Env) -> MetadataState {
        storage::metadata(&env)
    }

    pub fn revealed(env: Env) -> bool {
        storage::revealed(&env)
    }

    /// Resolve a token's URI. Fails `InvalidState` for an unminted id;
    /// returns the placeholder until revealed, then `base_uri` with the
    /// decimal token id appended.
    pub fn token_uri(env: Env, token_id: u32) -> Result<String, Error> {
        if storage::token_owner(&env, token_id).is_none() {
            return Err(Error::InvalidState);
        }
        let metadata = storage::metadata(&env);
        if !storage::revealed(&env) {
            return Ok(metadata.not_revealed_uri);
        }
        Ok(compose_token_uri(&env, &metadata.base_uri, token_id))
    }
}

/// Authenticate `caller` and check it is the current administrator.
fn require_admin(env: &Env, caller: &Address) {
    caller.require_auth();
    access::require_owner(env, caller);
}

/// Load the metadata record, failing `Frozen` once the latch is set.
fn require_not_frozen(env: &Env) -> Result<MetadataState, Error> {
    let metadata = storage::metadata(env);
    if metadata.frozen {
        return Err(Error::Frozen);
    }
    Ok(metadata)
}

/// Append the decimal form of `token_id` to `base` without allocating on
/// the host: both pieces go through one fixed buffer. `set_token_base_uri`
/// bounds the base so the buffer always fits the longest possible suffix.
fn compose_token_uri(env: &Env, base: &String, token_id: u32) -> String {
    let base_len = base.len() as usize;
    let mut buf = [0u8; MAX_URI_LEN as usize];
    base.copy_into_slice(&mut buf[..base_len]);

    let mut digits = [0u8; MAX_ID_DIGITS as usize];
    let mut v = token_id;
    let mut n = 0;
    loop {
        digits[n] = b'0' + (v % 10) as u8;
        v /= 10;
        n += 1;
        if v == 0 {
            break;
        }
    }
    for i in 0..n {
        buf[base_len + i] = digits[n - 1 - i];
    }

    String::from_bytes(env, &buf[..base_len + n])
}
