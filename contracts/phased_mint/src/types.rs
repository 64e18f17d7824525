//! # Types
//!
//! Shared data structures used across all modules of the phased mint
//! contract.
//!
//! ## Design decisions
//!
//! ### Phase as plain configuration
//!
//! A [`Phase`] is pure administrator-written configuration. The mutable
//! mint progress for a phase (how many tokens it has issued) lives under a
//! separate storage key so that the hot mint path rewrites a single `u32`
//! counter instead of the whole phase record.
//!
//! Phase ids are administrator-chosen and need not be sequential or
//! contiguous. Reading a phase that was never configured yields the
//! zero-valued default: price 0, cap 0, all-zero root. A phase with a
//! zero cap can never mint, so an unconfigured phase is inert even if it
//! is accidentally made current.
//!
//! ### Metadata as a latched record
//!
//! [`MetadataState`] collects every administrator-set metadata string plus
//! the `frozen` one-way latch. Once `frozen` is set, every mutator of this
//! record fails permanently; the reveal flag is deliberately *not* part of
//! the record because revealing is an operational act, not a metadata edit.

use soroban_sdk::{contracttype, BytesN, String};

/// Configuration of one sale phase, written only by the administrator.
///
/// `unit_price` is denominated in the contract's payment token. The
/// `merkle_root` commits to the phase's allowlist; an all-zero root matches
/// no proof in practice.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Phase {
    /// Price per token for this phase.
    pub unit_price: i128,
    /// Maximum number of tokens this phase may issue in total.
    pub purchase_cap: u32,
    /// Root of the sorted-pair keccak-256 allowlist tree.
    pub merkle_root: BytesN<32>,
}

/// Administrator-controlled metadata strings with a one-way freeze latch.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct MetadataState {
    /// Prefix for revealed token URIs; the token id is appended in decimal.
    pub base_uri: String,
    /// URI returned for every token while the collection is unrevealed.
    pub not_revealed_uri: String,
    /// Commitment to the metadata-to-token assignment, published pre-sale.
    pub provenance_hash: String,
    /// One-way latch; once true, all metadata mutators fail permanently.
    pub frozen: bool,
}
