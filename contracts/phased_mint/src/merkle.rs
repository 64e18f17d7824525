//! # Allowlist proof verification
//!
//! Stateless sorted-pair Merkle proof checking against a phase's stored
//! allowlist root.
//!
//! Conventions (these are a hard contract with the off-chain generator in
//! `backend/allowlist` — any mismatch breaks every proof silently):
//!
//! - hash function: keccak-256;
//! - leaf: `keccak256(strkey)` where `strkey` is the ASCII string form of
//!   the address, exactly as the generator reads it from its input file;
//! - parent: `keccak256(min(a, b) || max(a, b))` ordered by raw byte
//!   value, so proof elements carry no left/right position information;
//! - a single-leaf tree has `root == leaf` and an empty proof.
//!
//! Verification never fails: malformed or forged proofs simply hash to
//! something other than the root and verify `false`.

use soroban_sdk::{Address, Bytes, BytesN, Env, Vec};

/// Longest strkey form of an address (both account and contract strkeys
/// are 56 ASCII bytes; leave headroom for future strkey kinds).
const MAX_STRKEY_LEN: usize = 64;

/// Compute the allowlist leaf for an address: keccak-256 of its strkey.
pub fn address_leaf(env: &Env, address: &Address) -> BytesN<32> {
    let strkey = address.to_string();
    let len = strkey.len() as usize;
    let mut buf = [0u8; MAX_STRKEY_LEN];
    strkey.copy_into_slice(&mut buf[..len]);
    env.crypto()
        .keccak256(&Bytes::from_slice(env, &buf[..len]))
        .to_bytes()
}

/// Check a sorted-pair Merkle proof.
///
/// Folds the proof over the leaf and compares the result to `root`.
/// Returns `false` for any proof that does not reproduce the root; never
/// panics.
pub fn verify(env: &Env, root: &BytesN<32>, leaf: &BytesN<32>, proof: &Vec<BytesN<32>>) -> bool {
    let mut node = leaf.to_array();
    for sibling in proof.iter() {
        node = hash_pair(env, &node, &sibling.to_array());
    }
    node == root.to_array()
}

/// Parent of two nodes: keccak-256 of their byte-wise-sorted concatenation.
fn hash_pair(env: &Env, a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(a);
        buf[32..].copy_from_slice(b);
    } else {
        buf[..32].copy_from_slice(b);
        buf[32..].copy_from_slice(a);
    }
    env.crypto()
        .keccak256(&Bytes::from_slice(env, &buf))
        .to_bytes()
        .to_array()
}
