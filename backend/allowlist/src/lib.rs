//! # Allowlist Merkle tree builder
//!
//! Builds the sorted-pair keccak-256 Merkle tree over a phase's allowlist
//! and produces the root (for `set_phase_merkle_root`) and per-address
//! proofs (for `mint_presale` / `is_allow_list_eligible`).
//!
//! The conventions here are a hard contract with the on-chain verifier —
//! any divergence breaks every proof silently:
//!
//! - leaf: `keccak256(address bytes)`, where the address bytes are the
//!   ASCII strkey exactly as read from the input;
//! - parent: `keccak256(min(a, b) || max(a, b))` by raw byte order, so a
//!   proof carries no left/right position information;
//! - leaves are taken in input order (not sorted); an odd node at the end
//!   of a level is carried up unhashed;
//! - a single-leaf tree has `root == leaf` and empty proofs.

pub mod errors;

use sha3::{Digest, Keccak256};

use crate::errors::{AllowlistError, Result};

/// A 32-byte tree node.
pub type Node = [u8; 32];

/// keccak-256 of arbitrary bytes.
pub fn keccak256(data: &[u8]) -> Node {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    hasher.finalize().into()
}

/// The allowlist leaf for an address given as its ASCII strkey bytes.
pub fn leaf_hash(address: &[u8]) -> Node {
    keccak256(address)
}

/// Parent of two nodes: keccak-256 of their byte-wise-sorted concatenation.
pub fn hash_pair(a: &Node, b: &Node) -> Node {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(a);
        buf[32..].copy_from_slice(b);
    } else {
        buf[..32].copy_from_slice(b);
        buf[32..].copy_from_slice(a);
    }
    keccak256(&buf)
}

/// A fully built allowlist tree. Every level is retained so proofs are a
/// straight index walk.
#[derive(Debug, Clone)]
pub struct AllowlistTree {
    /// Input addresses, in input order, parallel to the leaf level.
    addresses: Vec<String>,
    /// All levels, leaves first, root level last.
    levels: Vec<Vec<Node>>,
}

impl AllowlistTree {
    /// Build a tree from addresses (strkey strings), keeping input order.
    pub fn from_addresses<I, S>(addresses: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let addresses: Vec<String> = addresses.into_iter().map(Into::into).collect();
        if addresses.is_empty() {
            return Err(AllowlistError::EmptyAllowlist);
        }
        let leaves: Vec<Node> = addresses.iter().map(|a| leaf_hash(a.as_bytes())).collect();
        Ok(Self {
            addresses,
            levels: build_levels(leaves),
        })
    }

    /// Root hash for `set_phase_merkle_root`.
    pub fn root(&self) -> Node {
        self.levels.last().expect("tree has at least one level")[0]
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.levels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        false // construction rejects empty allowlists
    }

    /// Input addresses, in leaf order.
    pub fn addresses(&self) -> &[String] {
        &self.addresses
    }

    /// Sibling path for the leaf at `index`.
    pub fn proof(&self, index: usize) -> Result<Vec<Node>> {
        if index >= self.len() {
            return Err(AllowlistError::LeafOutOfRange(index));
        }
        let mut proof = Vec::new();
        let mut idx = index;
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = idx ^ 1;
            // An odd trailing node has no sibling; it was carried up as-is.
            if sibling < level.len() {
                proof.push(level[sibling]);
            }
            idx /= 2;
        }
        Ok(proof)
    }

    /// Sibling path for an address.
    pub fn proof_for(&self, address: &str) -> Result<Vec<Node>> {
        let index = self
            .addresses
            .iter()
            .position(|a| a == address)
            .ok_or_else(|| AllowlistError::UnknownAddress(address.to_string()))?;
        self.proof(index)
    }
}

/// Host-side mirror of the on-chain verifier, for pre-flight checks.
pub fn verify(root: &Node, leaf: &Node, proof: &[Node]) -> bool {
    let mut node = *leaf;
    for sibling in proof {
        node = hash_pair(&node, sibling);
    }
    node == *root
}

/// Hash each level pairwise until a single root remains. An odd trailing
/// node is carried up unchanged.
fn build_levels(leaves: Vec<Node>) -> Vec<Vec<Node>> {
    let mut levels = vec![leaves];
    while levels.last().expect("non-empty").len() > 1 {
        let current = levels.last().expect("non-empty");
        let mut next = Vec::with_capacity(current.len().div_ceil(2));
        for pair in current.chunks(2) {
            match pair {
                [a, b] => next.push(hash_pair(a, b)),
                [a] => next.push(*a),
                _ => unreachable!("chunks(2) yields 1 or 2 nodes"),
            }
        }
        levels.push(next);
    }
    levels
}
