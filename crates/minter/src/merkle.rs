//! Allowlist Merkle commitments.
//!
//! Leaves are `keccak256` of the packed 20-byte address. Interior nodes hash
//! their two children in ascending byte order, so a proof is only the list of
//! sibling hashes from leaf to root and carries no direction bits. This is the
//! same commitment scheme as OpenZeppelin's `MerkleProof` and merkletreejs
//! with `sortPairs` enabled.

use alloy_primitives::{keccak256, Address, B256};
use std::collections::HashSet;

/// Leaf hash of an allowlisted address.
pub fn hash_identity(address: Address) -> B256 {
    keccak256(address)
}

/// Hashes two nodes in ascending order.
pub fn hash_pair(a: B256, b: B256) -> B256 {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(lo.as_slice());
    buf[32..].copy_from_slice(hi.as_slice());
    keccak256(buf)
}

/// Rebuilds the root implied by `proof` for `leaf`.
pub fn process_proof(proof: &[B256], leaf: B256) -> B256 {
    proof.iter().fold(leaf, |computed, sibling| hash_pair(computed, *sibling))
}

/// Returns true if `proof` proves `leaf` is committed to by `root`.
pub fn verify(proof: &[B256], root: B256, leaf: B256) -> bool {
    process_proof(proof, leaf) == root
}

/// Rebuilds the root implied by `proof` for `address`.
pub fn process_proof_for_address(proof: &[B256], address: Address) -> B256 {
    process_proof(proof, hash_identity(address))
}

/// Returns true if `proof` proves `address` is in the allowlist committed to by `root`.
pub fn verify_address(proof: &[B256], root: B256, address: Address) -> bool {
    verify(proof, root, hash_identity(address))
}

/// In-memory allowlist tree used to produce roots and proofs off-chain.
///
/// Leaves keep insertion order; duplicate addresses are dropped. An unpaired
/// node at the end of a layer is promoted to the next layer unchanged.
#[derive(Debug, Clone, Default)]
pub struct AllowlistTree {
    layers: Vec<Vec<B256>>,
}

impl AllowlistTree {
    /// Builds a tree over the given addresses.
    pub fn from_addresses<I>(addresses: I) -> Self
    where
        I: IntoIterator<Item = Address>,
    {
        let mut seen = HashSet::new();
        let leaves =
            addresses.into_iter().filter(|addr| seen.insert(*addr)).map(hash_identity).collect();
        Self::from_leaves(leaves)
    }

    /// Builds a tree over precomputed leaf hashes.
    pub fn from_leaves(leaves: Vec<B256>) -> Self {
        if leaves.is_empty() {
            return Self::default();
        }

        let mut layers = vec![leaves];
        while let Some(layer) = layers.last().filter(|layer| layer.len() > 1) {
            let next = layer
                .chunks(2)
                .map(|pair| pair.get(1).map_or(pair[0], |right| hash_pair(pair[0], *right)))
                .collect();
            layers.push(next);
        }
        Self { layers }
    }

    /// Root of the tree, or zero for an empty tree.
    pub fn root(&self) -> B256 {
        self.layers.last().and_then(|layer| layer.first()).copied().unwrap_or(B256::ZERO)
    }

    /// Leaf hashes in insertion order.
    pub fn leaves(&self) -> &[B256] {
        self.layers.first().map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of leaves.
    pub fn len(&self) -> usize {
        self.leaves().len()
    }

    /// Returns true if the tree has no leaves.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Proof for `address`, or `None` if it is not in the tree.
    pub fn proof(&self, address: Address) -> Option<Vec<B256>> {
        let leaf = hash_identity(address);
        let index = self.leaves().iter().position(|candidate| *candidate == leaf)?;
        self.proof_at(index)
    }

    /// Proof for the leaf at `index`.
    pub fn proof_at(&self, mut index: usize) -> Option<Vec<B256>> {
        if index >= self.len() {
            return None;
        }

        let mut proof = Vec::with_capacity(self.layers.len());
        for layer in &self.layers[..self.layers.len() - 1] {
            if let Some(sibling) = layer.get(index ^ 1) {
                proof.push(*sibling);
            }
            index /= 2;
        }
        Some(proof)
    }
}
