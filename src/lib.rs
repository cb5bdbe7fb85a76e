//! Pedersen commitments and n-ary one-of-many ("Sigma") membership proofs.
//!
//! The primitive layer ([`commitment`], [`index`], [`fiatshamir`],
//! [`polynomial`]) is generic over the [`group::Exponent`] and
//! [`group::GroupElement`] capabilities; [`prover`] and [`verifier`] combine
//! it into a proof that one member of a public set of commitments opens to
//! zero, without revealing which.
//!
//! secp256k1 (`k256`) is the provided instantiation.

pub mod commitment;
pub mod error;
pub mod fiatshamir;
pub mod generators;
pub mod group;
pub mod index;
pub mod polynomial;
pub mod proof;
pub mod prover;
pub mod verifier;

pub use commitment::{accumulate_commit, commit, commit_vector, double_commit};
pub use error::{Result, SigmaError};
pub use generators::GeneratorVector;
pub use group::{Exponent, GroupElement};
pub use proof::{Parameters, ProofTriple, SigmaParams, SigmaProof, Witness};
