use serde::{Deserialize, Serialize};

use crate::error::{Result, SigmaError};
use crate::generators::GeneratorVector;
use crate::group::{Exponent, GroupElement, EXPONENT_SIZE, GROUP_ELEMENT_SIZE};
use crate::index::set_capacity;

/// Largest anonymity set a proof can cover, `2^24` members.
pub const MAX_SET_SIZE: u64 = 1 << 24;

/// Public protocol parameters: digit base `n` and digit count `m`. The
/// anonymity set holds at most `n^m` members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    pub n: u64,
    pub m: u64,
}

impl Parameters {
    pub fn new(n: u64, m: u64) -> Result<Self> {
        let parameters = Self { n, m };
        parameters.validate()?;
        Ok(parameters)
    }

    pub fn validate(&self) -> Result<()> {
        if self.n < 2 {
            return Err(SigmaError::InvalidParameters(format!(
                "n must be at least 2, got {}",
                self.n
            )));
        }
        if self.m < 1 {
            return Err(SigmaError::InvalidParameters("m must be at least 1".into()));
        }
        match set_capacity(self.n, self.m) {
            Some(size) if size <= MAX_SET_SIZE => Ok(()),
            _ => Err(SigmaError::InvalidParameters(format!(
                "{}^{} members exceed the maximum set size {MAX_SET_SIZE}",
                self.n, self.m
            ))),
        }
    }

    /// `n^m`, the size every anonymity set is padded to.
    pub fn set_size(&self) -> Result<u64> {
        self.validate()?;
        set_capacity(self.n, self.m).ok_or_else(|| {
            SigmaError::InvalidParameters(format!("{}^{} overflows", self.n, self.m))
        })
    }

    /// Number of message generators, `n·m`.
    pub fn generator_count(&self) -> Result<usize> {
        self.validate()?;
        usize::try_from(self.n * self.m).map_err(|_| {
            SigmaError::InvalidParameters(format!("{}·{} generators", self.n, self.m))
        })
    }
}

/// Public proving key: blinding generator `g` and `n·m` message generators.
#[derive(Debug, Clone)]
pub struct SigmaParams<G> {
    pub g: G,
    pub h: GeneratorVector<G>,
    pub parameters: Parameters,
}

impl<G> SigmaParams<G> {
    /// Derives all generators from `label`.
    pub fn new<E>(parameters: Parameters, label: &[u8]) -> Result<Self>
    where
        E: Exponent,
        G: GroupElement<E>,
    {
        parameters.validate()?;

        let g = G::hash_to_group(&[label, &b"/g"[..]].concat());
        let h = GeneratorVector::from_label::<E>(
            &[label, &b"/h"[..]].concat(),
            parameters.generator_count()?,
        );

        Ok(Self { g, h, parameters })
    }
}

impl<G: Copy> SigmaParams<G> {
    /// Pads an anonymity set to `n^m` members by repeating its last entry.
    pub fn pad_set(&self, commitments: &[G]) -> Result<Vec<G>> {
        let size = usize::try_from(self.parameters.set_size()?).map_err(|_| {
            SigmaError::InvalidParameters("set size exceeds the address space".into())
        })?;

        let Some(last) = commitments.last() else {
            return Err(SigmaError::InvalidArgument("empty anonymity set".into()));
        };
        if commitments.len() > size {
            return Err(SigmaError::InvalidArgument(format!(
                "{} commitments exceed the set size {size}",
                commitments.len()
            )));
        }

        let mut set = commitments.to_vec();
        set.resize(size, *last);
        Ok(set)
    }
}

/// The opening of the prover's set member: `commitments[l] == g·r`.
pub struct Witness<E> {
    pub l: u64,
    pub r: E,
}

/// The three elements bound by [`crate::fiatshamir::compute_challenge`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProofTriple<G> {
    pub a: G,
    pub c: G,
    pub d: G,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigmaProof<E, G> {
    pub a: G,
    pub b: G,
    pub c: G,
    pub d: G,
    pub g_k: Vec<G>,
    /// `f_{j,i}` for `i in 1..n`; `f_{j,0}` is implied by the challenge.
    pub f: Vec<E>,
    pub z_a: E,
    pub z_c: E,
    pub z_d: E,
}

impl<E: Exponent, G: GroupElement<E>> SigmaProof<E, G> {
    pub fn triple(&self) -> ProofTriple<G> {
        ProofTriple {
            a: self.a,
            c: self.c,
            d: self.d,
        }
    }

    /// Encoded size of a proof under `parameters`.
    pub fn encoded_len(parameters: &Parameters) -> usize {
        let m = parameters.m as usize;
        let f_len = m.saturating_mul((parameters.n as usize).saturating_sub(1));

        (4 + m)
            .saturating_mul(GROUP_ELEMENT_SIZE)
            .saturating_add(f_len.saturating_add(3).saturating_mul(EXPONENT_SIZE))
    }

    /// `A || B || C || D || G_0..G_{m-1} || f || z_A || z_C || z_d`
    pub fn to_bytes(&self) -> Vec<u8> {
        let element_count = 4 + self.g_k.len();
        let scalar_count = self.f.len() + 3;
        let mut bytes =
            Vec::with_capacity(element_count * GROUP_ELEMENT_SIZE + scalar_count * EXPONENT_SIZE);

        for element in [&self.a, &self.b, &self.c, &self.d].into_iter().chain(&self.g_k) {
            element.serialize(&mut bytes);
        }
        for scalar in self.f.iter().chain([&self.z_a, &self.z_c, &self.z_d]) {
            bytes.extend_from_slice(&scalar.to_canonical_bytes());
        }

        bytes
    }

    pub fn from_bytes(bytes: &[u8], parameters: &Parameters) -> Result<Self> {
        parameters.validate()?;
        if bytes.len() != Self::encoded_len(parameters) {
            return Err(SigmaError::InvalidEncoding);
        }

        let m = parameters.m as usize;
        let (elements, scalars) = bytes.split_at((4 + m) * GROUP_ELEMENT_SIZE);

        let mut elements = elements
            .chunks_exact(GROUP_ELEMENT_SIZE)
            .map(G::deserialize)
            .collect::<Result<Vec<G>>>()?;
        let mut scalars = scalars
            .chunks_exact(EXPONENT_SIZE)
            .map(|chunk| {
                let chunk: &[u8; EXPONENT_SIZE] =
                    chunk.try_into().map_err(|_| SigmaError::InvalidEncoding)?;
                E::from_canonical_bytes(chunk).ok_or(SigmaError::InvalidEncoding)
            })
            .collect::<Result<Vec<E>>>()?;

        let g_k = elements.split_off(4);
        let (a, b, c, d) = (elements[0], elements[1], elements[2], elements[3]);

        let responses = scalars.split_off(scalars.len() - 3);
        let (z_a, z_c, z_d) = (responses[0], responses[1], responses[2]);

        Ok(Self {
            a,
            b,
            c,
            d,
            g_k,
            f: scalars,
            z_a,
            z_c,
            z_d,
        })
    }
}
