use std::ops::Index;

use crate::error::{Result, SigmaError};
use crate::group::{Exponent, GroupElement};

/// Fixed-length sequence of public generators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorVector<G> {
    generators: Vec<G>,
}

impl<G> GeneratorVector<G> {
    pub fn new(generators: Vec<G>) -> Self {
        Self { generators }
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    pub fn get(&self, i: usize) -> Option<&G> {
        self.generators.get(i)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, G> {
        self.generators.iter()
    }

    /// Derives `count` generators from a public label. Element `i` hashes
    /// `label || i` onto the group, so no discrete log relation between them
    /// is known.
    pub fn from_label<E>(label: &[u8], count: usize) -> Self
    where
        E: Exponent,
        G: GroupElement<E>,
    {
        let generators = (0..count as u64)
            .map(|i| G::hash_to_group(&[label, &i.to_be_bytes()[..]].concat()))
            .collect();

        Self { generators }
    }

    /// Adds `Σ exponents_i · generator_i` into `result`.
    ///
    /// `result` is an accumulator: the caller seeds it and it is only added to.
    /// Mismatched lengths are rejected without touching `result`.
    pub fn get_vector_multiple<E>(&self, exponents: &[E], result: &mut G) -> Result<()>
    where
        E: Exponent,
        G: GroupElement<E>,
    {
        if exponents.len() != self.generators.len() {
            return Err(SigmaError::InvalidArgument(format!(
                "{} exponents for {} generators",
                exponents.len(),
                self.generators.len()
            )));
        }

        for (generator, exponent) in self.generators.iter().zip(exponents) {
            *result += *generator * *exponent;
        }

        Ok(())
    }
}

impl<G> Index<usize> for GeneratorVector<G> {
    type Output = G;

    fn index(&self, i: usize) -> &G {
        &self.generators[i]
    }
}
