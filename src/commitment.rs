use crate::error::Result;
use crate::generators::GeneratorVector;
use crate::group::{Exponent, GroupElement};

/// Pedersen commitment `g·m + h·r`.
pub fn commit<E: Exponent, G: GroupElement<E>>(g: G, m: E, h: G, r: E) -> G {
    (g * m) + (h * r)
}

/// Commitment to two messages under one blinding factor: `g·m + h_v·v + h_r·r`.
pub fn double_commit<E: Exponent, G: GroupElement<E>>(
    g: G,
    m: E,
    h_v: G,
    v: E,
    h_r: G,
    r: E,
) -> G {
    (g * m) + (h_v * v) + (h_r * r)
}

/// Vector commitment `g·r + Σ h_i·exponents_i`.
pub fn commit_vector<E: Exponent, G: GroupElement<E>>(
    g: G,
    h: &GeneratorVector<G>,
    exponents: &[E],
    r: E,
) -> Result<G> {
    let mut result = G::identity();
    accumulate_commit(&mut result, g, h, exponents, r)?;
    Ok(result)
}

/// Adds the vector commitment `g·r + Σ h_i·exponents_i` to a caller-seeded
/// accumulator. On error `result` is left as it was.
pub fn accumulate_commit<E: Exponent, G: GroupElement<E>>(
    result: &mut G,
    g: G,
    h: &GeneratorVector<G>,
    exponents: &[E],
    r: E,
) -> Result<()> {
    let mut sum = *result;
    h.get_vector_multiple(exponents, &mut sum)?;
    *result = sum + (g * r);
    Ok(())
}
