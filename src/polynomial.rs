//! Coefficient vectors of products of linear factors, lowest degree first.

use crate::group::Exponent;

/// Multiplies the polynomial `coefficients(X)` by `(x + a·X)`.
///
/// The result is one coefficient longer than the input.
pub fn extend<E: Exponent>(x: E, a: E, coefficients: &[E]) -> Vec<E> {
    let mut result = vec![E::zero(); coefficients.len() + 1];

    for (j, c) in coefficients.iter().enumerate() {
        result[j] += x * *c;
    }
    for (j, c) in coefficients.iter().enumerate() {
        result[j + 1] += a * *c;
    }

    result
}

/// Evaluates `coefficients` at `point` (Horner's rule).
pub fn evaluate<E: Exponent>(coefficients: &[E], point: E) -> E {
    coefficients
        .iter()
        .rev()
        .fold(E::zero(), |acc, c| acc * point + *c)
}
