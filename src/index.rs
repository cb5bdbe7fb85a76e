//! Positional encodings of a secret set index.
//!
//! An index `l < n^m` is written as `m` base-`n` digits, least significant
//! first. The one-hot form replaces each digit by a block of `n` scalars with a
//! single one at the digit's position; it is what the prover commits to.

use crypto_bigint::subtle::ConstantTimeEq;

use crate::error::{Result, SigmaError};
use crate::group::Exponent;

/// Longest digit or one-hot vector the codec will produce.
pub const MAX_EXPANSION_LEN: u64 = 1 << 24;

/// Number of members addressable by `m` base-`n` digits, or `None` when it
/// does not fit in a `u64` (every `u64` index is then addressable).
pub fn set_capacity(n: u64, m: u64) -> Option<u64> {
    let m = u32::try_from(m).ok()?;
    n.checked_pow(m)
}

fn check_range(index: u64, n: u64, m: u64) -> Result<()> {
    if n < 2 {
        return Err(SigmaError::InvalidArgument(format!(
            "digit base must be at least 2, got {n}"
        )));
    }

    match set_capacity(n, m) {
        Some(size) if index >= size => Err(SigmaError::IndexOutOfRange { index, size }),
        _ => Ok(()),
    }
}

fn expansion_len(len: Option<u64>) -> Result<usize> {
    len.filter(|len| *len <= MAX_EXPANSION_LEN)
        .and_then(|len| usize::try_from(len).ok())
        .ok_or_else(|| {
            SigmaError::InvalidArgument(format!(
                "expansion longer than {MAX_EXPANSION_LEN} entries"
            ))
        })
}

/// Base-`n` digits of `index`, exactly `m` of them, least significant first.
pub fn decompose_digits(index: u64, n: u64, m: u64) -> Result<Vec<u64>> {
    check_range(index, n, m)?;
    let len = expansion_len(Some(m))?;

    let mut digits = Vec::with_capacity(len);
    let mut rest = index;
    while rest != 0 {
        digits.push(rest % n);
        rest /= n;
    }
    digits.resize(len, 0);

    Ok(digits)
}

/// One-hot expansion of `index`: `m` blocks of `n` scalars, `n·m` in total.
pub fn decompose_onehot<E: Exponent>(index: u64, n: u64, m: u64) -> Result<Vec<E>> {
    let len = expansion_len(n.checked_mul(m))?;
    let digits = decompose_digits(index, n, m)?;

    let mut sigma = Vec::with_capacity(len);
    for digit in digits {
        for i in 0..n {
            sigma.push(E::conditional_select(&E::zero(), &E::one(), i.ct_eq(&digit)));
        }
    }

    Ok(sigma)
}

/// Recovers the digits from a one-hot expansion, rejecting blocks that do not
/// hold exactly one `1` and `n - 1` zeros.
pub fn digits_from_onehot<E: Exponent>(onehot: &[E], n: u64) -> Result<Vec<u64>> {
    if n < 2 || onehot.len() % n as usize != 0 {
        return Err(SigmaError::InvalidArgument(format!(
            "{} entries do not form blocks of {n}",
            onehot.len()
        )));
    }

    onehot
        .chunks(n as usize)
        .map(|block| {
            let mut digit = None;
            for (i, entry) in block.iter().enumerate() {
                if *entry == E::one() && digit.is_none() {
                    digit = Some(i as u64);
                } else if *entry != E::zero() {
                    return Err(SigmaError::InvalidArgument(
                        "block is not a one-hot vector".into(),
                    ));
                }
            }
            digit.ok_or_else(|| SigmaError::InvalidArgument("block has no set entry".into()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use k256::Scalar;

    fn scalars(values: &[u64]) -> Vec<Scalar> {
        values.iter().copied().map(Scalar::from_u64).collect()
    }

    #[test]
    fn binary_five() {
        assert_eq!(decompose_digits(5, 2, 3).unwrap(), vec![1, 0, 1]);
        assert_eq!(
            decompose_onehot::<Scalar>(5, 2, 3).unwrap(),
            scalars(&[0, 1, 1, 0, 0, 1])
        );
    }

    #[test]
    fn zero_index_is_all_zero_digits() {
        assert_eq!(decompose_digits(0, 4, 2).unwrap(), vec![0, 0]);
        assert_eq!(
            decompose_onehot::<Scalar>(0, 4, 2).unwrap(),
            scalars(&[1, 0, 0, 0, 1, 0, 0, 0])
        );
    }

    #[test]
    fn high_digits_are_zero_padded() {
        assert_eq!(decompose_digits(3, 4, 4).unwrap(), vec![3, 0, 0, 0]);
        assert_eq!(
            decompose_onehot::<Scalar>(3, 4, 2).unwrap(),
            scalars(&[0, 0, 0, 1, 1, 0, 0, 0])
        );
    }

    #[test]
    fn digits_reconstruct_index() {
        for (n, m) in [(2, 6), (3, 4), (4, 3), (7, 2), (16, 2)] {
            let size = set_capacity(n, m).unwrap();
            for index in 0..size {
                let digits = decompose_digits(index, n, m).unwrap();
                assert_eq!(digits.len(), m as usize);
                assert!(digits.iter().all(|d| *d < n));

                let value = digits.iter().rev().fold(0, |acc, d| acc * n + d);
                assert_eq!(value, index);
            }
        }
    }

    #[test]
    fn onehot_agrees_with_digits() {
        for (n, m) in [(2, 5), (3, 3), (5, 2)] {
            let size = set_capacity(n, m).unwrap();
            for index in 0..size {
                let onehot = decompose_onehot::<Scalar>(index, n, m).unwrap();
                assert_eq!(onehot.len(), (n * m) as usize);

                let ones = onehot.iter().filter(|e| **e == Scalar::ONE).count();
                let zeros = onehot.iter().filter(|e| **e == Scalar::ZERO).count();
                assert_eq!(ones, m as usize);
                assert_eq!(zeros, ((n - 1) * m) as usize);

                assert_eq!(
                    digits_from_onehot(&onehot, n).unwrap(),
                    decompose_digits(index, n, m).unwrap()
                );
            }
        }
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        assert_eq!(
            decompose_digits(8, 2, 3),
            Err(SigmaError::IndexOutOfRange { index: 8, size: 8 })
        );
        assert_eq!(
            decompose_onehot::<Scalar>(16, 4, 2),
            Err(SigmaError::IndexOutOfRange { index: 16, size: 16 })
        );
        assert_eq!(
            decompose_digits(1, 2, 0),
            Err(SigmaError::IndexOutOfRange { index: 1, size: 1 })
        );
        assert!(decompose_digits(7, 2, 3).is_ok());
    }

    #[test]
    fn capacity_beyond_u64_accepts_any_index() {
        assert_eq!(set_capacity(2, 64), None);
        let digits = decompose_digits(u64::MAX, 2, 64).unwrap();
        assert!(digits.iter().all(|d| *d == 1));
        assert_eq!(decompose_digits(u64::MAX, 2, 70).unwrap().len(), 70);
    }

    #[test]
    fn degenerate_base_is_rejected() {
        assert!(matches!(
            decompose_digits(0, 1, 3),
            Err(SigmaError::InvalidArgument(_))
        ));
        assert!(matches!(
            decompose_onehot::<Scalar>(0, 0, 3),
            Err(SigmaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn oversized_expansions_are_rejected() {
        assert!(matches!(
            decompose_onehot::<Scalar>(0, 1 << 62, 1),
            Err(SigmaError::InvalidArgument(_))
        ));
        assert!(matches!(
            decompose_onehot::<Scalar>(0, u64::MAX, u64::MAX),
            Err(SigmaError::InvalidArgument(_))
        ));
        assert!(matches!(
            decompose_digits(0, 2, 1 << 62),
            Err(SigmaError::InvalidArgument(_))
        ));
        assert!(matches!(
            decompose_digits(0, 2, MAX_EXPANSION_LEN + 1),
            Err(SigmaError::InvalidArgument(_))
        ));
    }

    #[test]
    fn malformed_onehot_is_rejected() {
        assert!(digits_from_onehot(&scalars(&[1, 1, 0, 1]), 2).is_err());
        assert!(digits_from_onehot(&scalars(&[0, 0, 0, 1]), 2).is_err());
        assert!(digits_from_onehot(&scalars(&[0, 2, 1, 0]), 2).is_err());
        assert!(digits_from_onehot(&scalars(&[0, 1, 0]), 2).is_err());
    }
}
