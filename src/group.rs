//! Scalar and group element capabilities the proof algebra is generic over,
//! and their instantiation on secp256k1.

use std::fmt::Debug;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crypto_bigint::rand_core::RngCore;
use crypto_bigint::subtle::ConditionallySelectable;
use k256::elliptic_curve::group::Group;
use k256::elliptic_curve::ops::Reduce;
use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::{Field, PrimeField};
use k256::{AffinePoint, EncodedPoint, FieldBytes, ProjectivePoint, Scalar, U256};
use sha2::{Digest, Sha256};

use crate::error::{Result, SigmaError};

/// Width of a serialized group element.
pub const GROUP_ELEMENT_SIZE: usize = 34;

/// Width of a canonically encoded scalar, and of the digest it is reduced from.
pub const EXPONENT_SIZE: usize = 32;

const PREFIX_POINT: u8 = 0x00;
const PREFIX_IDENTITY: u8 = 0x01;

/// Field arithmetic over the group's scalar field.
pub trait Exponent:
    Copy
    + Debug
    + Eq
    + Send
    + Sync
    + ConditionallySelectable
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
{
    fn zero() -> Self;

    fn one() -> Self;

    fn from_u64(value: u64) -> Self;

    /// Uniformly random scalar.
    fn rand<R: RngCore>(rng: &mut R) -> Self;

    /// Reduces a big-endian 256-bit digest modulo the group order.
    fn from_digest(digest: &[u8; EXPONENT_SIZE]) -> Self;

    fn to_canonical_bytes(&self) -> [u8; EXPONENT_SIZE];

    /// Decodes a canonical (fully reduced) big-endian scalar.
    fn from_canonical_bytes(bytes: &[u8; EXPONENT_SIZE]) -> Option<Self>;
}

/// Group arithmetic with a fixed-width wire encoding.
pub trait GroupElement<E: Exponent>:
    Copy
    + Debug
    + Eq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + Mul<E, Output = Self>
{
    fn identity() -> Self;

    /// Appends exactly [`GROUP_ELEMENT_SIZE`] bytes to `buffer`.
    ///
    /// Transcripts concatenate these encodings without framing, so every
    /// implementation must keep the width fixed, identity included.
    fn serialize(&self, buffer: &mut Vec<u8>);

    fn deserialize(bytes: &[u8]) -> Result<Self>;

    /// Maps arbitrary bytes onto an element with no known discrete log
    /// relation to any other output.
    fn hash_to_group(data: &[u8]) -> Self;
}

impl Exponent for Scalar {
    fn zero() -> Self {
        Scalar::ZERO
    }

    fn one() -> Self {
        Scalar::ONE
    }

    fn from_u64(value: u64) -> Self {
        Scalar::from(value)
    }

    fn rand<R: RngCore>(rng: &mut R) -> Self {
        <Scalar as Field>::random(rng)
    }

    fn from_digest(digest: &[u8; EXPONENT_SIZE]) -> Self {
        <Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(*digest))
    }

    fn to_canonical_bytes(&self) -> [u8; EXPONENT_SIZE] {
        self.to_repr().into()
    }

    fn from_canonical_bytes(bytes: &[u8; EXPONENT_SIZE]) -> Option<Self> {
        Scalar::from_repr(FieldBytes::from(*bytes)).into()
    }
}

impl GroupElement<Scalar> for ProjectivePoint {
    fn identity() -> Self {
        ProjectivePoint::IDENTITY
    }

    fn serialize(&self, buffer: &mut Vec<u8>) {
        if bool::from(self.is_identity()) {
            buffer.push(PREFIX_IDENTITY);
            buffer.extend_from_slice(&[0u8; GROUP_ELEMENT_SIZE - 1]);
            return;
        }

        buffer.push(PREFIX_POINT);
        buffer.extend_from_slice(self.to_affine().to_encoded_point(true).as_bytes());
    }

    fn deserialize(bytes: &[u8]) -> Result<Self> {
        if bytes.len() != GROUP_ELEMENT_SIZE {
            return Err(SigmaError::InvalidEncoding);
        }

        let (prefix, body) = bytes.split_at(1);
        match prefix[0] {
            PREFIX_IDENTITY if body.iter().all(|b| *b == 0) => Ok(ProjectivePoint::IDENTITY),
            PREFIX_POINT => {
                let encoded =
                    EncodedPoint::from_bytes(body).map_err(|_| SigmaError::InvalidEncoding)?;
                if !encoded.is_compressed() {
                    return Err(SigmaError::InvalidEncoding);
                }
                let point: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
                point
                    .map(ProjectivePoint::from)
                    .ok_or(SigmaError::InvalidEncoding)
            }
            _ => Err(SigmaError::InvalidEncoding),
        }
    }

    fn hash_to_group(data: &[u8]) -> Self {
        // Try-and-increment: hash to an x coordinate until it lands on the curve.
        let mut counter: u32 = 0;
        loop {
            let digest = Sha256::new()
                .chain_update(data)
                .chain_update(counter.to_be_bytes())
                .finalize();

            let mut candidate = [0x02u8; 33];
            candidate[1..].copy_from_slice(&digest);
            counter = counter.wrapping_add(1);

            let Ok(encoded) = EncodedPoint::from_bytes(candidate) else {
                continue;
            };
            let point: Option<AffinePoint> = AffinePoint::from_encoded_point(&encoded).into();
            if let Some(point) = point {
                return ProjectivePoint::from(point);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crypto_bigint::rand_core::OsRng;

    #[test]
    fn serialized_width_is_fixed() {
        let points = [
            ProjectivePoint::IDENTITY,
            ProjectivePoint::GENERATOR,
            ProjectivePoint::GENERATOR * Scalar::rand(&mut OsRng),
            -ProjectivePoint::GENERATOR,
        ];

        for point in points {
            let mut buffer = Vec::new();
            point.serialize(&mut buffer);
            assert_eq!(buffer.len(), GROUP_ELEMENT_SIZE);
            assert_eq!(ProjectivePoint::deserialize(&buffer).unwrap(), point);
        }
    }

    #[test]
    fn identity_encoding() {
        let mut buffer = Vec::new();
        ProjectivePoint::IDENTITY.serialize(&mut buffer);

        let mut expected = [0u8; GROUP_ELEMENT_SIZE];
        expected[0] = PREFIX_IDENTITY;
        assert_eq!(buffer, expected);
    }

    #[test]
    fn rejects_malformed_elements() {
        let mut buffer = Vec::new();
        ProjectivePoint::GENERATOR.serialize(&mut buffer);

        assert_eq!(
            ProjectivePoint::deserialize(&buffer[..GROUP_ELEMENT_SIZE - 1]),
            Err(SigmaError::InvalidEncoding)
        );

        let mut bad_prefix = buffer.clone();
        bad_prefix[0] = 0x07;
        assert_eq!(
            ProjectivePoint::deserialize(&bad_prefix),
            Err(SigmaError::InvalidEncoding)
        );

        let mut bad_identity = [0u8; GROUP_ELEMENT_SIZE];
        bad_identity[0] = PREFIX_IDENTITY;
        bad_identity[5] = 1;
        assert_eq!(
            ProjectivePoint::deserialize(&bad_identity),
            Err(SigmaError::InvalidEncoding)
        );
    }

    #[test]
    fn digest_reduction_is_modular() {
        // The group order n, big-endian. n reduces to 0 and n + 1 to 1.
        let mut order = [
            0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
            0xFF, 0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C,
            0xD0, 0x36, 0x41, 0x41,
        ];
        assert_eq!(Scalar::from_digest(&order), Scalar::ZERO);
        assert_eq!(Scalar::from_canonical_bytes(&order), None);

        order[31] += 1;
        assert_eq!(Scalar::from_digest(&order), Scalar::ONE);

        let mut seven = [0u8; EXPONENT_SIZE];
        seven[31] = 7;
        assert_eq!(Scalar::from_digest(&seven), Scalar::from_u64(7));
        assert_eq!(Scalar::from_u64(7).to_canonical_bytes(), seven);
    }

    #[test]
    fn hash_to_group_is_deterministic_and_separated() {
        let a = ProjectivePoint::hash_to_group(b"label-a");
        let b = ProjectivePoint::hash_to_group(b"label-b");

        assert_eq!(a, ProjectivePoint::hash_to_group(b"label-a"));
        assert_ne!(a, b);
        assert_ne!(a, ProjectivePoint::GENERATOR);
        assert!(!bool::from(a.is_identity()));
    }
}
