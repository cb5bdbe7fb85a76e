use sha2::{Digest, Sha256};

use crate::group::{Exponent, GroupElement, GROUP_ELEMENT_SIZE};
use crate::proof::ProofTriple;

/// Serializes `count` elements in order into a buffer of exactly
/// `count * GROUP_ELEMENT_SIZE` bytes.
fn serialize_elements<'a, E, G, I>(count: usize, elements: I) -> Vec<u8>
where
    E: Exponent,
    G: GroupElement<E> + 'a,
    I: IntoIterator<Item = &'a G>,
{
    let size = count * GROUP_ELEMENT_SIZE;
    let mut buffer = Vec::with_capacity(size);
    for element in elements {
        element.serialize(&mut buffer);
    }
    debug_assert_eq!(buffer.len(), size, "group element serialization width");

    buffer
}

fn hash_to_scalar<E: Exponent>(buffer: &[u8]) -> E {
    let digest: [u8; 32] = Sha256::digest(buffer).into();
    E::from_digest(&digest)
}

/// Challenge over an arbitrary ordered sequence of group elements.
pub fn compute_transcript_challenge<E: Exponent, G: GroupElement<E>>(elements: &[G]) -> E {
    hash_to_scalar(&serialize_elements::<E, G, _>(elements.len(), elements))
}

/// Challenge for a one-of-many proof. Binds the blinding generator, the
/// padded anonymity set, `A, B, C, D` and `G_0..G_{m-1}`, in that order.
pub fn compute_proof_challenge<E: Exponent, G: GroupElement<E>>(
    g: &G,
    commitments: &[G],
    abcd: [&G; 4],
    g_k: &[G],
) -> E {
    let count = 1 + commitments.len() + abcd.len() + g_k.len();
    let elements = std::iter::once(g)
        .chain(commitments)
        .chain(abcd)
        .chain(g_k);

    hash_to_scalar(&serialize_elements::<E, G, _>(count, elements))
}

/// Challenge binding a proof triple, serialized as `A || C || D`.
pub fn compute_challenge<E: Exponent, G: GroupElement<E>>(a: &G, c: &G, d: &G) -> E {
    hash_to_scalar(&serialize_elements::<E, G, _>(3, [a, c, d]))
}

/// One challenge shared by a batch of proofs: every triple is serialized in
/// order and the concatenation hashed. An empty batch yields exactly one.
pub fn compute_batch_challenge<E: Exponent, G: GroupElement<E>>(proofs: &[ProofTriple<G>]) -> E {
    if proofs.is_empty() {
        return E::one();
    }

    let elements = proofs.iter().flat_map(|p| [&p.a, &p.c, &p.d]);
    hash_to_scalar(&serialize_elements::<E, G, _>(3 * proofs.len(), elements))
}

/// Challenge binding a single commitment.
pub fn compute_single_challenge<E: Exponent, G: GroupElement<E>>(u: &G) -> E {
    hash_to_scalar(&serialize_elements::<E, G, _>(1, [u]))
}
