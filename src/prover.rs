use crypto_bigint::rand_core::RngCore;
use tracing::debug;

use crate::commitment::commit_vector;
use crate::error::{Result, SigmaError};
use crate::fiatshamir::compute_proof_challenge;
use crate::group::{Exponent, GroupElement};
use crate::index::{decompose_digits, decompose_onehot};
use crate::polynomial::{evaluate, extend};
use crate::proof::{SigmaParams, SigmaProof, Witness};

struct ProverScalars<E> {
    r_a: E,
    r_b: E,
    r_c: E,
    r_d: E,
    a: Vec<E>,
    rho: Vec<E>,
}

struct ProverMemory<E> {
    scalars: ProverScalars<E>,
    sigma: Vec<E>,
}

struct ProofCommitment<G> {
    a: G,
    b: G,
    c: G,
    d: G,
    g_k: Vec<G>,
}

struct ProofResponse<E> {
    f: Vec<E>,
    z_a: E,
    z_c: E,
    z_d: E,
}

/// Coefficients of `p_i(X) = Π_j (a_{j,i_j} + σ_{j,i_j}·X)`, where `i_j` are
/// the base-`n` digits of `i`. The degree-`m` coefficient is one exactly when
/// `i` is the secret index.
fn compute_p_i_coefficients<E: Exponent>(
    i: u64,
    a: &[E],
    sigma: &[E],
    n: u64,
    m: u64,
) -> Result<Vec<E>> {
    let digits = decompose_digits(i, n, m)?;
    let n = n as usize;

    let first = digits[0] as usize;
    let mut coefficients = vec![a[first], sigma[first]];

    for (j, digit) in digits.iter().enumerate().skip(1) {
        let k = j * n + *digit as usize;
        coefficients = extend(a[k], sigma[k], &coefficients);
    }

    Ok(coefficients)
}

fn get_random_scalars<E: Exponent, R: RngCore>(
    rng: &mut R,
    n: usize,
    m: usize,
) -> ProverScalars<E> {
    let mut a = Vec::with_capacity(n * m);
    for _ in 0..m {
        let block: Vec<E> = (1..n).map(|_| E::rand(&mut *rng)).collect();

        // Each block of `a` sums to zero.
        let mut first = E::zero();
        for a_i in &block {
            first -= *a_i;
        }
        a.push(first);
        a.extend(block);
    }

    let rho = (0..m).map(|_| E::rand(&mut *rng)).collect();

    ProverScalars {
        r_a: E::rand(&mut *rng),
        r_b: E::rand(&mut *rng),
        r_c: E::rand(&mut *rng),
        r_d: E::rand(&mut *rng),
        a,
        rho,
    }
}

fn compute_commitments<E, G, R>(
    rng: &mut R,
    params: &SigmaParams<G>,
    set: &[G],
    witness: &Witness<E>,
) -> Result<(ProofCommitment<G>, ProverMemory<E>)>
where
    E: Exponent,
    G: GroupElement<E>,
    R: RngCore,
{
    let n = params.parameters.n;
    let m = params.parameters.m;
    let g = params.g;
    let h = &params.h;

    let sigma: Vec<E> = decompose_onehot(witness.l, n, m)?;
    let scalars = get_random_scalars(rng, n as usize, m as usize);
    let ProverScalars {
        r_a,
        r_b,
        r_c,
        r_d,
        a,
        rho,
    } = &scalars;

    let two = E::from_u64(2);
    let c_exponents: Vec<E> = a
        .iter()
        .zip(&sigma)
        .map(|(a_i, sigma_i): (&E, &E)| *a_i * (E::one() - two * *sigma_i))
        .collect();
    let d_exponents: Vec<E> = a.iter().map(|a_i: &E| -(*a_i * *a_i)).collect();

    let commitment_a = commit_vector(g, h, a, *r_a)?;
    let commitment_b = commit_vector(g, h, &sigma, *r_b)?;
    let commitment_c = commit_vector(g, h, &c_exponents, *r_c)?;
    let commitment_d = commit_vector(g, h, &d_exponents, *r_d)?;

    let mut g_k = vec![G::identity(); m as usize];
    for (i, c_i) in set.iter().enumerate() {
        let p_i_coefficients = compute_p_i_coefficients(i as u64, a, &sigma, n, m)?;
        for (g_k_k, p_i_k) in g_k.iter_mut().zip(&p_i_coefficients) {
            *g_k_k += *c_i * *p_i_k;
        }
    }
    for (g_k_k, rho_k) in g_k.iter_mut().zip(rho) {
        *g_k_k += g * *rho_k;
    }

    Ok((
        ProofCommitment {
            a: commitment_a,
            b: commitment_b,
            c: commitment_c,
            d: commitment_d,
            g_k,
        },
        ProverMemory { scalars, sigma },
    ))
}

fn compute_response<E: Exponent>(
    n: usize,
    m: usize,
    memory: ProverMemory<E>,
    witness: &Witness<E>,
    challenge: E,
) -> ProofResponse<E> {
    let x = challenge;

    let ProverMemory { scalars, sigma } = memory;
    let ProverScalars {
        r_a,
        r_b,
        r_c,
        r_d,
        a,
        rho,
    } = &scalars;

    // f_{j,0} is recomputed by the verifier from the other entries of the block.
    let mut f = Vec::with_capacity(m * (n - 1));
    for j in 0..m {
        for i in 1..n {
            let k = j * n + i;
            f.push(sigma[k] * x + a[k]);
        }
    }

    let mut x_m = E::one();
    for _ in 0..m {
        x_m *= x;
    }

    ProofResponse {
        f,
        z_a: *r_b * x + *r_a,
        z_c: *r_c * x + *r_d,
        z_d: witness.r * x_m - evaluate(rho, x),
    }
}

/// Proves knowledge of `r` and `l` such that `commitments[l] == g·r`, without
/// revealing `l`.
///
/// Sets shorter than `n^m` are padded with their last member.
pub fn prove<E, G, R>(
    rng: &mut R,
    params: &SigmaParams<G>,
    commitments: &[G],
    witness: &Witness<E>,
) -> Result<SigmaProof<E, G>>
where
    E: Exponent,
    G: GroupElement<E>,
    R: RngCore,
{
    params.parameters.validate()?;
    let set = params.pad_set(commitments)?;

    let l = witness.l;
    if l >= commitments.len() as u64 {
        return Err(SigmaError::IndexOutOfRange {
            index: l,
            size: commitments.len() as u64,
        });
    }
    if set[l as usize] != params.g * witness.r {
        return Err(SigmaError::InvalidArgument(
            "witness does not open the commitment at its index".into(),
        ));
    }

    let n = params.parameters.n;
    let m = params.parameters.m;
    debug!(n, m, set_size = set.len(), "generating sigma proof");

    let (commitment, memory) = compute_commitments(rng, params, &set, witness)?;
    let ProofCommitment { a, b, c, d, g_k } = commitment;

    let challenge = compute_proof_challenge(&params.g, &set, [&a, &b, &c, &d], &g_k);
    let ProofResponse { f, z_a, z_c, z_d } =
        compute_response(n as usize, m as usize, memory, witness, challenge);

    Ok(SigmaProof {
        a,
        b,
        c,
        d,
        g_k,
        f,
        z_a,
        z_c,
        z_d,
    })
}
