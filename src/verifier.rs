use tracing::debug;

use crate::commitment::commit_vector;
use crate::error::{Result, SigmaError};
use crate::fiatshamir::compute_proof_challenge;
use crate::group::{Exponent, GroupElement};
use crate::index::decompose_digits;
use crate::proof::{SigmaParams, SigmaProof};

fn reject(check: &'static str) -> SigmaError {
    debug!(check, "sigma proof rejected");
    SigmaError::ProofRejected(check)
}

/// Verifies a proof that one member of `commitments` is a commitment to zero.
pub fn verify<E, G>(
    params: &SigmaParams<G>,
    commitments: &[G],
    proof: &SigmaProof<E, G>,
) -> Result<()>
where
    E: Exponent,
    G: GroupElement<E>,
{
    params.parameters.validate()?;
    let n = params.parameters.n;
    let m = params.parameters.m;
    let (n_len, m_len) = (n as usize, m as usize);

    let SigmaProof {
        a,
        b,
        c,
        d,
        g_k,
        f,
        z_a,
        z_c,
        z_d,
    } = proof;

    if g_k.len() != m_len || f.len() != m_len * (n_len - 1) {
        return Err(SigmaError::InvalidArgument(format!(
            "proof shape ({} G_k, {} f) does not match n = {n}, m = {m}",
            g_k.len(),
            f.len()
        )));
    }

    let set = params.pad_set(commitments)?;
    debug!(n, m, set_size = set.len(), "verifying sigma proof");

    let x: E = compute_proof_challenge(&params.g, &set, [a, b, c, d], g_k);

    // Restore f_{j,0} = x - Σ_{i>=1} f_{j,i} in every block.
    let mut f_full = Vec::with_capacity(n_len * m_len);
    for block in f.chunks_exact(n_len - 1) {
        let mut first = x;
        for f_i in block {
            first -= *f_i;
        }
        f_full.push(first);
        f_full.extend_from_slice(block);
    }

    let lhs = (*b * x) + *a;
    let rhs = commit_vector(params.g, &params.h, &f_full, *z_a)?;
    if lhs != rhs {
        return Err(reject("one-hot commitment"));
    }

    let f_cross: Vec<E> = f_full.iter().map(|f_i| *f_i * (x - *f_i)).collect();
    let lhs = (*c * x) + *d;
    let rhs = commit_vector(params.g, &params.h, &f_cross, *z_c)?;
    if lhs != rhs {
        return Err(reject("binary constraint"));
    }

    let mut prod_c_i = G::identity();
    for (i, c_i) in set.iter().enumerate() {
        let digits = decompose_digits(i as u64, n, m)?;

        let mut prod_f_j = E::one();
        for (j, digit) in digits.iter().enumerate() {
            prod_f_j *= f_full[j * n_len + *digit as usize];
        }

        prod_c_i += *c_i * prod_f_j;
    }

    let mut prod_g_k = G::identity();
    let mut x_k = E::one();
    for g_k_k in g_k {
        prod_g_k += *g_k_k * x_k;
        x_k *= x;
    }

    let lhs = prod_c_i - prod_g_k;
    let rhs = params.g * *z_d;
    if lhs != rhs {
        return Err(reject("membership"));
    }

    Ok(())
}
