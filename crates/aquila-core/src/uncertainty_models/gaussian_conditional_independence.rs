//! Gaussian conditional independence model for credit risk.
//!
//! A latent standard normal variable `Z` is loaded into `n_normal` qubits on
//! `[-z_max, z_max]`. Asset `k` defaults with probability
//! `p_k(z) = Φ((Φ⁻¹(p0_k) - sqrt(ρ_k)·z) / sqrt(1 - ρ_k))`. One qubit per
//! asset is rotated by an angle linear in the grid index of `Z`, the linear
//! term being the first-order expansion of `2·asin(sqrt(p_k(z)))` at `z = 0`.

use aquila_ir::{Circuit, QubitId};

use super::multivariate::MultivariateDistribution;
use super::normal::NormalDistribution;
use crate::circuits::{CircuitFactory, LinearYRotation, check_qubits};
use crate::error::{AquaError, AquaResult};
use crate::special;

/// Latent normal factor plus one default qubit per asset.
#[derive(Debug, Clone)]
pub struct GaussianConditionalIndependenceModel {
    n_normal: usize,
    normal_max_value: f64,
    p_zeros: Vec<f64>,
    rhos: Vec<f64>,
    i_normal: Vec<usize>,
    i_ps: Vec<usize>,
    shape: MultivariateDistribution,
    normal: NormalDistribution,
    slopes: Vec<f64>,
    offsets: Vec<f64>,
    rotations: Vec<LinearYRotation>,
}

impl GaussianConditionalIndependenceModel {
    /// Create the model.
    ///
    /// `i_normal` defaults to `0..n_normal` and `i_ps` to
    /// `n_normal..n_normal + K`, `K` being the number of assets. A
    /// sensitivity `ρ ≥ 1` is not rejected and yields NaN angles.
    pub fn new(
        n_normal: usize,
        normal_max_value: f64,
        p_zeros: Vec<f64>,
        rhos: Vec<f64>,
        i_normal: Option<Vec<usize>>,
        i_ps: Option<Vec<usize>>,
    ) -> AquaResult<Self> {
        let k = p_zeros.len();
        if rhos.len() != k {
            return Err(AquaError::InvalidInput(format!(
                "{k} default probabilities but {} sensitivities",
                rhos.len()
            )));
        }
        let i_normal = i_normal.unwrap_or_else(|| (0..n_normal).collect());
        let i_ps = i_ps.unwrap_or_else(|| (n_normal..n_normal + k).collect());
        if i_normal.len() != n_normal || i_ps.len() != k {
            return Err(AquaError::InvalidInput(format!(
                "expected {n_normal} normal and {k} default indices, got {} and {}",
                i_normal.len(),
                i_ps.len()
            )));
        }

        let mut num_qubits = vec![n_normal];
        num_qubits.extend(std::iter::repeat_n(1, k));
        let mut low = vec![-normal_max_value];
        low.extend(std::iter::repeat_n(0.0, k));
        let mut high = vec![normal_max_value];
        high.extend(std::iter::repeat_n(1.0, k));
        let shape = MultivariateDistribution::new(num_qubits, low, high)?;

        let normal =
            NormalDistribution::new(n_normal, 0.0, 1.0, -normal_max_value, normal_max_value)?;

        let mut slopes = Vec::with_capacity(k);
        let mut offsets = Vec::with_capacity(k);
        let mut rotations = Vec::with_capacity(k);
        for (&p0, (&rho, &i_target)) in p_zeros.iter().zip(rhos.iter().zip(&i_ps)) {
            let (slope, offset) = linear_coefficients(p0, rho, normal_max_value, n_normal);
            slopes.push(slope);
            offsets.push(offset);
            rotations.push(LinearYRotation::new(
                slope,
                offset,
                n_normal,
                Some(i_normal.clone()),
                Some(i_target),
            )?);
        }

        Ok(Self {
            n_normal,
            normal_max_value,
            p_zeros,
            rhos,
            i_normal,
            i_ps,
            shape,
            normal,
            slopes,
            offsets,
            rotations,
        })
    }

    /// Number of assets.
    pub fn num_assets(&self) -> usize {
        self.p_zeros.len()
    }

    /// Qubits of the latent normal variable.
    pub fn n_normal(&self) -> usize {
        self.n_normal
    }

    /// Truncation bound of the latent variable.
    pub fn normal_max_value(&self) -> f64 {
        self.normal_max_value
    }

    /// Unconditional default probabilities.
    pub fn p_zeros(&self) -> &[f64] {
        &self.p_zeros
    }

    /// Sensitivities to the latent variable.
    pub fn rhos(&self) -> &[f64] {
        &self.rhos
    }

    /// Qubit indices of the latent variable.
    pub fn i_normal(&self) -> &[usize] {
        &self.i_normal
    }

    /// Qubit indices of the asset defaults.
    pub fn i_ps(&self) -> &[usize] {
        &self.i_ps
    }

    /// Per-dimension shape: `[n_normal, 1, …, 1]` qubits.
    pub fn shape(&self) -> &MultivariateDistribution {
        &self.shape
    }

    /// The discretized latent normal distribution.
    pub fn normal(&self) -> &NormalDistribution {
        &self.normal
    }

    /// Rotation slope per asset, per unit of the latent grid index.
    pub fn slopes(&self) -> &[f64] {
        &self.slopes
    }

    /// Rotation angle per asset at grid index 0.
    pub fn offsets(&self) -> &[f64] {
        &self.offsets
    }

    /// Default probability of asset `k` at latent grid index `i`, as loaded
    /// by the circuit.
    #[allow(clippy::cast_precision_loss)]
    pub fn conditional_default_probability(&self, k: usize, i: usize) -> f64 {
        let angle = self.offsets[k] + self.slopes[k] * i as f64;
        (angle / 2.0).sin().powi(2)
    }
}

/// Slope and offset of the default rotation of one asset, in grid units.
#[allow(clippy::cast_precision_loss)]
fn linear_coefficients(p0: f64, rho: f64, z_max: f64, n_normal: usize) -> (f64, f64) {
    let psi = special::ppf(p0) / (1.0 - rho).sqrt();
    let f_psi = special::cdf(psi);

    let mut slope = -rho.sqrt() / (1.0 - rho).sqrt();
    slope *= special::pdf(psi) / (1.0 - f_psi).sqrt() / f_psi.sqrt();
    let mut offset = 2.0 * f_psi.sqrt().asin();

    // map the grid index onto [-z_max, z_max]
    offset += slope * (-z_max);
    slope *= 2.0 * z_max / ((1u64 << n_normal) - 1) as f64;
    (slope, offset)
}

impl CircuitFactory for GaussianConditionalIndependenceModel {
    fn num_target_qubits(&self) -> usize {
        self.i_normal
            .iter()
            .chain(&self.i_ps)
            .max()
            .map_or(0, |m| m + 1)
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        check_qubits(self, q, q_ancillas)?;
        let normal_qubits: Vec<QubitId> = self.i_normal.iter().map(|&i| q[i]).collect();
        self.normal.build(qc, &normal_qubits, q_ancillas)?;
        for rotation in &self.rotations {
            rotation.build(qc, q, q_ancillas)?;
        }
        Ok(())
    }
}
