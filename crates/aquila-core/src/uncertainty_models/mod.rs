//! Uncertainty models: discretized distributions loaded into qubits.
//!
//! Every model is a [`CircuitFactory`](crate::circuits::CircuitFactory) whose
//! `build` prepares the amplitudes `sqrt(p_i)` over its grid.

pub mod gaussian_conditional_independence;
pub mod multivariate;
pub mod normal;
pub mod univariate;

pub use gaussian_conditional_independence::GaussianConditionalIndependenceModel;
pub use multivariate::MultivariateDistribution;
pub use normal::{LogNormalDistribution, NormalDistribution, UniformDistribution};
pub use univariate::{UnivariateDistribution, linspace, pdf_to_probabilities};
