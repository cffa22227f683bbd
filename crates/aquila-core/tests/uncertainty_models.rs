//! Gaussian conditional independence model: coefficients and loaded state.

use aquila_core::CircuitFactory;
use aquila_core::uncertainty_models::GaussianConditionalIndependenceModel;
use aquila_ir::{Circuit, QubitId};
use aquila_sim::StatevectorSimulator;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn two_asset_model() -> GaussianConditionalIndependenceModel {
    GaussianConditionalIndependenceModel::new(2, 2.0, vec![0.15, 0.25], vec![0.1, 0.05], None, None)
        .unwrap()
}

// ============================================================================
// Closed-form coefficients
// ============================================================================

#[test]
fn test_slopes_and_offsets_match_closed_form() {
    let gci = two_asset_model();
    let expected = [
        (-0.283_645_977_267_125_2, 1.184_671_505_588_538_6),
        (-0.223_485_234_837_256_82, 1.369_594_840_795_141_3),
    ];
    for (k, (slope, offset)) in expected.into_iter().enumerate() {
        assert!((gci.slopes()[k] - slope).abs() < 1e-12, "slope {k}");
        assert!((gci.offsets()[k] - offset).abs() < 1e-12, "offset {k}");
    }
}

#[test]
fn test_default_probability_falls_with_latent_value() {
    let gci = two_asset_model();
    for k in 0..2 {
        let p: Vec<f64> = (0..4)
            .map(|i| gci.conditional_default_probability(k, i))
            .collect();
        assert!(p.windows(2).all(|w| w[0] > w[1]), "asset {k}: {p:?}");
    }
}

// ============================================================================
// Loaded state
// ============================================================================

#[test]
fn test_circuit_loads_joint_distribution() {
    let gci = two_asset_model();
    let n = gci.num_target_qubits();
    let mut qc = Circuit::with_size("gci", n as u32, 0);
    let q: Vec<_> = (0..n as u32).map(QubitId).collect();
    gci.build(&mut qc, &q, &[]).unwrap();

    let mut rng = StdRng::seed_from_u64(5);
    let probs = StatevectorSimulator::new()
        .statevector(&qc, &mut rng)
        .unwrap()
        .probabilities();

    let normal = gci.normal().distribution().probabilities();
    for (index, &p) in probs.iter().enumerate() {
        let z = index & 0b11;
        let mut expected = normal[z];
        for k in 0..2 {
            let pd = gci.conditional_default_probability(k, z);
            expected *= if (index >> (2 + k)) & 1 == 1 { pd } else { 1.0 - pd };
        }
        assert!((p - expected).abs() < 1e-12, "state {index:04b}");
    }
}
