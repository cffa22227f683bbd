//! Preparation of real, non-negative amplitude states.
//!
//! Amplitudes are loaded level by level from the most significant qubit
//! down (Grover–Rudolph). Level `l` rotates qubit `n-1-l` with a uniformly
//! controlled `ry` whose controls are the `l` qubits above it. The uniform
//! control is decomposed without ancillas into `2^l` `ry` gates interleaved
//! with `cx` gates in Gray-code order.

use aquila_ir::{Circuit, QubitId};

use crate::error::{AquaError, AquaResult};

/// Append gates taking |0…0⟩ on `q` to `Σ_x sqrt(p_x) |x⟩`.
///
/// `probabilities` must have `2^q.len()` entries; they are normalized by
/// their sum. Qubit `q[k]` is bit `k` of the basis index.
pub fn prepare_probabilities(
    qc: &mut Circuit,
    q: &[QubitId],
    probabilities: &[f64],
) -> AquaResult<()> {
    let n = q.len();
    if probabilities.len() != 1 << n {
        return Err(AquaError::InvalidInput(format!(
            "{} probabilities cannot be loaded into {n} qubits",
            probabilities.len()
        )));
    }

    for level in 0..n {
        let target = q[n - 1 - level];
        let controls = &q[n - level..];
        let block = 1usize << (n - 1 - level);

        let alphas: Vec<f64> = (0..1usize << level)
            .map(|prefix| {
                let start = 2 * prefix * block;
                let p0: f64 = probabilities[start..start + block].iter().sum();
                let p1: f64 = probabilities[start + block..start + 2 * block].iter().sum();
                2.0 * p1.sqrt().atan2(p0.sqrt())
            })
            .collect();

        uniformly_controlled_ry(qc, &alphas, controls, target)?;
    }
    Ok(())
}

/// Rotate `target` by `ry(alphas[j])` when the controls hold the value `j`.
///
/// `controls[i]` is bit `i` of `j`.
pub fn uniformly_controlled_ry(
    qc: &mut Circuit,
    alphas: &[f64],
    controls: &[QubitId],
    target: QubitId,
) -> AquaResult<()> {
    let k = controls.len();
    let count = 1usize << k;
    if alphas.len() != count {
        return Err(AquaError::InvalidInput(format!(
            "{} angles for {k} controls",
            alphas.len()
        )));
    }
    if k == 0 {
        qc.ry(alphas[0], target)?;
        return Ok(());
    }

    #[allow(clippy::cast_precision_loss)]
    let scale = 1.0 / count as f64;
    for i in 0..count {
        let gray = i ^ (i >> 1);
        let theta = scale
            * alphas
                .iter()
                .enumerate()
                .map(|(j, a)| if (j & gray).count_ones() % 2 == 0 { *a } else { -*a })
                .sum::<f64>();
        qc.ry(theta, target)?;

        let flip = if i + 1 == count {
            k - 1
        } else {
            (i + 1).trailing_zeros() as usize
        };
        qc.cx(controls[flip], target)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_sim::StatevectorSimulator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn prepared(probabilities: &[f64], n: u32) -> Vec<f64> {
        let mut qc = Circuit::with_size("prep", n, 0);
        let q: Vec<_> = (0..n).map(QubitId).collect();
        prepare_probabilities(&mut qc, &q, probabilities).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        StatevectorSimulator::new()
            .statevector(&qc, &mut rng)
            .unwrap()
            .probabilities()
    }

    #[test]
    fn test_single_qubit() {
        let probs = prepared(&[0.25, 0.75], 1);
        assert!((probs[0] - 0.25).abs() < 1e-12);
        assert!((probs[1] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_three_qubits_arbitrary() {
        let target = [0.05, 0.1, 0.0, 0.2, 0.15, 0.3, 0.12, 0.08];
        let probs = prepared(&target, 3);
        for (p, t) in probs.iter().zip(&target) {
            assert!((p - t).abs() < 1e-12, "{probs:?}");
        }
    }

    #[test]
    fn test_amplitudes_are_real_and_non_negative() {
        let target = [0.4, 0.1, 0.3, 0.2];
        let mut qc = Circuit::with_size("prep", 2, 0);
        prepare_probabilities(&mut qc, &[QubitId(0), QubitId(1)], &target).unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let sv = StatevectorSimulator::new().statevector(&qc, &mut rng).unwrap();
        for (a, t) in sv.amplitudes().iter().zip(&target) {
            assert!(a.im.abs() < 1e-12);
            assert!((a.re - t.sqrt()).abs() < 1e-12);
        }
    }

    #[test]
    fn test_length_mismatch() {
        let mut qc = Circuit::with_size("prep", 2, 0);
        let err = prepare_probabilities(&mut qc, &[QubitId(0), QubitId(1)], &[1.0; 3]);
        assert!(matches!(err, Err(AquaError::InvalidInput(_))));
    }
}
