//! Y rotation with an angle linear in a register value.

use aquila_ir::{Circuit, QubitId};

use super::gates::mcry;
use super::{CircuitFactory, check_qubits, synthesize_controlled};
use crate::error::{AquaError, AquaResult};

/// Maps `|x⟩|0⟩` to `|x⟩ ry(offset + slope·x)|0⟩`.
///
/// `x` is the integer held by the state qubits `q[i_state[0]]` (least
/// significant) through `q[i_state[n-1]]`.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearYRotation {
    slope: f64,
    offset: f64,
    i_state: Vec<usize>,
    i_target: usize,
}

impl LinearYRotation {
    /// Create the rotation over `num_state_qubits` state qubits.
    ///
    /// `i_state` defaults to `0..num_state_qubits` and `i_target` to
    /// `num_state_qubits`.
    pub fn new(
        slope: f64,
        offset: f64,
        num_state_qubits: usize,
        i_state: Option<Vec<usize>>,
        i_target: Option<usize>,
    ) -> AquaResult<Self> {
        let i_state = i_state.unwrap_or_else(|| (0..num_state_qubits).collect());
        if i_state.len() != num_state_qubits {
            return Err(AquaError::InvalidInput(format!(
                "{} state indices for {num_state_qubits} state qubits",
                i_state.len()
            )));
        }
        Ok(Self {
            slope,
            offset,
            i_state,
            i_target: i_target.unwrap_or(num_state_qubits),
        })
    }

    /// Slope of the angle per unit of the state value.
    pub fn slope(&self) -> f64 {
        self.slope
    }

    /// Angle applied for state value 0.
    pub fn offset(&self) -> f64 {
        self.offset
    }
}

impl CircuitFactory for LinearYRotation {
    fn num_target_qubits(&self) -> usize {
        self.i_state
            .iter()
            .copied()
            .chain(std::iter::once(self.i_target))
            .max()
            .map_or(0, |m| m + 1)
    }

    fn build(&self, qc: &mut Circuit, q: &[QubitId], q_ancillas: &[QubitId]) -> AquaResult<()> {
        check_qubits(self, q, q_ancillas)?;
        let target = q[self.i_target];
        qc.ry(self.offset, target)?;
        for (i, &j) in self.i_state.iter().enumerate() {
            let theta = self.slope * f64::from(1u32 << i);
            qc.cry(theta, q[j], target)?;
        }
        Ok(())
    }

    fn required_ancillas_controlled(&self) -> usize {
        usize::from(!self.i_state.is_empty())
    }

    /// Native mode adds the control to every rotation through [`mcry`],
    /// using one ancilla. Basis mode synthesizes the rotations gate by gate.
    fn build_controlled(
        &self,
        qc: &mut Circuit,
        q: &[QubitId],
        q_control: QubitId,
        q_ancillas: &[QubitId],
        use_basis_gates: bool,
    ) -> AquaResult<()> {
        if use_basis_gates {
            return synthesize_controlled(self, qc, q, q_control, q_ancillas, true);
        }
        check_qubits(self, q, q_ancillas)?;
        let target = q[self.i_target];
        mcry(qc, self.offset, &[q_control], target, &[])?;
        for (i, &j) in self.i_state.iter().enumerate() {
            let theta = self.slope * f64::from(1u32 << i);
            mcry(qc, theta, &[q_control, q[j]], target, q_ancillas)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use aquila_sim::StatevectorSimulator;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_rotation_angle_is_linear() {
        let lry = LinearYRotation::new(0.1, 0.3, 2, None, None).unwrap();
        for x in 0..4u32 {
            let mut qc = Circuit::with_size("lry", 3, 0);
            for b in 0..2 {
                if (x >> b) & 1 == 1 {
                    qc.x(QubitId(b)).unwrap();
                }
            }
            lry.build(&mut qc, &[QubitId(0), QubitId(1), QubitId(2)], &[])
                .unwrap();
            let mut rng = StdRng::seed_from_u64(0);
            let sv = StatevectorSimulator::new().statevector(&qc, &mut rng).unwrap();
            let angle = 0.3 + 0.1 * f64::from(x);
            let expected = (angle / 2.0).sin().powi(2);
            assert!((sv.probability_one(2) - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn test_custom_indices() {
        let lry = LinearYRotation::new(0.5, 0.0, 1, Some(vec![2]), Some(0)).unwrap();
        assert_eq!(lry.num_target_qubits(), 3);
        let mut qc = Circuit::with_size("lry", 3, 0);
        lry.build(&mut qc, &[QubitId(0), QubitId(1), QubitId(2)], &[])
            .unwrap();
        let cry = qc.ops().nth(1).unwrap();
        assert_eq!(cry.qubits, vec![QubitId(2), QubitId(0)]);
    }

    #[test]
    fn test_controlled_rotation_in_both_modes() {
        let lry = LinearYRotation::new(0.2, 0.4, 2, None, None).unwrap();
        assert_eq!(lry.required_ancillas_controlled(), 1);
        let q: Vec<QubitId> = (0..3).map(QubitId).collect();
        let (ctl, anc) = (QubitId(3), QubitId(4));

        for use_basis_gates in [false, true] {
            for control in [false, true] {
                for x in 0..4u32 {
                    let mut qc = Circuit::with_size("clry", 5, 0);
                    for b in 0..2 {
                        if (x >> b) & 1 == 1 {
                            qc.x(QubitId(b)).unwrap();
                        }
                    }
                    if control {
                        qc.x(ctl).unwrap();
                    }
                    lry.build_controlled(&mut qc, &q, ctl, &[anc], use_basis_gates)
                        .unwrap();

                    let mut rng = StdRng::seed_from_u64(0);
                    let sv = StatevectorSimulator::new().statevector(&qc, &mut rng).unwrap();
                    let expected = if control {
                        ((0.4 + 0.2 * f64::from(x)) / 2.0).sin().powi(2)
                    } else {
                        0.0
                    };
                    assert!(
                        (sv.probability_one(2) - expected).abs() < 1e-12,
                        "basis={use_basis_gates} control={control} x={x}"
                    );
                    assert!(sv.probability_one(4) < 1e-12, "ancilla left dirty");
                }
            }
        }
    }

    #[test]
    fn test_native_controlled_rotation_needs_ancilla() {
        let lry = LinearYRotation::new(0.2, 0.4, 1, None, None).unwrap();
        let mut qc = Circuit::with_size("clry", 3, 0);
        let q = [QubitId(0), QubitId(1)];
        assert!(lry.build_controlled(&mut qc, &q, QubitId(2), &[], false).is_err());
    }

    #[test]
    fn test_index_count_mismatch() {
        assert!(LinearYRotation::new(0.5, 0.0, 2, Some(vec![0]), None).is_err());
    }
}
