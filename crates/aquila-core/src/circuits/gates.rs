//! Multi-controlled gate helpers.

use aquila_ir::{Circuit, QubitId};

use crate::error::{AquaError, AquaResult};

/// Ancillas needed by [`mcx`] for `num_controls` controls.
pub fn mcx_ancillas(num_controls: usize) -> usize {
    num_controls.saturating_sub(2)
}

/// Multi-controlled X.
///
/// Zero, one and two controls map to `x`, `cx` and `ccx`. More controls use
/// a v-chain of Toffolis over `controls.len() - 2` clean ancillas, which are
/// returned to |0⟩.
pub fn mcx(
    qc: &mut Circuit,
    controls: &[QubitId],
    target: QubitId,
    ancillas: &[QubitId],
) -> AquaResult<()> {
    match *controls {
        [] => {
            qc.x(target)?;
        }
        [c] => {
            qc.cx(c, target)?;
        }
        [a, b] => {
            qc.ccx(a, b, target)?;
        }
        _ => {
            let k = controls.len();
            let needed = mcx_ancillas(k);
            if ancillas.len() < needed {
                return Err(AquaError::InvalidInput(format!(
                    "mcx with {k} controls needs {needed} ancillas, got {}",
                    ancillas.len()
                )));
            }
            compute_and(qc, &controls[..k - 1], ancillas)?;
            qc.ccx(controls[k - 1], ancillas[k - 3], target)?;
            uncompute_and(qc, &controls[..k - 1], ancillas)?;
        }
    }
    Ok(())
}

/// Store the AND of `controls` (at least two) in `ancillas[controls.len() - 2]`.
fn compute_and(qc: &mut Circuit, controls: &[QubitId], ancillas: &[QubitId]) -> AquaResult<()> {
    qc.ccx(controls[0], controls[1], ancillas[0])?;
    for i in 2..controls.len() {
        qc.ccx(controls[i], ancillas[i - 2], ancillas[i - 1])?;
    }
    Ok(())
}

fn uncompute_and(qc: &mut Circuit, controls: &[QubitId], ancillas: &[QubitId]) -> AquaResult<()> {
    for i in (2..controls.len()).rev() {
        qc.ccx(controls[i], ancillas[i - 2], ancillas[i - 1])?;
    }
    qc.ccx(controls[0], controls[1], ancillas[0])?;
    Ok(())
}

/// Flip `target` if any of `controls` is set.
pub fn logical_or(
    qc: &mut Circuit,
    controls: &[QubitId],
    target: QubitId,
    ancillas: &[QubitId],
) -> AquaResult<()> {
    for &c in controls {
        qc.x(c)?;
    }
    mcx(qc, controls, target, ancillas)?;
    qc.x(target)?;
    for &c in controls {
        qc.x(c)?;
    }
    Ok(())
}

/// Multi-controlled `ry(θ)`.
///
/// More than one control uses `controls.len() - 1` ancillas to hold the AND
/// of the controls.
pub fn mcry(
    qc: &mut Circuit,
    theta: f64,
    controls: &[QubitId],
    target: QubitId,
    ancillas: &[QubitId],
) -> AquaResult<()> {
    match *controls {
        [] => {
            qc.ry(theta, target)?;
        }
        [c] => {
            qc.cry(theta, c, target)?;
        }
        _ => {
            let k = controls.len();
            if ancillas.len() < k - 1 {
                return Err(AquaError::InvalidInput(format!(
                    "mcry with {k} controls needs {} ancillas, got {}",
                    k - 1,
                    ancillas.len()
                )));
            }
            compute_and(qc, controls, ancillas)?;
            qc.cry(theta, ancillas[k - 2], target)?;
            uncompute_and(qc, controls, ancillas)?;
        }
    }
    Ok(())
}
