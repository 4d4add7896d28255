pub struct BceLoss;

const EPS: f64 = 1e-7;

impl BceLoss {
    /// Scalar BCE: -mean(y·ln(p) + (1-y)·ln(1-p)), with every prediction
    /// clamped into [ε, 1-ε] so a saturated output stays finite.
    pub fn loss(predicted: &[f64], expected: &[f64]) -> f64 {
        let n = predicted.len() as f64;
        predicted
            .iter()
            .zip(expected.iter())
            .map(|(p, y)| {
                let p = p.clamp(EPS, 1.0 - EPS);
                -(y * p.ln() + (1.0 - y) * (1.0 - p).ln())
            })
            .sum::<f64>()
            / n
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn maximum_uncertainty_costs_ln_two() {
        // A 0.5 prediction against either label is -ln(0.5).
        assert_relative_eq!(BceLoss::loss(&[0.5], &[1.0]), 0.6931, epsilon = 1e-4);
        assert_relative_eq!(BceLoss::loss(&[0.5], &[0.0]), 0.6931, epsilon = 1e-4);
    }

    #[test]
    fn saturated_predictions_stay_finite() {
        let confident_wrong = BceLoss::loss(&[1.0], &[0.0]);
        assert!(confident_wrong.is_finite());
        // Clamped at 1 - 1e-7, so the cost is -ln(1e-7).
        assert_relative_eq!(confident_wrong, -(1e-7_f64).ln(), epsilon = 1e-6);

        let confident_right = BceLoss::loss(&[1.0], &[1.0]);
        assert!(confident_right.is_finite());
        assert!(confident_right < 1e-6);
    }

    #[test]
    fn averages_over_outputs() {
        let a = BceLoss::loss(&[0.9], &[1.0]);
        let b = BceLoss::loss(&[0.2], &[0.0]);
        let both = BceLoss::loss(&[0.9, 0.2], &[1.0, 0.0]);
        assert_relative_eq!(both, (a + b) / 2.0);
    }
}
