use serde::{Deserialize, Serialize};
use std::f64::consts::E;

/// Hidden-layer nonlinearity. The output layer always applies a sigmoid,
/// whatever the network is configured with.
///
/// Wire names match what the chart/control components send: `tanh`,
/// `relu`, `leakyRelu`, `sigmoid`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivationFunction {
    #[serde(rename = "tanh")]
    Tanh,
    #[serde(rename = "relu")]
    Relu,
    #[serde(rename = "leakyRelu")]
    LeakyRelu,
    #[serde(rename = "sigmoid")]
    Sigmoid,
}

impl ActivationFunction {
    /// Element-wise activation.
    pub fn function(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => x.tanh(),
            ActivationFunction::Relu => {
                if x > 0.0 {
                    x
                } else {
                    0.0
                }
            }
            ActivationFunction::LeakyRelu => {
                if x > 0.0 {
                    x
                } else {
                    0.01 * x
                }
            }
            ActivationFunction::Sigmoid => sigmoid(x),
        }
    }

    /// Element-wise derivative of the activation, evaluated at the
    /// pre-activation value.
    pub fn derivative(&self, x: f64) -> f64 {
        match self {
            ActivationFunction::Tanh => {
                let t = x.tanh();
                1.0 - t * t
            }
            ActivationFunction::Relu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.0
                }
            }
            ActivationFunction::LeakyRelu => {
                if x > 0.0 {
                    1.0
                } else {
                    0.01
                }
            }
            ActivationFunction::Sigmoid => {
                let s = sigmoid(x);
                s * (1.0 - s)
            }
        }
    }
}

/// Logistic sigmoid with the input clamped to [-10, 10] before
/// exponentiation. The clamp bounds `exp` for saturated pre-activations
/// and keeps the output strictly inside (0, 1).
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + E.powf(-z.clamp(-10.0, 10.0)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn sigmoid_at_zero_is_half() {
        assert_relative_eq!(sigmoid(0.0), 0.5);
    }

    #[test]
    fn sigmoid_clamps_saturated_inputs() {
        assert_eq!(sigmoid(-1000.0), sigmoid(-10.0));
        assert_eq!(sigmoid(1000.0), sigmoid(10.0));
        assert!(sigmoid(-1000.0) > 0.0);
        assert!(sigmoid(1000.0) < 1.0);
    }

    #[test]
    fn tanh_matches_std() {
        let f = ActivationFunction::Tanh;
        assert_relative_eq!(f.function(0.7), 0.7_f64.tanh());
        assert_relative_eq!(f.derivative(0.0), 1.0);
        let t = 0.7_f64.tanh();
        assert_relative_eq!(f.derivative(0.7), 1.0 - t * t);
    }

    #[test]
    fn relu_and_leaky_relu_slopes() {
        let relu = ActivationFunction::Relu;
        assert_eq!(relu.function(-3.0), 0.0);
        assert_eq!(relu.function(3.0), 3.0);
        assert_eq!(relu.derivative(-3.0), 0.0);
        assert_eq!(relu.derivative(3.0), 1.0);

        let leaky = ActivationFunction::LeakyRelu;
        assert_relative_eq!(leaky.function(-3.0), -0.03);
        assert_eq!(leaky.function(3.0), 3.0);
        assert_relative_eq!(leaky.derivative(-3.0), 0.01);
        assert_eq!(leaky.derivative(3.0), 1.0);
    }

    #[test]
    fn sigmoid_derivative_is_s_times_one_minus_s() {
        let f = ActivationFunction::Sigmoid;
        let s = sigmoid(2.0);
        assert_relative_eq!(f.derivative(2.0), s * (1.0 - s));
    }

    #[test]
    fn serde_names_match_the_ui_strings() {
        assert_eq!(serde_json::to_string(&ActivationFunction::LeakyRelu).unwrap(), "\"leakyRelu\"");
        let parsed: ActivationFunction = serde_json::from_str("\"tanh\"").unwrap();
        assert_eq!(parsed, ActivationFunction::Tanh);
    }
}
