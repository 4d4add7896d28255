use serde::{Deserialize, Serialize};

use crate::activation::activation::{sigmoid, ActivationFunction};
use crate::data::generate::Dataset;
use crate::loss::bce::BceLoss;
use crate::math::matrix::Matrix;
use crate::train::epoch_stats::EpochStats;

/// Everything one `forward` call computes. `activations[0]` is the input
/// itself, each following entry is a layer's post-activation output, and
/// the last entry holds the single sigmoid output. `pre_activations[l]`
/// holds the weighted sums feeding `activations[l + 1]`, kept around for
/// the derivative evaluation during backprop.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPass {
    pub activations: Vec<Vec<f64>>,
    pub pre_activations: Vec<Vec<f64>>,
}

impl ForwardPass {
    /// The network's prediction for the input that produced this pass.
    pub fn output(&self) -> f64 {
        self.activations[self.activations.len() - 1][0]
    }
}

/// A fully-connected binary classifier trained by per-sample gradient
/// descent, with all of its state readable by the chart components every
/// frame.
///
/// The architecture is fixed at construction; swapping layer shapes means
/// constructing a new `Network`. Every container is owned, so the derived
/// `Clone` is a deep copy — cloning is the snapshot mechanism that keeps a
/// frozen historical view independent from the live training instance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Network {
    /// Width of the input layer (2 for the 2D toy datasets).
    pub input_size: usize,
    /// Hidden-layer widths, one entry per hidden layer.
    pub layer_widths: Vec<usize>,
    /// One matrix per layer transition, shaped [fan-in][fan-out].
    /// `weights[0]` maps the input to the first hidden layer; the last
    /// matrix maps the last hidden layer to the single output.
    pub weights: Vec<Matrix>,
    /// One bias vector per layer transition, one entry per output neuron.
    pub biases: Vec<Vec<f64>>,
    /// When false, forward passes skip biases and updates leave them alone.
    pub use_bias: bool,
    /// Hidden-layer nonlinearity; the output layer is always sigmoid.
    pub activation: ActivationFunction,
    pub learning_rate: f64,
    /// Mean training-set BCE after each completed epoch.
    pub training_loss: Vec<f64>,
    /// Mean test-set BCE after each completed epoch.
    pub test_loss: Vec<f64>,
    /// Per-epoch history of mean absolute weight gradients, one value per
    /// layer transition. Diagnostic only.
    pub average_gradients: Vec<Vec<f64>>,
    pub current_epoch: usize,
    /// Active training set; replaced on a task switch, preserved by `reset`.
    pub train_data: Dataset,
    /// Active test set, evaluated but never trained on.
    pub test_data: Dataset,
}

impl Network {
    /// Builds a network of `hidden_layers` hidden layers, each
    /// `neurons_per_layer` wide, ending in a single sigmoid output.
    ///
    /// # Panics
    /// Panics if any dimension is zero.
    pub fn new(input_size: usize, hidden_layers: usize, neurons_per_layer: usize) -> Network {
        assert!(hidden_layers >= 1, "hidden_layers must be at least 1");
        assert!(neurons_per_layer >= 1, "neurons_per_layer must be at least 1");
        Network::with_widths(input_size, &vec![neurons_per_layer; hidden_layers])
    }

    /// Builds a network with an explicit width per hidden layer.
    ///
    /// # Panics
    /// Panics if `input_size` is zero, `hidden_widths` is empty, or any
    /// width is zero.
    pub fn with_widths(input_size: usize, hidden_widths: &[usize]) -> Network {
        assert!(input_size >= 1, "input_size must be at least 1");
        assert!(!hidden_widths.is_empty(), "at least one hidden layer is required");
        assert!(
            hidden_widths.iter().all(|&w| w >= 1),
            "hidden layer widths must be at least 1"
        );

        let (weights, biases) = init_parameters(input_size, hidden_widths);

        Network {
            input_size,
            layer_widths: hidden_widths.to_vec(),
            weights,
            biases,
            use_bias: true,
            activation: ActivationFunction::Tanh,
            learning_rate: 0.01,
            training_loss: Vec::new(),
            test_loss: Vec::new(),
            average_gradients: Vec::new(),
            current_epoch: 0,
            train_data: Dataset::default(),
            test_data: Dataset::default(),
        }
    }

    pub fn hidden_layer_count(&self) -> usize {
        self.layer_widths.len()
    }

    pub fn set_learning_rate(&mut self, rate: f64) {
        self.learning_rate = rate;
    }

    pub fn set_activation(&mut self, activation: ActivationFunction) {
        self.activation = activation;
    }

    pub fn set_use_bias(&mut self, use_bias: bool) {
        self.use_bias = use_bias;
    }

    /// Swaps the active train/test sets without touching weights or loss
    /// histories. This is the task-switch operation: learned weights carry
    /// over onto the new distribution.
    pub fn set_train_test_data(&mut self, train: Dataset, test: Dataset) {
        self.train_data = train;
        self.test_data = test;
    }

    /// Reinitializes weights and biases in place and clears the training
    /// bookkeeping. Architecture, hyperparameters and the active datasets
    /// are preserved.
    pub fn reset(&mut self) {
        let (weights, biases) = init_parameters(self.input_size, &self.layer_widths);
        self.weights = weights;
        self.biases = biases;
        self.training_loss.clear();
        self.test_loss.clear();
        self.average_gradients.clear();
        self.current_epoch = 0;
    }

    /// Mean absolute gradients from the most recent epoch, one value per
    /// layer transition; `None` before the first epoch.
    pub fn last_gradient_magnitudes(&self) -> Option<&[f64]> {
        self.average_gradients.last().map(|v| v.as_slice())
    }

    /// Runs one input through the network, recording every layer's pre- and
    /// post-activation values. Reads weights and hyperparameters, mutates
    /// nothing — cheap enough for a renderer to call over a whole grid.
    pub fn forward(&self, input: &[f64]) -> ForwardPass {
        debug_assert_eq!(input.len(), self.input_size);

        let transitions = self.weights.len();
        let mut activations = Vec::with_capacity(transitions + 1);
        let mut pre_activations = Vec::with_capacity(transitions);
        activations.push(input.to_vec());

        for l in 0..transitions {
            let weights = &self.weights[l];
            let current = &activations[l];
            let last = l == transitions - 1;

            let mut zs = Vec::with_capacity(weights.cols);
            let mut outs = Vec::with_capacity(weights.cols);
            for j in 0..weights.cols {
                let mut z = if self.use_bias { self.biases[l][j] } else { 0.0 };
                for (i, a) in current.iter().enumerate() {
                    z += a * weights.data[i][j];
                }
                // Final transition is always sigmoid.
                let out = if last { sigmoid(z) } else { self.activation.function(z) };
                zs.push(z);
                outs.push(out);
            }

            pre_activations.push(zs);
            activations.push(outs);
        }

        ForwardPass { activations, pre_activations }
    }

    /// The sigmoid output for one input.
    pub fn predict(&self, input: &[f64]) -> f64 {
        self.forward(input).output()
    }

    /// Mean BCE over a dataset with the current weights; no updates are
    /// made. An empty set reports 0.0.
    pub fn mean_loss(&self, points: &[Vec<f64>], labels: &[f64]) -> f64 {
        if points.is_empty() {
            return 0.0;
        }
        let total: f64 = points
            .iter()
            .zip(labels.iter())
            .map(|(point, &label)| BceLoss::loss(&[self.predict(point)], &[label]))
            .sum();
        total / points.len() as f64
    }

    /// Runs one full training epoch.
    ///
    /// Every sample gets its own forward and backward pass with an
    /// immediate weight update, in dataset order — the `batch_size`
    /// chunking only scopes the gradient-magnitude accounting, it never
    /// averages gradients before applying them. After the pass, the mean
    /// BCE of the *updated* network is computed over both full sets and
    /// appended to the histories, and the epoch counter advances.
    ///
    /// # Panics
    /// Panics if the training set is empty, if either set's points and
    /// labels differ in length, or if `batch_size` is zero.
    pub fn train_one_epoch(
        &mut self,
        train_points: &[Vec<f64>],
        train_labels: &[f64],
        test_points: &[Vec<f64>],
        test_labels: &[f64],
        batch_size: usize,
    ) -> EpochStats {
        assert!(!train_points.is_empty(), "training set must not be empty");
        assert_eq!(
            train_points.len(),
            train_labels.len(),
            "train points and labels must have equal length"
        );
        assert_eq!(
            test_points.len(),
            test_labels.len(),
            "test points and labels must have equal length"
        );
        assert!(batch_size > 0, "batch_size must be at least 1");

        let transitions = self.weights.len();
        let mut epoch_gradients = vec![0.0; transitions];
        let mut sample_count = 0usize;

        let n = train_points.len();
        for batch_start in (0..n).step_by(batch_size) {
            let batch_end = (batch_start + batch_size).min(n);
            for idx in batch_start..batch_end {
                let pass = self.forward(&train_points[idx]);
                let magnitudes = self.backward_single_sample(train_labels[idx], &pass);
                for (total, magnitude) in epoch_gradients.iter_mut().zip(magnitudes.iter()) {
                    *total += magnitude;
                }
                sample_count += 1;
            }
        }

        let avg_gradient_magnitudes: Vec<f64> = epoch_gradients
            .iter()
            .map(|g| g / sample_count as f64)
            .collect();
        self.average_gradients.push(avg_gradient_magnitudes.clone());

        // Loss over the full sets with the weights as they stand now.
        let train_loss = self.mean_loss(train_points, train_labels);
        let test_loss = self.mean_loss(test_points, test_labels);
        self.training_loss.push(train_loss);
        self.test_loss.push(test_loss);
        self.current_epoch += 1;

        EpochStats {
            epoch: self.current_epoch,
            train_loss,
            test_loss,
            avg_gradient_magnitudes,
        }
    }

    /// One epoch over the stored train/test sets (`set_train_test_data`).
    /// This is the step the driving loop calls once per tick.
    pub fn train_epoch(&mut self, batch_size: usize) -> EpochStats {
        let train = std::mem::take(&mut self.train_data);
        let test = std::mem::take(&mut self.test_data);
        let stats = self.train_one_epoch(
            &train.points,
            &train.labels,
            &test.points,
            &test.labels,
            batch_size,
        );
        self.train_data = train;
        self.test_data = test;
        stats
    }

    /// Backpropagates one sample and applies the SGD update in place,
    /// transition by transition from the output back. The error propagated
    /// to the previous layer is read from a transition's weights *before*
    /// that transition's own update is written. Returns the mean absolute
    /// weight gradient per transition.
    fn backward_single_sample(&mut self, target: f64, pass: &ForwardPass) -> Vec<f64> {
        let transitions = self.weights.len();
        let output = pass.activations[transitions][0];

        // Output delta: (ŷ - y) differentiated through the sigmoid.
        let mut error = vec![(output - target) * output * (1.0 - output)];
        let mut magnitudes = vec![0.0; transitions];

        for l in (0..transitions).rev() {
            let input_acts = &pass.activations[l];
            let in_width = input_acts.len();
            let out_width = self.weights[l].cols;

            // Error for the previous layer, computed from this transition's
            // weights as they stood at forward time.
            let propagated = if l > 0 {
                let mut next = Vec::with_capacity(in_width);
                for i in 0..in_width {
                    let mut e = 0.0;
                    for (j, err) in error.iter().enumerate() {
                        e += err * self.weights[l].data[i][j];
                    }
                    next.push(e * self.activation.derivative(pass.pre_activations[l - 1][i]));
                }
                Some(next)
            } else {
                None
            };

            let mut grad_sum = 0.0;
            for (j, &err) in error.iter().enumerate() {
                for i in 0..in_width {
                    let grad = err * input_acts[i];
                    grad_sum += grad.abs();
                    self.weights[l].data[i][j] -= self.learning_rate * grad;
                }
                if self.use_bias {
                    self.biases[l][j] -= self.learning_rate * err;
                }
            }
            magnitudes[l] = grad_sum / (in_width * out_width) as f64;

            if let Some(next) = propagated {
                error = next;
            }
        }

        magnitudes
    }
}

/// Freshly initialized weight matrices and bias vectors for an
/// architecture, ending in the single-output transition. Biases are drawn
/// as one-row matrices, so they get the fan-in-of-one scaling.
fn init_parameters(input_size: usize, hidden_widths: &[usize]) -> (Vec<Matrix>, Vec<Vec<f64>>) {
    let transitions = hidden_widths.len() + 1;
    let mut weights = Vec::with_capacity(transitions);
    let mut biases = Vec::with_capacity(transitions);

    let mut fan_in = input_size;
    for &width in hidden_widths {
        weights.push(Matrix::he_uniform(fan_in, width));
        biases.push(bias_row(width));
        fan_in = width;
    }

    // Last hidden -> output.
    weights.push(Matrix::he_uniform(fan_in, 1));
    biases.push(bias_row(1));

    (weights, biases)
}

fn bias_row(width: usize) -> Vec<f64> {
    Matrix::he_uniform(1, width).data.remove(0)
}
