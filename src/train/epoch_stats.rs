use serde::{Deserialize, Serialize};

/// Per-epoch training statistics.
///
/// Returned by `Network::train_one_epoch` and forwarded over the progress
/// channel by `train_loop`. Loss charts and gradient meters consume one of
/// these per completed epoch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpochStats {
    /// 1-based epoch number.
    pub epoch: usize,
    /// Mean training-set BCE, computed with the epoch's updated weights.
    pub train_loss: f64,
    /// Mean test-set BCE; the test set never updates weights.
    pub test_loss: f64,
    /// Mean absolute weight gradient per layer transition.
    pub avg_gradient_magnitudes: Vec<f64>,
}
