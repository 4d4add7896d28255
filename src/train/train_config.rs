use crate::train::epoch_stats::EpochStats;
use std::sync::mpsc;
use std::sync::{atomic::AtomicBool, Arc};

/// Configuration for a `train_loop` run.
///
/// # Fields
/// - `epochs`      — number of epochs to train for
/// - `batch_size`  — chunk size handed to `Network::train_one_epoch`
/// - `progress_tx` — optional channel sender; one `EpochStats` is sent per
///                   completed epoch. If the receiver is dropped the loop
///                   terminates early (clean shutdown).
/// - `stop_flag`   — optional atomic flag; when set to `true` from another
///                   thread the loop terminates between epochs.
pub struct TrainConfig {
    pub epochs: usize,
    pub batch_size: usize,
    pub progress_tx: Option<mpsc::Sender<EpochStats>>,
    pub stop_flag: Option<Arc<AtomicBool>>,
}

impl TrainConfig {
    /// Creates a minimal `TrainConfig` with no progress channel and no stop flag.
    pub fn new(epochs: usize, batch_size: usize) -> Self {
        TrainConfig {
            epochs,
            batch_size,
            progress_tx: None,
            stop_flag: None,
        }
    }
}
