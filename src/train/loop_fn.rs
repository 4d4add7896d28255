use std::sync::atomic::Ordering;

use crate::data::generate::Dataset;
use crate::network::network::Network;
use crate::train::train_config::TrainConfig;

/// Trains `network` for `config.epochs` epochs and returns the mean
/// training loss of the last completed epoch.
///
/// The network itself is a pure step function with no notion of being
/// "started" or "stopped"; this loop is the continuous-training
/// composition a driver builds around it. The stop flag is checked between
/// epochs — there is no mid-epoch cancellation point, epochs are short and
/// run to completion.
///
/// # Early termination
/// The loop breaks early if:
/// - the `progress_tx` receiver has been dropped, **or**
/// - `config.stop_flag` is set to `true`.
///
/// # Panics
/// Panics if `train` is empty or either dataset has mismatched
/// points/labels lengths (`Network::train_one_epoch` preconditions).
pub fn train_loop(
    network: &mut Network,
    train: &Dataset,
    test: &Dataset,
    config: &TrainConfig,
) -> f64 {
    let mut last_train_loss = 0.0;

    for _ in 0..config.epochs {
        if let Some(ref flag) = config.stop_flag {
            if flag.load(Ordering::Relaxed) {
                break;
            }
        }

        let stats = network.train_one_epoch(
            &train.points,
            &train.labels,
            &test.points,
            &test.labels,
            config.batch_size,
        );
        last_train_loss = stats.train_loss;

        if let Some(ref tx) = config.progress_tx {
            // If the receiver has been dropped, stop training.
            if tx.send(stats).is_err() {
                break;
            }
        }
    }

    last_train_loss
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate::{generate, Distribution};
    use std::sync::atomic::AtomicBool;
    use std::sync::{mpsc, Arc};

    fn xor_network() -> (Network, Dataset, Dataset) {
        let mut network = Network::new(2, 1, 4);
        network.set_learning_rate(0.05);
        let train = generate(40, Distribution::Xor);
        let test = generate(10, Distribution::Xor);
        (network, train, test)
    }

    #[test]
    fn runs_the_requested_number_of_epochs() {
        let (mut network, train, test) = xor_network();
        let last = train_loop(&mut network, &train, &test, &TrainConfig::new(7, 16));
        assert_eq!(network.current_epoch, 7);
        assert_eq!(network.training_loss.len(), 7);
        assert_eq!(last, *network.training_loss.last().unwrap());
    }

    #[test]
    fn preset_stop_flag_prevents_any_epoch() {
        let (mut network, train, test) = xor_network();
        let mut config = TrainConfig::new(100, 16);
        config.stop_flag = Some(Arc::new(AtomicBool::new(true)));
        let last = train_loop(&mut network, &train, &test, &config);
        assert_eq!(network.current_epoch, 0);
        assert_eq!(last, 0.0);
    }

    #[test]
    fn sends_one_stats_frame_per_epoch() {
        let (mut network, train, test) = xor_network();
        let (tx, rx) = mpsc::channel();
        let mut config = TrainConfig::new(5, 16);
        config.progress_tx = Some(tx);
        train_loop(&mut network, &train, &test, &config);
        drop(config);

        let frames: Vec<_> = rx.iter().collect();
        assert_eq!(frames.len(), 5);
        for (i, stats) in frames.iter().enumerate() {
            assert_eq!(stats.epoch, i + 1);
            assert_eq!(stats.avg_gradient_magnitudes.len(), 2);
        }
    }

    #[test]
    fn dropped_receiver_stops_the_loop_after_one_epoch() {
        let (mut network, train, test) = xor_network();
        let (tx, rx) = mpsc::channel();
        drop(rx);
        let mut config = TrainConfig::new(100, 16);
        config.progress_tx = Some(tx);
        train_loop(&mut network, &train, &test, &config);
        // The first send fails, so exactly one epoch completes.
        assert_eq!(network.current_epoch, 1);
    }
}
