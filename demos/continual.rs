//! Continual-learning demo: train on XOR, then switch the dataset to the
//! spiral task with the learned weights carried over, and measure how much
//! of the first task the network forgets.
//!
//! Each task runs `train_loop` on a worker thread with a stop flag and a
//! progress channel; the main thread prints one JSON line per epoch — the
//! same frames a charting frontend would consume.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread;

use plastic_nn::{
    generate, train_loop, ActivationFunction, Dataset, Distribution, Network, SnapshotTimeline,
    TrainConfig,
};

const TRAIN_SAMPLES: usize = 200;
const TEST_SAMPLES: usize = 40;
const EPOCHS_PER_TASK: usize = 150;
const SNAPSHOT_INTERVAL: usize = 50;

fn main() {
    let mut network = Network::new(2, 2, 8);
    network.set_activation(ActivationFunction::Tanh);
    network.set_learning_rate(0.05);

    let mut timeline = SnapshotTimeline::new(SNAPSHOT_INTERVAL);
    let xor_probe = generate(TEST_SAMPLES, Distribution::Xor);

    let tasks = [Distribution::Xor, Distribution::Spiral];
    let mut end_of_task: Vec<Network> = Vec::new();

    for (task_index, &task) in tasks.iter().enumerate() {
        println!("# task {}: {}", task_index + 1, task.name());

        let train = generate(TRAIN_SAMPLES, task);
        let test = generate(TEST_SAMPLES, task);
        network.set_train_test_data(train.clone(), test.clone());
        timeline.capture(&network, Some(task), task_index > 0);

        run_task(&mut network, &train, &test);
        timeline.maybe_capture(&network, Some(task));
        end_of_task.push(network.clone());
    }

    println!();
    println!(
        "timeline: {} snapshots, epochs {:?}",
        timeline.len(),
        timeline.snapshots().iter().map(|s| s.epoch).collect::<Vec<_>>()
    );

    // Forgetting: XOR loss of the model frozen right after the XOR task
    // versus the live model that went on to learn the spiral.
    let frozen = &end_of_task[0];
    let before = frozen.mean_loss(&xor_probe.points, &xor_probe.labels);
    let after = network.mean_loss(&xor_probe.points, &xor_probe.labels);
    println!("xor loss after task 1: {before:.4}");
    println!("xor loss after task 2: {after:.4}");
    println!("forgetting (loss increase): {:.4}", after - before);
}

/// Trains one task on a worker thread, streaming stats back to the main
/// thread. Training stops early once the train loss drops under 0.02.
fn run_task(network: &mut Network, train: &Dataset, test: &Dataset) {
    let stop_flag = Arc::new(AtomicBool::new(false));
    let (tx, rx) = mpsc::channel();
    let config = TrainConfig {
        epochs: EPOCHS_PER_TASK,
        batch_size: 32,
        progress_tx: Some(tx),
        stop_flag: Some(stop_flag.clone()),
    };

    thread::scope(|scope| {
        let worker = &mut *network;
        // The worker owns the config; dropping it on exit closes the
        // progress channel and ends the receive loop below.
        scope.spawn(move || train_loop(worker, train, test, &config));

        for stats in rx {
            if let Ok(json) = serde_json::to_string(&stats) {
                println!("{json}");
            }
            if stats.train_loss < 0.02 {
                stop_flag.store(true, Ordering::Relaxed);
            }
        }
    });
}
