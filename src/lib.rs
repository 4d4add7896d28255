pub mod math;
pub mod activation;
pub mod data;
pub mod loss;
pub mod network;
pub mod train;

// Convenience re-exports
pub use math::matrix::Matrix;
pub use activation::activation::ActivationFunction;
pub use data::generate::{generate, Dataset, Distribution};
pub use loss::bce::BceLoss;
pub use network::network::{ForwardPass, Network};
pub use train::epoch_stats::EpochStats;
pub use train::history::{Snapshot, SnapshotTimeline};
pub use train::loop_fn::train_loop;
pub use train::train_config::TrainConfig;
