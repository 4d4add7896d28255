use crate::data::generate::Distribution;
use crate::network::network::Network;

/// One frozen copy of the network, tagged with when and on which task it
/// was taken.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// The network's epoch counter at capture time.
    pub epoch: usize,
    /// Distribution being trained when the snapshot was taken, if known.
    pub distribution: Option<Distribution>,
    /// Marks snapshots taken at a task boundary.
    pub task_switch: bool,
    pub network: Network,
}

/// An in-memory timeline of network snapshots for history scrubbing.
///
/// Snapshots are full clones, and restoring one clones again — the live
/// network and every stored copy never share state in either direction.
#[derive(Debug, Clone)]
pub struct SnapshotTimeline {
    /// Auto-capture cadence, in epochs.
    pub interval: usize,
    snapshots: Vec<Snapshot>,
    last_capture_epoch: usize,
}

impl SnapshotTimeline {
    /// # Panics
    /// Panics if `interval` is zero.
    pub fn new(interval: usize) -> SnapshotTimeline {
        assert!(interval >= 1, "snapshot interval must be at least 1");
        SnapshotTimeline {
            interval,
            snapshots: Vec::new(),
            last_capture_epoch: 0,
        }
    }

    /// Unconditionally stores a clone of `network`.
    pub fn capture(&mut self, network: &Network, distribution: Option<Distribution>, task_switch: bool) {
        self.last_capture_epoch = network.current_epoch;
        self.snapshots.push(Snapshot {
            epoch: network.current_epoch,
            distribution,
            task_switch,
            network: network.clone(),
        });
    }

    /// Stores a clone once at least `interval` epochs have passed since the
    /// last capture. Returns whether a snapshot was taken.
    pub fn maybe_capture(&mut self, network: &Network, distribution: Option<Distribution>) -> bool {
        if network.current_epoch.saturating_sub(self.last_capture_epoch) >= self.interval {
            self.capture(network, distribution, false);
            true
        } else {
            false
        }
    }

    /// Clones a stored snapshot's network back out for live use.
    pub fn restore(&self, index: usize) -> Option<Network> {
        self.snapshots.get(index).map(|s| s.network.clone())
    }

    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    pub fn latest(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Drops all snapshots and restarts the auto-capture cadence. Call this
    /// alongside `Network::reset` so the cadence tracks the fresh counter.
    pub fn clear(&mut self) {
        self.snapshots.clear();
        self.last_capture_epoch = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generate::{generate, Distribution};

    fn trained_network(epochs: usize) -> Network {
        let mut network = Network::new(2, 1, 4);
        network.set_train_test_data(
            generate(30, Distribution::Xor),
            generate(10, Distribution::Xor),
        );
        for _ in 0..epochs {
            network.train_epoch(16);
        }
        network
    }

    #[test]
    fn auto_capture_follows_the_interval() {
        let mut network = Network::new(2, 1, 4);
        network.set_train_test_data(
            generate(30, Distribution::Xor),
            generate(10, Distribution::Xor),
        );

        let mut timeline = SnapshotTimeline::new(5);
        for _ in 0..12 {
            network.train_epoch(16);
            timeline.maybe_capture(&network, Some(Distribution::Xor));
        }

        assert_eq!(timeline.len(), 2);
        assert_eq!(timeline.get(0).unwrap().epoch, 5);
        assert_eq!(timeline.get(1).unwrap().epoch, 10);
        assert_eq!(timeline.latest().unwrap().epoch, 10);
        assert!(!timeline.get(1).unwrap().task_switch);
    }

    #[test]
    fn restored_network_is_independent_of_the_snapshot() {
        let network = trained_network(3);
        let mut timeline = SnapshotTimeline::new(50);
        timeline.capture(&network, Some(Distribution::Xor), false);

        let mut restored = timeline.restore(0).unwrap();
        assert_eq!(restored.weights, timeline.get(0).unwrap().network.weights);

        restored.train_epoch(16);
        // Scrubbing forward on the restored copy leaves the stored frame alone.
        assert_eq!(timeline.get(0).unwrap().network.current_epoch, 3);
        assert_ne!(restored.weights, timeline.get(0).unwrap().network.weights);
    }

    #[test]
    fn clear_restarts_the_cadence() {
        let network = trained_network(7);
        let mut timeline = SnapshotTimeline::new(5);
        timeline.capture(&network, None, true);
        assert_eq!(timeline.len(), 1);

        timeline.clear();
        assert!(timeline.is_empty());

        // A fresh network after clear() captures again once the interval
        // is reached, even though its counter restarted from zero.
        let mut fresh = trained_network(0);
        for _ in 0..5 {
            fresh.train_epoch(16);
        }
        assert!(timeline.maybe_capture(&fresh, None));
    }
}
