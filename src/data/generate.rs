use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::str::FromStr;

use crate::math::matrix::Matrix;

/// A labeled set of 2D points. `labels[i]` is 0.0 or 1.0 and classifies
/// `points[i]`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub points: Vec<Vec<f64>>,
    pub labels: Vec<f64>,
}

impl Dataset {
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// The toy 2D distributions the playground trains on. Points live in
/// roughly [-6, 6]².
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Distribution {
    Xor,
    Spiral,
    Circle,
    Ring,
    Gaussian,
}

impl Distribution {
    pub const ALL: [Distribution; 5] = [
        Distribution::Xor,
        Distribution::Spiral,
        Distribution::Circle,
        Distribution::Ring,
        Distribution::Gaussian,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Distribution::Xor => "xor",
            Distribution::Spiral => "spiral",
            Distribution::Circle => "circle",
            Distribution::Ring => "ring",
            Distribution::Gaussian => "gaussian",
        }
    }
}

impl FromStr for Distribution {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "xor" => Ok(Distribution::Xor),
            "spiral" => Ok(Distribution::Spiral),
            "circle" => Ok(Distribution::Circle),
            "ring" => Ok(Distribution::Ring),
            "gaussian" => Ok(Distribution::Gaussian),
            other => Err(format!("unknown distribution: {other}")),
        }
    }
}

/// Samples `count` labeled points from the given distribution.
pub fn generate(count: usize, distribution: Distribution) -> Dataset {
    match distribution {
        Distribution::Xor => generate_xor(count),
        Distribution::Spiral => generate_spiral(count),
        Distribution::Circle => generate_circle(count),
        Distribution::Ring => generate_ring(count),
        Distribution::Gaussian => generate_gaussian(count),
    }
}

/// Four uniform quadrants on [-5, 5]²; label 1 where x and y disagree in sign.
pub fn generate_xor(count: usize) -> Dataset {
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    for _ in 0..count {
        let x = rng.gen::<f64>() * 2.0 - 1.0;
        let y = rng.gen::<f64>() * 2.0 - 1.0;
        points.push(vec![x * 5.0, y * 5.0]);
        labels.push(if (x > 0.0) != (y > 0.0) { 1.0 } else { 0.0 });
    }

    Dataset { points, labels }
}

/// Uniform points on [-6, 6]²; label 1 inside the radius band [2.5, 4.5].
pub fn generate_circle(count: usize) -> Dataset {
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    for _ in 0..count {
        let x1 = rng.gen::<f64>() * 12.0 - 6.0;
        let x2 = rng.gen::<f64>() * 12.0 - 6.0;
        let distance = (x1 * x1 + x2 * x2).sqrt();
        let in_band = (2.5..=4.5).contains(&distance);
        points.push(vec![x1, x2]);
        labels.push(if in_band { 1.0 } else { 0.0 });
    }

    Dataset { points, labels }
}

/// A central disc (label 0) surrounded by an annulus (label 1), half the
/// samples each.
pub fn generate_ring(count: usize) -> Dataset {
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    let half = count / 2;

    // Center cluster, radius up to 4.
    for _ in 0..half {
        let angle = rng.gen::<f64>() * 2.0 * PI;
        let r = rng.gen::<f64>() * 4.0;
        points.push(vec![r * angle.cos(), r * angle.sin()]);
        labels.push(0.0);
    }

    // Outer ring, radius 4 to 6.
    for _ in 0..count - half {
        let angle = rng.gen::<f64>() * 2.0 * PI;
        let r = 4.0 + rng.gen::<f64>() * 2.0;
        points.push(vec![r * angle.cos(), r * angle.sin()]);
        labels.push(1.0);
    }

    Dataset { points, labels }
}

/// Two interleaved spiral arms with a little coordinate noise; one point
/// per arm per step, so an odd `count` yields `count - 1` samples.
pub fn generate_spiral(count: usize) -> Dataset {
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    let n = count / 2;
    let revolutions = 3.0;
    let noise = 0.2;

    for i in 0..n {
        let fraction = if n > 1 { i as f64 / (n - 1) as f64 } else { 0.0 };
        let t = fraction * revolutions * PI;
        let r = 0.5 * t;

        // First arm (class 0).
        let x1 = r * t.cos() + (rng.gen::<f64>() * 2.0 - 1.0) * noise;
        let y1 = r * t.sin() + (rng.gen::<f64>() * 2.0 - 1.0) * noise;
        points.push(vec![x1, y1]);
        labels.push(0.0);

        // Second arm (class 1), phase-shifted by π.
        let x2 = r * (t + PI).cos() + (rng.gen::<f64>() * 2.0 - 1.0) * noise;
        let y2 = r * (t + PI).sin() + (rng.gen::<f64>() * 2.0 - 1.0) * noise;
        points.push(vec![x2, y2]);
        labels.push(1.0);
    }

    Dataset { points, labels }
}

/// Two unit-variance gaussian clusters centered at (2, 2) and (-2, -2).
pub fn generate_gaussian(count: usize) -> Dataset {
    let mut rng = rand::thread_rng();
    let mut points = Vec::with_capacity(count);
    let mut labels = Vec::with_capacity(count);

    let half = count / 2;

    for _ in 0..half {
        let x = Matrix::sample_standard_normal(&mut rng) + 2.0;
        let y = Matrix::sample_standard_normal(&mut rng) + 2.0;
        points.push(vec![x, y]);
        labels.push(0.0);
    }

    for _ in 0..count - half {
        let x = Matrix::sample_standard_normal(&mut rng) - 2.0;
        let y = Matrix::sample_standard_normal(&mut rng) - 2.0;
        points.push(vec![x, y]);
        labels.push(1.0);
    }

    Dataset { points, labels }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_shape(dataset: &Dataset, expected: usize) {
        assert_eq!(dataset.points.len(), expected);
        assert_eq!(dataset.labels.len(), expected);
        assert!(dataset.points.iter().all(|p| p.len() == 2));
        assert!(dataset.labels.iter().all(|&l| l == 0.0 || l == 1.0));
    }

    #[test]
    fn every_distribution_produces_labeled_2d_points() {
        for distribution in Distribution::ALL {
            let dataset = generate(100, distribution);
            check_shape(&dataset, 100);
        }
    }

    #[test]
    fn xor_labels_follow_the_quadrant_rule() {
        let dataset = generate_xor(200);
        for (point, &label) in dataset.points.iter().zip(dataset.labels.iter()) {
            let expected = if (point[0] > 0.0) != (point[1] > 0.0) { 1.0 } else { 0.0 };
            assert_eq!(label, expected);
            assert!(point[0].abs() <= 5.0 && point[1].abs() <= 5.0);
        }
    }

    #[test]
    fn circle_labels_follow_the_band_rule() {
        let dataset = generate_circle(200);
        for (point, &label) in dataset.points.iter().zip(dataset.labels.iter()) {
            let r = (point[0] * point[0] + point[1] * point[1]).sqrt();
            let expected = if (2.5..=4.5).contains(&r) { 1.0 } else { 0.0 };
            assert_eq!(label, expected);
        }
    }

    #[test]
    fn ring_separates_disc_from_annulus_by_radius() {
        let dataset = generate_ring(200);
        check_shape(&dataset, 200);
        for (point, &label) in dataset.points.iter().zip(dataset.labels.iter()) {
            let r = (point[0] * point[0] + point[1] * point[1]).sqrt();
            if label == 0.0 {
                assert!(r < 4.0 + 1e-9);
            } else {
                assert!((4.0 - 1e-9..6.0 + 1e-9).contains(&r));
            }
        }
        assert_eq!(dataset.labels.iter().filter(|&&l| l == 0.0).count(), 100);
    }

    #[test]
    fn spiral_alternates_arms_and_drops_an_odd_sample() {
        let dataset = generate_spiral(101);
        check_shape(&dataset, 100);
        for (i, &label) in dataset.labels.iter().enumerate() {
            assert_eq!(label, (i % 2) as f64);
        }
    }

    #[test]
    fn gaussian_clusters_sit_in_opposite_corners() {
        let dataset = generate_gaussian(400);
        // Class means are (2,2) and (-2,-2); with 200 samples each the
        // empirical means land well inside a unit box around them.
        for class in [0.0, 1.0] {
            let class_points: Vec<&Vec<f64>> = dataset
                .points
                .iter()
                .zip(dataset.labels.iter())
                .filter(|(_, &l)| l == class)
                .map(|(p, _)| p)
                .collect();
            assert_eq!(class_points.len(), 200);
            let mean_x = class_points.iter().map(|p| p[0]).sum::<f64>() / 200.0;
            let expected = if class == 0.0 { 2.0 } else { -2.0 };
            assert!((mean_x - expected).abs() < 1.0);
        }
    }

    #[test]
    fn distribution_parses_from_ui_strings() {
        assert!("leaky".parse::<Distribution>().is_err());
        assert_eq!("spiral".parse::<Distribution>().unwrap(), Distribution::Spiral);
        assert_eq!(Distribution::Gaussian.name(), "gaussian");
        let json = serde_json::to_string(&Distribution::Xor).unwrap();
        assert_eq!(json, "\"xor\"");
    }
}
