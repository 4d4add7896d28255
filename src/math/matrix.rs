use rand::prelude::*;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

/// Row-major 2D storage for one layer transition's weights.
/// `data[i][j]` connects input neuron `i` to output neuron `j`,
/// so `rows` is the fan-in and `cols` the fan-out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>,
}

impl Matrix {
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix {
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows],
        }
    }

    /// He-style uniform initialization: every entry is drawn from
    /// `[-1, 1] * sqrt(2 / rows)`, with `rows` as the fan-in.
    pub fn he_uniform(rows: usize, cols: usize) -> Matrix {
        let mut rng = rand::thread_rng();
        let scale = (2.0 / rows as f64).sqrt();
        let mut res = Matrix::zeros(rows, cols);

        for i in 0..rows {
            for j in 0..cols {
                res.data[i][j] = (rng.gen::<f64>() * 2.0 - 1.0) * scale;
            }
        }

        res
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    /// Both u1 and u2 must be uniform on (0, 1].
    pub(crate) fn sample_standard_normal(rng: &mut ThreadRng) -> f64 {
        // Draw two independent uniform samples in (0, 1] to avoid log(0).
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    pub fn from_data(data: Vec<Vec<f64>>) -> Matrix {
        Matrix {
            rows: data.len(),
            cols: data[0].len(),
            data,
        }
    }
}
