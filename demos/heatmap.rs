//! Renders a decision-boundary heatmap. Trains a network on one of the 2D
//! distributions, samples `forward` over a grid spanning [-6, 6]², and
//! writes the result as a PNG with the training points overlaid.
//!
//! Usage:
//!   cargo run --example heatmap -- [distribution] [output.png]

use image::{Rgb, RgbImage};
use plastic_nn::{generate, ActivationFunction, Distribution, Network};

const GRID_SIZE: u32 = 300;
const DOMAIN: f64 = 6.0;
const EPOCHS: usize = 400;

const CLASS0: [f64; 3] = [62.0, 117.0, 214.0];
const CLASS1: [f64; 3] = [232.0, 140.0, 56.0];
const DOT0: Rgb<u8> = Rgb([18, 54, 128]);
const DOT1: Rgb<u8> = Rgb([150, 76, 12]);

fn main() {
    let mut args = std::env::args().skip(1);
    let distribution_arg = args.next().unwrap_or_else(|| "circle".to_owned());
    let output = args.next().unwrap_or_else(|| "heatmap.png".to_owned());

    let distribution: Distribution = match distribution_arg.parse() {
        Ok(d) => d,
        Err(err) => {
            eprintln!("{err} (expected one of: xor, spiral, circle, ring, gaussian)");
            std::process::exit(1);
        }
    };

    let mut network = Network::new(2, 2, 8);
    network.set_activation(ActivationFunction::Tanh);
    network.set_learning_rate(0.05);
    network.set_train_test_data(generate(300, distribution), generate(60, distribution));

    for _ in 0..EPOCHS {
        network.train_epoch(32);
    }
    println!(
        "trained {} epochs on {}; final train loss {:.4}",
        EPOCHS,
        distribution.name(),
        network.training_loss.last().copied().unwrap_or(f64::NAN)
    );

    let mut img = RgbImage::from_fn(GRID_SIZE, GRID_SIZE, |px, py| {
        let x = px as f64 / (GRID_SIZE - 1) as f64 * 2.0 * DOMAIN - DOMAIN;
        let y = DOMAIN - py as f64 / (GRID_SIZE - 1) as f64 * 2.0 * DOMAIN;
        class_color(network.predict(&[x, y]))
    });

    overlay_points(&mut img, &network);

    match img.save(&output) {
        Ok(()) => println!("wrote {output}"),
        Err(err) => {
            eprintln!("could not write {output}: {err}");
            std::process::exit(1);
        }
    }
}

/// Maps a sigmoid output to a class color, fading through white at the
/// decision boundary.
fn class_color(p: f64) -> Rgb<u8> {
    let t = p.clamp(0.0, 1.0);
    let base = if t < 0.5 { CLASS0 } else { CLASS1 };
    // 1 at the boundary, 0 at full confidence.
    let fade = 1.0 - (2.0 * t - 1.0).abs();
    let channel = |c: f64| (c + (255.0 - c) * fade).round() as u8;
    Rgb([channel(base[0]), channel(base[1]), channel(base[2])])
}

/// Draws each training point as a 3×3 dot in its class color.
fn overlay_points(img: &mut RgbImage, network: &Network) {
    let data = &network.train_data;
    for (point, &label) in data.points.iter().zip(data.labels.iter()) {
        let px = ((point[0] + DOMAIN) / (2.0 * DOMAIN) * (GRID_SIZE - 1) as f64).round() as i64;
        let py = ((DOMAIN - point[1]) / (2.0 * DOMAIN) * (GRID_SIZE - 1) as f64).round() as i64;
        let color = if label > 0.5 { DOT1 } else { DOT0 };
        for dy in -1..=1_i64 {
            for dx in -1..=1_i64 {
                let (qx, qy) = (px + dx, py + dy);
                if qx >= 0 && qy >= 0 && (qx as u32) < GRID_SIZE && (qy as u32) < GRID_SIZE {
                    img.put_pixel(qx as u32, qy as u32, color);
                }
            }
        }
    }
}
