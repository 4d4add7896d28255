pub mod generate;

pub use generate::{generate, Dataset, Distribution};
