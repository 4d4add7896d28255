// This binary crate is intentionally minimal.
// All engine logic lives in the library (src/lib.rs and its modules).
// Run demos with:
//   cargo run --example xor
fn main() {
    println!("plastic-nn: a from-scratch neural network playground for 2D toy datasets.");
    println!("Run `cargo run --example xor` to watch a network learn XOR,");
    println!("or `cargo run --example heatmap -- spiral` to render a decision boundary.");
}
