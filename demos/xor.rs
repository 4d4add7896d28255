use plastic_nn::{generate, ActivationFunction, Distribution, Network};

fn main() {
    let mut network = Network::new(2, 2, 8);
    network.set_activation(ActivationFunction::Tanh);
    network.set_learning_rate(0.1);

    network.set_train_test_data(
        generate(200, Distribution::Xor),
        generate(40, Distribution::Xor),
    );

    let epochs = 300;
    for epoch in 0..epochs {
        let stats = network.train_epoch(32);
        if epoch % 25 == 0 || epoch == epochs - 1 {
            println!(
                "Epoch {:>3}: train loss = {:.6}  test loss = {:.6}",
                stats.epoch, stats.train_loss, stats.test_loss
            );
        }
    }

    println!();
    for (point, class) in [
        ([4.0, 4.0], 0),
        ([-4.0, 4.0], 1),
        ([4.0, -4.0], 1),
        ([-4.0, -4.0], 0),
    ] {
        let output = network.predict(&point);
        println!(
            "Input: {:?} -> output {:.4} (expected class {})",
            point, output, class
        );
    }
}
