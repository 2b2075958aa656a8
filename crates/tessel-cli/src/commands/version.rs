//! Version command implementation.

use console::style;

/// Execute the version command.
pub fn execute() {
    let version = env!("CARGO_PKG_VERSION");

    println!(
        "{} {} - surface and toric code circuit generation",
        style("tessel").cyan().bold(),
        style(format!("v{version}")).yellow()
    );
    println!();
    println!("Components:");
    println!("  tessel-ir    Stabilizer program builder");
    println!("  tessel-stim  Stim circuit text emitter and parser");
    println!("  tessel-gen   Surface and toric code memory experiments");
    println!("  tessel-dem   Detector error models and graph-like distance");
    println!("  tessel-cli   Command-line interface");
    println!();
    println!("License:    {}", style("Apache-2.0").dim());
}
