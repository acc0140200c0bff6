//! Version command implementation.

use console::style;

use qeclab_adapter_sim::default_registry;
use qeclab_codes::CodeKind;
use qeclab_noise::NoiseRegistry;

/// `(label, comma-separated names)` for everything this build can run.
fn inventory() -> Vec<(&'static str, String)> {
    let codes: Vec<&str> = CodeKind::ALL.iter().map(|k| k.name()).collect();
    vec![
        ("Codes", codes.join(", ")),
        ("Noise", NoiseRegistry::with_defaults().names().join(", ")),
        ("Engines", default_registry().names().join(", ")),
    ]
}

/// Execute the version command.
pub fn execute() {
    println!(
        "{} {} - {}",
        style(env!("CARGO_PKG_NAME")).cyan().bold(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).yellow(),
        env!("CARGO_PKG_DESCRIPTION")
    );
    println!();
    for (label, names) in inventory() {
        println!("{:<10} {names}", format!("{label}:"));
    }
    println!("{:<10} {}", "License:", style(env!("CARGO_PKG_LICENSE")).dim());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inventory_tracks_registries() {
        let inventory = inventory();
        assert_eq!(inventory.len(), 3);
        assert_eq!(inventory[0].1.split(", ").count(), CodeKind::ALL.len());
        assert!(inventory[1].1.contains("amplitude_damping"));
        assert_eq!(inventory[2].1, "stabilizer, statevector");
    }
}
