//! Engines command implementation.

use anyhow::Result;
use console::style;

use qeclab_adapter_sim::{DEFAULT_ENGINE, default_registry};
use qeclab_hal::BackendConfig;

/// Execute the engines command.
pub fn execute() -> Result<()> {
    println!("{} Available engines:\n", style("QEC Lab").cyan().bold());

    let registry = default_registry();
    for name in registry.names() {
        let engine = registry.create(&name, BackendConfig::new(&name))?;
        let caps = engine.capabilities();

        println!(
            "  {} {} {}",
            style("●").green(),
            style(&name).bold(),
            if name == DEFAULT_ENGINE { "(default)" } else { "" }
        );
        println!("    Qubits: {}", caps.num_qubits);
        println!("    Max shots: {}", caps.max_shots);
        println!(
            "    Gates: {}, {}",
            caps.gate_set.single_qubit.join(", "),
            caps.gate_set.two_qubit.join(", ")
        );
        println!("    Features: {}", caps.features.join(", "));
        println!();
    }

    Ok(())
}
