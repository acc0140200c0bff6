//! Codes command implementation.

use console::style;

use qeclab_codes::CodeKind;

/// Execute the codes command.
pub fn execute() {
    println!("{} Available codes:\n", style("QEC Lab").cyan().bold());

    for kind in CodeKind::ALL {
        let code = kind.build();
        println!(
            "  {} {:<12} {}",
            style("●").green(),
            style(kind.name()).bold(),
            code.name()
        );
        println!(
            "    Physical qubits: {}   Measured bits: {}",
            code.num_physical(),
            code.num_clbits()
        );
    }
    println!();
}
