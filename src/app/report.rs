use tracing::info;
use trotter_error::{ErrorExpansion, Hamiltonian, TrotterSeries};

pub fn report_hamiltonian(hamiltonian: &Hamiltonian) {
    let stats = hamiltonian.stats();
    info!("Hamiltonian loaded:");
    info!("  One-body integrals: {}", stats.one_body);
    info!("  Two-body integrals: {}", stats.two_body);
    info!("  Skipped lines:      {}", stats.skipped);
    info!("  Number of orbitals: {}", hamiltonian.num_orbitals());
    info!(
        "  Distinct terms after removing conjugates: {}",
        hamiltonian.terms().len()
    );
}

pub fn report_series(series: &TrotterSeries) {
    info!("Order of terms in Trotter series:");
    for entry in series.entries() {
        info!("Term: {}  Coeff: {:.6}", entry.terms[0], entry.coefficient);
    }
}

pub fn report_expansion(expansion: &ErrorExpansion) {
    let stats = expansion.stats;
    info!("\n===========================================");
    info!("        Trotter Error Summary");
    info!("===========================================");
    info!("Commutator positions visited: {}", stats.position_triples);
    info!("Operator triples expanded:    {}", stats.expanded);
    info!("Operator triples pruned:      {}", stats.pruned);
    info!("Error terms:                  {}", expansion.terms.len());
    info!("===========================================\n");
}
