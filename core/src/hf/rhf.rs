use nalgebra::{DMatrix, DVector};

use crate::{
    basis::BasisFunction,
    error::HartreeFockError,
    integrals::{DefaultIntegrator, Integrator},
};

use super::{
    fock, matrices::IntegralMatrices, utils, HartreeFockInput, HartreeFockOutput,
    IterationReport, ScfObserver, Termination,
};

/// Runs a restricted closed shell hartree fock calculation with the default integrator.
///
/// The loop starts from a zero density matrix (core hamiltonian guess) and stops as soon as
/// the total energy changes by less than `config.epsilon`. Running out of iterations is not
/// an error: the output of the last iteration is returned with `converged == false`.
///
/// # Errors
///
/// Fails before any integral is computed if the electron count is odd, the basis is empty
/// or too small to hold the occupied orbitals, two nuclei coincide, or the configuration is
/// invalid.
pub fn restricted_hartree_fock(
    input: &HartreeFockInput,
    observer: Option<&mut dyn ScfObserver>,
) -> Result<HartreeFockOutput, HartreeFockError> {
    restricted_hartree_fock_with(input, &DefaultIntegrator::default(), observer)
}

/// Same as [`restricted_hartree_fock`], with an exchangeable integrator.
pub fn restricted_hartree_fock_with(
    input: &HartreeFockInput,
    integrator: &impl Integrator<Function = BasisFunction>,
    mut observer: Option<&mut dyn ScfObserver>,
) -> Result<HartreeFockOutput, HartreeFockError> {
    let config = input.config;
    config.validate()?;

    let n_basis = input.basis.len();
    if n_basis == 0 {
        return Err(HartreeFockError::EmptyBasis);
    }
    let n_occupied = input.n_occupied()?;
    if n_occupied > n_basis {
        return Err(HartreeFockError::InsufficientBasis {
            n_occupied,
            n_basis,
        });
    }
    if let Some((first, second)) = input.molecule.coincident_nuclei() {
        return Err(HartreeFockError::CoincidentNuclei { first, second });
    }

    let nuclear_repulsion = input.molecule.nuclear_repulsion();
    log::debug!("nuclear repulsion energy: {nuclear_repulsion}");

    let matrices = IntegralMatrices::assemble(input.basis, input.molecule.atoms(), integrator);
    if let Some(observer) = observer.as_deref_mut() {
        observer.integrals_ready(&matrices);
    }

    let core_hamiltonian = matrices.core_hamiltonian();
    // S does not change during the iterations, so X is computed once
    let transform = utils::symmetric_orthogonalizer(&matrices.overlap);

    let (_, core_orbital_energies) =
        utils::sorted_eigs(transform.transpose() * &core_hamiltonian * &transform);
    log::debug!("core hamiltonian orbital energies: {core_orbital_energies:0.6}");

    let mut density = DMatrix::zeros(n_basis, n_basis);
    let mut previous_energy = 0.0;
    let mut energy_history = Vec::with_capacity(config.max_iterations);
    let mut iterations = 0;

    // start of scf iteration
    let (termination, step) = loop {
        iterations += 1;
        let step = scf_step(&matrices, &core_hamiltonian, &transform, &density, n_occupied);
        let total_energy = step.electronic_energy + nuclear_repulsion;
        let energy_change = (total_energy - previous_energy).abs();
        energy_history.push(total_energy);

        if config.verbose {
            log::info!(
                "iteration {iterations:<4} - total energy {total_energy:1.6}. energy change {energy_change:1.2e}",
            );
        }
        if let Some(observer) = observer.as_deref_mut() {
            observer.iteration(&IterationReport {
                iteration: iterations,
                total_energy,
                energy_change,
                orbital_energies: step.orbital_energies.as_slice().to_vec(),
            });
        }

        if energy_change < config.epsilon {
            break (Termination::Converged, step);
        }
        // validate() guarantees max_iterations >= 1
        if iterations >= config.max_iterations {
            break (Termination::ExhaustedBudget, step);
        }
        previous_energy = total_energy;
        density = step.density;
    };

    if termination == Termination::ExhaustedBudget {
        log::warn!("SCF did not converge within {iterations} iterations");
    }

    let output = HartreeFockOutput {
        converged: termination == Termination::Converged,
        termination,
        iterations,
        final_energy: step.electronic_energy + nuclear_repulsion,
        electronic_energy: step.electronic_energy,
        energy_history,
        orbital_energies: step.orbital_energies.as_slice().to_vec(),
        core_orbital_energies: core_orbital_energies.as_slice().to_vec(),
        coefficients: step.coefficients,
        density: step.density,
        overlap: matrices.overlap,
        kinetic: matrices.kinetic,
        nuclear: matrices.nuclear,
        core_hamiltonian,
        fock: step.fock,
        n_basis,
        basis_set: input.basis_set_name.to_owned(),
        bond_length: input.molecule.bond_length(),
        nuclear_repulsion,
        atoms: input.molecule.atoms().to_vec(),
    };

    if let Some(observer) = observer {
        observer.finished(&output);
    }

    Ok(output)
}

/// Everything one iteration produces from the density of the previous one.
struct ScfStep {
    fock: DMatrix<f64>,
    orbital_energies: DVector<f64>,
    coefficients: DMatrix<f64>,
    density: DMatrix<f64>,
    electronic_energy: f64,
}

fn scf_step(
    matrices: &IntegralMatrices,
    core_hamiltonian: &DMatrix<f64>,
    transform: &DMatrix<f64>,
    density: &DMatrix<f64>,
    n_occupied: usize,
) -> ScfStep {
    let fock = fock::fock_matrix(
        &matrices.kinetic,
        &matrices.nuclear,
        density,
        &matrices.electron,
    );
    log::trace!("fock matrix: {fock:0.6}");

    let transformed_fock = transform.transpose() * (&fock * transform);
    let (transformed_coefficients, orbital_energies) = utils::sorted_eigs(transformed_fock);
    let coefficients = transform * &transformed_coefficients;

    let new_density = compute_updated_density(&coefficients, n_occupied);
    log::trace!("density matrix: {new_density:0.6}");

    let electronic_energy = 0.5 * (&new_density * (core_hamiltonian + &fock)).trace();

    ScfStep {
        fock,
        orbital_energies,
        coefficients,
        density: new_density,
        electronic_energy,
    }
}

/// `D = 2 C_occ C_occ^T`
fn compute_updated_density(coefficients: &DMatrix<f64>, n_occupied: usize) -> DMatrix<f64> {
    utils::symmetric_matrix(coefficients.nrows(), |i, j| {
        let mut sum = 0.0;
        for k in 0..n_occupied {
            sum += coefficients[(i, k)] * coefficients[(j, k)]
        }
        2.0 * sum
    })
}
