//! Assembly of the integral matrices that stay fixed during the SCF iterations.
use std::time::Instant;

use nalgebra::DMatrix;

use crate::{
    atom::Atom,
    basis::BasisFunction,
    integrals::{ElectronTensor, Integrator},
};

use super::utils;

/// The one- and two-electron integrals over a basis. Computed once, then only read.
#[derive(Clone, Debug)]
pub struct IntegralMatrices {
    pub overlap: DMatrix<f64>,
    pub kinetic: DMatrix<f64>,
    pub nuclear: DMatrix<f64>,
    pub electron: ElectronTensor,
}

impl IntegralMatrices {
    pub fn assemble(
        basis: &[BasisFunction],
        nuclei: &[Atom],
        integrator: &impl Integrator<Function = BasisFunction>,
    ) -> Self {
        let (overlap, kinetic) = compute_overlap_and_kinetic_matrices(basis, integrator);
        log::debug!("overlap matrix: {overlap:0.4}");
        log::debug!("kinetic matrix: {kinetic:0.4}");

        let nuclear = compute_nuclear_matrix(basis, nuclei, integrator);
        log::debug!("nuclear matrix: {nuclear:0.4}");

        let start = Instant::now();
        let electron = ElectronTensor::from_basis(basis, integrator);
        log::debug!(
            "computed {} electron repulsion integrals in {:0.3?}",
            basis.len().pow(4),
            start.elapsed()
        );

        Self {
            overlap,
            kinetic,
            nuclear,
            electron,
        }
    }

    pub fn n_basis(&self) -> usize {
        self.overlap.nrows()
    }

    /// `H_core = T + V`
    pub fn core_hamiltonian(&self) -> DMatrix<f64> {
        &self.kinetic + &self.nuclear
    }
}

/// Overlap and kinetic energy matrices in one pass over the primitives.
pub fn compute_overlap_and_kinetic_matrices(
    basis: &[BasisFunction],
    integrator: &impl Integrator<Function = BasisFunction>,
) -> (DMatrix<f64>, DMatrix<f64>) {
    let n_basis = basis.len();
    let mut overlap = DMatrix::zeros(n_basis, n_basis);
    let mut kinetic = DMatrix::zeros(n_basis, n_basis);

    for i in 0..n_basis {
        for j in i..n_basis {
            let (overlap_ij, kinetic_ij) = integrator.overlap_kinetic((&basis[i], &basis[j]));
            log::trace!("overlap ({i}{j}) = {overlap_ij}, kinetic ({i}{j}) = {kinetic_ij}");

            overlap[(i, j)] = overlap_ij;
            overlap[(j, i)] = overlap_ij;
            kinetic[(i, j)] = kinetic_ij;
            kinetic[(j, i)] = kinetic_ij;
        }
    }

    (overlap, kinetic)
}

pub fn compute_nuclear_matrix(
    basis: &[BasisFunction],
    nuclei: &[Atom],
    integrator: &impl Integrator<Function = BasisFunction>,
) -> DMatrix<f64> {
    utils::symmetric_matrix(basis.len(), |i, j| {
        let nuclear_ij = integrator.nuclear((&basis[i], &basis[j]), nuclei);
        log::trace!("nuclear ({i}{j}) = {nuclear_ij}");
        nuclear_ij
    })
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{basis::library, integrals::SGaussianIntegrator, molecule::Molecule};

    use super::IntegralMatrices;

    #[test]
    fn matrices_are_symmetric() {
        let molecule = Molecule::hydrogen(1.4);
        let basis = library::six_31g().basis_for(&molecule).unwrap();
        let matrices = IntegralMatrices::assemble(&basis, molecule.atoms(), &SGaussianIntegrator);

        assert_eq!(matrices.n_basis(), 4);
        for m in [&matrices.overlap, &matrices.kinetic, &matrices.nuclear] {
            assert_relative_eq!(m.clone(), m.transpose(), epsilon = 1e-14);
        }
        for i in 0..4 {
            assert_relative_eq!(matrices.overlap[(i, i)], 1.0, epsilon = 1e-3);
            assert!(matrices.kinetic[(i, i)] > 0.0);
            assert!(matrices.nuclear[(i, i)] < 0.0);
        }
    }

    #[test]
    fn core_hamiltonian_of_h2() {
        let molecule = Molecule::hydrogen(1.4);
        let basis = library::sto_3g().basis_for(&molecule).unwrap();
        let matrices = IntegralMatrices::assemble(&basis, molecule.atoms(), &SGaussianIntegrator);
        let core = matrices.core_hamiltonian();

        assert_relative_eq!(core[(0, 0)], -1.1204, epsilon = 2e-4);
        assert_relative_eq!(core[(1, 1)], -1.1204, epsilon = 2e-4);
        assert_relative_eq!(core[(0, 1)], -0.9584, epsilon = 2e-4);
    }
}
