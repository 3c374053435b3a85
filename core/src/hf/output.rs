use nalgebra::DMatrix;
use serde::Serialize;

use crate::atom::Atom;

/// How the SCF loop ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize)]
pub enum Termination {
    Converged,
    /// The iteration budget ran out. The output still holds the last iteration.
    ExhaustedBudget,
}

/// The output of a restricted hartree fock calculation. Field names in serialized form follow
/// the usual shorthand (`S_matrix`, `H_core`, ...).
#[derive(Clone, Debug, Serialize)]
#[non_exhaustive]
pub struct HartreeFockOutput {
    pub converged: bool,
    pub termination: Termination,
    /// Number of iterations run, counting from one
    pub iterations: usize,
    /// Total energy (electronic + nuclear repulsion) of the last iteration
    pub final_energy: f64,
    pub electronic_energy: f64,
    /// Total energy after every iteration, the last entry equals `final_energy`
    pub energy_history: Vec<f64>,
    /// the orbital energies of the last fock matrix, sorted in ascending order
    pub orbital_energies: Vec<f64>,
    /// eigenvalues of the core hamiltonian, i.e. the orbital energies of the initial guess
    pub core_orbital_energies: Vec<f64>,
    /// molecular orbital coefficients, one orbital per column
    pub coefficients: DMatrix<f64>,
    pub density: DMatrix<f64>,
    #[serde(rename = "S_matrix")]
    pub overlap: DMatrix<f64>,
    #[serde(rename = "T_matrix")]
    pub kinetic: DMatrix<f64>,
    #[serde(rename = "V_nuc_matrix")]
    pub nuclear: DMatrix<f64>,
    #[serde(rename = "H_core")]
    pub core_hamiltonian: DMatrix<f64>,
    #[serde(rename = "F_matrix")]
    pub fock: DMatrix<f64>,
    pub n_basis: usize,
    pub basis_set: String,
    /// Internuclear distance in bohr, if the molecule is diatomic
    pub bond_length: Option<f64>,
    #[serde(rename = "E_nuc_repulsion")]
    pub nuclear_repulsion: f64,
    pub atoms: Vec<Atom>,
}

impl HartreeFockOutput {
    pub fn total_energy(&self) -> f64 {
        self.electronic_energy + self.nuclear_repulsion
    }

    /// Energy difference between the lowest unoccupied and highest occupied orbital.
    pub fn homo_lumo_gap(&self) -> Option<f64> {
        let n_occupied = self.atoms.iter().map(|a| a.nuclear_charge() as usize).sum::<usize>() / 2;
        let homo = self.orbital_energies.get(n_occupied.checked_sub(1)?)?;
        let lumo = self.orbital_energies.get(n_occupied)?;
        Some(lumo - homo)
    }
}
