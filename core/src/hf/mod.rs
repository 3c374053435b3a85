pub mod fock;
pub mod matrices;
pub mod observer;
mod output;
pub mod rhf;
pub(super) mod utils;

use serde::Deserialize;

pub use observer::{IterationRecorder, IterationReport, LogObserver, ScfObserver};
pub use output::{HartreeFockOutput, Termination};
pub use rhf::{restricted_hartree_fock, restricted_hartree_fock_with};
pub use utils::OVERLAP_EIGENVALUE_FLOOR;

use crate::{basis::BasisFunction, error::HartreeFockError, molecule::Molecule};

/// Settings of the SCF loop.
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct HartreeFockConfig {
    /// the maximum number of iterations to try
    pub max_iterations: usize,
    /// if the total energy changes by less than this between two iterations, the system is
    /// considered converged.
    pub epsilon: f64,
    /// emit a log line per iteration. Never changes the result.
    pub verbose: bool,
}

impl Default for HartreeFockConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            epsilon: 1e-6,
            verbose: true,
        }
    }
}

impl HartreeFockConfig {
    pub(crate) fn validate(&self) -> Result<(), HartreeFockError> {
        if self.max_iterations == 0 {
            return Err(HartreeFockError::InvalidConfig(
                "max_iterations must be at least one",
            ));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(HartreeFockError::InvalidConfig(
                "epsilon must be a positive number",
            ));
        }
        Ok(())
    }
}

/// The input to a hartree fock calculation
#[derive(Clone, Debug)]
pub struct HartreeFockInput<'a> {
    /// the molecule to run hartree fock for
    pub molecule: &'a Molecule,
    /// the basis functions, already placed on their atoms
    pub basis: &'a [BasisFunction],
    /// name of the basis set, only reported back
    pub basis_set_name: &'a str,
    pub config: HartreeFockConfig,
}

impl HartreeFockInput<'_> {
    /// Returns the number of total electrons in the system
    pub fn n_electrons(&self) -> usize {
        self.molecule.n_electrons()
    }

    /// Number of doubly occupied orbitals. Fails for an odd number of electrons.
    pub fn n_occupied(&self) -> Result<usize, HartreeFockError> {
        let n_electrons = self.n_electrons();
        if n_electrons % 2 != 0 {
            return Err(HartreeFockError::OddElectronCount { n_electrons });
        }
        Ok(n_electrons / 2)
    }
}
