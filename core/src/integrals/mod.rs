use crate::atom::Atom;

pub mod contracted;
pub mod electron_tensor;
pub mod primitive;

pub use contracted::SGaussianIntegrator;
pub use electron_tensor::ElectronTensor;

pub type DefaultIntegrator = SGaussianIntegrator;

/// Evaluates the one- and two-electron integrals over contracted basis functions.
pub trait Integrator: Sync {
    type Function;

    /// Calculate the overlap integral between two basis functions.
    fn overlap(&self, functions: (&Self::Function, &Self::Function)) -> f64;

    /// Calculate the kinetic energy integral between two basis functions.
    fn kinetic(&self, functions: (&Self::Function, &Self::Function)) -> f64;

    /// Overlap and kinetic energy integral at once. Implementations that can share work
    /// between the two should override this.
    fn overlap_kinetic(&self, functions: (&Self::Function, &Self::Function)) -> (f64, f64) {
        (self.overlap(functions), self.kinetic(functions))
    }

    /// Calculate the nuclear attraction integral between two basis functions and the nuclei of a quantum system.
    fn nuclear(&self, functions: (&Self::Function, &Self::Function), nuclei: &[Atom]) -> f64;

    /// Calculate the electron-electron repulsion integral between four basis functions.
    fn electron_repulsion(
        &self,
        functions: (
            &Self::Function,
            &Self::Function,
            &Self::Function,
            &Self::Function,
        ),
    ) -> f64;
}
