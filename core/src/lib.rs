//! Restricted closed shell hartree fock for small molecules in s-type gaussian basis sets.
//!
//! The numerical code (integrals, SCF loop) performs no I/O. Diagnostics go through the `log`
//! facade and an optional [`hf::ScfObserver`].
pub mod atom;
pub mod basis;
pub mod config;
pub mod error;
pub mod hf;
pub mod integrals;
pub mod molecule;
pub mod periodic_table;

pub use atom::Atom;
pub use error::{BasisError, ConfigError, HartreeFockError};
pub use molecule::Molecule;
