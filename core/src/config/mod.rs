//! Typed forms of the input files: basis set exchange json basis sets and molecule
//! descriptions. Only converts already-read data, file access is left to the caller.
mod basis_set;
mod molecule;

pub use basis_set::ConfigBasisSet;
pub use molecule::{parse_xyz, ConfigMolecule};
