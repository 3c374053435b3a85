use std::collections::HashMap;

use crate::{atom::Atom, error::BasisError, molecule::Molecule, periodic_table::ElementType};

use super::{BasisFunction, ContractedGaussian};

#[derive(Debug, Clone)]
pub struct BasisSet {
    name: String,
    atomic_mapping: HashMap<ElementType, AtomicBasis>,
}

impl BasisSet {
    /// Create a new basis set given mappings from element type to the basis of that element
    pub fn new(name: impl Into<String>, atomic_mapping: HashMap<ElementType, AtomicBasis>) -> Self {
        Self {
            name: name.into(),
            atomic_mapping,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the basis of a given atom, if it exists.
    pub fn for_atom(&self, atom: &Atom) -> Option<&AtomicBasis> {
        self.atomic_mapping.get(&atom.element_type)
    }

    /// Places the atomic basis of every atom on its nucleus. Functions are ordered by atom,
    /// then by the order of the atomic basis.
    pub fn basis_for(&self, molecule: &Molecule) -> Result<Vec<BasisFunction>, BasisError> {
        let mut basis = Vec::new();
        for atom in molecule.atoms() {
            let atomic_basis = self
                .for_atom(atom)
                .ok_or(BasisError::MissingElement(atom.element_type))?;
            basis.extend(atomic_basis.basis_for(atom));
        }
        Ok(basis)
    }

    /// Returns a copy where every contraction has unit norm.
    pub fn normalized(&self) -> Self {
        Self {
            name: self.name.clone(),
            atomic_mapping: self
                .atomic_mapping
                .iter()
                .map(|(&element, basis)| (element, basis.normalized()))
                .collect(),
        }
    }
}

/// Represents the basis functions for a single atom.
#[derive(Debug, Clone, Default)]
pub struct AtomicBasis {
    pub(crate) basis_functions: Vec<ContractedGaussian>,
}

impl AtomicBasis {
    pub fn new(basis_functions: Vec<ContractedGaussian>) -> Self {
        Self { basis_functions }
    }

    pub fn basis_functions(&self) -> impl Iterator<Item = &ContractedGaussian> {
        self.basis_functions.iter()
    }

    pub fn basis_for<'a>(&'a self, atom: &'a Atom) -> impl Iterator<Item = BasisFunction> + 'a {
        self.basis_functions
            .iter()
            .map(move |contraction| BasisFunction::from_contraction(atom.position, contraction.clone()))
    }

    fn normalized(&self) -> Self {
        Self {
            basis_functions: self
                .basis_functions()
                .map(ContractedGaussian::normalized)
                .collect(),
        }
    }
}
