use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::{atom::Atom, periodic_table::ElementType};

/// Conversion factor from ångström to bohr.
pub const ANGSTROM_TO_BOHR: f64 = 1.88973;

/// Nuclei closer than this (in bohr) are treated as sitting on top of each other.
pub const COINCIDENCE_THRESHOLD: f64 = 1e-8;

/// Represents a molecule
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub(crate) atoms: Vec<Atom>,
}

impl Molecule {
    pub fn new(atoms: Vec<Atom>) -> Self {
        Self { atoms }
    }

    /// Two atoms of the same element, the first at the origin and the second on the z axis.
    pub fn diatomic(element_type: ElementType, bond_length: f64) -> Self {
        Self::new(vec![
            Atom::new(element_type, Vector3::zeros()),
            Atom::new(element_type, Vector3::new(0.0, 0.0, bond_length)),
        ])
    }

    /// The hydrogen molecule with the given bond length in bohr.
    pub fn hydrogen(bond_length: f64) -> Self {
        Self::diatomic(ElementType::H, bond_length)
    }

    pub fn atoms(&self) -> &[Atom] {
        &self.atoms
    }

    /// Returns the same molecule with every coordinate multiplied by `factor`.
    pub fn scaled(mut self, factor: f64) -> Self {
        for atom in &mut self.atoms {
            atom.position *= factor;
        }
        self
    }

    /// Number of electrons of the neutral molecule
    pub fn n_electrons(&self) -> usize {
        self.atoms
            .iter()
            .map(|atom| atom.nuclear_charge() as usize)
            .sum()
    }

    /// Coulomb repulsion between all pairs of nuclei, in hartree.
    pub fn nuclear_repulsion(&self) -> f64 {
        let n_atoms = self.atoms.len();

        let mut potential = 0.0;
        for atom_a in 0..n_atoms {
            for atom_b in atom_a + 1..n_atoms {
                let (a, b) = (&self.atoms[atom_a], &self.atoms[atom_b]);
                potential += (a.nuclear_charge() * b.nuclear_charge()) as f64
                    / (b.position() - a.position()).norm()
            }
        }
        potential
    }

    /// Indices of the first pair of nuclei closer than [`COINCIDENCE_THRESHOLD`], for which
    /// the nuclear repulsion is not finite.
    pub fn coincident_nuclei(&self) -> Option<(usize, usize)> {
        let n_atoms = self.atoms.len();
        (0..n_atoms)
            .flat_map(|a| (a + 1..n_atoms).map(move |b| (a, b)))
            .find(|&(a, b)| {
                (self.atoms[b].position() - self.atoms[a].position()).norm()
                    < COINCIDENCE_THRESHOLD
            })
    }

    /// Internuclear distance, only defined for diatomic molecules.
    pub fn bond_length(&self) -> Option<f64> {
        match self.atoms.as_slice() {
            [a, b] => Some((b.position - a.position).norm()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::{Molecule, ANGSTROM_TO_BOHR};

    #[test]
    fn hydrogen_molecule() {
        let molecule = Molecule::hydrogen(1.4);

        assert_eq!(molecule.n_electrons(), 2);
        assert_relative_eq!(molecule.bond_length().unwrap(), 1.4);
        assert_relative_eq!(molecule.nuclear_repulsion(), 1.0 / 1.4, epsilon = 1e-14);
    }

    #[test]
    fn scaling_converts_units() {
        let molecule = Molecule::hydrogen(0.7414).scaled(ANGSTROM_TO_BOHR);
        assert_relative_eq!(molecule.bond_length().unwrap(), 1.4010, epsilon = 1e-4);
    }

    #[test]
    fn single_atom_has_no_bond() {
        let mut molecule = Molecule::hydrogen(1.4);
        molecule.atoms.pop();

        assert_eq!(molecule.bond_length(), None);
        assert_eq!(molecule.nuclear_repulsion(), 0.0);
    }

    #[test]
    fn finds_coincident_nuclei() {
        assert_eq!(Molecule::hydrogen(1.4).coincident_nuclei(), None);
        assert_eq!(Molecule::hydrogen(0.0).coincident_nuclei(), Some((0, 1)));
    }
}
