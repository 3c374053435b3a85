use nalgebra::Vector3;
use serde::Deserialize;

use crate::{
    atom::Atom,
    error::ConfigError,
    molecule::{Molecule, ANGSTROM_TO_BOHR},
    periodic_table::ElementType,
};

/// Represents a full molecule in a config file.
/// A molecule is just a list of positioned atoms, positions in bohr.
#[derive(Clone, Debug, Deserialize)]
pub struct ConfigMolecule(Vec<ConfigAtom>);

#[derive(Clone, Debug, Deserialize)]
struct ConfigAtom {
    element: ElementType,
    position: Vec<f64>,
}

impl TryFrom<ConfigMolecule> for Molecule {
    type Error = ConfigError;

    fn try_from(value: ConfigMolecule) -> Result<Self, Self::Error> {
        let ConfigMolecule(config_atoms) = value;

        let mut atoms = Vec::with_capacity(config_atoms.len());

        for (index, atom) in config_atoms.into_iter().enumerate() {
            let &[x, y, z] = atom.position.as_slice() else {
                return Err(ConfigError::MalformedCoordinates {
                    index,
                    found: atom.position.len(),
                });
            };

            atoms.push(Atom::new(atom.element, Vector3::new(x, y, z)));
        }

        Ok(Molecule::new(atoms))
    }
}

/// Reads an xyz file: atom count, a comment line, then one `symbol x y z` line per atom.
/// Coordinates are in angstrom and get converted to bohr.
pub fn parse_xyz(contents: &str) -> Result<Molecule, ConfigError> {
    let mut lines = contents.lines().enumerate();

    let (_, count) = lines.next().ok_or(ConfigError::MalformedXyz {
        line: 1,
        reason: "missing atom count",
    })?;
    let n_atoms: usize = count.trim().parse().map_err(|_| ConfigError::MalformedXyz {
        line: 1,
        reason: "atom count is not a number",
    })?;

    // comment
    lines.next();

    let mut atoms = Vec::with_capacity(n_atoms);
    for (index, line) in lines.filter(|(_, l)| !l.trim().is_empty()) {
        let line_number = index + 1;
        let mut fields = line.split_whitespace();

        let element: ElementType = fields
            .next()
            .ok_or(ConfigError::MalformedXyz {
                line: line_number,
                reason: "missing element",
            })?
            .parse()?;

        let coordinates = fields
            .map(|f| f.parse::<f64>().map_err(|_| ConfigError::InvalidNumber(f.to_owned())))
            .collect::<Result<Vec<_>, _>>()?;
        let &[x, y, z] = coordinates.as_slice() else {
            return Err(ConfigError::MalformedXyz {
                line: line_number,
                reason: "expected three coordinates",
            });
        };

        atoms.push(Atom::new(
            element,
            Vector3::new(x, y, z) * ANGSTROM_TO_BOHR,
        ));
    }

    if atoms.len() != n_atoms {
        return Err(ConfigError::MalformedXyz {
            line: 1,
            reason: "atom count does not match the number of atoms",
        });
    }

    Ok(Molecule::new(atoms))
}
