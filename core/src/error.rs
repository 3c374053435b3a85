use std::{error, fmt};

use crate::periodic_table::ElementType;

/// Reasons a calculation is rejected before (or instead of) running the SCF loop.
///
/// Running out of iterations is not an error; see
/// [`HartreeFockOutput::converged`](crate::hf::HartreeFockOutput).
#[derive(Debug, Clone, PartialEq)]
pub enum HartreeFockError {
    OddElectronCount { n_electrons: usize },
    EmptyBasis,
    InsufficientBasis { n_occupied: usize, n_basis: usize },
    /// Two nuclei share a position, so the nuclear repulsion diverges.
    CoincidentNuclei { first: usize, second: usize },
    InvalidConfig(&'static str),
    Basis(BasisError),
}

/// Problems with the contraction data of a basis function.
#[derive(Debug, Clone, PartialEq)]
pub enum BasisError {
    EmptyContraction,
    LengthMismatch {
        exponents: usize,
        coefficients: usize,
    },
    InvalidExponent(f64),
    MissingElement(ElementType),
}

/// Problems turning configuration data (basis set exchange json, molecule files) into
/// typed records.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    UnknownElement(String),
    UnsupportedAngularMomentum(i32),
    InvalidNumber(String),
    MalformedCoordinates { index: usize, found: usize },
    MalformedXyz { line: usize, reason: &'static str },
    Basis(BasisError),
}

impl fmt::Display for HartreeFockError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OddElectronCount { n_electrons } => write!(
                f,
                "odd electron count ({n_electrons}): restricted closed shell hartree fock needs \
                 every orbital doubly occupied"
            ),
            Self::EmptyBasis => write!(f, "the basis is empty"),
            Self::InsufficientBasis {
                n_occupied,
                n_basis,
            } => write!(
                f,
                "{n_basis} basis functions cannot hold {n_occupied} doubly occupied orbitals"
            ),
            Self::CoincidentNuclei { first, second } => {
                write!(f, "atoms {first} and {second} sit at the same position")
            }
            Self::InvalidConfig(reason) => write!(f, "invalid configuration: {reason}"),
            Self::Basis(e) => e.fmt(f),
        }
    }
}

impl fmt::Display for BasisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyContraction => write!(f, "a contracted gaussian needs at least one primitive"),
            Self::LengthMismatch {
                exponents,
                coefficients,
            } => write!(f, "{exponents} exponents but {coefficients} coefficients"),
            Self::InvalidExponent(exponent) => write!(
                f,
                "gaussian exponents must be positive and finite, got {exponent}"
            ),
            Self::MissingElement(element) => write!(f, "no basis functions for element {element}"),
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownElement(symbol) => write!(f, "unknown or unsupported element {symbol:?}"),
            Self::UnsupportedAngularMomentum(l) => write!(
                f,
                "only s-type shells are supported, found angular momentum {l}"
            ),
            Self::InvalidNumber(value) => write!(f, "could not parse {value:?} as a number"),
            Self::MalformedCoordinates { index, found } => write!(
                f,
                "atom {index} must have exactly three coordinates, got {found}"
            ),
            Self::MalformedXyz { line, reason } => {
                write!(f, "malformed xyz data on line {line}: {reason}")
            }
            Self::Basis(e) => e.fmt(f),
        }
    }
}

impl error::Error for HartreeFockError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Basis(e) => Some(e),
            _ => None,
        }
    }
}

impl error::Error for BasisError {}

impl error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Self::Basis(e) => Some(e),
            _ => None,
        }
    }
}

impl From<BasisError> for HartreeFockError {
    fn from(value: BasisError) -> Self {
        Self::Basis(value)
    }
}

impl From<BasisError> for ConfigError {
    fn from(value: BasisError) -> Self {
        Self::Basis(value)
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{BasisError, ConfigError, HartreeFockError};
    use crate::periodic_table::ElementType;

    #[test]
    fn messages_name_the_problem() {
        assert_eq!(
            HartreeFockError::OddElectronCount { n_electrons: 3 }.to_string(),
            "odd electron count (3): restricted closed shell hartree fock needs every orbital \
             doubly occupied"
        );
        assert_eq!(
            ConfigError::from(BasisError::MissingElement(ElementType::He)).to_string(),
            "no basis functions for element He"
        );
    }

    #[test]
    fn basis_errors_are_the_source() {
        let error = HartreeFockError::from(BasisError::EmptyContraction);
        assert!(error.source().is_some());
        assert!(HartreeFockError::EmptyBasis.source().is_none());
    }
}
