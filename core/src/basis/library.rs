//! A few small basis sets compiled in, so calculations on hydrogen and helium do not need
//! basis set files. Data from the basis set exchange.
use std::collections::HashMap;

use crate::periodic_table::ElementType;

use super::{AtomicBasis, BasisSet, ContractedGaussian};

const STO_3G_COEFFICIENTS: [f64; 3] = [0.1543289673, 0.5353281423, 0.4446345422];

/// STO-3G: one contracted function of three primitives per atom.
pub fn sto_3g() -> BasisSet {
    let atomic = |exponents: &[f64]| {
        AtomicBasis::new(vec![contraction(exponents, &STO_3G_COEFFICIENTS)])
    };

    BasisSet::new(
        "STO-3G",
        HashMap::from([
            (
                ElementType::H,
                atomic(&[3.425250914, 0.6239137298, 0.1688554040]),
            ),
            (
                ElementType::He,
                atomic(&[6.362421394, 1.158922999, 0.3136497915]),
            ),
        ]),
    )
}

/// 6-31G for hydrogen: a three primitive inner and a single primitive outer function.
pub fn six_31g() -> BasisSet {
    BasisSet::new(
        "6-31G",
        HashMap::from([(
            ElementType::H,
            AtomicBasis::new(vec![
                contraction(
                    &[18.73113696, 2.825394365, 0.6401216923],
                    &[0.03349460434, 0.2347269535, 0.8137573261],
                ),
                contraction(&[0.1612777588], &[1.0]),
            ]),
        )]),
    )
}

/// Looks up a compiled in basis set by its (case insensitive) name.
pub fn by_name(name: &str) -> Option<BasisSet> {
    match name.to_ascii_uppercase().as_str() {
        "STO-3G" => Some(sto_3g()),
        "6-31G" => Some(six_31g()),
        _ => None,
    }
}

fn contraction(exponents: &[f64], coefficients: &[f64]) -> ContractedGaussian {
    // the tables above are well formed
    match ContractedGaussian::new(exponents, coefficients) {
        Ok(contraction) => contraction,
        Err(err) => unreachable!("invalid built-in basis data: {err}"),
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::molecule::Molecule;

    #[test]
    fn built_in_contractions_are_nearly_normalized() {
        for basis_set in [sto_3g(), six_31g()] {
            let basis = basis_set.basis_for(&Molecule::hydrogen(1.4)).unwrap();
            for function in &basis {
                assert_relative_eq!(function.contraction().self_overlap(), 1.0, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn basis_is_ordered_by_atom() {
        let basis = six_31g().basis_for(&Molecule::hydrogen(1.4)).unwrap();

        assert_eq!(basis.len(), 4);
        assert_eq!(basis[0].center().z, 0.0);
        assert_eq!(basis[1].center().z, 0.0);
        assert_eq!(basis[2].center().z, 1.4);
        assert_eq!(basis[1].exponents().count(), 1);
    }

    #[test]
    fn lookup_by_name() {
        assert_eq!(by_name("sto-3g").unwrap().name(), "STO-3G");
        assert!(by_name("cc-pVTZ").is_none());
    }

    #[test]
    fn missing_elements_are_reported() {
        let helium = Molecule::diatomic(ElementType::He, 2.0);
        assert!(six_31g().basis_for(&helium).is_err());
    }
}
