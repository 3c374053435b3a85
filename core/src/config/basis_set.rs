use std::collections::HashMap;

use serde::Deserialize;

use crate::{
    basis::{AtomicBasis, BasisSet, ContractedGaussian},
    error::ConfigError,
    periodic_table::ElementType,
};

/// A basis set in the json format of the basis set exchange.
#[derive(Clone, Debug, Deserialize)]
pub struct ConfigBasisSet {
    #[serde(default)]
    name: String,
    /// keyed by atomic number, parsed only when converting so that unknown elements can be
    /// skipped
    elements: HashMap<String, ConfigElectronicConfiguration>,
}

#[derive(Clone, Debug, Deserialize)]
struct ConfigElectronicConfiguration {
    electron_shells: Vec<ConfigElectronShell>,
}

#[derive(Clone, Debug, Deserialize)]
#[allow(unused)]
struct ConfigElectronShell {
    #[serde(default)]
    function_type: String,
    angular_momentum: Vec<i32>,
    exponents: Vec<String>,
    coefficients: Vec<Vec<String>>,
}

impl ConfigElectronShell {
    /// Angular momentum of every row of coefficients. A shell with a single angular momentum
    /// may carry several contractions (general contraction), one per row.
    fn row_angular_momentum(&self, row: usize) -> i32 {
        match self.angular_momentum.as_slice() {
            [single] => *single,
            many => many.get(row).copied().unwrap_or(-1),
        }
    }
}

impl ConfigBasisSet {
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Drops every contraction that is not s-type.
    pub fn s_shells_only(mut self) -> Self {
        for configuration in self.elements.values_mut() {
            configuration.electron_shells.retain_mut(|shell| {
                let keep = (0..shell.coefficients.len())
                    .map(|row| shell.row_angular_momentum(row) == 0)
                    .collect::<Vec<_>>();
                if keep.iter().any(|k| !k) {
                    log::warn!(
                        "dropping shell with angular momentum {:?}",
                        shell.angular_momentum
                    );
                }

                let mut rows = keep.iter();
                shell.coefficients.retain(|_| *rows.next().unwrap_or(&false));
                shell.angular_momentum = vec![0];
                !shell.coefficients.is_empty()
            });
        }
        self
    }
}

impl TryFrom<ConfigBasisSet> for BasisSet {
    type Error = ConfigError;

    fn try_from(value: ConfigBasisSet) -> Result<Self, Self::Error> {
        let mut atomic_mapping = HashMap::with_capacity(value.elements.len());

        for (key, configuration) in value.elements {
            let Ok(element) = key.parse::<ElementType>() else {
                log::warn!("skipping basis functions of unsupported element {key}");
                continue;
            };

            let mut basis_functions = Vec::new();

            for shell in &configuration.electron_shells {
                let exponents = parse_numbers(&shell.exponents)?;

                for (row, coefficients) in shell.coefficients.iter().enumerate() {
                    let angular_momentum = shell.row_angular_momentum(row);
                    if angular_momentum != 0 {
                        return Err(ConfigError::UnsupportedAngularMomentum(angular_momentum));
                    }

                    let coefficients = parse_numbers(coefficients)?;
                    basis_functions.push(ContractedGaussian::new(&exponents, &coefficients)?);
                }
            }

            atomic_mapping.insert(element, AtomicBasis::new(basis_functions));
        }

        Ok(BasisSet::new(value.name, atomic_mapping))
    }
}

fn parse_numbers(values: &[String]) -> Result<Vec<f64>, ConfigError> {
    values
        .iter()
        .map(|v| {
            v.trim()
                .parse::<f64>()
                .map_err(|_| ConfigError::InvalidNumber(v.clone()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::ConfigBasisSet;
    use crate::{
        basis::BasisSet,
        error::{BasisError, ConfigError},
        molecule::Molecule,
        periodic_table::ElementType,
    };

    const B_STO_3G: &str = r#"{"molssi_bse_schema":{"schema_type":"complete","schema_version":"0.1"},"revision_description":"DatafromGaussian09","revision_date":"2018-06-19","elements":{"1":{"electron_shells":[{"function_type":"gto","region":"","angular_momentum":[0],"exponents":["0.3425250914E+01","0.6239137298E+00","0.1688554040E+00"],"coefficients":[["0.1543289673E+00","0.5353281423E+00","0.4446345422E+00"]]}],"references":[{"reference_description":"STO-3GMinimalBasis(3functions/AO)","reference_keys":["hehre1969a"]}]}},"version":"1","function_types":["gto"],"names":["STO-3G"],"tags":[],"family":"sto","description":"STO-3GMinimalBasis(3functions/AO)","role":"orbital","auxiliaries":{},"name":"STO-3G"}"#;

    // hydrogen part of cc-pVDZ: two s contractions and one p shell
    const B_CC_PVDZ: &str = r#"{"elements":{"1":{"electron_shells":[{"function_type":"gto","region":"","angular_momentum":[0],"exponents":["1.301000E+01","1.962000E+00","4.446000E-01","1.220000E-01"],"coefficients":[["1.968500E-02","1.379770E-01","4.781480E-01","5.012400E-01"],["0.0000000E+00","0.0000000E+00","0.0000000E+00","1.0000000"]]},{"function_type":"gto","region":"","angular_momentum":[1],"exponents":["7.270000E-01"],"coefficients":[["1.0000000"]]}]}},"name":"cc-pVDZ"}"#;

    #[test]
    fn reads_basis_set_exchange_json() {
        let config: ConfigBasisSet = serde_json::from_str(B_STO_3G).unwrap();
        assert_eq!(config.name(), "STO-3G");

        let basis_set = BasisSet::try_from(config).unwrap();
        let basis = basis_set.basis_for(&Molecule::hydrogen(1.4)).unwrap();

        assert_eq!(basis.len(), 2);
        assert_eq!(
            basis[0].exponents().collect::<Vec<_>>(),
            vec![3.425250914, 0.6239137298, 0.1688554040]
        );
        assert_relative_eq!(basis[1].coefficients().sum::<f64>(), 1.1342916518, epsilon = 1e-10);
    }

    #[test]
    fn unsupported_elements_are_skipped() {
        // lithium entry with a p shell next to hydrogen
        let json = B_STO_3G.replace(
            r#""references":[{"reference_description":"STO-3GMinimalBasis(3functions/AO)","reference_keys":["hehre1969a"]}]}}"#,
            r#""references":[]},"3":{"electron_shells":[{"function_type":"gto","angular_momentum":[0,1],"exponents":["0.6362897469E+00"],"coefficients":[["0.1543289673E+00"],["0.1559162750E+00"]]}]}}"#,
        );
        let config: ConfigBasisSet = serde_json::from_str(&json).unwrap();
        let basis_set = BasisSet::try_from(config).unwrap();

        assert_eq!(basis_set.basis_for(&Molecule::hydrogen(1.4)).unwrap().len(), 2);
        assert_eq!(
            basis_set.basis_for(&Molecule::diatomic(ElementType::He, 1.4)).unwrap_err(),
            BasisError::MissingElement(ElementType::He)
        );
    }

    #[test]
    fn general_contractions_become_separate_functions() {
        let config: ConfigBasisSet = serde_json::from_str(B_CC_PVDZ).unwrap();
        let basis_set = BasisSet::try_from(config.s_shells_only()).unwrap();
        let basis = basis_set.basis_for(&Molecule::hydrogen(1.4)).unwrap();

        // two s functions per atom, the p shell is gone
        assert_eq!(basis.len(), 4);
        assert_eq!(basis[1].coefficients().last(), Some(1.0));
    }

    #[test]
    fn higher_angular_momentum_is_rejected() {
        let config: ConfigBasisSet = serde_json::from_str(B_CC_PVDZ).unwrap();
        assert_eq!(
            BasisSet::try_from(config).unwrap_err(),
            ConfigError::UnsupportedAngularMomentum(1)
        );
    }

    #[test]
    fn bad_numbers_are_reported() {
        let json = B_STO_3G.replace("0.6239137298E+00", "zero point six");
        let config: ConfigBasisSet = serde_json::from_str(&json).unwrap();
        assert_eq!(
            BasisSet::try_from(config).unwrap_err(),
            ConfigError::InvalidNumber("zero point six".to_owned())
        );
    }
}
