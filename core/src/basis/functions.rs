use nalgebra::Vector3;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::{error::BasisError, integrals::primitive};

/// Function of the form N(exponent) * coefficient * exp(-exponent * r^2)
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Gaussian {
    pub exponent: f64,
    /// The contraction coefficient of this gaussian. The normalization constant is not
    /// folded in, the integrals apply it themselves.
    pub coefficient: f64,
}

/// Linear combination of many [`Gaussian`]s
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ContractedGaussian(pub(crate) SmallVec<[Gaussian; 6]>);

impl ContractedGaussian {
    /// Pairs up exponents and coefficients. Both slices must have the same, non-zero length
    /// and every exponent has to be a positive number.
    pub fn new(exponents: &[f64], coefficients: &[f64]) -> Result<Self, BasisError> {
        if exponents.len() != coefficients.len() {
            return Err(BasisError::LengthMismatch {
                exponents: exponents.len(),
                coefficients: coefficients.len(),
            });
        }
        if exponents.is_empty() {
            return Err(BasisError::EmptyContraction);
        }
        if let Some(&bad) = exponents.iter().find(|e| !(e.is_finite() && **e > 0.0)) {
            return Err(BasisError::InvalidExponent(bad));
        }

        Ok(Self(
            exponents
                .iter()
                .zip(coefficients)
                .map(|(&exponent, &coefficient)| Gaussian {
                    exponent,
                    coefficient,
                })
                .collect(),
        ))
    }

    pub fn primitives(&self) -> &[Gaussian] {
        &self.0
    }

    pub fn exponents(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|g| g.exponent)
    }

    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.0.iter().map(|g| g.coefficient)
    }

    /// Self overlap of the contraction, which is one for a normalized basis function.
    pub fn self_overlap(&self) -> f64 {
        let origin = Vector3::zeros();
        itertools::iproduct!(self.primitives(), self.primitives())
            .map(|(a, b)| {
                a.coefficient
                    * b.coefficient
                    * primitive::overlap(a.exponent, b.exponent, &origin, &origin)
            })
            .sum()
    }

    /// Rescales the coefficients so that the contracted function has unit norm.
    pub fn normalized(&self) -> Self {
        let factor = self.self_overlap().sqrt().recip();
        Self(
            self.0
                .iter()
                .map(|&g| Gaussian {
                    coefficient: g.coefficient * factor,
                    ..g
                })
                .collect(),
        )
    }
}

/// A contracted gaussian placed on a center.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BasisFunction {
    pub(crate) contracted_gaussian: ContractedGaussian,
    /// The position of this basis function, in bohr
    pub(crate) center: Vector3<f64>,
}

impl BasisFunction {
    pub fn new(
        center: Vector3<f64>,
        exponents: &[f64],
        coefficients: &[f64],
    ) -> Result<Self, BasisError> {
        Ok(Self::from_contraction(
            center,
            ContractedGaussian::new(exponents, coefficients)?,
        ))
    }

    pub fn from_contraction(center: Vector3<f64>, contracted_gaussian: ContractedGaussian) -> Self {
        Self {
            contracted_gaussian,
            center,
        }
    }

    pub fn center(&self) -> &Vector3<f64> {
        &self.center
    }

    pub fn contraction(&self) -> &ContractedGaussian {
        &self.contracted_gaussian
    }

    pub fn exponents(&self) -> impl Iterator<Item = f64> + '_ {
        self.contracted_gaussian.exponents()
    }

    pub fn coefficients(&self) -> impl Iterator<Item = f64> + '_ {
        self.contracted_gaussian.coefficients()
    }

    pub fn normalized(&self) -> Self {
        Self {
            contracted_gaussian: self.contracted_gaussian.normalized(),
            center: self.center,
        }
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;

    use super::{BasisFunction, ContractedGaussian};
    use crate::error::BasisError;

    #[test]
    fn rejects_malformed_contractions() {
        assert_eq!(
            ContractedGaussian::new(&[1.0, 2.0], &[1.0]),
            Err(BasisError::LengthMismatch {
                exponents: 2,
                coefficients: 1
            })
        );
        assert_eq!(
            ContractedGaussian::new(&[], &[]),
            Err(BasisError::EmptyContraction)
        );
        assert_eq!(
            ContractedGaussian::new(&[-0.5], &[1.0]),
            Err(BasisError::InvalidExponent(-0.5))
        );
    }

    #[test]
    fn keeps_primitive_order() {
        let function =
            BasisFunction::new(Vector3::new(0.0, 0.0, 1.4), &[3.0, 2.0, 1.0], &[0.1, 0.2, 0.3])
                .unwrap();

        assert_eq!(function.exponents().collect::<Vec<_>>(), vec![3.0, 2.0, 1.0]);
        assert_eq!(function.coefficients().collect::<Vec<_>>(), vec![0.1, 0.2, 0.3]);
        assert_eq!(function.center(), &Vector3::new(0.0, 0.0, 1.4));
    }

    #[test]
    fn normalization_gives_unit_self_overlap() {
        let contraction = ContractedGaussian::new(&[3.0, 0.5], &[2.0, 5.0]).unwrap();
        assert!((contraction.self_overlap() - 1.0).abs() > 1.0);

        assert_relative_eq!(contraction.normalized().self_overlap(), 1.0, epsilon = 1e-12);
    }
}
