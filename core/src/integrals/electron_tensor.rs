use std::ops::Index;

use crate::basis::BasisFunction;

use super::Integrator;

/// Dense tensor of electron repulsion integrals `(ij|kl)` (chemists' notation) over all
/// quadruples of basis functions.
///
/// Every element is evaluated on its own, permutational symmetry is neither exploited nor
/// enforced. Memory and time grow as `n^4`, which is fine for the small basis sets this
/// crate targets.
#[derive(Clone, Debug)]
pub struct ElectronTensor {
    data: Vec<f64>,
    /// side length
    size: usize,
}

impl ElectronTensor {
    /// Evaluates `(ij|kl)` for every `i, j, k, l` of `basis`. With the `rayon` feature the
    /// integrals are computed in parallel, one `(i, j, k)` row of `l` values per task.
    pub fn from_basis(
        basis: &[BasisFunction],
        integrator: &impl Integrator<Function = BasisFunction>,
    ) -> Self {
        let n_basis = basis.len();
        let mut data = vec![0.0; n_basis.pow(4)];

        if n_basis == 0 {
            return Self { data, size: 0 };
        }

        let fill_row = |(row, output): (usize, &mut [f64])| {
            let (i, j, k) = (row / n_basis.pow(2), (row / n_basis) % n_basis, row % n_basis);
            for (l, integral) in output.iter_mut().enumerate() {
                *integral =
                    integrator.electron_repulsion((&basis[i], &basis[j], &basis[k], &basis[l]));
                log::trace!("ERI ({i} {j}|{k} {l}) = {integral:<1.8}");
            }
        };

        #[cfg(feature = "rayon")]
        {
            use rayon::prelude::*;

            data.par_chunks_mut(n_basis).enumerate().for_each(fill_row);
        }

        #[cfg(not(feature = "rayon"))]
        data.chunks_mut(n_basis).enumerate().for_each(fill_row);

        Self {
            data,
            size: n_basis,
        }
    }

    /// Number of basis functions along each of the four axes.
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline(always)]
    fn linear(&self, (i, j, k, l): (usize, usize, usize, usize)) -> usize {
        ((i * self.size + j) * self.size + k) * self.size + l
    }
}

impl Index<(usize, usize, usize, usize)> for ElectronTensor {
    type Output = f64;

    fn index(&self, index: (usize, usize, usize, usize)) -> &Self::Output {
        let (i, j, k, l) = index;
        assert!(
            i < self.size && j < self.size && k < self.size && l < self.size,
            "index ({i} {j}|{k} {l}) out of bounds for {} basis functions",
            self.size
        );
        &self.data[self.linear(index)]
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::Vector3;
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use crate::{
        basis::{library, BasisFunction},
        integrals::{Integrator, SGaussianIntegrator},
        molecule::Molecule,
    };

    use super::ElectronTensor;

    fn random_basis(rng: &mut StdRng, n: usize) -> Vec<BasisFunction> {
        (0..n)
            .map(|_| {
                let n_primitives = rng.gen_range(1..=3);
                let exponents = (0..n_primitives)
                    .map(|_| rng.gen_range(0.1..5.0))
                    .collect::<Vec<f64>>();
                let coefficients = (0..n_primitives)
                    .map(|_| rng.gen_range(-1.0..1.0))
                    .collect::<Vec<f64>>();
                let center = Vector3::new(
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-1.5..1.5),
                    rng.gen_range(-1.5..1.5),
                );
                BasisFunction::new(center, &exponents, &coefficients).unwrap()
            })
            .collect()
    }

    #[test]
    fn eightfold_symmetry() {
        let mut rng = StdRng::seed_from_u64(7);
        let basis = random_basis(&mut rng, 4);
        let tensor = ElectronTensor::from_basis(&basis, &SGaussianIntegrator);

        for (i, j, k, l) in itertools::iproduct!(0..4, 0..4, 0..4, 0..4) {
            let reference = tensor[(i, j, k, l)];
            assert!(reference.is_finite());
            assert_relative_eq!(tensor[(j, i, k, l)], reference, epsilon = 1e-12);
            assert_relative_eq!(tensor[(i, j, l, k)], reference, epsilon = 1e-12);
            assert_relative_eq!(tensor[(k, l, i, j)], reference, epsilon = 1e-12);
        }
    }

    #[test]
    fn matches_integrator() {
        let basis = library::six_31g()
            .basis_for(&Molecule::hydrogen(1.4))
            .unwrap();
        let tensor = ElectronTensor::from_basis(&basis, &SGaussianIntegrator);

        assert_eq!(tensor.size(), 4);
        assert_eq!(
            tensor[(3, 1, 0, 2)],
            SGaussianIntegrator.electron_repulsion((&basis[3], &basis[1], &basis[0], &basis[2]))
        );
    }

    #[test]
    #[should_panic]
    fn out_of_bounds_index_panics() {
        let basis = library::sto_3g()
            .basis_for(&Molecule::hydrogen(1.4))
            .unwrap();
        let tensor = ElectronTensor::from_basis(&basis, &SGaussianIntegrator);
        let _ = tensor[(0, 0, 0, 2)];
    }
}
