use nalgebra::DMatrix;

use crate::integrals::ElectronTensor;

use super::utils;

/// Two-electron part of the restricted Fock matrix,
/// `G[i,j] = sum_kl D[k,l] * ((ij|kl) - 1/2 (ik|jl))`.
pub fn two_electron_matrix(density: &DMatrix<f64>, electron: &ElectronTensor) -> DMatrix<f64> {
    let n_basis = density.nrows();

    utils::symmetric_matrix(n_basis, |i, j| {
        let mut sum = 0.0;
        for k in 0..n_basis {
            for l in 0..n_basis {
                let coulomb = electron[(i, j, k, l)];
                let exchange = electron[(i, k, j, l)];
                sum += density[(k, l)] * (coulomb - 0.5 * exchange);
            }
        }
        sum
    })
}

/// `F = T + V + G(D)`
pub fn fock_matrix(
    kinetic: &DMatrix<f64>,
    nuclear: &DMatrix<f64>,
    density: &DMatrix<f64>,
    electron: &ElectronTensor,
) -> DMatrix<f64> {
    kinetic + nuclear + two_electron_matrix(density, electron)
}
