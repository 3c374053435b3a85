use nalgebra::{DMatrix, DVector, SymmetricEigen};

/// Overlap eigenvalues are clipped to this value before taking their inverse square root,
/// so a (nearly) linearly dependent basis does not produce infinities.
pub const OVERLAP_EIGENVALUE_FLOOR: f64 = 1e-15;

#[inline(always)]
/// Create a symmetric, square matrix. Function is only run for upper triangle of the matrix
pub(crate) fn symmetric_matrix(
    n: usize,
    mut func: impl FnMut(usize, usize) -> f64,
) -> DMatrix<f64> {
    let m = DMatrix::from_fn(n, n, |i, j| if i <= j { func(i, j) } else { 0.0 });
    DMatrix::from_fn(n, n, |i, j| if i <= j { m[(i, j)] } else { m[(j, i)] })
}

pub(super) fn eigs(matrix: DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let eigs = SymmetricEigen::new(matrix);
    (eigs.eigenvectors, eigs.eigenvalues)
}

/// Eigendecomposition of a symmetric matrix with the eigenpairs sorted by ascending eigenvalue.
pub(super) fn sorted_eigs(matrix: DMatrix<f64>) -> (DMatrix<f64>, DVector<f64>) {
    let (eigenvectors, eigenvalues) = eigs(matrix);

    let mut val_vec_pairs = eigenvalues
        .into_iter()
        .zip(eigenvectors.column_iter())
        .collect::<Vec<_>>();

    val_vec_pairs.sort_unstable_by(|(a, _), (b, _)| a.total_cmp(b));

    let (values, vectors): (Vec<_>, Vec<_>) = val_vec_pairs.into_iter().unzip();

    (
        DMatrix::from_columns(&vectors),
        DVector::from_column_slice(&values),
    )
}

/// Symmetric (Löwdin) orthogonalization matrix `X = U s^-1/2 U^T` of an overlap matrix.
pub(super) fn symmetric_orthogonalizer(overlap: &DMatrix<f64>) -> DMatrix<f64> {
    let (u, eigenvalues) = eigs(overlap.clone());

    let clipped = eigenvalues.iter().filter(|&&s| s < OVERLAP_EIGENVALUE_FLOOR).count();
    if clipped > 0 {
        log::warn!("{clipped} overlap eigenvalue(s) below {OVERLAP_EIGENVALUE_FLOOR:e}, basis is nearly linearly dependent");
    }

    let inv_sqrt = eigenvalues.map(|s| s.max(OVERLAP_EIGENVALUE_FLOOR).sqrt().recip());
    &u * DMatrix::from_diagonal(&inv_sqrt) * u.transpose()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use nalgebra::{DMatrix, DVector};

    use super::{sorted_eigs, symmetric_matrix, symmetric_orthogonalizer};

    #[test]
    fn symmetric_matrix_mirrors_upper_triangle() {
        let mut calls = 0;
        let m = symmetric_matrix(3, |i, j| {
            calls += 1;
            (10 * i + j) as f64
        });

        assert_eq!(calls, 6);
        assert_eq!(m, m.transpose());
        assert_eq!(m[(2, 0)], 2.0);
    }

    #[test]
    fn eigenvalues_are_sorted() {
        let m = DMatrix::from_row_slice(3, 3, &[2.0, 0.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.5]);
        let (vectors, values) = sorted_eigs(m);

        assert_relative_eq!(
            values,
            DVector::from_column_slice(&[-1.0, 0.5, 2.0]),
            epsilon = 1e-14
        );
        assert_relative_eq!(vectors[(1, 0)].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn orthogonalizer_whitens_overlap() {
        let overlap = DMatrix::from_row_slice(2, 2, &[1.0, 0.6593, 0.6593, 1.0]);
        let x = symmetric_orthogonalizer(&overlap);

        assert_relative_eq!(
            x.transpose() * &overlap * &x,
            DMatrix::identity(2, 2),
            epsilon = 1e-12
        );
        assert_relative_eq!(x.clone(), x.transpose(), epsilon = 1e-14);
    }

    #[test]
    fn singular_overlap_stays_finite() {
        // two identical basis functions
        let overlap = DMatrix::from_element(2, 2, 1.0);
        let x = symmetric_orthogonalizer(&overlap);

        assert!(x.iter().all(|v| v.is_finite()));
    }
}
