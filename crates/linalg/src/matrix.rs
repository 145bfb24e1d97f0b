use crate::error::LinalgError;
use nalgebra::{Cholesky, DMatrix, DVector, SymmetricEigen};

pub type Matrix = DMatrix<f64>;
pub type Vector = DVector<f64>;

/// Eigenvalues sorted in descending order with their eigenvectors as columns.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigen {
    pub values: Vec<f64>,
    pub vectors: Matrix,
}

fn require_square(operation: &'static str, a: &Matrix) -> Result<(), LinalgError> {
    if a.nrows() != a.ncols() {
        return Err(LinalgError::NotSquare {
            operation,
            rows: a.nrows(),
            cols: a.ncols(),
        });
    }
    Ok(())
}

pub fn multiply(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.ncols() != b.nrows() {
        return Err(LinalgError::DimensionMismatch {
            operation: "multiply",
            left: a.shape(),
            right: b.shape(),
        });
    }
    Ok(a * b)
}

pub fn multiply_vector(a: &Matrix, v: &Vector) -> Result<Vector, LinalgError> {
    if a.ncols() != v.len() {
        return Err(LinalgError::DimensionMismatch {
            operation: "multiply_vector",
            left: a.shape(),
            right: (v.len(), 1),
        });
    }
    Ok(a * v)
}

pub fn transpose(a: &Matrix) -> Matrix {
    a.transpose()
}

/// Inverts a square matrix by LU decomposition.
pub fn inverse(a: &Matrix) -> Result<Matrix, LinalgError> {
    require_square("inverse", a)?;
    a.clone()
        .try_inverse()
        .ok_or(LinalgError::Singular("inverse"))
}

/// Returns the lower-triangular Cholesky factor `L` with `a = L * L^T`.
pub fn cholesky(a: &Matrix) -> Result<Matrix, LinalgError> {
    require_square("cholesky", a)?;
    Cholesky::new(a.clone())
        .map(|c| c.l())
        .ok_or(LinalgError::NotPositiveDefinite("cholesky"))
}

/// Eigen-decomposition of a symmetric matrix.
///
/// The input is symmetrized as `(a + a^T) / 2` first so that round-off in
/// products such as `S10 * S00^-1 * S01` does not leak into the solver.
pub fn symmetric_eigen(a: &Matrix) -> Result<Eigen, LinalgError> {
    require_square("symmetric_eigen", a)?;
    let sym = (a + a.transpose()) * 0.5;
    let eigen = SymmetricEigen::new(sym);

    let mut order: Vec<usize> = (0..eigen.eigenvalues.len()).collect();
    order.sort_by(|&i, &j| eigen.eigenvalues[j].total_cmp(&eigen.eigenvalues[i]));

    let values: Vec<f64> = order.iter().map(|&i| eigen.eigenvalues[i]).collect();
    let mut vectors = Matrix::zeros(a.nrows(), a.ncols());
    for (dst, &src) in order.iter().enumerate() {
        vectors.set_column(dst, &eigen.eigenvectors.column(src));
    }
    ensure_finite("symmetric_eigen", values.iter())?;
    Ok(Eigen { values, vectors })
}

/// Solves the generalized problem `a * v = lambda * b * v` for symmetric `a`
/// and symmetric positive-definite `b`.
///
/// With `b = L * L^T` the problem reduces to the ordinary symmetric problem
/// on `L^-1 * a * L^-T`; eigenvectors are mapped back through `L^-T`, which
/// leaves them normalized so that `v^T * b * v = 1`.
pub fn generalized_symmetric_eigen(a: &Matrix, b: &Matrix) -> Result<Eigen, LinalgError> {
    require_square("generalized_symmetric_eigen", a)?;
    if a.shape() != b.shape() {
        return Err(LinalgError::DimensionMismatch {
            operation: "generalized_symmetric_eigen",
            left: a.shape(),
            right: b.shape(),
        });
    }
    let l = cholesky(b)?;
    let l_inv = inverse(&l)?;
    let l_inv_t = l_inv.transpose();
    let reduced = &l_inv * a * &l_inv_t;
    let eigen = symmetric_eigen(&reduced)?;
    Ok(Eigen {
        values: eigen.values,
        vectors: &l_inv_t * eigen.vectors,
    })
}

/// Least-squares solution of `a * x = b` via Householder QR.
///
/// `a` must have at least as many rows as columns; `b` may hold several
/// right-hand sides as columns.
pub fn qr_solve(a: &Matrix, b: &Matrix) -> Result<Matrix, LinalgError> {
    if a.nrows() != b.nrows() {
        return Err(LinalgError::DimensionMismatch {
            operation: "qr_solve",
            left: a.shape(),
            right: b.shape(),
        });
    }
    if a.nrows() < a.ncols() {
        return Err(LinalgError::DegreesOfFreedom {
            observations: a.nrows(),
            parameters: a.ncols(),
        });
    }
    let qr = a.clone().qr();
    let qtb = qr.q().transpose() * b;
    qr.r()
        .solve_upper_triangular(&qtb)
        .ok_or(LinalgError::Singular("qr_solve"))
}

/// Residuals of the least-squares projection of each column of `y` on `x`.
pub fn residualize(y: &Matrix, x: &Matrix) -> Result<Matrix, LinalgError> {
    let beta = qr_solve(x, y)?;
    Ok(y - x * beta)
}

/// Fails with `NonFinite` if any value is NaN or infinite.
pub fn ensure_finite<'a>(
    context: &str,
    values: impl IntoIterator<Item = &'a f64>,
) -> Result<(), LinalgError> {
    if values.into_iter().any(|v| !v.is_finite()) {
        return Err(LinalgError::NonFinite(context.to_string()));
    }
    Ok(())
}
