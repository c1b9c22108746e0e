//! Row-major dense matrix for the reservoir recurrence.
//!
//! Deliberately small: the reservoir needs uniform initialization, a
//! transposed matrix product, elementwise maps, and a spectral radius.
//! Matrices here are at most a few hundred units square, so a plain
//! `Vec<f64>` carries the data; the one genuinely numerical job — the
//! eigendecomposition behind [`Matrix::spectral_radius`] — is delegated
//! to `nalgebra`.

use crate::error::EchoError;
use crate::rng::SeedRng;

/// A row-major dense `f64` matrix.
///
/// # Example
///
/// ```
/// use echo_core::Matrix;
///
/// let m = Matrix::zeros(2, 3);
/// assert_eq!(m.shape(), (2, 3));
/// assert_eq!(m.get(1, 2), 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix of zeros.
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::ReshapeMismatch`] if `data.len() != rows * cols`.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    ///
    /// assert!(Matrix::from_vec(2, 2, vec![1.0]).is_err());
    /// ```
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, EchoError> {
        if data.len() != rows * cols {
            return Err(EchoError::ReshapeMismatch {
                elements: data.len(),
                rows,
                cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a 1×n row vector.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let v = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
    /// assert_eq!(v.shape(), (1, 3));
    /// ```
    pub fn row_vector(data: Vec<f64>) -> Self {
        Self {
            rows: 1,
            cols: data.len(),
            data,
        }
    }

    /// Creates a matrix with entries drawn uniformly from [lo, hi).
    ///
    /// Entries are drawn row by row, so the result is fully determined
    /// by the RNG state on entry.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::{Matrix, SeedRng};
    ///
    /// let m = Matrix::uniform(&mut SeedRng::new(42), 4, 4, -1.0, 1.0);
    /// assert!(m.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));
    /// ```
    pub fn uniform(rng: &mut SeedRng, rows: usize, cols: usize, lo: f64, hi: f64) -> Self {
        let data = (0..rows * cols).map(|_| rng.next_in(lo, hi)).collect();
        Self { rows, cols, data }
    }

    /// Returns the number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Returns the number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns (rows, cols).
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Returns the entry at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        self.data[row * self.cols + col]
    }

    /// Sets the entry at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if the indices are out of bounds.
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        assert!(row < self.rows && col < self.cols, "matrix index out of bounds");
        self.data[row * self.cols + col] = value;
    }

    /// Returns the row-major flattened contents.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
    /// assert_eq!(m.as_slice(), &[1.0, 2.0, 3.0, 4.0]);
    /// ```
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Multiplies every entry in place by `factor`.
    pub fn scale(&mut self, factor: f64) {
        for v in &mut self.data {
            *v *= factor;
        }
    }

    /// Returns a new matrix with `f` applied to every entry.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let m = Matrix::row_vector(vec![0.0, 1.0]);
    /// let t = m.map(f64::tanh);
    /// assert_eq!(t.get(0, 0), 0.0);
    /// ```
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Returns the elementwise sum `self + other`.
    ///
    /// Both matrices must have the same shape.
    pub fn add(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.shape(), other.shape());
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a + b)
                .collect(),
        }
    }

    /// Computes `self · otherᵀ`.
    ///
    /// For `self` of shape (m, k) and `other` of shape (n, k), the result
    /// has shape (m, n). This is the product both halves of the reservoir
    /// recurrence use: `x · Winᵀ` and `state · Wᵀ`.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let x = Matrix::row_vector(vec![1.0, 2.0]);
    /// let w = Matrix::from_vec(3, 2, vec![1.0, 0.0, 0.0, 1.0, 1.0, 1.0]).unwrap();
    /// let y = x.mul_transpose(&w);
    /// assert_eq!(y.shape(), (1, 3));
    /// assert_eq!(y.as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    pub fn mul_transpose(&self, other: &Matrix) -> Matrix {
        debug_assert_eq!(self.cols, other.cols);
        let mut out = Matrix::zeros(self.rows, other.rows);
        for i in 0..self.rows {
            let lhs = &self.data[i * self.cols..(i + 1) * self.cols];
            for j in 0..other.rows {
                let rhs = &other.data[j * other.cols..(j + 1) * other.cols];
                out.data[i * other.rows + j] =
                    lhs.iter().zip(rhs).map(|(a, b)| a * b).sum();
            }
        }
        out
    }

    /// Returns a copy reshaped to (rows, cols), row-major.
    ///
    /// # Errors
    ///
    /// Returns [`EchoError::ReshapeMismatch`] if the element count differs.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let v = Matrix::row_vector(vec![1.0, 2.0, 3.0, 4.0]);
    /// let m = v.reshape(2, 2).unwrap();
    /// assert_eq!(m.get(1, 0), 3.0);
    /// assert!(v.reshape(3, 2).is_err());
    /// ```
    pub fn reshape(&self, rows: usize, cols: usize) -> Result<Matrix, EchoError> {
        if self.data.len() != rows * cols {
            return Err(EchoError::ReshapeMismatch {
                elements: self.data.len(),
                rows,
                cols,
            });
        }
        Ok(Matrix {
            rows,
            cols,
            data: self.data.clone(),
        })
    }

    /// Returns a copy with rows and columns swapped.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
    /// let t = m.transpose();
    /// assert_eq!(t.shape(), (3, 2));
    /// assert_eq!(t.get(2, 1), 6.0);
    /// ```
    pub fn transpose(&self) -> Matrix {
        let mut out = Matrix::zeros(self.cols, self.rows);
        for i in 0..self.rows {
            for j in 0..self.cols {
                out.data[j * self.rows + i] = self.data[i * self.cols + j];
            }
        }
        out
    }

    /// Computes the spectral radius — the largest absolute eigenvalue —
    /// of a square matrix.
    ///
    /// The eigenvalues of a real nonsymmetric matrix are complex in
    /// general (the reservoir's iid-uniform recurrent matrix routinely
    /// has a complex-conjugate dominant pair), so this goes through
    /// nalgebra's Schur-based complex eigendecomposition and takes the
    /// maximum modulus. Rescaling a matrix by `target / radius` therefore
    /// pins its true spectral radius to `target` within floating-point
    /// tolerance.
    ///
    /// # Panics
    ///
    /// Panics in debug builds if the matrix is not square.
    ///
    /// # Example
    ///
    /// ```
    /// use echo_core::Matrix;
    ///
    /// let m = Matrix::from_vec(2, 2, vec![2.0, 0.0, 0.0, 1.0]).unwrap();
    /// assert!((m.spectral_radius() - 2.0).abs() < 1e-9);
    /// ```
    pub fn spectral_radius(&self) -> f64 {
        debug_assert_eq!(self.rows, self.cols, "spectral radius needs a square matrix");
        if self.rows == 0 {
            return 0.0;
        }
        nalgebra::DMatrix::from_row_slice(self.rows, self.cols, &self.data)
            .complex_eigenvalues()
            .iter()
            .map(|eigenvalue| eigenvalue.norm())
            .fold(0.0, f64::max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zeros_has_shape_and_zero_entries() {
        let m = Matrix::zeros(3, 2);
        assert_eq!(m.shape(), (3, 2));
        assert!(m.as_slice().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn from_vec_rejects_bad_length() {
        let err = Matrix::from_vec(2, 3, vec![1.0, 2.0]).unwrap_err();
        assert_eq!(
            err,
            EchoError::ReshapeMismatch {
                elements: 2,
                rows: 2,
                cols: 3
            }
        );
    }

    #[test]
    fn uniform_respects_bounds_and_seed() {
        let a = Matrix::uniform(&mut SeedRng::new(7), 5, 5, -1.0, 1.0);
        let b = Matrix::uniform(&mut SeedRng::new(7), 5, 5, -1.0, 1.0);
        assert_eq!(a, b);
        assert!(a.as_slice().iter().all(|v| (-1.0..1.0).contains(v)));
    }

    #[test]
    fn mul_transpose_matches_hand_computation() {
        // x (1×2) · Wᵀ where W is 3×2: picks out weighted sums per row of W.
        let x = Matrix::row_vector(vec![2.0, -1.0]);
        let w = Matrix::from_vec(3, 2, vec![1.0, 1.0, 0.5, 0.0, 0.0, 2.0]).unwrap();
        let y = x.mul_transpose(&w);
        assert_eq!(y.shape(), (1, 3));
        assert_eq!(y.as_slice(), &[1.0, 1.0, -2.0]);
    }

    #[test]
    fn add_and_map_compose() {
        let a = Matrix::row_vector(vec![0.0, 1.0]);
        let b = Matrix::row_vector(vec![1.0, -1.0]);
        let sum = a.add(&b).map(f64::tanh);
        assert!((sum.get(0, 0) - 1.0f64.tanh()).abs() < 1e-12);
        assert_eq!(sum.get(0, 1), 0.0);
    }

    #[test]
    fn reshape_roundtrip() {
        let v = Matrix::row_vector(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let m = v.reshape(2, 3).unwrap();
        assert_eq!(m.get(0, 2), 3.0);
        assert_eq!(m.get(1, 0), 4.0);
        // Same elements, row-major order preserved
        assert_eq!(m.as_slice(), v.as_slice());
    }

    #[test]
    fn reshape_count_mismatch_errors() {
        let v = Matrix::row_vector(vec![1.0, 2.0, 3.0]);
        let err = v.reshape(2, 2).unwrap_err();
        assert!(matches!(err, EchoError::ReshapeMismatch { elements: 3, .. }));
    }

    #[test]
    fn transpose_swaps_indices() {
        let m = Matrix::from_vec(2, 3, vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0]).unwrap();
        let t = m.transpose();
        assert_eq!(t.shape(), (3, 2));
        for i in 0..2 {
            for j in 0..3 {
                assert_eq!(t.get(j, i), m.get(i, j));
            }
        }
    }

    #[test]
    fn spectral_radius_of_diagonal() {
        let m = Matrix::from_vec(3, 3, vec![0.5, 0.0, 0.0, 0.0, -3.0, 0.0, 0.0, 0.0, 1.0])
            .unwrap();
        assert!((m.spectral_radius() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn spectral_radius_of_complex_pair() {
        // Eigenvalues ±i: no real dominant eigenvector exists, yet the
        // radius is exactly 1.
        let m = Matrix::from_vec(2, 2, vec![0.0, 2.0, -0.5, 0.0]).unwrap();
        assert!((m.spectral_radius() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn spectral_radius_of_zero_matrix_is_zero() {
        let m = Matrix::zeros(4, 4);
        assert_eq!(m.spectral_radius(), 0.0);
    }

    #[test]
    fn spectral_radius_squares_with_the_matrix() {
        // ρ(W²) = ρ(W)² by the spectral mapping theorem; an estimator
        // that self-consistently misreports the radius fails this.
        let w = Matrix::uniform(&mut SeedRng::new(42), 30, 30, -1.0, 1.0);
        let w2 = w.mul_transpose(&w.transpose());
        let radius = w.spectral_radius();
        assert!(radius > 0.0);
        assert!((w2.spectral_radius() - radius * radius).abs() < 1e-6 * radius * radius);
    }

    #[test]
    fn rescale_pins_spectral_radius_to_target() {
        let mut w = Matrix::uniform(&mut SeedRng::new(42), 20, 20, -1.0, 1.0);
        let target = 0.99;
        let radius = w.spectral_radius();
        assert!(radius > 0.0);
        w.scale(target / radius);
        assert!((w.spectral_radius() - target).abs() < 1e-9);
    }
}
