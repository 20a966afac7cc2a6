// src/core/density.rs

//! 2×2 density matrices and their correspondence with Bloch vectors.
//!
//! ρ = ½(I + x·σx + y·σy + z·σz), so
//!
//! ```text
//!     [ ½(1+z)      ½(x - iy) ]
//! ρ = [                       ]
//!     [ ½(x + iy)   ½(1-z)    ]
//! ```
//!
//! The map is one-to-one between the closed unit ball and the set of
//! Hermitian, trace-one, positive-semidefinite 2×2 matrices.

use super::vector::BlochVector;
use num_complex::Complex64;
use num_traits::{One, Zero};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Plain 2×2 complex matrix, row-major.
pub type Matrix2 = [[Complex64; 2]; 2];

/// A single-qubit density matrix.
///
/// Serializes as nested arrays with every complex entry written as `[re, im]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DensityMatrix {
    entries: Matrix2,
}

impl DensityMatrix {
    /// Wraps raw entries. No physicality check is made here; see
    /// [`crate::validation::check_density`].
    pub fn from_entries(entries: Matrix2) -> Self {
        Self { entries }
    }

    /// Builds ρ = ½(I + r·σ) from a Bloch vector.
    pub fn from_bloch(v: BlochVector) -> Self {
        let a = Complex64::new(0.5 * (1.0 + v.z), 0.0);
        let d = Complex64::new(0.5 * (1.0 - v.z), 0.0);
        let b = Complex64::new(0.5 * v.x, -0.5 * v.y);
        Self { entries: [[a, b], [b.conj(), d]] }
    }

    /// Recovers (Tr ρσx, Tr ρσy, Tr ρσz).
    pub fn to_bloch(&self) -> BlochVector {
        let [[a, b], [c, d]] = self.entries;
        // Tr(ρX) = b + c, Tr(ρY) = i(b - c), Tr(ρZ) = a - d
        let x = (b + c).re;
        let y = (Complex64::i() * (b - c)).re;
        let z = (a - d).re;
        BlochVector::new(x, y, z)
    }

    pub fn entries(&self) -> &Matrix2 {
        &self.entries
    }

    pub fn get(&self, row: usize, col: usize) -> Complex64 {
        self.entries[row][col]
    }

    pub fn trace(&self) -> Complex64 {
        self.entries[0][0] + self.entries[1][1]
    }

    pub fn determinant(&self) -> Complex64 {
        let [[a, b], [c, d]] = self.entries;
        a * d - b * c
    }

    /// Tr(ρ²).
    pub fn purity(&self) -> f64 {
        mat_mul(&self.entries, &self.entries)
            .iter()
            .enumerate()
            .map(|(i, row)| row[i].re)
            .sum()
    }

    /// `true` when ρ equals its conjugate transpose within `tolerance`.
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        let dag = dagger(&self.entries);
        (0..2).all(|r| (0..2).all(|c| (self.entries[r][c] - dag[r][c]).norm() <= tolerance))
    }

    /// ρ → UρU†.
    pub fn conjugate(&self, unitary: &Matrix2) -> Self {
        let left = mat_mul(unitary, &self.entries);
        Self { entries: mat_mul(&left, &dagger(unitary)) }
    }

    /// ρ → Σ KρK†.
    pub fn apply_kraus(&self, kraus_ops: &[Matrix2]) -> Self {
        let mut acc = [[Complex64::zero(); 2]; 2];
        for k in kraus_ops {
            let term = self.conjugate(k);
            for (r, row) in acc.iter_mut().enumerate() {
                for (c, cell) in row.iter_mut().enumerate() {
                    *cell += term.entries[r][c];
                }
            }
        }
        Self { entries: acc }
    }
}

impl From<BlochVector> for DensityMatrix {
    fn from(v: BlochVector) -> Self {
        Self::from_bloch(v)
    }
}

impl fmt::Display for DensityMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.entries.iter().enumerate() {
            write!(f, "{}[{:.4}, {:.4}]", if i > 0 { "\n" } else { "" }, row[0], row[1])?;
        }
        Ok(())
    }
}

/// `ρ = ½(I + x·σx + y·σy + z·σz)` for the given vector.
pub fn density_from_bloch(v: BlochVector) -> DensityMatrix {
    DensityMatrix::from_bloch(v)
}

/// Identity matrix.
pub fn identity() -> Matrix2 {
    [[Complex64::one(), Complex64::zero()], [Complex64::zero(), Complex64::one()]]
}

/// Matrix product `a · b`.
pub fn mat_mul(a: &Matrix2, b: &Matrix2) -> Matrix2 {
    let mut out = [[Complex64::zero(); 2]; 2];
    for (r, row) in out.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            *cell = a[r][0] * b[0][c] + a[r][1] * b[1][c];
        }
    }
    out
}

/// Conjugate transpose.
pub fn dagger(m: &Matrix2) -> Matrix2 {
    [[m[0][0].conj(), m[1][0].conj()], [m[0][1].conj(), m[1][1].conj()]]
}

/// Scalar multiple of a matrix.
pub fn scale(m: &Matrix2, s: f64) -> Matrix2 {
    [[m[0][0] * s, m[0][1] * s], [m[1][0] * s, m[1][1] * s]]
}
