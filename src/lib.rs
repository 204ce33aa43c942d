//! # eigenkit
//!
//! Pure-Rust dense eigenvalue engines, no-std compatible (with `alloc`).
//! Computes the real Schur form of general square matrices via Hessenberg
//! reduction and Francis double-shift QR, and the full eigendecomposition of
//! symmetric matrices via tridiagonalization and implicit Wilkinson-shift QR.
//!
//! ## Quick start
//!
//! ```
//! use eigenkit::DynMatrix;
//!
//! // General matrix: A = Q D Qᵗ with D quasi-upper-triangular
//! let a = DynMatrix::from_rows(3, 3, &[
//!     4.0_f64, 1.0, -2.0,
//!     1.0, 2.0, 0.0,
//!     -2.0, 0.0, 3.0,
//! ]);
//! let schur = a.real_schur().unwrap();
//! assert!(schur.is_converged());
//! let back = &(schur.q() * schur.d()) * &schur.q().transpose();
//! assert!(back.max_abs_diff(&a) < 1e-12);
//!
//! // Symmetric matrix: sorted eigenvalues and orthonormal eigenvectors
//! let eig = a.eig_symmetric().unwrap();
//! let vals = eig.eigenvalues().unwrap();
//! assert!(vals[0] <= vals[1] && vals[1] <= vals[2]);
//! ```
//!
//! ## Modules
//!
//! - [`dynmatrix`]: Heap-allocated `DynMatrix<T>` with runtime dimensions.
//!   `Vec<T>` row-major storage. Arithmetic, norms, structural predicates
//!   (`is_hessenberg`, `is_quasi_triangular`, `is_orthogonal`, ...) and test
//!   matrix constructors (`companion`, `hilbert`). [`DynVector<T>`] newtype
//!   for single-index vector access.
//!
//! - [`linalg`]: Householder reflectors, Givens and Jacobi rotations,
//!   Hessenberg and tridiagonal reduction, the Francis QR engine
//!   ([`linalg::RealSchurDecomposition`]), the symmetric engine
//!   ([`linalg::SymmetricEigen`]) and spectrum queries (condition number,
//!   spectral radius). Free functions operate on `&mut impl MatrixMut<T>` for
//!   in-place use; wrapper structs offer a higher-level API.
//!
//! - [`traits`]: Element trait hierarchy:
//!   - [`Scalar`]: all matrix elements (`Copy + PartialEq + Debug + Zero + One + Num`)
//!   - [`FloatScalar`]: real floats (`Scalar + Float`), used by every engine
//!   - [`MatrixRef`] / [`MatrixMut`]: generic read/write access for algorithms
//!
//! ## Non-convergence
//!
//! Both engines take an explicit sweep budget and report a
//! [`linalg::Convergence`] status instead of panicking. The Schur engine keeps
//! its partially reduced factors (still an exact orthogonal similarity); the
//! symmetric engine exposes no eigenvalues.
//!
//! ## Cargo features
//!
//! | Feature | Default | Description |
//! |---------|---------|-------------|
//! | `std`   | yes     | Hardware FPU via system libm, `std::error::Error` for `LinalgError` |
//! | `libm`  | no      | Pure-Rust software float fallback for `no_std` targets |
//! | `log`   | no      | Convergence diagnostics through the `log` facade |

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod dynmatrix;
pub mod linalg;
pub mod traits;

pub use dynmatrix::{DynMatrix, DynMatrixf32, DynMatrixf64, DynVector};
pub use traits::{FloatScalar, MatrixMut, MatrixRef, Scalar};

pub use num_complex::Complex;
