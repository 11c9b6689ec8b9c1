//! Automatic differentiation of dense matrix programs via Univariate
//! Taylor Polynomials over Matrices (UTPM).
//!
//! Forward mode propagates truncated Taylor polynomials through the
//! arithmetic kernels in [`raw`]; reverse mode records the same
//! operations onto a [`graph::CGraph`] and recovers adjoints with a
//! reverse sweep. [`interpolation`] converts a set of univariate Taylor
//! runs into a full multivariate derivative tensor. [`dispatch`] lets
//! callers mix plain matrices and UTPM values in one expression.

pub mod assert_close;
pub mod combine;
pub mod dispatch;
pub mod error;
pub mod generate;
pub mod graph;
pub mod interpolation;
pub mod raw;
pub mod types;
pub mod value;

pub use dispatch::{dot, eigh, inv, qr, shape, solve, trace, transpose, MatrixLike};
pub use error::{Result, UtpmError};
pub use graph::{CGraph, IntoNodeRef, NodeId, NodeValue, OpKind};
pub use interpolation::{gamma, multi_binomial, multi_indices, positions_from_multi_index};
pub use types::{Coeffs, Shape};
pub use value::Utpm;
