//! Tridiagonal linear systems.
//!
//! ## Purpose
//!
//! Solves `A x = d` for tridiagonal `A` with the Thomas algorithm in O(n).
//! Used by the cubic spline to obtain knot second derivatives.
//!
//! ## Invariants
//!
//! * `sub.len() == sup.len() == diag.len() - 1`, `rhs.len() == diag.len()`.
//! * No pivoting: the caller supplies a system whose forward sweep keeps
//!   pivots away from zero (diagonally dominant rows, or rows shown to be safe).

// External dependencies
use num_traits::Float;

/// Relative size below which a pivot is treated as zero.
const PIVOT_EPS: f64 = 1e-14;

/// Solve a tridiagonal system.
///
/// `sub[i]` multiplies `x[i]` in row `i + 1`; `sup[i]` multiplies `x[i + 1]`
/// in row `i`. Returns `None` if a pivot vanishes.
pub fn solve_tridiagonal<T: Float>(sub: &[T], diag: &[T], sup: &[T], rhs: &[T]) -> Option<Vec<T>> {
    let n = diag.len();
    if n == 0 || rhs.len() != n || sub.len() + 1 != n || sup.len() + 1 != n {
        return None;
    }

    let scale = diag.iter().fold(T::zero(), |acc, &d| acc.max(d.abs()));
    let eps = T::from(PIVOT_EPS)? * scale.max(T::one());

    let mut c = vec![T::zero(); n];
    let mut d = vec![T::zero(); n];

    // Forward sweep
    let mut pivot = diag[0];
    if pivot.abs() <= eps {
        return None;
    }
    if n > 1 {
        c[0] = sup[0] / pivot;
    }
    d[0] = rhs[0] / pivot;

    for i in 1..n {
        pivot = diag[i] - sub[i - 1] * c[i - 1];
        if pivot.abs() <= eps || !pivot.is_finite() {
            return None;
        }
        if i < n - 1 {
            c[i] = sup[i] / pivot;
        }
        d[i] = (rhs[i] - sub[i - 1] * d[i - 1]) / pivot;
    }

    // Back substitution
    let mut x = d;
    for i in (0..n - 1).rev() {
        x[i] = x[i] - c[i] * x[i + 1];
    }
    Some(x)
}
