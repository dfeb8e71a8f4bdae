use log::debug;

use crate::r2::R2;

use super::is_zero::{NearZero, EPS};

/// Eigen-decomposition of the symmetric matrix [[a, b], [b, c]].
///
/// Eigenvalues are ordered `l1 >= l2`; eigenvectors are unit length and
/// mutually perpendicular.
#[derive(Debug, Clone, PartialEq)]
pub struct Eigen2 {
    pub l1: f64,
    pub l2: f64,
    pub v1: R2,
    pub v2: R2,
}

/// Closed-form decomposition via the trace/determinant formula.
///
/// When the off-diagonal term vanishes the generic eigenvector formula
/// `[l - c, b]` degenerates to the zero vector, so axis-aligned fallbacks
/// are picked instead.
pub fn eigen2(a: f64, b: f64, c: f64) -> Eigen2 {
    let tr = a + c;
    let det = a * c - b * b;
    let disc = (tr * tr - 4. * det).max(0.).sqrt();
    let l1 = (tr + disc) / 2.;
    let l2 = (tr - disc) / 2.;
    let vec = |l: f64| {
        if !b.is_tiny() {
            R2 { x: l - c, y: b }.unit()
        } else if !(a - l).near_zero(EPS) {
            R2 { x: 0., y: 1. }
        } else {
            R2 { x: 1., y: 0. }
        }
    };
    let e = Eigen2 { l1, l2, v1: vec(l1), v2: vec(l2) };
    debug!("eigen2({}, {}, {}): λ1={} v1={} λ2={} v2={}", a, b, c, e.l1, e.v1, e.l2, e.v2);
    e
}
