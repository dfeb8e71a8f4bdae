use log::debug;
use nalgebra::{Matrix2, Vector2};
use serde::{Deserialize, Serialize};

use crate::coeffs::CoefficientSet;
use crate::fmt::Deg;
use crate::math::eigen::{eigen2, Eigen2};
use crate::math::is_zero::{NearZero, EPS, EPS_TIGHT};
use crate::r2::R2;

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConicType {
    Circle,
    Ellipse,
    Parabola,
    Hyperbola,
    Unknown,
}

/// Orthonormal principal-axis basis with its eigenvalue pair.
///
/// Axis 1 is always the "primary" axis: transverse axis for hyperbolas,
/// major axis for ellipses/circles, the λ≠0 direction for parabolas.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisFrame {
    pub v1: R2,
    pub v2: R2,
    pub l1: f64,
    pub l2: f64,
}

impl AxisFrame {
    /// Map canonical coordinates (u along axis 1, v along axis 2) into
    /// world coordinates.
    pub fn to_world(&self, center: &R2, u: f64, v: f64) -> R2 {
        *center + self.v1 * u + self.v2 * v
    }
}

/// Full analysis of one general-form conic. Pure value object: every call
/// to [classify] builds a fresh record, and fields that do not apply to
/// the detected type (or that a degeneracy makes meaningless) stay `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConicAnalysis {
    pub coeffs: CoefficientSet,
    #[serde(rename = "type")]
    pub conic_type: ConicType,
    pub discriminant: f64,
    pub degenerate: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub center: Option<R2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertex: Option<R2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frame: Option<AxisFrame>,
    /// −F′: the right-hand side after translating to the center.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rhs: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub a: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub b: Option<f64>,
    /// Linear eccentricity: center-to-focus distance.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e: Option<f64>,
    /// Rotation of axis 1 from the x axis, degrees.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_deg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foci: Option<[R2; 2]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focus: Option<R2>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub focal_dist: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latus_rectum: Option<f64>,
}

impl ConicAnalysis {
    fn new(coeffs: CoefficientSet, conic_type: ConicType) -> Self {
        ConicAnalysis {
            coeffs,
            conic_type,
            discriminant: coeffs.discriminant(),
            degenerate: false,
            center: None,
            vertex: None,
            frame: None,
            rhs: None,
            a2: None,
            b2: None,
            a: None,
            b: None,
            c: None,
            e: None,
            angle_deg: None,
            foci: None,
            focus: None,
            focal_dist: None,
            latus_rectum: None,
        }
    }
}

/// Fix the (eigenvalue, eigenvector) ordering so downstream formulas can
/// assume axis 1 is the transverse/major axis:
/// - hyperbola: axis 1's eigenvalue carries the same sign as the RHS,
/// - ellipse/circle: axis 1 has the smaller-magnitude eigenvalue.
/// Pairs are always swapped together.
pub fn order_axes(conic_type: ConicType, eig: Eigen2, rhs: f64) -> Eigen2 {
    let swap = match conic_type {
        ConicType::Hyperbola => eig.l1 / rhs < 0.,
        ConicType::Ellipse => eig.l1.abs() > eig.l2.abs(),
        _ => false,
    };
    if swap {
        Eigen2 { l1: eig.l2, l2: eig.l1, v1: eig.v2, v2: eig.v1 }
    } else {
        eig
    }
}

/// Classify and canonicalize a general-form conic. Pure function: never
/// panics for finite input; degenerate geometry surfaces as the
/// `degenerate` flag with the affected fields left `None`.
pub fn classify(coeffs: &CoefficientSet) -> ConicAnalysis {
    if !coeffs.has_quadratic_term() {
        let mut analysis = ConicAnalysis::new(*coeffs, ConicType::Unknown);
        analysis.degenerate = true;
        return analysis;
    }

    let disc = coeffs.discriminant();
    let conic_type = if disc.near_zero(EPS) {
        ConicType::Parabola
    } else if disc > 0. {
        ConicType::Hyperbola
    } else if (coeffs.a - coeffs.c).near_zero(EPS) && coeffs.b.near_zero(EPS) {
        ConicType::Circle
    } else {
        ConicType::Ellipse
    };
    debug!("classify({}): Δ={}, type={:?}", coeffs, disc, conic_type);

    match conic_type {
        ConicType::Parabola => classify_parabola(coeffs),
        _ => classify_central(coeffs, conic_type),
    }
}

/// Ellipse / circle / hyperbola: translate to the center, rotate to the
/// principal axes, read the semi-axes off the eigenvalues.
fn classify_central(coeffs: &CoefficientSet, conic_type: ConicType) -> ConicAnalysis {
    let mut analysis = ConicAnalysis::new(*coeffs, conic_type);
    let &CoefficientSet { a, b, c, d, e, f: _ } = coeffs;

    // Zero gradient of the quadratic form: [[2A, B], [B, 2C]]·center = −[D, E].
    let m = Matrix2::new(2. * a, b, b, 2. * c);
    let center = if m.determinant().is_tiny() {
        // No unique center: a line-pair case that Δ mislabeled as central.
        analysis.degenerate = true;
        R2::new(0., 0.)
    } else {
        match m.try_inverse() {
            Some(inv) => {
                let s = inv * Vector2::new(-d, -e);
                R2::new(s.x, s.y)
            }
            None => {
                analysis.degenerate = true;
                R2::new(0., 0.)
            }
        }
    };
    analysis.center = Some(center);

    // Constant term after translating to the center.
    let f_prime = coeffs.eval(&center);
    let rhs = -f_prime;
    analysis.rhs = Some(rhs);

    let eig = order_axes(conic_type, eigen2(a, b / 2., c), rhs);
    analysis.angle_deg = Some(eig.v1.y.atan2(eig.v1.x).deg());

    let frame = AxisFrame { v1: eig.v1, v2: eig.v2, l1: eig.l1, l2: eig.l2 };
    analysis.frame = Some(frame);

    if rhs.is_tiny() {
        // Point or intersecting-line pair: no finite axes to report.
        analysis.degenerate = true;
        return analysis;
    }
    if analysis.degenerate {
        // Singular center matrix: the origin fallback is not trustworthy
        // geometry, so no axes either.
        return analysis;
    }

    let a2 = if eig.l1.near_zero(EPS_TIGHT) { None } else { Some(rhs / eig.l1) };
    let b2 = if eig.l2.near_zero(EPS_TIGHT) { None } else { Some(rhs / eig.l2) };
    analysis.a2 = a2;
    analysis.b2 = b2;

    if let (Some(a2), Some(b2)) = (a2, b2) {
        let semi_a = a2.abs().sqrt();
        let semi_b = b2.abs().sqrt();
        analysis.a = Some(semi_a);
        analysis.b = Some(semi_b);
        let lin_ecc = match conic_type {
            ConicType::Hyperbola => (semi_a * semi_a + semi_b * semi_b).sqrt(),
            _ => (semi_a * semi_a - semi_b * semi_b).abs().sqrt(),
        };
        analysis.c = Some(lin_ecc);
        if conic_type == ConicType::Hyperbola && !semi_a.is_tiny() {
            analysis.latus_rectum = Some(2. * semi_b * semi_b / semi_a);
        }
        if !semi_a.is_tiny() {
            analysis.e = Some(lin_ecc / semi_a);
        }
        analysis.foci = Some([
            frame.to_world(&center, lin_ecc, 0.),
            frame.to_world(&center, -lin_ecc, 0.),
        ]);
    }
    analysis
}

/// Parabola: rotate the linear part into the principal frame, complete the
/// square along the λ≠0 axis, translate along the other.
fn classify_parabola(coeffs: &CoefficientSet) -> ConicAnalysis {
    let mut analysis = ConicAnalysis::new(*coeffs, ConicType::Parabola);
    let &CoefficientSet { a, b, c, d, e, f } = coeffs;

    let eig = eigen2(a, b / 2., c);
    // Main axis: the eigenvector whose eigenvalue survived; the other one
    // is the direction the parabola opens along.
    let (lambda, v_main, v_axis) = if !eig.l1.is_tiny() {
        (eig.l1, eig.v1, eig.v2)
    } else {
        (eig.l2, eig.v2, eig.v1)
    };
    analysis.frame = Some(AxisFrame { v1: v_main, v2: v_axis, l1: lambda, l2: 0. });

    // Linear coefficients in the principal frame.
    let lin = R2::new(d, e);
    let d_prime = lin.dot(&v_main);
    let e_prime = lin.dot(&v_axis);
    debug!("parabola: λ={}, D'={}, E'={}", lambda, d_prime, e_prime);

    if e_prime.near_zero(EPS) || lambda.is_tiny() {
        // Parallel-line pair (or no real locus): vertex/focus are undefined.
        analysis.degenerate = true;
        return analysis;
    }

    // λu² + D'u + E'v + F = 0, completed square at u = −D'/(2λ).
    let u_vertex = -d_prime / (2. * lambda);
    let v_vertex = (d_prime * d_prime - 4. * lambda * f) / (4. * lambda * e_prime);
    let vertex = v_main * u_vertex + v_axis * v_vertex;
    let focal_dist = -e_prime / (2. * lambda) / 2.;
    analysis.vertex = Some(vertex);
    analysis.focal_dist = Some(focal_dist);
    analysis.focus = Some(vertex + v_axis * focal_dist);
    analysis.e = Some(1.);
    analysis.angle_deg = Some(v_axis.y.atan2(v_axis.x).deg());
    analysis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coeffs;
    use crate::parse::parse;
    use test_log::test;

    fn analyze(input: &str) -> ConicAnalysis {
        classify(&parse(input).unwrap())
    }

    #[test]
    fn test_circle() {
        let analysis = analyze("x^2 + y^2 = 25");
        assert_eq!(analysis.conic_type, ConicType::Circle);
        assert!(!analysis.degenerate);
        assert_relative_eq!(analysis.center.unwrap(), R2::new(0., 0.));
        assert_relative_eq!(analysis.a.unwrap(), 5.);
        assert_relative_eq!(analysis.b.unwrap(), 5.);
        assert_relative_eq!(analysis.c.unwrap(), 0.);
        assert_relative_eq!(analysis.e.unwrap(), 0.);
    }

    #[test]
    fn test_shifted_circle() {
        // x² + y² − 6x + 4y − 12 = 0: center (3, −2), r = 5
        let analysis = analyze("x^2 + y^2 - 6x + 4y - 12 = 0");
        assert_eq!(analysis.conic_type, ConicType::Circle);
        assert_relative_eq!(analysis.center.unwrap(), R2::new(3., -2.));
        assert_relative_eq!(analysis.a.unwrap(), 5.);
    }

    #[test]
    fn test_axis_aligned_ellipse() {
        let analysis = analyze("x^2/9 + y^2/4 = 1");
        assert_eq!(analysis.conic_type, ConicType::Ellipse);
        assert_relative_eq!(analysis.center.unwrap(), R2::new(0., 0.));
        assert_relative_eq!(analysis.a.unwrap(), 3.);
        assert_relative_eq!(analysis.b.unwrap(), 2.);
        // Major axis along x
        let frame = analysis.frame.unwrap();
        assert_relative_eq!(frame.v1.y, 0.);
        let c = analysis.c.unwrap();
        assert_relative_eq!(c, 5_f64.sqrt());
        assert_relative_eq!(analysis.e.unwrap(), 5_f64.sqrt() / 3.);
    }

    #[test]
    fn test_rotated_ellipse() {
        // 5x² − 6xy + 5y² − 32 = 0: axes at 45°, a = 4, b = 2
        let analysis = analyze("5x^2 - 6xy + 5y^2 - 32 = 0");
        assert_eq!(analysis.conic_type, ConicType::Ellipse);
        assert_relative_eq!(analysis.center.unwrap(), R2::new(0., 0.), epsilon = 1e-9);
        assert_relative_eq!(analysis.a.unwrap(), 4.);
        assert_relative_eq!(analysis.b.unwrap(), 2.);
        let frame = analysis.frame.unwrap();
        assert_relative_eq!(frame.v1.x.abs(), frame.v1.y.abs(), epsilon = 1e-12);
        assert_relative_eq!(frame.v1.dot(&frame.v2), 0., epsilon = 1e-12);
    }

    #[test]
    fn test_hyperbola() {
        let analysis = analyze("x^2 - y^2 = 4");
        assert_eq!(analysis.conic_type, ConicType::Hyperbola);
        assert_relative_eq!(analysis.a.unwrap(), 2.);
        assert_relative_eq!(analysis.b.unwrap(), 2.);
        assert_relative_eq!(analysis.c.unwrap(), 2. * 2_f64.sqrt());
        assert_relative_eq!(analysis.e.unwrap(), 2_f64.sqrt());
        assert_relative_eq!(analysis.latus_rectum.unwrap(), 4.);
        // Transverse axis along x, so the foci sit at (±2√2, 0)
        let [f1, f2] = analysis.foci.unwrap();
        assert_relative_eq!(f1.y, 0., epsilon = 1e-12);
        assert_relative_eq!(f1.x.abs(), 2. * 2_f64.sqrt());
        assert_relative_eq!(f2.x, -f1.x);
    }

    #[test]
    fn test_rotated_hyperbola() {
        // xy = 8: transverse axis along (1, 1), a = b = 4
        let analysis = analyze("xy = 8");
        assert_eq!(analysis.conic_type, ConicType::Hyperbola);
        assert_relative_eq!(analysis.a.unwrap(), 4.);
        assert_relative_eq!(analysis.b.unwrap(), 4.);
        let frame = analysis.frame.unwrap();
        // Axis 1's eigenvalue must match the RHS sign
        assert!(frame.l1 * analysis.rhs.unwrap() > 0.);
        assert_relative_eq!(frame.v1.x.abs(), frame.v1.y.abs(), epsilon = 1e-12);
    }

    #[test]
    fn test_parabola() {
        let analysis = analyze("y^2 = 16x");
        assert_eq!(analysis.conic_type, ConicType::Parabola);
        assert!(!analysis.degenerate);
        assert_relative_eq!(analysis.vertex.unwrap(), R2::new(0., 0.));
        assert_relative_eq!(analysis.focal_dist.unwrap(), 4.);
        assert_relative_eq!(analysis.focus.unwrap(), R2::new(4., 0.));
        assert_relative_eq!(analysis.e.unwrap(), 1.);
    }

    #[test]
    fn test_shifted_parabola() {
        // y² − 8x − 6y + 17 = 0 ⇒ (y−3)² = 8(x−1): vertex (1, 3), p = 2
        let analysis = analyze("y^2 - 8x - 6y + 17 = 0");
        assert_eq!(analysis.conic_type, ConicType::Parabola);
        assert_relative_eq!(analysis.vertex.unwrap(), R2::new(1., 3.), epsilon = 1e-9);
        assert_relative_eq!(analysis.focal_dist.unwrap(), 2.);
        assert_relative_eq!(analysis.focus.unwrap(), R2::new(3., 3.), epsilon = 1e-9);
    }

    #[test]
    fn test_rotated_parabola() {
        // x² − 2xy + y² − 8x − 8y = 0: axis along the diagonal
        let analysis = analyze("x^2 - 2xy + y^2 - 8x - 8y = 0");
        assert_eq!(analysis.conic_type, ConicType::Parabola);
        assert!(!analysis.degenerate);
        let vertex = analysis.vertex.unwrap();
        let focus = analysis.focus.unwrap();
        // Both lie on the curve's symmetry diagonal y = x
        assert_relative_eq!(vertex.x, vertex.y, epsilon = 1e-9);
        assert_relative_eq!(focus.x, focus.y, epsilon = 1e-9);
        // Vertex is on the curve
        assert_relative_eq!(analysis.coeffs.eval(&vertex), 0., epsilon = 1e-6);
    }

    #[test]
    fn test_degenerate_point() {
        // x² + y² = 0: single point at the origin
        let analysis = classify(&CoefficientSet::from([1., 0., 1., 0., 0., 0.]));
        assert!(analysis.degenerate);
        assert!(analysis.a.is_none());
        assert!(analysis.foci.is_none());
    }

    #[test]
    fn test_degenerate_repeated_root() {
        // x² = 0: repeated-line "parabola"
        let analysis = classify(&CoefficientSet::from([1., 0., 0., 0., 0., 0.]));
        assert_eq!(analysis.conic_type, ConicType::Parabola);
        assert!(analysis.degenerate);
        assert!(analysis.vertex.is_none());
        assert!(analysis.focus.is_none());
    }

    #[test]
    fn test_parallel_lines() {
        // x² − 4 = 0: two vertical lines, Δ = 0 but no E′ term
        let analysis = classify(&CoefficientSet::from([1., 0., 0., 0., 0., -4.]));
        assert_eq!(analysis.conic_type, ConicType::Parabola);
        assert!(analysis.degenerate);
    }

    #[test]
    fn test_unknown() {
        let analysis = classify(&CoefficientSet::from([0., 0., 0., 2., 3., -6.]));
        assert_eq!(analysis.conic_type, ConicType::Unknown);
        assert!(analysis.degenerate);
    }

    #[test]
    fn test_order_axes_table() {
        let eig = Eigen2 {
            l1: 4.,
            l2: -1.,
            v1: R2::new(1., 0.),
            v2: R2::new(0., 1.),
        };
        // Hyperbola with negative RHS: axis 1 must flip to the negative eigenvalue
        let h = order_axes(ConicType::Hyperbola, eig.clone(), -2.);
        assert_relative_eq!(h.l1, -1.);
        assert_relative_eq!(h.v1, R2::new(0., 1.));
        // Positive RHS: ordering already matches
        let h = order_axes(ConicType::Hyperbola, eig.clone(), 2.);
        assert_relative_eq!(h.l1, 4.);
        // Ellipse: smaller-magnitude eigenvalue first
        let eig = Eigen2 {
            l1: 9.,
            l2: 4.,
            v1: R2::new(1., 0.),
            v2: R2::new(0., 1.),
        };
        let e = order_axes(ConicType::Ellipse, eig, 36.);
        assert_relative_eq!(e.l1, 4.);
        assert_relative_eq!(e.v1, R2::new(0., 1.));
        assert_relative_eq!(e.l2, 9.);
    }

    #[test]
    fn test_scaling_invariance() {
        let base = parse("2x^2 + 7xy + 3y^2 + 8x + 14y - 6 = 0").unwrap();
        let reference = classify(&base);
        for k in [0.5, 2., 137.] {
            let scaled = classify(&base.scale(k));
            assert_eq!(scaled.conic_type, reference.conic_type);
            assert_relative_eq!(scaled.center.unwrap(), reference.center.unwrap(), epsilon = 1e-9);
            assert_relative_eq!(scaled.e.unwrap(), reference.e.unwrap(), epsilon = 1e-9);
            let f0 = reference.frame.unwrap();
            let f1 = scaled.frame.unwrap();
            // Axis unit vectors identical up to sign
            assert_relative_eq!(f0.v1.dot(&f1.v1).abs(), 1., epsilon = 1e-9);
            assert_relative_eq!(f0.v2.dot(&f1.v2).abs(), 1., epsilon = 1e-9);
        }
    }

    #[test]
    fn test_ellipse_focal_sum() {
        // Sum of focal distances is 2a everywhere on the ellipse.
        let analysis = analyze("5x^2 - 6xy + 5y^2 - 32 = 0");
        let frame = analysis.frame.unwrap();
        let center = analysis.center.unwrap();
        let (a, b) = (analysis.a.unwrap(), analysis.b.unwrap());
        let [f1, f2] = analysis.foci.unwrap();
        for i in 0..12 {
            let t = i as f64 / 12. * std::f64::consts::TAU;
            let p = frame.to_world(&center, a * t.cos(), b * t.sin());
            assert_relative_eq!(p.distance(&f1) + p.distance(&f2), 2. * a, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_hyperbola_focal_difference() {
        // |d(P, F1) − d(P, F2)| is 2a on both branches.
        let analysis = analyze("9x^2 - 16y^2 - 18x - 64y - 199 = 0");
        assert_eq!(analysis.conic_type, ConicType::Hyperbola);
        let frame = analysis.frame.unwrap();
        let center = analysis.center.unwrap();
        let (a, b) = (analysis.a.unwrap(), analysis.b.unwrap());
        let [f1, f2] = analysis.foci.unwrap();
        for i in -5..=5 {
            let t = i as f64 / 3.;
            for branch in [1., -1.] {
                let p = frame.to_world(&center, branch * a * t.cosh(), b * t.sinh());
                assert_relative_eq!(
                    (p.distance(&f1) - p.distance(&f2)).abs(),
                    2. * a,
                    epsilon = 1e-7
                );
            }
        }
    }

    #[test]
    fn test_builder_roundtrip() {
        let coeffs = coeffs::ellipse(3., 2., 0., 0.).unwrap();
        let analysis = classify(&coeffs);
        assert_eq!(analysis.conic_type, ConicType::Ellipse);
        assert_relative_eq!(analysis.a.unwrap(), 3., max_relative = 1e-6);
        assert_relative_eq!(analysis.b.unwrap(), 2., max_relative = 1e-6);
        assert_relative_eq!(analysis.center.unwrap(), R2::new(0., 0.), epsilon = 1e-9);

        let coeffs = coeffs::hyperbola(2., 3., 1., -1., coeffs::Orientation::Vertical).unwrap();
        let analysis = classify(&coeffs);
        assert_eq!(analysis.conic_type, ConicType::Hyperbola);
        assert_relative_eq!(analysis.a.unwrap(), 2., max_relative = 1e-6);
        assert_relative_eq!(analysis.b.unwrap(), 3., max_relative = 1e-6);
        assert_relative_eq!(analysis.center.unwrap(), R2::new(1., -1.), epsilon = 1e-9);

        let coeffs = coeffs::parabola(2., 1., 3., coeffs::OpensTowards::Right).unwrap();
        let analysis = classify(&coeffs);
        assert_eq!(analysis.conic_type, ConicType::Parabola);
        assert_relative_eq!(analysis.vertex.unwrap(), R2::new(1., 3.), epsilon = 1e-9);
        assert_relative_eq!(analysis.focal_dist.unwrap(), 2., max_relative = 1e-9);
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let analysis = classify(&CoefficientSet::from([1., 0., 0., 0., 0., 0.]));
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type"], "parabola");
        assert_eq!(json["degenerate"], true);
        assert!(json.get("focus").is_none());
        assert!(json.get("vertex").is_none());

        let json = serde_json::to_value(classify(&parse("x^2 + y^2 = 25").unwrap())).unwrap();
        assert_eq!(json["type"], "circle");
        assert_eq!(json["a"], 5.);
    }

    #[test]
    fn test_circle_family_property() {
        // A = C, B = D = E = 0, F < 0 is always a circle of radius √(−F).
        for f in [-1., -2.5, -100.] {
            let analysis = classify(&CoefficientSet::from([1., 0., 1., 0., 0., f]));
            assert_eq!(analysis.conic_type, ConicType::Circle);
            assert_relative_eq!(analysis.center.unwrap(), R2::new(0., 0.));
            assert_relative_eq!(analysis.a.unwrap(), (-f).sqrt());
            assert_relative_eq!(analysis.b.unwrap(), (-f).sqrt());
        }
    }
}
