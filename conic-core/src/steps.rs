use itertools::Itertools;

use crate::analysis::{ConicAnalysis, ConicType};
use crate::coeffs::CoefficientSet;
use crate::fmt::fmt_num;
use crate::math::is_zero::EPS;

impl std::fmt::Display for ConicType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ConicType::Circle => "circle",
            ConicType::Ellipse => "ellipse",
            ConicType::Parabola => "parabola",
            ConicType::Hyperbola => "hyperbola",
            ConicType::Unknown => "unknown",
        };
        write!(f, "{}", name)
    }
}

/// Step-by-step derivation of the canonical form, one entry per step.
/// Formula text is plain; the consumer decides how to render it.
pub fn derivation_steps(coeffs: &CoefficientSet, analysis: &ConicAnalysis) -> Vec<String> {
    let &CoefficientSet { a, b, c, d, e, f } = coeffs;
    let mut steps = vec![format!(
        "1. General equation: {}x² + {}xy + {}y² + {}x + {}y + {} = 0",
        fmt_num(a), fmt_num(b), fmt_num(c), fmt_num(d), fmt_num(e), fmt_num(f),
    )];

    let disc = analysis.discriminant;
    let relation = if disc > EPS {
        "> 0"
    } else if disc < -EPS {
        "< 0"
    } else {
        "≈ 0"
    };
    steps.push(format!(
        "2. Invariant Δ = B² − 4AC = {}. Since Δ {}, the curve is a {}.",
        fmt_num(disc), relation, analysis.conic_type,
    ));

    match analysis.conic_type {
        ConicType::Parabola => parabola_steps(analysis, &mut steps),
        ConicType::Unknown => steps.push("The equation has no degree-2 term; not a conic.".to_string()),
        _ => central_steps(coeffs, analysis, &mut steps),
    }
    steps
}

/// The full derivation as one printable block.
pub fn derivation_text(coeffs: &CoefficientSet, analysis: &ConicAnalysis) -> String {
    derivation_steps(coeffs, analysis).iter().join("\n")
}

fn central_steps(coeffs: &CoefficientSet, analysis: &ConicAnalysis, steps: &mut Vec<String>) {
    let center = match analysis.center {
        Some(center) => center,
        None => return,
    };
    steps.push(format!(
        "3. Translation: center (x₀, y₀) = ({}, {}).",
        fmt_num(center.x), fmt_num(center.y),
    ));
    if let Some(rhs) = analysis.rhs {
        steps.push(format!(
            "   After the translation: {}x'² + {}x'y' + {}y'² + {} = 0",
            fmt_num(coeffs.a), fmt_num(coeffs.b), fmt_num(coeffs.c), fmt_num(-rhs),
        ));
        if let (Some(frame), Some(angle)) = (analysis.frame, analysis.angle_deg) {
            steps.push(format!(
                "4. Rotation by α ≈ {}°: {}(x″)² + {}(y″)² + {} = 0",
                fmt_num(angle), fmt_num(frame.l1), fmt_num(frame.l2), fmt_num(-rhs),
            ));
        }
    }
    if analysis.degenerate {
        steps.push("Degenerate conic: the locus collapses to a point or a line pair.".to_string());
        return;
    }
    if let (Some(a), Some(b), Some(frame)) = (analysis.a, analysis.b, analysis.frame) {
        let sign = if frame.l1 * frame.l2 < 0. { "−" } else { "+" };
        steps.push(format!(
            "5. Canonical equation: (x″)²/{} {} (y″)²/{} = 1",
            fmt_num(a * a), sign, fmt_num(b * b),
        ));
    }
}

fn parabola_steps(analysis: &ConicAnalysis, steps: &mut Vec<String>) {
    let (vertex, angle) = match (analysis.vertex, analysis.angle_deg) {
        (Some(v), Some(a)) => (v, a),
        _ => {
            steps.push("Degenerate parabola: a pair of parallel lines (or no real locus).".to_string());
            return;
        }
    };
    steps.push(format!("3. Rotation by α ≈ {}° aligns the axis of symmetry.", fmt_num(angle)));
    steps.push(format!(
        "4. Translation: vertex at ({}, {}).",
        fmt_num(vertex.x), fmt_num(vertex.y),
    ));
    if let Some(focal_dist) = analysis.focal_dist {
        // p = −E′/λ, which is four times the vertex-to-focus distance.
        let p = 4. * focal_dist;
        steps.push(format!("5. Canonical equation: (x″)² = {}y″", fmt_num(p)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::classify;
    use crate::parse::parse;

    fn steps_for(input: &str) -> Vec<String> {
        let coeffs = parse(input).unwrap();
        derivation_steps(&coeffs, &classify(&coeffs))
    }

    #[test]
    fn test_ellipse_steps() {
        let steps = steps_for("x^2/9 + y^2/4 = 1");
        assert_eq!(steps.len(), 6);
        assert!(steps[1].contains("ellipse"));
        assert!(steps[2].contains("(0, 0)"));
        assert!(steps[5].contains("(x″)²/9 + (y″)²/4 = 1"));
    }

    #[test]
    fn test_hyperbola_steps() {
        let steps = steps_for("x^2 - y^2 = 4");
        assert!(steps[1].contains("hyperbola"));
        assert!(steps.last().unwrap().contains("−"));
    }

    #[test]
    fn test_parabola_steps() {
        let steps = steps_for("y^2 = 16x");
        assert!(steps[1].contains("parabola"));
        assert!(steps[3].contains("(0, 0)"));
        assert!(steps[4].contains("(x″)² = 16y″"));
    }

    #[test]
    fn test_degenerate_steps() {
        let coeffs = parse("x^2 - 4 = 0").unwrap();
        let steps = derivation_steps(&coeffs, &classify(&coeffs));
        assert!(steps.last().unwrap().contains("Degenerate"));
    }
}
