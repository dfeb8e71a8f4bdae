use serde::{Deserialize, Serialize};

use crate::analysis::AxisFrame;
use crate::math::is_zero::NearZero;
use crate::r2::R2;

/// Straight segment in world coordinates, ready for a plotting layer.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub p0: R2,
    pub p1: R2,
}

/// Directrix lines of a central conic: offset ±a²/c along the main axis,
/// extended ±range along the transverse direction. Empty when the conic
/// has no usable focal distance.
pub fn directrix_segments(center: &R2, frame: &AxisFrame, a: f64, c: f64, range: f64) -> Vec<Segment> {
    if a.is_tiny() || c.is_tiny() {
        return vec![];
    }
    let u = a * a / c;
    [-u, u]
        .iter()
        .map(|&u| Segment {
            p0: frame.to_world(center, u, -range),
            p1: frame.to_world(center, u, range),
        })
        .collect()
}

/// Asymptotes of a hyperbola: slope ±b/a in the canonical frame.
pub fn asymptote_segments(center: &R2, frame: &AxisFrame, a: f64, b: f64, range: f64) -> Vec<Segment> {
    if a.is_tiny() || b.is_tiny() {
        return vec![];
    }
    let slope = b / a;
    [-slope, slope]
        .iter()
        .map(|&s| Segment {
            p0: frame.to_world(center, -range, -s * range),
            p1: frame.to_world(center, range, s * range),
        })
        .collect()
}

/// Directrix of a parabola: the perpendicular to the axis through
/// vertex − focal_dist·axis.
pub fn parabola_directrix_segment(vertex: &R2, axis: &R2, focal_dist: f64, range: f64) -> Segment {
    let foot = *vertex - *axis * focal_dist;
    let along = axis.perp();
    Segment {
        p0: foot - along * range,
        p1: foot + along * range,
    }
}

/// The two principal-axis lines through the center.
pub fn axis_segments(center: &R2, frame: &AxisFrame, range: f64) -> [Segment; 2] {
    [
        Segment {
            p0: frame.to_world(center, -range, 0.),
            p1: frame.to_world(center, range, 0.),
        },
        Segment {
            p0: frame.to_world(center, 0., -range),
            p1: frame.to_world(center, 0., range),
        },
    ]
}
