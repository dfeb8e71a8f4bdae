use std::fmt::{Display, Formatter, self};

use derive_more::From;
use serde::{Deserialize, Serialize};

use crate::math::is_zero::{NearZero, EPS};
use crate::r2::R2;

/// General-form conic: Ax² + Bxy + Cy² + Dx + Ey + F = 0.
#[derive(Debug, Copy, Clone, Default, From, PartialEq, Serialize, Deserialize)]
pub struct CoefficientSet {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl From<[f64; 6]> for CoefficientSet {
    fn from([a, b, c, d, e, f]: [f64; 6]) -> Self {
        CoefficientSet { a, b, c, d, e, f }
    }
}

impl CoefficientSet {
    /// Δ = B² − 4AC, the conic-family invariant.
    pub fn discriminant(&self) -> f64 {
        self.b * self.b - 4. * self.a * self.c
    }

    /// Value of the quadratic form at a point.
    pub fn eval(&self, p: &R2) -> f64 {
        self.a * p.x * p.x + self.b * p.x * p.y + self.c * p.y * p.y + self.d * p.x + self.e * p.y + self.f
    }

    /// At least one degree-2 coefficient must be non-zero for a valid conic.
    pub fn has_quadratic_term(&self) -> bool {
        !self.a.is_tiny() || !self.b.is_tiny() || !self.c.is_tiny()
    }

    pub fn scale(&self, k: f64) -> CoefficientSet {
        CoefficientSet {
            a: self.a * k,
            b: self.b * k,
            c: self.c * k,
            d: self.d * k,
            e: self.e * k,
            f: self.f * k,
        }
    }
}

impl Display for CoefficientSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (coeff, mono) in [
            (self.a, "x²"),
            (self.b, "xy"),
            (self.c, "y²"),
            (self.d, "x"),
            (self.e, "y"),
            (self.f, ""),
        ] {
            if coeff.near_zero(EPS) && !(mono.is_empty() && first) {
                continue;
            }
            let sign = if coeff < 0. { "-" } else if first { "" } else { "+" };
            let mag = coeff.abs();
            if !first {
                write!(f, " {} ", sign)?;
            } else {
                write!(f, "{}", sign)?;
            }
            if mono.is_empty() || !(mag - 1.).near_zero(EPS) {
                write!(f, "{}", crate::fmt::fmt_num(mag))?;
            }
            write!(f, "{}", mono)?;
            first = false;
        }
        write!(f, " = 0")
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum CanonicalError {
    #[error("Semi-axes must be non-zero: a={a}, b={b}")]
    ZeroSemiAxis { a: f64, b: f64 },

    #[error("Focal parameter p must be non-zero")]
    ZeroFocalParameter,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Horizontal,
    Vertical,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum OpensTowards {
    Right,
    Left,
    Up,
    Down,
}

/// (x−h)²/a² + (y−k)²/b² = 1, cleared to general form.
pub fn ellipse(a: f64, b: f64, h: f64, k: f64) -> Result<CoefficientSet, CanonicalError> {
    if a.is_tiny() || b.is_tiny() {
        return Err(CanonicalError::ZeroSemiAxis { a, b });
    }
    let a2 = a * a;
    let b2 = b * b;
    Ok(CoefficientSet {
        a: b2,
        b: 0.,
        c: a2,
        d: -2. * h * b2,
        e: -2. * k * a2,
        f: h * h * b2 + k * k * a2 - a2 * b2,
    })
}

/// (x−h)²/a² − (y−k)²/b² = 1 (horizontal) or (y−k)²/a² − (x−h)²/b² = 1 (vertical).
pub fn hyperbola(a: f64, b: f64, h: f64, k: f64, orientation: Orientation) -> Result<CoefficientSet, CanonicalError> {
    if a.is_tiny() || b.is_tiny() {
        return Err(CanonicalError::ZeroSemiAxis { a, b });
    }
    let a2 = a * a;
    let b2 = b * b;
    Ok(match orientation {
        Orientation::Horizontal => CoefficientSet {
            a: b2,
            b: 0.,
            c: -a2,
            d: -2. * h * b2,
            e: 2. * k * a2,
            f: h * h * b2 - k * k * a2 - a2 * b2,
        },
        Orientation::Vertical => CoefficientSet {
            a: -a2,
            b: 0.,
            c: b2,
            d: 2. * h * a2,
            e: -2. * k * b2,
            f: -h * h * a2 + k * k * b2 - a2 * b2,
        },
    })
}

/// (y−k)² = ±4p(x−h) or (x−h)² = ±4p(y−k), cleared to general form.
pub fn parabola(p: f64, h: f64, k: f64, opens: OpensTowards) -> Result<CoefficientSet, CanonicalError> {
    if p.is_tiny() {
        return Err(CanonicalError::ZeroFocalParameter);
    }
    let four_p = 4. * p;
    Ok(match opens {
        OpensTowards::Right => CoefficientSet {
            a: 0.,
            b: 0.,
            c: 1.,
            d: -four_p,
            e: -2. * k,
            f: k * k + four_p * h,
        },
        OpensTowards::Left => CoefficientSet {
            a: 0.,
            b: 0.,
            c: 1.,
            d: four_p,
            e: -2. * k,
            f: k * k - four_p * h,
        },
        OpensTowards::Up => CoefficientSet {
            a: 1.,
            b: 0.,
            c: 0.,
            d: -2. * h,
            e: -four_p,
            f: h * h + four_p * k,
        },
        OpensTowards::Down => CoefficientSet {
            a: 1.,
            b: 0.,
            c: 0.,
            d: -2. * h,
            e: four_p,
            f: h * h - four_p * k,
        },
    })
}
