use std::{ops::{Sub, Mul, Add, Div, Neg}, fmt::{Display, Formatter, self}};
use approx::{AbsDiffEq, RelativeEq};

use derive_more::From;
use serde::{Deserialize, Serialize};

/// Point / vector in the plane.
#[derive(Debug, Copy, Clone, Default, From, PartialEq, Serialize, Deserialize)]
pub struct R2 {
    pub x: f64,
    pub y: f64,
}

impl R2 {
    pub fn new(x: f64, y: f64) -> Self {
        R2 { x, y }
    }
    pub fn dot(&self, o: &R2) -> f64 {
        self.x * o.x + self.y * o.y
    }
    pub fn norm(&self) -> f64 {
        self.x.hypot(self.y)
    }
    /// Unit vector in the same direction; falls back to the input when the norm vanishes.
    pub fn unit(&self) -> R2 {
        let n = self.norm();
        if n == 0. { *self } else { *self / n }
    }
    /// 90° counter-clockwise rotation.
    pub fn perp(&self) -> R2 {
        R2 { x: -self.y, y: self.x }
    }
    pub fn distance(&self, o: &R2) -> f64 {
        (*self - *o).norm()
    }
}

impl Display for R2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl AbsDiffEq for R2 {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for R2 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}

impl Add for R2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x + rhs.x,
            y: self.y + rhs.y,
        }
    }
}

impl Sub for R2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        R2 {
            x: self.x - rhs.x,
            y: self.y - rhs.y,
        }
    }
}

impl Mul<f64> for R2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        R2 {
            x: self.x * rhs,
            y: self.y * rhs,
        }
    }
}

impl Div<f64> for R2 {
    type Output = Self;
    fn div(self, rhs: f64) -> Self::Output {
        R2 {
            x: self.x / rhs,
            y: self.y / rhs,
        }
    }
}

impl Neg for R2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        R2 { x: -self.x, y: -self.y }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dot_perp() {
        let v = R2 { x: 3., y: 4. };
        assert_relative_eq!(v.norm(), 5.);
        assert_relative_eq!(v.dot(&v.perp()), 0.);
        assert_relative_eq!(v.unit().norm(), 1.);
    }

    #[test]
    fn test_ops() {
        let a = R2 { x: 1., y: 2. };
        let b = R2 { x: 3., y: -1. };
        assert_relative_eq!(a + b, R2 { x: 4., y: 1. });
        assert_relative_eq!(a - b, R2 { x: -2., y: 3. });
        assert_relative_eq!(a * 2., R2 { x: 2., y: 4. });
        assert_relative_eq!(-a / 2., R2 { x: -0.5, y: -1. });
    }
}
