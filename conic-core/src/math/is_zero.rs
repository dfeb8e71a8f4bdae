/// Tolerance for type decisions and degeneracy checks.
pub const EPS: f64 = 1e-9;
/// Tighter tolerance for semi-axis denominators.
pub const EPS_TIGHT: f64 = 1e-12;

pub trait NearZero {
    fn near_zero(&self, eps: f64) -> bool;
    fn is_tiny(&self) -> bool;
}

impl NearZero for f64 {
    fn near_zero(&self, eps: f64) -> bool {
        self.abs() < eps
    }
    fn is_tiny(&self) -> bool {
        self.near_zero(EPS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_near_zero() {
        assert!(0_f64.is_tiny());
        assert!((-1e-10).is_tiny());
        assert!(!1e-8_f64.is_tiny());
        assert!(1e-10_f64.near_zero(EPS));
        assert!(!1e-10_f64.near_zero(EPS_TIGHT));
    }
}
