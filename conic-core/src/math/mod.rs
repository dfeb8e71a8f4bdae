pub mod eigen;
pub mod is_zero;
