use std::f64::consts::PI;

pub trait Fmt {
    fn s(&self, n: usize) -> String;
}

impl Fmt for f64 {
    fn s(&self, n: usize) -> String {
        let rendered = format!("{:.1$}", self, n);
        format!("{}{}", if rendered.starts_with('-') { "" } else { " " }, rendered)
    }
}

/// Render a number the way the derivation text wants it: exact integers
/// without a decimal point, everything else trimmed to 3 decimals.
pub fn fmt_num(x: f64) -> String {
    let rounded = x.round();
    if (x - rounded).abs() < 1e-9 && rounded.abs() < 1e15 {
        format!("{}", rounded as i64)
    } else {
        let s = format!("{:.3}", x);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

pub trait Deg {
    fn deg(&self) -> Self;
    fn deg_str(&self) -> String;
}

impl Deg for f64 {
    fn deg(&self) -> f64 {
        self * 180.0 / PI
    }
    fn deg_str(&self) -> String {
        format!("{}°", fmt_num(self.deg()))
    }
}
