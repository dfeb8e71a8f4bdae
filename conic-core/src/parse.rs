use log::debug;

use crate::coeffs::CoefficientSet;

/// Parser failure: terminal, the caller re-prompts for equation text
/// rather than retrying. Classification must not be attempted on it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("No recognizable terms in equation: {0:?}")]
    NoTerms(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Monomial {
    X2,
    Y2,
    Xy,
    X,
    Y,
}

/// One extracted term: signed coefficient plus the monomial it multiplies
/// (`None` for a bare constant).
#[derive(Debug, Clone, Copy, PartialEq)]
struct Term {
    coeff: f64,
    monomial: Option<Monomial>,
}

/// Parse a free-form general conic equation into {A, B, C, D, E, F}.
///
/// Accepts `=` (both sides are parsed and the right side subtracted),
/// implicit coefficients (`x^2`, `-y^2`, `xy`), parenthesized fractions
/// (`(1/9)*x^2`), and the restricted quadratic-fraction form `x^2/9`.
/// Division anywhere else is not part of the grammar.
///
/// The result is best-effort: a tuple with no degree-2 term is still
/// returned, and judging it is the classifier's job.
pub fn parse(input: &str) -> Result<CoefficientSet, ParseError> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '−' | '–' | '—' => '-',
            c => c,
        })
        .collect();

    let (lhs, rhs) = match normalized.split_once('=') {
        Some((l, r)) => (l, Some(r)),
        None => (normalized.as_str(), None),
    };

    let (mut coeffs, mut matched) = parse_side(lhs);
    if let Some(rhs) = rhs {
        let (r, r_matched) = parse_side(rhs);
        coeffs = CoefficientSet {
            a: coeffs.a - r.a,
            b: coeffs.b - r.b,
            c: coeffs.c - r.c,
            d: coeffs.d - r.d,
            e: coeffs.e - r.e,
            f: coeffs.f - r.f,
        };
        matched = matched || r_matched;
    }

    if !matched {
        return Err(ParseError::NoTerms(input.to_string()));
    }
    debug!("parse({:?}): {:?}", input, coeffs);
    Ok(coeffs)
}

/// Extract every term on one side of the equation; the bool reports whether
/// anything recognizable was found.
fn parse_side(s: &str) -> (CoefficientSet, bool) {
    let chars: Vec<char> = s.chars().collect();
    let mut coeffs = CoefficientSet::default();
    let mut matched = false;
    let mut i = 0;
    while i < chars.len() {
        match term_at(&chars, i) {
            Some((term, next)) => {
                accumulate(&mut coeffs, &term);
                matched = true;
                i = next;
            }
            None => {
                i += 1;
            }
        }
    }
    (coeffs, matched)
}

fn accumulate(coeffs: &mut CoefficientSet, term: &Term) {
    match term.monomial {
        Some(Monomial::X2) => coeffs.a += term.coeff,
        Some(Monomial::Y2) => coeffs.c += term.coeff,
        Some(Monomial::Xy) => coeffs.b += term.coeff,
        Some(Monomial::X) => coeffs.d += term.coeff,
        Some(Monomial::Y) => coeffs.e += term.coeff,
        None => coeffs.f += term.coeff,
    }
}

/// Try to match one term starting at `i`: an optional sign, an optional
/// coefficient (bare number or parenthesized expression), an optional `*`,
/// and an optional monomial. At least a coefficient or a monomial must be
/// present for the match to count.
fn term_at(chars: &[char], i: usize) -> Option<(Term, usize)> {
    let mut pos = i;
    let sign = match chars.get(pos) {
        Some('+') => {
            pos += 1;
            1.
        }
        Some('-') => {
            pos += 1;
            -1.
        }
        _ => 1.,
    };

    let coeff = match chars.get(pos) {
        Some('(') => match chars[pos..].iter().position(|&c| c == ')') {
            Some(close) => {
                let inner: String = chars[pos + 1..pos + close].iter().collect();
                pos += close + 1;
                Some(parse_number_expression(&inner))
            }
            None => None,
        },
        _ => match scan_number(chars, pos) {
            (Some(n), next) => {
                pos = next;
                Some(n)
            }
            _ => None,
        },
    };

    if chars.get(pos) == Some(&'*') && coeff.is_some() {
        pos += 1;
    }

    let monomial = match monomial_at(chars, pos) {
        Some((m, next)) => {
            pos = next;
            Some(m)
        }
        None => None,
    };

    let mut value = sign * coeff.unwrap_or(1.);

    // Restricted fraction grammar: a divisor is honored only directly after
    // a quadratic monomial ("x^2/9"), where it scales the term's coefficient.
    if matches!(monomial, Some(Monomial::X2) | Some(Monomial::Y2)) && chars.get(pos) == Some(&'/') {
        if let (Some(den), next) = scan_number(chars, pos + 1) {
            value /= if den == 0. { 1. } else { den };
            pos = next;
        }
    }

    // A bare sign with nothing behind it is not a term.
    if coeff.is_none() && monomial.is_none() {
        return None;
    }
    Some((Term { coeff: value, monomial }, pos))
}

fn monomial_at(chars: &[char], i: usize) -> Option<(Monomial, usize)> {
    let rest: String = chars[i..].iter().take(3).collect();
    for (token, monomial) in [
        ("x^2", Monomial::X2),
        ("y^2", Monomial::Y2),
        ("xy", Monomial::Xy),
        ("x", Monomial::X),
        ("y", Monomial::Y),
    ] {
        if rest.starts_with(token) {
            return Some((monomial, i + token.len()));
        }
    }
    None
}

/// Scan an unsigned numeric literal (digits with at most one `.`).
fn scan_number(chars: &[char], i: usize) -> (Option<f64>, usize) {
    let mut pos = i;
    let mut seen_dot = false;
    while let Some(&c) = chars.get(pos) {
        if c.is_ascii_digit() {
            pos += 1;
        } else if c == '.' && !seen_dot {
            seen_dot = true;
            pos += 1;
        } else {
            break;
        }
    }
    if pos == i || (pos == i + 1 && seen_dot) {
        return (None, i);
    }
    let lit: String = chars[i..pos].iter().collect();
    match lit.parse::<f64>() {
        Ok(v) if v.is_finite() => (Some(v), pos),
        _ => (Some(0.), pos),
    }
}

/// Resolve a parenthesized coefficient body: `a/b` fractions (zero
/// numerator and unit denominator fallbacks), bare decimals, bare signs.
/// Non-finite values coerce to 0.
fn parse_number_expression(s: &str) -> f64 {
    let s = s.trim();
    match s {
        "" | "+" => return 1.,
        "-" => return -1.,
        _ => {}
    }
    let v = match s.split_once('/') {
        Some((num, den)) => {
            let num = num.parse::<f64>().unwrap_or(0.);
            let den = match den.parse::<f64>() {
                Ok(d) if d != 0. => d,
                _ => 1.,
            };
            num / den
        }
        None => s.parse::<f64>().unwrap_or(0.),
    };
    if v.is_finite() {
        v
    } else {
        0.
    }
}
