//! Classification and canonicalization of general second-degree planar
//! curves (conics), plus the free-text equation parser that feeds it.
//!
//! The engine is a pure computation: text → [parse] → [CoefficientSet] →
//! [classify] → [ConicAnalysis]. Rendering, UI, and persistence backends
//! are external consumers of the analysis record.

#[cfg_attr(not(test), allow(unused_imports))]
#[macro_use]
extern crate approx;

pub mod math;

pub mod analysis;
pub mod coeffs;
pub mod examples;
pub mod fmt;
pub mod geom;
pub mod parse;
pub mod r2;
pub mod steps;

// Re-export key types for external use
pub use analysis::{classify, AxisFrame, ConicAnalysis, ConicType};
pub use coeffs::{ellipse, hyperbola, parabola, CanonicalError, CoefficientSet, OpensTowards, Orientation};
pub use examples::{equation_library, ExampleStore, Examples, MemoryStore, DEFAULT_EXAMPLES};
pub use geom::{asymptote_segments, axis_segments, directrix_segments, parabola_directrix_segment, Segment};
pub use parse::{parse, ParseError};
pub use r2::R2;
pub use steps::{derivation_steps, derivation_text};

/// Parse a log level string into LevelFilter.
pub fn parse_log_level(level: Option<&str>) -> log::LevelFilter {
    match level {
        Some("error") => log::LevelFilter::Error,
        Some("warn") => log::LevelFilter::Warn,
        Some("info") | Some("") | None => log::LevelFilter::Info,
        Some("debug") => log::LevelFilter::Debug,
        Some("trace") => log::LevelFilter::Trace,
        Some(level) => panic!("invalid log level: {}", level),
    }
}
