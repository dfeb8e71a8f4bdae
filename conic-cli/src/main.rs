//! CLI for the conic classification engine.
//!
//! Provides:
//! - Free-text equation analysis (summary, derivation steps, or JSON)
//! - Canonical-form builders (ellipse / hyperbola / parabola)
//! - A file-backed example-equation list

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use log::debug;

use conic_core::{
    classify, derivation_text, fmt::fmt_num, ConicAnalysis, ExampleStore, Examples, OpensTowards,
    Orientation,
};

#[derive(Parser)]
#[command(name = "conic")]
#[command(about = "Classify and canonicalize second-degree planar curves", long_about = None)]
struct Cli {
    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a free-text general-form equation
    Analyze {
        /// Equation text, e.g. "5x^2 - 6xy + 5y^2 - 32 = 0"
        equation: String,

        /// Print the full analysis record as JSON
        #[arg(long)]
        json: bool,

        /// Print the step-by-step derivation
        #[arg(long)]
        steps: bool,
    },

    /// Build a conic from canonical parameters and analyze it
    #[command(subcommand)]
    Canonical(CanonicalCommand),

    /// Manage the saved example-equation list
    Examples {
        /// Storage file for the example list
        #[arg(long, default_value = "conic-examples.json")]
        file: PathBuf,

        #[command(subcommand)]
        action: ExamplesAction,
    },
}

#[derive(Subcommand)]
enum CanonicalCommand {
    /// (x−h)²/a² + (y−k)²/b² = 1
    Ellipse {
        a: f64,
        b: f64,
        #[arg(default_value = "0")]
        h: f64,
        #[arg(default_value = "0")]
        k: f64,
        #[arg(long)]
        json: bool,
    },

    /// (x−h)²/a² − (y−k)²/b² = 1, or the vertical variant
    Hyperbola {
        a: f64,
        b: f64,
        #[arg(default_value = "0")]
        h: f64,
        #[arg(default_value = "0")]
        k: f64,
        /// Transverse axis along y instead of x
        #[arg(long)]
        vertical: bool,
        #[arg(long)]
        json: bool,
    },

    /// (y−k)² = ±4p(x−h) or (x−h)² = ±4p(y−k)
    Parabola {
        p: f64,
        #[arg(default_value = "0")]
        h: f64,
        #[arg(default_value = "0")]
        k: f64,
        /// Opening direction
        #[arg(long, value_enum, default_value = "right")]
        opens: Opens,
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
enum Opens {
    Right,
    Left,
    Up,
    Down,
}

impl From<Opens> for OpensTowards {
    fn from(opens: Opens) -> Self {
        match opens {
            Opens::Right => OpensTowards::Right,
            Opens::Left => OpensTowards::Left,
            Opens::Up => OpensTowards::Up,
            Opens::Down => OpensTowards::Down,
        }
    }
}

#[derive(Subcommand)]
enum ExamplesAction {
    /// List saved example equations
    List,
    /// Add an equation to the front of the list
    Add { equation: String },
}

/// `ExampleStore` over a single JSON file, the CLI's stand-in for the
/// browser-local storage the web UI uses.
struct JsonFileStore {
    path: PathBuf,
}

impl ExampleStore for JsonFileStore {
    fn load(&self, key: &str) -> Option<Vec<String>> {
        let raw = fs::read_to_string(&self.path).ok()?;
        let mut entries: HashMap<String, Vec<String>> = serde_json::from_str(&raw).ok()?;
        entries.remove(key)
    }
    fn save(&mut self, key: &str, examples: &[String]) {
        let mut entries: HashMap<String, Vec<String>> = fs::read_to_string(&self.path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        entries.insert(key.to_string(), examples.to_vec());
        if let Ok(raw) = serde_json::to_string_pretty(&entries) {
            if let Err(err) = fs::write(&self.path, raw) {
                eprintln!("Failed to persist examples to {}: {}", self.path.display(), err);
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(conic_core::parse_log_level(cli.log_level.as_deref()))
        .parse_default_env()
        .init();

    match cli.command {
        Commands::Analyze { equation, json, steps } => {
            let coeffs = conic_core::parse(&equation)
                .with_context(|| format!("unable to parse equation {:?}", equation))?;
            debug!("parsed {:?} -> {:?}", equation, coeffs);
            let analysis = classify(&coeffs);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else if steps {
                println!("{}", derivation_text(&coeffs, &analysis));
            } else {
                print_summary(&analysis);
            }
        }
        Commands::Canonical(cmd) => {
            let (coeffs, json) = match cmd {
                CanonicalCommand::Ellipse { a, b, h, k, json } => {
                    (conic_core::ellipse(a, b, h, k)?, json)
                }
                CanonicalCommand::Hyperbola { a, b, h, k, vertical, json } => {
                    let orientation = if vertical { Orientation::Vertical } else { Orientation::Horizontal };
                    (conic_core::hyperbola(a, b, h, k, orientation)?, json)
                }
                CanonicalCommand::Parabola { p, h, k, opens, json } => {
                    (conic_core::parabola(p, h, k, opens.into())?, json)
                }
            };
            let analysis = classify(&coeffs);
            if json {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                println!("General form: {}", coeffs);
                print_summary(&analysis);
            }
        }
        Commands::Examples { file, action } => {
            let mut examples = Examples::load(JsonFileStore { path: file });
            match action {
                ExamplesAction::List => {
                    for (i, equation) in examples.list().iter().enumerate() {
                        println!("{:2}. {}", i + 1, equation);
                    }
                }
                ExamplesAction::Add { equation } => {
                    examples.add(&equation);
                    println!("Added. {} examples saved.", examples.list().len());
                }
            }
        }
    }
    Ok(())
}

fn print_summary(analysis: &ConicAnalysis) {
    println!("Type: {}{}", analysis.conic_type, if analysis.degenerate { " (degenerate)" } else { "" });
    println!("Discriminant: {}", fmt_num(analysis.discriminant));
    if let Some(center) = analysis.center {
        println!("Center: {}", center);
    }
    if let Some(vertex) = analysis.vertex {
        println!("Vertex: {}", vertex);
    }
    if let Some(angle) = analysis.angle_deg {
        println!("Axis rotation: {}°", fmt_num(angle));
    }
    if let (Some(a), Some(b)) = (analysis.a, analysis.b) {
        println!("Semi-axes: a = {}, b = {}", fmt_num(a), fmt_num(b));
    }
    if let Some(c) = analysis.c {
        println!("Linear eccentricity: c = {}", fmt_num(c));
    }
    if let Some(e) = analysis.e {
        println!("Eccentricity: e = {}", fmt_num(e));
    }
    if let Some([f1, f2]) = analysis.foci {
        println!("Foci: {} and {}", f1, f2);
    }
    if let Some(focus) = analysis.focus {
        println!("Focus: {}", focus);
    }
    if let Some(focal_dist) = analysis.focal_dist {
        println!("Focal distance: {}", fmt_num(focal_dist));
    }
    if let Some(lr) = analysis.latus_rectum {
        println!("Latus rectum: {}", fmt_num(lr));
    }
}
