//! # ceq-cli — Entry Point for the Computational Equivalence Engine
//!
//! The engine is a library; this crate only provides the `ceq` binary,
//! which prints the banner below. Analyses are run through
//! [`ceq_engine::EquivalenceEngine`] from Rust code.

use std::io::Write;

use anyhow::{Context, Result};

use ceq_engine::{format_percent, Calibration};

/// Engine version reported in the banner.
pub const ENGINE_VERSION: &str = env!("CARGO_PKG_VERSION");

const RULE: &str = "============================================================";

const NOTICE: &str = "\
WARNING: do not deploy this engine autonomously.

Output is raw algorithmic output with no legal authority. Every
classification must be verified by a qualified legal professional
before it is relied upon; classifying foreign law without review by
locally licensed counsel may constitute unauthorized practice of law.

Cite: King, Jason C. (2026). Computational Equivalence: A Structured
Methodology (Working Paper v3.0). https://zenodo.org/records/18119046";

/// Write the static banner, including the active calibration thresholds.
pub fn write_banner<W: Write>(out: &mut W, calibration: &Calibration) -> Result<()> {
    writeln!(out, "Computational Equivalence Engine v{ENGINE_VERSION}")
        .and_then(|()| writeln!(out, "{RULE}"))
        .and_then(|()| writeln!(out, "{NOTICE}"))
        .and_then(|()| writeln!(out, "{RULE}"))
        .and_then(|()| {
            writeln!(
                out,
                "Convergence floor: {}%  Standard: >{}%  Strong: >{}%",
                format_percent(calibration.convergence_floor),
                format_percent(calibration.standard_floor),
                format_percent(calibration.strong_floor),
            )
        })
        .and_then(|()| writeln!(out, "\nEngine initialized successfully."))
        .and_then(|()| writeln!(out, "Ready for pilot data."))
        .context("failed to write banner")
}
