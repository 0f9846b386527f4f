use crate::cli::OutputFormat;
use crate::error::Result;
use acnpot::core::forcefield::term::EnergyTerm;
use acnpot::engine::results::{Property, PropertyValue};
use acnpot::workflows::evaluate::EvaluationOutcome;
use acnpot::workflows::gradient_check::GradientReport;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt::Write as _;

#[derive(Serialize)]
struct FrameReport<'a> {
    frame: usize,
    energy_terms: &'a EnergyTerm,
    #[serde(flatten)]
    properties: BTreeMap<Property, PropertyValue>,
}

#[derive(Serialize)]
struct EvaluationReport<'a> {
    layout: String,
    frames: Vec<FrameReport<'a>>,
}

pub fn render_evaluation(
    outcome: &EvaluationOutcome,
    format: OutputFormat,
    include_forces: bool,
) -> Result<String> {
    let requested: &[Property] = if include_forces {
        &Property::ALL
    } else {
        &[Property::Energy]
    };

    match format {
        OutputFormat::Json => {
            let report = EvaluationReport {
                layout: outcome.layout.to_string(),
                frames: outcome
                    .frames
                    .iter()
                    .map(|frame| FrameReport {
                        frame: frame.index,
                        energy_terms: frame.results.energy_terms(),
                        properties: frame.results.properties(requested),
                    })
                    .collect(),
            };
            Ok(serde_json::to_string_pretty(&report)?)
        }
        OutputFormat::Text => {
            let mut out = String::new();
            let _ = writeln!(out, "Molecule layout: {}", outcome.layout);
            let _ = writeln!(
                out,
                "{:>6}  {:>16}  {:>16}  {:>16}  {:>16}",
                "frame", "energy (eV)", "coulomb", "vdw", "embedding"
            );
            for frame in &outcome.frames {
                let terms = frame.results.energy_terms();
                let _ = writeln!(
                    out,
                    "{:>6}  {:>16.8}  {:>16.8}  {:>16.8}  {:>16.8}",
                    frame.index,
                    terms.total(),
                    terms.coulomb,
                    terms.vdw,
                    terms.embedding
                );
                if include_forces {
                    for (atom, f) in frame.results.forces().iter().enumerate() {
                        let _ = writeln!(
                            out,
                            "        atom {:>5}  {:>14.8} {:>14.8} {:>14.8}",
                            atom, f.x, f.y, f.z
                        );
                    }
                }
            }
            Ok(out)
        }
    }
}

pub fn render_gradient_report(report: &GradientReport, tolerance: f64) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Atoms checked:     {}", report.analytic.len());
    let _ = writeln!(out, "Max deviation:     {:.3e} eV/Å", report.max_deviation);
    if let Some(atom) = report.worst_atom {
        let a = report.analytic[atom];
        let n = report.numeric[atom];
        let _ = writeln!(out, "Worst atom:        {}", atom);
        let _ = writeln!(out, "  analytic:        {:.8} {:.8} {:.8}", a.x, a.y, a.z);
        let _ = writeln!(out, "  numeric:         {:.8} {:.8} {:.8}", n.x, n.y, n.z);
    }
    let verdict = if report.passes(tolerance) { "PASS" } else { "FAIL" };
    let _ = writeln!(out, "Result:            {} (tolerance {:.1e})", verdict, tolerance);
    out
}
