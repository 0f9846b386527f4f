use acnpot::core::forcefield::term::EnergyTerm;
use acnpot::engine::progress::{Progress, ProgressCallback};
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::Duration;

const SPINNER_TICK_MS: u64 = 100;

/// Renders workflow events as a single stderr line.
///
/// A spinner covers setup phases; once frames start it becomes a bar whose message
/// carries the energy split of the last evaluated frame.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stderr());
        bar.finish_and_clear();
        Self { bar }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let handler = self.clone();
        Box::new(move |event| handler.apply(event))
    }

    fn apply(&self, event: Progress) {
        let bar = &self.bar;
        match event {
            Progress::PhaseStart { name } => {
                bar.reset();
                bar.set_length(0);
                bar.set_style(spinner_style());
                bar.set_message(name);
                bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
            }
            Progress::PhaseFinish => {
                bar.disable_steady_tick();
                bar.finish_and_clear();
            }
            Progress::FramesStart { total } => {
                bar.disable_steady_tick();
                bar.reset();
                bar.set_style(frames_style());
                bar.set_length(total);
                bar.set_message("");
            }
            Progress::FrameDone {
                energy,
                pairs_in_range,
                ..
            } => {
                bar.inc(1);
                bar.set_message(frame_summary(&energy, pairs_in_range));
            }
            Progress::FramesFinish => bar.finish_and_clear(),
            Progress::Message(note) if bar.is_finished() => bar.set_message(note),
            Progress::Message(note) => bar.println(format!("  {note}")),
        }
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn frame_summary(energy: &EnergyTerm, pairs_in_range: usize) -> String {
    let mut summary = format!(
        "E = {:.6} eV (coul {:.4}, vdw {:.4}",
        energy.total(),
        energy.coulomb,
        energy.vdw
    );
    if energy.embedding != 0.0 {
        summary.push_str(&format!(", embed {:.4}", energy.embedding));
    }
    summary.push_str(&format!("), {pairs_in_range} pairs"));
    summary
}

fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.green} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}

fn frames_style() -> ProgressStyle {
    ProgressStyle::with_template("frames [{bar:30.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}
