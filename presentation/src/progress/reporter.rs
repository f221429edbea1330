//! Progress reporting for decision cycle execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use pacekeeper_application::ports::progress::{CyclePhase, CycleProgress};
use std::sync::Mutex;

/// Reports progress during cycle execution with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn phase_display_name(phase: &CyclePhase) -> &'static str {
        match phase {
            CyclePhase::Assess => "Phase 1: Assess",
            CyclePhase::Council => "Phase 2: Council",
            CyclePhase::Finalize => "Phase 3: Finalize",
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl CycleProgress for ProgressReporter {
    fn on_phase_start(&self, phase: &CyclePhase, total_tasks: usize) {
        let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
        pb.set_style(Self::phase_style());
        pb.set_prefix(Self::phase_display_name(phase));
        pb.set_message("Starting...");

        if let Ok(mut bar) = self.phase_bar.lock() {
            *bar = Some(pb);
        }
    }

    fn on_profile_complete(&self, _phase: &CyclePhase, profile: &str, degraded: bool) {
        if let Ok(bar) = self.phase_bar.lock()
            && let Some(pb) = bar.as_ref()
        {
            let status = if degraded {
                format!("{} {} (template)", "~".yellow(), profile)
            } else {
                format!("{} {}", "v".green(), profile)
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &CyclePhase) {
        if let Ok(mut bar) = self.phase_bar.lock()
            && let Some(pb) = bar.take()
        {
            pb.finish_with_message(format!(
                "{} complete",
                Self::phase_display_name(phase).green()
            ));
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl CycleProgress for SimpleProgress {
    fn on_phase_start(&self, phase: &CyclePhase, total_tasks: usize) {
        println!(
            "{} {} ({} steps)",
            "->".cyan(),
            ProgressReporter::phase_display_name(phase).bold(),
            total_tasks
        );
    }

    fn on_profile_complete(&self, _phase: &CyclePhase, profile: &str, degraded: bool) {
        if degraded {
            println!("   {} {} (template rationale)", "~".yellow(), profile);
        } else {
            println!("   {} {}", "v".green(), profile);
        }
    }

    fn on_phase_complete(&self, phase: &CyclePhase) {
        println!(
            "{} {} complete",
            "<-".cyan(),
            ProgressReporter::phase_display_name(phase)
        );
    }
}
