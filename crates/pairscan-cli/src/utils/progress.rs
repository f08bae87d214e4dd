use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use pairscan::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;

/// Renders engine progress events on stderr: a bar per structure set, query scan or
/// alignment check.
#[derive(Clone)]
pub struct CliProgressHandler {
    pb: Arc<Mutex<ProgressBar>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_target(ProgressDrawTarget::stderr())
    }

    fn with_target(target: ProgressDrawTarget) -> Self {
        let pb = ProgressBar::with_draw_target(Some(0), target).with_style(Self::spinner_style());
        pb.finish_and_clear();
        Self {
            pb: Arc::new(Mutex::new(pb)),
        }
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let pb_clone = self.pb.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut pb_guard) = pb_clone.lock() else {
                warn!("Progress bar mutex was poisoned. Cannot update progress.");
                return;
            };
            let pb = &mut *pb_guard;

            match progress {
                Progress::IndexBuildStart { total_structures } => {
                    Self::start_bar(pb, total_structures, "Indexing");
                }
                Progress::StructureIndexed { name, entries } => {
                    pb.set_message(format!("{name} ({entries} pairs)"));
                    pb.inc(1);
                }
                Progress::IndexBuildFinish { cells, entries } => {
                    pb.finish_with_message(format!("✓ Indexed {entries} pairs in {cells} cells"));
                }
                Progress::ScanStart { total_cells } => {
                    Self::start_bar(pb, total_cells, "Scanning");
                }
                Progress::CellScanned | Progress::PositionChecked => {
                    pb.inc(1);
                }
                Progress::ScanFinish { matches } => {
                    pb.finish_with_message(format!("✓ {matches} matches"));
                }
                Progress::CheckStart { total_positions } => {
                    Self::start_bar(pb, total_positions, "Checking");
                }
                Progress::CheckFinish => {
                    pb.finish_with_message("✓ Done");
                }
                Progress::Message(msg) => {
                    if pb.is_finished() {
                        pb.set_style(Self::spinner_style());
                        pb.set_message(msg);
                    } else {
                        pb.println(format!("  {msg}"));
                    }
                }
            }
        })
    }

    fn start_bar(pb: &mut ProgressBar, total: u64, label: &'static str) {
        pb.disable_steady_tick();
        pb.reset();
        pb.set_length(total);
        pb.set_position(0);
        pb.set_style(Self::bar_style());
        pb.set_message(label);
        if total == 0 {
            pb.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::with_template("{spinner:.green} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::with_template("{msg:<24} [{bar:40.cyan/blue}] {pos}/{len} ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .with_key("eta", |state: &ProgressState, w: &mut dyn std::fmt::Write| {
                let _ = write!(w, "{:.1}s", state.eta().as_secs_f64());
            })
            .progress_chars("##-")
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}
