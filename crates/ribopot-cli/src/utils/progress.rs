use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use ribopot::engine::progress::{Progress, ProgressCallback};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

const SPINNER_TICK_MS: u64 = 80;
const SPINNER_TEMPLATE: &str = "{spinner:.green} {msg}";
const BATCH_TEMPLATE: &str =
    "{prefix:>14.bold} [{bar:30.cyan/blue}] {pos}/{len} structures ({elapsed})";

/// Batches and structures seen by a handler since it was created.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BatchTally {
    pub batches: u64,
    pub structures: u64,
}

#[derive(Debug, Default)]
struct State {
    phase: Option<&'static str>,
    tally: BatchTally,
}

/// Renders workflow progress on stderr: a spinner per phase and one bar per batch
/// of structures, labelled with the batch (group) name.
#[derive(Clone)]
pub struct CliProgressHandler {
    bar: ProgressBar,
    state: Arc<Mutex<State>>,
}

impl CliProgressHandler {
    pub fn new() -> Self {
        Self::with_draw_target(ProgressDrawTarget::stderr())
    }

    fn with_draw_target(target: ProgressDrawTarget) -> Self {
        let bar = ProgressBar::with_draw_target(Some(0), target).with_style(style(SPINNER_TEMPLATE));
        bar.finish_and_clear();
        Self {
            bar,
            state: Arc::new(Mutex::new(State::default())),
        }
    }

    pub fn tally(&self) -> BatchTally {
        self.state
            .lock()
            .map(|s| s.tally)
            .unwrap_or_else(|poisoned| poisoned.into_inner().tally)
    }

    pub fn get_callback(&self) -> ProgressCallback<'static> {
        let bar = self.bar.clone();
        let state = self.state.clone();

        Box::new(move |progress: Progress| {
            let Ok(mut state) = state.lock() else {
                warn!("Progress state mutex was poisoned. Cannot update progress.");
                return;
            };

            match progress {
                Progress::PhaseStart { name } => {
                    state.phase = Some(name);
                    bar.reset();
                    bar.set_length(0);
                    bar.set_prefix("");
                    bar.set_style(style(SPINNER_TEMPLATE));
                    bar.set_message(name);
                    bar.enable_steady_tick(Duration::from_millis(SPINNER_TICK_MS));
                }
                Progress::PhaseFinish => {
                    bar.disable_steady_tick();
                    let phase = state.phase.take().unwrap_or("Done");
                    bar.finish_with_message(format!("✓ {}", phase));
                }
                Progress::BatchStart {
                    label,
                    total_structures,
                } => {
                    state.tally.batches += 1;
                    bar.disable_steady_tick();
                    bar.reset();
                    bar.set_length(total_structures);
                    bar.set_style(style(BATCH_TEMPLATE).progress_chars("=> "));
                    bar.set_prefix(label);
                    bar.set_message("");
                }
                Progress::StructureDone => {
                    state.tally.structures += 1;
                    bar.inc(1);
                }
                Progress::BatchFinish => {
                    if let Some(length) = bar.length() {
                        bar.set_position(length);
                    }
                    bar.finish();
                }
                Progress::Message(msg) => {
                    if bar.is_finished() {
                        bar.set_message(msg);
                    } else {
                        bar.println(format!("  {}", msg));
                    }
                }
            }
        })
    }
}

impl Default for CliProgressHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template).unwrap_or_else(|e| {
        warn!("Invalid progress template '{}': {}", template, e);
        ProgressStyle::default_bar()
    })
}
