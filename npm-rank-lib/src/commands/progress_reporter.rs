use crate::facts::Progress;
use core::fmt::{Debug, Formatter};
use core::sync::atomic::{AtomicBool, Ordering};
use core::time::Duration;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::sync::{Arc, Mutex};
use std::time::Instant;
use tokio::task::JoinHandle;

type ProgressCallback = Box<dyn Fn() -> (u64, u64, String) + Send + Sync>;

/// Refresh rate for progress updates (10 Hz).
const REFRESH_INTERVAL: Duration = Duration::from_millis(100);

const SPINNER_TICKS: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Shared between the reporter and its refresh task.
struct State {
    visible_after: Instant,
    visible: AtomicBool,
    indeterminate: AtomicBool,
    phase_started: Mutex<Instant>,
    callback: Mutex<ProgressCallback>,
}

impl State {
    fn restart_phase(&self) {
        if let Ok(mut started) = self.phase_started.lock() {
            *started = Instant::now();
        }
    }

    fn phase_elapsed(&self) -> Duration {
        self.phase_started.lock().map(|started| started.elapsed()).unwrap_or_default()
    }

    fn poll(&self) -> (u64, u64, String) {
        self.callback
            .lock()
            .map_or_else(|_| (0, 0, String::new()), |callback| callback())
    }

    fn set_callback(&self, callback: ProgressCallback) {
        if let Ok(mut current) = self.callback.lock() {
            *current = callback;
        }
    }
}

/// A stderr progress bar that stays hidden unless the work outlasts a delay.
///
/// Quick rankings finish without ever drawing anything.
#[derive(Clone)]
pub struct ProgressReporter {
    bar: ProgressBar,
    state: Arc<State>,
    refresh_task: Arc<JoinHandle<()>>,
    use_colors: bool,
}

impl ProgressReporter {
    /// Create a reporter that becomes visible after `delay`.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(delay: Duration, use_colors: bool) -> Self {
        let bar = ProgressBar::hidden();

        let state = Arc::new(State {
            visible_after: Instant::now() + delay,
            visible: AtomicBool::new(false),
            indeterminate: AtomicBool::new(true),
            phase_started: Mutex::new(Instant::now()),
            callback: Mutex::new(Box::new(|| (0, 0, String::new()))),
        });

        Self {
            refresh_task: Arc::new(tokio::spawn(refresh_task(bar.clone(), Arc::clone(&state)))),
            bar,
            state,
            use_colors,
        }
    }

    fn style(&self, determinate: bool) -> ProgressStyle {
        let template = match (determinate, self.use_colors) {
            (true, true) => "{prefix:>10.bold.cyan} [{bar:25}] {msg}",
            (true, false) => "{prefix:>10} [{bar:25}] {msg}",
            (false, true) => "{prefix:>10.bold.cyan} {spinner} {msg}",
            (false, false) => "{prefix:>10} {spinner} {msg}",
        };

        let style = if determinate {
            ProgressStyle::default_bar().progress_chars("=> ")
        } else {
            ProgressStyle::default_spinner().tick_strings(SPINNER_TICKS)
        };

        style.template(template).unwrap_or_else(|_| ProgressStyle::default_bar())
    }
}

impl Progress for ProgressReporter {
    fn set_phase(&self, phase: &str) {
        self.bar.set_prefix(phase.to_string());
        self.state.restart_phase();
    }

    fn set_determinate(&self, callback: Box<dyn Fn() -> (u64, u64, String) + Send + Sync + 'static>) {
        self.state.set_callback(callback);
        self.state.indeterminate.store(false, Ordering::Relaxed);
        self.bar.disable_steady_tick();
        self.bar.set_length(0);
        self.bar.set_position(0);
        self.bar.set_style(self.style(true));
    }

    fn set_indeterminate(&self, callback: Box<dyn Fn() -> String + Send + Sync + 'static>) {
        self.state.set_callback(Box::new(move || (0, 0, callback())));
        self.state.restart_phase();
        self.state.indeterminate.store(true, Ordering::Relaxed);
        self.bar.enable_steady_tick(REFRESH_INTERVAL);
        self.bar.set_style(self.style(false));
    }

    fn done(&self) {
        self.refresh_task.abort();
        if self.state.visible.load(Ordering::Relaxed) {
            self.bar.finish_and_clear();
        }
    }
}

impl Debug for ProgressReporter {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ProgressReporter")
            .field("bar", &self.bar)
            .field("visible", &self.state.visible)
            .field("refresh_task", &"<task>")
            .field("use_colors", &self.use_colors)
            .finish_non_exhaustive()
    }
}

/// Reveal the bar once the delay passes, then keep its message current.
async fn refresh_task(bar: ProgressBar, state: Arc<State>) {
    let mut interval = tokio::time::interval(REFRESH_INTERVAL);
    #[expect(clippy::infinite_loop, reason = "task runs until aborted")]
    loop {
        let _ = interval.tick().await;

        if !state.visible.load(Ordering::Relaxed) {
            if Instant::now() < state.visible_after {
                continue;
            }
            state.visible.store(true, Ordering::Relaxed);
            bar.set_draw_target(ProgressDrawTarget::stderr_with_hz(10));
        }

        let (length, position, mut message) = state.poll();
        if state.indeterminate.load(Ordering::Relaxed) {
            message = format!("{}s: {message}", state.phase_elapsed().as_secs());
        }

        if length > 0 {
            bar.set_length(length);
            bar.set_position(position);
        }
        bar.set_message(message);
    }
}
