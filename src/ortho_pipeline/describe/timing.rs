use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use tracing::info;

#[derive(Debug, Clone, Default)]
pub struct StepTotal {
    pub calls: u32,
    pub duration: Duration,
}

/// Accumulated time per pipeline step over a whole run
#[derive(Debug, Default)]
pub struct RunTimings {
    steps: BTreeMap<String, StepTotal>,
}

impl RunTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_step(&mut self, name: impl Into<String>, duration: Duration) {
        let total = self.steps.entry(name.into()).or_default();
        total.calls += 1;
        total.duration += duration;
    }

    pub fn total_duration(&self) -> Duration {
        self.steps.values().map(|s| s.duration).sum()
    }

    pub fn get_step(&self, name: &str) -> Option<&StepTotal> {
        self.steps.get(name)
    }

    pub fn log_summary(&self) {
        let total = self.total_duration();
        for (name, step) in &self.steps {
            let percentage = if total.as_secs_f64() > 0.0 {
                (step.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            info!(
                "{:<20} {:>5} calls {:>12.3}ms ({:>5.1}%)",
                name,
                step.calls,
                step.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        info!("{:<20} {:>24.3}ms", "total", total.as_secs_f64() * 1000.0);
    }
}

pub struct Timer {
    start: Instant,
    name: &'static str,
}

impl Timer {
    pub fn start(name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            name,
        }
    }

    pub fn stop(self) -> (&'static str, Duration) {
        (self.name, self.start.elapsed())
    }
}
