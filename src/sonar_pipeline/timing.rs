//! Stage timing for pipeline runs

use std::fmt::Write as _;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct StageTiming {
    pub name: String,
    pub duration: Duration,
}

/// Ordered stage durations of one pipeline run
#[derive(Debug, Default, Clone)]
pub struct PipelineTimings {
    stages: Vec<StageTiming>,
}

impl PipelineTimings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_stage(&mut self, name: impl Into<String>, duration: Duration) {
        self.stages.push(StageTiming {
            name: name.into(),
            duration,
        });
    }

    /// Appends every stage of `other` after the current ones.
    pub fn extend(&mut self, other: PipelineTimings) {
        self.stages.extend(other.stages);
    }

    /// Times `f` and records it under `name`.
    pub fn measure<T>(&mut self, name: &str, f: impl FnOnce() -> T) -> T {
        let timer = Timer::start(name);
        let out = f();
        let (name, duration) = timer.stop();
        self.add_stage(name, duration);
        out
    }

    pub fn total_duration(&self) -> Duration {
        self.stages.iter().map(|s| s.duration).sum()
    }

    /// Summed duration of every stage called `name`.
    pub fn get_stage(&self, name: &str) -> Option<Duration> {
        let mut matching = self.stages.iter().filter(|s| s.name == name).peekable();
        matching.peek()?;
        Some(matching.map(|s| s.duration).sum())
    }

    pub fn stages(&self) -> &[StageTiming] {
        &self.stages
    }

    /// Table of stage durations and their share of the total.
    pub fn summary(&self) -> String {
        let total = self.total_duration();
        let mut out = String::new();
        let _ = writeln!(out, "Pipeline Timing Summary:");
        let _ = writeln!(out, "{:-<60}", "");
        for stage in &self.stages {
            let percentage = if total.as_secs_f64() > 0.0 {
                (stage.duration.as_secs_f64() / total.as_secs_f64()) * 100.0
            } else {
                0.0
            };
            let _ = writeln!(
                out,
                "{:<30} {:>12.3}ms ({:>5.1}%)",
                stage.name,
                stage.duration.as_secs_f64() * 1000.0,
                percentage
            );
        }
        let _ = writeln!(out, "{:-<60}", "");
        let _ = writeln!(out, "{:<30} {:>12.3}ms", "Total", total.as_secs_f64() * 1000.0);
        out
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: impl Into<String>) -> Self {
        Self {
            start: Instant::now(),
            name: name.into(),
        }
    }

    pub fn stop(self) -> (String, Duration) {
        (self.name, self.start.elapsed())
    }
}
