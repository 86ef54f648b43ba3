//! Per-system timing

use std::time::{Duration, Instant};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SystemTiming {
    pub name: String,
    pub last: Duration,
    pub total: Duration,
    pub calls: u64,
}

/// Timings of named systems, kept in first-seen order.
#[derive(Debug, Default)]
pub struct SystemProfiler {
    timings: Vec<SystemTiming>,
}

impl SystemProfiler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn time_system<F, R>(&mut self, name: &str, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        let start = Instant::now();
        let result = f();
        let elapsed = start.elapsed();

        let timing = match self.timings.iter().position(|t| t.name == name) {
            Some(i) => &mut self.timings[i],
            None => {
                self.timings.push(SystemTiming {
                    name: name.to_owned(),
                    ..SystemTiming::default()
                });
                let last = self.timings.len() - 1;
                &mut self.timings[last]
            }
        };
        timing.last = elapsed;
        timing.total += elapsed;
        timing.calls += 1;
        result
    }

    pub fn last(&self, name: &str) -> Duration {
        self.find(name).map(|t| t.last).unwrap_or_default()
    }

    pub fn total(&self, name: &str) -> Duration {
        self.find(name).map(|t| t.total).unwrap_or_default()
    }

    pub fn calls(&self, name: &str) -> u64 {
        self.find(name).map(|t| t.calls).unwrap_or_default()
    }

    pub fn reset(&mut self) {
        self.timings.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &SystemTiming> {
        self.timings.iter()
    }

    fn find(&self, name: &str) -> Option<&SystemTiming> {
        self.timings.iter().find(|t| t.name == name)
    }
}
