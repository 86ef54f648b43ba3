//! Named event counters

use std::collections::BTreeMap;

/// Monotonic counters keyed by static names; iteration is alphabetical.
#[derive(Debug, Default)]
pub struct Counter {
    counters: BTreeMap<&'static str, u64>,
}

impl Counter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, name: &'static str, value: u64) {
        *self.counters.entry(name).or_insert(0) += value;
    }

    pub fn get(&self, name: &str) -> u64 {
        self.counters.get(name).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counters.iter().map(|(name, value)| (*name, *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_accumulate_per_name() {
        let mut counter = Counter::new();
        counter.increment("candies_eaten", 1);
        counter.increment("candies_eaten", 2);
        counter.increment("candies_spawned", 5);

        assert_eq!(counter.get("candies_eaten"), 3);
        assert_eq!(counter.get("missing"), 0);
        let names: Vec<_> = counter.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["candies_eaten", "candies_spawned"]);
    }
}
