//! Per-reason counters for batch reports

use std::collections::BTreeMap;
use std::fmt;

/// Counts of failed units keyed by a stable reason label
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    counts: BTreeMap<&'static str, usize>,
}

impl Tally {
    /// Create an empty tally
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one occurrence of `kind`
    pub fn add(&mut self, kind: &'static str) {
        *self.counts.entry(kind).or_insert(0) += 1;
    }

    /// Occurrences of `kind`
    pub fn get(&self, kind: &str) -> usize {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    /// Occurrences of all kinds
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Whether nothing was counted
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Labels and counts in label order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        self.counts.iter().map(|(&k, &v)| (k, v))
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.total())?;
        if !self.is_empty() {
            let parts: Vec<String> = self.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            write!(f, " ({})", parts.join(", "))?;
        }
        Ok(())
    }
}
