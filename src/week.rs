// src/week.rs
//
// Canonical ordering of calendar weeks for the challenge period.
// The period wraps the year end (45..52 then 1..10), so neither numeric nor
// lexical order is right; every week axis goes through `WeekOrder`.

use std::cmp::Ordering;
use std::collections::HashMap;

use crate::config::consts::CHALLENGE_WEEKS;

#[derive(Clone, Debug)]
pub struct WeekOrder {
    weeks: Vec<u32>,
    labels: Vec<String>,
    index: HashMap<String, usize>,
}

impl WeekOrder {
    /// Duplicate weeks keep their first position.
    pub fn new(weeks: &[u32]) -> Self {
        let mut order = Self { weeks: Vec::new(), labels: Vec::new(), index: HashMap::new() };
        for &w in weeks {
            let label = w.to_string();
            if order.index.contains_key(&label) {
                continue;
            }
            order.index.insert(label.clone(), order.weeks.len());
            order.weeks.push(w);
            order.labels.push(label);
        }
        order
    }

    /// The compiled-in challenge period.
    pub fn challenge() -> Self {
        Self::new(&CHALLENGE_WEEKS)
    }

    pub fn position(&self, label: &str) -> Option<usize> {
        self.index.get(label).copied()
    }

    pub fn position_of(&self, week: u32) -> Option<usize> {
        self.position(&week.to_string())
    }

    pub fn contains(&self, label: &str) -> bool {
        self.index.contains_key(label)
    }

    pub fn weeks(&self) -> &[u32] {
        &self.weeks
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.weeks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weeks.is_empty()
    }

    /// Challenge weeks first in canonical order, then other labels
    /// numerically, then anything non-numeric lexically.
    pub fn cmp_labels(&self, a: &str, b: &str) -> Ordering {
        match (self.position(a), self.position(b)) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => match (a.parse::<u32>(), b.parse::<u32>()) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                (Ok(_), Err(_)) => Ordering::Less,
                (Err(_), Ok(_)) => Ordering::Greater,
                (Err(_), Err(_)) => a.cmp(b),
            },
        }
    }

    pub fn cmp_weeks(&self, a: u32, b: u32) -> Ordering {
        self.cmp_labels(&a.to_string(), &b.to_string())
    }
}

impl Default for WeekOrder {
    fn default() -> Self {
        Self::challenge()
    }
}

/// Categorical form of a week number; unparseable weeks get `""`.
pub fn week_label(week: Option<u32>) -> String {
    week.map(|w| w.to_string()).unwrap_or_default()
}
