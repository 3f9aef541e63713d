// src/view/leaderboard.rs

use crate::aggregate::sort_desc;
use crate::config::consts::EMPTY_LEADERBOARD_SCALE;

#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardRow {
    /// 1-based, consecutive.
    pub rank: usize,
    pub label: String,
    pub total_km: f64,
    /// `total_km / scale`, in 0..=1.
    pub fraction: f64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Leaderboard {
    pub title: String,
    /// Column header for the label column (`Gruppe` / `Name`).
    pub label_header: String,
    pub rows: Vec<LeaderboardRow>,
    /// Maximum of the displayed rows; 100 when there are none.
    pub scale: f64,
}

impl Leaderboard {
    /// Rank `totals` descending (stable), keep at most `limit` rows and scale
    /// the bars to the largest value that is actually shown.
    pub fn build(title: String, label_header: &str, mut totals: Vec<(String, f64)>, limit: Option<usize>) -> Self {
        sort_desc(&mut totals);
        if let Some(n) = limit {
            totals.truncate(n);
        }

        let scale = totals
            .iter()
            .map(|(_, km)| *km)
            .reduce(f64::max)
            .unwrap_or(EMPTY_LEADERBOARD_SCALE);

        let rows = totals
            .into_iter()
            .enumerate()
            .map(|(i, (label, total_km))| LeaderboardRow {
                rank: i + 1,
                label,
                total_km,
                fraction: if scale > 0.0 { (total_km / scale).clamp(0.0, 1.0) } else { 0.0 },
            })
            .collect();

        Self { title, label_header: s!(label_header), rows, scale }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
