//! Display descriptions built from aggregates: charts with their colours and
//! emphasis, and ranked leaderboards. Nothing in here draws.

pub mod chart;
pub mod color;
pub mod leaderboard;

pub use chart::{Bar, ChartSpec, Highlight, LineSeries, LineStyle, Plot};
pub use color::Rgb;
pub use leaderboard::{Leaderboard, LeaderboardRow};
