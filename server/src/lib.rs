pub mod config;
pub mod github;
pub mod leaderboard;
pub mod refresh;
