use std::{
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
    time::Duration,
};

use rocket::fairing::AdHoc;
use tracing::info;

use crate::{
    config::LeaderboardConfig,
    github::PullRequestSource,
    leaderboard::{self, SharedLeaderboards},
};

/// Loads the leaderboards on liftoff. With an interval the load is repeated,
/// one cycle at a time, until `running` is cleared.
pub fn stage(
    source: Arc<dyn PullRequestSource>,
    config: Arc<LeaderboardConfig>,
    refresh_interval: Option<Duration>,
    running: Arc<AtomicBool>,
) -> AdHoc {
    AdHoc::on_ignite("Leaderboard refresh", move |rocket| async move {
        let leaderboards = SharedLeaderboards::default();
        rocket
            .manage(leaderboards.clone())
            .manage(config.clone())
            .attach(AdHoc::on_liftoff(
                "Loads pull requests and ranks contributors",
                move |_| {
                    Box::pin(async move {
                        rocket::tokio::spawn(async move {
                            let mut interval = refresh_interval.map(rocket::tokio::time::interval);
                            while running.load(Ordering::Relaxed) {
                                if let Some(interval) = interval.as_mut() {
                                    interval.tick().await;
                                }

                                leaderboard::refresh(source.as_ref(), &config, &leaderboards)
                                    .await;

                                if interval.is_none() {
                                    info!("No refresh interval, leaderboards loaded once");
                                    break;
                                }
                            }
                        });
                    })
                },
            ))
    })
}
