#[macro_use]
extern crate rocket;

mod entrypoints;

use std::sync::{atomic::AtomicBool, Arc};
use std::time::Duration;

use dino_leaderboard_server::{
    config::{Env, LeaderboardConfig},
    github::GithubClient,
    refresh,
};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::EnvFilter;

#[rocket::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::from_default_env())
        .with(tracing_subscriber::fmt::layer());
    tracing::subscriber::set_global_default(subscriber)?;

    let env = envy::from_env::<Env>()?;
    let config = LeaderboardConfig::load(env.leaderboard_config.as_deref())?;
    let refresh_interval = env
        .refresh_interval_in_minutes
        .filter(|minutes| *minutes > 0)
        .map(|minutes| Duration::from_secs(minutes as u64 * 60));

    let github = GithubClient::new(env.github_token)?;
    if !github.has_credential() {
        tracing::error!("GitHub token is not set, leaderboards will stay empty");
    }

    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();
    let cors = rocket_cors::CorsOptions::default().to_cors()?;

    let _rocket = rocket::build()
        .attach(cors)
        .attach(refresh::stage(
            Arc::new(github),
            Arc::new(config),
            refresh_interval,
            running,
        ))
        .attach(rocket::fairing::AdHoc::on_shutdown(
            "Stop refreshing leaderboards",
            |_| {
                Box::pin(async move {
                    running_clone.store(false, std::sync::atomic::Ordering::Relaxed);
                })
            },
        ))
        .attach(entrypoints::stage())
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Rocket stopped with an error: {e}"))?;

    Ok(())
}
