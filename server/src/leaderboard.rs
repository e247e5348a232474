use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use rocket::tokio::sync::RwLock;
use serde::Serialize;
use shared::{
    aggregate, combine, IntoEnumIterator, OverallUserStat, PointsTable, PullRequestRecord,
    RepoCategory, UserMergeStat,
};
use tracing::{error, info, instrument};

use crate::config::{FetchConfig, LeaderboardConfig, RepositoryConfig};
use crate::github::PullRequestSource;

pub type SharedLeaderboards = Arc<RwLock<Leaderboards>>;

/// Tells an empty ranking caused by a failed fetch apart from a quiet repository.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FetchStatus {
    Ok,
    Failed,
}

#[derive(Debug, Clone)]
pub struct RepositoryLeaderboard {
    pub category: RepoCategory,
    pub repository: RepositoryConfig,
    pub points_per_pr: u32,
    pub status: FetchStatus,
    /// Suppressed users already removed.
    pub ranking: Vec<UserMergeStat>,
}

/// One complete, published result of a load cycle.
#[derive(Debug, Clone, Default)]
pub struct Leaderboards {
    pub loaded_at: Option<DateTime<Utc>>,
    pub points: PointsTable,
    pub repositories: BTreeMap<RepoCategory, RepositoryLeaderboard>,
    pub overall: Vec<OverallUserStat>,
}

impl Leaderboards {
    pub fn repository(&self, category: RepoCategory) -> Option<&RepositoryLeaderboard> {
        self.repositories.get(&category)
    }
}

/// Fetches one repository, degrading any failure to an empty list.
#[instrument(skip(source, repository, fetch), fields(repo = %repository.full_name()))]
pub async fn fetch_repository(
    source: &dyn PullRequestSource,
    repository: &RepositoryConfig,
    fetch: &FetchConfig,
) -> (Vec<PullRequestRecord>, FetchStatus) {
    match source.closed_pull_requests(repository, fetch).await {
        Ok(records) => {
            info!("Fetched {} closed pull requests", records.len());
            (records, FetchStatus::Ok)
        }
        Err(e) => {
            error!("Error fetching GitHub data: {e}");
            (vec![], FetchStatus::Failed)
        }
    }
}

/// Runs one load cycle: fetch every repository in turn, rank each, combine.
#[instrument(skip_all)]
pub async fn load_leaderboards(
    source: &dyn PullRequestSource,
    config: &LeaderboardConfig,
) -> Leaderboards {
    let mut fetched = Vec::new();
    for category in RepoCategory::iter() {
        let repository = config.repositories.get(category);
        let (records, status) = fetch_repository(source, repository, &config.fetch).await;
        fetched.push((category, records, status));
    }

    let rankings: BTreeMap<RepoCategory, Vec<UserMergeStat>> = fetched
        .iter()
        .map(|(category, records, _)| {
            (*category, aggregate(records, config.points.weight(*category)))
        })
        .collect();

    let overall = combine(&rankings, &config.hidden_users, config.top_n);

    let repositories = fetched
        .into_iter()
        .zip(rankings)
        .map(|((category, _, status), (_, ranking))| {
            let leaderboard = RepositoryLeaderboard {
                category,
                repository: config.repositories.get(category).clone(),
                points_per_pr: config.points.weight(category),
                status,
                ranking: config.hidden_users.retain_visible(ranking),
            };
            (category, leaderboard)
        })
        .collect();

    info!("Leaderboards loaded, {} users in the overall top", overall.len());

    Leaderboards {
        loaded_at: Some(Utc::now()),
        points: config.points,
        repositories,
        overall,
    }
}

/// Replaces the published snapshot with a freshly computed one.
pub async fn refresh(
    source: &dyn PullRequestSource,
    config: &LeaderboardConfig,
    leaderboards: &SharedLeaderboards,
) {
    let fresh = load_leaderboards(source, config).await;
    *leaderboards.write().await = fresh;
}
