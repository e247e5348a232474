use chrono::{DateTime, Utc};
use dino_leaderboard_server::leaderboard::{FetchStatus, RepositoryLeaderboard};
use serde::{Deserialize, Serialize};
use shared::{
    CategoryCounts, OverallUserStat, PointsTable, RepoCategory, ToggleAction, UserMergeStat,
    Window,
};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct GithubMeta {
    login: String,
    avatar_url: String,
    profile: String,
}

impl GithubMeta {
    pub fn new(login: String, avatar_url: String) -> Self {
        let profile = format!("https://github.com/{}", login);
        Self {
            login,
            avatar_url,
            profile,
        }
    }
}

fn count(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RepositoryEntryResponse {
    pub place: u32,
    pub user: GithubMeta,
    pub points: u32,
    pub merged_prs: u32,
    pub last_merge: DateTime<Utc>,
}

impl RepositoryEntryResponse {
    fn new(place: usize, stat: &UserMergeStat) -> Self {
        Self {
            place: count(place),
            user: GithubMeta::new(stat.login.clone(), stat.avatar_url.clone()),
            points: stat.points,
            merged_prs: stat.merged_prs,
            last_merge: stat.last_merge,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PrsBreakdown {
    pub web: u32,
    pub python: u32,
    pub noncode: u32,
}

impl From<CategoryCounts> for PrsBreakdown {
    fn from(counts: CategoryCounts) -> Self {
        Self {
            web: counts.web,
            python: counts.python,
            noncode: counts.noncode,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct OverallEntryResponse {
    pub place: u32,
    pub user: GithubMeta,
    pub points: u32,
    pub prs: PrsBreakdown,
}

impl OverallEntryResponse {
    pub fn ranking(overall: &[OverallUserStat]) -> Vec<Self> {
        overall
            .iter()
            .enumerate()
            .map(|(index, stat)| Self {
                place: count(index + 1),
                user: GithubMeta::new(stat.login.clone(), stat.avatar_url.clone()),
                points: stat.points,
                prs: stat.prs.into(),
            })
            .collect()
    }
}

/// What the "View More" / "Show Less" button does next.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ToggleResponse {
    pub label: String,
    pub shown: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct RepositoryLeaderboardResponse {
    pub category: String,
    pub title: String,
    pub repository: String,
    pub points_per_pr: u32,
    pub status: String,
    pub showing: u32,
    pub total: u32,
    pub toggle: Option<ToggleResponse>,
    pub records: Vec<RepositoryEntryResponse>,
}

impl RepositoryLeaderboardResponse {
    pub fn new(leaderboard: &RepositoryLeaderboard, window: Window) -> Self {
        let total = leaderboard.ranking.len();
        let toggle = window.action(total).map(|action| {
            let label = match action {
                ToggleAction::ViewMore => "View More",
                ToggleAction::ShowLess => "Show Less",
            };
            ToggleResponse {
                label: label.to_string(),
                shown: count(window.toggle(total).shown),
            }
        });
        let status = match leaderboard.status {
            FetchStatus::Ok => "ok",
            FetchStatus::Failed => "failed",
        };

        Self {
            category: leaderboard.category.to_string(),
            title: leaderboard.repository.title.clone(),
            repository: leaderboard.repository.full_name(),
            points_per_pr: leaderboard.points_per_pr,
            status: status.to_string(),
            showing: count(window.visible(total)),
            total: count(total),
            toggle,
            records: window
                .slice(&leaderboard.ranking)
                .iter()
                .enumerate()
                .map(|(index, stat)| RepositoryEntryResponse::new(index + 1, stat))
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PointsResponse {
    pub category: String,
    pub points: u32,
}

impl PointsResponse {
    pub fn table(points: &PointsTable) -> Vec<Self> {
        use shared::IntoEnumIterator;

        RepoCategory::iter()
            .map(|category| Self {
                category: category.to_string(),
                points: points.weight(category),
            })
            .collect()
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LeaderboardsResponse {
    pub loaded_at: Option<DateTime<Utc>>,
    pub points: Vec<PointsResponse>,
    pub overall: Vec<OverallEntryResponse>,
    pub repositories: Vec<RepositoryLeaderboardResponse>,
}
