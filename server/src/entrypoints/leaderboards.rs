use std::sync::Arc;

use dino_leaderboard_server::{config::LeaderboardConfig, leaderboard::SharedLeaderboards};
use rocket::{serde::json::Json, State};
use shared::{RepoCategory, Window};

use super::types::{
    LeaderboardsResponse, OverallEntryResponse, PointsResponse, RepositoryLeaderboardResponse,
};

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get overall and per repository leaderboards", body = LeaderboardsResponse)
))]
#[get("/")]
async fn get_leaderboards(
    leaderboards: &State<SharedLeaderboards>,
    config: &State<Arc<LeaderboardConfig>>,
) -> Json<LeaderboardsResponse> {
    let leaderboards = leaderboards.read().await;
    let window = Window::new(config.view_step);
    Json(LeaderboardsResponse {
        loaded_at: leaderboards.loaded_at,
        points: PointsResponse::table(&leaderboards.points),
        overall: OverallEntryResponse::ranking(&leaderboards.overall),
        repositories: leaderboards
            .repositories
            .values()
            .map(|leaderboard| RepositoryLeaderboardResponse::new(leaderboard, window))
            .collect(),
    })
}

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get overall top contributors", body = [OverallEntryResponse])
))]
#[get("/overall")]
async fn get_overall(leaderboards: &State<SharedLeaderboards>) -> Json<Vec<OverallEntryResponse>> {
    let leaderboards = leaderboards.read().await;
    Json(OverallEntryResponse::ranking(&leaderboards.overall))
}

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get repository leaderboard", body = RepositoryLeaderboardResponse),
    (status = 404, description = "Unknown category or leaderboards not loaded yet")
))]
#[get("/repos/<category>?<shown>")]
async fn get_repository(
    leaderboards: &State<SharedLeaderboards>,
    config: &State<Arc<LeaderboardConfig>>,
    category: &str,
    shown: Option<usize>,
) -> Option<Json<RepositoryLeaderboardResponse>> {
    let category = RepoCategory::from_name(category)?;
    let leaderboards = leaderboards.read().await;
    let leaderboard = leaderboards.repository(category)?;

    let mut window = Window::new(config.view_step);
    if let Some(shown) = shown {
        window = window.with_shown(shown, leaderboard.ranking.len());
    }

    Some(Json(RepositoryLeaderboardResponse::new(leaderboard, window)))
}

#[utoipa::path(context_path = "/leaderboard", responses(
    (status = 200, description = "Get points per merged PR for each category", body = [PointsResponse])
))]
#[get("/points")]
async fn get_points(config: &State<Arc<LeaderboardConfig>>) -> Json<Vec<PointsResponse>> {
    Json(PointsResponse::table(&config.points))
}

pub fn stage() -> rocket::fairing::AdHoc {
    rocket::fairing::AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket.mount(
            "/leaderboard",
            rocket::routes![get_leaderboards, get_overall, get_repository, get_points],
        )
    })
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use chrono::DateTime;
    use dino_leaderboard_server::{
        config::RepositoryConfig,
        leaderboard::{FetchStatus, Leaderboards, RepositoryLeaderboard},
    };
    use rocket::{http::Status, local::asynchronous::Client};
    use shared::{CategoryCounts, OverallUserStat, PointsTable, UserMergeStat};

    use super::*;

    fn stat(login: &str, merged_prs: u32) -> UserMergeStat {
        UserMergeStat {
            login: login.to_string(),
            avatar_url: format!("https://avatars.example/{login}"),
            merged_prs,
            points: merged_prs * 25,
            last_merge: DateTime::from_timestamp(1_704_067_200, 0).unwrap(),
        }
    }

    fn snapshot() -> Leaderboards {
        let config = LeaderboardConfig::default();
        let web_ranking: Vec<_> = (0..12).map(|i| stat(&format!("user{i}"), 12 - i)).collect();
        let repositories = BTreeMap::from([
            (
                RepoCategory::Web,
                RepositoryLeaderboard {
                    category: RepoCategory::Web,
                    repository: config.repositories.web.clone(),
                    points_per_pr: 25,
                    status: FetchStatus::Ok,
                    ranking: web_ranking,
                },
            ),
            (
                RepoCategory::Python,
                RepositoryLeaderboard {
                    category: RepoCategory::Python,
                    repository: RepositoryConfig::new("org", "py", "Python"),
                    points_per_pr: 20,
                    status: FetchStatus::Failed,
                    ranking: vec![],
                },
            ),
        ]);
        Leaderboards {
            loaded_at: DateTime::from_timestamp(1_704_067_200, 0),
            points: PointsTable::default(),
            repositories,
            overall: vec![OverallUserStat {
                login: "user0".to_string(),
                avatar_url: "https://avatars.example/user0".to_string(),
                points: 300,
                prs: CategoryCounts {
                    web: 12,
                    python: 0,
                    noncode: 0,
                },
            }],
        }
    }

    async fn client() -> Client {
        let shared: SharedLeaderboards = Default::default();
        *shared.write().await = snapshot();
        let rocket = rocket::build()
            .manage(shared)
            .manage(Arc::new(LeaderboardConfig::default()))
            .attach(stage());
        Client::tracked(rocket).await.unwrap()
    }

    #[rocket::async_test]
    async fn overall_lists_places() {
        let client = client().await;
        let response = client.get("/leaderboard/overall").dispatch().await;
        assert_eq!(response.status(), Status::Ok);

        let body: serde_json::Value = response.into_json().await.unwrap();
        assert_eq!(body[0]["place"], 1);
        assert_eq!(body[0]["user"]["login"], "user0");
        assert_eq!(body[0]["user"]["profile"], "https://github.com/user0");
        assert_eq!(body[0]["points"], 300);
        assert_eq!(body[0]["prs"]["python"], 0);
    }

    #[rocket::async_test]
    async fn repository_starts_with_initial_window() {
        let client = client().await;
        let body: serde_json::Value = client
            .get("/leaderboard/repos/web")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(body["showing"], 5);
        assert_eq!(body["total"], 12);
        assert_eq!(body["records"].as_array().unwrap().len(), 5);
        assert_eq!(body["records"][4]["place"], 5);
        assert_eq!(body["toggle"]["label"], "View More");
        assert_eq!(body["toggle"]["shown"], 10);
        assert_eq!(body["repository"], "SamarthTech/web-projects-2024");
    }

    #[rocket::async_test]
    async fn repository_window_follows_client_state() {
        let client = client().await;
        let body: serde_json::Value = client
            .get("/leaderboard/repos/web?shown=15")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(body["showing"], 12);
        assert_eq!(body["records"].as_array().unwrap().len(), 12);
        assert_eq!(body["toggle"]["label"], "Show Less");
        assert_eq!(body["toggle"]["shown"], 10);
    }

    #[rocket::async_test]
    async fn oversized_client_state_is_clamped() {
        let client = client().await;
        let body: serde_json::Value = client
            .get("/leaderboard/repos/web?shown=4294967300")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(body["showing"], 12);
        assert_eq!(body["records"].as_array().unwrap().len(), 12);
        assert_eq!(body["toggle"]["label"], "Show Less");
        assert_eq!(body["toggle"]["shown"], 10);
    }

    #[rocket::async_test]
    async fn failed_repository_is_reported() {
        let client = client().await;
        let body: serde_json::Value = client
            .get("/leaderboard/repos/python")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(body["status"], "failed");
        assert_eq!(body["total"], 0);
        assert!(body["toggle"].is_null());
    }

    #[rocket::async_test]
    async fn unknown_or_unloaded_category_is_not_found() {
        let client = client().await;
        let unknown = client.get("/leaderboard/repos/rust").dispatch().await;
        assert_eq!(unknown.status(), Status::NotFound);

        let unloaded = client.get("/leaderboard/repos/noncode").dispatch().await;
        assert_eq!(unloaded.status(), Status::NotFound);
    }

    #[rocket::async_test]
    async fn full_leaderboards_and_points() {
        let client = client().await;
        let body: serde_json::Value = client
            .get("/leaderboard")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();

        assert_eq!(body["repositories"].as_array().unwrap().len(), 2);
        assert_eq!(body["repositories"][0]["category"], "web");
        assert_eq!(body["points"][0]["points"], 25);
        assert_eq!(body["points"][2]["category"], "noncode");
        assert_eq!(body["overall"].as_array().unwrap().len(), 1);

        let points: serde_json::Value = client
            .get("/leaderboard/points")
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(points[1]["category"], "python");
        assert_eq!(points[1]["points"], 20);
    }
}
