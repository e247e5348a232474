use rocket::fairing::AdHoc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod leaderboards;
pub mod types;

#[derive(OpenApi)]
#[openapi(
    paths(
        leaderboards::get_leaderboards,
        leaderboards::get_overall,
        leaderboards::get_repository,
        leaderboards::get_points,
    ),
    components(schemas(
        types::GithubMeta,
        types::RepositoryEntryResponse,
        types::PrsBreakdown,
        types::OverallEntryResponse,
        types::ToggleResponse,
        types::RepositoryLeaderboardResponse,
        types::PointsResponse,
        types::LeaderboardsResponse,
    ))
)]
pub struct ApiDoc;

pub fn stage() -> AdHoc {
    AdHoc::on_ignite("Installing entrypoints", |rocket| async {
        rocket.attach(leaderboards::stage()).mount(
            "/",
            SwaggerUi::new("/swagger-ui/<_..>").url("/api-docs/openapi.json", ApiDoc::openapi()),
        )
    })
}
