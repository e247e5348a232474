use octocrab::{params, Octocrab};
use shared::PullRequestRecord;
use tracing::{debug, instrument, warn};

use crate::config::{FetchConfig, RepositoryConfig};

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("GitHub token is not set")]
    MissingCredential,
    #[error("GitHub request failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<octocrab::Error> for FetchError {
    fn from(error: octocrab::Error) -> Self {
        Self::Transport(Box::new(error))
    }
}

/// Where closed pull requests of a repository come from.
#[async_trait::async_trait]
pub trait PullRequestSource: Send + Sync {
    async fn closed_pull_requests(
        &self,
        repository: &RepositoryConfig,
        fetch: &FetchConfig,
    ) -> Result<Vec<PullRequestRecord>, FetchError>;
}

#[derive(Clone)]
pub struct GithubClient {
    octocrab: Option<Octocrab>,
}

impl GithubClient {
    /// A client without a token is still usable, every fetch reports
    /// [`FetchError::MissingCredential`].
    pub fn new(github_token: Option<String>) -> anyhow::Result<Self> {
        let octocrab = github_token
            .filter(|token| !token.trim().is_empty())
            .map(|token| Octocrab::builder().personal_token(token).build())
            .transpose()?;

        Ok(Self { octocrab })
    }

    pub fn has_credential(&self) -> bool {
        self.octocrab.is_some()
    }
}

#[async_trait::async_trait]
impl PullRequestSource for GithubClient {
    #[instrument(skip(self, repository, fetch), fields(repo = %repository.full_name()))]
    async fn closed_pull_requests(
        &self,
        repository: &RepositoryConfig,
        fetch: &FetchConfig,
    ) -> Result<Vec<PullRequestRecord>, FetchError> {
        let octocrab = self.octocrab.as_ref().ok_or(FetchError::MissingCredential)?;

        let mut records = Vec::new();
        for page_number in 1..=fetch.max_pages {
            let mut page = octocrab
                .pulls(&repository.owner, &repository.name)
                .list()
                .state(params::State::Closed)
                .base(fetch.base.clone())
                .per_page(fetch.per_page)
                .page(page_number)
                .send()
                .await?;
            let items = page.take_items();
            let is_last = items.len() < fetch.per_page as usize;
            debug!("Page {page_number}: {} pull requests", items.len());

            for pr in items {
                match PullRequestRecord::try_from(pr) {
                    Ok(record) => records.push(record),
                    Err(e) => warn!("Skipping pull request: {e}"),
                }
            }

            if is_last {
                break;
            }
        }

        Ok(records)
    }
}
