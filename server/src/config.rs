use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use shared::{IntoEnumIterator, PointsTable, RepoCategory, SuppressionSet, DEFAULT_TOP_N, DEFAULT_VIEW_STEP};

/// Process environment, read with `envy` after `.env` is loaded.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Env {
    pub github_token: Option<String>,
    pub leaderboard_config: Option<PathBuf>,
    pub refresh_interval_in_minutes: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub owner: String,
    pub name: String,
    pub title: String,
}

impl RepositoryConfig {
    pub fn new(owner: &str, name: &str, title: &str) -> Self {
        Self {
            owner: owner.to_string(),
            name: name.to_string(),
            title: title.to_string(),
        }
    }

    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoriesConfig {
    pub web: RepositoryConfig,
    pub python: RepositoryConfig,
    pub noncode: RepositoryConfig,
}

impl Default for RepositoriesConfig {
    fn default() -> Self {
        Self {
            web: RepositoryConfig::new("SamarthTech", "web-projects-2024", "Web Dev Projects"),
            python: RepositoryConfig::new(
                "SamarthTech",
                "python-projects-2024",
                "Python and AIML Projects",
            ),
            noncode: RepositoryConfig::new(
                "SamarthTech",
                "noncode-projects-2024",
                "Low and Non Code Projects",
            ),
        }
    }
}

impl RepositoriesConfig {
    pub const fn get(&self, category: RepoCategory) -> &RepositoryConfig {
        match category {
            RepoCategory::Web => &self.web,
            RepoCategory::Python => &self.python,
            RepoCategory::NonCode => &self.noncode,
        }
    }
}

/// Upstream listing parameters. `per_page * max_pages` caps how many closed
/// PRs are considered per repository.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    pub per_page: u8,
    pub max_pages: u32,
    pub base: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            per_page: 100,
            max_pages: 2,
            base: "main".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeaderboardConfig {
    pub top_n: usize,
    pub view_step: usize,
    pub hidden_users: SuppressionSet,
    pub points: PointsTable,
    pub fetch: FetchConfig,
    pub repositories: RepositoriesConfig,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            view_step: DEFAULT_VIEW_STEP,
            hidden_users: SuppressionSet::new(["darkhorse404", "SamarthTech", "anirban12x"]),
            points: PointsTable::default(),
            fetch: FetchConfig::default(),
            repositories: RepositoriesConfig::default(),
        }
    }
}

impl LeaderboardConfig {
    pub fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {e}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Falls back to the built-in program settings when no file is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        match path {
            Some(path) => Self::load_from_file(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.fetch.per_page == 0 || self.fetch.per_page > 100 {
            anyhow::bail!("fetch.per_page must be within 1..=100");
        }
        if self.fetch.max_pages == 0 {
            anyhow::bail!("fetch.max_pages must be at least 1");
        }
        if self.top_n == 0 {
            anyhow::bail!("top_n must be at least 1");
        }
        if self.view_step == 0 {
            anyhow::bail!("view_step must be at least 1");
        }

        // Three categories at most `per_page * max_pages` merges each must fit a u32 total.
        let max_merges = u64::from(self.fetch.per_page) * u64::from(self.fetch.max_pages);
        let max_total: u64 = RepoCategory::iter()
            .map(|category| max_merges * u64::from(self.points.weight(category)))
            .sum();
        if max_total > u64::from(u32::MAX) {
            anyhow::bail!(
                "points are too large: {max_merges} merges per repository would overflow the total"
            );
        }
        Ok(())
    }
}
