use chrono::{DateTime, Utc};

use super::*;

pub const INVALID_LABEL: &str = "invalid";

/// A closed pull request as seen by the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PullRequestRecord {
    pub number: u64,
    pub author: GithubHandle,
    pub avatar_url: String,
    pub merged_at: Option<DateTime<Utc>>,
    pub labels: Vec<String>,
}

impl PullRequestRecord {
    pub fn is_marked_invalid(&self) -> bool {
        self.labels
            .iter()
            .any(|label| label.eq_ignore_ascii_case(INVALID_LABEL))
    }

    /// Merged and not labelled `invalid`.
    pub fn is_qualifying(&self) -> bool {
        self.merged_at.is_some() && !self.is_marked_invalid()
    }
}

/// Merge statistics of one user in one repository.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserMergeStat {
    pub login: GithubHandle,
    pub avatar_url: String,
    pub merged_prs: u32,
    pub points: u32,
    pub last_merge: DateTime<Utc>,
}

impl Ranked for UserMergeStat {
    fn login(&self) -> &str {
        &self.login
    }
}

#[cfg(test)]
impl UserMergeStat {
    pub(crate) fn test_entry(login: &str, merged_prs: u32, weight: u32) -> Self {
        Self {
            login: login.to_string(),
            avatar_url: format!("https://avatars.example/{login}"),
            merged_prs,
            points: merged_prs * weight,
            last_merge: DateTime::from_timestamp(1_700_000_000, 0).unwrap_or_default(),
        }
    }
}
