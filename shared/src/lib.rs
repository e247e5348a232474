use std::collections::HashSet;

use serde::{Deserialize, Serialize};

mod aggregate;
mod category;
mod combine;
mod pr;
mod window;

#[cfg(feature = "github")]
pub mod github;

pub use aggregate::*;
pub use category::*;
pub use combine::*;
pub use pr::*;
pub use window::*;

pub type GithubHandle = String;

/// Default size of the overall ranking.
pub const DEFAULT_TOP_N: usize = 5;

/// Logins that never show up in a displayed ranking, whatever their score.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SuppressionSet(HashSet<GithubHandle>);

impl SuppressionSet {
    pub fn new<I, S>(logins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<GithubHandle>,
    {
        Self(logins.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, login: &str) -> bool {
        self.0.contains(login)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Drops suppressed users from an already ranked list, keeping the order.
    pub fn retain_visible<T: Ranked>(&self, ranking: Vec<T>) -> Vec<T> {
        ranking
            .into_iter()
            .filter(|entry| !self.contains(entry.login()))
            .collect()
    }
}

/// Anything that sits in a ranking and is identified by a GitHub login.
pub trait Ranked {
    fn login(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suppression_keeps_order_of_the_rest() {
        let suppressed = SuppressionSet::new(["bob"]);
        let ranking = vec![
            UserMergeStat::test_entry("alice", 3, 25),
            UserMergeStat::test_entry("bob", 2, 25),
            UserMergeStat::test_entry("carol", 1, 25),
        ];

        let visible = suppressed.retain_visible(ranking);

        let logins: Vec<_> = visible.iter().map(|e| e.login.as_str()).collect();
        assert_eq!(logins, vec!["alice", "carol"]);
    }

    #[test]
    fn suppression_is_case_sensitive_like_logins_in_the_api() {
        let suppressed = SuppressionSet::new(["SamarthTech"]);
        assert!(suppressed.contains("SamarthTech"));
        assert!(!suppressed.contains("samarthtech"));
    }

    #[test]
    fn suppression_deserializes_from_a_plain_list() {
        let suppressed: SuppressionSet =
            serde_json::from_str(r#"["darkhorse404", "anirban12x"]"#).unwrap();
        assert_eq!(suppressed.len(), 2);
        assert!(suppressed.contains("anirban12x"));
    }
}
