use std::collections::{BTreeMap, HashMap};

use super::*;

/// A user's standing across all repository categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallUserStat {
    pub login: GithubHandle,
    pub avatar_url: String,
    pub points: u32,
    pub prs: CategoryCounts,
}

impl Ranked for OverallUserStat {
    fn login(&self) -> &str {
        &self.login
    }
}

/// Merges per-repository rankings into the overall top `top_n`.
///
/// Each ranking already carries its category's points. Categories are visited
/// in [`RepoCategory`] order, which also decides the order of users with equal
/// totals.
pub fn combine(
    rankings: &BTreeMap<RepoCategory, Vec<UserMergeStat>>,
    suppressed: &SuppressionSet,
    top_n: usize,
) -> Vec<OverallUserStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut overall: Vec<OverallUserStat> = Vec::new();

    for (category, ranking) in rankings {
        for stat in ranking {
            let position = *index.entry(stat.login.as_str()).or_insert_with(|| {
                overall.push(OverallUserStat {
                    login: stat.login.clone(),
                    avatar_url: stat.avatar_url.clone(),
                    points: 0,
                    prs: CategoryCounts::default(),
                });
                overall.len() - 1
            });

            let user = &mut overall[position];
            user.points = user.points.saturating_add(stat.points);
            user.prs.set(*category, stat.merged_prs);
        }
    }

    overall.sort_by(|a, b| b.points.cmp(&a.points));

    let mut overall = suppressed.retain_visible(overall);
    overall.truncate(top_n);
    overall
}
