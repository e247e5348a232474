use std::collections::HashMap;

use super::*;

/// Builds the per-user ranking of a single repository.
///
/// Only qualifying pull requests are counted. Users are ordered by merge count,
/// and on equal counts the user whose latest merge happened *earlier* goes
/// first. Users tied on both keys keep the order in which they were first seen.
pub fn aggregate(records: &[PullRequestRecord], weight: u32) -> Vec<UserMergeStat> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<UserMergeStat> = Vec::new();

    for pr in records.iter().filter(|pr| pr.is_qualifying()) {
        let Some(merged_at) = pr.merged_at else {
            continue;
        };

        match index.get(pr.author.as_str()) {
            Some(&position) => {
                let stat = &mut stats[position];
                stat.merged_prs += 1;
                stat.last_merge = stat.last_merge.max(merged_at);
            }
            None => {
                index.insert(pr.author.as_str(), stats.len());
                stats.push(UserMergeStat {
                    login: pr.author.clone(),
                    avatar_url: pr.avatar_url.clone(),
                    merged_prs: 1,
                    points: 0,
                    last_merge: merged_at,
                });
            }
        }
    }

    for stat in stats.iter_mut() {
        stat.points = stat.merged_prs.saturating_mul(weight);
    }

    stats.sort_by(|a, b| {
        b.merged_prs
            .cmp(&a.merged_prs)
            .then_with(|| a.last_merge.cmp(&b.last_merge))
    });

    stats
}
