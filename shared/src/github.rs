use crate::PullRequestRecord;

impl TryFrom<octocrab::models::pulls::PullRequest> for PullRequestRecord {
    type Error = anyhow::Error;

    fn try_from(pr: octocrab::models::pulls::PullRequest) -> anyhow::Result<Self> {
        let Some(user) = pr.user else {
            return Err(anyhow::anyhow!("PR #{} has no author", pr.number));
        };

        Ok(Self {
            number: pr.number,
            author: user.login,
            avatar_url: user.avatar_url.to_string(),
            merged_at: pr.merged_at,
            labels: pr
                .labels
                .unwrap_or_default()
                .into_iter()
                .map(|label| label.name)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use octocrab::models::pulls::PullRequest;
    use serde_json::{json, Value};

    use super::*;

    fn author(login: &str) -> Value {
        let api = format!("https://api.github.com/users/{login}");
        json!({
            "login": login,
            "id": 42,
            "node_id": "MDQ6VXNlcjQy",
            "avatar_url": format!("https://avatars.githubusercontent.com/u/42?v=4&login={login}"),
            "gravatar_id": "",
            "url": api,
            "html_url": format!("https://github.com/{login}"),
            "followers_url": format!("{api}/followers"),
            "following_url": format!("{api}/following"),
            "gists_url": format!("{api}/gists"),
            "starred_url": format!("{api}/starred"),
            "subscriptions_url": format!("{api}/subscriptions"),
            "organizations_url": format!("{api}/orgs"),
            "repos_url": format!("{api}/repos"),
            "events_url": format!("{api}/events"),
            "received_events_url": format!("{api}/received_events"),
            "type": "User",
            "site_admin": false
        })
    }

    fn label(name: &str) -> Value {
        json!({
            "id": 7,
            "node_id": "LA_kwDO",
            "url": format!("https://api.github.com/repos/org/repo/labels/{name}"),
            "name": name,
            "color": "e4e669",
            "default": false
        })
    }

    fn pull_request(user: Value, merged_at: Value, labels: Value) -> PullRequest {
        serde_json::from_value(json!({
            "url": "https://api.github.com/repos/org/repo/pulls/17",
            "id": 1017,
            "number": 17,
            "user": user,
            "labels": labels,
            "merged_at": merged_at,
            "head": { "ref": "feature", "sha": "abc" },
            "base": { "ref": "main", "sha": "def" }
        }))
        .unwrap()
    }

    #[test]
    fn merged_pr_with_labels() {
        let pr = pull_request(
            author("alice"),
            json!("2024-10-05T12:30:00Z"),
            json!([label("Invalid"), label("bug")]),
        );

        let record = PullRequestRecord::try_from(pr).unwrap();

        assert_eq!(record.number, 17);
        assert_eq!(record.author, "alice");
        assert_eq!(
            record.avatar_url,
            "https://avatars.githubusercontent.com/u/42?v=4&login=alice"
        );
        assert_eq!(
            record.merged_at.map(|t| t.to_rfc3339()),
            Some("2024-10-05T12:30:00+00:00".to_string())
        );
        assert_eq!(record.labels, vec!["Invalid", "bug"]);
        assert!(!record.is_qualifying());
    }

    #[test]
    fn closed_without_merge() {
        let pr = pull_request(author("bob"), Value::Null, json!([]));

        let record = PullRequestRecord::try_from(pr).unwrap();

        assert_eq!(record.merged_at, None);
        assert!(record.labels.is_empty());
        assert!(!record.is_qualifying());
    }

    #[test]
    fn null_labels_become_empty() {
        let pr = pull_request(author("carol"), json!("2024-10-01T00:00:00Z"), Value::Null);

        let record = PullRequestRecord::try_from(pr).unwrap();

        assert!(record.labels.is_empty());
        assert!(record.is_qualifying());
    }

    #[test]
    fn pr_without_author_is_rejected() {
        let pr = pull_request(Value::Null, json!("2024-10-01T00:00:00Z"), json!([]));

        let error = PullRequestRecord::try_from(pr).unwrap_err();

        assert_eq!(error.to_string(), "PR #17 has no author");
    }
}
