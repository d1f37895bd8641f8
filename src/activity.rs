//! Activity signal extraction from commit, issue and pull-request history

use crate::snapshot::{CommitRecord, IssueRecord, PullRequestRecord};
use crate::types::ActivitySignals;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Derive all four activity signals
pub fn analyze_activity(
    commits: &[CommitRecord],
    issues: &[IssueRecord],
    pull_requests: &[PullRequestRecord],
) -> ActivitySignals {
    ActivitySignals {
        commit_frequency: commit_frequency(commits),
        issue_resolution_time: issue_resolution_time(issues),
        pull_request_merge_rate: pull_request_merge_rate(pull_requests),
        code_review_activity: code_review_activity(pull_requests),
    }
}

/// Commits per day between the earliest and latest commit
///
/// The window is floored at one day. Listings arrive most recent first; the
/// window is taken from the extreme timestamps so the result does not depend
/// on that ordering.
pub fn commit_frequency(commits: &[CommitRecord]) -> f64 {
    let earliest = commits.iter().map(|c| c.authored_at).min();
    let latest = commits.iter().map(|c| c.authored_at).max();

    let (Some(earliest), Some(latest)) = (earliest, latest) else {
        return 0.0;
    };

    let days = days_between(earliest, latest);
    commits.len() as f64 / days.max(1.0)
}

/// Mean days from creation to close over resolved issues, 0 when none closed
pub fn issue_resolution_time(issues: &[IssueRecord]) -> f64 {
    let durations: Vec<f64> = issues
        .iter()
        .filter_map(|issue| {
            issue
                .closed_at
                .map(|closed| days_between(issue.created_at, closed).max(0.0))
        })
        .collect();

    if durations.is_empty() {
        return 0.0;
    }
    durations.iter().sum::<f64>() / durations.len() as f64
}

/// Fraction of pull requests that were merged
pub fn pull_request_merge_rate(pull_requests: &[PullRequestRecord]) -> f64 {
    ratio(pull_requests, |pr| pr.merged_at.is_some())
}

/// Fraction of pull requests that received review comments
pub fn code_review_activity(pull_requests: &[PullRequestRecord]) -> f64 {
    ratio(pull_requests, |pr| pr.review_comments > 0)
}

fn ratio(pull_requests: &[PullRequestRecord], predicate: impl Fn(&PullRequestRecord) -> bool) -> f64 {
    if pull_requests.is_empty() {
        return 0.0;
    }
    let matching = pull_requests.iter().filter(|pr| predicate(pr)).count();
    matching as f64 / pull_requests.len() as f64
}

fn days_between(start: chrono::DateTime<chrono::Utc>, end: chrono::DateTime<chrono::Utc>) -> f64 {
    end.signed_duration_since(start).num_milliseconds() as f64 / 1000.0 / SECONDS_PER_DAY
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn at(s: &str) -> DateTime<Utc> {
        DateTime::parse_from_rfc3339(s).unwrap().with_timezone(&Utc)
    }

    fn pr(merged: bool, review_comments: u32) -> PullRequestRecord {
        PullRequestRecord {
            merged_at: merged.then(|| at("2024-01-03T00:00:00Z")),
            review_comments,
        }
    }

    #[test]
    fn test_empty_history_is_all_zero() {
        assert_eq!(analyze_activity(&[], &[], &[]), ActivitySignals::default());
    }

    #[test]
    fn test_commit_frequency_two_commits_one_day_apart() {
        let commits = vec![
            CommitRecord::new(at("2024-01-02T00:00:00Z")),
            CommitRecord::new(at("2024-01-01T00:00:00Z")),
        ];
        assert!((commit_frequency(&commits) - 2.0).abs() < 1e-9);
    }

    #[test]
    fn test_commit_frequency_window_floor() {
        let commits = vec![
            CommitRecord::new(at("2024-01-01T12:00:00Z")),
            CommitRecord::new(at("2024-01-01T08:00:00Z")),
            CommitRecord::new(at("2024-01-01T00:00:00Z")),
        ];
        assert!((commit_frequency(&commits) - 3.0).abs() < 1e-9);
        assert!((commit_frequency(&commits[..1]) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_commit_frequency_ignores_order() {
        let newest_first = vec![
            CommitRecord::new(at("2024-01-11T00:00:00Z")),
            CommitRecord::new(at("2024-01-06T00:00:00Z")),
            CommitRecord::new(at("2024-01-01T00:00:00Z")),
        ];
        let mut oldest_first = newest_first.clone();
        oldest_first.reverse();

        assert!((commit_frequency(&newest_first) - 0.3).abs() < 1e-9);
        assert_eq!(commit_frequency(&newest_first), commit_frequency(&oldest_first));
    }

    #[test]
    fn test_issue_resolution_mean_of_closed_only() {
        let issues = vec![
            IssueRecord {
                created_at: at("2024-01-01T00:00:00Z"),
                closed_at: Some(at("2024-01-03T00:00:00Z")),
            },
            IssueRecord {
                created_at: at("2024-01-02T00:00:00Z"),
                closed_at: Some(at("2024-01-06T00:00:00Z")),
            },
            IssueRecord {
                created_at: at("2024-01-02T00:00:00Z"),
                closed_at: None,
            },
        ];
        assert!((issue_resolution_time(&issues) - 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_issue_resolution_zero_without_closed_issues() {
        let issues = vec![
            IssueRecord {
                created_at: at("2024-01-01T00:00:00Z"),
                closed_at: None,
            };
            4
        ];
        assert_eq!(issue_resolution_time(&issues), 0.0);
    }

    #[test]
    fn test_issue_closed_before_creation_counts_as_zero() {
        let issues = vec![IssueRecord {
            created_at: at("2024-01-05T00:00:00Z"),
            closed_at: Some(at("2024-01-01T00:00:00Z")),
        }];
        assert_eq!(issue_resolution_time(&issues), 0.0);
    }

    #[test]
    fn test_pull_request_ratios() {
        let prs = vec![pr(true, 2), pr(false, 0)];
        assert!((pull_request_merge_rate(&prs) - 0.5).abs() < 1e-9);
        assert!((code_review_activity(&prs) - 0.5).abs() < 1e-9);

        let all = vec![pr(true, 1), pr(true, 3)];
        assert_eq!(pull_request_merge_rate(&all), 1.0);
        assert_eq!(code_review_activity(&all), 1.0);
    }
}
