//! Health scoring algorithms for repository signals
//!
//! Two formulas are available and selected through [`ScoringStrategy`]:
//!
//! - **Additive**: structural artifacts earn fixed points, activity signals
//!   earn points along saturating curves; the total is on a 0-100 scale.
//! - **Weighted fraction**: every signal is normalized to 0-1 and weighted;
//!   the weighted sum is scaled by 100 and rounded.

use crate::config::{AdditiveWeights, FractionWeights, HealthConfig};
use crate::report::{format_commit_frequency, format_days, format_percentage, format_presence};
use crate::types::{
    ActivitySignals, Grade, HealthLevel, RepositorySignals, ScoreResult, ScoringStrategy, Signal,
    SignalDetail, StructuralSignals, SubScores, Tier,
};
use std::collections::BTreeMap;
use tracing::warn;

/// Additive points earned per daily commit before the cap applies
const POINTS_PER_DAILY_COMMIT: f64 = 2.0;
/// Resolution time at which the additive issue score halves
const ISSUE_REFERENCE_DAYS: f64 = 7.0;
/// Commits per day that saturate the weighted commit signal
const COMMIT_SATURATION_PER_DAY: f64 = 5.0;
/// Resolution time at which the weighted issue signal reaches zero
const ISSUE_HORIZON_DAYS: f64 = 30.0;

/// Score a signal set with the strategy selected in the configuration
///
/// Assumes `config` has passed [`HealthConfig::validate`]; weight tables that
/// exceed their scale yield totals above 100.
pub fn calculate_health_score(signals: &RepositorySignals, config: &HealthConfig) -> ScoreResult {
    score_with_strategy(config.strategy, signals, config)
}

/// Score a signal set with an explicit strategy
pub fn score_with_strategy(
    strategy: ScoringStrategy,
    signals: &RepositorySignals,
    config: &HealthConfig,
) -> ScoreResult {
    let activity = signals.activity.clamped();
    if activity != signals.activity {
        warn!(
            "Activity signals outside their domain were clamped: {:?} -> {:?}",
            signals.activity, activity
        );
    }

    match strategy {
        ScoringStrategy::Additive => {
            additive_score(&signals.structural, &activity, &config.additive_weights)
        }
        ScoringStrategy::WeightedFraction => {
            weighted_fraction_score(&signals.structural, &activity, &config.fraction_weights)
        }
    }
}

/// Additive-points model
fn additive_score(
    structural: &StructuralSignals,
    activity: &ActivitySignals,
    weights: &AdditiveWeights,
) -> ScoreResult {
    let mut details = structural_details(structural, |signal| match signal {
        Signal::Readme => weights.readme,
        Signal::License => weights.license,
        Signal::Tests => weights.tests,
        Signal::Ci => weights.ci,
        Signal::Documentation => weights.documentation,
        _ => 0.0,
    });

    let commit_score = (activity.commit_frequency * POINTS_PER_DAILY_COMMIT).min(weights.commit_frequency);
    let issue_score = additive_issue_score(activity.issue_resolution_time, weights.issue_resolution);
    let pr_score = activity.pull_request_merge_rate * weights.pull_request_merge;
    let review_score = activity.code_review_activity * weights.code_review;

    insert_activity_details(
        &mut details,
        activity,
        [
            (commit_score, weights.commit_frequency),
            (issue_score, weights.issue_resolution),
            (pr_score, weights.pull_request_merge),
            (review_score, weights.code_review),
        ],
    );

    let sub_scores = sum_sub_scores(&details);
    let total = sub_scores.structural + sub_scores.activity;
    let tier = Tier::Grade(determine_grade(total));

    ScoreResult {
        strategy: ScoringStrategy::Additive,
        total,
        max_total: weights.total(),
        sub_scores,
        tier,
        tier_description: tier.description().to_string(),
        details,
    }
}

/// Issue score on a hyperbolic curve of the mean resolution time
///
/// A resolution time of exactly 0 means no issue was resolved and earns nothing.
pub fn additive_issue_score(resolution_days: f64, max_score: f64) -> f64 {
    if resolution_days == 0.0 {
        return 0.0;
    }
    let score = max_score * (1.0 / (1.0 + resolution_days / ISSUE_REFERENCE_DAYS));
    score.min(max_score)
}

/// Weighted-fraction model
///
/// Details and sub-scores are reported on the 0-100 scale; the total is the
/// rounded sum.
fn weighted_fraction_score(
    structural: &StructuralSignals,
    activity: &ActivitySignals,
    weights: &FractionWeights,
) -> ScoreResult {
    let mut details = structural_details(structural, |signal| {
        100.0
            * match signal {
                Signal::Readme => weights.readme,
                Signal::License => weights.license,
                Signal::Tests => weights.tests,
                Signal::Ci => weights.ci,
                Signal::Documentation => weights.documentation,
                _ => 0.0,
            }
    });

    let commit_norm = (activity.commit_frequency / COMMIT_SATURATION_PER_DAY).min(1.0);
    let issue_norm = (1.0 - activity.issue_resolution_time / ISSUE_HORIZON_DAYS).max(0.0);

    insert_activity_details(
        &mut details,
        activity,
        [
            (commit_norm * weights.commit_frequency * 100.0, weights.commit_frequency * 100.0),
            (issue_norm * weights.issue_resolution * 100.0, weights.issue_resolution * 100.0),
            (
                activity.pull_request_merge_rate * weights.pull_request_merge * 100.0,
                weights.pull_request_merge * 100.0,
            ),
            (
                activity.code_review_activity * weights.code_review * 100.0,
                weights.code_review * 100.0,
            ),
        ],
    );

    let sub_scores = sum_sub_scores(&details);
    let total = (sub_scores.structural + sub_scores.activity).round();
    let tier = Tier::Level(determine_level(total));

    ScoreResult {
        strategy: ScoringStrategy::WeightedFraction,
        total,
        max_total: (weights.total() * 100.0).round(),
        sub_scores,
        tier,
        tier_description: tier.description().to_string(),
        details,
    }
}

/// Letter grade for an additive total
pub fn determine_grade(score: f64) -> Grade {
    if score >= 90.0 {
        Grade::A
    } else if score >= 80.0 {
        Grade::B
    } else if score >= 70.0 {
        Grade::C
    } else if score >= 60.0 {
        Grade::D
    } else {
        Grade::E
    }
}

/// Health level for a weighted-fraction total
pub fn determine_level(score: f64) -> HealthLevel {
    if score >= 80.0 {
        HealthLevel::Excelente
    } else if score >= 60.0 {
        HealthLevel::Bom
    } else if score >= 40.0 {
        HealthLevel::Regular
    } else if score >= 20.0 {
        HealthLevel::PrecisaDeMelhorias
    } else {
        HealthLevel::Critico
    }
}

fn structural_details(
    structural: &StructuralSignals,
    max_for: impl Fn(Signal) -> f64,
) -> BTreeMap<Signal, SignalDetail> {
    let presence = [
        structural.has_readme,
        structural.has_license,
        structural.has_tests,
        structural.has_ci,
        structural.has_documentation,
    ];

    Signal::STRUCTURAL
        .into_iter()
        .zip(presence)
        .map(|(signal, present)| {
            let max_score = max_for(signal);
            let detail = SignalDetail {
                score: if present { max_score } else { 0.0 },
                max_score,
                display_value: format_presence(present),
            };
            (signal, detail)
        })
        .collect()
}

fn insert_activity_details(
    details: &mut BTreeMap<Signal, SignalDetail>,
    activity: &ActivitySignals,
    scores: [(f64, f64); 4],
) {
    let display = [
        format_commit_frequency(activity.commit_frequency),
        format_days(activity.issue_resolution_time),
        format_percentage(activity.pull_request_merge_rate),
        format_percentage(activity.code_review_activity),
    ];

    for ((signal, (score, max_score)), display_value) in
        Signal::ACTIVITY.into_iter().zip(scores).zip(display)
    {
        details.insert(
            signal,
            SignalDetail {
                score: score.max(0.0).min(max_score),
                max_score,
                display_value,
            },
        );
    }
}

fn sum_sub_scores(details: &BTreeMap<Signal, SignalDetail>) -> SubScores {
    details
        .iter()
        .fold(SubScores::default(), |mut acc, (signal, detail)| {
            if signal.is_structural() {
                acc.structural += detail.score;
            } else {
                acc.activity += detail.score;
            }
            acc
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn all_structural() -> StructuralSignals {
        StructuralSignals {
            has_readme: true,
            has_license: true,
            has_tests: true,
            has_ci: true,
            has_documentation: true,
        }
    }

    fn signals(structural: StructuralSignals, activity: ActivitySignals) -> RepositorySignals {
        RepositorySignals {
            structural,
            activity,
        }
    }

    fn weighted_config() -> HealthConfig {
        HealthConfig::builder()
            .strategy(ScoringStrategy::WeightedFraction)
            .build()
    }

    #[test]
    fn test_readme_and_license_only() {
        let structural = StructuralSignals {
            has_readme: true,
            has_license: true,
            ..StructuralSignals::default()
        };
        let result = calculate_health_score(
            &signals(structural, ActivitySignals::default()),
            &HealthConfig::default(),
        );

        assert_eq!(result.strategy, ScoringStrategy::Additive);
        assert_eq!(result.total, 15.0);
        assert_eq!(result.sub_scores.structural, 15.0);
        assert_eq!(result.sub_scores.activity, 0.0);
        assert_eq!(result.tier, Tier::Grade(Grade::E));
        assert_eq!(result.tier_description, "Precisa Melhorar");
        assert_eq!(result.details[&Signal::Readme].display_value, "✅");
        assert_eq!(result.details[&Signal::Tests].display_value, "❌");
    }

    #[test]
    fn test_healthy_repository_scores_grade_a() {
        let activity = ActivitySignals {
            commit_frequency: 5.0,
            issue_resolution_time: 1.0,
            pull_request_merge_rate: 1.0,
            code_review_activity: 1.0,
        };
        let result = calculate_health_score(&signals(all_structural(), activity), &HealthConfig::default());

        assert_eq!(result.sub_scores.structural, 50.0);
        assert_eq!(result.details[&Signal::CommitFrequency].score, 10.0);
        assert!((result.details[&Signal::IssueResolution].score - 8.75).abs() < 1e-9);
        assert!((result.total - 93.75).abs() < 1e-9);
        assert!(result.total >= 90.0 && result.total <= 100.0);
        assert_eq!(result.tier, Tier::Grade(Grade::A));
    }

    #[test]
    fn test_commit_score_caps() {
        let activity = ActivitySignals {
            commit_frequency: 40.0,
            ..ActivitySignals::default()
        };
        let result = calculate_health_score(
            &signals(StructuralSignals::default(), activity),
            &HealthConfig::default(),
        );
        assert_eq!(result.details[&Signal::CommitFrequency].score, 15.0);
        assert_eq!(result.details[&Signal::CommitFrequency].display_value, "40.00 commits/dia");
    }

    #[test]
    fn test_issue_score_zero_means_no_data() {
        assert_eq!(additive_issue_score(0.0, 10.0), 0.0);
        assert!((additive_issue_score(7.0, 10.0) - 5.0).abs() < 1e-9);
        assert!(additive_issue_score(0.001, 10.0) <= 10.0);
        assert!(additive_issue_score(0.001, 10.0) > 9.9);
    }

    #[test]
    fn test_grades() {
        assert_eq!(determine_grade(95.0), Grade::A);
        assert_eq!(determine_grade(90.0), Grade::A);
        assert_eq!(determine_grade(85.0), Grade::B);
        assert_eq!(determine_grade(70.0), Grade::C);
        assert_eq!(determine_grade(60.0), Grade::D);
        assert_eq!(determine_grade(59.9), Grade::E);
    }

    #[test]
    fn test_levels() {
        assert_eq!(determine_level(90.0), HealthLevel::Excelente);
        assert_eq!(determine_level(70.0), HealthLevel::Bom);
        assert_eq!(determine_level(50.0), HealthLevel::Regular);
        assert_eq!(determine_level(30.0), HealthLevel::PrecisaDeMelhorias);
        assert_eq!(determine_level(10.0), HealthLevel::Critico);
    }

    #[test]
    fn test_weighted_fraction_full_marks() {
        let activity = ActivitySignals {
            commit_frequency: 5.0,
            issue_resolution_time: 0.0,
            pull_request_merge_rate: 1.0,
            code_review_activity: 1.0,
        };
        let result = calculate_health_score(&signals(all_structural(), activity), &weighted_config());

        assert_eq!(result.strategy, ScoringStrategy::WeightedFraction);
        assert_eq!(result.total, 100.0);
        assert_eq!(result.max_total, 100.0);
        assert_eq!(result.tier, Tier::Level(HealthLevel::Excelente));
    }

    #[test]
    fn test_weighted_fraction_partial() {
        let structural = StructuralSignals {
            has_readme: true,
            has_tests: true,
            ..StructuralSignals::default()
        };
        let activity = ActivitySignals {
            commit_frequency: 2.5,
            issue_resolution_time: 15.0,
            pull_request_merge_rate: 0.5,
            code_review_activity: 0.0,
        };
        let result = calculate_health_score(&signals(structural, activity), &weighted_config());

        // 0.1 + 0.2 + 0.05 + 0.05 + 0.025 = 0.425
        assert_eq!(result.total, 43.0);
        assert!((result.sub_scores.structural - 30.0).abs() < 1e-9);
        assert!((result.sub_scores.activity - 12.5).abs() < 1e-9);
        assert_eq!(result.tier, Tier::Level(HealthLevel::Regular));
        assert_eq!(result.tier.label(), "Regular");
    }

    #[test]
    fn test_weighted_issue_time_beyond_horizon() {
        let activity = ActivitySignals {
            issue_resolution_time: 45.0,
            ..ActivitySignals::default()
        };
        let result = calculate_health_score(
            &signals(StructuralSignals::default(), activity),
            &weighted_config(),
        );
        assert_eq!(result.details[&Signal::IssueResolution].score, 0.0);
        assert_eq!(result.tier, Tier::Level(HealthLevel::Critico));
    }

    #[test]
    fn test_out_of_range_inputs_are_clamped() {
        let activity = ActivitySignals {
            commit_frequency: f64::NAN,
            issue_resolution_time: -3.0,
            pull_request_merge_rate: 1.7,
            code_review_activity: -0.2,
        };
        let result = calculate_health_score(
            &signals(StructuralSignals::default(), activity),
            &HealthConfig::default(),
        );

        assert_eq!(result.details[&Signal::CommitFrequency].score, 0.0);
        assert_eq!(result.details[&Signal::IssueResolution].score, 0.0);
        assert_eq!(result.details[&Signal::PullRequestMerge].score, 15.0);
        assert_eq!(result.details[&Signal::CodeReview].score, 0.0);
        assert!(!result.total.is_nan());
    }

    #[test]
    fn test_sub_scores_stay_within_bounds() {
        let frequencies = [0.0, 0.3, 1.0, 7.5, 100.0];
        let days = [0.0, 0.5, 7.0, 30.0, 365.0];
        let rates = [0.0, 0.25, 1.0];

        for strategy in [ScoringStrategy::Additive, ScoringStrategy::WeightedFraction] {
            for &commit_frequency in &frequencies {
                for &issue_resolution_time in &days {
                    for &rate in &rates {
                        let activity = ActivitySignals {
                            commit_frequency,
                            issue_resolution_time,
                            pull_request_merge_rate: rate,
                            code_review_activity: 1.0 - rate,
                        };
                        let result = score_with_strategy(
                            strategy,
                            &signals(all_structural(), activity),
                            &HealthConfig::default(),
                        );

                        for detail in result.details.values() {
                            assert!(detail.score >= 0.0 && detail.score <= detail.max_score);
                        }
                        assert!(result.total >= 0.0 && result.total <= 100.0);
                        assert!(
                            (result.total - (result.sub_scores.structural + result.sub_scores.activity)).abs()
                                <= 0.5 + 1e-9
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_structural_weights_map_to_their_signals() {
        let config = HealthConfig::builder()
            .additive_weights(AdditiveWeights {
                readme: 1.0,
                license: 2.0,
                tests: 3.0,
                ci: 4.0,
                documentation: 5.0,
                ..AdditiveWeights::default()
            })
            .build();
        let result = calculate_health_score(
            &signals(all_structural(), ActivitySignals::default()),
            &config,
        );

        let maxima: Vec<f64> = Signal::STRUCTURAL
            .iter()
            .map(|signal| result.details[signal].max_score)
            .collect();
        assert_eq!(maxima, vec![1.0, 2.0, 3.0, 4.0, 5.0]);
        assert_eq!(result.sub_scores.structural, 15.0);
        assert_eq!(result.details[&Signal::CommitFrequency].max_score, 15.0);
        assert_eq!(result.details.len(), 9);
    }

    #[test]
    fn test_scoring_is_deterministic() {
        let input = signals(
            all_structural(),
            ActivitySignals {
                commit_frequency: 1.2,
                issue_resolution_time: 4.0,
                pull_request_merge_rate: 0.6,
                code_review_activity: 0.4,
            },
        );
        let config = HealthConfig::default();
        assert_eq!(
            calculate_health_score(&input, &config),
            calculate_health_score(&input, &config)
        );
    }
}
