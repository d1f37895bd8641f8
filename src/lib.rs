//! # repo_tech_health
//!
//! Technical health scoring for source-code repositories:
//! - **Structural signals**: README, license, tests, CI configuration, documentation
//! - **Activity signals**: commit cadence, issue resolution time, pull-request merge
//!   rate, review activity
//! - **Health score**: a bounded score with sub-scores and a qualitative tier, from
//!   either the additive-points or the weighted-fraction formula
//! - **Recommendations**: rule-based advice reconciled with externally generated text
//!
//! ## Quick Start
//!
//! ```no_run
//! use repo_tech_health::{analyze_repository, ExternalInputs, HealthConfig, RepositorySnapshot};
//! use std::path::Path;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = HealthConfig::default();
//! let snapshot = RepositorySnapshot::load(Path::new("snapshot.json"))?;
//! let report = analyze_repository(&snapshot, &ExternalInputs::default(), &config)?;
//!
//! println!(
//!     "{}/{}: {:.1} ({})",
//!     report.metadata.owner, report.metadata.repository, report.score.total, report.score.tier
//! );
//! # Ok(())
//! # }
//! ```
//!
//! Nothing in this crate performs network I/O. Data fetched from a code-hosting
//! service and text produced by a generator are handed in as already-resolved
//! values; an unavailable generator degrades the report instead of failing it.

mod activity;
mod analyze;
mod config;
mod error;
mod recommendations;
mod report;
mod scoring;
mod snapshot;
mod structure;
mod types;

// Re-export public API
pub use activity::{
    analyze_activity, code_review_activity, commit_frequency, issue_resolution_time,
    pull_request_merge_rate,
};
pub use analyze::{analyze_repository, analyze_snapshot_files, extract_signals, ExternalInputs};
pub use config::{AdditiveWeights, FractionWeights, HealthConfig, HealthConfigBuilder, RecommendationPolicy};
pub use error::{HealthError, Result};
pub use recommendations::{
    benchmark_prompt, merge_recommendations, parse_recommendations, reconcile,
    recommendation_prompt, rule_based_recommendations, ExternalText, Reconciled, ASSISTANT_ROLE,
};
pub use report::{
    benchmark_narrative, format_commit_frequency, format_days, format_percentage, format_presence,
    generate_report, BENCHMARK_EMPTY, BENCHMARK_UNAVAILABLE,
};
pub use scoring::{calculate_health_score, determine_grade, determine_level, score_with_strategy};
pub use snapshot::{CommitRecord, IssueRecord, PullRequestRecord, RepositorySnapshot};
pub use structure::analyze_structure;
pub use types::{
    ActivitySignals, Category, Grade, HealthLevel, RecommendationOrigin, RecommendationSet, Report,
    ReportMetadata, RepositorySignals, ScoreResult, ScoringStrategy, Signal, SignalDetail,
    StructuralSignals, SubScores, Tier,
};
