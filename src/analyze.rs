//! Main analysis orchestration logic

use crate::activity::analyze_activity;
use crate::config::HealthConfig;
use crate::error::{HealthError, Result};
use crate::recommendations::{reconcile, ExternalText};
use crate::report::generate_report;
use crate::scoring::calculate_health_score;
use crate::snapshot::RepositorySnapshot;
use crate::structure::analyze_structure;
use crate::types::{RepositorySignals, Report};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Already-resolved answers from the external text collaborators
#[derive(Debug, Clone)]
pub struct ExternalInputs {
    pub recommendations: ExternalText,
    pub benchmark: ExternalText,
}

impl Default for ExternalInputs {
    fn default() -> Self {
        Self {
            recommendations: ExternalText::unavailable("no recommendation source configured"),
            benchmark: ExternalText::unavailable("no benchmark source configured"),
        }
    }
}

/// Extract the nine signals from a snapshot
pub fn extract_signals(snapshot: &RepositorySnapshot) -> RepositorySignals {
    RepositorySignals {
        structural: analyze_structure(snapshot.files.as_deref()),
        activity: analyze_activity(&snapshot.commits, &snapshot.issues, &snapshot.pull_requests),
    }
}

/// Analyze one repository snapshot and build its report
///
/// Fails only on an invalid configuration; unavailable external text just
/// degrades the recommendations and benchmark narrative.
pub fn analyze_repository(
    snapshot: &RepositorySnapshot,
    external: &ExternalInputs,
    config: &HealthConfig,
) -> Result<Report> {
    config.validate()?;
    info!("Analyzing repository: {}", snapshot.full_name());

    let signals = extract_signals(snapshot);
    debug!("Signals for {}: {:?}", snapshot.full_name(), signals);

    let score = calculate_health_score(&signals, config);
    let recommendations = reconcile(&signals.structural, &external.recommendations, &config.recommendations);

    let report = generate_report(
        &snapshot.owner,
        &snapshot.name,
        signals,
        score,
        recommendations,
        &external.benchmark,
    );

    info!(
        "Analysis of {} complete: score {:.1} ({}, {})",
        snapshot.full_name(),
        report.score.total,
        report.score.tier,
        report.score.strategy
    );

    Ok(report)
}

/// Load and analyze several snapshot files concurrently
///
/// Each file is analyzed independently. Files that cannot be loaded are
/// logged and skipped; reports keep the order of `paths`.
pub async fn analyze_snapshot_files(
    paths: &[PathBuf],
    external: &ExternalInputs,
    config: &HealthConfig,
) -> Result<Vec<Report>> {
    config.validate()?;
    info!("Analyzing {} repository snapshots", paths.len());

    let external = Arc::new(external.clone());
    let config = Arc::new(config.clone());
    let mut tasks = Vec::new();

    for path in paths {
        let label = path.display().to_string();
        let path = path.clone();
        let external = Arc::clone(&external);
        let config = Arc::clone(&config);

        let task = tokio::spawn(async move {
            let content = tokio::fs::read_to_string(&path).await?;
            let snapshot = RepositorySnapshot::from_json_str(&content)?;
            let report = analyze_repository(&snapshot, &external, &config)?;
            Ok::<_, HealthError>(report)
        });

        tasks.push((label, task));
    }

    let mut reports = Vec::new();
    for (label, task) in tasks {
        match task.await.map_err(HealthError::from).and_then(|result| result) {
            Ok(report) => reports.push(report),
            Err(e) => {
                warn!("Failed to analyze snapshot {}: {}", label, e);
            }
        }
    }

    Ok(reports)
}
