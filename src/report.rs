//! Report assembly and display formatting

use crate::recommendations::{ExternalText, Reconciled};
use crate::types::{RepositorySignals, Report, ReportMetadata, ScoreResult};
use chrono::Utc;
use tracing::warn;

/// Narrative used when the benchmark source answered with nothing
pub const BENCHMARK_EMPTY: &str = "Não foi possível gerar o benchmark neste momento.";
/// Narrative used when the benchmark source could not be reached
pub const BENCHMARK_UNAVAILABLE: &str = "Não foi possível gerar o benchmark neste momento. \
Considere comparar manualmente com projetos similares no GitHub.";

/// Package signals, score, recommendations and benchmark into a report
pub fn generate_report(
    owner: &str,
    repository: &str,
    signals: RepositorySignals,
    score: ScoreResult,
    recommendations: Reconciled,
    benchmark: &ExternalText,
) -> Report {
    Report {
        metadata: ReportMetadata {
            generated_at: Utc::now(),
            repository: repository.to_string(),
            owner: owner.to_string(),
            recommendation_origin: recommendations.origin,
        },
        score,
        signals,
        recommendations: recommendations.recommendations,
        benchmark_narrative: benchmark_narrative(benchmark),
    }
}

/// Resolve the benchmark narrative, falling back to fixed text
pub fn benchmark_narrative(benchmark: &ExternalText) -> String {
    match benchmark {
        ExternalText::Available(text) if !text.trim().is_empty() => text.clone(),
        ExternalText::Available(_) => BENCHMARK_EMPTY.to_string(),
        ExternalText::Unavailable { reason } => {
            warn!("Benchmark narrative unavailable, using fallback: {}", reason);
            BENCHMARK_UNAVAILABLE.to_string()
        }
    }
}

pub fn format_presence(present: bool) -> String {
    let mark = if present { "✅" } else { "❌" };
    mark.to_string()
}

pub fn format_commit_frequency(commits_per_day: f64) -> String {
    format!("{:.2} commits/dia", commits_per_day)
}

pub fn format_days(days: f64) -> String {
    format!("{:.1} dias", days)
}

/// Format a 0-1 ratio as a percentage with one decimal
pub fn format_percentage(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}
