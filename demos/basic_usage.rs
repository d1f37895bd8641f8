//! Basic example of using the analysis API

use repo_tech_health::{
    analyze_repository, ExternalInputs, HealthConfig, RepositorySnapshot, Signal,
};
use std::path::Path;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Use default configuration
    let config = HealthConfig::default();

    // Analyze the bundled fixture unless a snapshot path is given
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "tests/fixtures/healthy_repo.json".to_string());
    println!("Analyzing snapshot at: {}", path);

    let snapshot = RepositorySnapshot::load(Path::new(&path))?;
    let report = analyze_repository(&snapshot, &ExternalInputs::default(), &config)?;

    println!("\n=== Health Results ===");
    println!(
        "Repository: {}/{}",
        report.metadata.owner, report.metadata.repository
    );
    println!(
        "Score: {:.1} / {:.1} ({})",
        report.score.total, report.score.max_total, report.score.tier
    );
    println!("  {}", report.score.tier_description);
    println!();

    println!("Signals:");
    for (signal, detail) in &report.score.details {
        println!(
            "  {:<20} {:>6.1} / {:<5.1} {}",
            signal, detail.score, detail.max_score, detail.display_value
        );
    }
    println!();

    // Show what is missing
    let missing: Vec<&Signal> = report
        .score
        .details
        .iter()
        .filter(|(signal, detail)| signal.is_structural() && detail.score == 0.0)
        .map(|(signal, _)| signal)
        .collect();

    if missing.is_empty() {
        println!("✓ All structural artifacts present!");
    } else {
        println!("Missing artifacts:");
        for signal in missing {
            println!("  - {}", signal);
        }
    }

    println!();
    println!("Recommendations:");
    for (category, entries) in report.recommendations.iter() {
        for entry in entries {
            println!("  [{}] {}", category, entry);
        }
    }

    Ok(())
}
