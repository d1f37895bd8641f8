//! CLI tool for scoring repository technical health

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use repo_tech_health::{
    analyze_snapshot_files, benchmark_prompt, extract_signals, recommendation_prompt, Category,
    ExternalInputs, ExternalText, Grade, HealthConfig, HealthLevel, RecommendationOrigin, Report,
    RepositorySnapshot, ScoringStrategy, Signal, Tier, ASSISTANT_ROLE,
};
use std::path::{Path, PathBuf};
use std::process;
use tracing::{debug, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "tech-health")]
#[command(about = "Score the technical health of source-code repositories", long_about = None)]
#[command(version)]
struct Cli {
    /// Repository snapshot (JSON) to analyze; repeat for several repositories
    #[arg(short = 's', long = "snapshot", required = true)]
    snapshots: Vec<PathBuf>,

    /// Path to custom configuration file (TOML)
    #[arg(short = 'c', long)]
    config: Option<PathBuf>,

    /// Scoring formula, overriding the configuration (additive, weighted-fraction)
    #[arg(long)]
    strategy: Option<ScoringStrategy>,

    /// File with externally generated recommendation text
    #[arg(long)]
    recommendations: Option<PathBuf>,

    /// File with an externally generated benchmark narrative
    #[arg(long)]
    benchmark: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score repositories and display a summary
    Score {
        /// Fail if any repository scores below this threshold (0-100)
        #[arg(long)]
        fail_threshold: Option<f64>,

        /// Display per-signal details and recommendations
        #[arg(long)]
        detailed: bool,
    },

    /// Generate a detailed health report
    Report {
        /// Output format
        #[arg(short = 'f', long, default_value = "markdown")]
        format: ReportFormat,

        /// Output file (default: stdout)
        #[arg(short = 'o', long)]
        output: Option<PathBuf>,
    },

    /// Check repositories against a minimum score (exit code based)
    Check {
        /// Minimum acceptable health score (0-100)
        #[arg(long, default_value = "60")]
        min_score: f64,
    },

    /// Print the requests to send to external recommendation and benchmark generators
    Prompt,
}

#[derive(Clone, Debug)]
enum ReportFormat {
    Json,
    Markdown,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(ReportFormat::Json),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    // Load configuration
    let mut config = if let Some(config_path) = &cli.config {
        match load_config(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                eprintln!("{} Failed to load config: {:#}", "Error:".red().bold(), e);
                process::exit(1);
            }
        }
    } else {
        HealthConfig::default()
    };

    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }

    if let Commands::Prompt = cli.command {
        print_prompts(&cli.snapshots);
        return;
    }

    let external = ExternalInputs {
        recommendations: read_external(cli.recommendations.as_deref(), "recommendation text"),
        benchmark: read_external(cli.benchmark.as_deref(), "benchmark narrative"),
    };

    // Run analysis
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(format!("Analyzing {} repositories...", cli.snapshots.len()));
    spinner.enable_steady_tick(std::time::Duration::from_millis(100));

    let result = analyze_snapshot_files(&cli.snapshots, &external, &config).await;

    spinner.finish_and_clear();

    let reports = match result {
        Ok(reports) if !reports.is_empty() => reports,
        Ok(_) => {
            eprintln!("{} No snapshot could be analyzed", "Error:".red().bold());
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{} Analysis failed: {}", "Error:".red().bold(), e);
            process::exit(1);
        }
    };

    // Handle subcommand
    match cli.command {
        Commands::Score {
            fail_threshold,
            detailed,
        } => {
            for report in &reports {
                display_summary(report);
                if detailed {
                    println!();
                    display_detailed(report);
                }
            }

            if let Some(threshold) = fail_threshold {
                let failing: Vec<_> = reports.iter().filter(|r| r.score.total < threshold).collect();

                if !failing.is_empty() {
                    eprintln!(
                        "\n{} {} repositories below threshold {}:",
                        "Failed:".red().bold(),
                        failing.len(),
                        threshold
                    );
                    for report in &failing {
                        eprintln!("  - {}: score {:.1}", full_name(report), report.score.total);
                    }
                    process::exit(1);
                }
            }
        }

        Commands::Report { format, output } => {
            let content = match format {
                ReportFormat::Json => generate_json_report(&reports),
                ReportFormat::Markdown => generate_markdown_report(&reports),
            };

            if let Some(output_path) = output {
                match std::fs::write(&output_path, content) {
                    Ok(_) => println!("Report written to: {}", output_path.display()),
                    Err(e) => {
                        eprintln!("{} Failed to write report: {}", "Error:".red().bold(), e);
                        process::exit(1);
                    }
                }
            } else {
                println!("{}", content);
            }
        }

        Commands::Check { min_score } => {
            let failures: Vec<String> = reports
                .iter()
                .filter(|r| r.score.total < min_score)
                .map(|r| {
                    format!(
                        "  - {}: health score {:.1} < {}",
                        full_name(r),
                        r.score.total,
                        min_score
                    )
                })
                .collect();

            if !failures.is_empty() {
                eprintln!("{} {} check failures:", "Failed:".red().bold(), failures.len());
                for failure in failures {
                    eprintln!("{}", failure);
                }
                process::exit(1);
            } else {
                println!("{} All checks passed!", "Success:".green().bold());
            }
        }

        Commands::Prompt => {}
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    } else {
        EnvFilter::new("warn")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: &Path) -> anyhow::Result<HealthConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let config = HealthConfig::from_toml_str(&content)
        .with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

/// Read externally generated text; a missing or unreadable file degrades the report
fn read_external(path: Option<&Path>, what: &str) -> ExternalText {
    let Some(path) = path else {
        debug!("No {} supplied", what);
        return ExternalText::unavailable(format!("no {} supplied", what));
    };

    let text = ExternalText::from_result(
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display())),
    );
    if let ExternalText::Unavailable { reason } = &text {
        warn!("Could not read {}: {}", what, reason);
    }
    text
}

fn print_prompts(paths: &[PathBuf]) {
    for path in paths {
        let snapshot = match RepositorySnapshot::load(path) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                eprintln!("{} {}", "Error:".red().bold(), e);
                process::exit(1);
            }
        };
        let signals = extract_signals(&snapshot);

        println!("{}", format!("=== {} ===", snapshot.full_name()).bold());
        println!("{}\n", ASSISTANT_ROLE.dimmed());
        println!(
            "{}",
            recommendation_prompt(&signals.structural, &snapshot.owner, &snapshot.name)
        );
        println!("{}\n", benchmark_prompt(&snapshot.owner, &snapshot.name));
    }
}

fn full_name(report: &Report) -> String {
    format!("{}/{}", report.metadata.owner, report.metadata.repository)
}

fn colored_tier(tier: Tier) -> ColoredString {
    let label = tier.label();
    match tier {
        Tier::Grade(Grade::A) | Tier::Level(HealthLevel::Excelente) => label.green(),
        Tier::Grade(Grade::B) | Tier::Grade(Grade::C) | Tier::Level(HealthLevel::Bom) => {
            label.yellow()
        }
        Tier::Grade(Grade::D) | Tier::Level(HealthLevel::Regular) => label.truecolor(255, 165, 0), // Orange
        _ => label.red(),
    }
}

fn display_summary(report: &Report) {
    println!("\n{}", "=== Health Summary ===".bold());
    println!("Repository: {}", full_name(report).cyan());
    println!("Strategy: {}", report.score.strategy);
    println!(
        "Score: {:.1} / {:.0} [{}] {}",
        report.score.total,
        report.score.max_total,
        colored_tier(report.score.tier),
        report.score.tier_description
    );
    println!("  Structure: {:.1}", report.score.sub_scores.structural);
    println!("  Activity: {:.1}", report.score.sub_scores.activity);

    if let RecommendationOrigin::RuleBasedFallback { reason } = &report.metadata.recommendation_origin {
        println!("{} rule-based recommendations only ({})", "Note:".yellow(), reason);
    }
}

fn display_detailed(report: &Report) {
    println!("{}", "=== Signals ===".bold());
    for (signal, detail) in &report.score.details {
        println!(
            "  {:<26} {:>6.2} / {:<6.2} {}",
            signal.to_string(),
            detail.score,
            detail.max_score,
            detail.display_value
        );
    }

    println!("\n{}", "=== Recommendations ===".bold());
    for (category, entries) in report.recommendations.iter() {
        if entries.is_empty() {
            continue;
        }
        println!("  {}:", category.to_string().bold());
        for entry in entries {
            println!("    - {}", entry);
        }
    }

    println!("\n{}", "=== Benchmark ===".bold());
    println!("  {}", report.benchmark_narrative);
}

fn generate_json_report(reports: &[Report]) -> String {
    let serialized = match reports {
        [single] => serde_json::to_string_pretty(single),
        _ => serde_json::to_string_pretty(reports),
    };
    serialized.unwrap_or_else(|e| {
        eprintln!("Failed to serialize report: {}", e);
        process::exit(1);
    })
}

fn generate_markdown_report(reports: &[Report]) -> String {
    let mut md = String::new();

    for report in reports {
        md.push_str(&format!("# Technical Health Report: {}\n\n", full_name(report)));
        md.push_str(&format!("**Generated:** {}\n\n", report.metadata.generated_at));

        md.push_str("## Score\n\n");
        md.push_str(&format!(
            "- Total: {:.1} / {:.0}\n",
            report.score.total, report.score.max_total
        ));
        md.push_str(&format!(
            "- Tier: {} ({})\n",
            report.score.tier, report.score.tier_description
        ));
        md.push_str(&format!("- Strategy: {}\n", report.score.strategy));
        md.push_str(&format!("- Structure: {:.1}\n", report.score.sub_scores.structural));
        md.push_str(&format!("- Activity: {:.1}\n\n", report.score.sub_scores.activity));

        md.push_str("## Signals\n\n");
        md.push_str("| Signal | Value | Score | Max |\n");
        md.push_str("|--------|-------|-------|-----|\n");
        for signal in Signal::STRUCTURAL.iter().chain(Signal::ACTIVITY.iter()) {
            if let Some(detail) = report.score.details.get(signal) {
                md.push_str(&format!(
                    "| {} | {} | {:.2} | {:.2} |\n",
                    signal, detail.display_value, detail.score, detail.max_score
                ));
            }
        }

        md.push_str("\n## Recommendations\n\n");
        for category in Category::ALL {
            let entries = report.recommendations.get(category);
            if entries.is_empty() {
                continue;
            }
            md.push_str(&format!("### {}\n\n", category));
            for entry in entries {
                md.push_str(&format!("- {}\n", entry));
            }
            md.push('\n');
        }

        md.push_str("## Benchmark\n\n");
        md.push_str(&report.benchmark_narrative);
        md.push_str("\n\n");
    }

    md
}
