//! Integration tests for the CLI

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn tech_health() -> Command {
    Command::cargo_bin("tech-health").unwrap()
}

#[test]
fn test_cli_score_help() {
    let mut cmd = tech_health();
    cmd.arg("score").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Score repositories"));
}

#[test]
fn test_cli_report_help() {
    let mut cmd = tech_health();
    cmd.arg("report").arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Generate a detailed health report"));
}

#[test]
fn test_cli_requires_snapshot() {
    tech_health()
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--snapshot"));
}

#[test]
fn test_cli_score_bare_repository() {
    tech_health()
        .arg("--snapshot")
        .arg(fixture("bare_repo.json"))
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("Health Summary"))
        .stdout(predicate::str::contains("acme/scratch"))
        .stdout(predicate::str::contains("15.0"));
}

#[test]
fn test_cli_score_fail_threshold() {
    tech_health()
        .arg("--snapshot")
        .arg(fixture("bare_repo.json"))
        .arg("score")
        .arg("--fail-threshold")
        .arg("50")
        .assert()
        .failure()
        .stderr(predicate::str::contains("below threshold"));
}

#[test]
fn test_cli_report_json_merges_recommendations() {
    let output = tech_health()
        .arg("--snapshot")
        .arg(fixture("healthy_repo.json"))
        .arg("--recommendations")
        .arg(fixture("recommendations.txt"))
        .arg("report")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();

    assert_eq!(report["metadata"]["repository"], "widgets");
    assert_eq!(report["metadata"]["recommendation_origin"]["kind"], "merged");
    assert_eq!(report["score"]["strategy"], "additive");
    assert_eq!(report["score"]["tier"], "B");
    assert_eq!(report["signals"]["structural"]["has_ci"], true);

    let revisao = report["recommendations"]["revisao"].as_array().unwrap();
    assert_eq!(revisao.len(), 2);
    assert_eq!(revisao[1], "Exigir aprovação de dois revisores");
    assert_eq!(
        report["recommendations"]["estrutura"][0],
        "Separar o código em módulos menores"
    );
}

#[test]
fn test_cli_report_weighted_strategy() {
    let output = tech_health()
        .arg("--snapshot")
        .arg(fixture("healthy_repo.json"))
        .arg("--strategy")
        .arg("weighted-fraction")
        .arg("report")
        .arg("-f")
        .arg("json")
        .output()
        .unwrap();

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["score"]["strategy"], "weighted_fraction");
    assert_eq!(report["score"]["total"], 95.0);
    assert_eq!(report["score"]["tier"], "excelente");
    assert_eq!(report["metadata"]["recommendation_origin"]["kind"], "rule_based_fallback");
}

#[test]
fn test_cli_report_markdown_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("report.md");

    tech_health()
        .arg("-s")
        .arg(fixture("healthy_repo.json"))
        .arg("-s")
        .arg(fixture("bare_repo.json"))
        .arg("report")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report written to"));

    let content = std::fs::read_to_string(&out).unwrap();
    assert!(content.contains("# Technical Health Report: acme/widgets"));
    assert!(content.contains("# Technical Health Report: acme/scratch"));
    assert!(content.contains("2.50 commits/dia"));
    assert!(content.contains("Não foi possível gerar o benchmark"));
}

#[test]
fn test_cli_check_threshold() {
    tech_health()
        .arg("--snapshot")
        .arg(fixture("healthy_repo.json"))
        .arg("check")
        .arg("--min-score")
        .arg("60")
        .assert()
        .success()
        .stdout(predicate::str::contains("All checks passed"));

    tech_health()
        .arg("--snapshot")
        .arg(fixture("healthy_repo.json"))
        .arg("--snapshot")
        .arg(fixture("bare_repo.json"))
        .arg("check")
        .assert()
        .failure()
        .stderr(predicate::str::contains("acme/scratch"));
}

#[test]
fn test_cli_missing_recommendation_file_degrades() {
    tech_health()
        .arg("--snapshot")
        .arg(fixture("bare_repo.json"))
        .arg("--recommendations")
        .arg(fixture("does_not_exist.txt"))
        .arg("score")
        .assert()
        .success()
        .stdout(predicate::str::contains("rule-based recommendations only"));
}

#[test]
fn test_cli_invalid_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("config.toml");
    std::fs::write(&config, "[fraction_weights]\ntests = 0.9\n").unwrap();

    tech_health()
        .arg("--snapshot")
        .arg(fixture("bare_repo.json"))
        .arg("--config")
        .arg(&config)
        .arg("score")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load config"));
}

#[test]
fn test_cli_prompt() {
    tech_health()
        .arg("--snapshot")
        .arg(fixture("bare_repo.json"))
        .arg("prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("Analise o repositório acme/scratch"))
        .stdout(predicate::str::contains("Testes: Não"));
}
