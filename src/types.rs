//! Core data types for repository health reporting

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Presence of the structural artifacts of a repository
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuralSignals {
    pub has_readme: bool,
    pub has_license: bool,
    pub has_tests: bool,
    pub has_ci: bool,
    pub has_documentation: bool,
}

/// Rates and durations derived from commit, issue and pull-request history
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActivitySignals {
    /// Commits per day over the observed commit window
    pub commit_frequency: f64,
    /// Mean days from opening to closing, 0 when no issue was resolved
    pub issue_resolution_time: f64,
    /// Fraction of pull requests that were merged (0.0-1.0)
    pub pull_request_merge_rate: f64,
    /// Fraction of pull requests with at least one review comment (0.0-1.0)
    pub code_review_activity: f64,
}

impl ActivitySignals {
    /// Bring every value back into its documented domain.
    ///
    /// Non-finite and negative values become 0; ratios are clamped to [0, 1].
    pub fn clamped(&self) -> Self {
        fn non_negative(v: f64) -> f64 {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                0.0
            }
        }

        Self {
            commit_frequency: non_negative(self.commit_frequency),
            issue_resolution_time: non_negative(self.issue_resolution_time),
            pull_request_merge_rate: non_negative(self.pull_request_merge_rate).min(1.0),
            code_review_activity: non_negative(self.code_review_activity).min(1.0),
        }
    }
}

/// The nine signals a score is computed from
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct RepositorySignals {
    pub structural: StructuralSignals,
    pub activity: ActivitySignals,
}

/// Which of the two scoring formulas produced a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoringStrategy {
    /// Two 50-point halves summed on a 0-100 scale
    #[default]
    Additive,
    /// Fractional weights summed, then scaled by 100 and rounded
    WeightedFraction,
}

impl std::fmt::Display for ScoringStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Additive => write!(f, "additive"),
            Self::WeightedFraction => write!(f, "weighted-fraction"),
        }
    }
}

impl std::str::FromStr for ScoringStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "additive" | "points" => Ok(Self::Additive),
            "weighted-fraction" | "weighted" | "fraction" => Ok(Self::WeightedFraction),
            _ => Err(format!("Unknown scoring strategy: {}", s)),
        }
    }
}

/// Individual signals, in report order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Readme,
    License,
    Tests,
    Ci,
    Documentation,
    CommitFrequency,
    IssueResolution,
    PullRequestMerge,
    CodeReview,
}

impl Signal {
    pub const STRUCTURAL: [Signal; 5] = [
        Signal::Readme,
        Signal::License,
        Signal::Tests,
        Signal::Ci,
        Signal::Documentation,
    ];

    pub const ACTIVITY: [Signal; 4] = [
        Signal::CommitFrequency,
        Signal::IssueResolution,
        Signal::PullRequestMerge,
        Signal::CodeReview,
    ];

    pub fn is_structural(self) -> bool {
        Self::STRUCTURAL.contains(&self)
    }
}

impl std::fmt::Display for Signal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Readme => "README",
            Self::License => "License",
            Self::Tests => "Tests",
            Self::Ci => "CI",
            Self::Documentation => "Documentation",
            Self::CommitFrequency => "Commit frequency",
            Self::IssueResolution => "Issue resolution",
            Self::PullRequestMerge => "Pull request merge rate",
            Self::CodeReview => "Code review activity",
        };
        write!(f, "{}", name)
    }
}

/// Points earned by one signal
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalDetail {
    pub score: f64,
    pub max_score: f64,
    /// Human-readable raw value, e.g. `✅` or `2.50 commits/dia`
    pub display_value: String,
}

/// Score split between the structural and activity halves
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    pub structural: f64,
    pub activity: f64,
}

/// Letter grade of the additive model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
    E,
}

/// Qualitative level of the weighted-fraction model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthLevel {
    Excelente,
    Bom,
    Regular,
    PrecisaDeMelhorias,
    Critico,
}

/// Qualitative bucket of a total score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Tier {
    Grade(Grade),
    Level(HealthLevel),
}

impl Tier {
    /// Short label: the letter grade or the level name
    pub fn label(&self) -> &'static str {
        match self {
            Tier::Grade(Grade::A) => "A",
            Tier::Grade(Grade::B) => "B",
            Tier::Grade(Grade::C) => "C",
            Tier::Grade(Grade::D) => "D",
            Tier::Grade(Grade::E) => "E",
            Tier::Level(HealthLevel::Excelente) => "Excelente",
            Tier::Level(HealthLevel::Bom) => "Bom",
            Tier::Level(HealthLevel::Regular) => "Regular",
            Tier::Level(HealthLevel::PrecisaDeMelhorias) => "Precisa de Melhorias",
            Tier::Level(HealthLevel::Critico) => "Crítico",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tier::Grade(Grade::A) => "Excelente",
            Tier::Grade(Grade::B) => "Muito Bom",
            Tier::Grade(Grade::C) => "Bom",
            Tier::Grade(Grade::D) => "Regular",
            Tier::Grade(Grade::E) => "Precisa Melhorar",
            Tier::Level(HealthLevel::Excelente) => {
                "O repositório demonstra excelentes práticas de desenvolvimento e manutenção."
            }
            Tier::Level(HealthLevel::Bom) => {
                "O repositório apresenta boas práticas, com algumas áreas para melhoria."
            }
            Tier::Level(HealthLevel::Regular) => {
                "O repositório tem práticas regulares, com várias oportunidades de melhoria."
            }
            Tier::Level(HealthLevel::PrecisaDeMelhorias) => {
                "O repositório precisa de melhorias significativas em várias áreas."
            }
            Tier::Level(HealthLevel::Critico) => {
                "O repositório requer atenção imediata e melhorias críticas."
            }
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Outcome of scoring a signal set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub strategy: ScoringStrategy,
    /// Overall score on the 0-100 scale
    pub total: f64,
    /// Highest total the active weight table can produce
    pub max_total: f64,
    pub sub_scores: SubScores,
    pub tier: Tier,
    pub tier_description: String,
    pub details: BTreeMap<Signal, SignalDetail>,
}

/// Fixed recommendation categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Estrutura,
    Desenvolvimento,
    Revisao,
    Documentacao,
    Testes,
}

impl Category {
    pub const ALL: [Category; 5] = [
        Category::Estrutura,
        Category::Desenvolvimento,
        Category::Revisao,
        Category::Documentacao,
        Category::Testes,
    ];

    /// Lowercase keyword that marks a heading for this category in free text
    pub fn heading_keyword(self) -> &'static str {
        match self {
            Self::Estrutura => "estrutura",
            Self::Desenvolvimento => "desenvolvimento",
            Self::Revisao => "revisão",
            Self::Documentacao => "documentação",
            Self::Testes => "testes",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Estrutura => write!(f, "Estrutura"),
            Self::Desenvolvimento => write!(f, "Desenvolvimento"),
            Self::Revisao => write!(f, "Revisão"),
            Self::Documentacao => write!(f, "Documentação"),
            Self::Testes => write!(f, "Testes"),
        }
    }
}

/// Recommendations bucketed by category
///
/// Every category is always present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    #[serde(default)]
    pub estrutura: Vec<String>,
    #[serde(default)]
    pub desenvolvimento: Vec<String>,
    #[serde(default)]
    pub revisao: Vec<String>,
    #[serde(default)]
    pub documentacao: Vec<String>,
    #[serde(default)]
    pub testes: Vec<String>,
}

impl RecommendationSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, category: Category) -> &[String] {
        match category {
            Category::Estrutura => &self.estrutura,
            Category::Desenvolvimento => &self.desenvolvimento,
            Category::Revisao => &self.revisao,
            Category::Documentacao => &self.documentacao,
            Category::Testes => &self.testes,
        }
    }

    pub fn get_mut(&mut self, category: Category) -> &mut Vec<String> {
        match category {
            Category::Estrutura => &mut self.estrutura,
            Category::Desenvolvimento => &mut self.desenvolvimento,
            Category::Revisao => &mut self.revisao,
            Category::Documentacao => &mut self.documentacao,
            Category::Testes => &mut self.testes,
        }
    }

    /// Append an entry to a category without deduplication or capping
    pub fn push(&mut self, category: Category, entry: impl Into<String>) {
        self.get_mut(category).push(entry.into());
    }

    /// Iterate categories in their fixed order
    pub fn iter(&self) -> impl Iterator<Item = (Category, &[String])> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    pub fn len(&self) -> usize {
        self.iter().map(|(_, entries)| entries.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where the recommendations of a report came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RecommendationOrigin {
    /// Rule-based entries merged with parsed external text
    Merged,
    /// External text was unavailable; rule-based entries only
    RuleBasedFallback { reason: String },
}

/// Identity and provenance of a report
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub repository: String,
    pub owner: String,
    pub recommendation_origin: RecommendationOrigin,
}

/// Complete health report for one repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub metadata: ReportMetadata,
    pub score: ScoreResult,
    pub signals: RepositorySignals,
    pub recommendations: RecommendationSet,
    /// Comparison with similar projects, passed through verbatim
    pub benchmark_narrative: String,
}
