//! Recommendation generation and reconciliation
//!
//! Rule-based advice derived from the structural signals is merged with
//! free text produced by an external source. The free text follows a loose
//! convention: category headings on their own lines, followed by entries that
//! start with a hyphen.

use crate::config::RecommendationPolicy;
use crate::types::{Category, RecommendationOrigin, RecommendationSet, StructuralSignals};
use std::collections::HashSet;
use std::fmt::Display;
use tracing::{debug, warn};

/// Result of asking an external collaborator for text
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalText {
    /// The source answered; the text may still be empty or malformed
    Available(String),
    /// The source could not be reached or failed
    Unavailable { reason: String },
}

impl ExternalText {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::Unavailable {
            reason: reason.into(),
        }
    }

    /// Turn the outcome of a fallible fetch into an external text value
    pub fn from_result<E: Display>(result: std::result::Result<String, E>) -> Self {
        match result {
            Ok(text) => Self::Available(text),
            Err(e) => Self::unavailable(e.to_string()),
        }
    }
}

/// Reconciled recommendations plus where they came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciled {
    pub recommendations: RecommendationSet,
    pub origin: RecommendationOrigin,
}

/// Fixed advice for each missing structural artifact
pub fn rule_based_recommendations(structural: &StructuralSignals) -> RecommendationSet {
    let mut set = RecommendationSet::new();

    if !structural.has_readme {
        set.push(
            Category::Estrutura,
            "Adicione um arquivo README.md com instruções de instalação e uso",
        );
    }
    if !structural.has_license {
        set.push(
            Category::Estrutura,
            "Adicione um arquivo LICENSE para definir os termos de uso do projeto",
        );
    }
    if !structural.has_tests {
        set.push(
            Category::Testes,
            "Implemente testes automatizados para garantir a qualidade do código",
        );
    }
    if !structural.has_ci {
        set.push(
            Category::Desenvolvimento,
            "Configure um pipeline de CI/CD para automação de testes e deploy",
        );
    }
    if !structural.has_documentation {
        set.push(Category::Documentacao, "Crie documentação detalhada do código e APIs");
    }

    // General practices, always included
    set.push(
        Category::Desenvolvimento,
        "Mantenha o código atualizado com as últimas versões das dependências",
    );
    set.push(
        Category::Revisao,
        "Implemente um processo de code review para todas as alterações",
    );
    set.push(Category::Documentacao, "Documente as decisões de arquitetura e design");
    set.push(
        Category::Testes,
        "Aumente a cobertura de testes para melhorar a confiabilidade",
    );

    set
}

/// Parse free-text recommendations into categories
///
/// A line mentioning a category keyword (case-insensitive, first keyword in
/// category order wins) selects that category and is not kept. Hyphen lines
/// under a selected category become entries, a bare `-` included as an empty
/// entry. Everything else is dropped.
pub fn parse_recommendations(text: &str) -> RecommendationSet {
    let mut set = RecommendationSet::new();
    let mut current: Option<Category> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let lowered = trimmed.to_lowercase();
        if let Some(category) = Category::ALL
            .into_iter()
            .find(|c| lowered.contains(c.heading_keyword()))
        {
            current = Some(category);
            continue;
        }

        let (Some(category), Some(entry)) = (current, trimmed.strip_prefix('-')) else {
            continue;
        };
        set.push(category, entry.trim());
    }

    debug!("Parsed {} recommendations from external text", set.len());
    set
}

/// Merge two sets category by category
///
/// Entries of `primary` come first. Duplicates are removed keeping the first
/// occurrence, then each category is truncated to `max_per_category`.
pub fn merge_recommendations(
    primary: &RecommendationSet,
    secondary: &RecommendationSet,
    max_per_category: usize,
) -> RecommendationSet {
    let mut merged = RecommendationSet::new();

    for category in Category::ALL {
        let mut seen = HashSet::new();
        let entries = merged.get_mut(category);
        for entry in primary.get(category).iter().chain(secondary.get(category)) {
            if entries.len() == max_per_category {
                break;
            }
            if seen.insert(entry.as_str()) {
                entries.push(entry.clone());
            }
        }
    }

    merged
}

/// Combine rule-based advice with external text
///
/// When the external source was unavailable only the rule-based set is kept,
/// still capped per category; the degradation is logged and recorded in the
/// origin, never raised.
pub fn reconcile(
    structural: &StructuralSignals,
    external: &ExternalText,
    policy: &RecommendationPolicy,
) -> Reconciled {
    let rules = rule_based_recommendations(structural);

    match external {
        ExternalText::Available(text) => {
            let parsed = parse_recommendations(text);
            Reconciled {
                recommendations: merge_recommendations(&rules, &parsed, policy.max_per_category),
                origin: RecommendationOrigin::Merged,
            }
        }
        ExternalText::Unavailable { reason } => {
            warn!(
                "External recommendations unavailable, using rule-based only: {}",
                reason
            );
            Reconciled {
                recommendations: merge_recommendations(
                    &rules,
                    &RecommendationSet::new(),
                    policy.max_per_category,
                ),
                origin: RecommendationOrigin::RuleBasedFallback {
                    reason: reason.clone(),
                },
            }
        }
    }
}

/// Role instruction for the external text generator
pub const ASSISTANT_ROLE: &str =
    "Você é um assistente especializado em análise de saúde técnica de repositórios de código.";

/// Request text for the external recommendation source
///
/// Asks for the headings and hyphen convention that [`parse_recommendations`] reads.
pub fn recommendation_prompt(structural: &StructuralSignals, owner: &str, repository: &str) -> String {
    let yes_no = |present: bool| if present { "Sim" } else { "Não" };
    let headings: String = Category::ALL
        .iter()
        .map(|c| format!("- {}\n", c))
        .collect();

    format!(
        "Analise o repositório {owner}/{repository}:\n\
         README: {}\n\
         Licença: {}\n\
         Testes: {}\n\
         CI/CD: {}\n\
         Documentação: {}\n\
         \n\
         Forneça recomendações para melhorar o projeto, organizadas nas seguintes categorias:\n\
         {headings}\n\
         Cada recomendação deve começar com um hífen (-).\n",
        yes_no(structural.has_readme),
        yes_no(structural.has_license),
        yes_no(structural.has_tests),
        yes_no(structural.has_ci),
        yes_no(structural.has_documentation),
    )
}

/// Request text for the external benchmark source
pub fn benchmark_prompt(owner: &str, repository: &str) -> String {
    format!("Compare o repositório {}/{} com projetos similares.", owner, repository)
}
