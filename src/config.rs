//! Configuration for scoring weights and recommendation limits

use crate::error::{HealthError, Result};
use crate::types::ScoringStrategy;
use serde::{Deserialize, Serialize};

/// Main configuration for the health analysis
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Formula used to compute the total score
    pub strategy: ScoringStrategy,
    /// Point values for the additive model
    pub additive_weights: AdditiveWeights,
    /// Fractional weights for the weighted-fraction model
    pub fraction_weights: FractionWeights,
    /// Limits applied when reconciling recommendations
    pub recommendations: RecommendationPolicy,
}

/// Maximum points per signal in the additive model (0-100 scale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdditiveWeights {
    pub readme: f64,
    pub license: f64,
    pub tests: f64,
    pub ci: f64,
    pub documentation: f64,
    pub commit_frequency: f64,
    pub issue_resolution: f64,
    pub pull_request_merge: f64,
    pub code_review: f64,
}

/// Fractional weight per signal in the weighted-fraction model (0.0-1.0 scale)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FractionWeights {
    pub readme: f64,
    pub license: f64,
    pub tests: f64,
    pub ci: f64,
    pub documentation: f64,
    pub commit_frequency: f64,
    pub issue_resolution: f64,
    pub pull_request_merge: f64,
    pub code_review: f64,
}

/// Recommendation reconciliation limits
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationPolicy {
    /// Entries kept per category after merging
    pub max_per_category: usize,
}

impl Default for AdditiveWeights {
    fn default() -> Self {
        Self {
            readme: 10.0,
            license: 5.0,
            tests: 15.0,
            ci: 10.0,
            documentation: 10.0,
            commit_frequency: 15.0,
            issue_resolution: 10.0,
            pull_request_merge: 15.0,
            code_review: 10.0,
        }
    }
}

impl AdditiveWeights {
    fn values(&self) -> [(&'static str, f64); 9] {
        [
            ("readme", self.readme),
            ("license", self.license),
            ("tests", self.tests),
            ("ci", self.ci),
            ("documentation", self.documentation),
            ("commit_frequency", self.commit_frequency),
            ("issue_resolution", self.issue_resolution),
            ("pull_request_merge", self.pull_request_merge),
            ("code_review", self.code_review),
        ]
    }

    /// Sum of all maxima, i.e. the best achievable total
    pub fn total(&self) -> f64 {
        self.values().iter().map(|(_, v)| v).sum()
    }

    /// Validate that weights are non-negative and fit the 0-100 scale
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_table(&self.values(), 100.0)
    }
}

impl Default for FractionWeights {
    fn default() -> Self {
        Self {
            readme: 0.1,
            license: 0.1,
            tests: 0.2,
            ci: 0.2,
            documentation: 0.1,
            commit_frequency: 0.1,
            issue_resolution: 0.1,
            pull_request_merge: 0.05,
            code_review: 0.05,
        }
    }
}

impl FractionWeights {
    fn values(&self) -> [(&'static str, f64); 9] {
        [
            ("readme", self.readme),
            ("license", self.license),
            ("tests", self.tests),
            ("ci", self.ci),
            ("documentation", self.documentation),
            ("commit_frequency", self.commit_frequency),
            ("issue_resolution", self.issue_resolution),
            ("pull_request_merge", self.pull_request_merge),
            ("code_review", self.code_review),
        ]
    }

    pub fn total(&self) -> f64 {
        self.values().iter().map(|(_, v)| v).sum()
    }

    /// Validate that weights are non-negative and sum to at most 1.0
    pub fn validate(&self) -> std::result::Result<(), String> {
        validate_table(&self.values(), 1.0)
    }
}

fn validate_table(values: &[(&'static str, f64)], max_total: f64) -> std::result::Result<(), String> {
    for (name, value) in values {
        if !value.is_finite() || *value < 0.0 {
            return Err(format!("Weight '{}' must be a non-negative number, got {}", name, value));
        }
    }
    let sum: f64 = values.iter().map(|(_, v)| v).sum();
    if sum > max_total + 1e-9 {
        return Err(format!("Weights must sum to at most {}, got {}", max_total, sum));
    }
    Ok(())
}

impl Default for RecommendationPolicy {
    fn default() -> Self {
        Self { max_per_category: 5 }
    }
}

impl HealthConfig {
    /// Create a new builder for HealthConfig
    pub fn builder() -> HealthConfigBuilder {
        HealthConfigBuilder::default()
    }

    /// Parse a configuration from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: HealthConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every weight table and limit
    pub fn validate(&self) -> Result<()> {
        self.additive_weights
            .validate()
            .map_err(|e| HealthError::config(format!("additive_weights: {}", e)))?;
        self.fraction_weights
            .validate()
            .map_err(|e| HealthError::config(format!("fraction_weights: {}", e)))?;
        if self.recommendations.max_per_category == 0 {
            return Err(HealthError::config(
                "recommendations.max_per_category must be at least 1",
            ));
        }
        Ok(())
    }
}

/// Builder for HealthConfig
#[derive(Default)]
pub struct HealthConfigBuilder {
    strategy: Option<ScoringStrategy>,
    additive_weights: Option<AdditiveWeights>,
    fraction_weights: Option<FractionWeights>,
    recommendations: Option<RecommendationPolicy>,
}

impl HealthConfigBuilder {
    pub fn strategy(mut self, strategy: ScoringStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    pub fn additive_weights(mut self, weights: AdditiveWeights) -> Self {
        self.additive_weights = Some(weights);
        self
    }

    pub fn fraction_weights(mut self, weights: FractionWeights) -> Self {
        self.fraction_weights = Some(weights);
        self
    }

    pub fn recommendations(mut self, policy: RecommendationPolicy) -> Self {
        self.recommendations = Some(policy);
        self
    }

    pub fn build(self) -> HealthConfig {
        HealthConfig {
            strategy: self.strategy.unwrap_or_default(),
            additive_weights: self.additive_weights.unwrap_or_default(),
            fraction_weights: self.fraction_weights.unwrap_or_default(),
            recommendations: self.recommendations.unwrap_or_default(),
        }
    }
}
