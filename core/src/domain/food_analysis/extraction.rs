//! Best-effort extraction of numeric fields from free-text model output.
//!
//! Rules are evaluated in order and the first rule that matches anywhere in
//! the text wins. A miss is never an error: the field falls back to its
//! default value.

use std::{num::IntErrorKind, sync::LazyLock};

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::domain::{
    common::entities::app_errors::CoreError, food_analysis::entities::ExtractedMetrics,
};

// `[0-9]` rather than `\d`: only ASCII digits are read as numbers.
const HEALTH_SCORE_PATTERNS: &[&str] = &[
    r"Health Score[:\s]+([0-9]+)",
    r"Score[:\s]+([0-9]+)",
    r"([0-9]+)/100",
    r"rated?\s+([0-9]+)\s*out\s*of\s*100",
];

const CALORIE_PATTERNS: &[&str] = &[
    r"Calories[:\s]+([0-9]+)",
    r"([0-9]+)\s*calories",
    r"([0-9]+)\s*kcal",
];

static BUILTIN_RULES: LazyLock<Vec<ExtractionRule>> = LazyLock::new(|| {
    MetricKind::ALL
        .into_iter()
        .flat_map(|kind| {
            kind.builtin_patterns().iter().map(move |pattern| {
                ExtractionRule::new(kind, pattern).expect("built-in extraction pattern compiles")
            })
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    HealthScore,
    Calories,
}

impl MetricKind {
    pub const ALL: [MetricKind; 2] = [MetricKind::HealthScore, MetricKind::Calories];

    /// Placeholder returned when no rule matches. Kept for API compatibility,
    /// the values carry no nutritional meaning.
    pub fn default_value(self) -> u64 {
        match self {
            MetricKind::HealthScore => 75,
            MetricKind::Calories => 250,
        }
    }

    fn builtin_patterns(self) -> &'static [&'static str] {
        match self {
            MetricKind::HealthScore => HEALTH_SCORE_PATTERNS,
            MetricKind::Calories => CALORIE_PATTERNS,
        }
    }
}

/// A case-insensitive pattern whose first capture group holds the value.
#[derive(Debug, Clone)]
pub struct ExtractionRule {
    kind: MetricKind,
    pattern: Regex,
}

impl ExtractionRule {
    pub fn new(kind: MetricKind, pattern: &str) -> Result<Self, CoreError> {
        let compiled = RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| {
                CoreError::Invalid(format!("invalid extraction pattern {pattern:?}: {e}"))
            })?;

        if compiled.captures_len() < 2 {
            return Err(CoreError::Invalid(format!(
                "extraction pattern {pattern:?} has no capture group"
            )));
        }

        Ok(Self {
            kind,
            pattern: compiled,
        })
    }

    // Values too large for a u64 saturate, the matching rule still wins.
    // A capture that is not a number at all counts as a miss.
    fn capture(&self, text: &str) -> Option<u64> {
        let raw = self.pattern.captures(text)?.get(1)?.as_str();
        match raw.parse::<u64>() {
            Ok(value) => Some(value),
            Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(u64::MAX),
            Err(_) => None,
        }
    }
}

/// Serialized form of a rule, as read from a rules file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionRuleSpec {
    pub kind: MetricKind,
    pub pattern: String,
}

#[derive(Debug, Clone)]
pub struct MetricExtractor {
    rules: Vec<ExtractionRule>,
}

impl Default for MetricExtractor {
    fn default() -> Self {
        Self {
            rules: BUILTIN_RULES.clone(),
        }
    }
}

impl MetricExtractor {
    pub fn with_rules(rules: Vec<ExtractionRule>) -> Self {
        Self { rules }
    }

    /// Builds an extractor where the given rules replace the built-in list of
    /// their kind. Kinds without a custom rule keep the built-in ones.
    pub fn from_specs(specs: Vec<ExtractionRuleSpec>) -> Result<Self, CoreError> {
        let mut rules = Vec::new();

        for kind in MetricKind::ALL {
            let custom: Vec<&ExtractionRuleSpec> =
                specs.iter().filter(|spec| spec.kind == kind).collect();

            if custom.is_empty() {
                rules.extend(
                    BUILTIN_RULES
                        .iter()
                        .filter(|rule| rule.kind == kind)
                        .cloned(),
                );
                continue;
            }

            for spec in custom {
                rules.push(ExtractionRule::new(kind, &spec.pattern)?);
            }
        }

        Ok(Self { rules })
    }

    pub fn from_json(raw: &str) -> Result<Self, CoreError> {
        let specs: Vec<ExtractionRuleSpec> = serde_json::from_str(raw)
            .map_err(|e| CoreError::Invalid(format!("invalid extraction rules: {e}")))?;

        Self::from_specs(specs)
    }

    pub fn rules(&self) -> &[ExtractionRule] {
        &self.rules
    }

    pub fn extract(&self, text: &str, kind: MetricKind) -> u64 {
        self.rules
            .iter()
            .filter(|rule| rule.kind == kind)
            .find_map(|rule| rule.capture(text))
            .unwrap_or_else(|| kind.default_value())
    }

    pub fn extract_metrics(&self, text: &str) -> ExtractedMetrics {
        ExtractedMetrics {
            health_score: self.extract(text, MetricKind::HealthScore),
            estimated_calories: self.extract(text, MetricKind::Calories),
        }
    }
}
