//! Priority rules and rule engine for request ordering.
//!
//! The search places requests one after another in a fixed order computed
//! before search starts. Placing the most constrained requests first keeps
//! backtracking shallow; which notion of "constrained" applies is a
//! composition of [`PriorityRule`]s evaluated by a [`RuleEngine`].
//!
//! # Usage
//!
//! ```
//! use u_timetable::dispatching::{RuleEngine, PriorityContext, TieBreaker};
//! use u_timetable::dispatching::rules;
//!
//! let engine = RuleEngine::new()
//!     .with_rule(rules::LabFirst)
//!     .with_rule(rules::FewestCandidates)
//!     .with_final_tie_breaker(TieBreaker::InsertionOrder);
//!
//! let context = PriorityContext::new();
//! assert!(engine.sort_indices(&[], &context).is_empty());
//! ```
//!
//! # References
//!
//! - Brélaz (1979), "New Methods to Color the Vertices of a Graph" (saturation ordering)
//! - Burke & Petrovic (2002), "Recent Research Directions in Automated Timetabling"

mod context;
mod engine;
pub mod rules;

pub use context::PriorityContext;
pub use engine::{EvaluationMode, RuleEngine, TieBreaker};

use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::scheduler::Request;

/// Score returned by a priority rule.
///
/// Lower scores = higher priority (placed first).
pub type RuleScore = f64;

/// A rule that evaluates request priority.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules should return smaller values
/// for requests that should be placed first.
pub trait PriorityRule: Send + Sync + Debug {
    /// Rule name (e.g., "LAB_FIRST").
    fn name(&self) -> &'static str;

    /// Evaluates the priority of a request.
    ///
    /// Returns a score where lower = higher priority.
    fn evaluate(&self, request: &Request, context: &PriorityContext) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Weights of the built-in rules.
///
/// In sequential mode a rule participates iff its weight is positive, in
/// the fixed order lab-first, fewest-candidates, busiest-teacher,
/// longest-course. In weighted mode scores are multiplied by the weights
/// and summed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriorityWeights {
    /// Weight of [`rules::LabFirst`].
    pub lab_first: f64,
    /// Weight of [`rules::FewestCandidates`].
    pub fewest_candidates: f64,
    /// Weight of [`rules::BusiestTeacher`].
    pub busiest_teacher: f64,
    /// Weight of [`rules::LongestCourse`].
    pub longest_course: f64,
}

impl Default for PriorityWeights {
    fn default() -> Self {
        Self {
            lab_first: 1.0,
            fewest_candidates: 1.0,
            busiest_teacher: 0.0,
            longest_course: 0.0,
        }
    }
}

/// Request ordering settings, as loaded from configuration.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrderingConfig {
    /// How rules are combined.
    pub mode: EvaluationMode,
    /// Rule weights.
    pub weights: PriorityWeights,
    /// Order of requests that tie on every rule.
    pub tie_breaker: TieBreaker,
}

impl OrderingConfig {
    /// Checks that every weight is finite and non-negative.
    pub fn validate(&self) -> Result<(), String> {
        let w = &self.weights;
        for (name, value) in [
            ("lab_first", w.lab_first),
            ("fewest_candidates", w.fewest_candidates),
            ("busiest_teacher", w.busiest_teacher),
            ("longest_course", w.longest_course),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!(
                    "ordering weight '{name}' must be a non-negative number, got {value}"
                ));
            }
        }
        Ok(())
    }

    /// Builds the rule engine described by this configuration.
    pub fn engine(&self) -> RuleEngine {
        let w = &self.weights;
        let mut engine = RuleEngine::new()
            .with_mode(self.mode)
            .with_final_tie_breaker(self.tie_breaker);
        if w.lab_first > 0.0 {
            engine = engine.with_weighted_rule(rules::LabFirst, w.lab_first);
        }
        if w.fewest_candidates > 0.0 {
            engine = engine.with_weighted_rule(rules::FewestCandidates, w.fewest_candidates);
        }
        if w.busiest_teacher > 0.0 {
            engine = engine.with_weighted_rule(rules::BusiestTeacher, w.busiest_teacher);
        }
        if w.longest_course > 0.0 {
            engine = engine.with_weighted_rule(rules::LongestCourse, w.longest_course);
        }
        engine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_engine_rules() {
        let engine = OrderingConfig::default().engine();
        assert_eq!(engine.rule_names(), vec!["LAB_FIRST", "FEWEST_CANDIDATES"]);
    }

    #[test]
    fn test_zero_weight_drops_rule() {
        let config = OrderingConfig {
            weights: PriorityWeights {
                lab_first: 0.0,
                longest_course: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(
            config.engine().rule_names(),
            vec!["FEWEST_CANDIDATES", "LONGEST_COURSE"]
        );
    }

    #[test]
    fn test_rejects_negative_weight() {
        let config = OrderingConfig {
            weights: PriorityWeights {
                busiest_teacher: -1.0,
                ..Default::default()
            },
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.contains("busiest_teacher"));
    }

    #[test]
    fn test_ordering_from_toml() {
        let config: OrderingConfig = toml::from_str(
            r#"
            mode = "weighted"
            tie_breaker = "by_id"

            [weights]
            busiest_teacher = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.mode, EvaluationMode::Weighted);
        assert_eq!(config.tie_breaker, TieBreaker::ById);
        assert_eq!(config.weights.lab_first, 1.0);
        assert_eq!(config.weights.busiest_teacher, 0.5);
    }
}
